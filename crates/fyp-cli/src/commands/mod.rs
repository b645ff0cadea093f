pub mod assign;
pub mod dispatch;
pub mod reassign;
pub mod register;
pub mod repoint;
pub mod students;
pub mod supervisors;
