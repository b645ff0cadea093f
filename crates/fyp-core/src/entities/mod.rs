//! Directory records.
//!
//! Each record maps to one document in a store collection. Stored keys are
//! camelCase. Every struct carries its document `id`; the store injects it on
//! decode and strips it on encode.

mod directory;
mod project;
mod student;
mod supervisor;
mod user;

pub use directory::{Department, School};
pub use project::Project;
pub use student::Student;
pub use supervisor::{DEFAULT_MAX_STUDENTS, Supervisor, UNKNOWN_SUPERVISOR_NAME};
pub use user::UserProfile;
