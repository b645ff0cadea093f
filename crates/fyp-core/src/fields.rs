//! Document field names shared by every store query and patch.
//!
//! Stored documents use camelCase keys. Keeping the names here means a
//! renamed field breaks at compile time instead of silently matching nothing.

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const DISPLAY_NAME: &str = "displayName";
pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";
pub const ROLE: &str = "role";
pub const ACTIVE: &str = "active";
pub const SCHOOL_ID: &str = "schoolId";
pub const DEPARTMENT_ID: &str = "departmentId";
pub const STUDENT_ID: &str = "studentId";
pub const SUPERVISOR_ID: &str = "supervisorId";
pub const SUPERVISOR_NAME: &str = "supervisorName";
pub const CURRENT_STUDENTS: &str = "currentStudents";
pub const MAX_STUDENTS: &str = "maxStudents";
pub const CREATED_AT: &str = "createdAt";
