//! # fyp-assign
//!
//! Supervisor assignment for final-year projects.
//!
//! - [`AssignmentEngine::find_assignment`]: tiered search for a supervisor
//!   with free capacity (department, then school, then anyone).
//! - [`AssignmentEngine::record_assignment`]: atomic load counter increment.
//! - [`AssignmentEngine::reassign`]: admin move of a student, counters, and
//!   projects, reported step by step.
//! - [`AssignmentEngine::register_student`]: create a student and assign in one call.
//! - [`ProjectRepointer`]: all-or-nothing update of a student's projects.
//!
//! All operations run against any [`fyp_store::DirectoryStore`].

mod assignment;
mod counters;
mod directory;
mod engine;
mod error;
mod reassign;
mod registration;
mod repoint;
mod report;
mod settings;

pub use assignment::Assignment;
pub use engine::{AssignmentEngine, tier_query};
pub use error::AssignError;
pub use registration::NewStudent;
pub use repoint::{ProjectRepointer, RepointSummary};
pub use report::{CounterAdjustment, CounterChange, ReassignReport, RegistrationReport};
pub use settings::{AssignmentSettings, UNKNOWN_DEPARTMENT_NAME, UNKNOWN_SCHOOL_NAME};
