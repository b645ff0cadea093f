//! # fyp-core
//!
//! Core records, enums, and error types for FYP supervisor assignment.
//!
//! This crate provides the foundational types shared across all workspace crates:
//! - Directory records (supervisors, students, schools, departments, projects)
//! - Role, tier, and collection enums
//! - Document field-name constants
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod fields;
