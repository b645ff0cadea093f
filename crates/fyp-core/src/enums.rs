//! Roles, search tiers, and collection names.
//!
//! All enums serialize in lowercase so they match the values stored in
//! directory documents.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role tag carried by every user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Supervisor,
    Admin,
}

impl Role {
    /// Return the string representation used in stored documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Supervisor => "supervisor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Priority level in the supervisor search.
///
/// ```text
/// department → school → any
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Same department as the student.
    Department,
    /// Same school, any other department.
    School,
    /// Any active supervisor.
    Any,
}

impl Tier {
    /// Tiers in the order they are tried.
    pub const ALL: [Self; 3] = [Self::Department, Self::School, Self::Any];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::School => "school",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Document collections in the directory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Supervisors,
    Schools,
    Departments,
    Projects,
}

impl Collection {
    pub const ALL: [Self; 5] = [
        Self::Users,
        Self::Supervisors,
        Self::Schools,
        Self::Departments,
        Self::Projects,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Supervisors => "supervisors",
            Self::Schools => "schools",
            Self::Departments => "departments",
            Self::Projects => "projects",
        }
    }

    /// Singular entity name used in error messages.
    #[must_use]
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Supervisors => "supervisor",
            Self::Schools => "school",
            Self::Departments => "department",
            Self::Projects => "project",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Supervisor).unwrap();
        assert_eq!(json, "\"supervisor\"");
        let back: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(back, Role::Admin);
    }

    #[test]
    fn tiers_are_ordered_by_priority() {
        assert!(Tier::Department < Tier::School);
        assert!(Tier::School < Tier::Any);
        assert_eq!(Tier::ALL[0], Tier::Department);
    }

    #[test]
    fn collection_names_match_display() {
        for collection in Collection::ALL {
            assert_eq!(collection.to_string(), collection.as_str());
        }
        assert_eq!(Collection::Supervisors.entity_name(), "supervisor");
    }
}
