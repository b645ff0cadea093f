use fyp_core::entities::Supervisor;
use fyp_core::enums::Tier;
use serde::Serialize;

/// Outcome of a supervisor search.
///
/// `Unassigned` is the "assigned later" sentinel: its id and name read as
/// empty strings and callers must not treat it as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assignment {
    Assigned {
        supervisor_id: String,
        supervisor_name: String,
        tier: Tier,
    },
    Unassigned,
}

impl Assignment {
    pub(crate) fn from_match(supervisor: Supervisor, tier: Tier) -> Self {
        Self::Assigned {
            supervisor_id: supervisor.id,
            supervisor_name: supervisor.name,
            tier,
        }
    }

    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }

    #[must_use]
    pub fn supervisor_id(&self) -> &str {
        match self {
            Self::Assigned { supervisor_id, .. } => supervisor_id,
            Self::Unassigned => "",
        }
    }

    #[must_use]
    pub fn supervisor_name(&self) -> &str {
        match self {
            Self::Assigned {
                supervisor_name, ..
            } => supervisor_name,
            Self::Unassigned => "",
        }
    }

    #[must_use]
    pub const fn tier(&self) -> Option<Tier> {
        match self {
            Self::Assigned { tier, .. } => Some(*tier),
            Self::Unassigned => None,
        }
    }
}
