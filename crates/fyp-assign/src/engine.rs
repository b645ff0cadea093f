//! Tiered supervisor search.
//!
//! ```text
//! department (same dept, least loaded first)
//!   └─ none with capacity ─► school (same school, other dept, by dept then load)
//!        └─ none with capacity ─► any (globally least loaded, single candidate)
//!             └─ none with capacity ─► Unassigned
//! ```
//!
//! A tier whose query fails is logged and treated as empty, so a degraded
//! store still yields the best answer the remaining tiers can give.

use fyp_core::entities::Supervisor;
use fyp_core::enums::{Collection, Tier};
use fyp_core::fields;
use fyp_store::{Direction, DirectoryStore, Document, Query, StoreError};
use tracing::{debug, info, warn};

use crate::assignment::Assignment;
use crate::repoint::ProjectRepointer;
use crate::settings::AssignmentSettings;

/// Assignment operations over one directory store.
///
/// The engine holds no mutable state of its own; all coordination happens
/// through the store, so one engine may serve concurrent callers.
pub struct AssignmentEngine<S> {
    pub(crate) store: S,
    pub(crate) settings: AssignmentSettings,
}

impl<S: DirectoryStore> AssignmentEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, AssignmentSettings::default())
    }

    pub const fn with_settings(store: S, settings: AssignmentSettings) -> Self {
        Self { store, settings }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn settings(&self) -> &AssignmentSettings {
        &self.settings
    }

    /// Batch re-pointer sharing this engine's store.
    pub const fn repointer(&self) -> ProjectRepointer<'_, S> {
        ProjectRepointer::new(&self.store)
    }

    /// Pick a supervisor for a student in `school_id` / `department_id`.
    ///
    /// Never fails: store errors degrade a tier to "no match" and the
    /// search ends in [`Assignment::Unassigned`] when nothing fits. Nothing
    /// is written; pair with [`Self::record_assignment`] once the student
    /// record points at the result.
    #[tracing::instrument(skip(self), fields(backend = self.store.backend_tag()))]
    pub async fn find_assignment(&self, school_id: &str, department_id: &str) -> Assignment {
        for tier in Tier::ALL {
            match self.search_tier(tier, school_id, department_id).await {
                Ok(Some(supervisor)) => {
                    info!(
                        %tier,
                        supervisor_id = %supervisor.id,
                        current = supervisor.current_students,
                        max = supervisor.max_students,
                        "supervisor matched"
                    );
                    return Assignment::from_match(supervisor, tier);
                }
                Ok(None) => debug!(%tier, "no supervisor with capacity"),
                Err(error) => warn!(%tier, %error, "supervisor search tier failed, falling through"),
            }
        }
        info!("no supervisor available, leaving student unassigned");
        Assignment::Unassigned
    }

    async fn search_tier(
        &self,
        tier: Tier,
        school_id: &str,
        department_id: &str,
    ) -> Result<Option<Supervisor>, StoreError> {
        let docs = self.store.query(&tier_query(tier, school_id, department_id)).await?;
        let mut candidates = decode_supervisors(&docs, self.settings.default_max_students).into_iter();
        Ok(match tier {
            Tier::Department | Tier::School => candidates.find(Supervisor::has_capacity),
            // The global tier inspects only its single least-loaded candidate.
            Tier::Any => candidates.next().filter(Supervisor::has_capacity),
        })
    }
}

/// The store query issued for `tier`.
#[must_use]
pub fn tier_query(tier: Tier, school_id: &str, department_id: &str) -> Query {
    let active = Query::new(Collection::Supervisors).where_eq(fields::ACTIVE, true);
    match tier {
        Tier::Department => active
            .where_eq(fields::DEPARTMENT_ID, department_id)
            .order_by(fields::CURRENT_STUDENTS, Direction::Asc),
        Tier::School => active
            .where_eq(fields::SCHOOL_ID, school_id)
            .where_not_eq(fields::DEPARTMENT_ID, department_id)
            .order_by(fields::DEPARTMENT_ID, Direction::Asc)
            .order_by(fields::CURRENT_STUDENTS, Direction::Asc),
        Tier::Any => active
            .order_by(fields::CURRENT_STUDENTS, Direction::Asc)
            .limit(1),
    }
}

/// Decode one supervisor, giving it `default_max` when `maxStudents` is absent.
pub(crate) fn decode_supervisor(doc: &Document, default_max: u32) -> Result<Supervisor, StoreError> {
    let mut supervisor: Supervisor = doc.decode(Collection::Supervisors)?;
    if doc.get(fields::MAX_STUDENTS).is_none() {
        supervisor.max_students = default_max;
    }
    Ok(supervisor)
}

/// Decode supervisor documents, skipping any that do not fit the record shape.
pub(crate) fn decode_supervisors(docs: &[Document], default_max: u32) -> Vec<Supervisor> {
    docs.iter()
        .filter_map(|doc| match decode_supervisor(doc, default_max) {
            Ok(sup) => Some(sup),
            Err(error) => {
                warn!(%error, "skipping malformed supervisor document");
                None
            }
        })
        .collect()
}
