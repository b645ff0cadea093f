//! Read-side lookups for display and admin screens.

use fyp_core::entities::{Student, Supervisor, UserProfile};
use fyp_core::enums::{Collection, Role};
use fyp_core::fields;
use fyp_store::{Document, DirectoryStore, Query, StoreError};
use tracing::warn;

use crate::engine::{AssignmentEngine, decode_supervisors};
use crate::error::AssignError;
use crate::settings::{UNKNOWN_DEPARTMENT_NAME, UNKNOWN_SCHOOL_NAME};

impl<S: DirectoryStore> AssignmentEngine<S> {
    /// Display name for a supervisor id.
    ///
    /// Looks in `supervisors` first, then in `users` (display name, name,
    /// username). Falls back to the configured unknown name, including on
    /// store errors.
    pub async fn supervisor_name(&self, supervisor_id: &str) -> String {
        if supervisor_id.is_empty() {
            return self.unknown_supervisor();
        }
        match self.store.get(Collection::Supervisors, supervisor_id).await {
            Ok(Some(doc)) => return name_or(&doc, self.unknown_supervisor()),
            Ok(None) => {}
            Err(error) => warn!(%error, supervisor_id, "supervisor lookup failed"),
        }
        match self.store.get(Collection::Users, supervisor_id).await {
            Ok(Some(doc)) => doc
                .decode::<UserProfile>(Collection::Users)
                .ok()
                .and_then(|user| user.display_name().map(str::to_string))
                .unwrap_or_else(|| self.unknown_supervisor()),
            Ok(None) => self.unknown_supervisor(),
            Err(error) => {
                warn!(%error, supervisor_id, "user lookup failed");
                self.unknown_supervisor()
            }
        }
    }

    /// The student's current supervisor id, `None` when unassigned.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown student, `Store` on lookup failure.
    pub async fn current_supervisor(&self, student_id: &str) -> Result<Option<String>, AssignError> {
        let doc = self
            .store
            .get(Collection::Users, student_id)
            .await?
            .ok_or_else(|| AssignError::NotFound {
                entity: Collection::Users.entity_name(),
                id: student_id.to_string(),
            })?;
        Ok(doc
            .get_str(fields::SUPERVISOR_ID)
            .filter(|id| !id.is_empty())
            .map(str::to_string))
    }

    /// All supervisors for an admin picker.
    ///
    /// When the `supervisors` collection is empty or unreadable, users with
    /// the supervisor role are listed instead, with no load and the default
    /// capacity.
    ///
    /// # Errors
    ///
    /// `Store` when the fallback query fails as well.
    pub async fn list_supervisors(&self) -> Result<Vec<Supervisor>, AssignError> {
        match self.store.query(&Query::new(Collection::Supervisors)).await {
            Ok(docs) if !docs.is_empty() => return Ok(decode_supervisors(&docs, self.settings.default_max_students)),
            Ok(_) => {}
            Err(error) => warn!(%error, "supervisor listing failed, falling back to users"),
        }
        let query = Query::new(Collection::Users).where_eq(fields::ROLE, Role::Supervisor.as_str());
        let users = self.store.query(&query).await?;
        Ok(users.iter().map(|doc| self.supervisor_from_user(doc)).collect())
    }

    pub async fn department_name(&self, department_id: &str) -> String {
        self.reference_name(Collection::Departments, department_id, UNKNOWN_DEPARTMENT_NAME)
            .await
    }

    pub async fn school_name(&self, school_id: &str) -> String {
        self.reference_name(Collection::Schools, school_id, UNKNOWN_SCHOOL_NAME)
            .await
    }

    /// Students currently pointing at `supervisor_id`.
    ///
    /// # Errors
    ///
    /// `Store` on query failure.
    pub async fn students_of(&self, supervisor_id: &str) -> Result<Vec<Student>, AssignError> {
        let query = Query::new(Collection::Users)
            .where_eq(fields::ROLE, Role::Student.as_str())
            .where_eq(fields::SUPERVISOR_ID, supervisor_id);
        let docs = self.store.query(&query).await?;
        Ok(docs
            .iter()
            .filter_map(|doc| match doc.decode::<Student>(Collection::Users) {
                Ok(student) => Some(student),
                Err(error) => {
                    warn!(%error, "skipping malformed student document");
                    None
                }
            })
            .collect())
    }

    async fn reference_name(&self, collection: Collection, id: &str, placeholder: &str) -> String {
        let found: Result<Option<Document>, StoreError> = if id.is_empty() {
            Ok(None)
        } else {
            self.store.get(collection, id).await
        };
        match found {
            Ok(Some(doc)) => name_or(&doc, placeholder.to_string()),
            Ok(None) => placeholder.to_string(),
            Err(error) => {
                warn!(%error, %collection, id, "name lookup failed");
                placeholder.to_string()
            }
        }
    }

    fn supervisor_from_user(&self, doc: &Document) -> Supervisor {
        let user = doc.decode::<UserProfile>(Collection::Users).unwrap_or_default();
        Supervisor {
            id: doc.id.clone(),
            name: user
                .display_name()
                .map_or_else(|| self.unknown_supervisor(), str::to_string),
            email: user.email,
            school_id: doc.get_str(fields::SCHOOL_ID).unwrap_or_default().to_string(),
            department_id: doc.get_str(fields::DEPARTMENT_ID).unwrap_or_default().to_string(),
            active: true,
            current_students: 0,
            max_students: self.settings.default_max_students,
            specialization: String::new(),
        }
    }

    fn unknown_supervisor(&self) -> String {
        self.settings.unknown_supervisor_name.clone()
    }
}

fn name_or(doc: &Document, fallback: String) -> String {
    doc.get_str(fields::NAME)
        .filter(|name| !name.is_empty())
        .map_or(fallback, str::to_string)
}
