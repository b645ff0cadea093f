//! Multi-document write batches.

use fyp_core::enums::Collection;

use crate::document::Fields;

/// One staged patch inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchUpdate {
    pub collection: Collection,
    pub id: String,
    pub fields: Fields,
}

/// An all-or-nothing set of document patches.
///
/// Staging never touches the store; [`crate::DirectoryStore::commit`] applies
/// every update or none of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    updates: Vec<BatchUpdate>,
}

impl WriteBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a patch of an existing document.
    pub fn update(&mut self, collection: Collection, id: impl Into<String>, fields: Fields) -> &mut Self {
        self.updates.push(BatchUpdate {
            collection,
            id: id.into(),
            fields,
        });
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    #[must_use]
    pub fn updates(&self) -> &[BatchUpdate] {
        &self.updates
    }

    #[must_use]
    pub fn into_updates(self) -> Vec<BatchUpdate> {
        self.updates
    }
}
