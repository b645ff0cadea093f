//! # fyp-store
//!
//! The directory store contract the assignment engine depends on.
//!
//! A directory store is a document database with collections of users,
//! supervisors, schools, departments, and projects. It offers equality and
//! range queries with ordering and limits, single-document read-modify-write
//! transactions, and all-or-nothing multi-document batches. It does NOT offer
//! cross-document transactions.
//!
//! Backends:
//! - [`MemoryStore`]: in-process reference backend with fault injection,
//!   used by tests and the `fyp` console.
//! - [`TimeoutStore`]: wraps any backend and bounds every round-trip.

pub mod batch;
pub mod document;
pub mod error;
pub mod memory;
pub mod query;
pub mod snapshot;
pub mod timeout;

use std::sync::Arc;

use async_trait::async_trait;
use fyp_core::enums::Collection;

pub use batch::WriteBatch;
pub use document::{Document, Fields, fields_from, fields_of};
pub use error::StoreError;
pub use memory::{MemoryStore, Operation};
pub use query::{Direction, Query};
pub use snapshot::Snapshot;
pub use timeout::TimeoutStore;

/// Read-modify-write step of a single-document transaction.
///
/// Receives the current document and returns the patch to write. It may run
/// more than once when the store retries after a conflicting writer.
pub type Mutation<'a> = &'a (dyn Fn(&Document) -> Result<Fields, StoreError> + Send + Sync);

/// Document store operations required by the assignment engine.
///
/// Every call is one network round-trip in a remote backend.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Short backend name for logs.
    fn backend_tag(&self) -> &'static str;

    /// Run a filtered, ordered, limited query against one collection.
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Fetch one document, `None` when absent.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or replace a document.
    async fn set(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Patch an existing document. Fails with `NotFound` when absent.
    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Atomic read-modify-write of one existing document.
    ///
    /// Returns the document as committed.
    async fn transact(
        &self,
        collection: Collection,
        id: &str,
        mutation: Mutation<'_>,
    ) -> Result<Document, StoreError>;

    /// Apply every update in `batch` or none of them.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: DirectoryStore + ?Sized> DirectoryStore for Arc<T> {
    fn backend_tag(&self) -> &'static str {
        (**self).backend_tag()
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        (**self).query(query).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).get(collection, id).await
    }

    async fn set(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        (**self).set(collection, id, fields).await
    }

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        (**self).update(collection, id, fields).await
    }

    async fn transact(
        &self,
        collection: Collection,
        id: &str,
        mutation: Mutation<'_>,
    ) -> Result<Document, StoreError> {
        (**self).transact(collection, id, mutation).await
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        (**self).commit(batch).await
    }
}
