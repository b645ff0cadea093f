//! Per-request deadline for any directory store.
//!
//! A remote request that never completes would otherwise leave the calling
//! flow suspended forever. Expiry surfaces as a retryable
//! `StoreError::Timeout`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use fyp_core::enums::Collection;

use crate::batch::WriteBatch;
use crate::document::{Document, Fields};
use crate::error::StoreError;
use crate::query::Query;
use crate::{DirectoryStore, Mutation};

pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: DirectoryStore> TimeoutStore<S> {
    #[must_use]
    pub const fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        request: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, StoreError> {
        if let Ok(result) = tokio::time::timeout(self.timeout, request).await {
            result
        } else {
            let after_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(
                backend = self.inner.backend_tag(),
                operation,
                after_ms,
                "store request timed out"
            );
            Err(StoreError::Timeout { operation, after_ms })
        }
    }
}

#[async_trait]
impl<S: DirectoryStore> DirectoryStore for TimeoutStore<S> {
    fn backend_tag(&self) -> &'static str {
        self.inner.backend_tag()
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.bounded("query", self.inner.query(query)).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        self.bounded("get", self.inner.get(collection, id)).await
    }

    async fn set(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.bounded("set", self.inner.set(collection, id, fields)).await
    }

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.bounded("update", self.inner.update(collection, id, fields))
            .await
    }

    async fn transact(
        &self,
        collection: Collection,
        id: &str,
        mutation: Mutation<'_>,
    ) -> Result<Document, StoreError> {
        self.bounded("transact", self.inner.transact(collection, id, mutation))
            .await
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.bounded("commit", self.inner.commit(batch)).await
    }
}
