//! In-process directory store.
//!
//! Every document carries a version bumped on each write. Transactions are
//! optimistic: read and version-stamp, run the mutation, then commit only if
//! the version is unchanged, retrying otherwise.
//!
//! Faults, latency, and interleaved writers can be injected to exercise the
//! failure paths of callers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fyp_core::enums::Collection;
use fyp_core::fields;
use tokio::sync::Mutex;

use crate::batch::WriteBatch;
use crate::document::{Document, Fields};
use crate::error::StoreError;
use crate::query::Query;
use crate::{DirectoryStore, Mutation};

const DEFAULT_TRANSACTION_ATTEMPTS: u32 = 5;

/// Store operations that faults can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Query,
    Get,
    Set,
    Update,
    Transact,
    Commit,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Get => "get",
            Self::Set => "set",
            Self::Update => "update",
            Self::Transact => "transact",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct Fault {
    op: Operation,
    collection: Option<Collection>,
    /// Matching calls to let through before failing.
    skip: u32,
    /// Failures left before the fault disarms.
    remaining: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredDoc {
    fields: Fields,
    version: u64,
}

pub(crate) type Collections = BTreeMap<Collection, BTreeMap<String, StoredDoc>>;

#[derive(Debug, Clone)]
struct InterleavedWrite {
    collection: Collection,
    id: String,
    fields: Fields,
}

pub struct MemoryStore {
    collections: Mutex<Collections>,
    faults: Mutex<Vec<Fault>>,
    interleaved: Mutex<Vec<InterleavedWrite>>,
    latency: Duration,
    max_attempts: u32,
    transaction_retries: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_collections(Collections::new())
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_collections(collections: Collections) -> Self {
        Self {
            collections: Mutex::new(collections),
            faults: Mutex::new(Vec::new()),
            interleaved: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
            max_attempts: DEFAULT_TRANSACTION_ATTEMPTS,
            transaction_retries: AtomicU64::new(0),
        }
    }

    /// Attempts a transaction makes before failing with `Contention`.
    #[must_use]
    pub fn with_transaction_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Delay added to every round-trip.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Insert or replace a document, bypassing faults and latency.
    pub async fn seed(&self, collection: Collection, id: &str, fields: Fields) {
        let mut guard = self.collections.lock().await;
        write_doc(&mut guard, collection, id, fields);
    }

    /// Fail the next call of `op`.
    pub async fn fail_next(&self, op: Operation) {
        self.inject(op, None, 0, 1).await;
    }

    /// Let `skip` calls of `op` through, then fail the next one.
    pub async fn fail_after(&self, op: Operation, skip: u32) {
        self.inject(op, None, skip, 1).await;
    }

    /// Fail every call of `op` from now on.
    pub async fn fail_always(&self, op: Operation) {
        self.inject(op, None, 0, u32::MAX).await;
    }

    /// Fail the next call of `op` that targets `collection`.
    pub async fn fail_next_in(&self, op: Operation, collection: Collection) {
        self.inject(op, Some(collection), 0, 1).await;
    }

    async fn inject(&self, op: Operation, collection: Option<Collection>, skip: u32, times: u32) {
        self.faults.lock().await.push(Fault {
            op,
            collection,
            skip,
            remaining: times,
        });
    }

    /// Disarm every pending fault.
    pub async fn clear_faults(&self) {
        self.faults.lock().await.clear();
    }

    /// Queue a write that lands between the read and the commit of the next
    /// transaction on the same document, as a concurrent writer would.
    pub async fn interleave_write(&self, collection: Collection, id: &str, fields: Fields) {
        self.interleaved.lock().await.push(InterleavedWrite {
            collection,
            id: id.to_string(),
            fields,
        });
    }

    /// Transactions that had to retry because a concurrent write won.
    #[must_use]
    pub fn transaction_retries(&self) -> u64 {
        self.transaction_retries.load(Ordering::Relaxed)
    }

    pub(crate) async fn export(&self) -> BTreeMap<Collection, BTreeMap<String, Fields>> {
        let guard = self.collections.lock().await;
        guard
            .iter()
            .map(|(collection, docs)| {
                let docs = docs
                    .iter()
                    .map(|(id, doc)| (id.clone(), doc.fields.clone()))
                    .collect();
                (*collection, docs)
            })
            .collect()
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Consume a matching fault, if one is armed for this call.
    async fn take_fault(&self, op: Operation, collection: Collection) -> bool {
        let mut faults = self.faults.lock().await;
        let Some(idx) = faults
            .iter()
            .position(|f| f.op == op && f.collection.is_none_or(|c| c == collection))
        else {
            return false;
        };
        let fault = &mut faults[idx];
        if fault.skip > 0 {
            fault.skip -= 1;
            return false;
        }
        fault.remaining = fault.remaining.saturating_sub(1);
        if fault.remaining == 0 {
            faults.remove(idx);
        }
        true
    }

    async fn check_fault(&self, op: Operation, collection: Collection) -> Result<(), StoreError> {
        if self.take_fault(op, collection).await {
            tracing::debug!(%op, %collection, "memory store: injected fault");
            return Err(StoreError::Unavailable(format!(
                "injected {op} failure on {collection}"
            )));
        }
        Ok(())
    }

    /// Land at most one queued concurrent write on `collection/id`.
    async fn apply_interleaved(&self, collection: Collection, id: &str) {
        let pending = {
            let mut queue = self.interleaved.lock().await;
            queue
                .iter()
                .position(|w| w.collection == collection && w.id == id)
                .map(|idx| queue.remove(idx))
        };
        let Some(write) = pending else {
            return;
        };
        let mut guard = self.collections.lock().await;
        if let Some(doc) = guard.get_mut(&write.collection).and_then(|c| c.get_mut(&write.id)) {
            merge(&mut doc.fields, write.fields);
            doc.version += 1;
        }
    }
}

fn merge(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        if key != fields::ID {
            target.insert(key, value);
        }
    }
}

pub(crate) fn stored(docs: BTreeMap<String, Fields>) -> BTreeMap<String, StoredDoc> {
    docs.into_iter()
        .map(|(id, mut fields)| {
            fields.remove(fields::ID);
            (id, StoredDoc { fields, version: 0 })
        })
        .collect()
}

fn write_doc(collections: &mut Collections, collection: Collection, id: &str, mut fields: Fields) {
    fields.remove(fields::ID);
    let docs = collections.entry(collection).or_default();
    match docs.get_mut(id) {
        Some(doc) => {
            doc.fields = fields;
            doc.version += 1;
        }
        None => {
            docs.insert(id.to_string(), StoredDoc { fields, version: 0 });
        }
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.pause().await;
        self.check_fault(Operation::Query, query.collection).await?;
        let guard = self.collections.lock().await;
        let docs = guard
            .get(&query.collection)
            .into_iter()
            .flat_map(|docs| docs.iter())
            .map(|(id, doc)| Document::new(id.clone(), doc.fields.clone()));
        Ok(query.apply(docs))
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        self.pause().await;
        self.check_fault(Operation::Get, collection).await?;
        let guard = self.collections.lock().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|doc| Document::new(id, doc.fields.clone())))
    }

    async fn set(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.pause().await;
        self.check_fault(Operation::Set, collection).await?;
        let mut guard = self.collections.lock().await;
        write_doc(&mut guard, collection, id, fields);
        Ok(())
    }

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.pause().await;
        self.check_fault(Operation::Update, collection).await?;
        let mut guard = self.collections.lock().await;
        let doc = guard
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        merge(&mut doc.fields, fields);
        doc.version += 1;
        Ok(())
    }

    async fn transact(
        &self,
        collection: Collection,
        id: &str,
        mutation: Mutation<'_>,
    ) -> Result<Document, StoreError> {
        self.pause().await;
        self.check_fault(Operation::Transact, collection).await?;

        for attempt in 1..=self.max_attempts {
            let (current, version) = {
                let guard = self.collections.lock().await;
                let doc = guard
                    .get(&collection)
                    .and_then(|docs| docs.get(id))
                    .ok_or_else(|| StoreError::not_found(collection, id))?;
                (Document::new(id, doc.fields.clone()), doc.version)
            };

            let patch = mutation(&current)?;
            self.apply_interleaved(collection, id).await;

            let mut guard = self.collections.lock().await;
            let doc = guard
                .get_mut(&collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            if doc.version == version {
                merge(&mut doc.fields, patch);
                doc.version += 1;
                return Ok(Document::new(id, doc.fields.clone()));
            }
            drop(guard);

            self.transaction_retries.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(%collection, id, attempt, "memory store: transaction conflict, retrying");
            tokio::task::yield_now().await;
        }

        Err(StoreError::Contention {
            collection,
            id: id.to_string(),
            attempts: self.max_attempts,
        })
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.pause().await;
        let collection = batch
            .updates()
            .first()
            .map_or(Collection::Projects, |u| u.collection);
        let fail_midway = self.take_fault(Operation::Commit, collection).await;
        let total = batch.len();

        let mut guard = self.collections.lock().await;
        let mut staged: BTreeMap<(Collection, String), Fields> = BTreeMap::new();
        for (idx, update) in batch.into_updates().into_iter().enumerate() {
            if fail_midway && idx == total / 2 {
                return Err(StoreError::Aborted(format!(
                    "injected failure after staging {idx} of {total} updates"
                )));
            }
            let key = (update.collection, update.id);
            let base = match staged.remove(&key) {
                Some(fields) => fields,
                None => guard
                    .get(&key.0)
                    .and_then(|docs| docs.get(&key.1))
                    .map(|doc| doc.fields.clone())
                    .ok_or_else(|| {
                        StoreError::Aborted(format!("{} not found: {}", key.0.entity_name(), key.1))
                    })?,
            };
            let mut merged = base;
            merge(&mut merged, update.fields);
            staged.insert(key, merged);
        }
        if fail_midway {
            return Err(StoreError::Aborted("injected failure on empty batch".into()));
        }

        for ((collection, id), fields) in staged {
            if let Some(doc) = guard.get_mut(&collection).and_then(|docs| docs.get_mut(&id)) {
                doc.fields = fields;
                doc.version += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fields_from;
    use serde_json::json;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .seed(
                Collection::Supervisors,
                "sup-a",
                fields_from([("name", json!("A")), ("currentStudents", json!(1))]),
            )
            .await;
        store
    }

    #[tokio::test]
    async fn update_missing_document_is_not_found() {
        let store = seeded().await;
        let err = store
            .update(Collection::Supervisors, "nope", fields_from([("x", json!(1))]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = seeded().await;
        store
            .update(Collection::Supervisors, "sup-a", fields_from([("active", json!(true))]))
            .await
            .unwrap();
        let doc = store.get(Collection::Supervisors, "sup-a").await.unwrap().unwrap();
        assert_eq!(doc.get_str("name"), Some("A"));
        assert_eq!(doc.get("active"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn set_replaces_fields_and_strips_id() {
        let store = seeded().await;
        store
            .set(
                Collection::Supervisors,
                "sup-a",
                fields_from([("id", json!("bogus")), ("name", json!("B"))]),
            )
            .await
            .unwrap();
        let doc = store.get(Collection::Supervisors, "sup-a").await.unwrap().unwrap();
        assert_eq!(doc.get("currentStudents"), None);
        assert_eq!(doc.get("id"), None);
        assert_eq!(doc.get_str("name"), Some("B"));
    }

    #[tokio::test]
    async fn fail_after_lets_earlier_calls_through() {
        let store = seeded().await;
        store.fail_after(Operation::Get, 1).await;
        assert!(store.get(Collection::Supervisors, "sup-a").await.is_ok());
        assert!(store.get(Collection::Supervisors, "sup-a").await.is_err());
        assert!(store.get(Collection::Supervisors, "sup-a").await.is_ok());
    }

    #[tokio::test]
    async fn collection_scoped_fault_ignores_other_collections() {
        let store = seeded().await;
        store.fail_next_in(Operation::Get, Collection::Users).await;
        assert!(store.get(Collection::Supervisors, "sup-a").await.is_ok());
        assert!(store.get(Collection::Users, "u").await.is_err());
    }

    fn bump(doc: &Document) -> Result<Fields, StoreError> {
        let n = doc.get_u64("currentStudents").unwrap_or(0);
        Ok(fields_from([("currentStudents", json!(n + 1))]))
    }

    #[tokio::test]
    async fn interleaved_write_forces_one_retry() {
        let store = seeded().await;
        store
            .interleave_write(
                Collection::Supervisors,
                "sup-a",
                fields_from([("currentStudents", json!(10))]),
            )
            .await;

        let doc = store.transact(Collection::Supervisors, "sup-a", &bump).await.unwrap();

        // The retry re-read the concurrent writer's value.
        assert_eq!(doc.get_u64("currentStudents"), Some(11));
        assert_eq!(store.transaction_retries(), 1);
    }

    #[tokio::test]
    async fn transaction_gives_up_after_max_attempts() {
        let store = seeded().await.with_transaction_attempts(2);
        for n in 0..2 {
            store
                .interleave_write(
                    Collection::Supervisors,
                    "sup-a",
                    fields_from([("currentStudents", json!(100 + n))]),
                )
                .await;
        }

        let err = store
            .transact(Collection::Supervisors, "sup-a", &bump)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Contention { attempts: 2, .. }));
        assert!(err.is_retryable());

        let doc = store.get(Collection::Supervisors, "sup-a").await.unwrap().unwrap();
        assert_eq!(doc.get_u64("currentStudents"), Some(101));
    }

    #[tokio::test]
    async fn transaction_on_missing_document_is_not_found() {
        let store = seeded().await;
        let err = store
            .transact(Collection::Supervisors, "ghost", &bump)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
