//! Documents as stored, and conversion to and from typed records.

use fyp_core::enums::Collection;
use fyp_core::fields;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// The field map of one document. Never contains the `id` key.
pub type Fields = Map<String, Value>;

/// A document read from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Read a string field. Non-string values read as `None`.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Read a non-negative integer field. Negative or non-integer values read as `None`.
    #[must_use]
    pub fn get_u64(&self, field: &str) -> Option<u64> {
        self.fields.get(field).and_then(Value::as_u64)
    }

    /// Deserialize into a typed record, injecting the document id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Decode` if the fields do not match `T`.
    pub fn decode<T: DeserializeOwned>(&self, collection: Collection) -> Result<T, StoreError> {
        let mut map = self.fields.clone();
        map.insert(fields::ID.to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(map)).map_err(|e| StoreError::Decode {
            collection,
            id: self.id.clone(),
            reason: e.to_string(),
        })
    }
}

/// Serialize a typed record into stored fields, dropping its `id`.
///
/// # Errors
///
/// Returns `StoreError::Decode` if the record does not serialize to an object.
pub fn fields_of<T: Serialize>(collection: Collection, id: &str, record: &T) -> Result<Fields, StoreError> {
    let decode_err = |reason: String| StoreError::Decode {
        collection,
        id: id.to_string(),
        reason,
    };
    match serde_json::to_value(record).map_err(|e| decode_err(e.to_string()))? {
        Value::Object(mut map) => {
            map.remove(fields::ID);
            Ok(map)
        }
        other => Err(decode_err(format!("expected an object, got {other}"))),
    }
}

/// Build a field map from `(name, value)` pairs.
#[must_use]
pub fn fields_from<I, K>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
