use std::collections::HashSet;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// A malformed record or collection, caught before it reaches any game view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{collection} record {id}: required field '{field}' is empty")]
    EmptyField {
        collection: &'static str,
        id: i64,
        field: &'static str,
    },

    #[error("{collection}: duplicate record id {id}")]
    DuplicateId { collection: &'static str, id: i64 },
}

/// One structured item within a named content collection.
///
/// The `id` is the sole correlation key between the remote copy and the
/// locally cached copy of a record.
pub trait ContentRecord: Serialize + DeserializeOwned {
    /// Remote table and local cache file name for this record type.
    const COLLECTION: &'static str;

    fn id(&self) -> i64;

    /// Check the record's own fields. Collection-level checks live in
    /// [`validate_collection`].
    fn validate(&self) -> Result<(), SchemaError>;
}

/// Validate every record and reject duplicate ids within the collection.
pub fn validate_collection<T: ContentRecord>(records: &[T]) -> Result<(), SchemaError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.id()) {
            return Err(SchemaError::DuplicateId {
                collection: T::COLLECTION,
                id: record.id(),
            });
        }
    }
    Ok(())
}

/// Helper for model `validate` impls: required text fields must not be
/// empty or whitespace-only.
pub(crate) fn require_text(
    collection: &'static str,
    id: i64,
    field: &'static str,
    value: &str,
) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        Err(SchemaError::EmptyField {
            collection,
            id,
            field,
        })
    } else {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
