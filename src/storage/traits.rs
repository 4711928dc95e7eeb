//! Storage trait definitions.

use crate::error::Result;
use serde::{Serialize, de::DeserializeOwned};

/// Trait for records that have an ID field.
pub trait HasId {
    /// Get the record's unique identifier.
    fn id(&self) -> &str;
}

/// Storage trait for CRUD operations on records grouped in named collections.
pub trait Storage: Send + Sync {
    /// Create a new record.
    fn create<T: Serialize + HasId>(&self, collection: &str, record: &T) -> Result<()>;

    /// Get a record by ID as raw JSON, without interpreting it.
    fn get_raw(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>>;

    /// Get a record by ID.
    fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        match self.get_raw(collection, id)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Update an existing record.
    fn update<T: Serialize + HasId>(&self, collection: &str, record: &T) -> Result<()>;

    /// Delete a record by ID.
    fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Every record id in a collection, in insertion order.
    fn ids(&self, collection: &str) -> Result<Vec<String>>;

    /// List all records in a collection.
    fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>>;
}
