//! CONFIG_DB access abstraction.
//!
//! The exporter commands only need three capabilities from the
//! configuration store: merge fields into a row, list the rows of a table,
//! and read one row. [`ConfigDb`] names exactly those, so the commands can
//! run against Redis ([`crate::RedisConfigDb`]) or against the in-memory
//! [`MemoryConfigDb`] used in tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::trace;

use crate::error::ExporterCfgResult;
use crate::tables::NULL_FIELD;

/// Key-value tuple representing a field and its value.
pub type FieldValue = (String, String);

/// Collection of field-value pairs for a table entry.
pub type FieldValues = Vec<FieldValue>;

/// Builds a FieldValues collection from key-value pairs.
#[macro_export]
macro_rules! field_values {
    ($($field:expr => $value:expr),* $(,)?) => {
        vec![
            $(($field.to_string(), $value.to_string()),)*
        ]
    };
}

/// Configuration store accessor.
///
/// Implementations give upsert semantics on `mod_entry`: fields not named
/// in the mapping keep their stored values, and the row is created on first
/// write.
#[async_trait]
pub trait ConfigDb: Send + Sync {
    /// Merges `fields` into the row `(table, key)`.
    async fn mod_entry(&self, table: &str, key: &str, fields: &FieldValues)
        -> ExporterCfgResult<()>;

    /// Returns the names of the rows currently defined in `table`.
    async fn get_keys(&self, table: &str) -> ExporterCfgResult<BTreeSet<String>>;

    /// Returns the fields of `(table, key)`, empty if the row is absent.
    async fn get_entry(&self, table: &str, key: &str)
        -> ExporterCfgResult<HashMap<String, String>>;
}

/// Placeholder written for an upsert with no fields, so the row exists.
pub(crate) fn encode_fields(fields: &FieldValues) -> FieldValues {
    if fields.is_empty() {
        vec![(NULL_FIELD.to_string(), NULL_FIELD.to_string())]
    } else {
        fields.clone()
    }
}

/// Hides the placeholder written by [`encode_fields`].
pub(crate) fn decode_fields(mut fields: HashMap<String, String>) -> HashMap<String, String> {
    fields.remove(NULL_FIELD);
    fields
}

type Tables = BTreeMap<String, BTreeMap<String, HashMap<String, String>>>;

/// In-memory configuration store.
///
/// Clones share the same storage, so a test can keep one handle for
/// inspection while the commands write through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigDb {
    tables: Arc<Mutex<Tables>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryConfigDb {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row without counting it as a write
    pub fn with_entry(self, table: &str, key: &str, fields: FieldValues) -> Self {
        self.tables
            .lock()
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), encode_fields(&fields).into_iter().collect());
        self
    }

    /// Fields of a row, `None` if the row does not exist
    pub fn entry(&self, table: &str, key: &str) -> Option<HashMap<String, String>> {
        self.tables
            .lock()
            .get(table)
            .and_then(|rows| rows.get(key))
            .cloned()
            .map(decode_fields)
    }

    /// Remove a row, as another process would
    pub fn remove_entry(&self, table: &str, key: &str) -> bool {
        self.tables
            .lock()
            .get_mut(table)
            .map(|rows| rows.remove(key).is_some())
            .unwrap_or(false)
    }

    /// Number of `mod_entry` calls served so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

#[async_trait]
impl ConfigDb for MemoryConfigDb {
    async fn mod_entry(
        &self,
        table: &str,
        key: &str,
        fields: &FieldValues,
    ) -> ExporterCfgResult<()> {
        trace!(table, key, ?fields, "mod_entry");
        let mut tables = self.tables.lock();
        let row = tables
            .entry(table.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default();
        for (field, value) in encode_fields(fields) {
            row.insert(field, value);
        }
        *self.writes.lock() += 1;
        Ok(())
    }

    async fn get_keys(&self, table: &str) -> ExporterCfgResult<BTreeSet<String>> {
        Ok(self
            .tables
            .lock()
            .get(table)
            .map(|rows| rows.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_entry(
        &self,
        table: &str,
        key: &str,
    ) -> ExporterCfgResult<HashMap<String, String>> {
        Ok(self.entry(table, key).unwrap_or_default())
    }
}
