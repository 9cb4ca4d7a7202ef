//! Store boundary.
//!
//! Index maintenance never owns storage. Every read and write goes through
//! [`TableStore`], which a key-value store client implements. Failures are
//! returned as [`StoreError`] and propagated unchanged; retries belong to the
//! client.

mod memory;
mod range;


use crate::{error::StoreError, index::GlobalIndexDescriptor, model::AttributeName};
use std::collections::BTreeSet;

pub use memory::{MemoryStore, MemoryTable};
pub use range::RangeKey;

///
/// TableStore
///

pub trait TableStore {
    /// Whether a table with this name exists.
    fn table_exists(&self, table: &str) -> Result<bool, StoreError>;

    /// Create a table. Creating a table that already exists is not an error
    /// and leaves the existing table untouched.
    fn create_table(&mut self, spec: &TableSpec) -> Result<(), StoreError>;

    /// Read one row by key.
    fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<IndexRow>, StoreError>;

    /// Write one row, replacing any row with the same key.
    fn put_item(&mut self, table: &str, row: IndexRow) -> Result<(), StoreError>;

    /// Remove one row by key. Removing an absent row succeeds.
    fn delete_item(&mut self, table: &str, key: &ItemKey) -> Result<(), StoreError>;
}

///
/// KeyKind
/// Scalar type of a key attribute.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyKind {
    String,
    Number,
}

///
/// KeySpec
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeySpec {
    pub name: AttributeName,
    pub kind: KeyKind,
}

impl KeySpec {
    #[must_use]
    pub fn new(name: impl Into<AttributeName>, kind: KeyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

///
/// TableSpec
///
/// Everything a store needs to create one table.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    pub table_name: String,
    pub hash_key: KeySpec,
    pub range_key: Option<KeySpec>,
    pub read_capacity: u64,
    pub write_capacity: u64,
    /// Native composite indexes to provision on this table.
    pub global_secondary_indexes: Vec<GlobalIndexDescriptor>,
}

///
/// ItemKey
/// Hash key plus optional range key of one row.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ItemKey {
    pub hash: String,
    pub range: Option<RangeKey>,
}

impl ItemKey {
    #[must_use]
    pub fn new(hash: impl Into<String>, range: Option<RangeKey>) -> Self {
        Self {
            hash: hash.into(),
            range,
        }
    }
}

///
/// IndexRow
///
/// One row of a local index table: the indexed key and the primary ids of
/// every record currently holding that key.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexRow {
    pub hash: String,
    pub range: Option<RangeKey>,
    pub ids: BTreeSet<String>,
}

impl IndexRow {
    #[must_use]
    pub fn new(key: ItemKey) -> Self {
        Self {
            hash: key.hash,
            range: key.range,
            ids: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.hash.clone(), self.range)
    }
}
