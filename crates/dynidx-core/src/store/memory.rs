use crate::{
    error::StoreError,
    store::{IndexRow, ItemKey, TableSpec, TableStore},
};
use std::collections::BTreeMap;

///
/// MemoryTable
///

#[derive(Clone, Debug)]
pub struct MemoryTable {
    spec: TableSpec,
    rows: BTreeMap<ItemKey, IndexRow>,
}

impl MemoryTable {
    #[must_use]
    pub const fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// Rows in key order.
    pub fn rows(&self) -> impl Iterator<Item = &IndexRow> {
        self.rows.values()
    }

    #[must_use]
    pub fn get(&self, key: &ItemKey) -> Option<&IndexRow> {
        self.rows.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

///
/// MemoryStore
///
/// In-process [`TableStore`] backed by ordered maps.
/// Rejects writes to missing tables and range values on hash-only tables,
/// matching what a remote store would refuse.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, MemoryTable>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&MemoryTable> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of rows in a table; zero when the table does not exist.
    #[must_use]
    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, MemoryTable::len)
    }

    fn table_mut(&mut self, table: &str) -> Result<&mut MemoryTable, StoreError> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }
}

impl TableStore for MemoryStore {
    fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        Ok(self.tables.contains_key(table))
    }

    fn create_table(&mut self, spec: &TableSpec) -> Result<(), StoreError> {
        self.tables
            .entry(spec.table_name.clone())
            .or_insert_with(|| MemoryTable {
                spec: spec.clone(),
                rows: BTreeMap::new(),
            });

        Ok(())
    }

    fn get_item(&self, table: &str, key: &ItemKey) -> Result<Option<IndexRow>, StoreError> {
        let table = self
            .tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        Ok(table.rows.get(key).cloned())
    }

    fn put_item(&mut self, table: &str, row: IndexRow) -> Result<(), StoreError> {
        let entry = self.table_mut(table)?;
        if entry.spec.range_key.is_none() && row.range.is_some() {
            return Err(StoreError::UnexpectedRange {
                table: table.to_string(),
            });
        }

        entry.rows.insert(row.key(), row);

        Ok(())
    }

    fn delete_item(&mut self, table: &str, key: &ItemKey) -> Result<(), StoreError> {
        self.table_mut(table)?.rows.remove(key);

        Ok(())
    }
}
