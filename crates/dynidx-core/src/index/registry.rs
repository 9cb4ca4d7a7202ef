use crate::{
    config::IndexConfig,
    error::{IndexError, InternalError},
    index::{GlobalIndex, GlobalIndexDescriptor, IndexOptions, LocalIndex},
    model::{AttributeName, EntityModel, IndexIdentity, IntoAttributeNames},
    obs::{IndexKind, MetricsEvent, sink},
    source::{AttributeSource, ValueSelection},
    store::{KeyKind, KeySpec, TableSpec, TableStore},
};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

///
/// IndexRef
/// Result of resolving an index by attribute names.
///

#[derive(Clone, Copy, Debug)]
pub enum IndexRef<'a> {
    Local(&'a LocalIndex),
    Global(&'a GlobalIndex),
}

impl IndexRef<'_> {
    #[must_use]
    pub const fn identity(&self) -> &IndexIdentity {
        match self {
            Self::Local(index) => index.identity(),
            Self::Global(index) => index.identity(),
        }
    }

    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

///
/// IndexRegistry
///
/// Local and global indexes of one entity, each keyed by identity.
///
/// Owned by the entity's definition and built once at startup. Declaring
/// takes `&mut self`, so concurrent declaration needs external
/// synchronization. Save/delete fan-out issues one store write per local
/// index, sequentially, with no atomicity across indexes: a failure part way
/// through leaves earlier indexes updated and later ones stale.
///

#[derive(Clone, Debug)]
pub struct IndexRegistry {
    entity: Arc<EntityModel>,
    config: IndexConfig,
    local: HashMap<IndexIdentity, LocalIndex>,
    global: HashMap<IndexIdentity, GlobalIndex>,
}

impl IndexRegistry {
    #[must_use]
    pub fn new(entity: EntityModel, config: &IndexConfig) -> Self {
        Self {
            entity: Arc::new(entity),
            config: config.clone(),
            local: HashMap::new(),
            global: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn entity(&self) -> &Arc<EntityModel> {
        &self.entity
    }

    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Declare a local index and make sure every local index table exists.
    ///
    /// An index with the same identity and range key replaces the earlier
    /// declaration; a different range key is rejected.
    pub fn declare_index<S: TableStore + ?Sized>(
        &mut self,
        store: &mut S,
        names: impl IntoAttributeNames,
        options: &IndexOptions,
    ) -> Result<&LocalIndex, InternalError> {
        let index = LocalIndex::new(Arc::clone(&self.entity), names, options, &self.config)?;

        // same identity means same table; its key schema cannot change
        if let Some(existing) = self.local.get(index.identity())
            && existing.range_key() != index.range_key()
        {
            return Err(IndexError::RangeKeyConflict {
                table: index.table_name().to_string(),
            }
            .into());
        }
        index.record_declared();

        self.create_indexes(store)?;
        index.ensure_table(store)?;

        let identity = index.identity().clone();
        Ok(self.local.entry(identity).insert_entry(index).into_mut())
    }

    /// Declare a global index. Provisioning is left to table migration,
    /// see [`Self::table_spec`].
    pub fn declare_global_index(
        &mut self,
        hash_key: impl Into<AttributeName>,
        options: &IndexOptions,
    ) -> Result<&GlobalIndex, InternalError> {
        let index = GlobalIndex::new(Arc::clone(&self.entity), hash_key, options, &self.config)?;
        let identity = index.identity().clone();

        debug!(
            entity = self.entity.name(),
            identity = %identity,
            index_name = %index.index_name(),
            "declared global index"
        );
        sink::record(MetricsEvent::IndexDeclared {
            entity: self.entity.name(),
            kind: IndexKind::Global,
        });

        Ok(self.global.entry(identity).insert_entry(index).into_mut())
    }

    /// Ensure the physical table of every local index exists.
    pub fn create_indexes<S: TableStore + ?Sized>(&self, store: &mut S) -> Result<(), InternalError> {
        for index in self.local.values() {
            index.ensure_table(store)?;
        }

        Ok(())
    }

    /// Resolve an index by attribute names in any order: local first, then
    /// global.
    pub fn find_index(&self, names: impl IntoAttributeNames) -> Option<IndexRef<'_>> {
        let identity = IndexIdentity::canonical(names);

        self.local
            .get(&identity)
            .map(IndexRef::Local)
            .or_else(|| self.global.get(&identity).map(IndexRef::Global))
    }

    pub fn find_local_index(&self, names: impl IntoAttributeNames) -> Option<&LocalIndex> {
        self.local.get(&IndexIdentity::canonical(names))
    }

    pub fn find_global_index(&self, names: impl IntoAttributeNames) -> Option<&GlobalIndex> {
        self.global.get(&IndexIdentity::canonical(names))
    }

    pub fn local_indexes(&self) -> impl Iterator<Item = &LocalIndex> {
        self.local.values()
    }

    pub fn global_indexes(&self) -> impl Iterator<Item = &GlobalIndex> {
        self.global.values()
    }

    #[must_use]
    pub fn local_len(&self) -> usize {
        self.local.len()
    }

    #[must_use]
    pub fn global_len(&self) -> usize {
        self.global.len()
    }

    /// Write the record into every local index.
    pub fn save_indexes<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        record: &impl AttributeSource,
    ) -> Result<(), InternalError> {
        for index in self.local.values() {
            index.save(store, record)?;
        }

        Ok(())
    }

    /// Remove the record from every local index, using its current values.
    pub fn delete_indexes<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        record: &impl AttributeSource,
    ) -> Result<(), InternalError> {
        for index in self.local.values() {
            index.delete(store, record, ValueSelection::Current)?;
        }

        Ok(())
    }

    /// Move the record between rows of every local index after an in-place
    /// change. Call before the record's change log is cleared.
    pub fn update_indexes<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        record: &impl AttributeSource,
    ) -> Result<(), InternalError> {
        for index in self.local.values() {
            index.update(store, record)?;
        }

        Ok(())
    }

    /// Descriptors of every global index, ordered by index name.
    #[must_use]
    pub fn global_index_descriptors(&self) -> Vec<GlobalIndexDescriptor> {
        let mut descriptors: Vec<_> = self.global.values().map(GlobalIndex::descriptor).collect();
        descriptors.sort_by(|a, b| a.index_name.cmp(&b.index_name));

        descriptors
    }

    /// Creation request for the entity's own table, including every global
    /// index.
    #[must_use]
    pub fn table_spec(&self) -> TableSpec {
        TableSpec {
            table_name: self.entity.table_name().to_string(),
            hash_key: KeySpec::new(self.entity.primary_key().clone(), KeyKind::String),
            range_key: None,
            read_capacity: self.config.read_capacity,
            write_capacity: self.config.write_capacity,
            global_secondary_indexes: self.global_index_descriptors(),
        }
    }
}
