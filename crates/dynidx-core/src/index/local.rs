use crate::{
    HASH_VALUE_SEPARATOR, INDEX_TABLE_HASH_KEY, INDEX_TABLE_RANGE_KEY,
    config::IndexConfig,
    error::{IndexError, InternalError},
    index::{IndexOptions, IndexValues},
    inflect::singularize,
    model::{AttributeName, EntityModel, IndexIdentity, IntoAttributeNames},
    obs::{IndexKind, MetricsEvent, SkipReason, sink},
    source::{AttributeSource, ValueSelection},
    store::{IndexRow, ItemKey, KeyKind, KeySpec, RangeKey, TableSpec, TableStore},
    value::Value,
};
use std::sync::Arc;
use tracing::{debug, info};

///
/// LocalIndex
///
/// Separate physical table mapping indexed attribute values to the primary
/// ids of every record holding them. Maintained explicitly on save and
/// delete; each call is one read and at most one write against the store.
///

#[derive(Clone, Debug)]
pub struct LocalIndex {
    entity: Arc<EntityModel>,
    hash_keys: Vec<AttributeName>,
    range_key: Option<AttributeName>,
    identity: IndexIdentity,
    table_name: String,
    read_capacity: u64,
    write_capacity: u64,
}

impl LocalIndex {
    /// Declare a local index over `names` (and `options.range_key`).
    ///
    /// The hash attributes are the canonical identity minus the range key,
    /// so `[name, email]` and `[email, name]` build the same index.
    pub fn new(
        entity: Arc<EntityModel>,
        names: impl IntoAttributeNames,
        options: &IndexOptions,
        config: &IndexConfig,
    ) -> Result<Self, IndexError> {
        let range_key = options.range_key.clone();
        let identity = IndexIdentity::canonical([
            names.into_attribute_names(),
            range_key.iter().cloned().collect(),
        ]);

        if let Some(field) = identity
            .iter()
            .find(|key| !entity.has_attribute(key.as_str()))
        {
            return Err(IndexError::InvalidField {
                entity: entity.name().to_string(),
                field: field.to_string(),
            });
        }

        let hash_keys: Vec<_> = identity
            .iter()
            .filter(|key| Some(*key) != range_key.as_ref())
            .cloned()
            .collect();
        if hash_keys.is_empty() {
            return Err(IndexError::MissingHashKey {
                entity: entity.name().to_string(),
            });
        }

        let table_name = format!(
            "{}_index_{}_{}",
            entity.namespace(),
            singularize(entity.unqualified_table_name()),
            identity.pluralized_name()
        );

        Ok(Self {
            entity,
            hash_keys,
            range_key,
            identity,
            table_name,
            read_capacity: options.resolved_read_capacity(config),
            write_capacity: options.resolved_write_capacity(config),
        })
    }

    #[must_use]
    pub const fn entity(&self) -> &Arc<EntityModel> {
        &self.entity
    }

    #[must_use]
    pub fn hash_keys(&self) -> &[AttributeName] {
        &self.hash_keys
    }

    #[must_use]
    pub const fn range_key(&self) -> Option<&AttributeName> {
        self.range_key.as_ref()
    }

    #[must_use]
    pub const fn identity(&self) -> &IndexIdentity {
        &self.identity
    }

    /// Physical table holding this index's rows.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Creation request for the physical table: `id` hash key and, when a
    /// range attribute is configured, a numeric `range` key.
    #[must_use]
    pub fn table_spec(&self) -> TableSpec {
        TableSpec {
            table_name: self.table_name.clone(),
            hash_key: KeySpec::new(INDEX_TABLE_HASH_KEY, KeyKind::String),
            range_key: self
                .range_key
                .as_ref()
                .map(|_| KeySpec::new(INDEX_TABLE_RANGE_KEY, KeyKind::Number)),
            read_capacity: self.read_capacity,
            write_capacity: self.write_capacity,
            global_secondary_indexes: Vec::new(),
        }
    }

    /// Create the physical table if it does not exist.
    /// Returns whether a table was created.
    pub fn ensure_table<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<bool, InternalError> {
        let created = if store.table_exists(&self.table_name)? {
            false
        } else {
            store.create_table(&self.table_spec())?;
            info!(
                table = %self.table_name,
                entity = self.entity.name(),
                "created index table"
            );
            true
        };

        sink::record(MetricsEvent::TableEnsured {
            table: &self.table_name,
            created,
        });

        Ok(created)
    }

    /// Hash and range values of a record or plain mapping.
    ///
    /// The hash value is the text form of every hash attribute joined with
    /// `.`; it is absent when any hash attribute is blank.
    pub fn values(&self, source: &impl AttributeSource, selection: ValueSelection) -> IndexValues {
        let hash_value = self
            .hash_keys
            .iter()
            .map(|key| {
                source
                    .select_value(key, selection)
                    .filter(|value| !value.is_blank())
                    .and_then(Value::to_key_text)
            })
            .collect::<Option<Vec<_>>>()
            .map(|parts| Value::Text(parts.join(HASH_VALUE_SEPARATOR)));

        IndexValues {
            hash_value,
            range_value: self
                .range_key
                .as_ref()
                .and_then(|key| source.select_value(key, selection))
                .cloned(),
        }
    }

    /// Add the record's id to the row for its current values.
    ///
    /// Records with a blank hash value (or a blank configured range value)
    /// are skipped. Saving the same state twice leaves the same row.
    pub fn save<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        record: &impl AttributeSource,
    ) -> Result<(), InternalError> {
        let Some(key) = self.item_key(&self.values(record, ValueSelection::Current))? else {
            self.skip(SkipReason::BlankKey);
            return Ok(());
        };
        let id = self.record_id(record)?;

        let mut row = store
            .get_item(&self.table_name, &key)?
            .unwrap_or_else(|| IndexRow::new(key));
        row.ids.insert(id);
        debug!(table = %self.table_name, hash = %row.hash, ids = row.ids.len(), "index write");
        store.put_item(&self.table_name, row)?;

        sink::record(MetricsEvent::IndexWrite {
            table: &self.table_name,
        });

        Ok(())
    }

    /// Remove the record's id from the row for its values.
    ///
    /// With [`ValueSelection::Prior`] the values before any pending change
    /// are used, which finds the entry written by the last save. A row left
    /// with no ids is deleted. A missing row or id is not an error.
    pub fn delete<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        record: &impl AttributeSource,
        selection: ValueSelection,
    ) -> Result<(), InternalError> {
        let Some(key) = self.item_key(&self.values(record, selection))? else {
            self.skip(SkipReason::BlankKey);
            return Ok(());
        };
        let id = self.record_id(record)?;

        let Some(mut row) = store.get_item(&self.table_name, &key)? else {
            self.skip(SkipReason::NotIndexed);
            return Ok(());
        };
        if !row.ids.remove(&id) {
            self.skip(SkipReason::NotIndexed);
            return Ok(());
        }

        let row_deleted = row.ids.is_empty();
        debug!(table = %self.table_name, hash = %key.hash, row_deleted, "index remove");
        if row_deleted {
            store.delete_item(&self.table_name, &key)?;
        } else {
            store.put_item(&self.table_name, row)?;
        }

        sink::record(MetricsEvent::IndexRemove {
            table: &self.table_name,
            row_deleted,
        });

        Ok(())
    }

    /// Move the record's id from the row for its prior values to the row
    /// for its current values. When no indexed attribute changed this is a
    /// plain save.
    pub fn update<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        record: &impl AttributeSource,
    ) -> Result<(), InternalError> {
        let prior = self.values(record, ValueSelection::Prior);
        let current = self.values(record, ValueSelection::Current);

        if prior != current {
            self.delete(store, record, ValueSelection::Prior)?;
        }

        self.save(store, record)
    }

    // Row key for derived values; `None` when the record cannot be indexed.
    fn item_key(&self, values: &IndexValues) -> Result<Option<ItemKey>, IndexError> {
        let Some(hash) = values.hash_value.as_ref().and_then(Value::to_key_text) else {
            return Ok(None);
        };

        let range = match (&self.range_key, &values.range_value) {
            (None, _) => None,
            (Some(_), None) => return Ok(None),
            (Some(_), Some(value)) if value.is_blank() => return Ok(None),
            (Some(field), Some(value)) => Some(RangeKey::from_value(value).ok_or_else(|| {
                IndexError::NonNumericRange {
                    table: self.table_name.clone(),
                    field: field.to_string(),
                }
            })?),
        };

        Ok(Some(ItemKey::new(hash, range)))
    }

    fn record_id(&self, record: &impl AttributeSource) -> Result<String, IndexError> {
        let field = self.entity.primary_key();

        record
            .current_value(field)
            .filter(|value| !value.is_blank())
            .and_then(Value::to_key_text)
            .ok_or_else(|| IndexError::MissingPrimaryKey {
                entity: self.entity.name().to_string(),
                field: field.to_string(),
            })
    }

    fn skip(&self, reason: SkipReason) {
        debug!(table = %self.table_name, ?reason, "index maintenance skipped");
        sink::record(MetricsEvent::IndexSkip {
            table: &self.table_name,
            reason,
        });
    }

    pub(crate) fn record_declared(&self) {
        debug!(
            entity = self.entity.name(),
            identity = %self.identity,
            table = %self.table_name,
            "declared local index"
        );
        sink::record(MetricsEvent::IndexDeclared {
            entity: self.entity.name(),
            kind: IndexKind::Local,
        });
    }
}
