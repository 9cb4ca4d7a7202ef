use crate::{
    config::IndexConfig,
    error::IndexError,
    index::{
        GlobalIndexDescriptor, IndexOptions, IndexValues, KeySchemaElement, KeyType, Projection,
        ProvisionedThroughput,
    },
    model::{AttributeName, EntityModel, IndexIdentity},
    source::{AttributeSource, ValueSelection},
};
use std::sync::Arc;

///
/// GlobalIndex
///
/// Native composite (hash + optional range) index on the entity's own
/// table. Read-only: it computes what should be provisioned or looked up,
/// and never writes to the store.
///

#[derive(Clone, Debug)]
pub struct GlobalIndex {
    entity: Arc<EntityModel>,
    hash_key: AttributeName,
    range_key: Option<AttributeName>,
    identity: IndexIdentity,
    projection: Vec<AttributeName>,
    read_capacity: u64,
    write_capacity: u64,
}

impl GlobalIndex {
    /// Declare a global index over `hash_key` (and `options.range_key`).
    ///
    /// Every key attribute must be declared on the entity; otherwise this
    /// fails with [`IndexError::InvalidField`] and nothing is built.
    pub fn new(
        entity: Arc<EntityModel>,
        hash_key: impl Into<AttributeName>,
        options: &IndexOptions,
        config: &IndexConfig,
    ) -> Result<Self, IndexError> {
        let hash_key = hash_key.into();
        let range_key = options.range_key.clone();

        if let Some(field) = [Some(&hash_key), range_key.as_ref()]
            .into_iter()
            .flatten()
            .find(|key| !entity.has_attribute(key.as_str()))
        {
            return Err(IndexError::InvalidField {
                entity: entity.name().to_string(),
                field: field.to_string(),
            });
        }

        let identity = IndexIdentity::canonical([Some(&hash_key), range_key.as_ref()]);

        Ok(Self {
            hash_key,
            range_key,
            identity,
            projection: options.projection.clone(),
            read_capacity: options.resolved_read_capacity(config),
            write_capacity: options.resolved_write_capacity(config),
            entity,
        })
    }

    #[must_use]
    pub const fn entity(&self) -> &Arc<EntityModel> {
        &self.entity
    }

    #[must_use]
    pub const fn hash_key(&self) -> &AttributeName {
        &self.hash_key
    }

    #[must_use]
    pub const fn range_key(&self) -> Option<&AttributeName> {
        self.range_key.as_ref()
    }

    #[must_use]
    pub const fn identity(&self) -> &IndexIdentity {
        &self.identity
    }

    /// Projected non-key attributes.
    #[must_use]
    pub fn projection(&self) -> &[AttributeName] {
        &self.projection
    }

    #[must_use]
    pub const fn read_capacity(&self) -> u64 {
        self.read_capacity
    }

    #[must_use]
    pub const fn write_capacity(&self) -> u64 {
        self.write_capacity
    }

    /// The table this index lives on: the entity's own table.
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.entity.table_name()
    }

    /// Key attributes in hash, range order, deduplicated.
    #[must_use]
    pub fn keys(&self) -> Vec<&AttributeName> {
        let mut keys = vec![&self.hash_key];
        if let Some(range) = &self.range_key
            && range != &self.hash_key
        {
            keys.push(range);
        }

        keys
    }

    /// `index_` followed by every identity component pluralized and joined
    /// by `_and_`.
    #[must_use]
    pub fn index_name(&self) -> String {
        format!("index_{}", self.identity.pluralized_name())
    }

    /// Hash and range values of a record or plain mapping.
    ///
    /// With [`ValueSelection::Prior`], changed attributes yield their value
    /// before the change so a stale entry can be located.
    pub fn values(&self, source: &impl AttributeSource, selection: ValueSelection) -> IndexValues {
        IndexValues {
            hash_value: source.select_value(&self.hash_key, selection).cloned(),
            range_value: self
                .range_key
                .as_ref()
                .and_then(|key| source.select_value(key, selection))
                .cloned(),
        }
    }

    /// Structural request for creating this index on the store.
    #[must_use]
    pub fn descriptor(&self) -> GlobalIndexDescriptor {
        let key_schema = self
            .keys()
            .into_iter()
            .enumerate()
            .map(|(i, key)| KeySchemaElement {
                attribute_name: key.to_string(),
                key_type: if i == 0 { KeyType::Hash } else { KeyType::Range },
            })
            .collect();

        let projection = if self.projection.is_empty() {
            Projection::KeysOnly
        } else {
            Projection::Include {
                non_key_attributes: self.projection.iter().map(ToString::to_string).collect(),
            }
        };

        GlobalIndexDescriptor {
            index_name: self.index_name(),
            key_schema,
            projection,
            provisioned_throughput: ProvisionedThroughput {
                read_capacity_units: self.read_capacity,
                write_capacity_units: self.write_capacity,
            },
        }
    }
}
