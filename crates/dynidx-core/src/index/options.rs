use crate::{
    config::IndexConfig,
    model::{AttributeName, IntoAttributeNames},
};

///
/// IndexOptions
///
/// Declaration-time options shared by local and global indexes.
/// Local indexes ignore `projection`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IndexOptions {
    pub range_key: Option<AttributeName>,
    /// Non-key attributes copied into a global index's read path.
    pub projection: Vec<AttributeName>,
    pub read_capacity: Option<u64>,
    pub write_capacity: Option<u64>,
}

impl IndexOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn range_key(mut self, name: impl Into<AttributeName>) -> Self {
        self.range_key = Some(name.into());
        self
    }

    #[must_use]
    pub fn projection(mut self, names: impl IntoAttributeNames) -> Self {
        self.projection = names.into_attribute_names();
        self
    }

    #[must_use]
    pub const fn read_capacity(mut self, units: u64) -> Self {
        self.read_capacity = Some(units);
        self
    }

    #[must_use]
    pub const fn write_capacity(mut self, units: u64) -> Self {
        self.write_capacity = Some(units);
        self
    }

    /// Read capacity override, or the configured default.
    pub(crate) fn resolved_read_capacity(&self, config: &IndexConfig) -> u64 {
        self.read_capacity.unwrap_or(config.read_capacity)
    }

    /// Write capacity override, or the configured default.
    pub(crate) fn resolved_write_capacity(&self, config: &IndexConfig) -> u64 {
        self.write_capacity.unwrap_or(config.write_capacity)
    }
}
