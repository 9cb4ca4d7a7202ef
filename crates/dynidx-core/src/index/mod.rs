//! Index descriptors and the per-entity registry that dispatches to them.
//!
//! - [`LocalIndex`]: a separate physical table duplicating the record's
//!   primary id under the indexed attribute values, maintained on every
//!   save and delete.
//! - [`GlobalIndex`]: a native composite index on the entity's own table,
//!   described by a static [`GlobalIndexDescriptor`] and maintained by the
//!   store itself.
//! - [`IndexRegistry`]: both kinds for one entity, keyed by
//!   [`crate::model::IndexIdentity`].

mod descriptor;
mod global;
mod local;
mod options;
mod registry;


pub use descriptor::{
    GlobalIndexDescriptor, KeySchemaElement, KeyType, Projection, ProvisionedThroughput,
};
pub use global::GlobalIndex;
pub use local::LocalIndex;
pub use options::IndexOptions;
pub use registry::{IndexRef, IndexRegistry};

use crate::value::Value;

///
/// IndexValues
///
/// Hash and range values derived from one record at save/delete time.
/// Never persisted on its own.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IndexValues {
    pub hash_value: Option<Value>,
    pub range_value: Option<Value>,
}
