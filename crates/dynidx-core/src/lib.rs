//! Core runtime for dynidx: entity models, attribute values, index
//! descriptors, the per-entity index registry, and the store boundary.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod index;
pub mod inflect;
pub mod model;
pub mod obs;
pub mod source;
pub mod store;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Separator used when several hash attributes are folded into one hash value.
pub const HASH_VALUE_SEPARATOR: &str = ".";

/// Attribute name used for the hash key of every local index table.
pub const INDEX_TABLE_HASH_KEY: &str = "id";

/// Attribute name used for the range key of every local index table.
pub const INDEX_TABLE_RANGE_KEY: &str = "range";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        index::{GlobalIndex, IndexOptions, IndexRegistry, LocalIndex},
        model::{AttributeName, EntityModel, IndexIdentity},
        source::{AttributeMap, AttributeSource, Document},
        value::Value,
    };
}
