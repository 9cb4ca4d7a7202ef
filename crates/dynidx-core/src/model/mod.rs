//! Runtime data model definitions.
//!
//! This module holds the owning-type side of index maintenance: the entity
//! model (table, primary key, declared attributes), attribute names, and the
//! canonical identity that keys every index registry.
//!
//! In general:
//! - `model` defines *what exists* on an entity
//! - `index` defines *what runs* against the store

mod attribute;
mod entity;
mod identity;

pub use attribute::{AttributeName, IntoAttributeNames};
pub use entity::{DEFAULT_ATTRIBUTES, EntityModel};
pub use identity::IndexIdentity;
