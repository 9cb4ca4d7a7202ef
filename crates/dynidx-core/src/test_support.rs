//! Shared fixtures for unit tests.

use crate::{
    config::IndexConfig,
    index::IndexRegistry,
    model::EntityModel,
    source::{AttributeMap, Document},
    store::MemoryStore,
};

pub(crate) const NAMESPACE: &str = "dynidx_test";

pub(crate) fn config() -> IndexConfig {
    IndexConfig {
        namespace: NAMESPACE.to_string(),
        read_capacity: 50,
        write_capacity: 50,
    }
}

/// `User` with name, email, password and age declared.
pub(crate) fn user_model() -> EntityModel {
    EntityModel::new("User", &config()).with_attributes(["name", "email", "password", "age"])
}

pub(crate) fn user_registry() -> IndexRegistry {
    IndexRegistry::new(user_model(), &config())
}

pub(crate) fn store() -> MemoryStore {
    MemoryStore::new()
}

/// Persisted user document with an empty change log.
pub(crate) fn user(id: &str, name: &str) -> Document {
    Document::persisted(AttributeMap::new().with("id", id).with("name", name))
}

/// Persisted user with a numeric age.
pub(crate) fn aged_user(id: &str, name: &str, age: i64) -> Document {
    Document::persisted(
        AttributeMap::new()
            .with("id", id)
            .with("name", name)
            .with("age", age),
    )
}
