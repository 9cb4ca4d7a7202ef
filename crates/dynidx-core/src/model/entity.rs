use crate::{
    config::IndexConfig,
    inflect::table_name_for,
    model::{AttributeName, IntoAttributeNames},
};
use std::collections::BTreeSet;

/// Attributes every entity declares without being asked.
pub const DEFAULT_ATTRIBUTES: [&str; 3] = ["id", "created_at", "updated_at"];

///
/// EntityModel
/// Runtime model for one owning record type: its table, primary key, and
/// declared attribute set.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    /// Type name used in diagnostics.
    name: String,
    /// Namespace shared by every table of this process.
    namespace: String,
    /// Physical table holding the records themselves.
    table_name: String,
    /// Primary key attribute (always declared).
    primary_key: AttributeName,
    /// Declared attributes, including the defaults.
    attributes: BTreeSet<AttributeName>,
}

impl EntityModel {
    /// Build an entity whose table name is derived from the type name and
    /// the configured namespace, e.g. `User` in namespace `app` lives in
    /// `app_users`.
    #[must_use]
    pub fn new(name: impl Into<String>, config: &IndexConfig) -> Self {
        let name = name.into();
        let namespace = config.namespace.clone();
        let table_name = table_name_for(&namespace, &name);

        Self {
            name,
            namespace,
            table_name,
            primary_key: AttributeName::from(DEFAULT_ATTRIBUTES[0]),
            attributes: DEFAULT_ATTRIBUTES
                .iter()
                .copied()
                .map(AttributeName::from)
                .collect(),
        }
    }

    /// Declare one or more attributes.
    #[must_use]
    pub fn with_attributes(mut self, names: impl IntoAttributeNames) -> Self {
        self.attributes.extend(names.into_attribute_names());
        self
    }

    /// Override the table name; the namespace prefix is still applied.
    #[must_use]
    pub fn with_table_name(mut self, table: &str) -> Self {
        self.table_name = if self.namespace.is_empty() {
            table.to_string()
        } else {
            format!("{}_{table}", self.namespace)
        };
        self
    }

    /// Use a different primary key attribute. The attribute is declared.
    #[must_use]
    pub fn with_primary_key(mut self, name: impl Into<AttributeName>) -> Self {
        let name = name.into();
        self.attributes.insert(name.clone());
        self.primary_key = name;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Table name with the namespace prefix removed.
    #[must_use]
    pub fn unqualified_table_name(&self) -> &str {
        self.table_name
            .strip_prefix(&self.namespace)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(self.table_name.as_str())
    }

    #[must_use]
    pub const fn primary_key(&self) -> &AttributeName {
        &self.primary_key
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeSet<AttributeName> {
        &self.attributes
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IndexConfig {
        IndexConfig {
            namespace: "app".to_string(),
            ..IndexConfig::default()
        }
    }

    #[test]
    fn derives_namespaced_plural_table_name() {
        let entity = EntityModel::new("User", &config());

        assert_eq!(entity.table_name(), "app_users");
        assert_eq!(entity.unqualified_table_name(), "users");
        assert_eq!(entity.primary_key(), &AttributeName::from("id"));
    }

    #[test]
    fn declares_default_and_explicit_attributes() {
        let entity = EntityModel::new("User", &config()).with_attributes(["name", "email"]);

        for name in ["id", "created_at", "updated_at", "name", "email"] {
            assert!(entity.has_attribute(name), "{name} should be declared");
        }
        assert!(!entity.has_attribute("password"));
    }

    #[test]
    fn table_override_keeps_namespace() {
        let entity = EntityModel::new("User", &config()).with_table_name("people");

        assert_eq!(entity.table_name(), "app_people");
        assert_eq!(entity.unqualified_table_name(), "people");
    }

    #[test]
    fn custom_primary_key_is_declared() {
        let entity = EntityModel::new("Tweet", &config()).with_primary_key("tweet_id");

        assert_eq!(entity.primary_key().as_str(), "tweet_id");
        assert!(entity.has_attribute("tweet_id"));
    }
}
