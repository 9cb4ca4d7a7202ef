//! Attribute sources: where index maintenance reads key values from.
//!
//! A live record and a plain attribute mapping both implement
//! [`AttributeSource`]; only records with dirty-tracking expose changes.

use crate::{model::AttributeName, value::Value};
use derive_more::Deref;
use std::collections::BTreeMap;

///
/// ValueSelection
///
/// Which value of an attribute to read when deriving index keys.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValueSelection {
    /// The attribute's current value.
    #[default]
    Current,

    /// For attributes in the change log, the value before the change
    /// (falling back to the new value when there was none). Attributes that
    /// did not change read their current value. Used to locate a record's
    /// previous index entry.
    Prior,
}

///
/// AttributeSource
///

pub trait AttributeSource {
    /// Current value of an attribute, if set.
    fn current_value(&self, name: &str) -> Option<&Value>;

    /// Pending change for an attribute, if the source tracks changes.
    fn changed_value(&self, _name: &str) -> Option<&AttributeChange> {
        None
    }

    /// Resolve one attribute under a selection rule.
    fn select_value(&self, name: &str, selection: ValueSelection) -> Option<&Value> {
        if selection == ValueSelection::Prior
            && let Some(change) = self.changed_value(name)
        {
            return change.prior();
        }

        self.current_value(name)
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn current_value(&self, name: &str) -> Option<&Value> {
        (**self).current_value(name)
    }

    fn changed_value(&self, name: &str) -> Option<&AttributeChange> {
        (**self).changed_value(name)
    }
}

///
/// AttributeChange
///
/// One entry of a record's change log: the value before and after.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeChange {
    pub old: Option<Value>,
    pub new: Option<Value>,
}

impl AttributeChange {
    #[must_use]
    pub const fn new(old: Option<Value>, new: Option<Value>) -> Self {
        Self { old, new }
    }

    /// Prefer the old value; fall back to the new one when the old value is
    /// absent or null.
    #[must_use]
    pub fn prior(&self) -> Option<&Value> {
        match &self.old {
            Some(old) if !old.is_null() => Some(old),
            _ => self.new.as_ref(),
        }
    }
}

///
/// AttributeMap
///
/// Plain attribute mapping with no change tracking.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct AttributeMap(BTreeMap<AttributeName, Value>);

impl AttributeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<AttributeName>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<AttributeName>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }
}

impl<K: Into<AttributeName>, V: Into<Value>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl AttributeSource for AttributeMap {
    fn current_value(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

///
/// Document
///
/// Reference record with dirty-tracking. Every `set` records the original
/// value until `clear_changes` marks the current state as persisted.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    attributes: AttributeMap,
    changes: BTreeMap<AttributeName, AttributeChange>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document in its persisted state (empty change log).
    #[must_use]
    pub fn persisted(attributes: AttributeMap) -> Self {
        Self {
            attributes,
            changes: BTreeMap::new(),
        }
    }

    /// Assign an attribute, recording the change.
    ///
    /// Setting a value back to its original clears that change entry. An
    /// absent attribute and `Null` are the same value.
    pub fn set(&mut self, name: impl Into<AttributeName>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        let current = self.attributes.0.get(&name).cloned();

        if same_value(current.as_ref(), &value) {
            return;
        }

        let reverted = self
            .changes
            .get(&name)
            .is_some_and(|change| same_value(change.old.as_ref(), &value));

        if reverted {
            self.changes.remove(&name);
        } else {
            self.changes
                .entry(name.clone())
                .and_modify(|change| change.new = Some(value.clone()))
                .or_insert_with(|| AttributeChange::new(current, Some(value.clone())));
        }

        self.attributes.0.insert(name, value);
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<AttributeName>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.0.get(name)
    }

    #[must_use]
    pub const fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    #[must_use]
    pub const fn changes(&self) -> &BTreeMap<AttributeName, AttributeChange> {
        &self.changes
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Mark the current state as persisted.
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }
}

fn same_value(old: Option<&Value>, new: &Value) -> bool {
    old.map_or_else(|| new.is_null(), |old| old == new)
}

impl AttributeSource for Document {
    fn current_value(&self, name: &str) -> Option<&Value> {
        self.attributes.current_value(name)
    }

    fn changed_value(&self, name: &str) -> Option<&AttributeChange> {
        self.changes.get(name)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prior_prefers_old_value() {
        let change = AttributeChange::new(Some("Alice".into()), Some("Bob".into()));

        assert_eq!(change.prior(), Some(&Value::from("Alice")));
    }

    #[test]
    fn prior_falls_back_to_new_value() {
        let absent = AttributeChange::new(None, Some("Bob".into()));
        let null = AttributeChange::new(Some(Value::Null), Some("Bob".into()));

        assert_eq!(absent.prior(), Some(&Value::from("Bob")));
        assert_eq!(null.prior(), Some(&Value::from("Bob")));
    }

    #[test]
    fn document_tracks_first_old_value() {
        let mut doc = Document::persisted(AttributeMap::new().with("name", "Alice"));
        doc.set("name", "Bob");
        doc.set("name", "Carol");

        let change = doc.changed_value("name").expect("name should be changed");
        assert_eq!(change.old, Some(Value::from("Alice")));
        assert_eq!(change.new, Some(Value::from("Carol")));
        assert_eq!(doc.get("name"), Some(&Value::from("Carol")));
    }

    #[test]
    fn setting_back_to_original_clears_change() {
        let mut doc = Document::persisted(AttributeMap::new().with("name", "Alice"));
        doc.set("name", "Bob");
        doc.set("name", "Alice");

        assert!(!doc.is_changed());
    }

    #[test]
    fn null_on_absent_attribute_records_nothing() {
        let mut doc = Document::persisted(AttributeMap::new().with("name", "Alice"));
        doc.set("email", Value::Null);

        assert!(!doc.is_changed());
    }

    #[test]
    fn clearing_a_new_attribute_to_null_reverts_it() {
        let mut doc = Document::persisted(AttributeMap::new());
        doc.set("email", "a@example.com");
        doc.set("email", Value::Null);

        assert!(!doc.is_changed());
    }

    #[test]
    fn setting_same_value_records_nothing() {
        let mut doc = Document::persisted(AttributeMap::new().with("name", "Alice"));
        doc.set("name", "Alice");

        assert!(!doc.is_changed());
    }

    #[test]
    fn prior_selection_reads_unchanged_attributes_directly() {
        let mut doc = Document::persisted(
            AttributeMap::new()
                .with("name", "Alice")
                .with("created_at", Value::Timestamp(10)),
        );
        doc.set("name", "Bob");

        assert_eq!(
            doc.select_value("name", ValueSelection::Prior),
            Some(&Value::from("Alice"))
        );
        assert_eq!(
            doc.select_value("created_at", ValueSelection::Prior),
            Some(&Value::Timestamp(10))
        );
        assert_eq!(
            doc.select_value("name", ValueSelection::Current),
            Some(&Value::from("Bob"))
        );
    }

    #[test]
    fn plain_map_has_no_changes() {
        let map: AttributeMap = [("name", "Alice")].into_iter().collect();

        assert!(map.changed_value("name").is_none());
        assert_eq!(
            map.select_value("name", ValueSelection::Prior),
            Some(&Value::from("Alice"))
        );
    }
}
