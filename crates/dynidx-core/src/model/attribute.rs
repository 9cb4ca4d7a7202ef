use derive_more::{Deref, Display};
use std::borrow::Borrow;

///
/// AttributeName
///
/// Owned attribute-name symbol. Ordering and equality follow the string form.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[deref(forward)]
pub struct AttributeName(String);

impl AttributeName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AttributeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AttributeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for AttributeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for AttributeName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AttributeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

///
/// IntoAttributeNames
///
/// Anything that names one or more attributes: a single name, an optional
/// name, or an arbitrarily nested collection of them. Nesting is flattened
/// and absent entries are dropped.
///

pub trait IntoAttributeNames {
    fn into_attribute_names(self) -> Vec<AttributeName>;
}

impl IntoAttributeNames for AttributeName {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        vec![self]
    }
}

impl IntoAttributeNames for &AttributeName {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        vec![self.clone()]
    }
}

impl IntoAttributeNames for &str {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        vec![AttributeName::from(self)]
    }
}

impl IntoAttributeNames for String {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        vec![AttributeName::from(self)]
    }
}

impl IntoAttributeNames for &String {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        vec![AttributeName::from(self.as_str())]
    }
}

impl<T: IntoAttributeNames> IntoAttributeNames for Option<T> {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        self.map(IntoAttributeNames::into_attribute_names)
            .unwrap_or_default()
    }
}

impl<T: IntoAttributeNames> IntoAttributeNames for Vec<T> {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        self.into_iter()
            .flat_map(IntoAttributeNames::into_attribute_names)
            .collect()
    }
}

impl<T: IntoAttributeNames, const N: usize> IntoAttributeNames for [T; N] {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        self.into_iter()
            .flat_map(IntoAttributeNames::into_attribute_names)
            .collect()
    }
}

impl<T: IntoAttributeNames + Clone> IntoAttributeNames for &[T] {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        self.iter()
            .cloned()
            .flat_map(IntoAttributeNames::into_attribute_names)
            .collect()
    }
}
