//! Module: identity
//! Responsibility: canonical, order-independent naming of an index.
//!
//! Invariants:
//! - Components are deduplicated and sorted by their string form.
//! - Declaration order never changes the identity, so `[b, a]` and `[a, b]`
//!   resolve to the same registry slot.

use crate::{
    inflect::pluralize,
    model::{AttributeName, IntoAttributeNames},
};
use derive_more::Deref;
use std::fmt::{self, Display};

///
/// IndexIdentity
///

#[derive(Clone, Debug, Default, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IndexIdentity(Vec<AttributeName>);

impl IndexIdentity {
    /// Flatten, drop absent entries, deduplicate, and sort.
    /// Empty or all-absent input yields an empty identity.
    #[must_use]
    pub fn canonical(names: impl IntoAttributeNames) -> Self {
        let mut names = names.into_attribute_names();
        names.sort();
        names.dedup();

        Self(names)
    }

    #[must_use]
    pub fn components(&self) -> &[AttributeName] {
        &self.0
    }

    /// Every component pluralized and joined by `_and_`, e.g.
    /// `[created_at, name]` gives `created_ats_and_names`.
    #[must_use]
    pub fn pluralized_name(&self) -> String {
        self.0
            .iter()
            .map(|name| pluralize(name))
            .collect::<Vec<_>>()
            .join("_and_")
    }
}

impl Display for IndexIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .0
            .iter()
            .map(AttributeName::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "[{names}]")
    }
}

impl IntoAttributeNames for &IndexIdentity {
    fn into_attribute_names(self) -> Vec<AttributeName> {
        self.0.clone()
    }
}

///
/// TESTS
///
