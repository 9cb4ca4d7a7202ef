//! English inflection for derived table and index names.
//!
//! Only the final `_`-separated word of a snake_case name is inflected, so
//! `created_at` pluralizes to `created_ats` and `user_profiles` singularizes
//! to `user_profile`.

use convert_case::{Case, Casing};

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
    ("quiz", "quizzes"),
];

// Words ending in `s` whose plural only adds `es`.
const S_ENDED: &[&str] = &["alias", "status", "bus"];

/// Pluralize the last word of a snake_case name.
#[must_use]
pub fn pluralize(word: &str) -> String {
    inflect_last_word(word, pluralize_word)
}

/// Singularize the last word of a snake_case name.
#[must_use]
pub fn singularize(word: &str) -> String {
    inflect_last_word(word, singularize_word)
}

/// Default table name for an entity type: namespace, then the pluralized
/// snake_case form of the last path segment of the type name.
#[must_use]
pub fn table_name_for(namespace: &str, type_name: &str) -> String {
    let base = type_name.rsplit("::").next().unwrap_or(type_name);
    let plural = pluralize(&base.to_case(Case::Snake));

    if namespace.is_empty() {
        plural
    } else {
        format!("{namespace}_{plural}")
    }
}

fn inflect_last_word(word: &str, f: fn(&str) -> String) -> String {
    match word.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => format!("{head}_{}", f(last)),
        _ => f(word),
    }
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(s, _)| *s == lower) {
        return (*plural).to_string();
    }
    if IRREGULAR.iter().any(|(_, p)| *p == lower) {
        return word.to_string();
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y')
        && ends_with_consonant(stem)
    {
        return format!("{stem}ies");
    }

    format!("{word}s")
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, p)| *p == lower) {
        return (*singular).to_string();
    }

    for stem in S_ENDED {
        if lower.ends_with(stem) {
            return word.to_string();
        }
        if lower.ends_with(&format!("{stem}es")) {
            return word[..word.len() - 2].to_string();
        }
    }
    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if lower.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if lower.ends_with("ss") {
        return word.to_string();
    }

    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn ends_with_consonant(stem: &str) -> bool {
    stem.chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphabetic() && !"aeiouAEIOU".contains(c))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_regular_words() {
        assert_eq!(pluralize("name"), "names");
        assert_eq!(pluralize("created_at"), "created_ats");
        assert_eq!(pluralize("email"), "emails");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn pluralize_respects_irregular_and_uncountable_words() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("people"), "people");
        assert_eq!(pluralize("information"), "information");
        assert_eq!(pluralize("user_info_series"), "user_info_series");
    }

    #[test]
    fn singularizes_regular_words() {
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("user_profiles"), "user_profile");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("user"), "user");
    }

    #[test]
    fn singularizes_words_ending_in_s() {
        for (plural, singular) in [
            ("statuses", "status"),
            ("buses", "bus"),
            ("aliases", "alias"),
            ("omnibuses", "omnibus"),
            ("order_statuses", "order_status"),
            ("quizzes", "quiz"),
        ] {
            assert_eq!(singularize(plural), singular);
            assert_eq!(pluralize(singular), plural);
        }
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("houses"), "house");
    }

    #[test]
    fn table_name_uses_snake_case_plural() {
        assert_eq!(table_name_for("dynidx", "User"), "dynidx_users");
        assert_eq!(
            table_name_for("dynidx", "app::models::UserProfile"),
            "dynidx_user_profiles"
        );
        assert_eq!(table_name_for("", "Category"), "categories");
    }
}
