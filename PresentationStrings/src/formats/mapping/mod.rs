//! Key mapping file format
//!
//! Binary index generated at build time that assigns every string key a
//! stable integer id. The id is what resolved tables are indexed by, so the
//! same file is shared by every language.
//!
//! Layout (all integers `i32`, native-endian):
//!
//! ```text
//! scalarCount
//! scalarCount x { id, keyLength, key[keyLength], hasArguments }
//! pluralCount
//! pluralCount x { id, keyLength, key[keyLength] }
//! ```

mod reader;
mod writer;

pub use reader::{parse_mapping_bytes, read_mapping};
pub use writer::{mapping_to_bytes, write_mapping};

use indexmap::IndexMap;
use std::collections::BTreeSet;

use crate::format::has_placeholders;
use crate::plural::PluralizationForm;

/// A scalar string key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarKey {
    /// Stable id
    pub id: i32,
    /// String key as it appears in `.strings` resources
    pub key: String,
    /// Whether the template takes positional arguments
    pub has_arguments: bool,
}

/// A pluralized string key (base key, without form suffix)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralKey {
    /// Stable id
    pub id: i32,
    /// Base key; form variants append a canonical suffix
    pub key: String,
}

/// The full id <-> key index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMapping {
    pub scalars: Vec<ScalarKey>,
    pub plurals: Vec<PluralKey>,
}

impl KeyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar key
    pub fn push_scalar(&mut self, id: i32, key: impl Into<String>, has_arguments: bool) {
        self.scalars.push(ScalarKey {
            id,
            key: key.into(),
            has_arguments,
        });
    }

    /// Append a plural key
    pub fn push_plural(&mut self, id: i32, key: impl Into<String>) {
        self.plurals.push(PluralKey { id, key: key.into() });
    }

    /// Number of scalar and plural entries combined
    #[must_use]
    pub fn len(&self) -> usize {
        self.scalars.len() + self.plurals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.plurals.is_empty()
    }

    /// Derive a mapping from a base-language dictionary.
    ///
    /// A key `K` is treated as pluralized when `K_any` exists; all of its
    /// suffixed variants then collapse into a single plural entry `K`.
    /// Everything else becomes a scalar entry. Ids are assigned in sorted
    /// key order, scalars and plurals numbered independently from 0.
    #[must_use]
    pub fn from_base_strings(dict: &IndexMap<String, String>) -> Self {
        let other_suffix = PluralizationForm::Other.canonical_suffix();
        let plural_bases: BTreeSet<&str> = dict
            .keys()
            .filter_map(|k| k.strip_suffix(other_suffix))
            .collect();

        let is_plural_variant = |key: &str| {
            PluralizationForm::ALL.iter().any(|form| {
                key.strip_suffix(form.canonical_suffix())
                    .is_some_and(|base| plural_bases.contains(base))
            })
        };

        let mut scalar_keys: Vec<(&str, &str)> = dict
            .iter()
            .filter(|(k, _)| !is_plural_variant(k))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        scalar_keys.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut mapping = Self::new();
        for (id, (key, value)) in (0..).zip(scalar_keys) {
            mapping.push_scalar(id, key, has_placeholders(value));
        }
        for (id, key) in (0..).zip(plural_bases) {
            mapping.push_plural(id, key);
        }
        mapping
    }
}
