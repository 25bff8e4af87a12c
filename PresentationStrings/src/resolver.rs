//! Resolution of mapped keys against the language fallback chain
//!
//! Every key is probed in the primary component, then the secondary, then
//! the base fallback. A key found in none of them resolves to itself, so a
//! missing translation shows up as its key name instead of failing.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::component::StringComponent;
use crate::format::{ArgumentRange, FormattedString, extract_argument_ranges, format_with_argument_ranges};
use crate::formats::mapping::KeyMapping;
use crate::plural::PluralizationForm;

/// Which dictionary a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Primary,
    Secondary,
    Fallback,
    /// Not found anywhere; the value is the key itself
    Key,
}

impl Tier {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Fallback => "fallback",
            Self::Key => "key",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three dictionaries a lookup walks, in order
#[derive(Debug, Clone, Copy)]
pub struct FallbackChain<'a> {
    pub primary: &'a StringComponent,
    pub secondary: Option<&'a StringComponent>,
    pub fallback: &'a StringComponent,
}

impl<'a> FallbackChain<'a> {
    pub fn new(
        primary: &'a StringComponent,
        secondary: Option<&'a StringComponent>,
        fallback: &'a StringComponent,
    ) -> Self {
        Self {
            primary,
            secondary,
            fallback,
        }
    }

    /// First dictionary hit for a key
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<(&'a str, Tier)> {
        if let Some(value) = self.primary.get(key) {
            return Some((value, Tier::Primary));
        }
        if let Some(value) = self.secondary.and_then(|c| c.get(key)) {
            return Some((value, Tier::Secondary));
        }
        self.fallback.get(key).map(|value| (value, Tier::Fallback))
    }

    /// Resolved value, ending at the key itself
    #[must_use]
    pub fn value<'k>(&self, key: &'k str) -> (&'k str, Tier)
    where
        'a: 'k,
    {
        self.lookup(key).unwrap_or((key, Tier::Key))
    }

    /// Resolved template for a plural form
    ///
    /// A form missing from every dictionary resolves to the base key, not
    /// the suffixed variant key.
    #[must_use]
    pub fn plural_value<'k>(&self, key: &'k str, form: PluralizationForm) -> (&'k str, Tier)
    where
        'a: 'k,
    {
        self.lookup(&form.variant_key(key)).unwrap_or((key, Tier::Key))
    }
}

/// A resolved scalar string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScalar {
    pub key: String,
    pub value: String,
    pub tier: Tier,
    /// Placeholder ranges, present for keys flagged as taking arguments
    pub argument_ranges: Option<Vec<ArgumentRange>>,
}

/// A resolved plural string: one template per form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlural {
    pub key: String,
    pub forms: [String; 6],
}

impl ResolvedPlural {
    #[must_use]
    pub fn template(&self, form: PluralizationForm) -> &str {
        &self.forms[form.index()]
    }
}

/// Id-indexed table for one language selection
#[derive(Debug, Clone, Default)]
pub struct ResolvedStrings {
    scalars: IndexMap<i32, ResolvedScalar>,
    plurals: IndexMap<i32, ResolvedPlural>,
    scalar_ids: HashMap<String, i32>,
    plural_ids: HashMap<String, i32>,
}

impl ResolvedStrings {
    /// Resolve every mapped key through the fallback chain
    #[must_use]
    pub fn build(mapping: &KeyMapping, chain: FallbackChain<'_>) -> Self {
        let mut scalars = IndexMap::with_capacity(mapping.scalars.len());
        let mut scalar_ids = HashMap::with_capacity(mapping.scalars.len());
        for entry in &mapping.scalars {
            let (value, tier) = chain.value(&entry.key);
            let argument_ranges = entry.has_arguments.then(|| extract_argument_ranges(value));
            let resolved = ResolvedScalar {
                key: entry.key.clone(),
                value: value.to_string(),
                tier,
                argument_ranges,
            };
            if scalars.insert(entry.id, resolved).is_some() {
                tracing::debug!("Duplicate scalar id {} ({})", entry.id, entry.key);
            }
            scalar_ids.insert(entry.key.clone(), entry.id);
        }

        let mut plurals = IndexMap::with_capacity(mapping.plurals.len());
        let mut plural_ids = HashMap::with_capacity(mapping.plurals.len());
        for entry in &mapping.plurals {
            let forms = PluralizationForm::ALL.map(|form| chain.plural_value(&entry.key, form).0.to_string());
            let resolved = ResolvedPlural {
                key: entry.key.clone(),
                forms,
            };
            if plurals.insert(entry.id, resolved).is_some() {
                tracing::debug!("Duplicate plural id {} ({})", entry.id, entry.key);
            }
            plural_ids.insert(entry.key.clone(), entry.id);
        }

        tracing::debug!(
            "Resolved {} scalar and {} plural strings",
            scalars.len(),
            plurals.len()
        );

        Self {
            scalars,
            plurals,
            scalar_ids,
            plural_ids,
        }
    }

    /// Resolved value of a scalar id
    #[must_use]
    pub fn get(&self, id: i32) -> Option<&str> {
        self.scalars.get(&id).map(|s| s.value.as_str())
    }

    #[must_use]
    pub fn scalar(&self, id: i32) -> Option<&ResolvedScalar> {
        self.scalars.get(&id)
    }

    /// Placeholder ranges of an id flagged as taking arguments
    #[must_use]
    pub fn argument_ranges(&self, id: i32) -> Option<&[ArgumentRange]> {
        self.scalars.get(&id)?.argument_ranges.as_deref()
    }

    /// Substitute arguments into a scalar id's template
    ///
    /// Ids not flagged as taking arguments are scanned on demand.
    #[must_use]
    pub fn format<S: AsRef<str>>(&self, id: i32, arguments: &[S]) -> Option<FormattedString> {
        let scalar = self.scalars.get(&id)?;
        let formatted = match &scalar.argument_ranges {
            Some(ranges) => format_with_argument_ranges(&scalar.value, ranges, arguments),
            None => {
                let ranges = extract_argument_ranges(&scalar.value);
                format_with_argument_ranges(&scalar.value, &ranges, arguments)
            }
        };
        Some(formatted)
    }

    #[must_use]
    pub fn plural(&self, id: i32) -> Option<&ResolvedPlural> {
        self.plurals.get(&id)
    }

    /// Resolved template for a plural id and form
    #[must_use]
    pub fn plural_template(&self, id: i32, form: PluralizationForm) -> Option<&str> {
        self.plurals.get(&id).map(|p| p.template(form))
    }

    #[must_use]
    pub fn scalar_id(&self, key: &str) -> Option<i32> {
        self.scalar_ids.get(key).copied()
    }

    #[must_use]
    pub fn plural_id(&self, key: &str) -> Option<i32> {
        self.plural_ids.get(key).copied()
    }

    /// Scalars in mapping order
    pub fn scalars(&self) -> impl Iterator<Item = (i32, &ResolvedScalar)> {
        self.scalars.iter().map(|(id, s)| (*id, s))
    }

    /// Plurals in mapping order
    pub fn plurals(&self) -> impl Iterator<Item = (i32, &ResolvedPlural)> {
        self.plurals.iter().map(|(id, p)| (*id, p))
    }

    #[must_use]
    pub fn scalar_count(&self) -> usize {
        self.scalars.len()
    }

    #[must_use]
    pub fn plural_count(&self) -> usize {
        self.plurals.len()
    }
}
