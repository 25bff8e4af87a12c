//! Plural forms, locale codes, and plural rules
//!
//! Pluralized strings are stored as six variants of a base key, one per
//! [`PluralizationForm`]. Which variant a count selects is decided by a
//! [`PluralRule`] keyed on a packed [`LocaleCode`].

use std::fmt;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// CLDR plural category
///
/// The discriminants are the raw values used to index resolved plural tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PluralizationForm {
    Zero = 0,
    One = 1,
    Two = 2,
    Few = 3,
    Many = 4,
    Other = 5,
}

impl PluralizationForm {
    /// All forms in raw-value order
    pub const ALL: [PluralizationForm; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    /// Suffix appended to a base key to name this form's variant
    #[must_use]
    pub const fn canonical_suffix(self) -> &'static str {
        match self {
            Self::Zero => "_0",
            Self::One => "_1",
            Self::Two => "_2",
            Self::Few => "_3_10",
            Self::Many => "_many",
            Self::Other => "_any",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Build the variant key for a base key
    #[must_use]
    pub fn variant_key(self, base: &str) -> String {
        let suffix = self.canonical_suffix();
        let mut key = String::with_capacity(base.len() + suffix.len());
        key.push_str(base);
        key.push_str(suffix);
        key
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Packed base-language identifier
///
/// Produced by [`LocaleCode::from_language_code`]: the base language
/// subtag, lowercased, with each UTF-16 unit shifted into a `u32`
/// (`"en"` is `0x656E`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LocaleCode(u32);

impl LocaleCode {
    /// Canonicalize a language or plural-rules code.
    ///
    /// Truncates at the first `_` or `-`, lowercases, then packs. `"en_US"`,
    /// `"en-US"` and `"EN"` all produce the same value.
    #[must_use]
    pub fn from_language_code(code: &str) -> Self {
        let base = code.find(['_', '-']).map_or(code, |end| &code[..end]);
        let packed = base
            .to_lowercase()
            .encode_utf16()
            .fold(0u32, |acc, unit| (acc << 8).wrapping_add(u32::from(unit)));
        Self(packed)
    }

    /// Pack an already-canonical ASCII code
    #[must_use]
    pub const fn from_ascii(code: &[u8]) -> Self {
        let mut packed = 0u32;
        let mut i = 0;
        while i < code.len() {
            packed = (packed << 8).wrapping_add(code[i] as u32);
            i += 1;
        }
        Self(packed)
    }

    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The language subtag this code was packed from, if it is plain ASCII
    /// letters (`"en"`, `"fil"`)
    #[must_use]
    pub fn language_subtag(self) -> Option<String> {
        let (bytes, start) = self.short_bytes();
        let code = &bytes[start..];
        (!code.is_empty() && code.iter().all(u8::is_ascii_lowercase))
            .then(|| code.iter().map(|&b| b as char).collect())
    }

    /// Packed bytes with leading zero bytes removed
    fn short_bytes(self) -> ([u8; 4], usize) {
        let bytes = self.0.to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        (bytes, start)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bytes, start) = self.short_bytes();
        let code = &bytes[start..];
        if !code.is_empty() && code.iter().all(u8::is_ascii_graphic) {
            for &b in code {
                write!(f, "{}", b as char)?;
            }
            Ok(())
        } else {
            write!(f, "{:#x}", self.0)
        }
    }
}

/// Maps a (locale, count) pair to the form whose variant should be shown
pub trait PluralRule: Send + Sync {
    fn form(&self, locale: LocaleCode, count: i64) -> PluralizationForm;
}

impl<F> PluralRule for F
where
    F: Fn(LocaleCode, i64) -> PluralizationForm + Send + Sync,
{
    fn form(&self, locale: LocaleCode, count: i64) -> PluralizationForm {
        self(locale, count)
    }
}

/// Built-in CLDR cardinal rules, backed by ICU4X compiled data
///
/// The locale is rebuilt from the packed code's language subtag. Codes with
/// no CLDR data select [`PluralizationForm::Other`] for every count.
#[derive(Debug, Clone, Copy, Default)]
pub struct CldrPluralRules;

impl CldrPluralRules {
    fn rules_for(locale: LocaleCode) -> Option<PluralRules> {
        let code = locale.language_subtag()?;
        let locale: Locale = code.parse().ok()?;
        PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into())
            .map_err(|e| tracing::debug!("No plural rules for '{}': {}", code, e))
            .ok()
    }
}

impl PluralRule for CldrPluralRules {
    fn form(&self, locale: LocaleCode, count: i64) -> PluralizationForm {
        match Self::rules_for(locale) {
            Some(rules) => rules.category_for(count).into(),
            None => PluralizationForm::Other,
        }
    }
}

impl From<PluralCategory> for PluralizationForm {
    fn from(category: PluralCategory) -> Self {
        match category {
            PluralCategory::Zero => Self::Zero,
            PluralCategory::One => Self::One,
            PluralCategory::Two => Self::Two,
            PluralCategory::Few => Self::Few,
            PluralCategory::Many => Self::Many,
            PluralCategory::Other => Self::Other,
        }
    }
}
