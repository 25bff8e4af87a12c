//! Session-level string table for one language selection

use std::fmt;
use std::sync::Arc;

use crate::component::StringComponent;
use crate::format::{FormattedString, format_template, substitute_count};
use crate::formats::mapping::KeyMapping;
use crate::plural::{CldrPluralRules, LocaleCode, PluralRule, PluralizationForm};
use crate::resolver::{FallbackChain, ResolvedStrings};

/// Resolved strings for a primary language, an optional secondary language,
/// and the base fallback
///
/// Immutable once built; share it behind an `Arc` and rebuild on language
/// change. Every lookup by key is total and ends at the key itself.
pub struct PresentationStrings {
    lc: LocaleCode,
    primary: StringComponent,
    secondary: Option<StringComponent>,
    fallback: Arc<StringComponent>,
    base_language_code: String,
    plural_rule: Arc<dyn PluralRule>,
    resolved: ResolvedStrings,
}

impl PresentationStrings {
    /// Build with the built-in CLDR plural rules
    pub fn new(
        mapping: &KeyMapping,
        primary: StringComponent,
        secondary: Option<StringComponent>,
        fallback: Arc<StringComponent>,
    ) -> Self {
        Self::with_plural_rule(mapping, primary, secondary, fallback, Arc::new(CldrPluralRules))
    }

    pub fn with_plural_rule(
        mapping: &KeyMapping,
        primary: StringComponent,
        secondary: Option<StringComponent>,
        fallback: Arc<StringComponent>,
        plural_rule: Arc<dyn PluralRule>,
    ) -> Self {
        let lc = LocaleCode::from_language_code(primary.rules_code());
        let base_language_code = secondary
            .as_ref()
            .map_or_else(|| primary.language_code.clone(), |s| s.language_code.clone());

        let chain = FallbackChain::new(&primary, secondary.as_ref(), &fallback);
        let resolved = ResolvedStrings::build(mapping, chain);

        tracing::info!(
            "Built strings for '{}' (secondary: {}, lc: {})",
            primary.language_code,
            secondary.as_ref().map_or("none", |s| s.language_code.as_str()),
            lc
        );

        Self {
            lc,
            primary,
            secondary,
            fallback,
            base_language_code,
            plural_rule,
            resolved,
        }
    }

    /// Packed plural-rules locale of the primary component
    #[must_use]
    pub fn lc(&self) -> LocaleCode {
        self.lc
    }

    #[must_use]
    pub fn primary_component(&self) -> &StringComponent {
        &self.primary
    }

    #[must_use]
    pub fn secondary_component(&self) -> Option<&StringComponent> {
        self.secondary.as_ref()
    }

    #[must_use]
    pub fn fallback_component(&self) -> &StringComponent {
        &self.fallback
    }

    /// Language the translation is based on: the secondary's, else the primary's
    #[must_use]
    pub fn base_language_code(&self) -> &str {
        &self.base_language_code
    }

    #[must_use]
    pub fn resolved(&self) -> &ResolvedStrings {
        &self.resolved
    }

    fn chain(&self) -> FallbackChain<'_> {
        FallbackChain::new(&self.primary, self.secondary.as_ref(), &self.fallback)
    }

    // ========================================================================
    // Id-based lookups
    // ========================================================================

    #[must_use]
    pub fn get(&self, id: i32) -> Option<&str> {
        self.resolved.get(id)
    }

    #[must_use]
    pub fn format<S: AsRef<str>>(&self, id: i32, arguments: &[S]) -> Option<FormattedString> {
        self.resolved.format(id, arguments)
    }

    /// Form the plural rule selects for a count in this locale
    #[must_use]
    pub fn plural_form(&self, count: i64) -> PluralizationForm {
        self.plural_rule.form(self.lc, count)
    }

    /// Pluralized string for an id with the count substituted
    #[must_use]
    pub fn plural(&self, id: i32, count: i64) -> Option<String> {
        let form = self.plural_form(count);
        self.resolved
            .plural_template(id, form)
            .map(|template| substitute_count(template, count))
    }

    // ========================================================================
    // Key-based lookups
    // ========================================================================

    /// Resolved value for a key, mapped or not
    #[must_use]
    pub fn resolve<'k>(&'k self, key: &'k str) -> &'k str {
        self.resolved
            .scalar_id(key)
            .and_then(|id| self.resolved.get(id))
            .unwrap_or_else(|| self.chain().value(key).0)
    }

    /// Substitute arguments into the template for a key
    #[must_use]
    pub fn format_key<S: AsRef<str>>(&self, key: &str, arguments: &[S]) -> FormattedString {
        if let Some(formatted) = self
            .resolved
            .scalar_id(key)
            .and_then(|id| self.resolved.format(id, arguments))
        {
            return formatted;
        }
        format_template(self.chain().value(key).0, arguments)
    }

    /// Pluralized string for a base key with the count substituted
    #[must_use]
    pub fn plural_key(&self, key: &str, count: i64) -> String {
        if let Some(result) = self
            .resolved
            .plural_id(key)
            .and_then(|id| self.plural(id, count))
        {
            return result;
        }
        let form = self.plural_form(count);
        substitute_count(self.chain().plural_value(key, form).0, count)
    }
}

impl fmt::Debug for PresentationStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationStrings")
            .field("lc", &self.lc)
            .field("primary", &self.primary.language_code)
            .field("secondary", &self.secondary.as_ref().map(|s| &s.language_code))
            .field("base_language_code", &self.base_language_code)
            .field("scalars", &self.resolved.scalar_count())
            .field("plurals", &self.resolved.plural_count())
            .finish_non_exhaustive()
    }
}
