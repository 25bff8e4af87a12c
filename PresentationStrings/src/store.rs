//! Current-language snapshot with synchronous language switching
//!
//! Readers take an `Arc<PresentationStrings>` and keep using it for as long
//! as they like; a switch builds a fresh table and swaps it in, leaving
//! outstanding snapshots untouched.

use std::sync::{Arc, PoisonError, RwLock};

use crate::component::{StringComponent, StringsBundle};
use crate::error::Result;
use crate::mapping_cache::KeyMappingCache;
use crate::plural::{CldrPluralRules, PluralRule};
use crate::presentation::PresentationStrings;

/// Which languages a session uses
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageSelection {
    pub language: String,
    pub secondary_language: Option<String>,
    /// Plural rules override for the primary language
    pub pluralization_rules_code: Option<String>,
}

impl LanguageSelection {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            secondary_language: None,
            pluralization_rules_code: None,
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary_language = Some(secondary.into());
        self
    }

    #[must_use]
    pub fn with_pluralization_rules(mut self, code: impl Into<String>) -> Self {
        self.pluralization_rules_code = Some(code.into());
        self
    }
}

/// Owns the mapping, bundle and base fallback, and the current snapshot
pub struct StringsStore {
    mapping: Arc<KeyMappingCache>,
    bundle: StringsBundle,
    fallback: Arc<StringComponent>,
    plural_rule: Arc<dyn PluralRule>,
    session: RwLock<Session>,
}

/// The selection and the table built from it, swapped together
struct Session {
    selection: LanguageSelection,
    strings: Arc<PresentationStrings>,
}

impl StringsStore {
    /// Load the mapping, the fallback language, and the initial selection
    ///
    /// # Errors
    /// Fails only if the key mapping cannot be loaded. Missing language
    /// resources degrade to empty components.
    pub fn open(
        mapping: Arc<KeyMappingCache>,
        bundle: StringsBundle,
        fallback_language: &str,
        selection: LanguageSelection,
    ) -> Result<Self> {
        Self::open_with_rule(
            mapping,
            bundle,
            fallback_language,
            selection,
            Arc::new(CldrPluralRules),
        )
    }

    /// Like [`StringsStore::open`] with a custom plural rule
    ///
    /// # Errors
    /// See [`StringsStore::open`].
    pub fn open_with_rule(
        mapping: Arc<KeyMappingCache>,
        bundle: StringsBundle,
        fallback_language: &str,
        selection: LanguageSelection,
        plural_rule: Arc<dyn PluralRule>,
    ) -> Result<Self> {
        let fallback = Arc::new(bundle.load_component(fallback_language, None));
        let strings = build(&mapping, &bundle, &fallback, &plural_rule, &selection)?;
        Ok(Self {
            mapping,
            bundle,
            fallback,
            plural_rule,
            session: RwLock::new(Session {
                selection,
                strings: Arc::new(strings),
            }),
        })
    }

    /// The current snapshot
    #[must_use]
    pub fn current(&self) -> Arc<PresentationStrings> {
        Arc::clone(&self.session.read().unwrap_or_else(PoisonError::into_inner).strings)
    }

    #[must_use]
    pub fn selection(&self) -> LanguageSelection {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .selection
            .clone()
    }

    /// The current selection together with the snapshot built from it
    #[must_use]
    pub fn snapshot(&self) -> (LanguageSelection, Arc<PresentationStrings>) {
        let session = self.session.read().unwrap_or_else(PoisonError::into_inner);
        (session.selection.clone(), Arc::clone(&session.strings))
    }

    #[must_use]
    pub fn bundle(&self) -> &StringsBundle {
        &self.bundle
    }

    /// Rebuild for a new selection and make it current
    ///
    /// # Errors
    /// Fails only if the key mapping cannot be loaded; the previous
    /// snapshot stays current in that case.
    pub fn switch_language(&self, selection: LanguageSelection) -> Result<Arc<PresentationStrings>> {
        tracing::info!(
            "Switching language to '{}' (secondary: {:?})",
            selection.language,
            selection.secondary_language
        );
        let strings = Arc::new(build(
            &self.mapping,
            &self.bundle,
            &self.fallback,
            &self.plural_rule,
            &selection,
        )?);

        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Session {
            selection,
            strings: Arc::clone(&strings),
        };
        Ok(strings)
    }
}

impl std::fmt::Debug for StringsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringsStore")
            .field("bundle", &self.bundle)
            .field("fallback", &self.fallback.language_code)
            .field("selection", &self.selection())
            .finish_non_exhaustive()
    }
}

fn build(
    mapping: &KeyMappingCache,
    bundle: &StringsBundle,
    fallback: &Arc<StringComponent>,
    plural_rule: &Arc<dyn PluralRule>,
    selection: &LanguageSelection,
) -> Result<PresentationStrings> {
    let mapping = mapping.get()?;
    let primary = bundle.load_component(
        &selection.language,
        selection.pluralization_rules_code.as_deref(),
    );
    let secondary = selection
        .secondary_language
        .as_deref()
        .filter(|code| *code != selection.language)
        .map(|code| bundle.load_component(code, None));

    Ok(PresentationStrings::with_plural_rule(
        &mapping,
        primary,
        secondary,
        Arc::clone(fallback),
        Arc::clone(plural_rule),
    ))
}
