//! Loaded language variants and the bundle they come from
//!
//! A [`StringComponent`] is one language's flat dictionary plus metadata.
//! Components are immutable; switching language builds new ones.
//!
//! A [`StringsBundle`] is a directory laid out like an app bundle:
//!
//! ```text
//! <root>/en.lproj/Localizable.strings
//! <root>/ru.lproj/Localizable.strings
//! <root>/de.json
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::formats::strings::{StringsDictionary, read_json_strings, read_strings};

/// Key holding a language's own display name
pub const LANGUAGE_NAME_KEY: &str = "Localization.LanguageName";

const LPROJ_EXTENSION: &str = "lproj";
const STRINGS_FILE: &str = "Localizable.strings";

/// One loaded language variant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringComponent {
    pub language_code: String,
    pub localized_name: String,
    /// Plural rules to use instead of the language code's
    pub pluralization_rules_code: Option<String>,
    pub dict: StringsDictionary,
}

impl StringComponent {
    pub fn new(
        language_code: impl Into<String>,
        localized_name: impl Into<String>,
        pluralization_rules_code: Option<String>,
        dict: StringsDictionary,
    ) -> Self {
        Self {
            language_code: language_code.into(),
            localized_name: localized_name.into(),
            pluralization_rules_code,
            dict,
        }
    }

    /// A component with no strings, used when a resource is unavailable
    pub fn empty(language_code: impl Into<String>) -> Self {
        let language_code = language_code.into();
        Self {
            localized_name: language_code.clone(),
            language_code,
            pluralization_rules_code: None,
            dict: StringsDictionary::new(),
        }
    }

    /// Build from a dictionary, taking the display name from
    /// [`LANGUAGE_NAME_KEY`] when present
    pub fn from_dict(
        language_code: impl Into<String>,
        pluralization_rules_code: Option<String>,
        dict: StringsDictionary,
    ) -> Self {
        let language_code = language_code.into();
        let localized_name = dict
            .get(LANGUAGE_NAME_KEY)
            .cloned()
            .unwrap_or_else(|| language_code.clone());
        Self {
            language_code,
            localized_name,
            pluralization_rules_code,
            dict,
        }
    }

    /// Code that selects plural rules: the override, else the language code
    #[must_use]
    pub fn rules_code(&self) -> &str {
        self.pluralization_rules_code
            .as_deref()
            .unwrap_or(&self.language_code)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.dict.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }
}

/// A directory of per-language string resources
#[derive(Debug, Clone)]
pub struct StringsBundle {
    root: PathBuf,
}

impl StringsBundle {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate the resource for a language, `.strings` first then JSON
    #[must_use]
    pub fn resource_path(&self, language_code: &str) -> Option<PathBuf> {
        let strings = self
            .root
            .join(format!("{language_code}.{LPROJ_EXTENSION}"))
            .join(STRINGS_FILE);
        if strings.is_file() {
            return Some(strings);
        }
        let json = self.root.join(format!("{language_code}.json"));
        json.is_file().then_some(json)
    }

    /// Load a component, failing if the resource is missing or malformed
    ///
    /// # Errors
    /// Returns [`Error::LanguageNotFound`] if no resource exists, or the
    /// parse error of the resource.
    pub fn try_load_component(
        &self,
        language_code: &str,
        pluralization_rules_code: Option<&str>,
    ) -> Result<StringComponent> {
        let path = self
            .resource_path(language_code)
            .ok_or_else(|| Error::LanguageNotFound {
                language: language_code.to_string(),
                root: self.root.clone(),
            })?;

        let dict = if path.extension().is_some_and(|ext| ext == "json") {
            read_json_strings(&path)?
        } else {
            read_strings(&path)?
        };
        tracing::debug!(
            "Loaded {} strings for '{}' from {}",
            dict.len(),
            language_code,
            path.display()
        );

        Ok(StringComponent::from_dict(
            language_code,
            pluralization_rules_code.map(str::to_string),
            dict,
        ))
    }

    /// Load a component, degrading to an empty dictionary on any failure
    ///
    /// Missing translations then resolve through the fallback chain.
    pub fn load_component(
        &self,
        language_code: &str,
        pluralization_rules_code: Option<&str>,
    ) -> StringComponent {
        self.try_load_component(language_code, pluralization_rules_code)
            .unwrap_or_else(|e| {
                tracing::warn!("Using empty strings for '{}': {}", language_code, e);
                let mut component = StringComponent::empty(language_code);
                component.pluralization_rules_code = pluralization_rules_code.map(str::to_string);
                component
            })
    }

    /// Language codes with a resource in this bundle, sorted
    ///
    /// # Errors
    /// Returns an error if the bundle directory cannot be read.
    pub fn languages(&self) -> Result<Vec<String>> {
        let mut languages = BTreeSet::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let extension = path.extension().and_then(|e| e.to_str());
            let found = match extension {
                Some(LPROJ_EXTENSION) => path.join(STRINGS_FILE).is_file(),
                Some("json") => entry.file_type().is_file(),
                _ => false,
            };
            if found {
                languages.insert(stem.to_string());
            }
        }
        Ok(languages.into_iter().collect())
    }
}
