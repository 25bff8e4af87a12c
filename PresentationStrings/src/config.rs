//! Localization settings (`config.toml`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::component::StringsBundle;
use crate::error::{Error, Result};
use crate::mapping_cache::KeyMappingCache;
use crate::store::{LanguageSelection, StringsStore};

const CONFIG_DIR_NAME: &str = "presentation-strings";
const CONFIG_FILE_NAME: &str = "config.toml";

fn default_language() -> String {
    "en".to_string()
}

/// Where resources live and which languages to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Directory holding `<lang>.lproj/Localizable.strings` or `<lang>.json`
    #[serde(default)]
    pub bundle_dir: Option<PathBuf>,
    /// Key mapping file
    #[serde(default)]
    pub mapping_path: Option<PathBuf>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub secondary_language: Option<String>,
    /// Base language every lookup falls back to
    #[serde(default = "default_language")]
    pub fallback_language: String,
    #[serde(default)]
    pub pluralization_rules_code: Option<String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            bundle_dir: None,
            mapping_path: None,
            language: default_language(),
            secondary_language: None,
            fallback_language: default_language(),
            pluralization_rules_code: None,
        }
    }
}

impl LocalizationConfig {
    /// Platform config location, e.g. `~/.config/presentation-strings/config.toml`
    ///
    /// # Errors
    /// Returns [`Error::ConfigDirNotFound`] if the platform has no config directory.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or(Error::ConfigDirNotFound)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&text)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load if the file exists, otherwise use defaults
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    #[must_use]
    pub fn selection(&self) -> LanguageSelection {
        LanguageSelection {
            language: self.language.clone(),
            secondary_language: self.secondary_language.clone(),
            pluralization_rules_code: self.pluralization_rules_code.clone(),
        }
    }

    /// Build a store from these settings
    ///
    /// # Errors
    /// Returns [`Error::ConfigMissing`] if `bundle_dir` or `mapping_path` is
    /// unset, or the key mapping load error.
    pub fn open_store(&self) -> Result<StringsStore> {
        let bundle_dir = self.bundle_dir.as_ref().ok_or(Error::ConfigMissing("bundle_dir"))?;
        let mapping_path = self
            .mapping_path
            .as_ref()
            .ok_or(Error::ConfigMissing("mapping_path"))?;

        StringsStore::open(
            Arc::new(KeyMappingCache::from_path(mapping_path)),
            StringsBundle::new(bundle_dir),
            &self.fallback_language,
            self.selection(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let config = LocalizationConfig {
            bundle_dir: Some(PathBuf::from("/app/Resources")),
            mapping_path: Some(PathBuf::from("/app/PresentationStrings.mapping")),
            language: "uk".to_string(),
            secondary_language: Some("ru".to_string()),
            fallback_language: "en".to_string(),
            pluralization_rules_code: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: LocalizationConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let parsed: LocalizationConfig = toml::from_str("language = \"de\"").unwrap();
        assert_eq!(parsed.language, "de");
        assert_eq!(parsed.fallback_language, "en");
        assert_eq!(parsed.bundle_dir, None);
    }

    #[test]
    fn test_open_store_requires_paths() {
        let err = LocalizationConfig::default().open_store().unwrap_err();
        assert!(matches!(err, Error::ConfigMissing("bundle_dir")));
    }
}
