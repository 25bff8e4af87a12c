//! # PresentationStrings
//!
//! Localized UI string resolution for apps that ship a compiled key mapping
//! alongside per-language `.strings` dictionaries.
//!
//! ## Features
//!
//! - **Key mappings** - Binary id/key tables read once per process
//! - **Fallback chain** - Primary, secondary, base language, then the key itself
//! - **Plural forms** - CLDR-style categories selected per locale
//! - **Argument ranges** - Positional `%@`, `%1$@` and `%d` substitution that
//!   reports where each argument landed
//! - **Coverage** - Which dictionary every key came from, with TSV/CSV export
//!
//! ## Quick Start
//!
//! ```no_run
//! use presentation_strings::prelude::*;
//! use std::sync::Arc;
//!
//! let store = StringsStore::open(
//!     Arc::new(KeyMappingCache::from_path("PresentationStrings.mapping")),
//!     StringsBundle::new("Resources"),
//!     "en",
//!     LanguageSelection::new("de").with_secondary("en"),
//! )?;
//!
//! let strings = store.current();
//! println!("{}", strings.resolve("Common.Cancel"));
//!
//! let greeting = strings.format_key("Chat.Greeting", &["World"]);
//! println!("{} {:?}", greeting.string, greeting.ranges);
//!
//! println!("{}", strings.plural_key("Days", 3));
//! # Ok::<(), presentation_strings::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `pstrings` command-line binary

pub mod component;
pub mod config;
pub mod error;
pub mod format;
pub mod formats;
pub mod mapping_cache;
pub mod plural;
pub mod presentation;
pub mod report;
pub mod resolver;
pub mod store;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::component::{StringComponent, StringsBundle};
    pub use crate::config::LocalizationConfig;
    pub use crate::format::{
        ArgumentRange, FormattedString, TextRange,
        extract_argument_ranges, format_with_argument_ranges,
    };
    pub use crate::formats::mapping::{KeyMapping, read_mapping, write_mapping};
    pub use crate::formats::strings::{StringsDictionary, read_strings};
    pub use crate::mapping_cache::KeyMappingCache;
    pub use crate::plural::{CldrPluralRules, LocaleCode, PluralRule, PluralizationForm};
    pub use crate::presentation::PresentationStrings;
    pub use crate::report::{CoverageReport, ExportFormat, export_for_translation};
    pub use crate::resolver::Tier;
    pub use crate::store::{LanguageSelection, StringsStore};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
