//! Error types for `presentation-strings`

use std::path::PathBuf;

use thiserror::Error;

/// Section of the key mapping file a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSection {
    /// Scalar (non-pluralized) string records.
    Scalar,
    /// Pluralized string records.
    Plural,
}

impl std::fmt::Display for MappingSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Plural => f.write_str("plural"),
        }
    }
}

/// The error type for string table operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Key Mapping Errors ====================
    /// The key mapping resource does not exist.
    #[error("key mapping not found: {path}")]
    MappingNotFound {
        /// The path that was probed.
        path: PathBuf,
    },

    /// The key mapping buffer ended in the middle of a record.
    #[error("key mapping truncated in {section} record {index} at byte {offset}")]
    MappingTruncated {
        /// Section being read.
        section: MappingSection,
        /// Index of the record being read.
        index: usize,
        /// Byte offset where the read failed.
        offset: u64,
    },

    /// A count or length field was negative.
    #[error("key mapping has negative {field} ({value}) in {section} section")]
    MappingNegativeLength {
        /// Section being read.
        section: MappingSection,
        /// Name of the offending field.
        field: &'static str,
        /// The value found.
        value: i32,
    },

    /// A key was not valid UTF-8.
    #[error("key mapping {section} record {index} has a non UTF-8 key")]
    MappingInvalidKey {
        /// Section being read.
        section: MappingSection,
        /// Index of the record being read.
        index: usize,
    },

    /// A mapping cannot be written because a key or count overflows `i32`.
    #[error("key mapping field too large to encode: {0}")]
    MappingTooLarge(String),

    // ==================== Strings Resource Errors ====================
    /// A `.strings` resource could not be parsed.
    #[error("strings parse error in {path}: {message}")]
    StringsParse {
        /// The resource that failed to parse.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// No resource exists for the requested language.
    #[error("no strings resource for language '{language}' under {root}")]
    LanguageNotFound {
        /// The requested language code.
        language: String,
        /// The bundle root that was searched.
        root: PathBuf,
    },

    /// A JSON dictionary held a value that was not a string.
    #[error("JSON strings value for '{key}' is not a string")]
    JsonNotString {
        /// The offending key.
        key: String,
    },

    // ==================== Config Errors ====================
    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config file could not be serialized.
    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A required config field was not set.
    #[error("config field not set: {0}")]
    ConfigMissing(&'static str),

    /// The platform config directory could not be determined.
    #[error("could not determine config directory")]
    ConfigDirNotFound,

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for string table operations.
pub type Result<T> = std::result::Result<T, Error>;
