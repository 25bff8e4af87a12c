//! Per-language string dictionaries
//!
//! Two on-disk encodings are supported, both producing a flat, insertion
//! ordered `key -> template` map:
//!
//! - `.strings` text files (`"key" = "value";` with C-style comments),
//!   parsed by `langcodec`
//! - JSON objects whose values are all strings

mod writer;

pub use writer::{strings_to_string, write_strings};

use indexmap::IndexMap;
use langcodec::{Codec, Translation};
use std::path::Path;

use crate::error::{Error, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Flat key -> template dictionary
pub type StringsDictionary = IndexMap<String, String>;

/// Read a `.strings` file from disk
///
/// The language passed to the codec is taken from an enclosing
/// `<lang>.lproj` directory, else `und`. Plural entries are skipped; plural
/// variants live in the flat dictionary under suffixed keys.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::StringsParse`] if its contents are malformed.
pub fn read_strings<P: AsRef<Path>>(path: P) -> Result<StringsDictionary> {
    let path = path.as_ref();
    std::fs::metadata(path)?;

    let mut codec = Codec::new();
    codec
        .read_file_by_extension(path, Some(lproj_language(path)))
        .map_err(|e| Error::StringsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut dict = StringsDictionary::new();
    for resource in codec.resources {
        for entry in resource.entries {
            match entry.value {
                Translation::Singular(value) => {
                    let key = entry.id.trim_start_matches(BYTE_ORDER_MARK).to_string();
                    dict.insert(key, value);
                }
                _ => tracing::debug!("Skipping non-singular entry '{}'", entry.id),
            }
        }
    }
    Ok(dict)
}

fn lproj_language(path: &Path) -> String {
    path.parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(".lproj"))
        .filter(|lang| !lang.is_empty())
        .unwrap_or("und")
        .to_string()
}

/// Parse a JSON object of string values
///
/// # Errors
/// Returns [`Error::JsonError`] for malformed JSON and
/// [`Error::JsonNotString`] when a value is not a string.
pub fn parse_json_strings(text: &str) -> Result<StringsDictionary> {
    let raw: IndexMap<String, serde_json::Value> = serde_json::from_str(text)?;
    raw.into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => Ok((key, s)),
            _ => Err(Error::JsonNotString { key }),
        })
        .collect()
}

/// Read a JSON dictionary from disk
///
/// # Errors
/// See [`parse_json_strings`].
pub fn read_json_strings<P: AsRef<Path>>(path: P) -> Result<StringsDictionary> {
    let text = std::fs::read_to_string(path)?;
    parse_json_strings(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_text(text: &str) -> StringsDictionary {
        let dir = tempdir().unwrap();
        let lproj = dir.path().join("en.lproj");
        std::fs::create_dir_all(&lproj).unwrap();
        let path = lproj.join("Localizable.strings");
        std::fs::write(&path, text).unwrap();
        read_strings(&path).unwrap()
    }

    #[test]
    fn test_pairs_and_comments() {
        let dict = read_text(
            r#"/* Header comment
   spanning lines */
"Common.Cancel" = "Cancel";
// line comment
"Chat.Title" = "Chat with %@";
"#,
        );
        assert_eq!(dict.len(), 2);
        assert_eq!(dict["Common.Cancel"], "Cancel");
        assert_eq!(dict["Chat.Title"], "Chat with %@");
    }

    #[test]
    fn test_line_comment_after_entry_is_not_a_key() {
        let dict = read_text("\"Key\" = \"v\";\n// note\n\"Other\" = \"w\";\n");
        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Key", "Other"]);
    }

    #[test]
    fn test_escaped_quote() {
        let dict = read_text(r#""k" = "Say \"hi\"";"#);
        assert_eq!(dict["k"], "Say \"hi\"");
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let dict = read_text("\u{feff}\"Common.Done\" = \"Done\";\n");
        assert_eq!(dict.get("Common.Done").map(String::as_str), Some("Done"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_strings(dir.path().join("nope.strings")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_lproj_language() {
        assert_eq!(lproj_language(Path::new("/res/pt-BR.lproj/Localizable.strings")), "pt-BR");
        assert_eq!(lproj_language(Path::new("/res/base.strings")), "und");
    }

    #[test]
    fn test_json_strings_preserve_order() {
        let dict = parse_json_strings(r#"{"b": "2", "a": "1"}"#).unwrap();
        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_json_rejects_non_string() {
        let err = parse_json_strings(r#"{"count": 3}"#).unwrap_err();
        assert!(matches!(err, Error::JsonNotString { key } if key == "count"));
    }
}
