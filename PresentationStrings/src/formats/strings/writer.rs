//! `.strings` writing

use super::StringsDictionary;
use crate::error::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Write a dictionary as a `.strings` file
///
/// # Errors
/// Returns an error if file writing fails.
pub fn write_strings<P: AsRef<Path>>(path: P, dict: &StringsDictionary) -> Result<()> {
    std::fs::write(path, strings_to_string(dict))?;
    Ok(())
}

/// Render a dictionary in `.strings` syntax, one pair per line
#[must_use]
pub fn strings_to_string(dict: &StringsDictionary) -> String {
    let mut output = String::new();
    for (key, value) in dict {
        let _ = writeln!(output, "\"{}\" = \"{}\";", escape(key), escape(value));
    }
    output
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::strings::read_strings;

    #[test]
    fn test_escaped_output() {
        let mut dict = StringsDictionary::new();
        dict.insert("Quote".to_string(), "Say \"hi\"\\\n".to_string());

        let text = strings_to_string(&dict);
        assert_eq!(text, "\"Quote\" = \"Say \\\"hi\\\"\\\\\\n\";\n");
    }

    #[test]
    fn test_write_strings_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Localizable.strings");

        let mut dict = StringsDictionary::new();
        dict.insert("Common.Cancel".to_string(), "Cancel".to_string());
        dict.insert("Chat.Greeting".to_string(), "Hello, %@!".to_string());
        dict.insert("Chat.Quote".to_string(), "Say \"hi\"".to_string());
        write_strings(&path, &dict).unwrap();

        assert_eq!(read_strings(&path).unwrap(), dict);
    }
}
