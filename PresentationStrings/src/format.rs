//! Positional argument substitution with range tracking
//!
//! Templates use `%@`, `%d` and `%f` placeholders, optionally with an
//! explicit 1-based index (`%2$@`). The type character is not enforced;
//! every placeholder is replaced by the caller-supplied string for its slot.
//!
//! Formatting records where each argument landed in the output so callers
//! can style just that span.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static ARGUMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?:(\d+)\$)?[@df]").expect("argument pattern is a valid regex")
});

/// A span within a string, in UTF-8 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    #[must_use]
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.location + self.length
    }

    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.location..self.location + self.length
    }
}

/// A 0-based argument slot and the span it occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgumentRange {
    pub index: usize,
    pub range: TextRange,
}

impl ArgumentRange {
    #[must_use]
    pub const fn new(index: usize, location: usize, length: usize) -> Self {
        Self {
            index,
            range: TextRange::new(location, length),
        }
    }
}

/// A formatted string plus the output spans of its arguments
///
/// A slot referenced more than once in the template has one entry per
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedString {
    pub string: String,
    pub ranges: Vec<ArgumentRange>,
}

impl FormattedString {
    /// A plain string with no argument spans
    #[must_use]
    pub fn plain(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            ranges: Vec::new(),
        }
    }

    /// Output spans filled by the given slot
    pub fn ranges_for(&self, index: usize) -> impl Iterator<Item = TextRange> + '_ {
        self.ranges
            .iter()
            .filter(move |r| r.index == index)
            .map(|r| r.range)
    }

    /// Text of a recorded span
    #[must_use]
    pub fn text(&self, range: TextRange) -> Option<&str> {
        self.string.get(range.as_range())
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.string
    }
}

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.string)
    }
}

/// Whether a template contains any placeholder
#[must_use]
pub fn has_placeholders(template: &str) -> bool {
    ARGUMENT_PATTERN.is_match(template)
}

/// Find every placeholder in a template and the slot it refers to
///
/// Explicit `%N$` indices map to slot `N - 1`; bare placeholders take the
/// ordinal of the match. The result is ordered by template position.
#[must_use]
pub fn extract_argument_ranges(template: &str) -> Vec<ArgumentRange> {
    let mut result: Vec<ArgumentRange> = ARGUMENT_PATTERN
        .captures_iter(template)
        .enumerate()
        .filter_map(|(ordinal, caps)| {
            let whole = caps.get(0)?;
            let index = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .unwrap_or(ordinal);
            Some(ArgumentRange::new(index, whole.start(), whole.len()))
        })
        .collect();
    result.sort_by_key(|r| r.range.location);
    result
}

/// Substitute arguments into a template at pre-extracted ranges
///
/// `ranges` must be sorted by location, as returned by
/// [`extract_argument_ranges`]. A range whose slot has no argument keeps its
/// placeholder text and records no output span.
#[must_use]
pub fn format_with_argument_ranges<S: AsRef<str>>(
    template: &str,
    ranges: &[ArgumentRange],
    arguments: &[S],
) -> FormattedString {
    let mut output = String::with_capacity(template.len());
    let mut resulting_ranges = Vec::with_capacity(ranges.len());
    let mut current = 0;

    for argument in ranges {
        let span = argument.range;
        let Some(placeholder) = template.get(span.as_range()) else {
            continue;
        };
        if span.location < current {
            continue;
        }

        output.push_str(&template[current..span.location]);
        if let Some(value) = arguments.get(argument.index) {
            let value = value.as_ref();
            resulting_ranges.push(ArgumentRange::new(argument.index, output.len(), value.len()));
            output.push_str(value);
        } else {
            tracing::debug!(
                "No argument for slot {} in template {:?}",
                argument.index,
                template
            );
            output.push_str(placeholder);
        }
        current = span.end();
    }
    output.push_str(&template[current..]);

    FormattedString {
        string: output,
        ranges: resulting_ranges,
    }
}

/// Extract ranges and substitute in one step
#[must_use]
pub fn format_template<S: AsRef<str>>(template: &str, arguments: &[S]) -> FormattedString {
    let ranges = extract_argument_ranges(template);
    format_with_argument_ranges(template, &ranges, arguments)
}

/// Substitute a count into a pluralized template's single placeholder
#[must_use]
pub fn substitute_count(template: &str, count: i64) -> String {
    format_template(template, &[count.to_string()]).string
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world() {
        let result = format_template("Hello, %@!", &["World"]);
        assert_eq!(result.string, "Hello, World!");
        assert_eq!(result.ranges, vec![ArgumentRange::new(0, 7, 5)]);
        assert_eq!(result.text(result.ranges[0].range), Some("World"));
    }

    #[test]
    fn test_explicit_indices_out_of_order() {
        let template = "%2$@ and %1$@";
        let ranges = extract_argument_ranges(template);
        assert_eq!(
            ranges,
            vec![ArgumentRange::new(1, 0, 4), ArgumentRange::new(0, 9, 4)]
        );

        let result = format_with_argument_ranges(template, &ranges, &["Alice", "Bob"]);
        assert_eq!(result.string, "Bob and Alice");
        assert_eq!(
            result.ranges,
            vec![ArgumentRange::new(1, 0, 3), ArgumentRange::new(0, 8, 5)]
        );
    }

    #[test]
    fn test_implicit_indices_are_ordinal() {
        let ranges = extract_argument_ranges("%@ sent %d photos");
        let slots: Vec<_> = ranges.iter().map(|r| r.index).collect();
        assert_eq!(slots, vec![0, 1]);
    }

    #[test]
    fn test_no_placeholders() {
        let empty: [&str; 0] = [];
        let result = format_template("Plain text", &empty);
        assert_eq!(result, FormattedString::plain("Plain text"));
        assert!(!has_placeholders("Plain text"));
    }

    #[test]
    fn test_duplicate_slot() {
        let result = format_template("%1$@, %1$@!", &["Hi"]);
        assert_eq!(result.string, "Hi, Hi!");
        let spans: Vec<_> = result.ranges_for(0).collect();
        assert_eq!(spans, vec![TextRange::new(0, 2), TextRange::new(4, 2)]);
    }

    #[test]
    fn test_specifier_is_not_enforced() {
        let result = format_template("%1$@ / %1$d", &["7"]);
        assert_eq!(result.string, "7 / 7");
        assert_eq!(result.ranges.len(), 2);
    }

    #[test]
    fn test_missing_argument_keeps_placeholder() {
        let result = format_template("%@ and %@", &["one"]);
        assert_eq!(result.string, "one and %@");
        assert_eq!(result.ranges, vec![ArgumentRange::new(0, 0, 3)]);
    }

    #[test]
    fn test_zero_explicit_index_falls_back_to_ordinal() {
        let ranges = extract_argument_ranges("%@ %0$@");
        let slots: Vec<_> = ranges.iter().map(|r| r.index).collect();
        assert_eq!(slots, vec![0, 1]);
    }

    #[test]
    fn test_multibyte_text_uses_byte_offsets() {
        let result = format_template("Привет, %@!", &["мир"]);
        assert_eq!(result.string, "Привет, мир!");
        let span = result.ranges[0].range;
        assert_eq!(span, TextRange::new("Привет, ".len(), "мир".len()));
        assert_eq!(result.text(span), Some("мир"));
    }

    #[test]
    fn test_substitute_count() {
        assert_eq!(substitute_count("%@ days", 5), "5 days");
        assert_eq!(substitute_count("%d new", -2), "-2 new");
    }
}
