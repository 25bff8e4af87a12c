//! Translation coverage and export
//!
//! Shows which dictionary each mapped key resolved from, and exports the
//! resolved table for translators.
//!
//! # Export format
//!
//! Columns:
//! 1. Id
//! 2. Key
//! 3. Tier (`primary`, `secondary`, `fallback`, `key`)
//! 4. Resolved value
//! 5. Translation (empty on export, filled by translator)
//!
//! ```tsv
//! Id\tKey\tTier\tValue\tTranslation
//! 0\tCommon.Cancel\tfallback\tCancel\t
//! ```

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::plural::PluralizationForm;
use crate::presentation::PresentationStrings;
use crate::resolver::Tier;

/// Export format for translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Tab-separated values (recommended for spreadsheets)
    Tsv,
    /// Comma-separated values
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Csv => "csv",
        }
    }

    #[must_use]
    pub fn delimiter(&self) -> char {
        match self {
            Self::Tsv => '\t',
            Self::Csv => ',',
        }
    }
}

/// Per-tier counts for a resolved table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub language: String,
    pub primary: usize,
    pub secondary: usize,
    pub fallback: usize,
    /// Keys found in no dictionary
    pub missing_keys: Vec<String>,
    /// Plural variant keys found in no dictionary
    pub missing_plural_variants: Vec<String>,
}

impl CoverageReport {
    #[must_use]
    pub fn from_strings(strings: &PresentationStrings) -> Self {
        let mut report = Self {
            language: strings.primary_component().language_code.clone(),
            ..Self::default()
        };

        for (_, scalar) in strings.resolved().scalars() {
            match scalar.tier {
                Tier::Primary => report.primary += 1,
                Tier::Secondary => report.secondary += 1,
                Tier::Fallback => report.fallback += 1,
                Tier::Key => report.missing_keys.push(scalar.key.clone()),
            }
        }

        // A variant left at its base key was found nowhere
        for (_, plural) in strings.resolved().plurals() {
            for form in PluralizationForm::ALL {
                if plural.template(form) == plural.key {
                    report.missing_plural_variants.push(form.variant_key(&plural.key));
                }
            }
        }

        report
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.primary + self.secondary + self.fallback + self.missing_keys.len()
    }

    /// Share of scalar keys translated in the primary language
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn primary_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 1.0;
        }
        self.primary as f64 / total as f64
    }
}

/// Export the resolved scalar table to a translation file
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn export_for_translation<P: AsRef<Path>>(
    strings: &PresentationStrings,
    path: P,
    format: ExportFormat,
) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    let count = write_translation_table(strings, &mut writer, format)?;
    writer.flush()?;
    Ok(count)
}

/// Write the translation table to any writer
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_translation_table<W: Write>(
    strings: &PresentationStrings,
    writer: &mut W,
    format: ExportFormat,
) -> Result<usize> {
    let delimiter = format.delimiter();
    writeln!(
        writer,
        "Id{delimiter}Key{delimiter}Tier{delimiter}Value{delimiter}Translation"
    )?;

    let mut count = 0;
    for (id, scalar) in strings.resolved().scalars() {
        writeln!(
            writer,
            "{id}{delimiter}{}{delimiter}{}{delimiter}{}{delimiter}",
            escape_for_delimited(&scalar.key, delimiter),
            scalar.tier,
            escape_for_delimited(&scalar.value, delimiter)
        )?;
        count += 1;
    }
    Ok(count)
}

/// Escape text for TSV/CSV output
fn escape_for_delimited(text: &str, delimiter: char) -> String {
    if text.contains(delimiter) || text.contains('\n') || text.contains('\r') || text.contains('"')
    {
        let escaped = text.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        text.to_string()
    }
}
