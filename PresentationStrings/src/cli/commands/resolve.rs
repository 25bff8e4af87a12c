//! CLI commands that resolve strings for the configured languages

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::cli::GlobalOptions;
use crate::plural::{CldrPluralRules, LocaleCode, PluralRule};
use crate::presentation::PresentationStrings;
use crate::report::{CoverageReport, ExportFormat, export_for_translation};

fn open_strings(options: &GlobalOptions) -> anyhow::Result<Arc<PresentationStrings>> {
    let config = options.resolve_config()?;
    if config.bundle_dir.is_none() || config.mapping_path.is_none() {
        anyhow::bail!(
            "No bundle or mapping configured. Pass --bundle and --mapping or set them in the config file."
        );
    }
    let store = config
        .open_store()
        .with_context(|| format!("Failed to open strings for '{}'", config.language))?;
    Ok(store.current())
}

/// Print the resolved value of a key
pub fn get(options: &GlobalOptions, key: &str) -> anyhow::Result<()> {
    let strings = open_strings(options)?;
    println!("{}", strings.resolve(key));
    Ok(())
}

/// Format a key's template and show where each argument landed
pub fn format(options: &GlobalOptions, key: &str, args: &[String]) -> anyhow::Result<()> {
    let strings = open_strings(options)?;
    let formatted = strings.format_key(key, args);

    println!("{}", formatted.string);
    for range in &formatted.ranges {
        println!(
            "  arg {} at {}..{}",
            range.index,
            range.range.location,
            range.range.end()
        );
    }
    Ok(())
}

/// Print the pluralized string for a count
pub fn plural(options: &GlobalOptions, key: &str, count: i64) -> anyhow::Result<()> {
    let strings = open_strings(options)?;
    tracing::info!("Plural form for {}: {}", count, strings.plural_form(count));
    println!("{}", strings.plural_key(key, count));
    Ok(())
}

/// Print tier coverage, optionally exporting the table for translators
pub fn report(
    options: &GlobalOptions,
    export: Option<&Path>,
    format: ExportFormat,
    show_missing: bool,
) -> anyhow::Result<()> {
    let strings = open_strings(options)?;
    let report = CoverageReport::from_strings(&strings);

    println!("Language: {}", report.language);
    println!("  Base language: {}", strings.base_language_code());
    println!("  Keys: {}", report.total());
    println!(
        "  Primary: {} ({:.1}%)",
        report.primary,
        report.primary_ratio() * 100.0
    );
    println!("  Secondary: {}", report.secondary);
    println!("  Fallback: {}", report.fallback);
    println!("  Missing: {}", report.missing_keys.len());
    if !report.missing_plural_variants.is_empty() {
        println!("  Missing plural variants: {}", report.missing_plural_variants.len());
    }

    if show_missing {
        for key in &report.missing_keys {
            println!("    - {key}");
        }
    }

    if let Some(path) = export {
        let count = export_for_translation(&strings, path, format)?;
        println!("\nExported {} entries to {}", count, path.display());
    }

    Ok(())
}

/// Show the packed plural-rules locale and sample forms for a code
pub fn lc(code: &str) -> anyhow::Result<()> {
    let locale = LocaleCode::from_language_code(code);
    println!("{code}: {locale} (0x{:08X})", locale.value());
    match locale.language_subtag() {
        Some(subtag) => println!("  Rules: CLDR cardinal '{subtag}'"),
        None => println!("  Rules: none (every count is other)"),
    }

    let samples = [0, 1, 2, 3, 5, 11, 21, 100];
    let forms: Vec<String> = samples
        .iter()
        .map(|&n| format!("{n}={}", CldrPluralRules.form(locale, n)))
        .collect();
    println!("  Forms: {}", forms.join(", "));
    Ok(())
}
