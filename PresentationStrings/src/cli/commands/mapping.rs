//! CLI commands for key mapping files

use std::path::Path;

use anyhow::Context;

use crate::formats::mapping::{KeyMapping, read_mapping, write_mapping};
use crate::formats::strings::{read_json_strings, read_strings};

/// Print the scalar and plural sections of a mapping file
pub fn inspect(path: &Path, limit: Option<usize>) -> anyhow::Result<()> {
    let mapping = read_mapping(path)
        .with_context(|| format!("Failed to read key mapping {}", path.display()))?;
    let limit = limit.unwrap_or(usize::MAX);

    let with_arguments = mapping.scalars.iter().filter(|s| s.has_arguments).count();
    println!("{}:", path.display());
    println!("  Scalar keys: {} ({} take arguments)", mapping.scalars.len(), with_arguments);
    println!("  Plural keys: {}", mapping.plurals.len());
    println!();

    if !mapping.scalars.is_empty() {
        println!("Scalars:");
        for scalar in mapping.scalars.iter().take(limit) {
            let marker = if scalar.has_arguments { " (args)" } else { "" };
            println!("  {:>6}  {}{}", scalar.id, scalar.key, marker);
        }
        if mapping.scalars.len() > limit {
            println!("  ... and {} more", mapping.scalars.len() - limit);
        }
    }

    if !mapping.plurals.is_empty() {
        println!("Plurals:");
        for plural in mapping.plurals.iter().take(limit) {
            println!("  {:>6}  {}", plural.id, plural.key);
        }
        if mapping.plurals.len() > limit {
            println!("  ... and {} more", mapping.plurals.len() - limit);
        }
    }

    Ok(())
}

/// Build a mapping file from a base-language dictionary
pub fn build(source: &Path, output: &Path) -> anyhow::Result<()> {
    if !source.is_file() {
        anyhow::bail!("Source dictionary does not exist: {}", source.display());
    }

    let dict = if source.extension().is_some_and(|ext| ext == "json") {
        read_json_strings(source)?
    } else {
        read_strings(source)?
    };

    let mapping = KeyMapping::from_base_strings(&dict);
    write_mapping(output, &mapping)?;

    println!(
        "Wrote {} scalar and {} plural keys to {}",
        mapping.scalars.len(),
        mapping.plurals.len(),
        output.display()
    );

    Ok(())
}
