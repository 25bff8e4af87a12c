use clap::Subcommand;
use std::path::PathBuf;
use std::str::FromStr;

use super::GlobalOptions;
use crate::report::ExportFormat;

/// Translation export format argument
#[derive(Debug, Clone, Copy)]
pub struct ExportFormatArg(pub ExportFormat);

impl FromStr for ExportFormatArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(ExportFormatArg(ExportFormat::Tsv)),
            "csv" | "comma" => Ok(ExportFormatArg(ExportFormat::Csv)),
            _ => Err(format!("Invalid format '{s}'. Valid values: tsv, csv")),
        }
    }
}

pub mod mapping;
pub mod resolve;

#[derive(Subcommand)]
pub enum Commands {
    /// Key mapping file operations
    Mapping {
        #[command(subcommand)]
        command: MappingCommands,
    },

    /// Resolve a key through the fallback chain
    Get {
        /// String key, e.g. "Common.Cancel"
        key: String,
    },

    /// Substitute arguments into a key's template
    Format {
        /// String key
        key: String,

        /// Arguments in slot order
        args: Vec<String>,
    },

    /// Pluralized string for a base key and count
    Plural {
        /// Base key without the form suffix
        key: String,

        /// Count to select the plural form
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Show which dictionary each mapped key resolved from
    Report {
        /// Export the resolved table for translators
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Export format (tsv, csv)
        #[arg(short, long, default_value = "tsv")]
        format: ExportFormatArg,

        /// List every key missing from all dictionaries
        #[arg(long)]
        missing: bool,
    },

    /// Show the packed plural-rules locale for a language code
    Lc {
        /// Language code, e.g. "en_US" or "pt-BR"
        code: String,
    },
}

#[derive(Subcommand)]
pub enum MappingCommands {
    /// Show the contents of a key mapping file
    Inspect {
        /// Mapping file to read
        path: PathBuf,

        /// Maximum entries to display per section
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Build a key mapping from a base-language dictionary
    Build {
        /// Base `.strings` or `.json` dictionary
        source: PathBuf,

        /// Output mapping file
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self, options: &GlobalOptions) -> anyhow::Result<()> {
        match self {
            Commands::Mapping { command } => command.execute(),
            Commands::Get { key } => resolve::get(options, key),
            Commands::Format { key, args } => resolve::format(options, key, args),
            Commands::Plural { key, count } => resolve::plural(options, key, *count),
            Commands::Report {
                export,
                format,
                missing,
            } => resolve::report(options, export.as_deref(), format.0, *missing),
            Commands::Lc { code } => resolve::lc(code),
        }
    }
}

impl MappingCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            MappingCommands::Inspect { path, limit } => mapping::inspect(path, *limit),
            MappingCommands::Build { source, output } => mapping::build(source, output),
        }
    }
}
