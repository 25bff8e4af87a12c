//! pstrings CLI - Command-line interface for localized string tables

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser};
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::LocalizationConfig;

#[derive(Parser)]
#[command(name = "pstrings")]
#[command(about = "pstrings: resolve, format and audit localized strings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command; flags override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bundle directory with `<lang>.lproj/Localizable.strings` or `<lang>.json`
    #[arg(long, global = true)]
    pub bundle: Option<PathBuf>,

    /// Key mapping file
    #[arg(long, global = true)]
    pub mapping: Option<PathBuf>,

    /// Primary language code
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Secondary language code
    #[arg(long, global = true)]
    pub secondary: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalOptions {
    /// Load the config file and apply command-line overrides
    pub fn resolve_config(&self) -> anyhow::Result<LocalizationConfig> {
        let mut config = match &self.config {
            Some(path) => LocalizationConfig::load(path)?,
            None => match LocalizationConfig::default_path() {
                Ok(path) => LocalizationConfig::load_or_default(path)?,
                Err(_) => LocalizationConfig::default(),
            },
        };

        if let Some(bundle) = &self.bundle {
            config.bundle_dir = Some(bundle.clone());
        }
        if let Some(mapping) = &self.mapping {
            config.mapping_path = Some(mapping.clone());
        }
        if let Some(language) = &self.language {
            config.language.clone_from(language);
        }
        if let Some(secondary) = &self.secondary {
            config.secondary_language = Some(secondary.clone());
        }
        Ok(config)
    }

    fn log_filter(&self) -> EnvFilter {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

/// Run the pstrings CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(cli.options.log_filter())
        .with_writer(std::io::stderr)
        .init();

    cli.command.execute(&cli.options)?;

    Ok(())
}
