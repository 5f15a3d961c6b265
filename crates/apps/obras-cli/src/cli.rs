//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Obras pipeline CLI.
#[derive(Parser, Debug)]
#[command(name = "obras")]
#[command(author = "Obras Urbanas Contributors")]
#[command(version)]
#[command(about = "Ingest public-works records and compute indicators")]
#[command(
    long_about = "Loads a semicolon-delimited public-works file into a local database, skipping names already stored, and reports a fixed set of indicators.\n\nRun 'obras init' to get started."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human or json).
    #[arg(short, long, global = true, default_value = "human")]
    pub format: OutputFormatArg,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (overrides storage.database).
    #[arg(short, long, global = true, env = "OBRAS_DATABASE")]
    pub database: Option<PathBuf>,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // =========================================================================
    // Setup
    // =========================================================================
    /// Create the database schema and a default configuration file.
    Init,

    // =========================================================================
    // Pipeline
    // =========================================================================
    /// Extract, clean and load a source file, then print indicators.
    Ingest {
        /// Source file (defaults to ingest.source from the configuration).
        file: Option<PathBuf>,

        /// Skip the indicator report.
        #[arg(long)]
        no_indicators: bool,
    },

    /// Print the indicator report for the stored records.
    Indicators,

    /// Add a single obra. Missing values are prompted for.
    New(NewObraArgs),

    // =========================================================================
    // Utility Commands
    // =========================================================================
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: CompletionShell,
    },
}

/// Values for a hand-entered obra.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct NewObraArgs {
    /// Obra name (must be unique).
    #[arg(long)]
    pub name: Option<String>,

    /// Work type.
    #[arg(long = "type")]
    pub work_type: Option<String>,

    /// Responsible area.
    #[arg(long)]
    pub area: Option<String>,

    /// Neighborhood.
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// District (comuna).
    #[arg(long)]
    pub district: Option<String>,

    /// Contract amount.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<f64>,
}

/// Shell types for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    PowerShell,
}
