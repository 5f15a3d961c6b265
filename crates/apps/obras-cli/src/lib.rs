//! Command-line interface for the obras pipeline.
//!
//! This crate provides the `obras` binary. It includes commands for:
//!
//! - **Setup**: Create the database and a default configuration
//! - **Pipeline**: Ingest a semicolon-delimited source file
//! - **Reporting**: Print the indicator battery
//! - **Records**: Add a single obra by hand
//!
//! # Quick Start
//!
//! ```bash
//! # Create the database
//! obras init
//!
//! # Load a source file and print indicators
//! obras ingest observatorio-de-obras-urbanas.csv
//!
//! # Add one record
//! obras new --name "Plaza Norte" --type "Espacio Verde" --area Ambiente \
//!     --neighborhood Palermo --district "Comuna 14" --amount 150000
//! ```
//!
//! # Output Formats
//!
//! All commands support `--format` for output control:
//!
//! - `human` (default): Human-readable with colors
//! - `json`: Machine-readable JSON
//!
//! # Configuration
//!
//! Configuration is loaded from `config.toml` in the data directory.
//! Override with `--config`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod progress;
pub mod prompt;

// Re-export main types
pub use cli::{Cli, Commands, OutputFormatArg};
pub use config::CliConfig;
pub use context::ObrasContext;
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Render};
