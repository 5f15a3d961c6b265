//! Obras CLI binary entry point.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use obras_cli::{
    cli::{Cli, Commands},
    commands,
    config::{default_config_path, CliConfig},
    error::{CliError, CliResult},
    output::OutputFormat,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if let CliError::LoadAborted { output, .. } = &e {
            println!("{}", output);
        }
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr. `RUST_LOG` wins over the default filter.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "obras=debug" } else { "obras=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Print a user-friendly error message with error code and recovery hint.
fn print_error(e: &CliError) {
    let code = e.error_code();

    // Error line with code
    eprintln!(
        "{} [{}]: {}",
        "Error".red().bold(),
        code.to_string().yellow(),
        e
    );

    // Suggestion if available
    if let Some(suggestion) = code.suggestion() {
        eprintln!("{}: {}", "Hint".cyan(), suggestion);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut config = CliConfig::load(&config_path)?;
    if let Some(database) = cli.database {
        config.storage.database = database;
    }
    if !config.display.color {
        colored::control::set_override(false);
    }

    // Get output format
    let format: OutputFormat = cli.format.into();

    // Dispatch command
    let output = match cli.command {
        // Setup
        Commands::Init => commands::init(config, &config_path, format)?,

        // Pipeline
        Commands::Ingest {
            file,
            no_indicators,
        } => commands::ingest(config, format, file, no_indicators)?,

        Commands::Indicators => commands::indicators(config, format)?,

        Commands::New(args) => commands::new_obra(config, format, args)?,

        // Utility commands
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
