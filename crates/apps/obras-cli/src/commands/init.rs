//! Initialize the database command.

use std::path::Path;

use crate::config::CliConfig;
use crate::context::ObrasContext;
use crate::error::CliResult;
use crate::output::{InitOutput, OutputFormat, Render};

/// Execute the init command.
///
/// Creates the schema, and writes the configuration file if none exists.
pub fn init(config: CliConfig, config_path: &Path, format: OutputFormat) -> CliResult<String> {
    let database = config.store_config().database_path();
    let ctx = ObrasContext::open(config)?;

    let config_created = !config_path.exists();
    if config_created {
        ctx.config.save(config_path)?;
        tracing::info!(path = %config_path.display(), "Wrote default configuration");
    }
    ctx.close()?;

    let output = InitOutput {
        database: database.to_string_lossy().to_string(),
        config_path: config_path.to_string_lossy().to_string(),
        config_created,
    };

    Ok(output.render(format))
}
