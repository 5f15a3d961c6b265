//! Ingest a source file command.

use std::path::PathBuf;

use obras_ops::{OpsConfig, Operations, PipelineReport};

use crate::config::CliConfig;
use crate::context::ObrasContext;
use crate::error::{CliError, CliResult};
use crate::output::{IngestOutput, OutputFormat, Render};
use crate::progress::with_spinner;

/// Execute the ingest command.
///
/// A missing or unreadable source is reported in the output, not as an
/// error. An aborted load batch is an error carrying the rendered report.
pub fn ingest(
    config: CliConfig,
    format: OutputFormat,
    file: Option<PathBuf>,
    no_indicators: bool,
) -> CliResult<String> {
    let source = file.or_else(|| config.ingest.source.clone()).ok_or_else(|| {
        CliError::user("No source file. Pass FILE or set ingest.source in the configuration.")
    })?;

    let ops_config = OpsConfig::new().with_indicators(!no_indicators);
    let mut ctx = ObrasContext::open_with(config, ops_config)?;

    let report = with_spinner(format, "Loading obras...", || {
        ctx.ops.run_pipeline(&source)
    });
    ctx.close()?;

    let output = IngestOutput::from(&report).render(format);
    let PipelineReport { load, .. } = report;
    match load.failure {
        Some(source) => Err(CliError::LoadAborted { output, source }),
        None => Ok(output),
    }
}
