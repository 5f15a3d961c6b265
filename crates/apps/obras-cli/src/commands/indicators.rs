//! Indicator report command.

use obras_ops::Operations;

use crate::config::CliConfig;
use crate::context::ObrasContext;
use crate::error::CliResult;
use crate::output::{IndicatorsOutput, OutputFormat, Render};

/// Execute the indicators command.
pub fn indicators(config: CliConfig, format: OutputFormat) -> CliResult<String> {
    let ctx = ObrasContext::open(config)?;
    let report = ctx.ops.indicators();
    if report.failed() > 0 {
        tracing::warn!(failed = report.failed(), "Some indicators could not be computed");
    }
    ctx.close()?;

    Ok(IndicatorsOutput::from(&report).render(format))
}
