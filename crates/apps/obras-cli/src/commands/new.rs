//! Create a single obra command.

use obras_ops::Operations;
use obras_types::ManualObra;

use crate::cli::NewObraArgs;
use crate::config::CliConfig;
use crate::context::ObrasContext;
use crate::error::CliResult;
use crate::output::{NewObraOutput, OutputFormat, Render};
use crate::prompt::{decimal_or_prompt, text_or_prompt};

/// Execute the new command.
///
/// Values not given as flags are prompted for.
pub fn new_obra(config: CliConfig, format: OutputFormat, args: NewObraArgs) -> CliResult<String> {
    let obra = ManualObra::new(
        text_or_prompt(args.name, "Name", "name")?,
        text_or_prompt(args.work_type, "Work type", "type")?,
        text_or_prompt(args.area, "Responsible area", "area")?,
        text_or_prompt(args.neighborhood, "Neighborhood", "neighborhood")?,
        text_or_prompt(args.district, "District (comuna)", "district")?,
        decimal_or_prompt(args.amount, "Contract amount", "amount")?,
    );

    let mut ctx = ObrasContext::open(config)?;
    let created = ctx.ops.create_obra(&obra);
    ctx.close()?;
    created?;

    Ok(NewObraOutput::from(&obra).render(format))
}
