//! Progress bar utilities for CLI commands.

use indicatif::{ProgressBar, ProgressStyle};

use crate::output::OutputFormat;

/// Create a spinner progress bar with a message.
///
/// The spinner animates while waiting for an operation to complete.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Create a hidden progress bar (no-op).
///
/// Use this when running in non-interactive mode or JSON output.
pub fn hidden() -> ProgressBar {
    ProgressBar::hidden()
}

/// Spinner for human output, hidden otherwise.
pub fn for_format(format: OutputFormat, msg: &str) -> ProgressBar {
    match format {
        OutputFormat::Human => spinner(msg),
        OutputFormat::Json => hidden(),
    }
}

/// Run an operation with a spinner, returning the result.
///
/// The spinner displays while the operation runs and is cleared on completion.
pub fn with_spinner<F, T>(format: OutputFormat, msg: &str, op: F) -> T
where
    F: FnOnce() -> T,
{
    let pb = for_format(format, msg);
    let result = op();
    pb.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Testing...");
        pb.finish_with_message("Done");
    }

    #[test]
    fn test_hidden_creation() {
        let pb = hidden();
        pb.finish();
    }

    #[test]
    fn test_json_format_is_hidden() {
        let pb = for_format(OutputFormat::Json, "Loading...");
        assert!(pb.is_hidden());
        pb.finish_and_clear();
    }

    #[test]
    fn test_with_spinner() {
        let result = with_spinner(OutputFormat::Json, "Processing...", || 42);
        assert_eq!(result, 42);
    }
}
