//! Interactive prompt utilities for CLI commands.

use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, IsTerminal};

use crate::error::{CliError, CliResult};

/// Check if we're running in an interactive terminal.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompt for a line of text.
pub fn text(prompt: &str) -> io::Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| io::Error::other(e.to_string()))
}

/// Prompt for a decimal number. Invalid input is asked again.
pub fn decimal(prompt: &str) -> io::Result<f64> {
    Input::<f64>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| io::Error::other(e.to_string()))
}

/// Use the given value or prompt for it.
///
/// Fails when the value is missing and stdin is not a terminal.
pub fn text_or_prompt(value: Option<String>, prompt: &str, flag: &str) -> CliResult<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !is_interactive() {
        return Err(CliError::user(format!(
            "Missing --{}. Pass it or run interactively.",
            flag
        )));
    }
    text(prompt).map_err(|e| CliError::User(format!("Failed to read {}: {}", flag, e)))
}

/// Use the given amount or prompt for it.
pub fn decimal_or_prompt(value: Option<f64>, prompt: &str, flag: &str) -> CliResult<f64> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !is_interactive() {
        return Err(CliError::user(format!(
            "Missing --{}. Pass it or run interactively.",
            flag
        )));
    }
    decimal(prompt).map_err(|e| CliError::User(format!("Failed to read {}: {}", flag, e)))
}
