//! Output formatting for CLI.

use colored::Colorize;
use serde::Serialize;

use obras_ops::{Indicator, IndicatorReport, IndicatorValue, PipelineReport};
use obras_types::ManualObra;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use 'human' or 'json'.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Trait for renderable output.
pub trait Render {
    /// Render as human-readable string.
    fn render_human(&self) -> String;

    /// Render as JSON string.
    fn render_json(&self) -> String;

    /// Render in the specified format.
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.render_human(),
            OutputFormat::Json => self.render_json(),
        }
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// Output for the init command.
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub database: String,
    pub config_path: String,
    pub config_created: bool,
}

impl Render for InitOutput {
    fn render_human(&self) -> String {
        let config_line = if self.config_created {
            format!("{} {}", "Configuration saved to:".green(), self.config_path)
        } else {
            format!("{} {}", "Using configuration:".bold(), self.config_path)
        };
        format!(
            "{} {}\n{}",
            "Database ready:".green().bold(),
            self.database,
            config_line
        )
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for the ingest command.
#[derive(Debug, Serialize)]
pub struct IngestOutput {
    pub source: String,
    pub extracted: usize,
    pub extraction_error: Option<String>,
    pub kept: usize,
    pub blank_dropped: usize,
    pub incomplete_dropped: usize,
    pub cleaning_skipped: Option<String>,
    pub inserted: usize,
    pub duplicates: usize,
    pub incomplete: usize,
    pub load_error: Option<String>,
    pub indicators: Option<IndicatorsOutput>,
}

impl From<&PipelineReport> for IngestOutput {
    fn from(report: &PipelineReport) -> Self {
        Self {
            source: report.source.to_string_lossy().to_string(),
            extracted: report.extracted,
            extraction_error: report.extraction_failure.as_ref().map(ToString::to_string),
            kept: report.clean.kept,
            blank_dropped: report.clean.blank_dropped,
            incomplete_dropped: report.clean.incomplete_dropped,
            cleaning_skipped: report.clean.fallback.as_ref().map(ToString::to_string),
            inserted: report.load.inserted,
            duplicates: report.load.duplicates,
            incomplete: report.load.incomplete,
            load_error: report.load.failure.as_ref().map(ToString::to_string),
            indicators: report.indicators.as_ref().map(IndicatorsOutput::from),
        }
    }
}

impl Render for IngestOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![format!("{} {}", "Source:".bold(), self.source)];

        match &self.extraction_error {
            Some(e) => lines.push(format!("{} {}", "Extraction failed:".red().bold(), e)),
            None => lines.push(format!("{} {} rows", "Extracted:".bold(), self.extracted)),
        }

        if let Some(reason) = &self.cleaning_skipped {
            lines.push(format!("{} {}", "Cleaning skipped:".yellow().bold(), reason));
        }
        lines.push(format!(
            "{} {} kept, {} blank, {} incomplete",
            "Cleaned:".bold(),
            self.kept,
            self.blank_dropped,
            self.incomplete_dropped
        ));

        let loaded = format!(
            "{} {} inserted, {} already stored, {} incomplete",
            "Loaded:".bold(),
            self.inserted,
            self.duplicates,
            self.incomplete
        );
        lines.push(loaded);
        if let Some(e) = &self.load_error {
            lines.push(format!("{} {}", "Load aborted:".red().bold(), e));
        }

        if let Some(indicators) = &self.indicators {
            lines.push(String::new());
            lines.push(indicators.render_human());
        }

        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for the indicators command.
#[derive(Debug, Serialize)]
pub struct IndicatorsOutput {
    pub indicators: Vec<IndicatorOutput>,
}

/// One indicator line.
#[derive(Debug, Serialize)]
pub struct IndicatorOutput {
    pub number: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<IndicatorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Indicator> for IndicatorOutput {
    fn from(indicator: &Indicator) -> Self {
        let (value, error) = match &indicator.result {
            Ok(value) => (Some(value.clone()), None),
            Err(e) => (None, Some(e.clone())),
        };
        Self {
            number: indicator.kind.number(),
            title: indicator.kind.title().to_string(),
            value,
            error,
        }
    }
}

impl From<&IndicatorReport> for IndicatorsOutput {
    fn from(report: &IndicatorReport) -> Self {
        Self {
            indicators: report.indicators.iter().map(IndicatorOutput::from).collect(),
        }
    }
}

impl Render for IndicatorsOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![format!("{}", "INDICATORS".bold())];
        for indicator in &self.indicators {
            let heading = format!("{:>2}. {}", indicator.number, indicator.title);
            match (&indicator.value, &indicator.error) {
                (Some(value), _) => {
                    let body = format_value(value);
                    if body.len() == 1 {
                        lines.push(format!("{}: {}", heading.bold(), body[0]));
                    } else {
                        lines.push(format!("{}:", heading.bold()));
                        for line in body {
                            lines.push(format!("      {}", line));
                        }
                    }
                }
                (None, Some(e)) => {
                    lines.push(format!("{}: {} {}", heading.bold(), "failed".red(), e));
                }
                (None, None) => lines.push(format!("{}:", heading.bold())),
            }
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn format_value(value: &IndicatorValue) -> Vec<String> {
    match value {
        IndicatorValue::Values(values) if values.is_empty() => vec!["none".dimmed().to_string()],
        IndicatorValue::Values(values) => values.clone(),
        IndicatorValue::Counts(counts) if counts.is_empty() => vec!["none".dimmed().to_string()],
        IndicatorValue::Counts(counts) => counts
            .iter()
            .map(|(group, count)| format!("{}: {}", display_group(group), count))
            .collect(),
        IndicatorValue::CountSums(groups) if groups.is_empty() => {
            vec!["none".dimmed().to_string()]
        }
        IndicatorValue::CountSums(groups) => groups
            .iter()
            .map(|(group, cs)| {
                format!(
                    "{}: {} works, {}",
                    display_group(group),
                    cs.count,
                    format_amount(cs.sum)
                )
            })
            .collect(),
        IndicatorValue::CountSum(cs) => {
            vec![format!("{} works, {}", cs.count, format_amount(cs.sum))]
        }
        IndicatorValue::Count(n) => vec![n.to_string()],
        IndicatorValue::Percentage(p) => vec![format!("{:.2}%", p)],
        IndicatorValue::Total(n) => vec![n.to_string()],
        IndicatorValue::Sum(s) => vec![format_amount(*s)],
    }
}

fn display_group(group: &str) -> &str {
    if group.is_empty() {
        "(none)"
    } else {
        group
    }
}

/// Format an amount with two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("$ {:.2}", amount)
}

/// Output for the new command.
#[derive(Debug, Serialize)]
pub struct NewObraOutput {
    pub name: String,
    pub work_type: String,
    pub area: String,
    pub neighborhood: String,
    pub district: String,
    pub contract_amount: f64,
}

impl From<&ManualObra> for NewObraOutput {
    fn from(obra: &ManualObra) -> Self {
        Self {
            name: obra.name.clone(),
            work_type: obra.work_type.clone(),
            area: obra.responsible_area.clone(),
            neighborhood: obra.neighborhood.clone(),
            district: obra.district.clone(),
            contract_amount: obra.contract_amount,
        }
    }
}

impl Render for NewObraOutput {
    fn render_human(&self) -> String {
        format!(
            "{} \"{}\"\n{} {}\n{} {}\n{} {}, {}\n{} {}",
            "Created:".green().bold(),
            self.name,
            "Type:".bold(),
            self.work_type,
            "Area:".bold(),
            self.area,
            "Location:".bold(),
            self.neighborhood,
            self.district,
            "Amount:".bold(),
            format_amount(self.contract_amount)
        )
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
