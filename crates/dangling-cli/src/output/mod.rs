//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use dangling::{Finding, HostedZone, RunSummary, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Drop everything but dangling findings
#[must_use]
pub fn only_dangling(mut summary: RunSummary) -> RunSummary {
    summary.findings.retain(Finding::is_dangling);
    summary
}

/// Render a run summary
pub fn render_summary(summary: &RunSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Pretty => Ok(pretty_summary(summary)),
    }
}

/// Render a list of hosted zones
pub fn render_zones(zones: &[HostedZone], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(zones)?),
        OutputFormat::Pretty => Ok(pretty_zones(zones)),
    }
}

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Verdict")]
    verdict: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Zone")]
    zone: String,
}

impl From<&Finding> for FindingRow {
    fn from(finding: &Finding) -> Self {
        Self {
            verdict: verdict_label(finding.verdict).to_string(),
            record_type: finding.record.record_type.to_string(),
            name: finding.record.display_name().cyan().to_string(),
            value: finding.value.clone().unwrap_or_else(|| "-".to_string()),
            reason: finding.reason.clone(),
            zone: finding.record.zone_id.clone(),
        }
    }
}

#[derive(Tabled)]
struct ErrorRow {
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Error")]
    message: String,
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Visibility")]
    visibility: String,
    #[tabled(rename = "Records")]
    records: String,
}

fn verdict_label(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Dangling => "DANGLING".red().bold(),
        Verdict::Live => "LIVE".green(),
        Verdict::Indeterminate => "UNKNOWN".yellow(),
    }
}

fn pretty_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let elapsed = (summary.finished_at - summary.started_at)
        .to_std()
        .unwrap_or_default();

    let _ = writeln!(out, "{}", "Dangling DNS Scan".bold());
    let _ = writeln!(out);
    let _ = writeln!(out, "  {} {}", "Zones checked:  ".bold(), summary.zones_checked);
    let _ = writeln!(out, "  {} {}", "Records checked:".bold(), summary.records_checked);

    let dangling = summary.dangling_count();
    let dangling_text = if dangling > 0 {
        dangling.to_string().red().bold()
    } else {
        dangling.to_string().green()
    };
    let _ = writeln!(out, "  {} {}", "Dangling:       ".bold(), dangling_text);
    let _ = writeln!(out, "  {} {}", "Live:           ".bold(), summary.live_count());
    let _ = writeln!(out, "  {} {}", "Indeterminate:  ".bold(), summary.indeterminate_count());
    let _ = writeln!(out, "  {} {}", "Errors:         ".bold(), summary.errors.len());
    if let Some(captured) = summary.inventory_captured_at {
        let _ = writeln!(
            out,
            "  {} {}",
            "Inventory as of:".bold(),
            captured.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    let _ = writeln!(out, "  {} {:.1}s", "Duration:       ".bold(), elapsed.as_secs_f64());

    if summary.cancelled {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} run was cancelled; results are partial",
            "Warning:".yellow().bold()
        );
    }

    if !summary.findings.is_empty() {
        let rows: Vec<FindingRow> = summary.findings.iter().map(FindingRow::from).collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Findings:".bold().underline());
        let _ = writeln!(out, "{}", Table::new(&rows).with(Style::rounded()));
    }

    if !summary.errors.is_empty() {
        let rows: Vec<ErrorRow> = summary
            .errors
            .iter()
            .map(|e| ErrorRow {
                zone: e.zone_id.clone(),
                message: e.message.clone(),
            })
            .collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Errors:".bold().red());
        let _ = writeln!(out, "{}", Table::new(&rows).with(Style::rounded()));
    }

    out
}

fn pretty_zones(zones: &[HostedZone]) -> String {
    let mut out = String::new();

    if zones.is_empty() {
        let _ = writeln!(out, "{}", "No hosted zones found.".dimmed());
        return out;
    }

    let rows: Vec<ZoneRow> = zones
        .iter()
        .map(|zone| ZoneRow {
            id: zone.id.clone(),
            name: zone.display_name().cyan().to_string(),
            visibility: if zone.private_zone {
                "private".yellow().to_string()
            } else {
                "public".green().to_string()
            },
            records: zone
                .record_count
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        })
        .collect();

    let _ = writeln!(out, "{} {}", "Hosted zones:".bold(), zones.len());
    let _ = writeln!(out, "{}", Table::new(&rows).with(Style::rounded()));

    out
}
