//! Output formatting for different formats.

use std::fmt::Write as _;
use std::str::FromStr;

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use mailcheck::{CheckStatus, DomainReport, ImpactEstimate, Mechanism};
use serde::{Deserialize, Serialize};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
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
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Calculator result alongside the report it was computed from.
#[derive(Debug, Serialize)]
pub struct ImpactSummary<'a> {
    pub domain: &'a str,
    pub score: u8,
    pub issues: &'a [Mechanism],
    #[serde(flatten)]
    pub estimate: &'a ImpactEstimate,
}

impl<'a> ImpactSummary<'a> {
    pub fn new(report: &'a DomainReport, estimate: &'a ImpactEstimate) -> Self {
        Self {
            domain: report.domain().as_str(),
            score: report.score(),
            issues: report.issues(),
            estimate,
        }
    }
}

/// Render a domain report.
pub fn render_report(report: &DomainReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Csv => report_csv(report),
        OutputFormat::Pretty => Ok(report_pretty(report)),
    }
}

/// Render a calculator result.
pub fn render_impact(summary: &ImpactSummary<'_>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(summary)?),
        OutputFormat::Csv => impact_csv(summary),
        OutputFormat::Pretty => Ok(impact_pretty(summary)),
    }
}

fn report_csv(report: &DomainReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["domain", "score", "mechanism", "status", "selector", "record", "message"])?;

    let score = report.score().to_string();
    for result in report.results() {
        let status = result.status.to_string();
        wtr.write_record([
            report.domain().as_str(),
            score.as_str(),
            result.mechanism.name(),
            status.as_str(),
            result.selector.as_deref().unwrap_or(""),
            result.record.as_deref().unwrap_or(""),
            result.message.as_str(),
        ])?;
    }

    finish_csv(wtr)
}

fn impact_csv(summary: &ImpactSummary<'_>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "domain",
        "score",
        "inbox_rate",
        "baseline_inbox_rate",
        "missed_emails_per_month",
        "lost_revenue_per_month",
        "lost_revenue_per_year",
    ])?;

    let e = summary.estimate;
    wtr.write_record([
        summary.domain.to_string(),
        summary.score.to_string(),
        format!("{:.4}", e.inbox_rate),
        format!("{:.4}", e.baseline_inbox_rate),
        e.missed_emails_per_month.to_string(),
        format!("{:.2}", e.lost_revenue_per_month),
        format!("{:.2}", e.lost_revenue_per_year),
    ])?;

    finish_csv(wtr)
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> anyhow::Result<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn status_label(status: CheckStatus) -> ColoredString {
    let label = format!("{:<7}", status.to_string());
    match status {
        CheckStatus::Pass => label.green().bold(),
        CheckStatus::Warning => label.yellow().bold(),
        CheckStatus::Fail => label.red().bold(),
        CheckStatus::Error => label.magenta().bold(),
    }
}

fn score_label(score: u8) -> ColoredString {
    let label = format!("{score}/100");
    match score {
        80..=100 => label.green().bold(),
        50..=79 => label.yellow().bold(),
        _ => label.red().bold(),
    }
}

fn report_pretty(report: &DomainReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", "Domain:".bold(), report.domain().as_str().cyan());
    let _ = writeln!(out, "{}  {}", "Score:".bold(), score_label(report.score()));
    out.push('\n');

    for result in report.results() {
        let _ = write!(
            out,
            "  {:<6} {} {}",
            result.mechanism.name().bold(),
            status_label(result.status),
            result.message
        );
        if let Some(selector) = &result.selector {
            let _ = write!(out, " {}", format!("(selector {selector})").dimmed());
        }
        out.push('\n');
        if let Some(record) = &result.record {
            let _ = writeln!(out, "         {}", record.dimmed());
        }
    }

    out.push('\n');
    if report.issues().is_empty() {
        let _ = writeln!(out, "{}", "No issues found.".green());
    } else {
        let names: Vec<&str> = report.issues().iter().map(|m| m.name()).collect();
        let _ = writeln!(out, "{} {}", "Issues:".bold(), names.join(", ").yellow());
    }

    out
}

fn impact_pretty(summary: &ImpactSummary<'_>) -> String {
    let e = summary.estimate;
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", "Domain:".bold(), summary.domain.cyan());
    let _ = writeln!(out, "{}  {}", "Score:".bold(), score_label(summary.score));
    out.push('\n');
    let _ = writeln!(
        out,
        "  {:<24} {:.1}% (a fully authenticated sender gets {:.1}%)",
        "Estimated inbox rate:",
        e.inbox_rate * 100.0,
        e.baseline_inbox_rate * 100.0
    );
    let _ = writeln!(out, "  {:<24} {}", "Missed emails / month:", e.missed_emails_per_month);
    let _ = writeln!(
        out,
        "  {:<24} {}",
        "Lost revenue / month:",
        format!("{:.2}", e.lost_revenue_per_month).red().bold()
    );
    let _ = writeln!(
        out,
        "  {:<24} {}",
        "Lost revenue / year:",
        format!("{:.2}", e.lost_revenue_per_year).red().bold()
    );

    out
}
