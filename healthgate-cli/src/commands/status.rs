//! Controller status command

use crate::api::ApiClient;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use healthgate_common::{AbortOutcome, LoopState, StatusReport, Violation};
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
pub struct ViolationRow {
    #[tabled(rename = "MEASUREMENT")]
    pub measurement: String,
    #[tabled(rename = "OBSERVED")]
    pub observed: u64,
    #[tabled(rename = "THRESHOLD")]
    pub threshold: u64,
}

impl From<&Violation> for ViolationRow {
    fn from(v: &Violation) -> Self {
        Self {
            measurement: v.measurement.to_string(),
            observed: v.observed,
            threshold: v.threshold,
        }
    }
}

pub async fn handle_status_command(api: &ApiClient, output: &str) -> Result<()> {
    let report: StatusReport = api.get("/status").await?;

    match OutputFormat::parse(output) {
        OutputFormat::Table => print_report(&report, Utc::now()),
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Yaml => output::print_yaml(&report)?,
    }
    Ok(())
}

fn print_report(report: &StatusReport, now: DateTime<Utc>) {
    for (label, value) in summary_lines(report, now) {
        println!("{:<18} {}", format!("{}:", label).bold(), value);
    }

    if !report.last_violations.is_empty() {
        println!();
        println!("{}", "Last violations".bold());
        output::print_table(report.last_violations.iter().map(ViolationRow::from).collect());
    }

    if let Some(abort) = &report.last_abort {
        println!();
        let message = format!(
            "Last abort of {} ({}): {}",
            abort.operation,
            output::format_relative_time(abort.at, now),
            abort.outcome
        );
        match abort.outcome {
            AbortOutcome::Succeeded => output::print_success(&message),
            AbortOutcome::TooLate => output::print_warning(&message),
            AbortOutcome::Failed(_) => output::print_error(&message),
        }
    }
}

/// Label/value pairs for the table view
pub fn summary_lines(report: &StatusReport, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
    let state = match report.state {
        LoopState::Idle => "idle".normal(),
        LoopState::Monitoring => "monitoring".yellow(),
        LoopState::ShuttingDown => "shutting down".red(),
    };

    let operation = if report.operation_in_progress {
        report.current_operation.clone()
    } else {
        "none".to_string()
    };

    let last_cycle = report
        .last_cycle_at
        .map(|at| output::format_relative_time(at, now))
        .unwrap_or_else(|| "never".to_string());

    let mut lines = vec![
        ("State", state.to_string()),
        ("Operation", operation),
        ("Poll interval", output::format_duration(report.poll_interval_secs)),
        ("Cycles", report.cycles.to_string()),
        ("Last cycle", last_cycle),
        ("Aborts attempted", report.aborts_attempted.to_string()),
    ];
    if let Some(err) = &report.last_error {
        lines.push(("Last error", err.red().to_string()));
    }
    lines
}
