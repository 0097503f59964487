//! Threshold policy commands

use crate::api::ApiClient;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use healthgate_common::{Measurement, StatusReport, ThresholdPolicy};
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
pub struct ThresholdRow {
    #[tabled(rename = "MEASUREMENT")]
    pub measurement: String,
    #[tabled(rename = "THRESHOLD")]
    pub threshold: u64,
    #[tabled(rename = "UNIT")]
    pub unit: String,
}

/// One row per configured threshold, in measurement order
pub fn threshold_rows(policy: &ThresholdPolicy) -> Vec<ThresholdRow> {
    Measurement::ALL
        .iter()
        .filter_map(|m| {
            policy.threshold_for(*m).map(|threshold| ThresholdRow {
                measurement: m.to_string(),
                threshold,
                unit: unit(*m).to_string(),
            })
        })
        .collect()
}

fn unit(m: Measurement) -> &'static str {
    if m.is_percent() {
        "%"
    } else {
        "count"
    }
}

pub async fn handle_thresholds_command(api: &ApiClient, output: &str) -> Result<()> {
    let report: StatusReport = api.get("/status").await?;
    let format = OutputFormat::parse(output);

    match format {
        OutputFormat::Table => output::print_table(threshold_rows(&report.thresholds)),
        OutputFormat::Json => output::print_json(&report.thresholds)?,
        OutputFormat::Yaml => output::print_yaml(&report.thresholds)?,
    }
    Ok(())
}
