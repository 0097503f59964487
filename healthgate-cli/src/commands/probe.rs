//! Liveness and readiness checks against a running controller

use crate::api::ApiClient;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use healthgate_common::{LivenessResponse, ReadinessResponse};
use serde::Serialize;

#[derive(Serialize)]
struct ProbeReport {
    liveness: LivenessResponse,
    readiness: ReadinessResponse,
}

/// Query both probes; fails when the controller is not ready
pub async fn handle_probe_command(api: &ApiClient, output: &str) -> Result<()> {
    let (_, liveness): (_, LivenessResponse) = api.probe("/healthz").await?;
    let (code, readiness): (_, ReadinessResponse) = api.probe("/readyz").await?;

    match OutputFormat::parse(output) {
        OutputFormat::Table => {
            output::print_success(&format!(
                "Controller {} alive (up {})",
                liveness.version,
                output::format_duration(liveness.uptime_seconds as f64)
            ));
            if readiness.ready {
                output::print_success("Ready");
            }
        }
        format => {
            let report = ProbeReport {
                liveness,
                readiness: readiness.clone(),
            };
            if format == OutputFormat::Json {
                output::print_json(&report)?;
            } else {
                output::print_yaml(&report)?;
            }
        }
    }

    if !readiness.ready {
        anyhow::bail!("{}", not_ready_message(code.as_u16(), &readiness));
    }
    Ok(())
}

fn not_ready_message(code: u16, readiness: &ReadinessResponse) -> String {
    match &readiness.reason {
        Some(reason) => format!("Controller not ready ({}): {}", code, reason),
        None => format!("Controller not ready ({})", code),
    }
}
