//! Liveness and readiness probes

use healthgate_common::{LivenessResponse, ReadinessResponse};
use std::time::Instant;

use crate::controller::StatusHandle;

pub struct HealthChecker {
    start_time: Instant,
    version: String,
}

impl HealthChecker {
    pub fn new(version: &str) -> Self {
        Self {
            start_time: Instant::now(),
            version: version.to_string(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// The process is alive as long as it can answer
    pub fn liveness(&self) -> LivenessResponse {
        LivenessResponse {
            alive: true,
            version: self.version.clone(),
            uptime_seconds: self.uptime_seconds(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Ready unless shutting down or the last operation status query failed
    pub async fn readiness(&self, status: &StatusHandle) -> ReadinessResponse {
        let (ready, reason) = match status.readiness().await {
            Ok(()) => (true, None),
            Err(reason) => (false, Some(reason)),
        };

        ReadinessResponse {
            ready,
            reason,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
