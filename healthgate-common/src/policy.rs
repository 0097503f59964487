//! Threshold policy: maximum allowed value per measurement

use crate::Measurement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Threshold validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("{measurement} must be between 0 and 100, got: {value}")]
    PercentOutOfRange { measurement: Measurement, value: u64 },
}

/// Mapping from measurement to maximum allowed value.
///
/// A reading equal to its threshold is compliant; only `observed > threshold`
/// is a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdPolicy {
    thresholds: BTreeMap<Measurement, u64>,
}

impl ThresholdPolicy {
    /// Policy with no thresholds at all
    pub fn empty() -> Self {
        Self {
            thresholds: BTreeMap::new(),
        }
    }

    pub fn with(mut self, measurement: Measurement, threshold: u64) -> Self {
        self.set(measurement, threshold);
        self
    }

    pub fn set(&mut self, measurement: Measurement, threshold: u64) {
        self.thresholds.insert(measurement, threshold);
    }

    pub fn threshold_for(&self, measurement: Measurement) -> Option<u64> {
        self.thresholds.get(&measurement).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measurement, u64)> + '_ {
        self.thresholds.iter().map(|(m, v)| (*m, *v))
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Check that every percent-typed threshold lies in [0,100]
    pub fn validate(&self) -> Result<(), PolicyError> {
        for (measurement, value) in self.iter() {
            if measurement.is_percent() && value > 100 {
                return Err(PolicyError::PercentOutOfRange { measurement, value });
            }
        }
        Ok(())
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::empty()
            .with(Measurement::CrashingPodsPercent, 10)
            .with(Measurement::PendingPodsPercent, 15)
            .with(Measurement::NotReadyNodesPercent, 25)
            .with(Measurement::FailedJobs, 3)
            .with(Measurement::RestartCount, 20)
            .with(Measurement::CpuUsagePercent, 85)
            .with(Measurement::MemoryUsagePercent, 90)
    }
}

impl FromIterator<(Measurement, u64)> for ThresholdPolicy {
    fn from_iter<I: IntoIterator<Item = (Measurement, u64)>>(iter: I) -> Self {
        Self {
            thresholds: iter.into_iter().collect(),
        }
    }
}
