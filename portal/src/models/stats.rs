//! Aggregate statistics models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::report::Environment;

/// Summary of the deployments that targeted one environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentStats {
    pub environment: Environment,

    pub total_deployments: usize,

    /// Fraction of successful deployments in `[0, 1]`
    pub success_rate: f64,

    /// Mean duration in seconds, missing durations counted as zero
    pub average_duration: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_deployment: Option<DateTime<Utc>>,
}

/// Totals across all environments, weighted by deployment count
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_deployments: usize,
    pub success_rate: f64,
    pub average_duration: f64,
}
