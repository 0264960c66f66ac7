//! Per-environment statistics

use crate::models::report::{DeploymentReport, DeploymentStatus, Environment};
use crate::models::stats::{EnvironmentStats, OverallStats};

/// Compute one entry per environment (dev, staging, prod), including
/// environments with no reports
pub fn compute_stats(reports: &[DeploymentReport]) -> Vec<EnvironmentStats> {
    Environment::ALL
        .iter()
        .map(|env| environment_stats(*env, reports))
        .collect()
}

fn environment_stats(environment: Environment, reports: &[DeploymentReport]) -> EnvironmentStats {
    let env_reports: Vec<&DeploymentReport> = reports
        .iter()
        .filter(|r| r.environment == environment)
        .collect();

    let total = env_reports.len();
    let successful = env_reports
        .iter()
        .filter(|r| r.status == DeploymentStatus::Success)
        .count();
    let total_duration: f64 = env_reports
        .iter()
        .map(|r| r.duration.unwrap_or(0.0))
        .sum();

    EnvironmentStats {
        environment,
        total_deployments: total,
        success_rate: ratio(successful as f64, total),
        average_duration: ratio(total_duration, total),
        last_deployment: env_reports.iter().map(|r| r.timestamp).max(),
    }
}

/// Fold per-environment entries into overall totals
pub fn summarize(stats: &[EnvironmentStats]) -> OverallStats {
    let total: usize = stats.iter().map(|s| s.total_deployments).sum();
    let weighted_success: f64 = stats
        .iter()
        .map(|s| s.success_rate * s.total_deployments as f64)
        .sum();
    let weighted_duration: f64 = stats
        .iter()
        .map(|s| s.average_duration * s.total_deployments as f64)
        .sum();

    OverallStats {
        total_deployments: total,
        success_rate: ratio(weighted_success, total),
        average_duration: ratio(weighted_duration, total),
    }
}

fn ratio(numerator: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        numerator / count as f64
    }
}
