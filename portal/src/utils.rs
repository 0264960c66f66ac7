//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information for the portal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("PORTAL_GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("PORTAL_BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Format seconds as "Xm Ys"
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}m {}s", total / 60, total % 60)
}

/// Format a report's optional duration, "N/A" when unknown or zero
pub fn format_report_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) if secs > 0.0 => format_duration(secs),
        _ => "N/A".to_string(),
    }
}

/// Format a ratio in `[0, 1]` as a whole percentage
pub fn format_percentage(value: f64) -> String {
    format!("{}%", (value * 100.0).round())
}
