//! Embedded sample reports

use tracing::error;

use crate::models::report::DeploymentReport;

const FALLBACK_REPORTS_JSON: &str = include_str!("fallback_reports.json");

/// The built-in dataset served in development mode and whenever the remote
/// manifest cannot be used
pub fn fallback_reports() -> Vec<DeploymentReport> {
    serde_json::from_str(FALLBACK_REPORTS_JSON).unwrap_or_else(|e| {
        error!("Embedded fallback reports are invalid: {}", e);
        Vec::new()
    })
}
