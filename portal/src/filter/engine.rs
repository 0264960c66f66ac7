//! Filter application and ordering

use crate::models::filter::FilterSpec;
use crate::models::report::DeploymentReport;

/// Return the reports matching `filter`, newest first
///
/// The input is left untouched; reports with equal timestamps keep their
/// relative input order.
pub fn apply(reports: &[DeploymentReport], filter: &FilterSpec) -> Vec<DeploymentReport> {
    let mut filtered: Vec<DeploymentReport> = reports
        .iter()
        .filter(|report| matches(report, filter))
        .cloned()
        .collect();
    sort_newest_first(&mut filtered);
    filtered
}

/// Check a single report against every present filter field
pub fn matches(report: &DeploymentReport, filter: &FilterSpec) -> bool {
    if filter.environment.is_some_and(|env| env != report.environment) {
        return false;
    }
    if filter.status.is_some_and(|status| status != report.status) {
        return false;
    }
    if let Some(author) = &filter.author {
        if !contains_ignore_case(&report.author, author) {
            return false;
        }
    }
    if let Some(branch) = &filter.branch {
        if !contains_ignore_case(&report.branch, branch) {
            return false;
        }
    }
    if let Some(range) = &filter.date_range {
        if !range.contains(&report.timestamp) {
            return false;
        }
    }
    true
}

/// Stable sort by timestamp, most recent first
pub fn sort_newest_first(reports: &mut [DeploymentReport]) {
    reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

// An empty needle matches everything.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
