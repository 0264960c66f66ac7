//! Filter specification models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::report::{DeploymentStatus, Environment};

/// Inclusive time window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Window from optional bounds; a missing bound is open-ended, and no
    /// bounds at all means no window
    pub fn between(since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Option<Self> {
        match (since, until) {
            (None, None) => None,
            (since, until) => Some(Self {
                start: since.unwrap_or(DateTime::<Utc>::MIN_UTC),
                end: until.unwrap_or(DateTime::<Utc>::MAX_UTC),
            }),
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}

/// User-selected filter predicate
///
/// Present fields are combined with AND. `None` imposes no constraint, while
/// `Some("")` for `author` or `branch` matches every report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,

    /// Case-insensitive substring of the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Case-insensitive substring of the branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterSpec {
    /// True if any field carries a non-empty value
    pub fn has_active_filters(&self) -> bool {
        self.environment.is_some()
            || self.status.is_some()
            || self.author.as_deref().is_some_and(|a| !a.is_empty())
            || self.branch.as_deref().is_some_and(|b| !b.is_empty())
            || self.date_range.is_some()
    }
}
