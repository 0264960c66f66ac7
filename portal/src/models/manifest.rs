//! Remote manifest model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::report::DeploymentReport;

/// The published list of reports (`reports/manifest.json`)
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Manifest {
    pub reports: Vec<DeploymentReport>,
}

impl<'de> Deserialize<'de> for Manifest {
    /// The document itself must be a JSON object, but an absent or malformed
    /// `reports` field yields an empty manifest. Individual reports that fail
    /// to decode are skipped.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut document = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let reports = match document.remove("reports") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => decode_reports(entries),
            Some(other) => {
                warn!("Manifest reports field is not an array, treating as empty: {}", other);
                Vec::new()
            }
        };
        Ok(Self { reports })
    }
}

fn decode_reports(entries: Vec<Value>) -> Vec<DeploymentReport> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Skipping malformed manifest report at index {}: {}", index, e);
                None
            }
        })
        .collect()
}
