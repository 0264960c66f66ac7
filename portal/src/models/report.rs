//! Deployment report models

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Target environment of a deployment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    /// Every environment, in display order
    pub const ALL: [Environment; 3] = [Environment::Dev, Environment::Staging, Environment::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Outcome of a deployment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Success,
    Failed,
    Running,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Success => "success",
            DeploymentStatus::Failed => "failed",
            DeploymentStatus::Running => "running",
        }
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(DeploymentStatus::Success),
            "failed" => Ok(DeploymentStatus::Failed),
            "running" => Ok(DeploymentStatus::Running),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// Kind of mutation applied to a resource
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
    NoChange,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
            ChangeAction::NoChange => "no-change",
        }
    }
}

/// One infrastructure mutation within a report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceChange {
    pub action: ChangeAction,

    /// Resource identifier (e.g. "db-aurora-1-staging")
    pub resource: String,

    /// Resource type (e.g. "aurora_cluster")
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Record of one deployment attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReport {
    /// Unique report ID
    pub id: String,

    pub timestamp: DateTime<Utc>,

    pub environment: Environment,

    pub branch: String,

    /// Short commit hash
    pub commit: String,

    pub status: DeploymentStatus,

    /// Duration in seconds, possibly fractional
    #[serde(
        default,
        deserialize_with = "deserialize_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<f64>,

    #[serde(default)]
    pub changes: Vec<ResourceChange>,

    pub author: String,

    /// Commit or pull request message
    pub message: String,

    /// Link to the pipeline run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terragrunt_output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digger_comment: Option<String>,
}

impl DeploymentReport {
    /// Count the report's changes by action
    pub fn change_summary(&self) -> ChangeSummary {
        self.changes
            .iter()
            .fold(ChangeSummary::default(), |mut summary, change| {
                match change.action {
                    ChangeAction::Create => summary.create += 1,
                    ChangeAction::Update => summary.update += 1,
                    ChangeAction::Delete => summary.delete += 1,
                    ChangeAction::NoChange => summary.no_change += 1,
                }
                summary
            })
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(secs) if !secs.is_finite() || secs < 0.0 => Err(de::Error::custom(format!(
            "duration must be a non-negative number of seconds, got {}",
            secs
        ))),
        duration => Ok(duration),
    }
}

/// Per-action change counts for a single report
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub no_change: usize,
}

impl ChangeSummary {
    /// True when the report would mutate at least one resource
    pub fn has_mutations(&self) -> bool {
        self.create + self.update + self.delete > 0
    }
}
