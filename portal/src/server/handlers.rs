//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::filter::stats::{compute_stats, summarize};
use crate::models::filter::{DateRange, FilterSpec};
use crate::models::report::{DeploymentReport, DeploymentStatus, Environment};
use crate::models::stats::{EnvironmentStats, OverallStats};
use crate::server::state::ServerState;
use crate::utils::version_info;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "deploy-portal".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    Json(version_info())
}

/// Query parameters accepted by the report listing
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub environment: Option<Environment>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<DeploymentStatus>,
    pub author: Option<String>,
    pub branch: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

// A blank select (`?environment=`) means "any".
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr<Err = String>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => value.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl ReportQuery {
    pub fn into_filter(self) -> FilterSpec {
        FilterSpec {
            environment: self.environment,
            status: self.status,
            author: self.author,
            branch: self.branch,
            date_range: DateRange::between(self.since, self.until),
        }
    }
}

/// Report listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportsResponse {
    pub reports: Vec<DeploymentReport>,
    pub total: usize,
}

/// Report listing handler
pub async fn reports_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let filter = query.into_filter();
    let reports = state.store.list_reports(Some(&filter)).await;
    let total = reports.len();
    Json(ReportsResponse { reports, total })
}

/// Single report handler
pub async fn report_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .store
        .get_report(&id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Statistics response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub environments: Vec<EnvironmentStats>,
    pub overall: OverallStats,
}

/// Statistics handler, always over the unfiltered report set
pub async fn stats_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let reports = state.store.list_reports(None).await;
    let environments = compute_stats(&reports);
    let overall = summarize(&environments);
    Json(StatsResponse {
        environments,
        overall,
    })
}
