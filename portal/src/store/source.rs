//! Report sources

use async_trait::async_trait;

use crate::errors::PortalError;
use crate::http::client::HttpClient;
use crate::models::manifest::Manifest;
use crate::models::report::DeploymentReport;

/// Where production-mode reports come from
///
/// Implemented by [`HttpClient`]; tests supply their own.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the full manifest
    async fn fetch_manifest(&self) -> Result<Manifest, PortalError>;

    /// Fetch a single report by ID
    async fn fetch_report(&self, id: &str) -> Result<DeploymentReport, PortalError>;
}

#[async_trait]
impl ReportSource for HttpClient {
    async fn fetch_manifest(&self) -> Result<Manifest, PortalError> {
        self.get_manifest().await
    }

    async fn fetch_report(&self, id: &str) -> Result<DeploymentReport, PortalError> {
        self.get_report(id).await
    }
}
