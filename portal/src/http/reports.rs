//! Report API client

use crate::errors::PortalError;
use crate::http::client::HttpClient;
use crate::models::manifest::Manifest;
use crate::models::report::DeploymentReport;

impl HttpClient {
    /// Fetch the published manifest
    pub async fn get_manifest(&self) -> Result<Manifest, PortalError> {
        self.get_json(&["reports", "manifest.json"]).await
    }

    /// Fetch a single report by ID
    pub async fn get_report(&self, id: &str) -> Result<DeploymentReport, PortalError> {
        let file_name = format!("{}.json", id);
        self.get_json(&["reports", &file_name]).await
    }
}
