//! Deployment report store

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::app::options::{RuntimeMode, StoreOptions};
use crate::errors::PortalError;
use crate::filter::engine;
use crate::http::client::HttpClient;
use crate::models::filter::FilterSpec;
use crate::models::report::DeploymentReport;
use crate::store::fallback::fallback_reports;
use crate::store::sequence::RequestSequence;
use crate::store::source::ReportSource;

/// Where a resolved set of reports came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOrigin {
    /// The published manifest
    Remote,

    /// The embedded dataset
    Fallback,
}

/// Resolves deployment reports
///
/// Lookups never fail: transport errors, bad statuses, and malformed payloads
/// all degrade to the embedded dataset (or to `None` for single lookups).
pub struct ReportStore {
    mode: RuntimeMode,
    source: Arc<dyn ReportSource>,
    fallback: Vec<DeploymentReport>,
    sequence: RequestSequence,
}

impl ReportStore {
    /// Create a store backed by the report host in `options`
    pub fn new(options: &StoreOptions) -> Result<Self, PortalError> {
        let client = HttpClient::new(&options.base_url, options.request_timeout)?;
        info!(
            "Report store using {} in {:?} mode",
            client.base_url(),
            options.mode
        );
        Ok(Self::with_source(options.mode, Arc::new(client)))
    }

    /// Create a store backed by an arbitrary source
    pub fn with_source(mode: RuntimeMode, source: Arc<dyn ReportSource>) -> Self {
        Self {
            mode,
            source,
            fallback: fallback_reports(),
            sequence: RequestSequence::new(),
        }
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// List reports newest first, optionally filtered
    pub async fn list_reports(&self, filter: Option<&FilterSpec>) -> Vec<DeploymentReport> {
        let (reports, _) = self.resolve_reports().await;
        match filter {
            Some(filter) => engine::apply(&reports, filter),
            None => {
                let mut reports = reports;
                engine::sort_newest_first(&mut reports);
                reports
            }
        }
    }

    /// Like [`list_reports`](Self::list_reports), but returns `None` if another
    /// call was issued while this one was in flight
    pub async fn list_reports_latest(
        &self,
        filter: Option<&FilterSpec>,
    ) -> Option<Vec<DeploymentReport>> {
        let ticket = self.sequence.issue();
        let reports = self.list_reports(filter).await;

        if self.sequence.is_latest(ticket) {
            Some(reports)
        } else {
            debug!("Discarding stale report listing (request {})", ticket.number());
            None
        }
    }

    /// Look up a single report by ID
    #[instrument(skip(self))]
    pub async fn get_report(&self, id: &str) -> Option<DeploymentReport> {
        if !self.mode.is_development() {
            match self.source.fetch_report(id).await {
                Ok(report) => return Some(report),
                Err(e) => warn!("Failed to fetch report {}, using fallback: {}", id, e),
            }
        }

        self.fallback.iter().find(|r| r.id == id).cloned()
    }

    /// Resolve the full, unfiltered set of reports and their origin
    #[instrument(skip(self))]
    pub async fn resolve_reports(&self) -> (Vec<DeploymentReport>, ReportOrigin) {
        if self.mode.is_development() {
            debug!("Development mode, serving {} fallback reports", self.fallback.len());
            return (self.fallback.clone(), ReportOrigin::Fallback);
        }

        match self.source.fetch_manifest().await {
            Ok(manifest) => {
                debug!("Fetched manifest with {} reports", manifest.reports.len());
                (dedup_by_id(manifest.reports), ReportOrigin::Remote)
            }
            Err(e) => {
                warn!("Failed to fetch report manifest, using fallback: {}", e);
                (self.fallback.clone(), ReportOrigin::Fallback)
            }
        }
    }
}

// Keeps the first report for each ID.
fn dedup_by_id(reports: Vec<DeploymentReport>) -> Vec<DeploymentReport> {
    let mut seen = HashSet::new();
    reports
        .into_iter()
        .filter(|report| {
            let fresh = seen.insert(report.id.clone());
            if !fresh {
                warn!("Dropping duplicate report {} from manifest", report.id);
            }
            fresh
        })
        .collect()
}
