//! Report store unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use deploy_portal::app::options::RuntimeMode;
use deploy_portal::errors::PortalError;
use deploy_portal::filter::engine::sort_newest_first;
use deploy_portal::models::filter::FilterSpec;
use deploy_portal::models::manifest::Manifest;
use deploy_portal::models::report::{DeploymentReport, DeploymentStatus, Environment};
use deploy_portal::store::fallback::fallback_reports;
use deploy_portal::store::reports::{ReportOrigin, ReportStore};
use deploy_portal::store::source::ReportSource;

fn create_test_report(id: &str, timestamp: &str, environment: Environment) -> DeploymentReport {
    DeploymentReport {
        id: id.to_string(),
        timestamp: timestamp.parse().unwrap(),
        environment,
        branch: "main".to_string(),
        commit: "abc1234".to_string(),
        status: DeploymentStatus::Success,
        duration: Some(120.0),
        changes: vec![],
        author: "ci-bot".to_string(),
        message: format!("Remote deployment {}", id),
        url: Some(format!("https://ci.example.com/runs/{}", id)),
        terragrunt_output: None,
        digger_comment: None,
    }
}

fn expected_fallback() -> Vec<DeploymentReport> {
    let mut reports = fallback_reports();
    sort_newest_first(&mut reports);
    reports
}

/// Source that serves a fixed manifest
struct StaticSource {
    reports: Vec<DeploymentReport>,
    calls: AtomicUsize,
}

impl StaticSource {
    fn new(reports: Vec<DeploymentReport>) -> Self {
        Self {
            reports,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ReportSource for StaticSource {
    async fn fetch_manifest(&self) -> Result<Manifest, PortalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Manifest {
            reports: self.reports.clone(),
        })
    }

    async fn fetch_report(&self, id: &str) -> Result<DeploymentReport, PortalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reports
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| PortalError::StatusError {
                status: http::StatusCode::NOT_FOUND,
                url: format!("/reports/{}.json", id),
            })
    }
}

/// Source whose every request fails
struct FailingSource;

#[async_trait]
impl ReportSource for FailingSource {
    async fn fetch_manifest(&self) -> Result<Manifest, PortalError> {
        Err(PortalError::StatusError {
            status: http::StatusCode::NOT_FOUND,
            url: "/reports/manifest.json".to_string(),
        })
    }

    async fn fetch_report(&self, _id: &str) -> Result<DeploymentReport, PortalError> {
        Err(PortalError::ConfigError("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_development_mode_serves_fallback_without_fetching() {
    let source = Arc::new(StaticSource::new(vec![create_test_report(
        "remote-1",
        "2025-03-01T00:00:00Z",
        Environment::Prod,
    )]));
    let store = ReportStore::with_source(RuntimeMode::Development, source.clone());

    let reports = store.list_reports(None).await;
    assert_eq!(reports, expected_fallback());
    assert_eq!(reports.len(), 3);

    assert!(store.get_report("2").await.is_some());
    assert!(store.get_report("remote-1").await.is_none());
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_production_mode_uses_manifest() {
    let source = Arc::new(StaticSource::new(vec![
        create_test_report("r1", "2025-03-01T00:00:00Z", Environment::Dev),
        create_test_report("r2", "2025-03-02T00:00:00Z", Environment::Prod),
    ]));
    let store = ReportStore::with_source(RuntimeMode::Production, source.clone());

    let (_, origin) = store.resolve_reports().await;
    assert_eq!(origin, ReportOrigin::Remote);

    let reports = store.list_reports(None).await;
    let ids: Vec<_> = reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r1"]);

    // One fetch per call, nothing cached
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_production_mode_falls_back_on_failure() {
    let store = ReportStore::with_source(RuntimeMode::Production, Arc::new(FailingSource));

    let (_, origin) = store.resolve_reports().await;
    assert_eq!(origin, ReportOrigin::Fallback);
    assert_eq!(store.list_reports(None).await, expected_fallback());
}

#[tokio::test]
async fn test_filter_applies_to_fallback() {
    let store = ReportStore::with_source(RuntimeMode::Production, Arc::new(FailingSource));
    let filter = FilterSpec {
        environment: Some(Environment::Staging),
        author: Some("MOT".to_string()),
        ..Default::default()
    };

    let reports = store.list_reports(Some(&filter)).await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, "2");
}

#[tokio::test]
async fn test_get_report_falls_back_then_returns_none() {
    let store = ReportStore::with_source(RuntimeMode::Production, Arc::new(FailingSource));

    let report = store.get_report("3").await;
    assert_eq!(report.map(|r| r.environment), Some(Environment::Prod));
    assert!(store.get_report("nonexistent").await.is_none());
}

#[tokio::test]
async fn test_get_report_prefers_remote() {
    let source = Arc::new(StaticSource::new(vec![create_test_report(
        "1",
        "2025-03-01T00:00:00Z",
        Environment::Prod,
    )]));
    let store = ReportStore::with_source(RuntimeMode::Production, source);

    let report = store.get_report("1").await.unwrap();
    assert_eq!(report.message, "Remote deployment 1");
}

#[tokio::test]
async fn test_duplicate_ids_keep_first() {
    let mut duplicate = create_test_report("r1", "2025-04-01T00:00:00Z", Environment::Dev);
    duplicate.message = "duplicate".to_string();
    let source = Arc::new(StaticSource::new(vec![
        create_test_report("r1", "2025-03-01T00:00:00Z", Environment::Dev),
        duplicate,
    ]));
    let store = ReportStore::with_source(RuntimeMode::Production, source);

    let reports = store.list_reports(None).await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].message, "Remote deployment r1");
}

/// Source whose first manifest request waits until released
struct GatedSource {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl ReportSource for GatedSource {
    async fn fetch_manifest(&self) -> Result<Manifest, PortalError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(Manifest::default())
    }

    async fn fetch_report(&self, id: &str) -> Result<DeploymentReport, PortalError> {
        Err(PortalError::ConfigError(format!("no report {}", id)))
    }
}

#[tokio::test]
async fn test_stale_listing_is_discarded() {
    let (release, gate) = oneshot::channel();
    let source = Arc::new(GatedSource {
        gate: Mutex::new(Some(gate)),
    });
    let store = ReportStore::with_source(RuntimeMode::Production, source);

    let (first, second) = tokio::join!(store.list_reports_latest(None), async {
        // Let the first listing take its ticket and block on the gate
        tokio::task::yield_now().await;
        let result = store.list_reports_latest(None).await;
        let _ = release.send(());
        result
    });

    assert!(first.is_none());
    assert_eq!(second, Some(vec![]));
}

#[tokio::test]
async fn test_single_listing_is_current() {
    let store = ReportStore::with_source(RuntimeMode::Development, Arc::new(FailingSource));
    let reports = store.list_reports_latest(None).await;
    assert_eq!(reports, Some(expected_fallback()));
}
