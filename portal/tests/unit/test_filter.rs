//! Filter engine unit tests

use deploy_portal::filter::engine::{apply, matches};
use deploy_portal::models::filter::{DateRange, FilterSpec};
use deploy_portal::models::report::{DeploymentReport, DeploymentStatus, Environment};

fn create_test_report(
    id: &str,
    timestamp: &str,
    environment: Environment,
    status: DeploymentStatus,
    author: &str,
    branch: &str,
) -> DeploymentReport {
    DeploymentReport {
        id: id.to_string(),
        timestamp: timestamp.parse().unwrap(),
        environment,
        branch: branch.to_string(),
        commit: "abc1234".to_string(),
        status,
        duration: Some(60.0),
        changes: vec![],
        author: author.to_string(),
        message: format!("Deployment {}", id),
        url: None,
        terragrunt_output: None,
        digger_comment: None,
    }
}

fn sample_reports() -> Vec<DeploymentReport> {
    vec![
        create_test_report("a", "2025-01-10T10:00:00Z", Environment::Dev, DeploymentStatus::Success, "motty", "feat/portal"),
        create_test_report("b", "2025-01-12T10:00:00Z", Environment::Prod, DeploymentStatus::Failed, "alice", "main"),
        create_test_report("c", "2025-01-11T10:00:00Z", Environment::Staging, DeploymentStatus::Running, "Motty", "feat/Aurora"),
        create_test_report("d", "2025-01-11T10:00:00Z", Environment::Prod, DeploymentStatus::Success, "bob", "hotfix/db"),
    ]
}

fn ids(reports: &[DeploymentReport]) -> Vec<&str> {
    reports.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_empty_filter_sorts_newest_first() {
    let reports = sample_reports();
    let result = apply(&reports, &FilterSpec::default());

    assert_eq!(result.len(), reports.len());
    // c and d share a timestamp and keep their input order
    assert_eq!(ids(&result), vec!["b", "c", "d", "a"]);
}

#[test]
fn test_apply_does_not_mutate_input() {
    let reports = sample_reports();
    let _ = apply(&reports, &FilterSpec::default());
    assert_eq!(ids(&reports), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_environment_filter() {
    let filter = FilterSpec {
        environment: Some(Environment::Prod),
        ..Default::default()
    };
    let result = apply(&sample_reports(), &filter);
    assert_eq!(ids(&result), vec!["b", "d"]);
}

#[test]
fn test_status_filter() {
    let filter = FilterSpec {
        status: Some(DeploymentStatus::Success),
        ..Default::default()
    };
    let result = apply(&sample_reports(), &filter);
    assert_eq!(ids(&result), vec!["d", "a"]);
}

#[test]
fn test_author_filter_is_case_insensitive() {
    let filter = FilterSpec {
        author: Some("MOT".to_string()),
        ..Default::default()
    };
    let result = apply(&sample_reports(), &filter);
    assert_eq!(ids(&result), vec!["c", "a"]);
}

#[test]
fn test_branch_filter_is_substring() {
    let filter = FilterSpec {
        branch: Some("feat/".to_string()),
        ..Default::default()
    };
    let result = apply(&sample_reports(), &filter);
    assert_eq!(ids(&result), vec!["c", "a"]);

    let filter = FilterSpec {
        branch: Some("aurora".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&apply(&sample_reports(), &filter)), vec!["c"]);
}

#[test]
fn test_empty_author_matches_everything() {
    let filter = FilterSpec {
        author: Some(String::new()),
        branch: Some(String::new()),
        ..Default::default()
    };
    let result = apply(&sample_reports(), &filter);
    assert_eq!(result.len(), 4);
}

#[test]
fn test_filters_are_conjunctive() {
    let filter = FilterSpec {
        environment: Some(Environment::Prod),
        status: Some(DeploymentStatus::Success),
        author: Some("bo".to_string()),
        ..Default::default()
    };
    let result = apply(&sample_reports(), &filter);
    assert_eq!(ids(&result), vec!["d"]);

    let filter = FilterSpec {
        environment: Some(Environment::Dev),
        author: Some("alice".to_string()),
        ..Default::default()
    };
    assert!(apply(&sample_reports(), &filter).is_empty());
}

#[test]
fn test_date_range_filter() {
    let filter = FilterSpec {
        date_range: Some(DateRange {
            start: "2025-01-11T00:00:00Z".parse().unwrap(),
            end: "2025-01-11T10:00:00Z".parse().unwrap(),
        }),
        ..Default::default()
    };
    let result = apply(&sample_reports(), &filter);
    assert_eq!(ids(&result), vec!["c", "d"]);
}

#[test]
fn test_every_result_matches_filter() {
    let reports = sample_reports();
    let filters = vec![
        FilterSpec {
            environment: Some(Environment::Staging),
            ..Default::default()
        },
        FilterSpec {
            status: Some(DeploymentStatus::Failed),
            branch: Some("MAIN".to_string()),
            ..Default::default()
        },
        FilterSpec {
            author: Some("nobody".to_string()),
            ..Default::default()
        },
    ];

    for filter in &filters {
        let result = apply(&reports, filter);
        assert!(result.len() <= reports.len());
        assert!(result.iter().all(|r| matches(r, filter)));
        assert!(result
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }
}
