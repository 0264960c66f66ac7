//! Deployment Portal - Entry Point
//!
//! Lists deployment reports, shows single reports and per-environment
//! statistics, or serves them as a local JSON API.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use colored::Colorize;
use tracing::{error, info};

use deploy_portal::app::options::RuntimeMode;
use deploy_portal::filesys::file::File;
use deploy_portal::filter::stats::{compute_stats, summarize};
use deploy_portal::logs::{init_logging, LogLevel};
use deploy_portal::models::filter::{DateRange, FilterSpec};
use deploy_portal::models::report::{DeploymentReport, DeploymentStatus, Environment};
use deploy_portal::server::serve::serve;
use deploy_portal::server::state::ServerState;
use deploy_portal::storage::settings::Settings;
use deploy_portal::store::reports::ReportStore;
use deploy_portal::utils::{format_duration, format_percentage, format_report_duration, version_info};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    if let Err(e) = run(cli_args).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli_args: HashMap<String, String>) -> anyhow::Result<()> {
    // Print version and exit
    if cli_args.contains_key("version") {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(());
    }

    let mut settings = match cli_args.get("settings") {
        Some(path) => Settings::load(&File::new(path))
            .await
            .with_context(|| format!("unable to read settings file {}", path))?,
        None => Settings::default(),
    };

    // Command line and environment override the settings file
    let env_mode = env::var("PORTAL_MODE").ok().map(|v| RuntimeMode::from_env_value(&v));
    if cli_args.contains_key("dev") || env_mode == Some(RuntimeMode::Development) {
        settings.development_mode = true;
    }
    if let Some(base_url) = cli_args.get("base-url") {
        settings.base_url = Some(base_url.clone());
    }
    if let Some(level) = cli_args.get("log-level") {
        settings.log_level = level.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    settings.validate()?;

    if let Err(e) = init_logging(settings.log_options()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let options = settings.to_options();
    let store = Arc::new(ReportStore::new(&options.store).context("unable to create report store")?);
    let as_json = cli_args.contains_key("json");

    if cli_args.contains_key("serve") {
        info!("Running deployment portal with options: {:?}", options);
        let state = Arc::new(ServerState::new(store));
        let handle = serve(&options.server, state, await_shutdown_signal()).await?;
        return handle.await.map_err(|e| anyhow!(e))?.map_err(Into::into);
    }

    if let Some(id) = cli_args.get("report") {
        let report = store
            .get_report(id)
            .await
            .ok_or_else(|| anyhow!("report {} not found", id))?;
        if as_json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report_detail(&report);
        }
        return Ok(());
    }

    if cli_args.contains_key("stats") {
        let reports = store.list_reports(None).await;
        let environments = compute_stats(&reports);
        let overall = summarize(&environments);
        if as_json {
            let body = serde_json::json!({ "environments": environments, "overall": overall });
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            println!(
                "{} deployments, {} success, avg {}",
                overall.total_deployments,
                format_percentage(overall.success_rate),
                format_duration(overall.average_duration)
            );
            for stats in &environments {
                let last = stats
                    .last_deployment
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "  {:<8} {:>4} deployments  {:>4} success  avg {:<8} last {}",
                    stats.environment.as_str().bold(),
                    stats.total_deployments,
                    format_percentage(stats.success_rate),
                    format_duration(stats.average_duration),
                    last
                );
            }
        }
        return Ok(());
    }

    let filter = filter_from_args(&cli_args)?;
    let reports = store.list_reports(Some(&filter)).await;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if reports.is_empty() {
        if filter.has_active_filters() {
            println!("No reports match the current filters.");
        } else {
            println!("No deployment reports are available yet.");
        }
    } else {
        for report in &reports {
            print_report_line(report);
        }
        let noun = if reports.len() == 1 { "result" } else { "results" };
        println!("({} {})", reports.len(), noun);
    }

    Ok(())
}

fn filter_from_args(cli_args: &HashMap<String, String>) -> anyhow::Result<FilterSpec> {
    let environment = cli_args
        .get("environment")
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<Environment>())
        .transpose()
        .map_err(|e| anyhow!(e))?;
    let status = cli_args
        .get("status")
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<DeploymentStatus>())
        .transpose()
        .map_err(|e| anyhow!(e))?;

    let since = cli_args
        .get("since")
        .map(|v| v.parse::<DateTime<Utc>>())
        .transpose()
        .context("--since must be an RFC 3339 timestamp")?;
    let until = cli_args
        .get("until")
        .map(|v| v.parse::<DateTime<Utc>>())
        .transpose()
        .context("--until must be an RFC 3339 timestamp")?;

    Ok(FilterSpec {
        environment,
        status,
        author: cli_args.get("author").cloned(),
        branch: cli_args.get("branch").cloned(),
        date_range: DateRange::between(since, until),
    })
}

fn colored_status(status: DeploymentStatus) -> colored::ColoredString {
    match status {
        DeploymentStatus::Success => status.as_str().green(),
        DeploymentStatus::Failed => status.as_str().red(),
        DeploymentStatus::Running => status.as_str().yellow(),
    }
}

fn print_report_line(report: &DeploymentReport) {
    let summary = report.change_summary();
    let changes = if summary.has_mutations() {
        format!(
            "+{} create ~{} update -{} delete",
            summary.create, summary.update, summary.delete
        )
    } else {
        "no changes".to_string()
    };
    println!(
        "{:<4} {} {:<8} {:<8} {} {} ({}) {}  {}",
        report.id,
        report.timestamp.format("%Y-%m-%d %H:%M"),
        report.environment.as_str(),
        colored_status(report.status),
        report.commit.dimmed(),
        report.branch,
        report.author,
        changes,
        report.message
    );
}

fn print_report_detail(report: &DeploymentReport) {
    println!("{} {}", report.message.bold(), colored_status(report.status));
    println!("  id:          {}", report.id);
    println!("  environment: {}", report.environment);
    println!("  branch:      {} @ {}", report.branch, report.commit);
    println!("  author:      {}", report.author);
    println!("  timestamp:   {}", report.timestamp.to_rfc3339());
    println!("  duration:    {}", format_report_duration(report.duration));
    if let Some(url) = &report.url {
        println!("  url:         {}", url);
    }
    if !report.changes.is_empty() {
        println!("  changes:");
        for change in &report.changes {
            println!(
                "    {:<10} {} ({})",
                change.action.as_str().to_uppercase(),
                change.resource,
                change.resource_type
            );
            if let Some(details) = &change.details {
                println!("               {}", details);
            }
        }
    }
    if let Some(output) = &report.terragrunt_output {
        println!("  terragrunt output:\n{}", output);
    }
    if let Some(comment) = &report.digger_comment {
        println!("  digger comment:\n{}", comment);
    }
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                error!("Unable to listen for SIGTERM: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for Ctrl+C: {}", e);
        }
        info!("Ctrl+C received, shutting down...");
    }
}
