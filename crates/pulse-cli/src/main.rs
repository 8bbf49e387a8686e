//! pulse - report recent member activity across a GitHub organization.
//!
//! For every configured organization, pulse collects the member roster and
//! every non-fork repository's commits (across all branches), issues, and
//! pull requests, then writes a per-repository Active/Inactive CSV report.

mod cli;
mod config;
mod output;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pulse_core::ReportSink;
use pulse_graphql::{Auditor, GraphqlTransport};

use cli::Cli;
use config::Config;
use report::CsvReportSink;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let config = Config::from_env().context("Invalid configuration")?;
    let transport = GraphqlTransport::connect(
        config.endpoint.clone(),
        config.token.clone(),
        config.request_timeout,
    )
    .context("Failed to create HTTP client")?;

    let options = config.audit_options();
    let auditor = Auditor::new(&transport, &options);
    let mut sink = CsvReportSink::new(&cli.output_dir, config.threshold_days);

    for org in &config.organizations {
        output::heading("Organization:", org.as_str());
        let report = auditor.audit_organization(org).await;
        output::field("members", &report.roster().len().to_string());
        output::field("repositories", &report.repository_count().to_string());

        match sink.write_report(&report) {
            Ok(path) => output::success(&format!("CSV saved: {}", path.display())),
            Err(err) => {
                error!(org = %org, error = %err, "failed to write report");
                output::error(&format!("Failed to write report for {org}: {err}"));
            }
        }
    }

    info!(organizations = config.organizations.len(), "audit finished");
    Ok(())
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
