//! `route53-shift` binary entry point.
//!
//! Logs go to stderr; the run report goes to stdout, either as a text summary
//! or as JSON with `--json`.
//!
//! Exit codes: `0` when every zone, target and batch succeeded, `1` when the
//! run completed with failures, `2` when the run could not start (bad
//! configuration, missing credentials).

mod args;
mod summary;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use route53_shift_core::RunCoordinator;
use route53_shift_provider::{AwsCredentials, DnsControlPlane, create_control_plane};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use args::{Cli, LogFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// stderr 输出，`log` 记录经 tracing-log 桥接
fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}

/// Returns whether the run succeeded as a whole.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let json_output = cli.json;
    let config = cli
        .command
        .into_config()
        .context("failed to load run configuration")?;

    let credentials = AwsCredentials::from_env().with_context(|| {
        format!(
            "AWS credentials not found: set {} and {}",
            AwsCredentials::ENV_ACCESS_KEY_ID,
            AwsCredentials::ENV_SECRET_ACCESS_KEY
        )
    })?;
    let control_plane =
        create_control_plane(credentials).context("failed to create control plane client")?;

    config
        .validate(control_plane.limits())
        .context("invalid run configuration")?;
    // 单个工作项的错误只影响该项，由运行报告体现
    for error in config.item_errors() {
        tracing::warn!("{error}");
    }

    tracing::info!(
        control_plane = control_plane.id(),
        zones = config.zones.len(),
        batch_size = config.batch_size,
        dry_run = config.dry_run,
        "Starting run"
    );

    let coordinator = RunCoordinator::new(control_plane, config.run_options())?;
    let report = coordinator.run(&config.work_items()).await;

    tracing::info!(
        records = report.total_records_fetched(),
        changes = report.total_changes_found(),
        batches = report.total_batches(),
        failed_batches = report.failed_batches(),
        "Run finished"
    );

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", summary::render(&report));
    }

    Ok(report.is_success())
}
