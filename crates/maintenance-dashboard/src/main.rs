/*
[INPUT]:  CLI arguments, layered configuration, maintenance API
[OUTPUT]: Terminal dashboard, JSON snapshot, or effective configuration
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod cli;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use maintenance_adapter::MaintenanceClient;
use maintenance_dashboard::config::DashboardConfig;
use maintenance_dashboard::dashboard::{Dashboard, DueDateZone};
use maintenance_dashboard::logging::{self, LOG_BUFFER_CAPACITY, LogBuffer, LogSink};

#[derive(Parser, Debug)]
#[command(
    name = "maintenance-dashboard",
    version,
    about = "Track machines and schedule their maintenance tasks"
)]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    /// Load and validate configuration, then exit
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui,
    /// Load machines and tasks once and print the dashboard state as JSON
    Snapshot {
        /// Show tasks of this machine instead of the first one
        #[arg(long = "machine", value_name = "ID")]
        machine: Option<String>,
    },
    /// Print the effective configuration as YAML
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = load_config(&args)?;
    let command = args.command.clone().unwrap_or(Command::Tui);

    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    let sink = match command {
        Command::Tui if !args.dry_run => LogSink::Buffer(log_buffer.clone()),
        _ => LogSink::Stderr,
    };
    let _log_guard =
        logging::init_tracing(&config.logging.level, sink, config.logging.file.as_deref())?;

    info!(
        base_url = %config.api.base_url,
        dry_run = args.dry_run,
        "starting maintenance-dashboard"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    match command {
        Command::PrintConfig => cli::print_config(&config, &mut std::io::stdout()),
        Command::Snapshot { machine } => {
            let (client, dashboard) = build_dashboard(&config)?;
            log_health(&client).await;
            cli::run_snapshot(&dashboard, machine.as_deref(), &mut std::io::stdout()).await
        }
        Command::Tui => {
            let (client, dashboard) = build_dashboard(&config)?;
            log_health(&client).await;
            tui::run_tui(dashboard, log_buffer, &config).await
        }
    }
}

fn load_config(args: &Cli) -> Result<DashboardConfig> {
    let mut config =
        DashboardConfig::load(args.config_path.as_deref()).context("load configuration")?;
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate().context("validate configuration")?;
    Ok(config)
}

fn build_dashboard(config: &DashboardConfig) -> Result<(MaintenanceClient, Dashboard)> {
    let client = MaintenanceClient::with_config_and_base_url(
        config.api.client_config(),
        &config.api.base_url,
    )
    .context("create maintenance client")?;
    let zone = DueDateZone::from_offset(config.ui.fixed_offset()?);
    let dashboard = Dashboard::with_zone(Arc::new(client.clone()), zone);
    Ok((client, dashboard))
}

async fn log_health(client: &MaintenanceClient) {
    match client.health().await {
        Ok(health) if health.is_ok() => info!(base_url = %client.base_url(), "backend healthy"),
        Ok(health) => warn!(status = %health.status, "backend reports degraded health"),
        Err(err) => warn!(error = %err, "backend health check failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_tui() {
        let cli = Cli::try_parse_from(["maintenance-dashboard"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "maintenance-dashboard",
            "snapshot",
            "--machine",
            "m-1",
            "--base-url",
            "http://localhost:9000/",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Snapshot {
                machine: Some("m-1".to_string())
            })
        );
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/"));
    }
}
