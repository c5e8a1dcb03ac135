/*
[INPUT]:  Effective configuration, Dashboard handle
[OUTPUT]: Non-interactive subcommand output on stdout
[POS]:    CLI layer - snapshot and print-config subcommands
[UPDATE]: When adding non-interactive subcommands
*/

mod snapshot;

use std::io::Write;

use anyhow::{Context, Result};

use maintenance_dashboard::config::DashboardConfig;

pub(crate) use snapshot::run_snapshot;

pub(crate) fn print_config(config: &DashboardConfig, out: &mut impl Write) -> Result<()> {
    let yaml = config.to_yaml()?;
    out.write_all(yaml.as_bytes()).context("write configuration")?;
    Ok(())
}
