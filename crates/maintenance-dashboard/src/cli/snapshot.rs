/*
[INPUT]:  Dashboard handle, optional machine id
[OUTPUT]: Pretty-printed DashboardState JSON
[POS]:    CLI layer - one-shot dashboard load
[UPDATE]: When DashboardState gains fields worth printing
*/

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use maintenance_dashboard::dashboard::Dashboard;

/// Load machines (and the tasks of one machine) once and print the state.
///
/// Without `machine_id` the first machine is auto-selected, as in the TUI.
pub(crate) async fn run_snapshot(
    dashboard: &Dashboard,
    machine_id: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    dashboard.load_machines().await.context("load machines")?;

    if let Some(machine_id) = machine_id {
        let machine = dashboard
            .read(|state| {
                state
                    .machines()
                    .iter()
                    .find(|machine| machine.id == machine_id)
                    .cloned()
            })
            .with_context(|| format!("machine {machine_id} not found"))?;
        dashboard
            .select_machine(Some(machine))
            .await
            .context("load tasks")?;
    }

    let state = dashboard.snapshot();
    info!(
        machines = state.machines().len(),
        tasks = state.tasks().len(),
        "snapshot loaded"
    );
    serde_json::to_writer_pretty(&mut *out, &state).context("encode snapshot")?;
    writeln!(out).context("write snapshot")?;
    Ok(())
}
