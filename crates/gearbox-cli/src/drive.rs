//! Replay a driver script against a fresh vehicle.

use std::io::Write;

use anyhow::Context;

use gearbox_state::{create_vehicle, Action, VehicleSnapshot};

use crate::config::{DriverConfig, OutputFormat};

/// Parse the configured script and replay it.
///
/// Every action name is validated before the first one is applied, so an
/// unknown action leaves `out` untouched.
pub fn run_script<W: Write>(config: &DriverConfig, out: &mut W) -> anyhow::Result<VehicleSnapshot> {
    let actions = config.actions().context("invalid driver script")?;
    run_drive(&actions, config.format, out)
}

/// Apply `actions` in order to a new vehicle and write the results.
///
/// In [`OutputFormat::Text`] each status message is written as it is
/// produced. In [`OutputFormat::Json`] only the final snapshot is written.
pub fn run_drive<W: Write>(
    actions: &[Action],
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<VehicleSnapshot> {
    let mut vehicle = create_vehicle();
    tracing::info!(vehicle = %vehicle.id(), actions = actions.len(), "starting drive");

    for &action in actions {
        let response = vehicle.apply(action);
        if format == OutputFormat::Text {
            writeln!(out, "{response}").context("failed to write status message")?;
        }
    }

    let snapshot = vehicle.snapshot();
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &snapshot)
            .context("failed to write vehicle snapshot")?;
        writeln!(out)?;
    }

    tracing::info!(vehicle = %snapshot.id, state = %snapshot.state, "drive finished");
    Ok(snapshot)
}
