//! # Replay Tests
//!
//! Drives the library half of the binary end to end: configuration in,
//! rendered output out.

use gearbox_cli::{run_drive, run_script, DriverConfig, OutputFormat};
use gearbox_state::{GearState, Response, VehicleSnapshot};

#[test]
fn demo_script_prints_status_messages() {
    let config = DriverConfig::default();
    let mut buf = Vec::new();
    run_drive(&config.actions().unwrap(), config.format, &mut buf).unwrap();

    let lines: Vec<String> = String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            Response::EngineRevs.message(),
            Response::ShiftedIntoDrive.message(),
            Response::Accelerates.message(),
            Response::Decelerates.message(),
            Response::ShiftedIntoNeutral.message(),
        ]
    );
}

#[test]
fn json_output_is_a_restorable_snapshot() {
    let config = DriverConfig::from_yaml_str("format: json\nscript: [shift_up, brake]\n").unwrap();
    let mut buf = Vec::new();
    let returned = run_drive(&config.actions().unwrap(), config.format, &mut buf).unwrap();

    let parsed: VehicleSnapshot = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed, returned);
    assert_eq!(parsed.state, GearState::Drive);
    assert_eq!(parsed.history.len(), 1);
    assert!(gearbox_state::Vehicle::restore(parsed).is_ok());
}

#[test]
fn unknown_action_fails_before_replay() {
    let config = DriverConfig {
        format: OutputFormat::Text,
        script: vec!["shift_up".into(), "launch".into()],
    };
    let mut buf = Vec::new();
    assert!(run_script(&config, &mut buf).is_err());
    assert!(buf.is_empty());
}

#[test]
fn unknown_action_in_config_file_fails_before_replay() {
    let config = DriverConfig::from_yaml_str("format: json\nscript: [shift_up, park]\n").unwrap();
    let mut buf = Vec::new();
    assert!(run_script(&config, &mut buf).is_err());
    assert!(buf.is_empty());
}
