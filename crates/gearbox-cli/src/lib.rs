//! # gearbox-cli — Gear State Machine Driver
//!
//! Library half of the `gearbox` binary. Holds configuration resolution and
//! the replay loop so both can be tested without spawning a process.
//!
//! ```bash
//! gearbox                                # replay the demo script
//! gearbox shift_up throttle brake        # replay the given actions
//! gearbox --format json shift_up         # print the final snapshot
//! gearbox --config drive.yaml -v         # script from file, info logging
//! ```

pub mod config;
pub mod drive;

pub use config::{ConfigError, DriverConfig, OutputFormat, DEMO_SCRIPT};
pub use drive::{run_drive, run_script};
