//! # gearbox-core — Foundational Types
//!
//! Leaf crate of the workspace. Defines the primitives every other crate
//! shares: UTC-only timestamps used in transition logs and the vehicle
//! identifier newtype.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gearbox-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod identity;
pub mod temporal;

pub use identity::VehicleId;
pub use temporal::Timestamp;
