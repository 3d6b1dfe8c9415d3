//! # gearbox-state — Gear State Machine
//!
//! A vehicle's drivetrain is modelled as a closed two-state machine
//! (`NEUTRAL`, `DRIVE`) driven by four actions (throttle, brake, shift up,
//! shift down). Every (state, action) pair is defined, so applying an action
//! cannot fail.
//!
//! ## Modules
//!
//! - **Gear** (`gear.rs`): the state, action and response enums and the pure
//!   [`transition()`] function.
//!
//! - **Vehicle** (`vehicle.rs`): the context object. Owns one gear, delegates
//!   every action to it, and logs each gear change in an append-only
//!   transition log.
//!
//! - **Shared** (`shared.rs`): a lock-serialized handle for driving one
//!   vehicle from several threads.
//!
//! ## Design
//!
//! The gear is a `Copy` enum held by value in the vehicle. A transition
//! computes the successor with an exhaustive `match` and replaces the slot;
//! nothing else mutates it. Unknown state or action names are rejected when
//! parsed or deserialized, before they can reach dispatch.

pub mod gear;
pub mod shared;
pub mod vehicle;

// ─── Gear re-exports ────────────────────────────────────────────────

pub use gear::{transition, Action, GearError, GearState, Outcome, Response};

// ─── Vehicle re-exports ─────────────────────────────────────────────

pub use vehicle::{create_vehicle, TransitionRecord, Vehicle, VehicleSnapshot};

// ─── Shared re-exports ──────────────────────────────────────────────

pub use shared::SharedVehicle;
