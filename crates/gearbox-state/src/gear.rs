//! # Gear State Machine
//!
//! The drivetrain is always in exactly one of two gears. Every driver action
//! is defined for every gear, so dispatch is a total function with no error
//! path:
//!
//! ```text
//!            shift_up                      shift_up (no-op)
//!   ┌─────────┐ ─────────────────▶ ┌───────┐ ──┐
//!   │ NEUTRAL │                    │ DRIVE │   │
//!   └─────────┘ ◀───────────────── └───────┘ ◀─┘
//!     │    ▲          shift_down
//!     └────┘ shift_down (no-op)
//! ```
//!
//! `throttle` and `brake` never change the gear; only the response differs.
//!
//! Invalid gear or action names can only enter through parsing or
//! deserialization, and are rejected there with [`GearError`]. Both paths
//! share one rule: `FromStr` is the only reader, and serde deserializes
//! through it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised at the boundaries of the gear state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GearError {
    /// A gear name outside {NEUTRAL, DRIVE}.
    #[error("unknown gear state: {0:?}")]
    UnknownState(String),

    /// An action name outside {throttle, brake, shift_up, shift_down}.
    #[error("unknown driver action: {0:?}")]
    UnknownAction(String),

    /// A restored transition log does not chain into the recorded state.
    #[error("inconsistent transition history at sequence {sequence}: {detail}")]
    InconsistentHistory {
        /// Sequence number of the offending record.
        sequence: u64,
        /// What did not line up.
        detail: String,
    },
}

// ─── Gear State ──────────────────────────────────────────────────────

/// The drivetrain gear of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum GearState {
    /// Engine decoupled from the wheels. Initial state.
    #[default]
    Neutral,
    /// Engine drives the wheels.
    Drive,
}

impl GearState {
    /// Every gear, in declaration order.
    pub const ALL: [GearState; 2] = [GearState::Neutral, GearState::Drive];

    /// Canonical state name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Neutral => "NEUTRAL",
            Self::Drive => "DRIVE",
        }
    }

    /// Response to pressing the throttle. Never changes the gear.
    pub fn throttle(self) -> Response {
        match self {
            Self::Neutral => Response::EngineRevs,
            Self::Drive => Response::Accelerates,
        }
    }

    /// Response to pressing the brake. Never changes the gear.
    pub fn brake(self) -> Response {
        match self {
            Self::Neutral => Response::BrakeLightsFlash,
            Self::Drive => Response::Decelerates,
        }
    }

    /// Shift one gear up.
    pub fn shift_up(self) -> Outcome {
        match self {
            Self::Neutral => Outcome::new(Response::ShiftedIntoDrive, Self::Drive),
            Self::Drive => Outcome::new(Response::AlreadyInDrive, Self::Drive),
        }
    }

    /// Shift one gear down.
    pub fn shift_down(self) -> Outcome {
        match self {
            Self::Neutral => Outcome::new(Response::AlreadyInNeutral, Self::Neutral),
            Self::Drive => Outcome::new(Response::ShiftedIntoNeutral, Self::Neutral),
        }
    }
}

impl std::fmt::Display for GearState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GearState {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEUTRAL" => Ok(Self::Neutral),
            "DRIVE" => Ok(Self::Drive),
            _ => Err(GearError::UnknownState(s.to_string())),
        }
    }
}

impl TryFrom<String> for GearState {
    type Error = GearError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ─── Driver Actions ──────────────────────────────────────────────────

/// A driver input applied to a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Action {
    /// Press the accelerator.
    Throttle,
    /// Press the brake pedal.
    Brake,
    /// Move the selector one gear up.
    ShiftUp,
    /// Move the selector one gear down.
    ShiftDown,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 4] = [
        Action::Throttle,
        Action::Brake,
        Action::ShiftUp,
        Action::ShiftDown,
    ];

    /// Canonical snake_case action name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Throttle => "throttle",
            Self::Brake => "brake",
            Self::ShiftUp => "shift_up",
            Self::ShiftDown => "shift_down",
        }
    }

    /// Whether this action can change the gear.
    pub fn is_shift(&self) -> bool {
        matches!(self, Self::ShiftUp | Self::ShiftDown)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = GearError;

    /// Accepts snake_case or kebab-case names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "throttle" => Ok(Self::Throttle),
            "brake" => Ok(Self::Brake),
            "shift_up" => Ok(Self::ShiftUp),
            "shift_down" => Ok(Self::ShiftDown),
            _ => Err(GearError::UnknownAction(s.to_string())),
        }
    }
}

impl TryFrom<String> for Action {
    type Error = GearError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ─── Responses ───────────────────────────────────────────────────────

/// Observable result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    /// Throttle in neutral.
    EngineRevs,
    /// Brake in neutral.
    BrakeLightsFlash,
    /// Throttle in drive.
    Accelerates,
    /// Brake in drive.
    Decelerates,
    /// Shift up from neutral.
    ShiftedIntoDrive,
    /// Shift up while already in drive.
    AlreadyInDrive,
    /// Shift down from drive.
    ShiftedIntoNeutral,
    /// Shift down while already in neutral.
    AlreadyInNeutral,
}

impl Response {
    /// Human-readable status message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EngineRevs => "The engine revs loudly but you remain motionless.",
            Self::BrakeLightsFlash => "Your brake lights flash on. Nothing else happens.",
            Self::Accelerates => "The engine revs and you begin to move forward.",
            Self::Decelerates => "You begin to slow down.",
            Self::ShiftedIntoDrive => "You shift into drive.",
            Self::AlreadyInDrive => "You are already in drive.",
            Self::ShiftedIntoNeutral => "You shift into neutral.",
            Self::AlreadyInNeutral => "You are already in neutral.",
        }
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// ─── Transition Function ─────────────────────────────────────────────

/// Result of one step of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// What the driver observes.
    pub response: Response,
    /// Gear after the step.
    pub next: GearState,
}

impl Outcome {
    fn new(response: Response, next: GearState) -> Self {
        Self { response, next }
    }
}

/// Apply `action` in `state`.
///
/// Pure and total: every (state, action) pair has exactly one outcome.
pub fn transition(state: GearState, action: Action) -> Outcome {
    match action {
        Action::Throttle => Outcome::new(state.throttle(), state),
        Action::Brake => Outcome::new(state.brake(), state),
        Action::ShiftUp => state.shift_up(),
        Action::ShiftDown => state.shift_down(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
