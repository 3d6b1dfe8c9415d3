//! # Vehicle Context
//!
//! A [`Vehicle`] owns exactly one [`GearState`] and delegates every driver
//! action to it. The gear decides the response and the successor gear.
//!
//! Pedals (`throttle`, `brake`) only read the gear and take `&self`. Shifts
//! take `&mut self`; when the gear actually changes, the vehicle replaces its
//! state slot and appends a [`TransitionRecord`]. No-op shifts leave the
//! vehicle untouched, so the log holds exactly the gear changes.

use serde::{Deserialize, Serialize};

use gearbox_core::{Timestamp, VehicleId};

use crate::gear::{transition, Action, GearError, GearState, Response};

// ─── Transition Log ──────────────────────────────────────────────────

/// Record of one gear change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// 1-based position in the log.
    pub sequence: u64,
    /// The action applied.
    pub action: Action,
    /// Gear before the action.
    pub from_state: GearState,
    /// Gear after the action.
    pub to_state: GearState,
    /// What the driver observed.
    pub response: Response,
    /// When the action was applied.
    pub timestamp: Timestamp,
}

/// Serializable view of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Vehicle identifier.
    pub id: VehicleId,
    /// Current gear.
    pub state: GearState,
    /// Full transition log, oldest first.
    pub history: Vec<TransitionRecord>,
}

// ─── Vehicle ─────────────────────────────────────────────────────────

/// The context object of the gear state machine.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    state: GearState,
    history: Vec<TransitionRecord>,
}

/// Create a vehicle in neutral with an empty log.
pub fn create_vehicle() -> Vehicle {
    Vehicle::new()
}

impl Vehicle {
    /// Create a vehicle in neutral with a fresh identifier.
    pub fn new() -> Self {
        Self::with_id(VehicleId::new())
    }

    /// Create a vehicle in neutral with the given identifier.
    pub fn with_id(id: VehicleId) -> Self {
        Self {
            id,
            state: GearState::Neutral,
            history: Vec::new(),
        }
    }

    /// Rebuild a vehicle from a snapshot.
    ///
    /// The log must be contiguous from sequence 1, each record must be a gear
    /// change allowed by the transition table, each record must start where
    /// the previous one ended, and the last record must end in the
    /// snapshot's state.
    pub fn restore(snapshot: VehicleSnapshot) -> Result<Self, GearError> {
        let mut expected_from = GearState::Neutral;
        for (idx, record) in snapshot.history.iter().enumerate() {
            let expected_seq = idx as u64 + 1;
            if record.sequence != expected_seq {
                return Err(GearError::InconsistentHistory {
                    sequence: record.sequence,
                    detail: format!("expected sequence {expected_seq}"),
                });
            }
            if record.from_state != expected_from {
                return Err(GearError::InconsistentHistory {
                    sequence: record.sequence,
                    detail: format!(
                        "record starts in {} but previous gear was {expected_from}",
                        record.from_state
                    ),
                });
            }
            let outcome = transition(record.from_state, record.action);
            if outcome.next == record.from_state
                || outcome.next != record.to_state
                || outcome.response != record.response
            {
                return Err(GearError::InconsistentHistory {
                    sequence: record.sequence,
                    detail: format!(
                        "{} in {} cannot yield {} / {:?}",
                        record.action, record.from_state, record.to_state, record.response
                    ),
                });
            }
            expected_from = record.to_state;
        }
        if expected_from != snapshot.state {
            return Err(GearError::InconsistentHistory {
                sequence: snapshot.history.len() as u64,
                detail: format!(
                    "log ends in {expected_from} but snapshot state is {}",
                    snapshot.state
                ),
            });
        }
        Ok(Self {
            id: snapshot.id,
            state: snapshot.state,
            history: snapshot.history,
        })
    }

    /// Vehicle identifier.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Current gear.
    pub fn state(&self) -> GearState {
        self.state
    }

    /// Transition log, oldest first.
    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    /// Press the throttle. Never changes the vehicle.
    pub fn throttle(&self) -> Response {
        self.state.throttle()
    }

    /// Press the brake. Never changes the vehicle.
    pub fn brake(&self) -> Response {
        self.state.brake()
    }

    /// Shift one gear up.
    pub fn shift_up(&mut self) -> Response {
        self.apply(Action::ShiftUp)
    }

    /// Shift one gear down.
    pub fn shift_down(&mut self) -> Response {
        self.apply(Action::ShiftDown)
    }

    /// Apply any driver action. Records it only if the gear changes.
    pub fn apply(&mut self, action: Action) -> Response {
        let from = self.state;
        let outcome = transition(from, action);
        if outcome.next != from {
            self.do_transition(action, outcome.next, outcome.response);
        }
        outcome.response
    }

    /// Apply a sequence of actions, collecting the responses in order.
    pub fn apply_all<I>(&mut self, actions: I) -> Vec<Response>
    where
        I: IntoIterator<Item = Action>,
    {
        actions.into_iter().map(|a| self.apply(a)).collect()
    }

    fn do_transition(&mut self, action: Action, to: GearState, response: Response) {
        tracing::debug!(
            vehicle = %self.id,
            %action,
            from = %self.state,
            to = %to,
            "gear changed"
        );
        self.history.push(TransitionRecord {
            sequence: self.history.len() as u64 + 1,
            action,
            from_state: self.state,
            to_state: to,
            response,
            timestamp: Timestamp::now(),
        });
        self.state = to;
    }

    /// Serializable copy of the vehicle.
    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            state: self.state,
            history: self.history.clone(),
        }
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn in_drive() -> Vehicle {
        let mut v = create_vehicle();
        v.shift_up();
        v
    }

    #[test]
    fn new_vehicle_is_neutral_with_empty_log() {
        let v = create_vehicle();
        assert_eq!(v.state(), GearState::Neutral);
        assert!(v.history().is_empty());
    }

    #[test]
    fn throttle_in_neutral_revs_without_moving() {
        let v = create_vehicle();
        assert_eq!(v.throttle(), Response::EngineRevs);
        assert_eq!(v.state(), GearState::Neutral);
    }

    #[test]
    fn brake_in_neutral_only_flashes_lights() {
        let v = create_vehicle();
        assert_eq!(v.brake(), Response::BrakeLightsFlash);
        assert_eq!(v.state(), GearState::Neutral);
    }

    #[test]
    fn shift_up_from_neutral_enters_drive() {
        let mut v = create_vehicle();
        assert_eq!(v.shift_up(), Response::ShiftedIntoDrive);
        assert_eq!(v.state(), GearState::Drive);
    }

    #[test]
    fn throttle_in_drive_accelerates() {
        let v = in_drive();
        assert_eq!(v.throttle(), Response::Accelerates);
        assert_eq!(v.state(), GearState::Drive);
    }

    #[test]
    fn brake_in_drive_decelerates() {
        let v = in_drive();
        assert_eq!(v.brake(), Response::Decelerates);
        assert_eq!(v.state(), GearState::Drive);
    }

    #[test]
    fn shift_up_in_drive_is_no_op() {
        let mut v = in_drive();
        let before = v.snapshot();
        assert_eq!(v.shift_up(), Response::AlreadyInDrive);
        assert_eq!(v.snapshot(), before);
    }

    #[test]
    fn double_shift_down_from_drive() {
        let mut v = in_drive();
        assert_eq!(v.shift_down(), Response::ShiftedIntoNeutral);
        assert_eq!(v.shift_down(), Response::AlreadyInNeutral);
        assert_eq!(v.state(), GearState::Neutral);
        assert_eq!(v.history().len(), 2);
    }

    #[test]
    fn pedals_leave_snapshot_unchanged() {
        for mut v in [create_vehicle(), in_drive()] {
            let before = v.snapshot();
            for _ in 0..10_000 {
                v.throttle();
                v.brake();
                v.apply(Action::Throttle);
                v.apply(Action::Brake);
            }
            assert_eq!(v.snapshot(), before);
        }
    }

    #[test]
    fn history_records_only_gear_changes() {
        let mut v = create_vehicle();
        v.apply_all([
            Action::Throttle,
            Action::ShiftDown,
            Action::ShiftUp,
            Action::ShiftUp,
            Action::Brake,
            Action::ShiftDown,
        ]);
        let log = v.history();
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().map(|r| r.sequence).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(log[0].action, Action::ShiftUp);
        assert_eq!(log[0].response, Response::ShiftedIntoDrive);
        assert_eq!(log[1].action, Action::ShiftDown);
        assert_eq!(log[1].to_state, GearState::Neutral);
        assert!(log.iter().all(|r| r.from_state != r.to_state));
    }

    #[test]
    fn history_chains_states() {
        let mut v = create_vehicle();
        v.apply_all([Action::ShiftUp, Action::ShiftDown, Action::ShiftDown, Action::ShiftUp]);
        assert_eq!(v.history().len(), 3);
        for pair in v.history().windows(2) {
            assert_eq!(pair[0].to_state, pair[1].from_state);
        }
        assert_eq!(v.history().last().unwrap().to_state, v.state());
    }

    #[test]
    fn snapshot_restore_preserves_vehicle() {
        let mut v = create_vehicle();
        v.apply_all([Action::ShiftUp, Action::Throttle]);
        let restored = Vehicle::restore(v.snapshot()).unwrap();
        assert_eq!(restored.id(), v.id());
        assert_eq!(restored.state(), GearState::Drive);
        assert_eq!(restored.history(), v.history());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut v = create_vehicle();
        v.shift_up();
        let json = serde_json::to_value(v.snapshot()).unwrap();
        assert_eq!(json["state"], "DRIVE");
        assert_eq!(json["history"][0]["action"], "SHIFT_UP");
        assert_eq!(json["history"][0]["response"], "SHIFTED_INTO_DRIVE");
    }

    #[test]
    fn restore_rejects_state_not_matching_log() {
        let mut v = create_vehicle();
        v.shift_up();
        let mut snap = v.snapshot();
        snap.state = GearState::Neutral;
        let err = Vehicle::restore(snap).unwrap_err();
        assert!(matches!(err, GearError::InconsistentHistory { sequence: 1, .. }));
    }

    #[test]
    fn restore_rejects_impossible_record() {
        let mut v = create_vehicle();
        v.shift_up();
        let mut snap = v.snapshot();
        snap.history[0].response = Response::AlreadyInDrive;
        assert!(Vehicle::restore(snap).is_err());
    }

    #[test]
    fn restore_rejects_no_op_record() {
        let mut snap = create_vehicle().snapshot();
        snap.history.push(TransitionRecord {
            sequence: 1,
            action: Action::ShiftDown,
            from_state: GearState::Neutral,
            to_state: GearState::Neutral,
            response: Response::AlreadyInNeutral,
            timestamp: gearbox_core::Timestamp::now(),
        });
        let err = Vehicle::restore(snap).unwrap_err();
        assert!(matches!(err, GearError::InconsistentHistory { sequence: 1, .. }));
    }

    #[test]
    fn restore_rejects_sequence_gap() {
        let mut v = create_vehicle();
        v.apply_all([Action::ShiftUp, Action::ShiftDown]);
        let mut snap = v.snapshot();
        snap.history[1].sequence = 5;
        let err = Vehicle::restore(snap).unwrap_err();
        assert!(matches!(err, GearError::InconsistentHistory { sequence: 5, .. }));
    }

    #[test]
    fn restore_rejects_unknown_state_name_in_json() {
        let v = create_vehicle();
        let mut json = serde_json::to_value(v.snapshot()).unwrap();
        json["state"] = serde_json::Value::String("REVERSE".into());
        assert!(serde_json::from_value::<VehicleSnapshot>(json).is_err());
    }
}
