//! # Shared Vehicle
//!
//! Thread-safe, cloneable handle to a single [`Vehicle`].
//!
//! A gear change is a read-modify-write of the vehicle's state slot plus an
//! append to its log. Each shift runs entirely under one
//! `parking_lot::Mutex`, so concurrent drivers are serialized and the log
//! stays a consistent chain. Pedals only read the gear. The lock is never
//! held across calls.

use std::sync::Arc;

use parking_lot::Mutex;

use gearbox_core::VehicleId;

use crate::gear::{Action, GearState, Response};
use crate::vehicle::{Vehicle, VehicleSnapshot};

/// A vehicle shared between threads. Clones refer to the same vehicle.
#[derive(Debug, Clone)]
pub struct SharedVehicle {
    inner: Arc<Mutex<Vehicle>>,
}

impl SharedVehicle {
    /// Create a shared vehicle in neutral.
    pub fn new() -> Self {
        Self::from_vehicle(Vehicle::new())
    }

    /// Take ownership of an existing vehicle.
    pub fn from_vehicle(vehicle: Vehicle) -> Self {
        Self {
            inner: Arc::new(Mutex::new(vehicle)),
        }
    }

    /// Vehicle identifier.
    pub fn id(&self) -> VehicleId {
        self.inner.lock().id()
    }

    /// Current gear.
    pub fn state(&self) -> GearState {
        self.inner.lock().state()
    }

    /// Apply an action under the vehicle's lock.
    pub fn apply(&self, action: Action) -> Response {
        self.inner.lock().apply(action)
    }

    /// Press the throttle. Never changes the vehicle.
    pub fn throttle(&self) -> Response {
        self.inner.lock().throttle()
    }

    /// Press the brake. Never changes the vehicle.
    pub fn brake(&self) -> Response {
        self.inner.lock().brake()
    }

    /// Shift one gear up.
    pub fn shift_up(&self) -> Response {
        self.apply(Action::ShiftUp)
    }

    /// Shift one gear down.
    pub fn shift_down(&self) -> Response {
        self.apply(Action::ShiftDown)
    }

    /// Consistent copy of the vehicle taken under the lock.
    pub fn snapshot(&self) -> VehicleSnapshot {
        self.inner.lock().snapshot()
    }
}

impl Default for SharedVehicle {
    fn default() -> Self {
        Self::new()
    }
}
