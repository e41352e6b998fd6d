//! Port traits — the hexagonal boundary between the control logic and the
//! car's subsystems.
//!
//! ```text
//!   Adapter ──event──▶ ElevatorService ──command──▶ Port trait ──▶ Adapter
//! ```
//!
//! Each subsystem (user interface, doors, drive, timer) is a two-sided
//! contract.  The outbound side is the trait below; the inbound side is
//! the matching [`Event`](super::events::Event) variants, which adapters
//! deliver through the [`ElevatorService`](super::service::ElevatorService)
//! operations.  The service is the one and only sink for every port.
//!
//! Ports are injected at call sites (`&mut impl ElevatorPorts`) rather
//! than stored, so the service never outlives the hardware it drives.

use core::time::Duration;

use crate::config::Floor;

// ───────────────────────────────────────────────────────────────
// User interface port (domain → car panel / hall display)
// ───────────────────────────────────────────────────────────────

/// Inbound: floor request, open/close/stop buttons, restore service.
pub trait UiPort {
    /// Announce arrival at `floor`.
    fn arrived(&mut self, floor: Floor);

    /// The car is available to passengers.
    fn in_service(&mut self);

    /// The car has faulted and needs manual restoration.
    fn out_of_service(&mut self);

    fn alarm_on(&mut self);

    fn alarm_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Door port (domain → door operator)
// ───────────────────────────────────────────────────────────────

/// Inbound: doors opened, doors closed, door fault.
pub trait DoorPort {
    fn open(&mut self);

    fn close(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Drive port (domain → hoist motor controller)
// ───────────────────────────────────────────────────────────────

/// Inbound: arrived, drive fault.
pub trait DrivePort {
    /// Begin travel toward `floor`.
    fn go_to_floor(&mut self, floor: Floor);

    /// Halt the car where it is.
    fn stop(&mut self);

    /// Resume travel after a [`stop`](Self::stop).
    fn start(&mut self);

    /// Last known floor at or below the car.
    fn current_floor(&self) -> Floor;

    /// True only when the car is settled at a floor, not between floors.
    fn is_at_floor(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Timer port (domain → one-shot countdown)
// ───────────────────────────────────────────────────────────────

/// Inbound: expired.
///
/// One logical timer.  Starting it while running restarts it, so an
/// earlier countdown can never fire after a later one is armed.
pub trait TimerPort {
    fn start_timer(&mut self, duration: Duration);

    /// No-op if the timer is not running.
    fn stop_timer(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Bundle
// ───────────────────────────────────────────────────────────────

/// Everything the service drives.  Implemented automatically for any type
/// that provides all four ports — a single hardware adapter, a simulator,
/// or a [`PortSet`] of separate adapters.
pub trait ElevatorPorts: UiPort + DoorPort + DrivePort + TimerPort {}

impl<T: UiPort + DoorPort + DrivePort + TimerPort> ElevatorPorts for T {}

/// Bundles four independent adapters into one [`ElevatorPorts`] value.
#[derive(Debug, Default)]
pub struct PortSet<U, D, V, T> {
    pub ui: U,
    pub door: D,
    pub drive: V,
    pub timer: T,
}

impl<U, D, V, T> PortSet<U, D, V, T> {
    pub fn new(ui: U, door: D, drive: V, timer: T) -> Self {
        Self {
            ui,
            door,
            drive,
            timer,
        }
    }
}

impl<U: UiPort, D, V, T> UiPort for PortSet<U, D, V, T> {
    fn arrived(&mut self, floor: Floor) {
        self.ui.arrived(floor);
    }

    fn in_service(&mut self) {
        self.ui.in_service();
    }

    fn out_of_service(&mut self) {
        self.ui.out_of_service();
    }

    fn alarm_on(&mut self) {
        self.ui.alarm_on();
    }

    fn alarm_off(&mut self) {
        self.ui.alarm_off();
    }
}

impl<U, D: DoorPort, V, T> DoorPort for PortSet<U, D, V, T> {
    fn open(&mut self) {
        self.door.open();
    }

    fn close(&mut self) {
        self.door.close();
    }
}

impl<U, D, V: DrivePort, T> DrivePort for PortSet<U, D, V, T> {
    fn go_to_floor(&mut self, floor: Floor) {
        self.drive.go_to_floor(floor);
    }

    fn stop(&mut self) {
        self.drive.stop();
    }

    fn start(&mut self) {
        self.drive.start();
    }

    fn current_floor(&self) -> Floor {
        self.drive.current_floor()
    }

    fn is_at_floor(&self) -> bool {
        self.drive.is_at_floor()
    }
}

impl<U, D, V, T: TimerPort> TimerPort for PortSet<U, D, V, T> {
    fn start_timer(&mut self, duration: Duration) {
        self.timer.start_timer(duration);
    }

    fn stop_timer(&mut self) {
        self.timer.stop_timer();
    }
}
