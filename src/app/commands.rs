//! Outbound commands.
//!
//! State entry actions never touch a port directly.  They append
//! [`Command`]s to the context outbox, and the
//! [`ElevatorService`](super::service::ElevatorService) applies them to
//! the ports, in order, once the dispatch has settled.

use core::time::Duration;

use crate::config::Floor;

use super::ports::ElevatorPorts;

/// A single call on one of the four ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // ── User interface ────────────────────────────────────
    Arrived(Floor),
    InService,
    OutOfService,
    AlarmOn,
    AlarmOff,

    // ── Door ──────────────────────────────────────────────
    OpenDoors,
    CloseDoors,

    // ── Drive ─────────────────────────────────────────────
    GoToFloor(Floor),
    StopDrive,
    StartDrive,

    // ── Timer ─────────────────────────────────────────────
    StartTimer(Duration),
    StopTimer,
}

impl Command {
    /// Issue this command on the matching port.
    pub fn apply(self, ports: &mut impl ElevatorPorts) {
        match self {
            Self::Arrived(floor) => ports.arrived(floor),
            Self::InService => ports.in_service(),
            Self::OutOfService => ports.out_of_service(),
            Self::AlarmOn => ports.alarm_on(),
            Self::AlarmOff => ports.alarm_off(),
            Self::OpenDoors => ports.open(),
            Self::CloseDoors => ports.close(),
            Self::GoToFloor(floor) => ports.go_to_floor(floor),
            Self::StopDrive => ports.stop(),
            Self::StartDrive => ports.start(),
            Self::StartTimer(duration) => ports.start_timer(duration),
            Self::StopTimer => ports.stop_timer(),
        }
    }
}

