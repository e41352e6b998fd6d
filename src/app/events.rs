//! Inbound events.
//!
//! Raised by the port adapters and delivered, one at a time, through the
//! [`ElevatorService`](super::service::ElevatorService).  Events are never
//! queued inside the engine; each is processed to completion before the
//! delivering call returns.

use core::fmt;

use crate::config::Floor;

/// Which port an event arrives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    Ui,
    Door,
    Drive,
    Timer,
}

/// Every occurrence the state machine can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    // ── User interface ────────────────────────────────────
    /// A passenger selected a floor.
    FloorRequested(Floor),
    OpenButton,
    CloseButton,
    StopButton,
    /// Maintenance key: bring the car back from out-of-service.
    RestoreService,

    // ── Door ──────────────────────────────────────────────
    DoorsOpened,
    DoorsClosed,
    DoorFault,

    // ── Drive ─────────────────────────────────────────────
    /// The car reached the commanded floor.
    Arrived,
    DriveFault,

    // ── Timer ─────────────────────────────────────────────
    TimerExpired,
}

impl Event {
    pub fn name(self) -> &'static str {
        match self {
            Self::FloorRequested(_) => "FloorRequested",
            Self::OpenButton => "OpenButton",
            Self::CloseButton => "CloseButton",
            Self::StopButton => "StopButton",
            Self::RestoreService => "RestoreService",
            Self::DoorsOpened => "DoorsOpened",
            Self::DoorsClosed => "DoorsClosed",
            Self::DoorFault => "DoorFault",
            Self::Arrived => "Arrived",
            Self::DriveFault => "DriveFault",
            Self::TimerExpired => "TimerExpired",
        }
    }

    pub fn port(self) -> PortKind {
        match self {
            Self::FloorRequested(_)
            | Self::OpenButton
            | Self::CloseButton
            | Self::StopButton
            | Self::RestoreService => PortKind::Ui,
            Self::DoorsOpened | Self::DoorsClosed | Self::DoorFault => PortKind::Door,
            Self::Arrived | Self::DriveFault => PortKind::Drive,
            Self::TimerExpired => PortKind::Timer,
        }
    }

    /// Door and drive faults are routed identically.
    pub fn is_fault(self) -> bool {
        matches!(self, Self::DoorFault | Self::DriveFault)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FloorRequested(floor) => write!(f, "FloorRequested({floor})"),
            other => f.write_str(other.name()),
        }
    }
}
