//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the car position, the latest drive snapshot, configuration,
//! and the outbox of port commands produced by entry actions.

use log::error;

use crate::app::commands::Command;
use crate::config::{ElevatorConfig, Floor};

/// Upper bound on commands produced by one dispatch, including any
/// pass-through chain.  The longest chain (Resuming → Moving) issues four.
pub const OUTBOX_CAP: usize = 8;

// ---------------------------------------------------------------------------
// Car position
// ---------------------------------------------------------------------------

/// Where the car is and where it is headed.
///
/// Both floors are always defined.  `destination_floor` is written by the
/// floor-request operation and by Restoring; `current_floor` is only
/// resynchronised from the drive on Restoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarPosition {
    pub current_floor: Floor,
    pub destination_floor: Floor,
}

impl CarPosition {
    pub fn at(floor: Floor) -> Self {
        Self {
            current_floor: floor,
            destination_floor: floor,
        }
    }

    /// True when the car is already at the requested floor.
    pub fn at_destination(&self) -> bool {
        self.current_floor == self.destination_floor
    }
}

// ---------------------------------------------------------------------------
// Drive snapshot (written by the service before each dispatch)
// ---------------------------------------------------------------------------

/// Point-in-time answer to the two drive queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveSnapshot {
    /// Last known floor at or below the car.
    pub floor: Floor,
    /// Car is settled at `floor`, not between floors.
    pub at_floor: bool,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Position --
    pub position: CarPosition,

    // -- Drive --
    /// Latest drive readings.  Updated before each dispatch.
    pub drive: DriveSnapshot,

    // -- Configuration --
    pub config: ElevatorConfig,

    // -- Port commands --
    /// Commands to be applied to the ports after the dispatch.
    outbox: heapless::Vec<Command, OUTBOX_CAP>,
}

impl FsmContext {
    /// Create a new context with the car parked at the ground floor.
    pub fn new(config: ElevatorConfig) -> Self {
        let ground = config.ground_floor;
        Self {
            position: CarPosition::at(ground),
            drive: DriveSnapshot {
                floor: ground,
                at_floor: true,
            },
            config,
            outbox: heapless::Vec::new(),
        }
    }

    pub fn ground_floor(&self) -> Floor {
        self.config.ground_floor
    }

    /// Queue a port command.
    pub fn issue(&mut self, cmd: Command) {
        if self.outbox.push(cmd).is_err() {
            error!("command outbox full, dropping {:?}", cmd);
            debug_assert!(false, "outbox capacity {OUTBOX_CAP} exceeded");
        }
    }

    /// Commands issued since the last [`take_commands`](Self::take_commands).
    pub fn pending_commands(&self) -> &[Command] {
        &self.outbox
    }

    /// Drain the outbox, oldest first.
    pub fn take_commands(&mut self) -> heapless::Vec<Command, OUTBOX_CAP> {
        core::mem::take(&mut self.outbox)
    }
}
