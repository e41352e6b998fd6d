//! Application service — the hexagonal core.
//!
//! [`ElevatorService`] owns the FSM and its context.  It is the single
//! engine-side sink for every port: adapters call one operation per
//! inbound event, and the service applies the resulting commands back
//! through the ports passed in at the call site.
//!
//! ```text
//!  UI / Door / Drive / Timer ──event──▶ ┌────────────────────┐
//!                                       │  ElevatorService   │
//!  UI / Door / Drive / Timer ◀─command──│  FSM · position    │
//!                                       └────────────────────┘
//! ```
//!
//! Every operation runs to completion: the event is dispatched, any
//! pass-through chain settles, and every command it produced has been
//! issued before the call returns.

use log::{info, warn};

use crate::config::{ElevatorConfig, Floor};
use crate::error::Result;
use crate::fsm::context::{CarPosition, DriveSnapshot, FsmContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId, Transition};

use super::events::Event;
use super::ports::ElevatorPorts;

// ───────────────────────────────────────────────────────────────
// ElevatorService
// ───────────────────────────────────────────────────────────────

/// Public operation surface of the elevator controller.
pub struct ElevatorService {
    fsm: Fsm,
    ctx: FsmContext,
}

impl ElevatorService {
    /// Construct the service from configuration.  The car starts
    /// `Stopped` at the ground floor.
    ///
    /// Does **not** announce service — call [`start`](Self::start) next.
    pub fn new(config: ElevatorConfig) -> Result<Self> {
        config.validate()?;
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Stopped);
        Ok(Self { fsm, ctx })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Report the car in service.  Call once, after the ports are wired.
    pub fn start(&mut self, ports: &mut impl ElevatorPorts) {
        ports.in_service();
        info!(
            "ElevatorService started in {:?} at floor {}",
            self.fsm.current_state(),
            self.ctx.position.current_floor
        );
    }

    // ── Event delivery ────────────────────────────────────────

    /// Deliver one event.  Returns `true` if the current state accepted it.
    pub fn handle(&mut self, event: Event, ports: &mut impl ElevatorPorts) -> bool {
        self.ctx.drive = DriveSnapshot {
            floor: ports.current_floor(),
            at_floor: ports.is_at_floor(),
        };

        if event.is_fault() {
            warn!(
                "{} reported by {:?} port in {:?}",
                event,
                event.port(),
                self.fsm.current_state()
            );
        }

        let previous_destination = self.ctx.position.destination_floor;
        if let Event::FloorRequested(floor) = event {
            if floor == 0 {
                warn!("floor request for floor 0 rejected");
                return false;
            }
            // Stopped compares against the destination, so it must be
            // stored before the dispatch.
            self.ctx.position.destination_floor = floor;
        }

        let accepted = self.fsm.dispatch(event, &mut self.ctx);
        if !accepted {
            self.ctx.position.destination_floor = previous_destination;
        }

        for cmd in self.ctx.take_commands() {
            cmd.apply(ports);
        }
        accepted
    }

    // User interface

    pub fn floor_requested(&mut self, floor: Floor, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::FloorRequested(floor), ports)
    }

    pub fn open_button(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::OpenButton, ports)
    }

    pub fn close_button(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::CloseButton, ports)
    }

    pub fn stop_button(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::StopButton, ports)
    }

    pub fn restore_service(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::RestoreService, ports)
    }

    // Door

    pub fn doors_opened(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::DoorsOpened, ports)
    }

    pub fn doors_closed(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::DoorsClosed, ports)
    }

    pub fn door_fault(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::DoorFault, ports)
    }

    // Drive

    pub fn arrived(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::Arrived, ports)
    }

    pub fn drive_fault(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::DriveFault, ports)
    }

    // Timer

    pub fn timer_expired(&mut self, ports: &mut impl ElevatorPorts) -> bool {
        self.handle(Event::TimerExpired, ports)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Is the elevator functioning?
    pub fn is_in_service(&self) -> bool {
        self.fsm.current_state() != StateId::OutOfService
    }

    /// Is the elevator sitting idle at a floor with doors closed?
    pub fn is_idle(&self) -> bool {
        self.fsm.current_state() == StateId::Stopped
    }

    /// Is the elevator waiting at a floor with doors open?
    pub fn is_waiting(&self) -> bool {
        self.fsm.current_state() == StateId::Waiting
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn position(&self) -> CarPosition {
        self.ctx.position
    }

    pub fn config(&self) -> &ElevatorConfig {
        &self.ctx.config
    }

    /// Recent transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Transition> {
        self.fsm.history()
    }

    pub fn transition_count(&self) -> u64 {
        self.fsm.transition_count()
    }
}
