//! Concrete state handler functions and table builder.
//!
//! Each state is two plain `fn` pointers — an entry action and an event
//! handler.  Moore semantics: every side effect belongs to an entry
//! action, and re-entering a state runs its entry action again.
//!
//! ```text
//!  STOPPED ──[request other floor]──▶ MOVING ──[arrived]──▶ OPENING
//!  STOPPED ──[request same floor | open]───────────────────▶ OPENING
//!  OPENING ──[opened]──▶ WAITING ──[close | timer]──▶ CLOSING
//!  WAITING ──[open]──▶ WAITING
//!  CLOSING ──[closed]──▶ STOPPED
//!  MOVING ──[stop]──▶ HOLDING ──[stop]──▶ RESUMING ──▶ MOVING
//!
//!  MOVING | OPENING | CLOSING ──[fault | timer]──▶ OUT_OF_SERVICE
//!  OUT_OF_SERVICE ──[restore]──▶ RESTORING ──▶ OPENING | MOVING
//! ```
//!
//! Resuming and Restoring are pass-through states: their entry action
//! returns the next state, and the engine enters it before the
//! triggering call returns.

use log::{info, warn};

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::app::commands::Command;
use crate::app::events::Event;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Stopped
        StateDescriptor {
            id: StateId::Stopped,
            name: "Stopped",
            on_enter: Some(stopped_enter),
            on_event: stopped_event,
        },
        // Index 1 — Moving
        StateDescriptor {
            id: StateId::Moving,
            name: "Moving",
            on_enter: Some(moving_enter),
            on_event: moving_event,
        },
        // Index 2 — Holding
        StateDescriptor {
            id: StateId::Holding,
            name: "Holding",
            on_enter: Some(holding_enter),
            on_event: holding_event,
        },
        // Index 3 — Resuming
        StateDescriptor {
            id: StateId::Resuming,
            name: "Resuming",
            on_enter: Some(resuming_enter),
            on_event: ignore_all,
        },
        // Index 4 — Opening
        StateDescriptor {
            id: StateId::Opening,
            name: "Opening",
            on_enter: Some(opening_enter),
            on_event: opening_event,
        },
        // Index 5 — Waiting
        StateDescriptor {
            id: StateId::Waiting,
            name: "Waiting",
            on_enter: Some(waiting_enter),
            on_event: waiting_event,
        },
        // Index 6 — Closing
        StateDescriptor {
            id: StateId::Closing,
            name: "Closing",
            on_enter: Some(closing_enter),
            on_event: closing_event,
        },
        // Index 7 — OutOfService
        StateDescriptor {
            id: StateId::OutOfService,
            name: "OutOfService",
            on_enter: Some(out_of_service_enter),
            on_event: out_of_service_event,
        },
        // Index 8 — Restoring
        StateDescriptor {
            id: StateId::Restoring,
            name: "Restoring",
            on_enter: Some(restoring_enter),
            on_event: ignore_all,
        },
    ]
}

/// Handler for pass-through states, which are never current when an
/// event arrives.
fn ignore_all(_ctx: &FsmContext, _event: Event) -> Option<StateId> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  STOPPED — idle at a floor, doors closed
// ═══════════════════════════════════════════════════════════════════════════

fn stopped_enter(ctx: &mut FsmContext) -> Option<StateId> {
    // Door-close timer may still be armed.
    ctx.issue(Command::StopTimer);
    None
}

fn stopped_event(ctx: &FsmContext, event: Event) -> Option<StateId> {
    match event {
        // Destination was stored by the service before dispatch.
        Event::FloorRequested(_) if ctx.position.at_destination() => Some(StateId::Opening),
        Event::FloorRequested(_) => Some(StateId::Moving),
        Event::OpenButton => Some(StateId::Opening),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  MOVING — drive commanded toward the destination
// ═══════════════════════════════════════════════════════════════════════════

fn moving_enter(ctx: &mut FsmContext) -> Option<StateId> {
    let destination = ctx.position.destination_floor;
    ctx.issue(Command::GoToFloor(destination));
    ctx.issue(Command::StartTimer(ctx.config.move_timeout()));
    info!("MOVING: heading to floor {destination}");
    None
}

fn moving_event(_ctx: &FsmContext, event: Event) -> Option<StateId> {
    match event {
        Event::Arrived => Some(StateId::Opening),
        Event::StopButton => Some(StateId::Holding),
        Event::DoorFault | Event::DriveFault | Event::TimerExpired => Some(StateId::OutOfService),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  HOLDING — manual stop, alarm sounding
// ═══════════════════════════════════════════════════════════════════════════

fn holding_enter(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.issue(Command::StopDrive);
    ctx.issue(Command::AlarmOn);
    ctx.issue(Command::StopTimer);
    warn!("HOLDING: stop button pressed, car halted");
    None
}

fn holding_event(_ctx: &FsmContext, event: Event) -> Option<StateId> {
    match event {
        Event::StopButton => Some(StateId::Resuming),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESUMING — pass-through back into the interrupted move
// ═══════════════════════════════════════════════════════════════════════════

fn resuming_enter(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.issue(Command::StartDrive);
    ctx.issue(Command::AlarmOff);
    // Moving's entry sends go_to_floor and the move timer a second time on
    // purpose: Holding cancelled the timer, and the resumed move must be
    // supervised again.
    Some(StateId::Moving)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPENING — at the destination, doors opening
// ═══════════════════════════════════════════════════════════════════════════

fn opening_enter(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.issue(Command::Arrived(ctx.position.destination_floor));
    ctx.issue(Command::OpenDoors);
    ctx.issue(Command::StartTimer(ctx.config.door_open_timeout()));
    None
}

fn opening_event(_ctx: &FsmContext, event: Event) -> Option<StateId> {
    match event {
        Event::DoorsOpened => Some(StateId::Waiting),
        Event::DoorFault | Event::DriveFault | Event::TimerExpired => Some(StateId::OutOfService),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAITING — doors open for passengers
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_enter(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.issue(Command::StartTimer(ctx.config.waiting_time()));
    None
}

fn waiting_event(_ctx: &FsmContext, event: Event) -> Option<StateId> {
    match event {
        // Re-entry restarts the waiting period.
        Event::OpenButton => Some(StateId::Waiting),
        Event::CloseButton | Event::TimerExpired => Some(StateId::Closing),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSING — doors closing
// ═══════════════════════════════════════════════════════════════════════════

fn closing_enter(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.issue(Command::CloseDoors);
    ctx.issue(Command::StartTimer(ctx.config.door_close_timeout()));
    None
}

fn closing_event(_ctx: &FsmContext, event: Event) -> Option<StateId> {
    match event {
        Event::DoorsClosed => Some(StateId::Stopped),
        Event::DoorFault | Event::DriveFault | Event::TimerExpired => Some(StateId::OutOfService),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  OUT_OF_SERVICE — fault or timeout, waits for manual restore
// ═══════════════════════════════════════════════════════════════════════════

fn out_of_service_enter(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.issue(Command::OutOfService);
    ctx.issue(Command::StopTimer);
    warn!(
        "OUT_OF_SERVICE: car withdrawn (destination was floor {})",
        ctx.position.destination_floor
    );
    None
}

fn out_of_service_event(_ctx: &FsmContext, event: Event) -> Option<StateId> {
    match event {
        Event::RestoreService => Some(StateId::Restoring),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESTORING — pass-through, resynchronise position from the drive
// ═══════════════════════════════════════════════════════════════════════════

fn restoring_enter(ctx: &mut FsmContext) -> Option<StateId> {
    // Nothing remembered from before the fault is trusted.  The car may be
    // at any floor or between floors; only a car settled at the ground
    // floor opens its doors, everything else is sent to the ground floor.
    // A drive that cannot name a floor leaves the car unlocated: keep the
    // last known floor and treat the car as between floors.
    let located = ctx.drive.floor >= 1;
    if located {
        ctx.position.current_floor = ctx.drive.floor;
    } else {
        warn!(
            "RESTORING: drive reports floor 0, keeping floor {}",
            ctx.position.current_floor
        );
    }
    ctx.position.destination_floor = ctx.ground_floor();
    ctx.issue(Command::InService);

    info!(
        "RESTORING: drive reports floor {} (settled: {})",
        ctx.drive.floor, ctx.drive.at_floor
    );

    if located && ctx.drive.at_floor && ctx.position.at_destination() {
        Some(StateId::Opening)
    } else {
        Some(StateId::Moving)
    }
}
