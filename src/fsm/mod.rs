//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable                                                   │
//! │  ┌──────────────┬──────────────────────┬───────────────────┐  │
//! │  │ StateId      │ on_enter             │ on_event          │  │
//! │  ├──────────────┼──────────────────────┼───────────────────┤  │
//! │  │ Stopped      │ fn(ctx)->Option<>    │ fn(ctx, ev)->Opt  │  │
//! │  │ Moving       │ fn(ctx)->Option<>    │ fn(ctx, ev)->Opt  │  │
//! │  │ ...          │                      │                   │  │
//! │  │ Restoring    │ fn(ctx)->Some(next)  │ ignore_all        │  │
//! │  └──────────────┴──────────────────────┴───────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each inbound event is offered to `on_event` of the **current** state.
//! `None` means the state does not handle it: nothing changes and the
//! event is reported as not accepted.  `Some(next)` makes `next` current
//! and runs its `on_enter`.  An `on_enter` that itself returns
//! `Some(next)` marks a pass-through state, and the engine keeps going
//! until an entry action settles.  The whole chain completes inside one
//! [`Fsm::dispatch`] call.

pub mod context;
pub mod states;

use context::FsmContext;
use heapless::HistoryBuffer;
use log::{debug, error, info};

use crate::app::events::Event;

/// Longest pass-through chain the engine will follow in one dispatch.
/// The table never needs more than two states per event.
const MAX_CHAIN: usize = 4;

/// Number of transitions retained for diagnostics.
pub const HISTORY_CAP: usize = 16;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all possible car states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Stopped = 0,
    Moving = 1,
    Holding = 2,
    Resuming = 3,
    Opening = 4,
    Waiting = 5,
    Closing = 6,
    OutOfService = 7,
    Restoring = 8,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 9;

    pub const ALL: [StateId; StateId::COUNT] = [
        Self::Stopped,
        Self::Moving,
        Self::Holding,
        Self::Resuming,
        Self::Opening,
        Self::Waiting,
        Self::Closing,
        Self::OutOfService,
        Self::Restoring,
    ];

    /// Convert an index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `OutOfService` in release.
    pub fn from_index(idx: usize) -> Self {
        if let Some(id) = Self::ALL.get(idx) {
            *id
        } else {
            debug_assert!(false, "invalid state index: {idx}");
            Self::OutOfService
        }
    }

    /// Resuming and Restoring never remain current after a dispatch.
    pub fn is_pass_through(self) -> bool {
        matches!(self, Self::Resuming | Self::Restoring)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter`.  Runs on every entry, including re-entry.
/// Returns `Some(next)` to pass straight through to another state.
pub type StateEnterFn = fn(&mut FsmContext) -> Option<StateId>;

/// Signature for the event handler.
/// Returns `Some(next)` to accept the event and transition, `None` to ignore it.
pub type StateEventFn = fn(&FsmContext, Event) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateEnterFn>,
    pub on_event: StateEventFn,
}

/// One entry in the transition history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    /// The event that was accepted, or `None` for a pass-through step.
    pub cause: Option<Event>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and the current
/// state.  The mutable [`FsmContext`] is threaded through every handler
/// call by the owner.  Not reentrant: callers serialise dispatches.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Total transitions taken, pass-through steps included.
    transition_count: u64,
    history: HistoryBuffer<Transition, HISTORY_CAP>,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    /// The initial state's entry action is not run.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            transition_count: 0,
            history: HistoryBuffer::new(),
        }
    }

    /// Offer `event` to the current state.
    ///
    /// Returns `true` if the state accepted it.  On acceptance the
    /// destination's entry action (and any pass-through chain) has run by
    /// the time this returns.
    pub fn dispatch(&mut self, event: Event, ctx: &mut FsmContext) -> bool {
        let row = &self.table[self.current];
        match (row.on_event)(ctx, event) {
            Some(next) => {
                self.transition(next, Some(event), ctx);
                true
            }
            None => {
                debug!("FSM: {} ignored in {}", event, row.name);
                false
            }
        }
    }

    /// Enter `next` unconditionally, running its entry action even when it
    /// is already current.
    #[cfg(test)]
    pub(crate) fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        self.transition(next, None, ctx);
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    /// Recent transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Transition> {
        self.history.oldest_ordered()
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, cause: Option<Event>, ctx: &mut FsmContext) {
        let mut next_idx = next_id as usize;
        let mut cause = cause;

        for _ in 0..MAX_CHAIN {
            info!(
                "FSM transition: {} -> {}",
                self.table[self.current].name, self.table[next_idx].name
            );
            self.history.write(Transition {
                from: StateId::from_index(self.current),
                to: StateId::from_index(next_idx),
                cause,
            });
            self.transition_count += 1;
            self.current = next_idx;

            let Some(enter) = self.table[self.current].on_enter else {
                return;
            };
            match enter(ctx) {
                Some(follow) => {
                    next_idx = follow as usize;
                    cause = None;
                }
                None => return,
            }
        }

        error!(
            "FSM: pass-through chain longer than {} states, halted in {}",
            MAX_CHAIN, self.table[self.current].name
        );
        debug_assert!(false, "pass-through chain did not settle");
    }
}
