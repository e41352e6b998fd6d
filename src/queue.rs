//! Serialised event delivery.
//!
//! The engine is not reentrant, so events raised from interrupt
//! handlers, timer callbacks, or from inside a port call (a simulated
//! drive that "arrives" synchronously) must not reach the service
//! directly.  They are pushed into a lock-free single-producer /
//! single-consumer ring instead, and the owner of the service drains it
//! from one context.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ Door ISR    │────▶│             │     │              │     │                  │
//! │ Drive ISR   │────▶│ EventSender │────▶│  spsc ring   │────▶│ EventReceiver    │──▶ ElevatorService
//! │ Timer cb    │────▶│ (producer)  │     │              │     │ (consumer)       │
//! └─────────────┘     └─────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! [`EventQueue::split`] hands out the two halves.  The sender can live
//! inside a port adapter while the receiver drains: the halves borrow
//! disjoint parts of the ring, so an adapter may push while
//! [`EventReceiver::dispatch_all`] is running and the new event is
//! delivered in the same drain.  For ISR use, keep the queue in a
//! `static` and split it once at startup.

use core::sync::atomic::{AtomicU32, Ordering};

use heapless::spsc::{Consumer, Producer, Queue};
use log::error;

use crate::app::events::Event;
use crate::app::ports::ElevatorPorts;
use crate::app::service::ElevatorService;

/// Default ring size.  The ring holds `N - 1` events.
pub const EVENT_QUEUE_CAP: usize = 16;

/// Fixed-capacity ring of pending events, split into an
/// [`EventSender`] / [`EventReceiver`] pair before use.
pub struct EventQueue<const N: usize = EVENT_QUEUE_CAP> {
    ring: Queue<Event, N>,
    dropped: AtomicU32,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            ring: Queue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Split into the producer and consumer halves.
    pub fn split(&mut self) -> (EventSender<'_, N>, EventReceiver<'_, N>) {
        let (tx, rx) = self.ring.split();
        let dropped = &self.dropped;
        (EventSender { tx, dropped }, EventReceiver { rx, dropped })
    }

    /// Events lost to a full ring since creation.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Producer half
// ───────────────────────────────────────────────────────────────

/// Producer half, owned by whichever adapter raises events.
pub struct EventSender<'q, const N: usize = EVENT_QUEUE_CAP> {
    tx: Producer<'q, Event, N>,
    dropped: &'q AtomicU32,
}

impl<const N: usize> EventSender<'_, N> {
    /// Append an event.  Returns `false` if the ring is full (event dropped).
    pub fn push(&mut self, event: Event) -> bool {
        match self.tx.enqueue(event) {
            Ok(()) => true,
            Err(event) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                error!("event queue full, dropping {}", event);
                false
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Consumer half
// ───────────────────────────────────────────────────────────────

/// Consumer half, owned by the context that owns the service.
pub struct EventReceiver<'q, const N: usize = EVENT_QUEUE_CAP> {
    rx: Consumer<'q, Event, N>,
    dropped: &'q AtomicU32,
}

impl<const N: usize> EventReceiver<'_, N> {
    pub fn pop(&mut self) -> Option<Event> {
        self.rx.dequeue()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.rx.ready()
    }

    /// Events lost to a full ring since creation.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Deliver every pending event, in FIFO order, each to completion.
    /// Events pushed by the ports during the drain are delivered too.
    /// Returns how many were accepted.
    pub fn dispatch_all(
        &mut self,
        service: &mut ElevatorService,
        ports: &mut impl ElevatorPorts,
    ) -> usize {
        let mut accepted = 0;
        while let Some(event) = self.pop() {
            if service.handle(event, ports) {
                accepted += 1;
            }
        }
        accepted
    }
}
