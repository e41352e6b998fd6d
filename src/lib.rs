//! Single-car elevator controller.
//!
//! A Moore state machine decides when the car moves, opens and closes its
//! doors, holds for a manual stop, and drops out of service on faults or
//! timeouts.  The user interface, door operator, drive, and timer are
//! reached only through the port traits in [`app::ports`], so the whole
//! crate runs on the host against mock adapters.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod queue;

pub use app::events::Event;
pub use app::service::ElevatorService;
pub use config::{ElevatorConfig, Floor};
pub use error::{ConfigError, Error};
pub use fsm::StateId;
