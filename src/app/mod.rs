//! Application core — pure domain logic, zero I/O.
//!
//! The [`service`] facade wraps the FSM; all interaction with the car's
//! subsystems happens through the **port traits** defined in [`ports`],
//! keeping this layer fully testable without real hardware.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
