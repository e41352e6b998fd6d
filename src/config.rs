//! Elevator configuration parameters
//!
//! The ground floor and the four state timeouts.  Fixed once the
//! [`ElevatorService`](crate::app::service::ElevatorService) is built;
//! there is no runtime reconfiguration.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Floor index.  Floors are numbered from 1; there is no "unknown" floor.
pub type Floor = usize;

/// Core elevator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorConfig {
    // --- Position ---
    /// Reference floor used as the restoration target
    pub ground_floor: Floor,

    // --- Timeouts ---
    /// Max time for the doors to report fully open (milliseconds)
    pub door_open_timeout_ms: u32,
    /// Max time for the doors to report fully closed (milliseconds)
    pub door_close_timeout_ms: u32,
    /// Max time for the drive to report arrival (milliseconds)
    pub move_timeout_ms: u32,
    /// How long the doors stay open before closing on their own (milliseconds)
    pub waiting_ms: u32,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            ground_floor: 1,

            door_open_timeout_ms: 5_000,
            door_close_timeout_ms: 7_000,
            move_timeout_ms: 60_000,
            waiting_ms: 10_000,
        }
    }
}

impl ElevatorConfig {
    /// Parse a JSON document and validate it.  Missing fields take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ground_floor == 0 {
            return Err(ConfigError::InvalidGroundFloor);
        }
        let timeouts = [
            ("door_open_timeout_ms", self.door_open_timeout_ms),
            ("door_close_timeout_ms", self.door_close_timeout_ms),
            ("move_timeout_ms", self.move_timeout_ms),
            ("waiting_ms", self.waiting_ms),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::ZeroTimeout(field));
            }
        }
        Ok(())
    }

    pub fn door_open_timeout(&self) -> Duration {
        Duration::from_millis(self.door_open_timeout_ms.into())
    }

    pub fn door_close_timeout(&self) -> Duration {
        Duration::from_millis(self.door_close_timeout_ms.into())
    }

    pub fn move_timeout(&self) -> Duration {
        Duration::from_millis(self.move_timeout_ms.into())
    }

    pub fn waiting_time(&self) -> Duration {
        Duration::from_millis(self.waiting_ms.into())
    }
}
