//! # Satoshi Mirror - Energy Sensor (Subsystem 04)
//!
//! **Bounded Context:** Simulated telemetry
//!
//! Produces random "energy" readings and appends them, one JSON object per
//! line, to a readings log. The monitor loop runs until shutdown unless a
//! reading cap is given.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use sm_04_energy_sensor::EnergySensor;
//!
//! # async fn run() -> sm_04_energy_sensor::Result<()> {
//! let (_tx, rx) = tokio::sync::watch::channel(false);
//! let sensor = EnergySensor::new("energy_readings.jsonl");
//! sensor.monitor(Duration::from_secs(5), Some(3), rx).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
pub mod reading;
pub mod service;

pub use error::{Result, SensorError};
pub use reading::{EnergyReading, MEASURING_STATE};
pub use service::{EnergySensor, MIN_INTERVAL};

/// Subsystem identifier used in log prefixes
pub const SUBSYSTEM_ID: u8 = 4;

/// Default readings log name
pub const READINGS_FILE: &str = "energy_readings.jsonl";
