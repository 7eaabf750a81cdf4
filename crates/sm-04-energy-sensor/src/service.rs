//! Energy sensor service
//!
//! [`EnergySensor::monitor`] is the long-running loop; it only stops on
//! shutdown or after an optional reading cap.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::{Result, SensorError};
use crate::reading::EnergyReading;

/// Shortest accepted monitoring interval
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Produces readings and appends them to a JSON-lines log
#[derive(Clone, Debug)]
pub struct EnergySensor {
    readings_path: PathBuf,
}

impl EnergySensor {
    /// Create a sensor logging to `readings_path`
    pub fn new(readings_path: impl Into<PathBuf>) -> Self {
        Self {
            readings_path: readings_path.into(),
        }
    }

    /// Readings log
    pub fn readings_path(&self) -> &Path {
        &self.readings_path
    }

    /// Take one reading without recording it
    pub fn measure(&self) -> EnergyReading {
        self.measure_with(&mut rand::thread_rng())
    }

    /// Take one reading from an explicit random source
    pub fn measure_with<R: Rng + ?Sized>(&self, rng: &mut R) -> EnergyReading {
        EnergyReading::sample(rng)
    }

    /// Append one reading to the log
    pub fn record(&self, reading: &EnergyReading) -> Result<()> {
        let mut line = serde_json::to_vec(reading)?;
        line.push(b'\n');

        if let Some(parent) = self.readings_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.readings_path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(&line).map_err(|source| self.io_error(source))
    }

    /// Measure and record every `interval` until `shutdown` is set, its
    /// sender is dropped, or `max_readings` readings have been taken.
    ///
    /// The first reading is taken immediately. Returns the number of
    /// readings recorded.
    pub async fn monitor(
        &self,
        interval: Duration,
        max_readings: Option<u64>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<u64> {
        let interval = interval.max(MIN_INTERVAL);
        info!(
            "[sm-04] Energy monitor started: interval={:?}, log={}",
            interval,
            self.readings_path.display()
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut taken = 0u64;

        loop {
            if *shutdown.borrow() || max_readings.is_some_and(|max| taken >= max) {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let reading = self.measure();
            self.record(&reading)?;
            taken += 1;
            debug!(
                "[sm-04] Reading #{}: energy={:.4} entanglement={:.4}",
                taken, reading.quantum_energy, reading.entanglement_score
            );
        }

        info!("[sm-04] Energy monitor stopped after {} readings", taken);
        Ok(taken)
    }

    fn io_error(&self, source: std::io::Error) -> SensorError {
        SensorError::Io {
            path: self.readings_path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn logged(sensor: &EnergySensor) -> Vec<EnergyReading> {
        match std::fs::read_to_string(sensor.readings_path()) {
            Ok(text) => text
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[test]
    fn test_record_appends_lines() {
        let dir = TempDir::new().unwrap();
        let sensor = EnergySensor::new(dir.path().join("logs").join("energy.jsonl"));

        sensor.record(&sensor.measure()).unwrap();
        sensor.record(&sensor.measure()).unwrap();

        assert_eq!(logged(&sensor).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_stops_at_cap() {
        let dir = TempDir::new().unwrap();
        let sensor = EnergySensor::new(dir.path().join("energy.jsonl"));
        let (_tx, rx) = watch::channel(false);

        let taken = sensor
            .monitor(Duration::from_secs(3), Some(3), rx)
            .await
            .unwrap();

        assert_eq!(taken, 3);
        assert_eq!(logged(&sensor).len(), 3);
    }

    #[tokio::test]
    async fn test_monitor_with_shutdown_already_set() {
        let dir = TempDir::new().unwrap();
        let sensor = EnergySensor::new(dir.path().join("energy.jsonl"));
        let (_tx, rx) = watch::channel(true);

        let taken = sensor
            .monitor(Duration::from_secs(1), None, rx)
            .await
            .unwrap();

        assert_eq!(taken, 0);
        assert!(!sensor.readings_path().exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_stops_on_shutdown() {
        let dir = TempDir::new().unwrap();
        let sensor = EnergySensor::new(dir.path().join("energy.jsonl"));
        let (tx, rx) = watch::channel(false);

        let task = {
            let sensor = sensor.clone();
            tokio::spawn(async move { sensor.monitor(Duration::from_secs(1), None, rx).await })
        };
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        tx.send(true).unwrap();

        let taken = task.await.unwrap().unwrap();
        assert!(taken >= 1);
        assert_eq!(logged(&sensor).len() as u64, taken);
    }

    #[tokio::test]
    async fn test_zero_interval_is_clamped() {
        let dir = TempDir::new().unwrap();
        let sensor = EnergySensor::new(dir.path().join("energy.jsonl"));
        let (_tx, rx) = watch::channel(false);

        let taken = sensor.monitor(Duration::ZERO, Some(2), rx).await.unwrap();
        assert_eq!(taken, 2);
    }
}
