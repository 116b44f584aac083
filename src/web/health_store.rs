//! Single-slot store for the latest wearable health reading.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Health values as posted by a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthUpdate {
    /// Heart rate in beats per minute.
    pub heart_rate_bpm: Option<u16>,
    /// Step count for the day.
    pub steps: Option<u32>,
    /// Active calories for the day.
    pub calories: Option<u32>,
}

/// A stored reading, stamped when the service received it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReading {
    /// Heart rate in beats per minute.
    pub heart_rate_bpm: Option<u16>,
    /// Step count for the day.
    pub steps: Option<u32>,
    /// Active calories for the day.
    pub calories: Option<u32>,
    /// Receipt time.
    pub received_at: DateTime<Utc>,
}

impl HealthReading {
    /// Stamps `update` with `received_at`.
    #[must_use]
    pub const fn from_update(update: HealthUpdate, received_at: DateTime<Utc>) -> Self {
        Self {
            heart_rate_bpm: update.heart_rate_bpm,
            steps: update.steps,
            calories: update.calories,
            received_at,
        }
    }
}

/// Holds at most one reading. Writers replace it; readers get a copy.
///
/// A poisoned lock still holds a whole reading (writes are a single
/// assignment), so poisoning is ignored.
#[derive(Debug, Default)]
pub struct HealthStore {
    latest: RwLock<Option<HealthReading>>,
}

impl HealthStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored reading.
    pub fn record(&self, reading: HealthReading) {
        debug!(received_at = %reading.received_at, "Recording health reading");
        let mut slot = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(reading);
    }

    /// Returns the most recent reading, if any.
    #[must_use]
    pub fn latest(&self) -> Option<HealthReading> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn reading(bpm: u16) -> HealthReading {
        HealthReading::from_update(
            HealthUpdate {
                heart_rate_bpm: Some(bpm),
                ..HealthUpdate::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_store() {
        assert_eq!(HealthStore::new().latest(), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let store = HealthStore::new();
        store.record(reading(60));
        store.record(reading(72));
        assert_eq!(store.latest().unwrap().heart_rate_bpm, Some(72));
    }

    #[test]
    fn test_concurrent_writers_leave_one_whole_reading() {
        let store = Arc::new(HealthStore::new());
        let handles: Vec<_> = (0..8u16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.record(HealthReading::from_update(
                        HealthUpdate {
                            heart_rate_bpm: Some(100 + i),
                            steps: Some(u32::from(i)),
                            calories: None,
                        },
                        Utc::now(),
                    ));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let latest = store.latest().unwrap();
        let bpm = latest.heart_rate_bpm.unwrap();
        assert_eq!(latest.steps, Some(u32::from(bpm - 100)));
    }

    #[test]
    fn test_update_json_fields_optional() {
        let update: HealthUpdate = serde_json::from_str(r#"{"steps": 4200}"#).unwrap();
        assert_eq!(update.steps, Some(4200));
        assert_eq!(update.heart_rate_bpm, None);
    }
}
