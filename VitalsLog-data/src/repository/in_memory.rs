use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::warn;

use super::errors::RepositoryError;
use super::storage::ReadingStorage;
use crate::models::ReadingRecord;

/// In-memory storage implementation for readings.
///
/// Stands in for the JSON document in tests. Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    /// Storage for readings, in document order
    readings: Arc<Mutex<Vec<ReadingRecord>>>,

    /// When set, every save is rejected
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage preloaded with readings
    pub fn with_readings(readings: Vec<ReadingRecord>) -> Self {
        Self {
            readings: Arc::new(Mutex::new(readings)),
            fail_writes: Arc::default(),
        }
    }

    /// Configure the storage to reject saves
    pub fn with_write_failure(self) -> Self {
        self.set_write_failure(true);
        self
    }

    /// Toggle rejection of saves
    pub fn set_write_failure(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of the stored collection
    pub fn snapshot(&self) -> Result<Vec<ReadingRecord>, RepositoryError> {
        Ok(self.readings.lock()?.clone())
    }
}

#[async_trait]
impl ReadingStorage for InMemoryStorage {
    async fn load(&self) -> Vec<ReadingRecord> {
        match self.snapshot() {
            Ok(readings) => readings,
            Err(e) => {
                warn!("In-memory storage unavailable, serving empty collection: {}", e);
                Vec::new()
            }
        }
    }

    async fn save(&self, readings: &[ReadingRecord]) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::WriteRejected(
                "in-memory storage is configured to reject writes".to_string(),
            ));
        }

        let mut store = self.readings.lock()?;
        *store = readings.to_vec();
        Ok(())
    }

    async fn check_health(&self) -> Result<bool, RepositoryError> {
        let _store = self.readings.lock()?;
        Ok(true)
    }

    fn describe(&self) -> String {
        "in-memory storage".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;

    fn reading(id: i64) -> ReadingRecord {
        ReadingRecord {
            id,
            date: "2024-03-01".to_string(),
            time: String::new(),
            systolic: Measurement::new(121.0).unwrap(),
            diastolic: Measurement::new(79.0).unwrap(),
            heart_rate: None,
            total_chol: None,
            hdl: None,
            ldl: None,
            trig: None,
            creatinine: None,
        }
    }

    #[tokio::test]
    async fn test_clones_share_the_collection() {
        let storage = InMemoryStorage::new();
        let clone = storage.clone();

        clone.save(&[reading(1), reading(2)]).await.unwrap();

        assert_eq!(storage.load().await.len(), 2);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_previous_collection() {
        let storage = InMemoryStorage::with_readings(vec![reading(1)]).with_write_failure();

        let result = storage.save(&[]).await;

        assert!(matches!(result, Err(RepositoryError::WriteRejected(_))));
        assert_eq!(storage.snapshot().unwrap(), vec![reading(1)]);

        storage.set_write_failure(false);
        storage.save(&[]).await.unwrap();
        assert!(storage.load().await.is_empty());
    }
}
