use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::entities::conversions;
use crate::entities::reading::{CreateReadingRequest, Reading};
use crate::services::identifiers::next_available_id;
use vitals_log_data::models::ReadingRecord;
use vitals_log_data::repository::{ReadingStorage, RepositoryError};

/// Readings service errors
#[derive(Debug, Error)]
pub enum ReadingsServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Reading not found: {0}")]
    NotFound(i64),

    /// A client-supplied identifier is already in use
    #[error("Reading id already exists: {0}")]
    DuplicateId(i64),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ReadingsServiceError {
    fn from(err: RepositoryError) -> Self {
        ReadingsServiceError::Storage(err.to_string())
    }
}

/// Trait for readings service operations
#[async_trait]
pub trait ReadingsServiceTrait {
    /// Validate a create reading request
    fn validate_create_request(&self, request: &CreateReadingRequest) -> Result<(), ReadingsServiceError>;

    /// Get all readings in collection order
    async fn list_readings(&self) -> Result<Vec<Reading>, ReadingsServiceError>;

    /// Record a new reading and return it as stored
    async fn add_reading(&self, request: CreateReadingRequest) -> Result<Reading, ReadingsServiceError>;

    /// Delete a reading, returning the identifier that was removed
    async fn delete_reading(&self, id: i64) -> Result<i64, ReadingsServiceError>;
}

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Readings service over a single collection.
///
/// Add and delete run their whole load-mutate-save cycle under one lock, so
/// concurrent writers cannot overwrite each other's changes. Create exactly
/// one service per backing document.
pub struct ReadingsService<S: ReadingStorage> {
    storage: S,
    write_lock: Mutex<()>,
    clock: Clock,
}

impl<S: ReadingStorage> ReadingsService<S> {
    /// Create a new readings service
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
            clock: Box::new(|| Utc::now().timestamp_millis()),
        }
    }

    /// Replace the millisecond clock used for generated identifiers
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

/// Keep the collection ordered by `"{date} {time}"`; equal keys keep insertion order
fn sort_by_date_time(readings: &mut [ReadingRecord]) {
    readings.sort_by_cached_key(ReadingRecord::sort_key);
}

#[async_trait]
impl<S: ReadingStorage> ReadingsServiceTrait for ReadingsService<S> {
    fn validate_create_request(&self, request: &CreateReadingRequest) -> Result<(), ReadingsServiceError> {
        // Use the validator crate's validation
        if let Err(validation_errors) = request.validate() {
            let field_errors = validation_errors.field_errors();
            let mut fields: Vec<_> = field_errors.iter().collect();
            fields.sort_by_key(|(field, _)| **field);

            // Convert validation errors to a meaningful error message
            let error_message = fields
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid {}", field),
                    })
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(ReadingsServiceError::ValidationError(error_message));
        }

        Ok(())
    }

    async fn list_readings(&self) -> Result<Vec<Reading>, ReadingsServiceError> {
        let readings = self.storage.load().await;
        debug!("Listing {} readings", readings.len());

        Ok(readings
            .into_iter()
            .map(conversions::convert_to_domain_reading)
            .collect())
    }

    async fn add_reading(&self, request: CreateReadingRequest) -> Result<Reading, ReadingsServiceError> {
        self.validate_create_request(&request)?;
        let new_reading = request
            .into_new_reading()
            .map_err(ReadingsServiceError::ValidationError)?;

        let _guard = self.write_lock.lock().await;
        let mut readings = self.storage.load().await;
        let taken: HashSet<i64> = readings.iter().map(|r| r.id).collect();

        let id = match new_reading.requested_id {
            Some(id) if taken.contains(&id) => {
                warn!("Rejecting reading with duplicate client id {}", id);
                return Err(ReadingsServiceError::DuplicateId(id));
            }
            Some(id) => id,
            None => next_available_id((self.clock)(), &taken),
        };

        let record = conversions::convert_to_data_record(new_reading, id);
        readings.push(record.clone());
        sort_by_date_time(&mut readings);

        if let Err(e) = self.storage.save(&readings).await {
            error!("Failed to save new reading {}: {}", id, e);
            return Err(e.into());
        }

        info!("Reading {} recorded for {}", id, record.date);
        Ok(conversions::convert_to_domain_reading(record))
    }

    async fn delete_reading(&self, id: i64) -> Result<i64, ReadingsServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut readings = self.storage.load().await;

        let position = readings
            .iter()
            .position(|r| r.id == id)
            .ok_or(ReadingsServiceError::NotFound(id))?;
        readings.remove(position);

        if let Err(e) = self.storage.save(&readings).await {
            error!("Failed to save collection after deleting {}: {}", id, e);
            return Err(e.into());
        }

        info!("Reading {} deleted", id);
        Ok(id)
    }
}

/// Create a readings service over the given storage
pub fn create_readings_service<S>(storage: S) -> impl ReadingsServiceTrait + Send + Sync
where
    S: ReadingStorage + 'static,
{
    ReadingsService::new(storage)
}
