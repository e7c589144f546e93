// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::entities::reading::{CreateReadingRequest, Reading};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::readings::{ReadingsServiceError, ReadingsServiceTrait};

/// Identifier handed to the first reading a mock creates
const FIRST_MOCK_ID: i64 = 1_000;

/// Mock implementation of the ReadingsServiceTrait for testing
pub struct MockReadingsService {
    readings: RwLock<Vec<Reading>>,
    should_fail_validation: bool,
    should_fail_storage: bool,
}

impl Default for MockReadingsService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReadingsService {
    /// Create a new mock readings service
    pub fn new() -> Self {
        Self {
            readings: RwLock::new(Vec::new()),
            should_fail_validation: false,
            should_fail_storage: false,
        }
    }

    /// Configure the mock to fail validation
    pub fn with_validation_failure(mut self) -> Self {
        self.should_fail_validation = true;
        self
    }

    /// Configure the mock to fail every write with a storage error
    pub fn with_storage_failure(mut self) -> Self {
        self.should_fail_storage = true;
        self
    }

    /// Add pre-defined readings to the mock
    pub fn with_readings(self, readings: Vec<Reading>) -> Self {
        self.readings
            .write()
            .expect("mock readings lock poisoned")
            .extend(readings);
        self
    }

    fn storage_failure() -> ReadingsServiceError {
        ReadingsServiceError::Storage("mock is configured to fail storage".to_string())
    }
}

#[async_trait]
impl ReadingsServiceTrait for MockReadingsService {
    fn validate_create_request(&self, request: &CreateReadingRequest) -> Result<(), ReadingsServiceError> {
        if self.should_fail_validation {
            return Err(ReadingsServiceError::ValidationError(
                "mock is configured to fail validation".to_string(),
            ));
        }
        if request.date.is_none() || request.systolic.is_none() || request.diastolic.is_none() {
            return Err(ReadingsServiceError::ValidationError(
                "date, systolic, and diastolic are required".to_string(),
            ));
        }
        Ok(())
    }

    async fn list_readings(&self) -> Result<Vec<Reading>, ReadingsServiceError> {
        Ok(self.readings.read().expect("mock readings lock poisoned").clone())
    }

    async fn add_reading(&self, request: CreateReadingRequest) -> Result<Reading, ReadingsServiceError> {
        self.validate_create_request(&request)?;
        if self.should_fail_storage {
            return Err(Self::storage_failure());
        }

        let new_reading = request
            .into_new_reading()
            .map_err(ReadingsServiceError::ValidationError)?;
        let mut readings = self.readings.write().expect("mock readings lock poisoned");
        let id = match new_reading.requested_id {
            Some(id) if readings.iter().any(|r| r.id == id) => {
                return Err(ReadingsServiceError::DuplicateId(id));
            }
            Some(id) => id,
            None => FIRST_MOCK_ID + readings.len() as i64,
        };

        let reading = Reading {
            id,
            date: new_reading.date,
            time: new_reading.time,
            systolic: new_reading.systolic,
            diastolic: new_reading.diastolic,
            heart_rate: new_reading.heart_rate,
            total_chol: new_reading.total_chol,
            hdl: new_reading.hdl,
            ldl: new_reading.ldl,
            trig: new_reading.trig,
            creatinine: new_reading.creatinine,
        };
        readings.push(reading.clone());
        Ok(reading)
    }

    async fn delete_reading(&self, id: i64) -> Result<i64, ReadingsServiceError> {
        let mut readings = self.readings.write().expect("mock readings lock poisoned");
        let position = readings
            .iter()
            .position(|r| r.id == id)
            .ok_or(ReadingsServiceError::NotFound(id))?;
        if self.should_fail_storage {
            return Err(Self::storage_failure());
        }
        readings.remove(position);
        Ok(id)
    }
}

/// Mock implementation of the HealthServiceTrait with a fixed storage status
#[derive(Debug, Clone)]
pub struct MockHealthService {
    storage_status: ComponentStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a mock reporting healthy storage
    pub fn new() -> Self {
        Self {
            storage_status: ComponentStatus::Healthy,
        }
    }

    /// Report the given storage status
    pub fn with_storage_status(mut self, status: ComponentStatus) -> Self {
        self.storage_status = status;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let details = match self.storage_status {
            ComponentStatus::Healthy => None,
            ComponentStatus::Degraded => Some("Readings document is corrupt".to_string()),
            ComponentStatus::Unhealthy => Some("Readings document is unreadable".to_string()),
        };

        SystemHealth::from_components(HashMap::from([
            (
                "storage".to_string(),
                HealthComponent {
                    status: self.storage_status.clone(),
                    details,
                },
            ),
            (
                "api".to_string(),
                HealthComponent {
                    status: ComponentStatus::Healthy,
                    details: None,
                },
            ),
        ]))
    }

    async fn check_storage_status(&self) -> Result<bool, String> {
        match self.storage_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Readings document is unreadable".to_string()),
        }
    }
}
