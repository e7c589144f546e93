//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;

use vitals_log_data::repository::ReadingStorage;

/// Reported for a readable document that is not a valid readings array
const CORRUPT_DETAIL: &str = "Readings document is corrupt and is being served as empty";
/// Reported when the readings document cannot be read
const UNAVAILABLE_DETAIL: &str = "Readings document is unavailable";

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but serving incomplete data
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Build a report whose overall status is the worst component status
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        SystemHealth { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the readings document
    /// Returns true if the document is healthy, false if it is corrupt
    /// Returns an error if the check could not be performed
    async fn check_storage_status(&self) -> Result<bool, String>;
}

/// Health service reporting on the readings storage
#[derive(Debug)]
pub struct StorageHealthService<S> {
    storage: S,
}

impl<S: ReadingStorage> StorageHealthService<S> {
    /// Create a new health service
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: ReadingStorage + std::fmt::Debug> HealthServiceTrait for StorageHealthService<S> {
    async fn get_system_health(&self) -> SystemHealth {
        let storage = match self.check_storage_status().await {
            Ok(true) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Ok(false) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some(CORRUPT_DETAIL.to_string()),
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e),
            },
        };

        // The API is always healthy if it is answering
        let api = HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        };

        SystemHealth::from_components(HashMap::from([
            ("storage".to_string(), storage),
            ("api".to_string(), api),
        ]))
    }

    async fn check_storage_status(&self) -> Result<bool, String> {
        match self.storage.check_health().await {
            Ok(true) => Ok(true),
            Ok(false) => {
                warn!(
                    "{} is corrupt and is being served as empty",
                    self.storage.describe()
                );
                Ok(false)
            }
            Err(e) => {
                warn!("Storage health check failed for {}: {}", self.storage.describe(), e);
                Err(UNAVAILABLE_DETAIL.to_string())
            }
        }
    }
}
