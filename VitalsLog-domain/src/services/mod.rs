pub mod identifiers;
pub mod readings;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use readings::{create_readings_service, ReadingsServiceError, ReadingsServiceTrait};
