// Domain entities and value objects
pub mod conversions;
pub mod reading;

// Re-export common types for easier imports
pub use reading::{CreateReadingRequest, Measurement, NewReading, NumberInput, Reading};
