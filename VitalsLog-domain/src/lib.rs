// VitalsLog Domain
// This crate contains the business logic for the VitalsLog application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the repository module from vitals-log-data for convenience
pub use vitals_log_data::repository;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
