// Vitals Log Data
// This crate owns the JSON document that persists reading records

// Storage models
pub mod models;

// Storage backends for the readings collection
pub mod repository;
