// Public entities for the VitalsLog API
// This module contains data structures that are shared across the application boundary

// Readings as they appear on the wire
pub mod reading;

// Common entities for error handling
pub mod common;
