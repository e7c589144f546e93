// Storage models for the readings document
pub mod reading;

pub use reading::{Measurement, ReadingRecord};
