pub mod health;
pub mod readings;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::{health_check, root};
pub use readings::{create_reading, delete_reading, list_readings};
