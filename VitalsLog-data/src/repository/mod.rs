// Repository module structure
pub mod errors;
mod in_memory;
mod json_file;
mod storage;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use json_file::JsonFileStorage;
pub use storage::ReadingStorage;
