use std::sync::Arc;

use async_trait::async_trait;

use super::errors::RepositoryError;
use crate::models::ReadingRecord;

/// Durable access to exactly one collection of readings.
///
/// `load` never fails: a missing document is created empty and a corrupt one
/// is served as empty. `save` replaces the whole document and propagates
/// every failure.
#[async_trait]
pub trait ReadingStorage: Send + Sync {
    /// Read the full collection
    async fn load(&self) -> Vec<ReadingRecord>;

    /// Overwrite the full collection
    async fn save(&self, readings: &[ReadingRecord]) -> Result<(), RepositoryError>;

    /// Check the backing resource.
    ///
    /// Returns:
    /// - Ok(true) if the document is readable and well formed (or can be created)
    /// - Ok(false) if it is readable but corrupt, so `load` is masking data
    /// - Err if it cannot be read at all
    async fn check_health(&self) -> Result<bool, RepositoryError>;

    /// Where the collection lives, for logs
    fn describe(&self) -> String;
}

#[async_trait]
impl<S: ReadingStorage + ?Sized> ReadingStorage for Arc<S> {
    async fn load(&self) -> Vec<ReadingRecord> {
        (**self).load().await
    }

    async fn save(&self, readings: &[ReadingRecord]) -> Result<(), RepositoryError> {
        (**self).save(readings).await
    }

    async fn check_health(&self) -> Result<bool, RepositoryError> {
        (**self).check_health().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
