//! File-backed storage for the readings collection.
//!
//! The whole collection lives in one pretty-printed JSON array. Writes go to
//! a sibling temporary file which is then renamed over the document, so a
//! reader never sees a partially written array.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

use super::errors::RepositoryError;
use super::storage::ReadingStorage;
use crate::models::ReadingRecord;

const EMPTY_DOCUMENT: &str = "[]";
const TEMP_SUFFIX: &str = ".tmp";

/// Result of decoding the raw document
#[derive(Debug)]
struct DecodedDocument {
    readings: Vec<ReadingRecord>,
    /// Array elements that did not have the shape of a reading
    skipped: usize,
}

/// JSON document storage for readings
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage handle for the document at `path`.
    ///
    /// Nothing is touched on disk until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the document named `<file name>.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("readings"));
        file_name.push(TEMP_SUFFIX);
        self.path.with_file_name(file_name)
    }

    async fn create_parent_dir(&self) -> Result<(), RepositoryError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::io(parent, e)),
            _ => Ok(()),
        }
    }

    /// Create the document containing an empty array if it does not exist yet.
    ///
    /// Never truncates: an existing document, including one renamed into place
    /// by a concurrent `save`, is left untouched.
    async fn ensure_document(&self) -> Result<(), RepositoryError> {
        let file = match self.create_new_document().await {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create_parent_dir().await?;
                self.create_new_document().await
            }
            other => other,
        };

        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => return Err(RepositoryError::io(&self.path, e)),
        };

        info!("Creating readings document at {}", self.path.display());
        file.write_all(EMPTY_DOCUMENT.as_bytes())
            .await
            .map_err(|e| RepositoryError::io(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| RepositoryError::io(&self.path, e))
    }

    async fn create_new_document(&self) -> std::io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
    }

    /// Write `body` to the temporary sibling and flush it to disk
    async fn write_temp(&self, temp_path: &Path, body: &[u8]) -> Result<(), RepositoryError> {
        let mut file = File::create(temp_path)
            .await
            .map_err(|e| RepositoryError::io(temp_path, e))?;
        file.write_all(body)
            .await
            .map_err(|e| RepositoryError::io(temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| RepositoryError::io(temp_path, e))
    }

    async fn read_document(&self) -> Result<String, RepositoryError> {
        self.ensure_document().await?;
        fs::read_to_string(&self.path)
            .await
            .map_err(|e| RepositoryError::io(&self.path, e))
    }
}

/// Decode the raw document text.
///
/// Fails only when the text is not a JSON array. Elements of a valid array
/// that are not readings are counted and dropped.
fn decode_document(raw: &str) -> Result<DecodedDocument, serde_json::Error> {
    // A document being created by a concurrent reader may still be empty
    if raw.trim().is_empty() {
        return Ok(DecodedDocument {
            readings: Vec::new(),
            skipped: 0,
        });
    }

    let elements: Vec<Value> = serde_json::from_str(raw)?;
    let total = elements.len();

    let readings: Vec<ReadingRecord> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed reading at index {}: {}", index, e);
                None
            }
        })
        .collect();

    Ok(DecodedDocument {
        skipped: total - readings.len(),
        readings,
    })
}

#[async_trait]
impl ReadingStorage for JsonFileStorage {
    async fn load(&self) -> Vec<ReadingRecord> {
        let raw = match self.read_document().await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to read readings document, serving empty collection: {}", e);
                return Vec::new();
            }
        };

        match decode_document(&raw) {
            Ok(document) => {
                debug!(
                    "Loaded {} readings from {}",
                    document.readings.len(),
                    self.path.display()
                );
                document.readings
            }
            Err(e) => {
                warn!(
                    "Readings document {} is not a JSON array, serving empty collection: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, readings: &[ReadingRecord]) -> Result<(), RepositoryError> {
        let body = serde_json::to_string_pretty(readings)?;
        self.create_parent_dir().await?;

        let temp_path = self.temp_path();
        let written = match self.write_temp(&temp_path, body.as_bytes()).await {
            Ok(()) => fs::rename(&temp_path, &self.path)
                .await
                .map_err(|e| RepositoryError::io(&self.path, e)),
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove {}: {}", temp_path.display(), cleanup);
                }
            }
            return Err(e);
        }

        debug!("Saved {} readings to {}", readings.len(), self.path.display());
        Ok(())
    }

    async fn check_health(&self) -> Result<bool, RepositoryError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            // Created on first access
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(RepositoryError::io(&self.path, e)),
        };

        Ok(matches!(decode_document(&raw), Ok(document) if document.skipped == 0))
    }

    fn describe(&self) -> String {
        format!("JSON file {}", self.path.display())
    }
}
