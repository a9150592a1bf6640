use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Document;

/// Schema version of the persisted envelope. Bumping this invalidates all
/// previously stored collections: there is no migration, a mismatch resets
/// the store to empty on load.
pub const STORAGE_VERSION: u32 = 1;

/// Error type for persistence operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Failed to determine home directory")]
    HomeDirUnavailable,
}

/// The versioned wrapper record for the persisted document collection
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    documents: Vec<Document>,
    /// Save time in milliseconds since the epoch
    timestamp: i64,
}

/// Durable round-trip of the full document collection.
///
/// The backend is injected into the store so the engine can be tested
/// without touching the filesystem.
pub trait Persistence {
    /// Loads the full document collection
    fn load(&self) -> Result<Vec<Document>, StorageError>;

    /// Saves the full document collection, overwriting any prior value
    fn save(&self, documents: &[Document]) -> Result<(), StorageError>;
}

/// Returns the AutoSpec data directory.
///
/// Honors the `AUTOSPEC_DATA_DIR` environment variable, otherwise defaults
/// to `~/.autospec`.
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    if let Ok(dir) = std::env::var("AUTOSPEC_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let home_dir = dirs::home_dir().ok_or(StorageError::HomeDirUnavailable)?;
    Ok(home_dir.join(".autospec"))
}

/// File-backed persistence: the whole collection lives in a single JSON
/// file under a versioned envelope
pub struct FileStorage {
    file_path: PathBuf,
}

impl FileStorage {
    /// Creates a new FileStorage instance writing to the given file
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Creates a FileStorage at the default location,
    /// `<data dir>/documents.json`
    pub fn default_location() -> Result<Self, StorageError> {
        Ok(Self::new(default_data_dir()?.join("documents.json")))
    }

    /// Returns the path to the storage file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Removes the stored collection entirely
    pub fn clear(&self) -> Result<(), StorageError> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}

impl Persistence for FileStorage {
    fn load(&self) -> Result<Vec<Document>, StorageError> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let envelope: Envelope = serde_json::from_str(&content)?;

        // No migration across schema versions: discard the record and
        // start empty. The markdown export is the backup path for data
        // that predates a version bump.
        if envelope.version != STORAGE_VERSION {
            log::warn!(
                "Storage schema version mismatch (found {}, expected {}), clearing stored documents",
                envelope.version,
                STORAGE_VERSION
            );
            fs::remove_file(&self.file_path)?;
            return Ok(Vec::new());
        }

        Ok(envelope.documents)
    }

    fn save(&self, documents: &[Document]) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let envelope = Envelope {
            version: STORAGE_VERSION,
            documents: documents.to_vec(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let json = serde_json::to_string(&envelope)?;
        fs::write(&self.file_path, json)?;

        Ok(())
    }
}

/// In-memory persistence backend, used by tests and headless embedding
#[derive(Default)]
pub struct MemoryStorage {
    documents: std::cell::RefCell<Vec<Document>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> Result<Vec<Document>, StorageError> {
        Ok(self.documents.borrow().clone())
    }

    fn save(&self, documents: &[Document]) -> Result<(), StorageError> {
        *self.documents.borrow_mut() = documents.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority, Requirement, Status};
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample_document() -> Document {
        Document {
            id: "doc-1".to_string(),
            name: "Checkout Flow".to_string(),
            intent: "Reduce cart abandonment".to_string(),
            context: String::new(),
            content: "# Checkout".to_string(),
            requirements: vec![Requirement {
                id: "req-1".to_string(),
                number: "F-1".to_string(),
                text: "Must support guest checkout".to_string(),
                category: Category::Functional,
                priority: Priority::High,
                status: Status::Draft,
                dependencies: Vec::new(),
                comments: Vec::new(),
            }],
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap(),
            version: 3,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("documents.json"));

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("documents.json"));

        let documents = vec![sample_document()];
        storage.save(&documents).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, documents);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("documents.json"));

        storage.save(&[sample_document()]).unwrap();
        storage.save(&[]).unwrap();

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_version_mismatch_clears_stored_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("documents.json");
        let storage = FileStorage::new(&path);

        // Envelope written by a hypothetical older schema
        let stale = serde_json::json!({
            "version": 0,
            "documents": [],
            "timestamp": 0,
        });
        fs::write(&path, stale.to_string()).unwrap();

        assert!(storage.load().unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_backfills_intent_and_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("documents.json");
        let storage = FileStorage::new(&path);

        // A document persisted before the intent/context fields existed
        let legacy = serde_json::json!({
            "version": STORAGE_VERSION,
            "documents": [{
                "id": "doc-1",
                "name": "Legacy",
                "content": "body",
                "requirements": [],
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z",
                "version": 1,
            }],
            "timestamp": 0,
        });
        fs::write(&path, legacy.to_string()).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].intent, "");
        assert_eq!(loaded[0].context, "");
        assert_eq!(loaded[0].content, "body");
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("documents.json");
        let storage = FileStorage::new(&path);

        storage.save(&[sample_document()]).unwrap();
        assert!(path.exists());

        storage.clear().unwrap();
        assert!(!path.exists());
        assert!(storage.load().unwrap().is_empty());
    }
}
