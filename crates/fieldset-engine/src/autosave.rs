//! Key-value storage for form autosave snapshots.
//!
//! Snapshots are JSON payloads stored under a key derived from the form
//! id. Two backends: [`MemoryStore`] (always available, ephemeral) and
//! [`FileStore`] (one JSON file, written with the write-then-rename
//! pattern so a crash never leaves a half-written store).
//!
//! Failure policy: storage problems are reported as [`StorageError`] so
//! the engine can log and move on — a broken or corrupt store must never
//! surface to the user or block anything.

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Errors from storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O failure during file operations.
    Io(std::io::Error),
    /// JSON encode/decode failure.
    Serialization(String),
    /// Store state is unusable (poisoned lock, bad file shape).
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key under which a form's snapshot is stored.
#[must_use]
pub fn autosave_key(form_id: &str) -> String {
    format!("form-autosave-{form_id}")
}

/// Pluggable key-value backend for autosave payloads.
pub trait AutosaveStore: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Load the payload stored under `key`, if any.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `payload` under `key`, replacing any previous value.
    fn save(&self, key: &str, payload: &str) -> StorageResult<()>;

    /// Remove the payload stored under `key`.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────
// Memory store
// ─────────────────────────────────────────────────────────────────────────

/// In-memory store for tests and hosts without persistence.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AutosaveStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> StorageResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.remove(key);
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.entries.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryStore").field("entries", &count).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────
// File store
// ─────────────────────────────────────────────────────────────────────────

/// On-disk JSON format.
#[derive(Serialize, Deserialize)]
struct StoreFile {
    /// Format version for future migrations.
    format_version: u32,
    /// Key → payload map.
    entries: HashMap<String, String>,
}

impl StoreFile {
    const FORMAT_VERSION: u32 = 1;

    fn new() -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// File-backed store: one JSON file holding every key.
///
/// Writes go to `{path}.tmp` first, are flushed and synced, then renamed
/// over the real file, so readers only ever see a whole store. A file
/// with an unexpected format version is treated as absent.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the given path; the file is created on first
    /// save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    fn read_all(&self) -> StorageResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let store: StoreFile = serde_json::from_reader(reader)
            .map_err(|e| StorageError::Serialization(format!("failed to parse store file: {e}")))?;
        if store.format_version != StoreFile::FORMAT_VERSION {
            tracing::warn!(
                stored = store.format_version,
                expected = StoreFile::FORMAT_VERSION,
                "autosave store format version mismatch, ignoring stored data"
            );
            return Ok(HashMap::new());
        }
        Ok(store.entries)
    }

    fn write_all(&self, entries: HashMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut store = StoreFile::new();
        store.entries = entries;

        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &store)
                .map_err(|e| StorageError::Serialization(format!("failed to serialize store: {e}")))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "autosave store written");
        Ok(())
    }
}

impl AutosaveStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, payload: &str) -> StorageResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), payload.to_string());
        self.write_all(entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(entries)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore").field("path", &self.path).finish()
    }
}
