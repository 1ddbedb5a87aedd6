//! Best-score persistence
//!
//! The simulation never touches storage; the session reads the best score at
//! startup and writes it back through `ScoreStore` when a run beats it.
//!
//! Stores:
//! - `MemoryStore`: in-process, for tests and embedding
//! - `JsonFileStore`: versioned JSON envelope, written via tmp file + rename
//! - `LocalStorageStore` (wasm32): browser LocalStorage

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Failure to read or write a store
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
    UnsupportedVersion { found: u32 },
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o error: {err}"),
            Self::Parse(err) => write!(f, "store contents unreadable: {err}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported store version: {found}")
            }
            Self::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Where the best score lives between sessions
pub trait ScoreStore {
    fn read_best(&self) -> Result<u64, StoreError>;
    fn write_best(&mut self, best: u64) -> Result<(), StoreError>;
}

/// Keeps the best score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryStore {
    fn read_best(&self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn write_best(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = best;
        Ok(())
    }
}

/// On-disk format version
const FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    best: u64,
}

/// Best score in a small JSON file: `{"version":1,"best":N}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    /// A missing file is a fresh install, not an error
    fn read_best(&self) -> Result<u64, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let envelope: Envelope = serde_json::from_str(&json)?;
        if envelope.version != FILE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: envelope.version,
            });
        }
        Ok(envelope.best)
    }

    fn write_best(&mut self, best: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&Envelope {
            version: FILE_VERSION,
            best,
        })?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", best, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage, holding the score as a plain integer string
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "dinoish_best_v1";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    /// Anything that isn't a number reads as 0
    fn read_best(&self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)?;
        Ok(raw
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(|n| n as u64)
            .unwrap_or(0))
    }

    fn write_best(&mut self, best: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &best.to_string())
            .map_err(|_| StoreError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_path(name: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("dinoish-test-{}-{}", std::process::id(), n))
            .join(name)
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new(12);
        assert_eq!(store.read_best().unwrap(), 12);
        store.write_best(40).unwrap();
        assert_eq!(store.read_best().unwrap(), 40);
    }

    #[test]
    fn test_file_store_missing_reads_zero() {
        let store = JsonFileStore::new(scratch_path("best.json"));
        assert_eq!(store.read_best().unwrap(), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let path = scratch_path("best.json");
        let mut store = JsonFileStore::new(&path);
        store.write_best(1234).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.read_best().unwrap(), 1234);
        assert!(!store.tmp_path().exists());

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"version":1,"best":1234}"#);
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_file_store_rejects_garbage_and_future_versions() {
        let path = scratch_path("best.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.read_best(), Err(StoreError::Parse(_))));

        fs::write(&path, r#"{"version":9,"best":5}"#).unwrap();
        assert!(matches!(
            store.read_best(),
            Err(StoreError::UnsupportedVersion { found: 9 })
        ));
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
