//! `index.json` — the authoritative fingerprint-to-entry map, mutated
//! under an `fd-lock`-guarded exclusive lock and persisted atomically via
//! temp-file-then-rename, grounded on `drift-core::workspace::lock`'s
//! `WorkspaceLock` and the same crate's backup/atomic-write idiom.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use rustc_hash::FxHashMap;
use tracewright_core::{CacheEntry, CacheError};

const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IndexFile {
    pub version: u32,
    pub entries: FxHashMap<String, CacheEntry>,
}

impl Default for IndexFile {
    fn default() -> Self {
        Self { version: INDEX_VERSION, entries: FxHashMap::default() }
    }
}

/// Holds the lock file open for the process lifetime; every read or
/// mutation takes a fresh advisory lock scoped to the call.
pub struct IndexLock {
    lock_file: RwLock<File>,
    index_path: PathBuf,
    lock_path: PathBuf,
}

impl IndexLock {
    pub fn open(root: &Path) -> Result<Self, CacheError> {
        std::fs::create_dir_all(root).map_err(|e| CacheError::IndexWrite {
            path: root.display().to_string(),
            message: e.to_string(),
        })?;
        let lock_path = super::layout::lock_path(root);
        let file = File::create(&lock_path).map_err(|e| CacheError::Lock {
            path: lock_path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { lock_file: RwLock::new(file), index_path: super::layout::index_path(root), lock_path })
    }

    /// Read the index under a shared lock. A missing file reads as empty
    /// (first run against a fresh cache root).
    pub fn read(&mut self) -> Result<IndexFile, CacheError> {
        let _guard = self.lock_file.try_read().map_err(|_| CacheError::Lock {
            path: self.lock_path.display().to_string(),
            message: "index is exclusively locked by a writer".to_string(),
        })?;
        read_unlocked(&self.index_path)
    }

    /// Read-modify-write the index under an exclusive lock so concurrent
    /// `store` calls from different workers never race (spec.md §4.C4:
    /// "writers serialize index updates through file locking").
    pub fn mutate(&mut self, f: impl FnOnce(&mut IndexFile)) -> Result<IndexFile, CacheError> {
        let _guard = self.lock_file.try_write().map_err(|_| CacheError::Lock {
            path: self.lock_path.display().to_string(),
            message: "index is exclusively locked by another writer".to_string(),
        })?;
        let mut index = read_unlocked(&self.index_path)?;
        f(&mut index);
        write_unlocked(&self.index_path, &index)?;
        Ok(index)
    }
}

fn read_unlocked(index_path: &Path) -> Result<IndexFile, CacheError> {
    match File::open(index_path) {
        Ok(mut file) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents).map_err(|e| CacheError::IndexRead {
                path: index_path.display().to_string(),
                message: e.to_string(),
            })?;
            serde_json::from_str(&contents).map_err(|e| CacheError::IndexRead {
                path: index_path.display().to_string(),
                message: e.to_string(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(IndexFile::default()),
        Err(e) => Err(CacheError::IndexRead { path: index_path.display().to_string(), message: e.to_string() }),
    }
}

fn write_unlocked(index_path: &Path, index: &IndexFile) -> Result<(), CacheError> {
    let parent = index_path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::Builder::new()
        .prefix("index-")
        .suffix(".json.tmp")
        .tempfile_in(parent)
        .map_err(|e| CacheError::IndexWrite { path: index_path.display().to_string(), message: e.to_string() })?;

    let payload = serde_json::to_vec_pretty(index)
        .map_err(|e| CacheError::IndexWrite { path: index_path.display().to_string(), message: e.to_string() })?;
    temp.write_all(&payload)
        .map_err(|e| CacheError::IndexWrite { path: index_path.display().to_string(), message: e.to_string() })?;
    temp.flush()
        .map_err(|e| CacheError::IndexWrite { path: index_path.display().to_string(), message: e.to_string() })?;

    temp.persist(index_path)
        .map_err(|e| CacheError::IndexWrite { path: index_path.display().to_string(), message: e.to_string() })?;
    Ok(())
}
