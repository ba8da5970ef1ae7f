//! Body file I/O: Transformer (`.prog`) and Generated Test (`.tst`) blobs,
//! written atomically via `NamedTempFile` + `persist()` in the target
//! directory so a reader never observes a torn file (P8).

use std::io::{Read, Write};
use std::path::Path;

use tracewright_core::{CacheError, GeneratedTest, Transformer};

pub fn write_transformer(dir: &Path, file_name: &str, transformer: &Transformer) -> Result<(), CacheError> {
    write_atomic(dir, file_name, &serde_json::to_vec_pretty(transformer).map_err(|e| CacheError::BodyWrite {
        path: dir.join(file_name).display().to_string(),
        message: e.to_string(),
    })?)
}

pub fn write_test(dir: &Path, file_name: &str, test: &GeneratedTest) -> Result<(), CacheError> {
    write_atomic(
        dir,
        file_name,
        &serde_json::to_vec_pretty(test)
            .map_err(|e| CacheError::BodyWrite { path: dir.join(file_name).display().to_string(), message: e.to_string() })?,
    )
}

fn write_atomic(dir: &Path, file_name: &str, payload: &[u8]) -> Result<(), CacheError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CacheError::BodyWrite { path: dir.display().to_string(), message: e.to_string() })?;
    let target = dir.join(file_name);
    let mut temp = tempfile::Builder::new()
        .prefix(".tmp-")
        .tempfile_in(dir)
        .map_err(|e| CacheError::BodyWrite { path: target.display().to_string(), message: e.to_string() })?;
    temp.write_all(payload).map_err(|e| CacheError::BodyWrite { path: target.display().to_string(), message: e.to_string() })?;
    temp.flush().map_err(|e| CacheError::BodyWrite { path: target.display().to_string(), message: e.to_string() })?;
    temp.persist(&target).map_err(|e| CacheError::BodyWrite { path: target.display().to_string(), message: e.to_string() })?;
    Ok(())
}

/// Returns `Ok(None)` on a missing body file — the caller treats this as a
/// transient cache miss rather than a hard error (spec.md §4.C4).
pub fn read_transformer(path: &Path) -> Result<Option<Transformer>, CacheError> {
    read_json(path)
}

pub fn read_test(path: &Path) -> Result<Option<GeneratedTest>, CacheError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, CacheError> {
    match std::fs::File::open(path) {
        Ok(mut file) => {
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)
                .map_err(|e| CacheError::IndexRead { path: path.display().to_string(), message: e.to_string() })?;
            serde_json::from_slice(&contents)
                .map(Some)
                .map_err(|e| CacheError::IndexRead { path: path.display().to_string(), message: e.to_string() })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CacheError::IndexRead { path: path.display().to_string(), message: e.to_string() }),
    }
}
