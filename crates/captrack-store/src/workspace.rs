//! Workspace snapshot files
//!
//! The whole `Store` is kept as one pretty-printed JSON document. Writes go
//! through a temp file and a rename so a reader never sees a partial file.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::Path;

use captrack_core::errors::{ExError, ExErrorKind};
use captrack_core::ops::Store;

use crate::errors::{io_error, serialization_error, Result};

/// Load a workspace snapshot
///
/// # Errors
///
/// * `NotFound` - No file at `path`
/// * `Io` - The file could not be read
/// * `Serialization` - The file is not a valid snapshot
pub fn load_workspace(path: &Path) -> Result<Store> {
    if !path.exists() {
        return Err(ExError::new(ExErrorKind::NotFound)
            .with_op("workspace_load")
            .with_entity_id(path.display().to_string())
            .with_message("Workspace file not found"));
    }
    let content = fs::read_to_string(path).map_err(|e| io_error("workspace_load", e))?;
    let store: Store =
        serde_json::from_str(&content).map_err(|e| serialization_error("workspace_load", e))?;
    tracing::debug!(
        path = %path.display(),
        capabilities = store.capabilities().len(),
        plans = store.plans().len(),
        "workspace loaded"
    );
    Ok(store)
}

/// Atomically write a workspace snapshot, creating parent directories
///
/// # Errors
///
/// * `Serialization` - The store could not be encoded
/// * `Io` - The file could not be written
pub fn save_workspace(path: &Path, store: &Store) -> Result<()> {
    let json =
        serde_json::to_string_pretty(store).map_err(|e| serialization_error("workspace_save", e))?;
    atomic_write(path, json.as_bytes())?;
    tracing::debug!(path = %path.display(), "workspace saved");
    Ok(())
}

/// Uses temp file + rename to ensure atomic write
fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_workspace_dir", e))?;
        }
    }

    let temp_path = target_path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| io_error("write_workspace_temp", e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_workspace_temp", e))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("subdir").join("test.json");

        atomic_write(&target, b"nested").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"nested");
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("workspace.json");

        save_workspace(&target, &Store::new()).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["workspace.json"]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let err = load_workspace(&temp_dir.path().join("absent.json")).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_garbage_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("workspace.json");
        fs::write(&target, "not json").unwrap();

        let err = load_workspace(&target).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }
}
