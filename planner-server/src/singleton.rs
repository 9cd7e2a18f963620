//! One server per data file.
//!
//! The JSON store keeps the whole database in memory and rewrites the file on
//! every mutation, so two servers on the same file would overwrite each
//! other's changes. Servers on different data files may run side by side.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Holds the lock until dropped
pub struct LockGuard {
    _file: File,
}

/// `planner.json` is guarded by `planner.json.lock` in the same directory.
fn lock_path(data_file: &Path) -> PathBuf {
    let mut name = data_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "planner".into());
    name.push(".lock");
    data_file.with_file_name(name)
}

/// Lock `data_file` for this process, failing if another server holds it.
pub fn acquire_lock(data_file: &Path) -> Result<LockGuard> {
    let path = lock_path(data_file);
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another planner-server is already using {}.\n\
            If you believe this is an error, remove: {}",
            data_file.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lock_sits_next_to_data_file() {
        assert_eq!(
            lock_path(Path::new("/data/planner/planner.json")),
            PathBuf::from("/data/planner/planner.json.lock")
        );
    }

    #[test]
    fn test_second_lock_on_same_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("nested").join("planner.json");

        let guard = acquire_lock(&data_file).unwrap();
        let err = acquire_lock(&data_file).err().unwrap();
        assert!(err.to_string().contains("already using"));

        drop(guard);
        assert!(acquire_lock(&data_file).is_ok());
    }

    #[test]
    fn test_different_data_files_do_not_conflict() {
        let dir = tempfile::tempdir().unwrap();

        let _a = acquire_lock(&dir.path().join("a.json")).unwrap();
        assert!(acquire_lock(&dir.path().join("b.json")).is_ok());
    }
}
