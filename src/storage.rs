// File: ./src/storage.rs
// Locked, atomic writes for the small files the application persists.
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore;

impl FileStore {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on a sibling `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move {} into place", tmp_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};

    #[test]
    fn test_lock_path_appends_extension() {
        let p = Path::new("/tmp/canvas.env");
        assert_eq!(
            FileStore::get_lock_path(p),
            PathBuf::from("/tmp/canvas.env.lock")
        );
        let bare = Path::new("/tmp/settings");
        assert_eq!(
            FileStore::get_lock_path(bare),
            PathBuf::from("/tmp/settings.lock")
        );
    }

    #[test]
    fn test_atomic_write_replaces_contents() {
        let ctx = TestContext::new();
        let path = ctx.get_config_dir().unwrap().join("file.env");

        FileStore::with_lock(&path, || FileStore::atomic_write(&path, "A=1\n")).unwrap();
        FileStore::with_lock(&path, || FileStore::atomic_write(&path, "B=2\n")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "B=2\n");
        assert!(!path.with_extension("tmp").exists());
    }
}
