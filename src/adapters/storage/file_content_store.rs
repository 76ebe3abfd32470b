//! File-based Content Store Adapter
//!
//! Stores each key as one file under a base directory, value written
//! verbatim. This is the CLI's stand-in for browser local storage.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{ContentStore, ContentStoreError};

const ENTRY_EXTENSION: &str = "entry";

/// File-based key-value store
#[derive(Debug, Clone)]
pub struct FileContentStore {
    base_path: PathBuf,
}

impl FileContentStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created lazily on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Map a key to its file, rejecting keys that would escape the directory
    fn entry_path(&self, key: &str) -> Result<PathBuf, ContentStoreError> {
        let invalid = key.is_empty()
            || key.starts_with('.')
            || key.contains(&['/', '\\', '\0'][..])
            || key.contains("..");
        if invalid {
            return Err(ContentStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{key}.{ENTRY_EXTENSION}")))
    }

    async fn ensure_dir(&self) -> Result<(), ContentStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| ContentStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ContentStoreError> {
        let path = self.entry_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ContentStoreError::IoError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ContentStoreError> {
        let path = self.entry_path(key)?;
        self.ensure_dir().await?;

        fs::write(&path, value)
            .await
            .map_err(|e| ContentStoreError::IoError(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), ContentStoreError> {
        let path = self.entry_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ContentStoreError::IoError(e.to_string())),
        }
    }

    async fn clear(&self) -> Result<(), ContentStoreError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(ContentStoreError::IoError(e.to_string())),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ContentStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(ENTRY_EXTENSION) {
                fs::remove_file(&path)
                    .await
                    .map_err(|e| ContentStoreError::IoError(e.to_string()))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileContentStore) {
        let dir = TempDir::new().unwrap();
        let store = FileContentStore::new(dir.path().join("local"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_file_store_set_and_get() {
        let (_dir, store) = store();

        store
            .set("c1-content-day_1", "{\"quiz\":{}}")
            .await
            .unwrap();

        let value = store.get("c1-content-day_1").await.unwrap();
        assert_eq!(value.as_deref(), Some("{\"quiz\":{}}"));
    }

    #[tokio::test]
    async fn test_file_store_missing_key_before_first_write() {
        let (_dir, store) = store();
        assert!(store.get("cogito-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_value_is_verbatim() {
        let (_dir, store) = store();
        let raw = "{ \"topic\" : \"spaced\",\n  \"n\": 1 }";

        store.set("course", raw).await.unwrap();

        let on_disk = std::fs::read_to_string(store.base_path().join("course.entry")).unwrap();
        assert_eq!(on_disk, raw);
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_traversal() {
        let (_dir, store) = store();

        for key in ["", "../escape", "a/b", ".hidden", "a\\b"] {
            let result = store.set(key, "x").await;
            assert!(
                matches!(result, Err(ContentStoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_file_store_remove_and_clear() {
        let (_dir, store) = store();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        std::fs::write(store.base_path().join("notes.txt"), "keep").unwrap();

        store.remove("a").await.unwrap();
        store.remove("a").await.unwrap();
        assert!(store.get("a").await.unwrap().is_none());

        store.clear().await.unwrap();
        assert!(store.get("b").await.unwrap().is_none());
        assert!(store.base_path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_file_store_clear_without_directory() {
        let (_dir, store) = store();
        assert!(store.clear().await.is_ok());
    }
}
