//! Storage abstraction layer
//!
//! [`StorageProvider`] is a flat key/value backend. [`BlobStore`] and
//! [`BookStore`] put flipbook semantics on top of it.

mod blob;
mod books;

pub use blob::{BlobStore, ProviderBlobStore};
pub use books::{BookStore, JsonBookStore};

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract storage provider trait
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read data from the given path
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Write data to the given path, replacing what was there
    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Delete data at the given path
    async fn delete(&self, path: &str) -> StorageResult<()>;

    /// List the names of entries directly under the directory `prefix`
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;
}

/// Local filesystem storage provider
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a path under the root, rejecting anything that escapes it
    fn full_path(&self, path: &str) -> StorageResult<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::PermissionDenied(format!(
                        "path escapes storage root: {path}"
                    )));
                }
            }
        }

        Ok(self.root.join(normalized))
    }
}

fn io_error(path: &str, e: std::io::Error) -> StorageError {
    match e.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
        std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(path.to_string()),
        _ => StorageError::BackendError(format!("{path}: {e}")),
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(path)?;
        tokio::fs::read(full_path)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(path, e))?;
        }

        // Write beside the target then rename so readers never see half a file
        let temp_path = full_path.with_extension("tmp");
        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| io_error(path, e))?;
        tokio::fs::rename(&temp_path, &full_path)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        tokio::fs::remove_file(full_path)
            .await
            .map_err(|e| io_error(path, e))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let full_path = self.full_path(prefix)?;
        let mut entries = Vec::new();
        let mut read_dir = match tokio::fs::read_dir(&full_path).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(io_error(prefix, e)),
        };

        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| io_error(prefix, e))?
        {
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let full_path = self.full_path(path)?;
        tokio::fs::try_exists(full_path)
            .await
            .map_err(|e| io_error(path, e))
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::BackendError("memory storage lock poisoned".to_string())
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .map_err(|_| Self::poisoned())?
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(path.to_string(), data);
        Ok(())
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| Self::poisoned())?
            .remove(path)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        // Keys are flat, so emulate a directory listing: direct children only
        let dir = match prefix.trim_end_matches('/') {
            "" => String::new(),
            trimmed => format!("{trimmed}/"),
        };
        let mut names: Vec<String> = self
            .data
            .read()
            .map_err(|_| Self::poisoned())?
            .keys()
            .filter_map(|k| k.strip_prefix(dir.as_str()))
            .filter_map(|rest| rest.split('/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self
            .data
            .read()
            .map_err(|_| Self::poisoned())?
            .contains_key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage.write("test.txt", b"hello".to_vec()).await.unwrap();
        assert_eq!(storage.read("test.txt").await.unwrap(), b"hello");

        assert!(storage.exists("test.txt").await.unwrap());
        assert!(!storage.exists("missing.txt").await.unwrap());

        storage.delete("test.txt").await.unwrap();
        assert!(!storage.exists("test.txt").await.unwrap());
        assert!(matches!(
            storage.read("test.txt").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write("blobs/a", vec![1, 2, 3]).await.unwrap();
        storage.write("blobs/b", vec![4]).await.unwrap();
        assert_eq!(storage.read("blobs/a").await.unwrap(), vec![1, 2, 3]);
        assert_eq!(storage.list("blobs").await.unwrap(), vec!["a", "b"]);

        storage.delete("blobs/a").await.unwrap();
        assert!(matches!(
            storage.read("blobs/a").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(storage.list("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backends_list_alike() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStorage::new(dir.path());
        let memory = MemoryStorage::new();
        let providers: [&dyn StorageProvider; 2] = [&local, &memory];

        for provider in providers {
            provider.write("blobs/b", vec![2]).await.unwrap();
            provider.write("blobs/a", vec![1]).await.unwrap();
            provider.write("books/x.json", vec![3]).await.unwrap();
        }

        for prefix in ["blobs", "blobs/", "books", "missing"] {
            assert_eq!(
                local.list(prefix).await.unwrap(),
                memory.list(prefix).await.unwrap(),
                "listing {prefix}"
            );
        }
        assert_eq!(memory.list("blobs/").await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.write("../escape", vec![]).await,
            Err(StorageError::PermissionDenied(_))
        ));
        assert!(storage.read("/etc/passwd").await.is_err());
    }
}
