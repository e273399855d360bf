//! Key-addressed image store

use super::{StorageProvider, StorageResult};
use crate::error::StorageError;
use crate::types::BlobId;
use async_trait::async_trait;
use std::sync::Arc;

/// Image content addressed by [`BlobId`]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store content under a fresh id
    async fn put(&self, content: Vec<u8>) -> StorageResult<BlobId>;

    /// Fetch content; `None` when the id is unknown
    async fn get(&self, id: BlobId) -> StorageResult<Option<Vec<u8>>>;

    /// Remove content. Deleting an unknown id is not an error.
    async fn delete(&self, id: BlobId) -> StorageResult<()>;
}

/// [`BlobStore`] backed by any [`StorageProvider`], one entry per blob under `blobs/`
pub struct ProviderBlobStore {
    provider: Arc<dyn StorageProvider>,
}

impl ProviderBlobStore {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    fn path(id: BlobId) -> String {
        format!("blobs/{id}")
    }
}

#[async_trait]
impl BlobStore for ProviderBlobStore {
    async fn put(&self, content: Vec<u8>) -> StorageResult<BlobId> {
        let id = BlobId::new();
        self.provider.write(&Self::path(id), content).await?;
        Ok(id)
    }

    async fn get(&self, id: BlobId) -> StorageResult<Option<Vec<u8>>> {
        match self.provider.read(&Self::path(id)).await {
            Ok(data) => Ok(Some(data)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: BlobId) -> StorageResult<()> {
        match self.provider.delete(&Self::path(id)).await {
            Ok(()) | Err(StorageError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = ProviderBlobStore::new(Arc::new(MemoryStorage::new()));

        let a = store.put(b"first".to_vec()).await.unwrap();
        let b = store.put(b"first".to_vec()).await.unwrap();
        assert_ne!(a, b);

        assert_eq!(store.get(a).await.unwrap().as_deref(), Some(&b"first"[..]));

        store.delete(a).await.unwrap();
        assert_eq!(store.get(a).await.unwrap(), None);
        assert!(store.get(b).await.unwrap().is_some());

        // second delete is a no-op
        store.delete(a).await.unwrap();
    }
}
