//! Per-user book lists

use super::{StorageProvider, StorageResult};
use crate::error::StorageError;
use crate::types::{Book, UserId};
use async_trait::async_trait;
use std::sync::Arc;

/// Whole-list persistence of each user's books. There are no partial updates:
/// callers read everything, change it, and write everything back.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books of `user` in stored order; empty if the user has none
    async fn load_all(&self, user: &UserId) -> StorageResult<Vec<Book>>;

    /// Replace the user's book list
    async fn save_all(&self, user: &UserId, books: &[Book]) -> StorageResult<()>;
}

/// [`BookStore`] keeping one JSON document per user under `books/`
pub struct JsonBookStore {
    provider: Arc<dyn StorageProvider>,
}

impl JsonBookStore {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    fn path(user: &UserId) -> String {
        format!("books/{}.json", user.partition_key())
    }
}

#[async_trait]
impl BookStore for JsonBookStore {
    async fn load_all(&self, user: &UserId) -> StorageResult<Vec<Book>> {
        let path = Self::path(user);
        let data = match self.provider.read(&path).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        serde_json::from_slice(&data).map_err(|e| StorageError::Corrupt {
            path,
            reason: e.to_string(),
        })
    }

    async fn save_all(&self, user: &UserId, books: &[Book]) -> StorageResult<()> {
        let path = Self::path(user);
        let data = serde_json::to_vec_pretty(books).map_err(|e| StorageError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        self.provider.write(&path, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_partitions_by_user() {
        let store = JsonBookStore::new(Arc::new(MemoryStorage::new()));
        let alice = UserId::parse("alice@example.com").unwrap();
        let bob = UserId::parse("bob@example.com").unwrap();

        assert!(store.load_all(&alice).await.unwrap().is_empty());

        let books = vec![Book::new("Holiday").unwrap(), Book::new("Recipes").unwrap()];
        store.save_all(&alice, &books).await.unwrap();

        assert_eq!(store.load_all(&alice).await.unwrap(), books);
        assert!(store.load_all(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_record() {
        let provider = Arc::new(MemoryStorage::new());
        let user = UserId::parse("alice@example.com").unwrap();
        provider
            .write(&JsonBookStore::path(&user), b"not json".to_vec())
            .await
            .unwrap();

        let store = JsonBookStore::new(provider);
        assert!(matches!(
            store.load_all(&user).await,
            Err(StorageError::Corrupt { .. })
        ));
    }
}
