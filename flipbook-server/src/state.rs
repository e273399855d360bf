//! Application state

use crate::config::ServerConfig;
use anyhow::Result;
use flipbook_core::ingest::FileIngestor;
use flipbook_core::storage::{JsonBookStore, LocalStorage, ProviderBlobStore, StorageProvider};
use flipbook_core::Library;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Book operations, wired to this server's stores
    pub library: Library,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create state backed by the local data directory
    pub async fn new(config: ServerConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;
        let storage: Arc<dyn StorageProvider> = Arc::new(LocalStorage::new(&config.data_dir));
        tracing::info!(data_dir = %config.data_dir.display(), "using local storage");
        Ok(Self::with_storage(config, storage))
    }

    /// Create state over any storage provider
    pub fn with_storage(config: ServerConfig, storage: Arc<dyn StorageProvider>) -> Self {
        let library = Library::new(
            Arc::new(ProviderBlobStore::new(Arc::clone(&storage))),
            Arc::new(JsonBookStore::new(storage)),
            Arc::new(FileIngestor::new()),
        )
        .with_layout(config.layout);

        Self {
            library,
            config: Arc::new(config),
        }
    }
}
