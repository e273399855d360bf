//! CLI command implementations

mod create;
mod edit;
mod export;
mod list;
mod show;

pub use create::{add, create};
pub use edit::{caption, delete, delete_page, rename};
pub use export::export;
pub use list::list;
pub use show::show;

use anyhow::{Context, Result};
use flipbook_core::ingest::{FileIngestor, UploadedFile};
use flipbook_core::storage::{JsonBookStore, LocalStorage, ProviderBlobStore, StorageProvider};
use flipbook_core::{LayoutOptions, Library, UserId};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// The library opened on a data directory, acting as one user
pub struct Session {
    pub library: Library,
    pub user: UserId,
}

impl Session {
    pub fn open(data_dir: &Path, user: &str, layout: LayoutOptions) -> Result<Self> {
        let user = UserId::parse(user).context("Invalid --user")?;
        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let storage: Arc<dyn StorageProvider> = Arc::new(LocalStorage::new(data_dir));
        let library = Library::new(
            Arc::new(ProviderBlobStore::new(Arc::clone(&storage))),
            Arc::new(JsonBookStore::new(storage)),
            Arc::new(FileIngestor::new()),
        )
        .with_layout(layout);

        tracing::debug!(user = %user, data_dir = %data_dir.display(), "opened library");
        Ok(Self { library, user })
    }
}

pub(crate) fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).with_context(|| format!("Invalid book id: {}", id))
}

/// Read files from disk as uploads, named by their file name
pub(crate) fn read_uploads(paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
    paths
        .iter()
        .map(|path| {
            let data = std::fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| path.display().to_string());
            Ok(UploadedFile::new(name, data))
        })
        .collect()
}

pub(crate) fn spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
