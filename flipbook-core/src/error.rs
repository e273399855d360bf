//! Error types for Flipbook Core

use thiserror::Error;

/// Result type alias using FlipbookError
pub type Result<T> = std::result::Result<T, FlipbookError>;

/// Top-level error type for all Flipbook operations
#[derive(Debug, Error)]
pub enum FlipbookError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl FlipbookError {
    /// Whether retrying the same action may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, FlipbookError::Storage(_))
    }
}

/// Errors caused by what the user supplied
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("A book title is required")]
    MissingTitle,

    #[error("A book needs at least one page")]
    NoPages,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Unreadable file {name}: {reason}")]
    UnreadableFile { name: String, reason: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

impl InputError {
    pub fn unreadable(name: impl Into<String>, reason: impl ToString) -> Self {
        InputError::UnreadableFile {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors from the page-index mapper and navigator
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum LayoutError {
    #[error("Content index {index} out of range for {len} pages")]
    ContentOutOfRange { index: usize, len: usize },

    #[error("Table of contents needs at least one entry per sheet")]
    ZeroEntriesPerSheet,
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Corrupt record at {path}: {reason}")]
    Corrupt { path: String, reason: String },
}
