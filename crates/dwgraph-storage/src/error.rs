//! Storage error types

use dwgraph_core::limits::ValidationError;
use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid graph name: {0}")]
    InvalidName(#[from] ValidationError),

    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] dwgraph_core::Error),

    #[error("Lock error: {0}")]
    Lock(String),
}
