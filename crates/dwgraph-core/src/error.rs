//! Error types for dwgraph Core

use crate::model::NodeKey;
use thiserror::Error;

/// Result type alias using dwgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// dwgraph error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Node already exists: {0}")]
    NodeExists(NodeKey),

    #[error("Edge not found: {src} -> {dest}")]
    EdgeNotFound { src: NodeKey, dest: NodeKey },

    #[error("Self-loop on node {0} is not allowed")]
    SelfLoop(NodeKey),

    #[error("Invalid edge weight: {0}")]
    InvalidWeight(String),

    #[error("No graph is bound")]
    NoGraph,

    #[error("Unknown {capability} type: {name}")]
    UnknownType { capability: String, name: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
