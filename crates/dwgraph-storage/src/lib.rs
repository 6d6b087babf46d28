//! dwgraph Storage - Storage backends for named graphs
//!
//! This crate provides different storage backends for persisting
//! graphs under a name, all sharing the core JSON codec.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::GraphStore;
