//! Storage backend trait definitions

use crate::error::StorageResult;
use dwgraph_core::DirectedWeightedGraph;

/// Trait for named-graph storage implementations
pub trait GraphStore: Send + Sync {
    /// Initialize the storage (create directories, etc.)
    fn initialize(&self) -> StorageResult<()>;

    /// Health check
    fn health_check(&self) -> StorageResult<bool>;

    /// Save a graph under `name`, replacing any previous version
    fn save_graph(&self, name: &str, graph: &DirectedWeightedGraph) -> StorageResult<()>;

    /// Load the graph stored under `name`
    fn load_graph(&self, name: &str) -> StorageResult<Option<DirectedWeightedGraph>>;

    /// Names of all stored graphs, sorted
    fn list_graphs(&self) -> StorageResult<Vec<String>>;

    /// Delete a stored graph
    fn delete_graph(&self, name: &str) -> StorageResult<()>;

    fn contains(&self, name: &str) -> StorageResult<bool> {
        Ok(self.list_graphs()?.iter().any(|stored| stored == name))
    }

    /// Load a graph, or start an empty one if nothing is stored yet
    fn load_or_default(&self, name: &str) -> StorageResult<DirectedWeightedGraph> {
        Ok(self.load_graph(name)?.unwrap_or_default())
    }
}
