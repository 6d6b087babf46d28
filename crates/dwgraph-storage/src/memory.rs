//! In-memory storage backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::GraphStore;
use dwgraph_core::limits::validate_graph_name;
use dwgraph_core::{DirectedWeightedGraph, GraphCodec};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage backend
///
/// Graphs are kept as encoded documents, so loads go through the same
/// codec path as the file store and always return a fresh copy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, String>>,
    codec: GraphCodec,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphStore for MemoryStore {
    fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    fn save_graph(&self, name: &str, graph: &DirectedWeightedGraph) -> StorageResult<()> {
        validate_graph_name(name)?;
        let document = self.codec.encode(graph)?;
        let mut documents = self
            .documents
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        documents.insert(name.to_string(), document);
        Ok(())
    }

    fn load_graph(&self, name: &str) -> StorageResult<Option<DirectedWeightedGraph>> {
        validate_graph_name(name)?;
        let documents = self
            .documents
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        match documents.get(name) {
            Some(document) => Ok(Some(self.codec.decode(document)?)),
            None => Ok(None),
        }
    }

    fn list_graphs(&self) -> StorageResult<Vec<String>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        let mut names: Vec<String> = documents.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn delete_graph(&self, name: &str) -> StorageResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        documents
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::GraphNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwgraph_core::{GraphAlgorithms, GraphModel, Node};

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.initialize().unwrap();

        // Create a graph
        let mut graph = DirectedWeightedGraph::new();
        graph.add_node(Node::new(1)).unwrap();
        graph.add_node(Node::new(2)).unwrap();
        graph.connect(1, 2, 4.0).unwrap();
        store.save_graph("test-graph", &graph).unwrap();

        // Retrieve the graph
        let retrieved = store.load_graph("test-graph").unwrap();
        assert!(retrieved.is_some());
        let retrieved = retrieved.unwrap();
        assert_eq!(retrieved.edge_count(), 1);
        assert!(store.contains("test-graph").unwrap());

        // Delete the graph
        store.delete_graph("test-graph").unwrap();
        assert!(store.load_graph("test-graph").unwrap().is_none());
    }

    #[test]
    fn test_loaded_graph_is_a_copy() {
        let store = MemoryStore::new();
        let mut graph = DirectedWeightedGraph::new();
        for key in 1..=3 {
            graph.add_node(Node::new(key)).unwrap();
        }
        graph.connect(1, 2, 1.0).unwrap();
        graph.connect(2, 3, 1.0).unwrap();
        store.save_graph("chain", &graph).unwrap();

        let mut first = store.load_graph("chain").unwrap().unwrap();
        first.remove_node(2);

        let mut algo = GraphAlgorithms::with_graph(store.load_graph("chain").unwrap().unwrap());
        assert_eq!(algo.shortest_distance(1, 3), Some(2.0));
    }

    #[test]
    fn test_list_sorted() {
        let store = MemoryStore::new();
        for name in ["zeta", "alpha", "mid"] {
            store
                .save_graph(name, &DirectedWeightedGraph::new())
                .unwrap();
        }
        assert_eq!(store.list_graphs().unwrap(), vec!["alpha", "mid", "zeta"]);
        assert!(matches!(
            store.delete_graph("missing"),
            Err(StorageError::GraphNotFound(_))
        ));
    }
}
