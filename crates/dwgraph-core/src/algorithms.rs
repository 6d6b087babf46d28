//! Shortest-path, connectivity and persistence operations over a bound graph

use crate::codec::{GraphCodec, TypeRegistry};
use crate::error::{Error, Result};
use crate::graph::{DirectedWeightedGraph, GraphModel};
use crate::model::NodeKey;
use crate::traversal::{Dijkstra, GraphPath, TraversalStats};
use std::path::Path;
use std::sync::Arc;

/// Algorithms bound to one directed weighted graph
///
/// Each instance owns a single Dijkstra engine whose state is reset at the
/// start of every run. Queries take `&mut self`; use separate instances to
/// query the same graph from several threads.
#[derive(Debug, Default)]
pub struct GraphAlgorithms {
    graph: Option<Arc<DirectedWeightedGraph>>,
    engine: Dijkstra,
    codec: GraphCodec,
}

impl GraphAlgorithms {
    /// Create an instance with no graph bound
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(graph: impl Into<Arc<DirectedWeightedGraph>>) -> Self {
        let mut algorithms = Self::new();
        algorithms.bind(graph);
        algorithms
    }

    /// Use a custom type registry for save/load
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.codec = GraphCodec::new(registry);
        self
    }

    /// Bind the graph these algorithms operate on
    pub fn bind(&mut self, graph: impl Into<Arc<DirectedWeightedGraph>>) {
        self.graph = Some(graph.into());
    }

    /// The bound graph, if any
    pub fn graph(&self) -> Option<&Arc<DirectedWeightedGraph>> {
        self.graph.as_ref()
    }

    pub fn codec(&self) -> &GraphCodec {
        &self.codec
    }

    /// Statistics of the most recent traversal run
    pub fn last_stats(&self) -> &TraversalStats {
        self.engine.stats()
    }

    /// Deep copy of the bound graph
    pub fn copy(&self) -> Option<DirectedWeightedGraph> {
        self.graph.as_deref().cloned()
    }

    /// True if every node reaches every other node
    ///
    /// Unbound, empty and single-node graphs are connected.
    pub fn is_strongly_connected(&mut self) -> bool {
        let Some(graph) = self.graph.as_deref() else {
            return true;
        };
        let node_count = graph.node_count();
        if node_count <= 1 {
            return true;
        }

        for key in graph.keys() {
            let state = self.engine.run(graph, key, None);
            if state.len() != node_count {
                tracing::debug!(
                    "Node {} reaches {} of {} nodes; graph is not strongly connected",
                    key,
                    state.len(),
                    node_count
                );
                return false;
            }
        }
        true
    }

    /// Length of the shortest path `src -> dest`
    ///
    /// `None` when no graph is bound, either key is missing, or `dest` is
    /// unreachable.
    pub fn shortest_distance(&mut self, src: NodeKey, dest: NodeKey) -> Option<f64> {
        let graph = self.graph.as_deref()?;
        if !graph.contains(src) || !graph.contains(dest) {
            return None;
        }
        if src == dest {
            return Some(0.0);
        }

        self.engine.run(graph, src, Some(dest)).distance(dest)
    }

    /// Shortest path `src -> dest` as ordered node keys plus edges
    ///
    /// `None` means there is no path; a path from a node to itself holds
    /// just that node.
    pub fn shortest_path(&mut self, src: NodeKey, dest: NodeKey) -> Option<GraphPath> {
        self.shortest_distance(src, dest)?;
        if src == dest {
            return Some(GraphPath::trivial(src));
        }

        // Reuse the state left by the distance run above
        let graph = self.graph.as_deref()?;
        let keys = self.engine.state().path_to(dest)?;
        GraphPath::from_keys(graph, keys)
    }

    /// Save the bound graph as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let result = self.write_graph(path);
        if let Err(e) = &result {
            tracing::warn!("Failed to save graph to {:?}: {}", path, e);
        }
        result
    }

    /// Load a graph from JSON and bind it
    ///
    /// The file is decoded into a new graph first; on any failure the
    /// currently bound graph is left as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match self.read_graph(path) {
            Ok(graph) => {
                tracing::info!(
                    "Loaded graph with {} nodes and {} edges from {:?}",
                    graph.node_count(),
                    graph.edge_count(),
                    path
                );
                self.bind(graph);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load graph from {:?}: {}", path, e);
                Err(e)
            }
        }
    }

    fn write_graph(&self, path: &Path) -> Result<()> {
        let graph = self.graph.as_deref().ok_or(Error::NoGraph)?;
        let text = self.codec.encode(graph)?;
        std::fs::write(path, text)?;
        tracing::info!(
            "Saved graph with {} nodes and {} edges to {:?}",
            graph.node_count(),
            graph.edge_count(),
            path
        );
        Ok(())
    }

    fn read_graph(&self, path: &Path) -> Result<DirectedWeightedGraph> {
        let text = std::fs::read_to_string(path)?;
        self.codec.decode(&text)
    }
}
