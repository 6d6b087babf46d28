//! Directed weighted graph model and the read contract the engine consumes

use crate::error::{Error, Result};
use crate::limits::validate_weight;
use crate::model::{Edge, EdgeData, NodeData, NodeKey};
use std::collections::{BTreeMap, BTreeSet};

/// Read-only view of a graph used by the traversal engine
///
/// Implementations must not change while a traversal holds a borrow.
pub trait GraphModel {
    /// Get a node by key
    fn node(&self, key: NodeKey) -> Option<&dyn NodeData>;

    /// Get the edge `src -> dest`, if any
    fn edge(&self, src: NodeKey, dest: NodeKey) -> Option<&dyn EdgeData>;

    /// Outgoing edges of a node, ordered by destination (empty for unknown keys)
    fn out_edges(&self, key: NodeKey) -> Vec<&dyn EdgeData>;

    /// All nodes, ordered by key
    fn nodes(&self) -> Vec<&dyn NodeData>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Number of structural mutations applied so far
    fn mode_count(&self) -> u64;

    fn contains(&self, key: NodeKey) -> bool {
        self.node(key).is_some()
    }
}

/// In-memory directed weighted graph
///
/// Nodes and outgoing edges are kept in key order so iteration and
/// persistence are deterministic. Cloning deep-copies every node and edge.
#[derive(Debug, Clone, Default)]
pub struct DirectedWeightedGraph {
    nodes: BTreeMap<NodeKey, Box<dyn NodeData>>,
    out_edges: BTreeMap<NodeKey, BTreeMap<NodeKey, Box<dyn EdgeData>>>,
    in_edges: BTreeMap<NodeKey, BTreeSet<NodeKey>>,
    edge_count: usize,
    mode_count: u64,
}

impl DirectedWeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; fails if the key is already taken
    pub fn add_node(&mut self, node: impl NodeData + 'static) -> Result<()> {
        self.add_boxed_node(Box::new(node))
    }

    /// Add an already boxed node (used by the codec for registered types)
    pub fn add_boxed_node(&mut self, node: Box<dyn NodeData>) -> Result<()> {
        let key = node.key();
        if self.nodes.contains_key(&key) {
            return Err(Error::NodeExists(key));
        }
        self.nodes.insert(key, node);
        self.mode_count += 1;
        Ok(())
    }

    /// Mutable access to a node's attributes
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut (dyn NodeData + 'static)> {
        self.nodes.get_mut(&key).map(|node| &mut **node)
    }

    /// Connect `src -> dest` with `weight`, replacing an existing edge
    pub fn connect(&mut self, src: NodeKey, dest: NodeKey, weight: f64) -> Result<()> {
        self.insert_edge(Box::new(Edge::new(src, dest, weight)))
    }

    /// Insert an already boxed edge, replacing any edge on the same pair
    pub fn insert_edge(&mut self, edge: Box<dyn EdgeData>) -> Result<()> {
        let (src, dest) = (edge.src(), edge.dest());
        validate_weight(edge.weight()).map_err(|e| Error::InvalidWeight(e.to_string()))?;
        if src == dest {
            return Err(Error::SelfLoop(src));
        }
        if !self.nodes.contains_key(&src) {
            return Err(Error::NodeNotFound(src));
        }
        if !self.nodes.contains_key(&dest) {
            return Err(Error::NodeNotFound(dest));
        }

        let replaced = self.out_edges.entry(src).or_default().insert(dest, edge);
        if replaced.is_none() {
            self.edge_count += 1;
        }
        self.in_edges.entry(dest).or_default().insert(src);
        self.mode_count += 1;
        Ok(())
    }

    /// Remove a node together with every edge into or out of it
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Box<dyn NodeData>> {
        let node = self.nodes.remove(&key)?;

        if let Some(outgoing) = self.out_edges.remove(&key) {
            for dest in outgoing.keys() {
                if let Some(sources) = self.in_edges.get_mut(dest) {
                    sources.remove(&key);
                }
            }
            self.edge_count -= outgoing.len();
        }

        if let Some(incoming) = self.in_edges.remove(&key) {
            for src in incoming {
                if let Some(edges) = self.out_edges.get_mut(&src) {
                    if edges.remove(&key).is_some() {
                        self.edge_count -= 1;
                    }
                }
            }
        }

        self.mode_count += 1;
        tracing::debug!("Removed node {} ({} edges remain)", key, self.edge_count);
        Some(node)
    }

    /// Remove the edge `src -> dest`
    pub fn remove_edge(&mut self, src: NodeKey, dest: NodeKey) -> Option<Box<dyn EdgeData>> {
        let edge = self.out_edges.get_mut(&src)?.remove(&dest)?;
        if let Some(sources) = self.in_edges.get_mut(&dest) {
            sources.remove(&src);
        }
        self.edge_count -= 1;
        self.mode_count += 1;
        Some(edge)
    }

    /// All node keys in order
    pub fn keys(&self) -> Vec<NodeKey> {
        self.nodes.keys().copied().collect()
    }

    /// Every edge in the graph, ordered by (src, dest)
    pub fn edges(&self) -> Vec<&dyn EdgeData> {
        self.out_edges
            .values()
            .flat_map(|edges| edges.values().map(|edge| &**edge))
            .collect()
    }

    /// Keys of nodes with an edge into `key`
    pub fn in_neighbors(&self, key: NodeKey) -> Vec<NodeKey> {
        self.in_edges
            .get(&key)
            .map(|sources| sources.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn out_degree(&self, key: NodeKey) -> usize {
        self.out_edges.get(&key).map_or(0, |edges| edges.len())
    }

    pub fn in_degree(&self, key: NodeKey) -> usize {
        self.in_edges.get(&key).map_or(0, |sources| sources.len())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl GraphModel for DirectedWeightedGraph {
    fn node(&self, key: NodeKey) -> Option<&dyn NodeData> {
        self.nodes.get(&key).map(|node| &**node)
    }

    fn edge(&self, src: NodeKey, dest: NodeKey) -> Option<&dyn EdgeData> {
        self.out_edges
            .get(&src)
            .and_then(|edges| edges.get(&dest))
            .map(|edge| &**edge)
    }

    fn out_edges(&self, key: NodeKey) -> Vec<&dyn EdgeData> {
        self.out_edges
            .get(&key)
            .map(|edges| edges.values().map(|edge| &**edge).collect())
            .unwrap_or_default()
    }

    fn nodes(&self) -> Vec<&dyn NodeData> {
        self.nodes.values().map(|node| &**node).collect()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn mode_count(&self) -> u64 {
        self.mode_count
    }
}
