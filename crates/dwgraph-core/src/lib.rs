//! dwgraph Core - Directed weighted graphs and shortest paths
//!
//! This crate provides the graph model, the Dijkstra traversal engine,
//! the algorithms built on it, and the JSON codec used to persist graphs.

pub mod algorithms;
pub mod codec;
pub mod error;
pub mod graph;
pub mod limits;
pub mod model;
pub mod traversal;

pub use algorithms::GraphAlgorithms;
pub use codec::{Capability, GraphCodec, TypeRegistry, FORMAT_VERSION};
pub use error::{Error, Result};
pub use graph::{DirectedWeightedGraph, GraphModel};
pub use model::{Edge, EdgeData, GeoLocation, Node, NodeData, NodeKey};
pub use traversal::{Dijkstra, GraphPath, NodeRecord, PathEdge, TraversalState, TraversalStats};
