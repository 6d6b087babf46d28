//! JSON document format for graphs and the node/edge type registry
//!
//! A saved graph looks like:
//!
//! ```json
//! {
//!   "version": 1,
//!   "nodes": [ { "type": "Node", "key": 1, "weight": 0.0, "info": "", "tag": 0 } ],
//!   "edges": [ { "src": 1, "edges": [ { "type": "Edge", "src": 1, "dest": 2, "weight": 1.5, "info": "", "tag": 0 } ] } ]
//! }
//! ```
//!
//! The `"type"` field names the concrete representation; the registry maps
//! it back to a builder when decoding.

use crate::error::{Error, Result};
use crate::graph::{DirectedWeightedGraph, GraphModel};
use crate::model::{Edge, EdgeData, Node, NodeData, NodeKey};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Current document format version
pub const FORMAT_VERSION: u32 = 1;

/// Abstract capability a registered type provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Node,
    Edge,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

type NodeBuilder = Box<dyn Fn(Map<String, Value>) -> Result<Box<dyn NodeData>> + Send + Sync>;
type EdgeBuilder = Box<dyn Fn(Map<String, Value>) -> Result<Box<dyn EdgeData>> + Send + Sync>;

/// Maps node/edge type names to the builders that reconstruct them
pub struct TypeRegistry {
    nodes: HashMap<String, NodeBuilder>,
    edges: HashMap<String, EdgeBuilder>,
    default_node: String,
    default_edge: String,
}

impl TypeRegistry {
    /// Registry with `Node` and `Edge` registered as the defaults
    pub fn new() -> Self {
        let mut registry = Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            default_node: "Node".to_string(),
            default_edge: "Edge".to_string(),
        };
        registry.register_node::<Node>("Node");
        registry.register_edge::<Edge>("Edge");
        registry
    }

    /// Register a concrete node type under `name`
    pub fn register_node<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: NodeData + DeserializeOwned + 'static,
    {
        self.nodes.insert(
            name.into(),
            Box::new(|fields: Map<String, Value>| -> Result<Box<dyn NodeData>> {
                let node: T = serde_json::from_value(Value::Object(fields))?;
                Ok(Box::new(node))
            }),
        );
        self
    }

    /// Register a concrete edge type under `name`
    pub fn register_edge<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: EdgeData + DeserializeOwned + 'static,
    {
        self.edges.insert(
            name.into(),
            Box::new(|fields: Map<String, Value>| -> Result<Box<dyn EdgeData>> {
                let edge: T = serde_json::from_value(Value::Object(fields))?;
                Ok(Box::new(edge))
            }),
        );
        self
    }

    /// Type used for records that carry no `"type"` field
    pub fn set_default(&mut self, capability: Capability, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !self.contains(capability, &name) {
            return Err(Error::UnknownType {
                capability: capability.to_string(),
                name,
            });
        }
        match capability {
            Capability::Node => self.default_node = name,
            Capability::Edge => self.default_edge = name,
        }
        Ok(())
    }

    pub fn contains(&self, capability: Capability, name: &str) -> bool {
        match capability {
            Capability::Node => self.nodes.contains_key(name),
            Capability::Edge => self.edges.contains_key(name),
        }
    }

    /// Registered type names for a capability, sorted
    pub fn names(&self, capability: Capability) -> Vec<&str> {
        let mut names: Vec<&str> = match capability {
            Capability::Node => self.nodes.keys().map(String::as_str).collect(),
            Capability::Edge => self.edges.keys().map(String::as_str).collect(),
        };
        names.sort_unstable();
        names
    }

    pub fn build_node(
        &self,
        type_name: Option<&str>,
        fields: Map<String, Value>,
    ) -> Result<Box<dyn NodeData>> {
        let name = type_name.unwrap_or(&self.default_node);
        let builder = self.nodes.get(name).ok_or_else(|| Error::UnknownType {
            capability: Capability::Node.to_string(),
            name: name.to_string(),
        })?;
        let node = builder(fields)?;
        check_identity(Capability::Node, name, node.type_name())?;
        Ok(node)
    }

    pub fn build_edge(
        &self,
        type_name: Option<&str>,
        fields: Map<String, Value>,
    ) -> Result<Box<dyn EdgeData>> {
        let name = type_name.unwrap_or(&self.default_edge);
        let builder = self.edges.get(name).ok_or_else(|| Error::UnknownType {
            capability: Capability::Edge.to_string(),
            name: name.to_string(),
        })?;
        let edge = builder(fields)?;
        check_identity(Capability::Edge, name, edge.type_name())?;
        Ok(edge)
    }
}

/// The registered name and the built value's `type_name` must agree
fn check_identity(capability: Capability, registered: &str, reported: &str) -> Result<()> {
    if registered == reported {
        return Ok(());
    }
    Err(Error::Validation(format!(
        "{} type registered as '{}' reports itself as '{}'",
        capability, registered, reported
    )))
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("nodes", &self.names(Capability::Node))
            .field("edges", &self.names(Capability::Edge))
            .field("default_node", &self.default_node)
            .field("default_edge", &self.default_edge)
            .finish()
    }
}

/// Top-level persisted document
#[derive(Debug, Serialize, Deserialize)]
struct GraphDocument {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    nodes: Vec<TypedRecord>,
    #[serde(default)]
    edges: Vec<AdjacencyRecord>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

/// A node or edge record: type tag plus the type's own fields
#[derive(Debug, Serialize, Deserialize)]
struct TypedRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Outgoing edges of one source node
#[derive(Debug, Serialize, Deserialize)]
struct AdjacencyRecord {
    src: NodeKey,
    #[serde(default)]
    edges: Vec<TypedRecord>,
}

/// Encodes graphs to pretty JSON and decodes them through a `TypeRegistry`
#[derive(Debug, Default)]
pub struct GraphCodec {
    registry: TypeRegistry,
}

impl GraphCodec {
    pub fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Encode a graph as pretty JSON
    ///
    /// Every node and edge type must be registered.
    pub fn encode<G: GraphModel + ?Sized>(&self, graph: &G) -> Result<String> {
        let mut nodes = Vec::with_capacity(graph.node_count());
        let mut edges = Vec::new();

        for node in graph.nodes() {
            self.check_registered(Capability::Node, node.type_name())?;
            nodes.push(TypedRecord {
                type_name: Some(node.type_name().to_string()),
                fields: node.to_record()?,
            });

            let outgoing = graph.out_edges(node.key());
            if outgoing.is_empty() {
                continue;
            }
            let mut records = Vec::with_capacity(outgoing.len());
            for edge in outgoing {
                self.check_registered(Capability::Edge, edge.type_name())?;
                records.push(TypedRecord {
                    type_name: Some(edge.type_name().to_string()),
                    fields: edge.to_record()?,
                });
            }
            edges.push(AdjacencyRecord {
                src: node.key(),
                edges: records,
            });
        }

        let document = GraphDocument {
            version: FORMAT_VERSION,
            nodes,
            edges,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Decode a document into a freshly built graph
    pub fn decode(&self, text: &str) -> Result<DirectedWeightedGraph> {
        let document: GraphDocument = serde_json::from_str(text)?;
        if document.version > FORMAT_VERSION {
            return Err(Error::Validation(format!(
                "Unsupported format version {} (max {})",
                document.version, FORMAT_VERSION
            )));
        }

        let mut graph = DirectedWeightedGraph::new();

        for record in document.nodes {
            let node = self
                .registry
                .build_node(record.type_name.as_deref(), record.fields)?;
            graph.add_boxed_node(node)?;
        }

        for adjacency in document.edges {
            for record in adjacency.edges {
                let edge = self
                    .registry
                    .build_edge(record.type_name.as_deref(), record.fields)?;
                if edge.src() != adjacency.src {
                    return Err(Error::Validation(format!(
                        "Edge {} -> {} listed under source {}",
                        edge.src(),
                        edge.dest(),
                        adjacency.src
                    )));
                }
                if graph.edge(edge.src(), edge.dest()).is_some() {
                    return Err(Error::Validation(format!(
                        "Duplicate edge {} -> {}",
                        edge.src(),
                        edge.dest()
                    )));
                }
                graph.insert_edge(edge)?;
            }
        }

        tracing::debug!(
            "Decoded graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn check_registered(&self, capability: Capability, name: &str) -> Result<()> {
        if self.registry.contains(capability, name) {
            Ok(())
        } else {
            Err(Error::UnknownType {
                capability: capability.to_string(),
                name: name.to_string(),
            })
        }
    }
}
