//! Node and edge types and the capability traits the engine consumes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique integer identifier of a node within one graph
pub type NodeKey = i64;

/// Display-only position of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GeoLocation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another location
    pub fn distance(&self, other: &GeoLocation) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl std::fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Capability interface for graph nodes
///
/// The graph stores nodes as `Box<dyn NodeData>`, so any concrete type
/// registered with the codec's `TypeRegistry` can live in a graph.
pub trait NodeData: std::fmt::Debug + Send + Sync {
    fn key(&self) -> NodeKey;

    fn location(&self) -> Option<GeoLocation>;

    fn set_location(&mut self, location: GeoLocation);

    fn weight(&self) -> f64;

    fn set_weight(&mut self, weight: f64);

    fn info(&self) -> &str;

    fn set_info(&mut self, info: String);

    fn tag(&self) -> i32;

    fn set_tag(&mut self, tag: i32);

    /// Name this type is registered under for persistence
    fn type_name(&self) -> &'static str;

    /// Field map written to the persisted record (without the type tag)
    fn to_record(&self) -> serde_json::Result<Map<String, Value>>;

    fn clone_box(&self) -> Box<dyn NodeData>;
}

/// Capability interface for directed weighted edges
pub trait EdgeData: std::fmt::Debug + Send + Sync {
    fn src(&self) -> NodeKey;

    fn dest(&self) -> NodeKey;

    fn weight(&self) -> f64;

    fn info(&self) -> &str;

    fn set_info(&mut self, info: String);

    fn tag(&self) -> i32;

    fn set_tag(&mut self, tag: i32);

    /// Name this type is registered under for persistence
    fn type_name(&self) -> &'static str;

    /// Field map written to the persisted record (without the type tag)
    fn to_record(&self) -> serde_json::Result<Map<String, Value>>;

    fn clone_box(&self) -> Box<dyn EdgeData>;
}

impl Clone for Box<dyn NodeData> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl Clone for Box<dyn EdgeData> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Serialize any value into a JSON object map
pub fn record_of<T: Serialize>(value: &T) -> serde_json::Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}

/// The default concrete node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: NodeKey,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,

    #[serde(default)]
    pub weight: f64,

    #[serde(default)]
    pub info: String,

    #[serde(default)]
    pub tag: i32,
}

impl Node {
    pub fn new(key: NodeKey) -> Self {
        Self {
            key,
            location: None,
            weight: 0.0,
            info: String::new(),
            tag: 0,
        }
    }

    pub fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }
}

impl NodeData for Node {
    fn key(&self) -> NodeKey {
        self.key
    }

    fn location(&self) -> Option<GeoLocation> {
        self.location
    }

    fn set_location(&mut self, location: GeoLocation) {
        self.location = Some(location);
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    fn info(&self) -> &str {
        &self.info
    }

    fn set_info(&mut self, info: String) {
        self.info = info;
    }

    fn tag(&self) -> i32 {
        self.tag
    }

    fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }

    fn type_name(&self) -> &'static str {
        "Node"
    }

    fn to_record(&self) -> serde_json::Result<Map<String, Value>> {
        record_of(self)
    }

    fn clone_box(&self) -> Box<dyn NodeData> {
        Box::new(self.clone())
    }
}

/// The default concrete edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub src: NodeKey,
    pub dest: NodeKey,
    pub weight: f64,

    #[serde(default)]
    pub info: String,

    #[serde(default)]
    pub tag: i32,
}

impl Edge {
    pub fn new(src: NodeKey, dest: NodeKey, weight: f64) -> Self {
        Self {
            src,
            dest,
            weight,
            info: String::new(),
            tag: 0,
        }
    }
}

impl EdgeData for Edge {
    fn src(&self) -> NodeKey {
        self.src
    }

    fn dest(&self) -> NodeKey {
        self.dest
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn info(&self) -> &str {
        &self.info
    }

    fn set_info(&mut self, info: String) {
        self.info = info;
    }

    fn tag(&self) -> i32 {
        self.tag
    }

    fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }

    fn type_name(&self) -> &'static str {
        "Edge"
    }

    fn to_record(&self) -> serde_json::Result<Map<String, Value>> {
        record_of(self)
    }

    fn clone_box(&self) -> Box<dyn EdgeData> {
        Box::new(self.clone())
    }
}
