//! Dijkstra traversal engine and per-run state

use crate::graph::GraphModel;
use crate::model::NodeKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// What a run knows about one reachable node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    /// Cumulative weight from the run's source
    pub distance: f64,

    /// Previous node on a shortest path (`None` for the source)
    pub predecessor: Option<NodeKey>,
}

/// Per-run mapping from node key to its distance/predecessor record
///
/// Every key present is reachable from the run's source.
#[derive(Debug, Clone, Default)]
pub struct TraversalState {
    source: Option<NodeKey>,
    records: HashMap<NodeKey, NodeRecord>,
}

impl TraversalState {
    fn reset(&mut self, source: NodeKey) {
        self.records.clear();
        self.records.insert(
            source,
            NodeRecord {
                distance: 0.0,
                predecessor: None,
            },
        );
        self.source = Some(source);
    }

    /// Source of the last run
    pub fn source(&self) -> Option<NodeKey> {
        self.source
    }

    pub fn get(&self, key: NodeKey) -> Option<&NodeRecord> {
        self.records.get(&key)
    }

    pub fn distance(&self, key: NodeKey) -> Option<f64> {
        self.records.get(&key).map(|record| record.distance)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.records.contains_key(&key)
    }

    /// Number of nodes known reachable
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Walk predecessors from `dest` back to the run's source
    ///
    /// Returns keys in source-to-destination order, or `None` when `dest`
    /// was not reached.
    pub fn path_to(&self, dest: NodeKey) -> Option<Vec<NodeKey>> {
        let source = self.source?;
        self.records.get(&dest)?;

        let mut nodes = vec![dest];
        let mut current = dest;
        while current != source {
            let prev = self.records.get(&current)?.predecessor?;
            nodes.push(prev);
            current = prev;
        }

        nodes.reverse();
        Some(nodes)
    }
}

/// Run statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes_settled: usize,
    pub edges_relaxed: usize,
    pub stale_skipped: usize,
    pub target_reached: bool,
}

/// Frontier entry for the min-heap
#[derive(Clone, Copy, PartialEq)]
struct FrontierEntry {
    distance: f64,
    key: NodeKey,
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap, ties go to the smaller key
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra engine owning exactly one reusable traversal state
///
/// Decrease-key is done by pushing a fresh frontier entry; older entries
/// for the same key are skipped when popped.
#[derive(Debug, Default)]
pub struct Dijkstra {
    state: TraversalState,
    frontier: BinaryHeap<FrontierEntry>,
    finalized: HashSet<NodeKey>,
    stats: TraversalStats,
}

impl std::fmt::Debug for FrontierEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.key, self.distance)
    }
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::default()
    }

    /// State left by the last run
    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// Statistics of the last run
    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    /// Run from `source`, stopping once `target` (if any) is settled
    pub fn run<G: GraphModel + ?Sized>(
        &mut self,
        graph: &G,
        source: NodeKey,
        target: Option<NodeKey>,
    ) -> &TraversalState {
        self.state.reset(source);
        self.frontier.clear();
        self.finalized.clear();
        self.stats = TraversalStats::default();

        self.frontier.push(FrontierEntry {
            distance: 0.0,
            key: source,
        });

        while let Some(FrontierEntry { distance, key }) = self.frontier.pop() {
            if self.finalized.contains(&key) {
                self.stats.stale_skipped += 1;
                continue;
            }
            // A shorter distance was recorded after this entry was pushed
            if distance > self.state.distance(key).unwrap_or(f64::INFINITY) {
                self.stats.stale_skipped += 1;
                continue;
            }

            self.finalized.insert(key);
            self.stats.nodes_settled += 1;

            if target == Some(key) {
                self.stats.target_reached = true;
                break;
            }

            for edge in graph.out_edges(key) {
                self.stats.edges_relaxed += 1;
                let next = edge.dest();
                if self.finalized.contains(&next) {
                    continue;
                }

                let candidate = distance + edge.weight();
                let improves = self
                    .state
                    .distance(next)
                    .map_or(true, |known| candidate < known);

                if improves {
                    self.state.records.insert(
                        next,
                        NodeRecord {
                            distance: candidate,
                            predecessor: Some(key),
                        },
                    );
                    self.frontier.push(FrontierEntry {
                        distance: candidate,
                        key: next,
                    });
                }
            }
        }

        tracing::debug!(
            "Dijkstra from {} (target={:?}): settled {}, relaxed {}, skipped {} stale, reached {} nodes",
            source,
            target,
            self.stats.nodes_settled,
            self.stats.edges_relaxed,
            self.stats.stale_skipped,
            self.state.len()
        );

        &self.state
    }
}

/// A single path through the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPath {
    /// Ordered node keys from source to destination
    pub nodes: Vec<NodeKey>,

    /// Edges connecting the nodes
    pub edges: Vec<PathEdge>,

    /// Sum of edge weights
    pub total_weight: f64,

    /// Path length (number of edges)
    pub length: usize,
}

/// Edge in a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEdge {
    pub src: NodeKey,
    pub dest: NodeKey,
    pub weight: f64,
}

impl GraphPath {
    /// Single-node path
    pub fn trivial(key: NodeKey) -> Self {
        Self {
            nodes: vec![key],
            edges: Vec::new(),
            total_weight: 0.0,
            length: 0,
        }
    }

    /// Build a path from ordered keys, reading weights from `graph`
    ///
    /// Returns `None` if two consecutive keys are not joined by an edge.
    pub fn from_keys<G: GraphModel + ?Sized>(graph: &G, nodes: Vec<NodeKey>) -> Option<Self> {
        let mut edges = Vec::with_capacity(nodes.len().saturating_sub(1));
        let mut total_weight = 0.0;

        for pair in nodes.windows(2) {
            let edge = graph.edge(pair[0], pair[1])?;
            total_weight += edge.weight();
            edges.push(PathEdge {
                src: pair[0],
                dest: pair[1],
                weight: edge.weight(),
            });
        }

        Some(Self {
            length: edges.len(),
            nodes,
            edges,
            total_weight,
        })
    }
}

impl std::fmt::Display for GraphPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self.nodes.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", keys.join(" -> "))
    }
}
