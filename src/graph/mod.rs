mod spatial;
#[cfg(test)]
pub(crate) mod fixtures;

pub use spatial::SpatialIndex;

use std::{collections::{BTreeMap, HashMap}, fmt, hash::BuildHasher};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::collections::FxIndexMap;
use crate::errors::SearchError;
use crate::geometry::Point;


/// Tag used when the source data carries no road class or name
pub const UNKNOWN_TAG: &str = "unknown";


/// Identifier of a graph node, unique within a graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}


/// Outgoing edge of a node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    pub target: NodeId,
    pub weight: f64,
    pub road_class: String, // e.g. "residential", "primary"
    pub label: String, // road name
    pub one_way: bool,
}

impl AdjacencyEntry {

    pub fn new(target: NodeId, weight: f64) -> Self {
        Self {
            target,
            weight,
            road_class: UNKNOWN_TAG.to_string(),
            label: UNKNOWN_TAG.to_string(),
            one_way: false,
        }
    }

    pub fn with_road(mut self, road_class: impl Into<String>, label: impl Into<String>) -> Self {
        self.road_class = road_class.into();
        self.label = label.into();
        self
    }

    pub fn one_way(mut self, one_way: bool) -> Self {
        self.one_way = one_way;
        self
    }
}


/// Node of the road graph
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub point: Point,
    edges: Vec<AdjacencyEntry>,
}

impl GraphNode {
    pub fn edges(&self) -> &[AdjacencyEntry] {
        &self.edges
    }
}


/// Adjacency-list road graph
///
/// Built once by the caller and read-only for the duration of a search.
/// Nodes iterate in insertion order. Edges may reference ids that were
/// never added as nodes; searches skip those with a warning.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: FxIndexMap<NodeId, GraphNode>,
    // target -> (source, weight), lets a backward search honour one-way edges
    incoming: FxHashMap<NodeId, Vec<(NodeId, f64)>>,
}

impl Graph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or move an existing node to `point` keeping its edges
    /// Returns true if the node is new
    pub fn add_node(&mut self, id: NodeId, point: Point) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.point = point;
                false
            }
            None => {
                self.nodes.insert(id, GraphNode { id, point, edges: Vec::new() });
                true
            }
        }
    }

    /// Add a directed edge
    /// The source must exist; the target may not (a dangling edge)
    pub fn add_edge(&mut self, from: NodeId, entry: AdjacencyEntry) -> Result<(), SearchError> {
        if !entry.weight.is_finite() || entry.weight < 0.0 {
            return Err(SearchError::InvalidWeight { from, to: entry.target, weight: entry.weight });
        }

        let node = self.nodes.get_mut(&from).ok_or(SearchError::UnknownNode(from))?;
        self.incoming.entry(entry.target).or_default().push((from, entry.weight));
        node.edges.push(entry);
        Ok(())
    }

    /// Add an edge in both directions with the same weight
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<(), SearchError> {
        if !self.contains(b) {
            return Err(SearchError::UnknownNode(b));
        }
        self.add_edge(a, AdjacencyEntry::new(b, weight))?;
        self.add_edge(b, AdjacencyEntry::new(a, weight))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    pub fn point(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).map(|node| node.point)
    }

    /// Outgoing edges, empty for unknown ids
    pub fn edges(&self, id: NodeId) -> &[AdjacencyEntry] {
        self.nodes.get(&id).map(GraphNode::edges).unwrap_or_default()
    }

    /// Incoming edges as (source, weight), empty for unknown ids
    pub fn incoming(&self, id: NodeId) -> &[(NodeId, f64)] {
        self.incoming.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Weight of the cheapest edge from -> to
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.edges(from)
            .iter()
            .filter(|edge| edge.target == to)
            .map(|edge| edge.weight)
            .reduce(f64::min)
    }

    /// Total weight along a path, None if a consecutive pair is not an edge
    pub fn path_cost(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }
}


/// Coordinate lookup: id -> planar point
pub trait Locate {
    fn locate(&self, id: NodeId) -> Option<Point>;
}

impl Locate for Graph {
    fn locate(&self, id: NodeId) -> Option<Point> {
        self.point(id)
    }
}

impl<S: BuildHasher> Locate for HashMap<NodeId, Point, S> {
    fn locate(&self, id: NodeId) -> Option<Point> {
        self.get(&id).copied()
    }
}

impl Locate for BTreeMap<NodeId, Point> {
    fn locate(&self, id: NodeId) -> Option<Point> {
        self.get(&id).copied()
    }
}
