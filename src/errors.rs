use crate::graph::NodeId;


/// Errors raised by graph construction and search entry points.
///
/// An unreachable goal is not an error: it comes back as a
/// [`SearchResult`](crate::graph_algos::SearchResult) with an empty path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("start node {0} is not in the graph")]
    UnknownStart(NodeId),

    #[error("goal node {0} is not in the graph")]
    UnknownGoal(NodeId),

    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    /// Edge weights must be finite and non-negative
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("invalid search parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("spatial index error: {0}")]
    KdTree(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("minkowski order must be a finite number >= 0.01, got {0}")]
    InvalidMinkowskiOrder(f64),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SequenceError {
    #[error("no coordinate known for node {0}")]
    MissingCoordinate(NodeId),

    #[error("node {0} has a non-finite coordinate")]
    NonFiniteCoordinate(NodeId),

    /// Exhaustive ordering is factorial in the destination count
    #[error("{count} destinations exceed the exhaustive ordering limit of {limit}")]
    TooManyDestinations { count: usize, limit: usize },
}


impl From<kdtree::ErrorKind> for SearchError {
    fn from(error: kdtree::ErrorKind) -> Self {
        SearchError::KdTree(error.to_string())
    }
}
