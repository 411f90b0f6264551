//! Pathfinding and stop ordering over road networks

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod route;
pub mod sequencing;

pub use errors::{GeometryError, SearchError, SequenceError};
pub use geometry::{MinkowskiOrder, Point};
pub use graph::{AdjacencyEntry, Graph, Locate, NodeId};
pub use graph_algos::{
    MeetingRule, ProgressSnapshot, SearchObserver, SearchParams, SearchResult, Silent, Strategy,
    Termination, bidirectional, search,
};
