use std::time::Duration;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::SearchError;
use crate::graph::{Graph, NodeId, UNKNOWN_TAG};
use crate::graph_algos::{MeetingRule, SearchObserver, SearchParams, SearchResult, Strategy, Termination, bidirectional, search};
use crate::sequencing::{compute_global_sequence, compute_local_sequence};

/// Label used in directions for roads without a name
pub const UNNAMED_ROAD: &str = "Unnamed Road";


/// How the destinations of a trip are ordered before routing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopOrdering {
    /// Visit in the order given
    AsGiven,
    /// Shortest straight-line ordering, exhaustive
    #[default]
    Global,
    /// Nearest-neighbour ordering
    Local,
}


#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub strategy: Strategy,
    /// Search each leg from both ends with this meeting rule
    pub bidirectional: Option<MeetingRule>,
    pub ordering: StopOrdering,
    pub search: SearchParams,
}


/// One routed leg of a trip
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: NodeId,
    pub to: NodeId,
    pub result: SearchResult,
}


/// Outcome of [`plan_route`]
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// start followed by the ordered stops
    pub sequence: Vec<NodeId>,
    /// One per consecutive pair of `sequence`, fewer if planning was cancelled
    pub segments: Vec<Segment>,
}

impl Route {

    pub fn total_elapsed(&self) -> Duration {
        self.segments.iter().map(|segment| segment.result.elapsed).sum()
    }

    pub fn total_visited(&self) -> usize {
        self.segments.iter().map(|segment| segment.result.visited).sum()
    }

    /// Every leg was searched and found
    pub fn is_complete(&self) -> bool {
        self.segments.len() == self.sequence.len().saturating_sub(1)
            && self.segments.iter().all(|segment| segment.result.is_found())
    }

    /// The legs joined into one walk, None unless complete
    pub fn path(&self) -> Option<Vec<NodeId>> {
        if !self.is_complete() {
            return None;
        }
        let mut path = vec![*self.sequence.first()?];
        for segment in &self.segments {
            path.extend(segment.result.path.iter().skip(1));
        }
        Some(path)
    }

    /// Total edge weight of [`Route::path`]
    pub fn cost(&self, graph: &Graph) -> Option<f64> {
        self.path().and_then(|path| graph.path_cost(&path))
    }
}


/// Order `destinations` and route from `start` through each of them
///
/// Legs are searched strictly one after another with the same observer.
/// A leg with no path is kept and planning moves on; a cancelled leg ends
/// planning there.
pub fn plan_route<O>(
    graph: &Graph,
    start: NodeId,
    destinations: &[NodeId],
    config: &RouteConfig,
    observer: &mut O,
) -> Result<Route, SearchError>
where
    O: SearchObserver + ?Sized,
{
    if !graph.contains(start) {
        return Err(SearchError::UnknownStart(start));
    }

    let sequence = match config.ordering {
        StopOrdering::AsGiven => std::iter::once(start).chain(destinations.iter().copied()).collect(),
        StopOrdering::Global => compute_global_sequence(start, destinations, graph)?,
        StopOrdering::Local => compute_local_sequence(start, destinations, graph)?,
    };

    let mut segments = Vec::with_capacity(sequence.len().saturating_sub(1));
    for leg in sequence.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        let result = match config.bidirectional {
            Some(meeting) => bidirectional(graph, from, to, config.strategy, meeting, &config.search, &mut *observer)?,
            None => search(graph, from, to, config.strategy, &config.search, &mut *observer)?,
        };

        let termination = result.termination;
        if termination != Termination::Found {
            warn!("no path for leg {from} -> {to}: {termination:?}");
        }
        segments.push(Segment { from, to, result });
        if termination == Termination::Cancelled {
            break;
        }
    }

    let route = Route { sequence, segments };
    info!(
        "planned {} legs with {}: {} nodes visited in {:?}",
        route.segments.len(),
        config.strategy,
        route.total_visited(),
        route.total_elapsed(),
    );
    Ok(route)
}


/// Road names along `path`, each listed once per stretch
///
/// Uses the first edge between each consecutive pair; pairs with no edge
/// are skipped.
pub fn directions(graph: &Graph, path: &[NodeId]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for pair in path.windows(2) {
        let Some(edge) = graph.edges(pair[0]).iter().find(|edge| edge.target == pair[1]) else {
            continue;
        };
        let name = if edge.label == UNKNOWN_TAG { UNNAMED_ROAD } else { edge.label.as_str() };
        if names.last().is_none_or(|last| last != name) {
            names.push(name.to_string());
        }
    }

    names
}
