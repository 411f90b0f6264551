use std::time::{Duration, Instant};
use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::SearchError;
use crate::geometry::{MinkowskiOrder, Point};
use crate::graph::{Graph, NodeId};
use super::frontier::Frontier;
use super::shortest_path::{CameFrom, predecessor_chain, shortest_path};
use super::{Admission, Strategy};


/// Which edges a search follows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Outgoing edges, origin -> target
    Forward,
    /// Incoming edges, so the predecessor chain runs node -> origin in graph order
    Backward,
}


/// Per-call, per-direction search state
///
/// One expansion loop serves every strategy: the strategy picks the frontier
/// discipline, the admission rule and the ordering key. The state lives for
/// a single search call.
pub(crate) struct SearchState<'g> {
    graph: &'g Graph,
    strategy: Strategy,
    direction: Direction,
    target: Point, // heuristics aim here
    order: MinkowskiOrder,
    visited: FxHashSet<NodeId>, // finalized
    came_from: CameFrom,
    best_cost: FxHashMap<NodeId, f64>,
    frontier: Frontier,
}

impl<'g> SearchState<'g> {

    /// Seed a search at `origin`, steering heuristics towards `target`
    pub(crate) fn new(
        graph: &'g Graph,
        strategy: Strategy,
        direction: Direction,
        origin: NodeId,
        target: NodeId,
        order: MinkowskiOrder,
    ) -> Result<Self, SearchError> {
        let origin_point = graph.point(origin).ok_or(SearchError::UnknownNode(origin))?;
        let target_point = graph.point(target).ok_or(SearchError::UnknownNode(target))?;

        let mut state = Self {
            graph,
            strategy,
            direction,
            target: target_point,
            order,
            visited: FxHashSet::default(),
            came_from: CameFrom::default(),
            best_cost: FxHashMap::default(),
            frontier: Frontier::for_strategy(strategy),
        };

        state.came_from.insert(origin, None);
        state.best_cost.insert(origin, 0.0);
        let key = strategy.key(0.0, state.heuristic(origin_point));
        state.frontier.push(origin, key);

        Ok(state)
    }

    fn heuristic(&self, point: Point) -> f64 {
        if self.strategy.uses_heuristic() {
            point.minkowski_distance(&self.target, self.order)
        } else {
            0.0
        }
    }

    /// Pop and finalize the next node, None once the frontier is empty
    /// Entries finalized in the meantime are skipped lazily
    pub(crate) fn pop_next(&mut self) -> Option<NodeId> {
        while let Some(node) = self.frontier.pop() {
            if self.visited.insert(node) {
                return Some(node);
            }
        }
        None
    }

    /// Examine the edges of a finalized node and admit its neighbours
    pub(crate) fn expand(&mut self, node: NodeId) {
        let cost = self.cost(node).unwrap_or(0.0);
        let graph = self.graph;

        match self.direction {
            Direction::Forward => {
                for edge in graph.edges(node) {
                    self.admit(node, cost, edge.target, edge.weight);
                }
            }
            Direction::Backward => {
                for &(source, weight) in graph.incoming(node) {
                    self.admit(node, cost, source, weight);
                }
            }
        }
    }

    /// Pop, finalize and expand one node
    pub(crate) fn step(&mut self) -> Option<NodeId> {
        let node = self.pop_next()?;
        self.expand(node);
        Some(node)
    }

    fn admit(&mut self, from: NodeId, from_cost: f64, to: NodeId, weight: f64) {
        if self.visited.contains(&to) {
            return;
        }
        let Some(point) = self.graph.point(to) else {
            warn!("skipping edge {from} -> {to}: node {to} is not in the graph");
            return;
        };

        let tentative = from_cost + weight;
        match self.strategy.admission() {
            Admission::FirstSeen => {
                if self.came_from.contains_key(&to) {
                    return;
                }
            }
            Admission::Relax => {
                let known = self.best_cost.get(&to).copied().unwrap_or(f64::INFINITY);
                if tentative >= known {
                    return;
                }
            }
        }

        self.came_from.insert(to, Some(from));
        self.best_cost.insert(to, tentative);
        let key = self.strategy.key(tentative, self.heuristic(point));
        self.frontier.push(to, key);
    }

    /// Call `f(neighbour, weight)` for each edge followed from `node`
    pub(crate) fn for_each_neighbor(&self, node: NodeId, mut f: impl FnMut(NodeId, f64)) {
        match self.direction {
            Direction::Forward => {
                for edge in self.graph.edges(node) {
                    f(edge.target, edge.weight);
                }
            }
            Direction::Backward => {
                for &(source, weight) in self.graph.incoming(node) {
                    f(source, weight);
                }
            }
        }
    }

    pub(crate) fn visited(&self) -> &FxHashSet<NodeId> {
        &self.visited
    }

    pub(crate) fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub(crate) fn is_finalized(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Cost of the best route found so far from the origin
    pub(crate) fn cost(&self, node: NodeId) -> Option<f64> {
        self.best_cost.get(&node).copied()
    }

    /// Smallest ordering key waiting in a priority frontier, infinite when empty
    pub(crate) fn frontier_bound(&self) -> f64 {
        self.frontier.min_key().unwrap_or(f64::INFINITY)
    }

    /// Origin -> node, empty if unreached
    pub(crate) fn path_to(&self, node: NodeId) -> Vec<NodeId> {
        shortest_path(&self.came_from, node)
    }

    /// node -> origin along predecessors, empty if unreached
    pub(crate) fn chain_from(&self, node: NodeId) -> Vec<NodeId> {
        predecessor_chain(&self.came_from, node)
    }
}


/// Expansion cap and wall-clock deadline
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget {
    max_expansions: Option<usize>,
    deadline: Option<Instant>,
}

impl Budget {
    pub(crate) fn new(max_expansions: Option<usize>, time_budget: Option<Duration>, started: Instant) -> Self {
        Self {
            max_expansions,
            deadline: time_budget.and_then(|budget| started.checked_add(budget)),
        }
    }

    pub(crate) fn exceeded(&self, expansions: usize) -> bool {
        if self.max_expansions.is_some_and(|max| expansions >= max) {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
