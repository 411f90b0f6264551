use std::time::Instant;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::errors::SearchError;
use crate::graph::{Graph, NodeId};
use super::engine::{Budget, Direction, SearchState};
use super::progress::{Cadence, ProgressSnapshot, SearchObserver, checkpoint};
use super::{SearchParams, SearchResult, Strategy, Termination};


/// When the two directions of a bidirectional search may stop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingRule {
    /// Stop at the first node finalized by both sides
    /// Fast, but not guaranteed minimal even for Dijkstra and A*
    #[default]
    FirstIntersection,
    /// Dijkstra and A* only: keep the cheapest connection seen so far and stop
    /// once neither frontier can beat it. Other strategies fall back to
    /// `FirstIntersection`.
    CostVerified,
}


/// Where the forward and backward predecessor chains join
/// `forward_end == backward_start`, or an edge forward_end -> backward_start
#[derive(Clone, Copy, Debug, PartialEq)]
struct Meeting {
    forward_end: NodeId,
    backward_start: NodeId,
    cost: f64,
}


/// Meet-in-the-middle search
///
/// Runs the chosen strategy forward from `start` (aiming at `goal`) and
/// backward from `goal` over incoming edges (aiming at `start`), alternating
/// one finalized node per side. The path is the forward chain to the meeting
/// point followed by the backward chain to `goal`.
///
/// Progress is reported every `params.report_every` rounds with the union of
/// both visited sets. The result's `visited` is the sum of both sides.
pub fn bidirectional<O>(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    strategy: Strategy,
    meeting: MeetingRule,
    params: &SearchParams,
    observer: &mut O,
) -> Result<SearchResult, SearchError>
where
    O: SearchObserver + ?Sized,
{
    params.validate()?;
    if !graph.contains(start) {
        return Err(SearchError::UnknownStart(start));
    }
    if !graph.contains(goal) {
        return Err(SearchError::UnknownGoal(goal));
    }

    let verified = meeting == MeetingRule::CostVerified && strategy.is_cost_aware();
    if meeting == MeetingRule::CostVerified && !verified {
        debug!("{strategy} has no path costs to verify, stopping at the first intersection instead");
    }

    let started = Instant::now();
    let budget = Budget::new(params.max_expansions, params.time_budget(), started);
    let mut cadence = Cadence::new(params.report_every);
    let order = params.heuristic_order;
    let mut forward = SearchState::new(graph, strategy, Direction::Forward, start, goal, order)?;
    let mut backward = SearchState::new(graph, strategy, Direction::Backward, goal, start, order)?;

    let mut best: Option<Meeting> = None;

    let termination = 'search: loop {
        let mut progressed = false;

        for direction in [Direction::Forward, Direction::Backward] {
            if verified && best.is_some_and(|found| settled(strategy, &forward, &backward, found.cost)) {
                break 'search Termination::Found;
            }

            let (this, other) = match direction {
                Direction::Forward => (&mut forward, &backward),
                Direction::Backward => (&mut backward, &forward),
            };
            let Some(node) = this.step() else {
                continue;
            };
            progressed = true;

            if verified {
                connect(direction, node, this, other, &mut best);
            } else if other.is_finalized(node) {
                trace!("directions met at {node}");
                best = Some(Meeting { forward_end: node, backward_start: node, cost: 0.0 });
                break 'search Termination::Found;
            }
        }

        if !progressed {
            // both frontiers ran dry; in verified mode the best connection is final
            break if best.is_some() { Termination::Found } else { Termination::Exhausted };
        }

        if cadence.tick() {
            let combined = union(&forward, &backward);
            if checkpoint(&mut *observer, &combined).is_break() {
                break Termination::Cancelled;
            }
        }
        if budget.exceeded(forward.visited_count() + backward.visited_count()) {
            break Termination::BudgetExceeded;
        }
    };

    let path = match (termination, best) {
        (Termination::Found, Some(found)) => join(&forward, &backward, found),
        _ => Vec::new(),
    };
    let elapsed = started.elapsed();
    let visited = forward.visited_count() + backward.visited_count();

    let combined = union(&forward, &backward);
    observer.on_progress(&ProgressSnapshot { visited: &combined, path: &path, finished: true });
    debug!("bidirectional {strategy} search {start} -> {goal}: {termination:?} after {visited} nodes in {elapsed:?}");

    Ok(SearchResult { path, elapsed, visited, termination })
}


/// Record every connection through the node just finalized on one side:
/// the node itself if the other side has reached it, and each followed edge
/// into a node the other side has reached
fn connect(direction: Direction, node: NodeId, this: &SearchState<'_>, other: &SearchState<'_>, best: &mut Option<Meeting>) {
    let Some(node_cost) = this.cost(node) else {
        return;
    };

    let mut consider = |forward_end: NodeId, backward_start: NodeId, cost: f64| {
        if best.is_none_or(|found| cost < found.cost) {
            trace!("connection {forward_end} -> {backward_start} at cost {cost}");
            *best = Some(Meeting { forward_end, backward_start, cost });
        }
    };

    if let Some(other_cost) = other.cost(node) {
        consider(node, node, node_cost + other_cost);
    }

    this.for_each_neighbor(node, |neighbor, weight| {
        let Some(other_cost) = other.cost(neighbor) else {
            return;
        };
        let cost = node_cost + weight + other_cost;
        match direction {
            Direction::Forward => consider(node, neighbor, cost),
            Direction::Backward => consider(neighbor, node, cost),
        }
    });
}

/// True once no unexplored route can be cheaper than `best_cost`
/// Dijkstra: the two smallest frontier costs together reach it
/// A*: either frontier's smallest estimate reaches it (consistent heuristic)
fn settled(strategy: Strategy, forward: &SearchState<'_>, backward: &SearchState<'_>, best_cost: f64) -> bool {
    let (top_forward, top_backward) = (forward.frontier_bound(), backward.frontier_bound());
    match strategy {
        Strategy::Dijkstra => top_forward + top_backward >= best_cost,
        _ => top_forward >= best_cost || top_backward >= best_cost,
    }
}

fn join(forward: &SearchState<'_>, backward: &SearchState<'_>, meeting: Meeting) -> Vec<NodeId> {
    let mut path = forward.path_to(meeting.forward_end);
    let mut tail = backward.chain_from(meeting.backward_start);
    if path.is_empty() || tail.is_empty() {
        return Vec::new();
    }
    if meeting.forward_end == meeting.backward_start {
        // shared node
        tail.remove(0);
    }
    path.append(&mut tail);
    path
}

fn union(forward: &SearchState<'_>, backward: &SearchState<'_>) -> FxHashSet<NodeId> {
    forward.visited().union(backward.visited()).copied().collect()
}
