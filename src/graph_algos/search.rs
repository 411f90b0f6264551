use std::time::Instant;
use log::debug;

use crate::errors::SearchError;
use crate::graph::{Graph, NodeId};
use super::engine::{Budget, Direction, SearchState};
use super::progress::{Cadence, ProgressSnapshot, SearchObserver, checkpoint};
use super::{SearchParams, SearchResult, Strategy, Termination};


/// Search from `start` to `goal` with the given strategy
///
/// Pops one frontier node per iteration, finalizes it, stops if it is the
/// goal, otherwise admits its neighbours. An unreachable goal is a normal
/// result with an empty path; only an unknown start or goal is an error.
///
/// The observer gets a report after every `params.report_every` finalized
/// nodes, followed by the `yield_now` suspension point, and one final report
/// carrying the path.
pub fn search<O>(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    strategy: Strategy,
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

    let started = Instant::now();
    let budget = Budget::new(params.max_expansions, params.time_budget(), started);
    let mut cadence = Cadence::new(params.report_every);
    let mut state = SearchState::new(graph, strategy, Direction::Forward, start, goal, params.heuristic_order)?;

    let termination = loop {
        let Some(node) = state.pop_next() else {
            break Termination::Exhausted;
        };
        if node == goal {
            break Termination::Found;
        }
        state.expand(node);

        if cadence.tick() && checkpoint(&mut *observer, state.visited()).is_break() {
            break Termination::Cancelled;
        }
        if budget.exceeded(state.visited_count()) {
            break Termination::BudgetExceeded;
        }
    };

    let path = match termination {
        Termination::Found => state.path_to(goal),
        _ => Vec::new(),
    };
    let elapsed = started.elapsed();

    observer.on_progress(&ProgressSnapshot { visited: state.visited(), path: &path, finished: true });
    debug!(
        "{strategy} search {start} -> {goal}: {termination:?} after {} nodes in {elapsed:?}",
        state.visited_count()
    );

    Ok(SearchResult {
        path,
        elapsed,
        visited: state.visited_count(),
        termination,
    })
}


/// Breadth-first search, minimum edge count
pub fn breadth_first<O>(graph: &Graph, start: NodeId, goal: NodeId, params: &SearchParams, observer: &mut O) -> Result<SearchResult, SearchError>
where
    O: SearchObserver + ?Sized,
{
    search(graph, start, goal, Strategy::BreadthFirst, params, observer)
}

/// Depth-first search, any path
pub fn depth_first<O>(graph: &Graph, start: NodeId, goal: NodeId, params: &SearchParams, observer: &mut O) -> Result<SearchResult, SearchError>
where
    O: SearchObserver + ?Sized,
{
    search(graph, start, goal, Strategy::DepthFirst, params, observer)
}

/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
pub fn dijkstra<O>(graph: &Graph, start: NodeId, goal: NodeId, params: &SearchParams, observer: &mut O) -> Result<SearchResult, SearchError>
where
    O: SearchObserver + ?Sized,
{
    search(graph, start, goal, Strategy::Dijkstra, params, observer)
}

/// Greedy best-first search, ordered by heuristic alone
pub fn greedy_best_first<O>(graph: &Graph, start: NodeId, goal: NodeId, params: &SearchParams, observer: &mut O) -> Result<SearchResult, SearchError>
where
    O: SearchObserver + ?Sized,
{
    search(graph, start, goal, Strategy::Greedy, params, observer)
}

/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// Minimal only while the Minkowski heuristic never overestimates the
/// remaining edge weight, which holds for p >= 2 over length-weighted edges
pub fn a_star<O>(graph: &Graph, start: NodeId, goal: NodeId, params: &SearchParams, observer: &mut O) -> Result<SearchResult, SearchError>
where
    O: SearchObserver + ?Sized,
{
    search(graph, start, goal, Strategy::AStar, params, observer)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;
    use std::time::Duration;
    use proptest::prelude::*;
    use crate::geometry::MinkowskiOrder;
    use crate::graph::fixtures::{diamond, grid, is_walkable, n, random_planar, square, two_components};
    use crate::graph_algos::{Silent, Strategy};

    fn run(graph: &Graph, start: u64, goal: u64, strategy: Strategy) -> SearchResult {
        search(graph, n(start), n(goal), strategy, &SearchParams::default(), &mut Silent).unwrap()
    }

    /// Reference shortest distances by exhaustive relaxation
    fn bellman_ford(graph: &Graph, start: NodeId) -> std::collections::HashMap<NodeId, f64> {
        let mut dist = std::collections::HashMap::from([(start, 0.0)]);
        for _ in 0..graph.len() {
            for node in graph.nodes() {
                let Some(&d) = dist.get(&node.id) else { continue };
                for edge in node.edges() {
                    let candidate = d + edge.weight;
                    let entry = dist.entry(edge.target).or_insert(f64::INFINITY);
                    if candidate < *entry {
                        *entry = candidate;
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn test_square_dijkstra_with_and_without_diagonal() {
        let without = run(&square(false), 0, 2, Strategy::Dijkstra);
        assert_eq!(without.path.len(), 3);
        assert_eq!(square(false).path_cost(&without.path), Some(2.0));

        let with = run(&square(true), 0, 2, Strategy::Dijkstra);
        assert_eq!(with.path, vec![n(0), n(2)]);
        assert_eq!(square(true).path_cost(&with.path), Some(1.5));
    }

    #[test]
    fn test_diamond_cost_aware_strategies_find_cheapest() {
        let graph = diamond();
        for strategy in [Strategy::Dijkstra, Strategy::AStar] {
            let result = run(&graph, 0, 3, strategy);
            assert_eq!(result.path, vec![n(0), n(2), n(3)], "{strategy}");
            assert!(result.is_found());
        }
    }

    #[test]
    fn test_every_strategy_returns_a_walkable_path() {
        let graph = grid(6, 5);
        for strategy in Strategy::ALL {
            let result = run(&graph, 0, 29, strategy);
            assert!(result.is_found(), "{strategy}");
            assert_eq!(result.path.first(), Some(&n(0)));
            assert_eq!(result.path.last(), Some(&n(29)));
            assert!(is_walkable(&graph, &result.path), "{strategy} path {:?}", result.path);
        }
    }

    #[test]
    fn test_bfs_minimises_edge_count_on_uniform_grid() {
        let graph = grid(7, 7);
        let result = run(&graph, 0, 48, Strategy::BreadthFirst);
        // manhattan distance 12 -> 13 nodes
        assert_eq!(result.path.len(), 13);
    }

    #[test]
    fn test_disconnected_components() {
        let graph = two_components();
        for strategy in Strategy::ALL {
            let result = run(&graph, 0, 10, strategy);
            assert!(result.path.is_empty(), "{strategy}");
            assert_eq!(result.termination, Termination::Exhausted);
            // the whole component of the start, nothing more
            assert_eq!(result.visited, 3, "{strategy}");
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let graph = square(false);
        for strategy in Strategy::ALL {
            let result = run(&graph, 1, 1, strategy);
            assert_eq!(result.path, vec![n(1)]);
            assert_eq!(result.visited, 1);
        }
    }

    #[test]
    fn test_unknown_endpoints_are_errors() {
        let graph = square(false);
        let params = SearchParams::default();
        let missing_start = search(&graph, n(99), n(0), Strategy::AStar, &params, &mut Silent);
        assert_eq!(missing_start, Err(SearchError::UnknownStart(n(99))));

        let missing_goal = search(&graph, n(0), n(99), Strategy::BreadthFirst, &params, &mut Silent);
        assert_eq!(missing_goal, Err(SearchError::UnknownGoal(n(99))));
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let graph = square(false);
        let params = SearchParams::default().with_report_every(0);
        let result = dijkstra(&graph, n(0), n(2), &params, &mut Silent);
        assert!(matches!(result, Err(SearchError::InvalidParams(_))));
    }

    #[test]
    fn test_one_way_edges_are_respected() {
        let graph = diamond();
        // every diamond edge points towards D
        let result = run(&graph, 3, 0, Strategy::Dijkstra);
        assert!(result.path.is_empty());
        assert_eq!(result.visited, 1);
    }

    #[test]
    fn test_progress_reports() {
        let graph = grid(5, 5);
        let params = SearchParams::default().with_report_every(4);
        let mut reports: Vec<(usize, usize, bool)> = Vec::new();

        let result = breadth_first(&graph, n(0), n(24), &params, &mut |snapshot: &ProgressSnapshot<'_>| {
            reports.push((snapshot.visited.len(), snapshot.path.len(), snapshot.finished));
        }).unwrap();

        let (last, periodic) = reports.split_last().unwrap();
        assert_eq!(*last, (result.visited, result.path.len(), true));
        assert!(!periodic.is_empty());
        for &(visited, path_len, finished) in periodic {
            assert_eq!(visited % 4, 0);
            assert_eq!(path_len, 0);
            assert!(!finished);
        }
    }

    #[test]
    fn test_final_report_on_unreachable_goal() {
        let graph = two_components();
        let mut finished = 0;
        depth_first(&graph, n(0), n(11), &SearchParams::default(), &mut |snapshot: &ProgressSnapshot<'_>| {
            if snapshot.finished {
                finished += 1;
                assert!(snapshot.path.is_empty());
            }
        }).unwrap();
        assert_eq!(finished, 1);
    }

    #[test]
    fn test_cancellation_at_checkpoint() {
        struct CancelAfter {
            remaining: usize,
            reports: usize,
        }
        impl SearchObserver for CancelAfter {
            fn on_progress(&mut self, _snapshot: &ProgressSnapshot<'_>) {
                self.reports += 1;
            }
            fn yield_now(&mut self) -> ControlFlow<()> {
                if self.remaining == 0 {
                    return ControlFlow::Break(());
                }
                self.remaining -= 1;
                ControlFlow::Continue(())
            }
        }

        let graph = grid(10, 10);
        let params = SearchParams::default().with_report_every(5);
        let mut observer = CancelAfter { remaining: 2, reports: 0 };
        let result = dijkstra(&graph, n(0), n(99), &params, &mut observer).unwrap();

        assert_eq!(result.termination, Termination::Cancelled);
        assert!(result.path.is_empty());
        assert_eq!(result.visited, 15);
        // three periodic reports plus the final one
        assert_eq!(observer.reports, 4);
    }

    #[test]
    fn test_expansion_budget() {
        let graph = grid(10, 10);
        let params = SearchParams::default().with_max_expansions(10);
        let result = a_star(&graph, n(0), n(99), &params, &mut Silent).unwrap();
        assert_eq!(result.termination, Termination::BudgetExceeded);
        assert!(result.path.is_empty());
        assert_eq!(result.visited, 10);
    }

    #[test]
    fn test_time_budget() {
        let graph = grid(10, 10);
        let params = SearchParams::default().with_time_budget(Duration::ZERO);
        for strategy in Strategy::ALL {
            let result = search(&graph, n(0), n(99), strategy, &params, &mut Silent).unwrap();
            assert_eq!(result.termination, Termination::BudgetExceeded, "{strategy}");
            assert!(result.path.is_empty());
            // the deadline is checked after the first finalized node
            assert_eq!(result.visited, 1);
        }

        // a generous budget does not get in the way
        let params = SearchParams::default().with_time_budget(Duration::from_secs(60));
        assert!(search(&graph, n(0), n(99), Strategy::AStar, &params, &mut Silent).unwrap().is_found());
    }

    #[test]
    fn test_manhattan_order_on_grid() {
        // on a unit lattice Manhattan distance is exact, A* stays optimal
        let graph = grid(8, 8);
        let params = SearchParams::default().with_heuristic_order(MinkowskiOrder::MANHATTAN);
        let result = a_star(&graph, n(0), n(63), &params, &mut Silent).unwrap();
        assert_eq!(graph.path_cost(&result.path), Some(14.0));
    }

    #[test]
    fn test_greedy_feasible_on_weighted_graph() {
        let graph = square(true);
        let result = greedy_best_first(&graph, n(1), n(3), &SearchParams::default(), &mut Silent).unwrap();
        assert!(result.is_found());
        assert!(is_walkable(&graph, &result.path));
    }

    #[test]
    fn test_determinism() {
        let graph = grid(9, 6);
        for strategy in Strategy::ALL {
            let first = run(&graph, 3, 50, strategy);
            for _ in 0..3 {
                let again = run(&graph, 3, 50, strategy);
                assert_eq!(again.path, first.path, "{strategy}");
                assert_eq!(again.visited, first.visited, "{strategy}");
            }
        }
    }

    proptest! {
        #[test]
        fn paths_are_feasible_and_cost_aware_paths_are_minimal(graph in random_planar(), goal_seed in any::<u64>()) {
            let start = n(0);
            let goal = n(goal_seed % graph.len() as u64);
            let reference = bellman_ford(&graph, start);
            let reachable = reference.get(&goal).is_some_and(|d| d.is_finite());

            for strategy in Strategy::ALL {
                let result = run(&graph, start.0, goal.0, strategy);
                prop_assert_eq!(result.is_found(), reachable, "{}", strategy);
                if !reachable {
                    prop_assert!(result.path.is_empty());
                    continue;
                }
                prop_assert_eq!(result.path.first(), Some(&start));
                prop_assert_eq!(result.path.last(), Some(&goal));
                let cost = graph.path_cost(&result.path);
                prop_assert!(cost.is_some(), "{} returned a non-walkable path", strategy);

                if strategy.is_cost_aware() {
                    let best = reference[&goal];
                    prop_assert!((cost.unwrap() - best).abs() < 1e-6, "{}: {:?} vs {}", strategy, cost, best);
                }
            }
        }
    }
}
