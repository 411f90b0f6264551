pub mod bidirectional;
pub mod search;
mod engine;
mod frontier;
mod progress;
mod shortest_path;

pub use bidirectional::{MeetingRule, bidirectional};
pub use progress::{ProgressSnapshot, SearchObserver, Silent};
pub use search::{a_star, breadth_first, depth_first, dijkstra, greedy_best_first, search};

use std::{fmt, str::FromStr, time::Duration};
use serde::{Deserialize, Serialize};

use crate::errors::SearchError;
use crate::geometry::MinkowskiOrder;
use crate::graph::NodeId;


/// Graph search strategy
///
/// | Strategy     | Frontier       | Admission               | Ordering key       |
/// |--------------|----------------|-------------------------|--------------------|
/// | BreadthFirst | FIFO queue     | first-seen only         | insertion order    |
/// | DepthFirst   | LIFO stack     | first-seen only         | reverse insertion  |
/// | Dijkstra     | priority queue | relax on cheaper cost   | path cost          |
/// | Greedy       | priority queue | first-seen only         | heuristic          |
/// | AStar        | priority queue | relax on cheaper cost   | cost + heuristic   |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    Greedy,
    #[default]
    AStar,
}

/// How the frontier orders discovered nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Discipline {
    Fifo,
    Lifo,
    Priority,
}

/// When a newly discovered route to a node is recorded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Admission {
    FirstSeen,
    Relax,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::Dijkstra,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    /// Dijkstra and A* return minimum-cost paths, the rest only feasible ones
    pub fn is_cost_aware(self) -> bool {
        matches!(self, Strategy::Dijkstra | Strategy::AStar)
    }

    pub fn uses_heuristic(self) -> bool {
        matches!(self, Strategy::Greedy | Strategy::AStar)
    }

    pub(crate) fn discipline(self) -> Discipline {
        match self {
            Strategy::BreadthFirst => Discipline::Fifo,
            Strategy::DepthFirst => Discipline::Lifo,
            Strategy::Dijkstra | Strategy::Greedy | Strategy::AStar => Discipline::Priority,
        }
    }

    pub(crate) fn admission(self) -> Admission {
        if self.is_cost_aware() {
            Admission::Relax
        } else {
            Admission::FirstSeen
        }
    }

    /// Priority-queue key; unused by the FIFO and LIFO disciplines
    pub(crate) fn key(self, cost: f64, heuristic: f64) -> f64 {
        match self {
            Strategy::Dijkstra => cost,
            Strategy::Greedy => heuristic,
            Strategy::AStar => cost + heuristic,
            Strategy::BreadthFirst | Strategy::DepthFirst => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
            Strategy::Dijkstra => "dijkstra",
            Strategy::Greedy => "greedy best-first",
            Strategy::AStar => "a*",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    /// Accepts the short tags (`bfs`, `dfs`, `dijkstra`, `greedy`, `astar`)
    /// and the snake_case serde names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth_first" => Ok(Strategy::BreadthFirst),
            "dfs" | "depth_first" => Ok(Strategy::DepthFirst),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "greedy" => Ok(Strategy::Greedy),
            "astar" | "a_star" | "a*" => Ok(Strategy::AStar),
            _ => Err(SearchError::InvalidParams(format!("unknown strategy {s:?}"))),
        }
    }
}


/// Per-call search parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Order p of the Minkowski heuristic (Greedy and A* only)
    pub heuristic_order: MinkowskiOrder,

    /// Report progress after every this many finalized nodes
    /// (bidirectional: every this many rounds)
    pub report_every: usize,

    /// Stop after finalizing this many nodes
    pub max_expansions: Option<usize>,

    /// Stop once this much wall-clock time has passed
    pub time_budget_ms: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            heuristic_order: MinkowskiOrder::default(),
            report_every: 100,
            max_expansions: None,
            time_budget_ms: None,
        }
    }
}

impl SearchParams {

    pub fn with_heuristic_order(mut self, order: MinkowskiOrder) -> Self {
        self.heuristic_order = order;
        self
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.report_every == 0 {
            return Err(SearchError::InvalidParams("report_every must be at least 1".to_string()));
        }
        Ok(())
    }
}


/// Why a search stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Goal reached (or the two directions met)
    Found,
    /// Frontier ran dry, the goal is unreachable
    Exhausted,
    /// The observer asked to stop at a suspension point
    Cancelled,
    /// `max_expansions` or `time_budget_ms` ran out
    BudgetExceeded,
}


/// Outcome of one search call
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// start..=goal, empty unless `termination` is `Found`
    pub path: Vec<NodeId>,
    pub elapsed: Duration,
    /// Number of finalized nodes (both directions summed when bidirectional)
    pub visited: usize,
    pub termination: Termination,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        self.termination == Termination::Found
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}
