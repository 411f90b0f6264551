use std::ops::ControlFlow;
use rustc_hash::FxHashSet;

use crate::graph::NodeId;


/// State handed to an observer at a progress checkpoint
///
/// The visited set is lent immutably: observers can read or clone it but
/// the search keeps ownership.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot<'a> {
    /// Finalized nodes so far (both directions when bidirectional)
    pub visited: &'a FxHashSet<NodeId>,
    /// Empty while searching; the solution (or empty) once finished
    pub path: &'a [NodeId],
    /// True for the one report emitted at termination
    pub finished: bool,
}


/// Receives progress reports and owns the search's only suspension point
///
/// A search reports after every `report_every` finalized nodes and once more
/// when it terminates. After each periodic report it calls `yield_now`,
/// where an interactive host can render a frame. Returning
/// `ControlFlow::Break` cancels the search.
pub trait SearchObserver {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot<'_>);

    fn yield_now(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F> SearchObserver for F
where
    F: FnMut(&ProgressSnapshot<'_>),
{
    fn on_progress(&mut self, snapshot: &ProgressSnapshot<'_>) {
        self(snapshot)
    }
}


/// Headless observer, ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SearchObserver for Silent {
    fn on_progress(&mut self, _snapshot: &ProgressSnapshot<'_>) {}
}


/// Fires every `every` ticks
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cadence {
    every: usize,
    ticks: usize,
}

impl Cadence {
    pub(crate) fn new(every: usize) -> Self {
        Self { every: every.max(1), ticks: 0 }
    }

    pub(crate) fn tick(&mut self) -> bool {
        self.ticks += 1;
        self.ticks % self.every == 0
    }
}


/// Periodic report followed by the suspension point
pub(crate) fn checkpoint<O>(observer: &mut O, visited: &FxHashSet<NodeId>) -> ControlFlow<()>
where
    O: SearchObserver + ?Sized,
{
    observer.on_progress(&ProgressSnapshot { visited, path: &[], finished: false });
    observer.yield_now()
}
