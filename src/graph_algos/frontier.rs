use std::collections::VecDeque;

use crate::collections::PriorityQueue;
use crate::graph::NodeId;
use super::{Discipline, Strategy};


/// Discovered-but-unfinalized nodes, ordered per strategy
#[derive(Debug, Clone)]
pub(crate) enum Frontier {
    Fifo(VecDeque<NodeId>),
    Lifo(Vec<NodeId>),
    Priority(PriorityQueue<NodeId, f64>),
}

impl Frontier {

    pub(crate) fn for_strategy(strategy: Strategy) -> Self {
        match strategy.discipline() {
            Discipline::Fifo => Frontier::Fifo(VecDeque::new()),
            Discipline::Lifo => Frontier::Lifo(Vec::new()),
            Discipline::Priority => Frontier::Priority(PriorityQueue::new()),
        }
    }

    /// Add a node; `key` only matters to the priority discipline, where
    /// pushing a queued node moves it to the new key
    pub(crate) fn push(&mut self, node: NodeId, key: f64) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(node),
            Frontier::Lifo(stack) => stack.push(node),
            Frontier::Priority(queue) => queue.enqueue(node, key),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
            Frontier::Priority(queue) => queue.dequeue(),
        }
    }

    /// Smallest key waiting, priority discipline only
    pub(crate) fn min_key(&self) -> Option<f64> {
        match self {
            Frontier::Priority(queue) => queue.peek_priority(),
            Frontier::Fifo(_) | Frontier::Lifo(_) => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        match self {
            Frontier::Fifo(queue) => queue.len(),
            Frontier::Lifo(stack) => stack.len(),
            Frontier::Priority(queue) => queue.len(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut Frontier) -> Vec<u64> {
        std::iter::from_fn(|| frontier.pop()).map(|id| id.0).collect()
    }

    #[test]
    fn test_disciplines() {
        let pushes = [(1, 3.0), (2, 1.0), (3, 2.0)];

        let mut fifo = Frontier::for_strategy(Strategy::BreadthFirst);
        let mut lifo = Frontier::for_strategy(Strategy::DepthFirst);
        let mut priority = Frontier::for_strategy(Strategy::Dijkstra);
        for (id, key) in pushes {
            fifo.push(NodeId(id), key);
            lifo.push(NodeId(id), key);
            priority.push(NodeId(id), key);
        }

        assert_eq!(priority.min_key(), Some(1.0));
        assert_eq!(fifo.min_key(), None);
        assert_eq!(fifo.len(), 3);

        assert_eq!(drain(&mut fifo), vec![1, 2, 3]);
        assert_eq!(drain(&mut lifo), vec![3, 2, 1]);
        assert_eq!(drain(&mut priority), vec![2, 3, 1]);
        assert!(priority.is_empty());
    }

    #[test]
    fn test_priority_push_is_decrease_key() {
        let mut frontier = Frontier::for_strategy(Strategy::AStar);
        frontier.push(NodeId(1), 5.0);
        frontier.push(NodeId(2), 4.0);
        frontier.push(NodeId(1), 1.0);
        assert_eq!(frontier.len(), 2);
        assert_eq!(drain(&mut frontier), vec![1, 2]);
    }
}
