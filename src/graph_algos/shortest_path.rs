use rustc_hash::FxHashMap;

use crate::graph::NodeId;


/// Predecessor map: node -> the node it was reached from (None for the origin)
pub(crate) type CameFrom = FxHashMap<NodeId, Option<NodeId>>;


/// Walk the predecessor map from `node` back to the search origin
/// Returns [node, parent, ..., origin], empty if `node` was never reached
pub(crate) fn predecessor_chain(came_from: &CameFrom, node: NodeId) -> Vec<NodeId> {
    let mut chain = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        let Some(&parent) = came_from.get(&id) else {
            // never reached
            return Vec::new();
        };
        chain.push(id);
        // a tree never has more links than entries; anything longer is a cycle
        if chain.len() > came_from.len() {
            return Vec::new();
        }
        current = parent;
    }

    chain
}

/// Ordered path from the search origin to `goal`, empty if unreached
pub(crate) fn shortest_path(came_from: &CameFrom, goal: NodeId) -> Vec<NodeId> {
    let mut path = predecessor_chain(came_from, goal);
    // The chain is in reverse order, so reverse it
    path.reverse();
    path
}
