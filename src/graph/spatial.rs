use kdtree::KdTree;
use kdtree::distance::squared_euclidean;

use crate::errors::SearchError;
use crate::geometry::Point;
use super::{Graph, NodeId};


/// Nearest-node lookup over graph coordinates
///
/// Snaps an arbitrary map coordinate (a click, a geocoded address) to the
/// closest graph node so it can be used as a search endpoint.
pub struct SpatialIndex {
    tree: KdTree<f64, NodeId, [f64; 2]>,
}

impl SpatialIndex {

    pub fn build(graph: &Graph) -> Result<Self, SearchError> {
        let mut tree = KdTree::with_capacity(2, graph.len().max(1));
        for node in graph.nodes() {
            tree.add([node.point.x, node.point.y], node.id)?;
        }
        Ok(Self { tree })
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closest node to `point`, None for an empty index
    pub fn nearest(&self, point: Point) -> Result<Option<NodeId>, SearchError> {
        if self.is_empty() {
            return Ok(None);
        }
        let found = self.tree.nearest(&[point.x, point.y], 1, &squared_euclidean)?;
        Ok(found.first().map(|&(_, id)| *id))
    }

    /// The `count` closest nodes with their straight-line distance, closest first
    pub fn nearest_n(&self, point: Point, count: usize) -> Result<Vec<(f64, NodeId)>, SearchError> {
        if self.is_empty() || count == 0 {
            return Ok(Vec::new());
        }
        let found = self.tree.nearest(&[point.x, point.y], count, &squared_euclidean)?;
        // tree reports squared distances
        Ok(found.into_iter().map(|(distance, id)| (distance.sqrt(), *id)).collect())
    }
}
