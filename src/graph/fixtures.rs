use proptest::prelude::*;

use crate::geometry::Point;
use super::{AdjacencyEntry, Graph, NodeId};


pub(crate) fn n(id: u64) -> NodeId {
    NodeId(id)
}

/// A(0,0)-B(1,0)-C(1,1)-D(0,1) with unit sides as ids 0..4
/// With `diagonal`, adds A-C at weight 1.5
pub(crate) fn square(diagonal: bool) -> Graph {
    let mut graph = Graph::new();
    graph.add_node(n(0), Point::new(0.0, 0.0));
    graph.add_node(n(1), Point::new(1.0, 0.0));
    graph.add_node(n(2), Point::new(1.0, 1.0));
    graph.add_node(n(3), Point::new(0.0, 1.0));

    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        graph.add_two_way(n(a), n(b), 1.0).unwrap();
    }
    if diagonal {
        graph.add_two_way(n(0), n(2), 1.5).unwrap();
    }
    graph
}

/// Path 0-1-2 and, unconnected to it, 10-11
pub(crate) fn two_components() -> Graph {
    let mut graph = Graph::new();
    for (id, x) in [(0, 0.0), (1, 1.0), (2, 2.0)] {
        graph.add_node(n(id), Point::new(x, 0.0));
    }
    for (id, x) in [(10, 0.0), (11, 1.0)] {
        graph.add_node(n(id), Point::new(x, 5.0));
    }
    graph.add_two_way(n(0), n(1), 1.0).unwrap();
    graph.add_two_way(n(1), n(2), 1.0).unwrap();
    graph.add_two_way(n(10), n(11), 1.0).unwrap();
    graph
}

/// `width` x `height` lattice with unit edges to the 4 neighbours
/// Node (x, y) has id y * width + x and sits at point (x, y)
pub(crate) fn grid(width: u64, height: u64) -> Graph {
    let mut graph = Graph::new();
    for y in 0..height {
        for x in 0..width {
            graph.add_node(n(y * width + x), Point::new(x as f64, y as f64));
        }
    }
    for y in 0..height {
        for x in 0..width {
            let id = y * width + x;
            if x + 1 < width {
                graph.add_two_way(n(id), n(id + 1), 1.0).unwrap();
            }
            if y + 1 < height {
                graph.add_two_way(n(id), n(id + width), 1.0).unwrap();
            }
        }
    }
    graph
}

/// Directed diamond: A -> B -> D and A -> C -> D, cheaper through C
/// Coordinates are scaled down so straight-line distance never exceeds edge weight
pub(crate) fn diamond() -> Graph {
    let mut graph = Graph::new();
    graph.add_node(n(0), Point::new(0.0, 0.0));
    graph.add_node(n(1), Point::new(0.1, 0.1));
    graph.add_node(n(2), Point::new(0.1, -0.1));
    graph.add_node(n(3), Point::new(0.2, 0.0));

    for (from, to, weight) in [(0, 1, 1.0), (0, 2, 3.0), (1, 3, 5.0), (2, 3, 1.0)] {
        graph.add_edge(n(from), AdjacencyEntry::new(n(to), weight).one_way(true)).unwrap();
    }
    graph
}

/// Every consecutive pair of `path` is an edge of `graph`
pub(crate) fn is_walkable(graph: &Graph, path: &[NodeId]) -> bool {
    graph.path_cost(path).is_some()
}

/// Random planar graph of up to 24 nodes: edge weight is the straight-line
/// length times a factor >= 1, so the Euclidean heuristic stays admissible
pub(crate) fn random_planar() -> impl Strategy<Value = Graph> {
    let points = prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..24);
    points.prop_flat_map(|points| {
        let count = points.len();
        let edges = prop::collection::vec((0..count, 0..count, 1.0f64..3.0, any::<bool>()), 0..count * 3);
        (Just(points), edges)
    }).prop_map(|(points, edges)| {
        let mut graph = Graph::new();
        for (id, &(x, y)) in points.iter().enumerate() {
            graph.add_node(n(id as u64), Point::new(x, y));
        }
        for (a, b, stretch, one_way) in edges {
            let (pa, pb) = (Point::new(points[a].0, points[a].1), Point::new(points[b].0, points[b].1));
            let weight = pa.distance(&pb) * stretch;
            graph.add_edge(n(a as u64), AdjacencyEntry::new(n(b as u64), weight).one_way(one_way)).unwrap();
            if !one_way {
                graph.add_edge(n(b as u64), AdjacencyEntry::new(n(a as u64), weight)).unwrap();
            }
        }
        graph
    })
}
