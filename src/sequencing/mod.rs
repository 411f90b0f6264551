use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::collections::FxIndexSet;
use crate::errors::SequenceError;
use crate::geometry::Point;
use crate::graph::{Graph, Locate, NodeId};

/// Exhaustive ordering is factorial; 9 stops is 362 880 orderings
pub const MAX_GLOBAL_DESTINATIONS: usize = 9;


/// Shortest open-path ordering of `destinations` by straight-line distance
///
/// Returns `start` followed by every distinct destination. Orderings are
/// enumerated in input order and a later ordering replaces the best only when
/// strictly shorter, so ties resolve to the earliest one. Partial tours
/// already as long as the best are pruned. If no tour has a finite length
/// the input order is kept.
pub fn compute_global_sequence<L>(start: NodeId, destinations: &[NodeId], coords: &L) -> Result<Vec<NodeId>, SequenceError>
where
    L: Locate + ?Sized,
{
    let stops = distinct(destinations);
    if stops.len() > MAX_GLOBAL_DESTINATIONS {
        return Err(SequenceError::TooManyDestinations { count: stops.len(), limit: MAX_GLOBAL_DESTINATIONS });
    }

    let origin = locate(coords, start)?;
    let points = stops.iter()
        .map(|&id| locate(coords, id))
        .collect::<Result<Vec<_>, _>>()?;

    let mut search = Exhaustive {
        points: &points,
        used: vec![false; points.len()],
        current: Vec::with_capacity(points.len()),
        best: (0..points.len()).collect(),
        best_length: f64::INFINITY,
    };
    search.extend(origin, 0.0);
    debug!("global order of {} stops: length {}", stops.len(), search.best_length);

    let mut sequence = Vec::with_capacity(stops.len() + 1);
    sequence.push(start);
    sequence.extend(search.best.iter().map(|&index| stops[index]));
    Ok(sequence)
}

/// Depth-first enumeration of orderings with pruning
struct Exhaustive<'a> {
    points: &'a [Point],
    used: Vec<bool>,
    current: Vec<usize>,
    best: Vec<usize>,
    best_length: f64,
}

impl Exhaustive<'_> {
    fn extend(&mut self, from: Point, length: f64) {
        if self.current.len() == self.points.len() {
            if length < self.best_length {
                self.best_length = length;
                self.best.clone_from(&self.current);
            }
            return;
        }

        for index in 0..self.points.len() {
            if self.used[index] {
                continue;
            }
            let next = self.points[index];
            let extended = length + from.distance(&next);
            if extended >= self.best_length {
                continue;
            }

            self.used[index] = true;
            self.current.push(index);
            self.extend(next, extended);
            self.current.pop();
            self.used[index] = false;
        }
    }
}


/// Nearest-neighbour ordering
///
/// Repeatedly appends the closest unvisited destination to the end of the
/// tour; ties go to the destination listed first. Fast but not optimal.
pub fn compute_local_sequence<L>(start: NodeId, destinations: &[NodeId], coords: &L) -> Result<Vec<NodeId>, SequenceError>
where
    L: Locate + ?Sized,
{
    let mut remaining = distinct(destinations)
        .into_iter()
        .map(|id| locate(coords, id).map(|point| (id, point)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut current = locate(coords, start)?;
    let mut sequence = Vec::with_capacity(remaining.len() + 1);
    sequence.push(start);

    while !remaining.is_empty() {
        let mut nearest = 0;
        let mut nearest_distance = f64::INFINITY;
        for (index, (_, point)) in remaining.iter().enumerate() {
            let distance = current.distance(point);
            if distance < nearest_distance {
                nearest = index;
                nearest_distance = distance;
            }
        }

        // keep the input order of the rest for tie-breaking
        let (id, point) = remaining.remove(nearest);
        sequence.push(id);
        current = point;
    }

    Ok(sequence)
}


/// Straight-line length of the open path through `sequence`
pub fn tour_length<L>(sequence: &[NodeId], coords: &L) -> Result<f64, SequenceError>
where
    L: Locate + ?Sized,
{
    let points = sequence.iter()
        .map(|&id| locate(coords, id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(points.windows(2).map(|pair| pair[0].distance(&pair[1])).sum())
}


/// Pick `count` random destinations from the graph, never `start`
///
/// `count` is clamped to at least 1 and at most the number of other nodes.
pub fn pick_random_destinations<R>(graph: &Graph, start: NodeId, count: usize, rng: &mut R) -> Vec<NodeId>
where
    R: Rng + ?Sized,
{
    let mut candidates: Vec<NodeId> = graph.ids().filter(|&id| id != start).collect();
    let count = count.max(1).min(candidates.len());

    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}


fn distinct(destinations: &[NodeId]) -> Vec<NodeId> {
    let unique: FxIndexSet<NodeId> = destinations.iter().copied().collect();
    if unique.len() < destinations.len() {
        debug!("dropped {} repeated destinations", destinations.len() - unique.len());
    }
    unique.into_iter().collect()
}

fn locate<L: Locate + ?Sized>(coords: &L, id: NodeId) -> Result<Point, SequenceError> {
    let point = coords.locate(id).ok_or(SequenceError::MissingCoordinate(id))?;
    if !(point.x.is_finite() && point.y.is_finite()) {
        return Err(SequenceError::NonFiniteCoordinate(id));
    }
    Ok(point)
}
