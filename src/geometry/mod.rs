use num_traits::{Num, Signed, Float};
use serde::{Deserialize, Serialize};
use crate::errors::GeometryError;


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    (x1 - x2).hypot(y1 - y2)
}

/// Minkowski distance of order p
/// https://en.wikipedia.org/wiki/Minkowski_distance
/// p = 1 is Manhattan, p = 2 is Euclidean. Orders below 1 are not a metric
/// (the triangle inequality fails) but are still accepted as a heuristic.
pub fn minkowski<T>(x1: T, y1: T, x2: T, y2: T, p: T) -> T
where
    T: Float,
    {
    ((x1 - x2).abs().powf(p) + (y1 - y2).abs().powf(p)).powf(p.recip())
}


/// 2D Point - projected planar coordinate, treated as Euclidean space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }

    pub fn minkowski_distance(&self, other: &Point, order: MinkowskiOrder) -> f64 {
        // exact forms avoid powf rounding on the common orders
        let p = order.get();
        if p == 1.0 {
            manhattan_distance(self.x, self.y, other.x, other.y)
        } else if p == 2.0 {
            self.distance(other)
        } else {
            minkowski(self.x, self.y, other.x, other.y, p)
        }
    }
}


/// Order `p` of the Minkowski heuristic
///
/// Validated on construction (finite, at least [`MinkowskiOrder::MIN`]) so an
/// invalid order is rejected where parameters enter the crate and never
/// reaches a search loop. Deserializes from a bare number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MinkowskiOrder(f64);

impl MinkowskiOrder {
    pub const MIN: f64 = 0.01;
    pub const MANHATTAN: Self = Self(1.0);
    pub const EUCLIDEAN: Self = Self(2.0);

    pub fn new(p: f64) -> Result<Self, GeometryError> {
        if p.is_finite() && p >= Self::MIN {
            Ok(Self(p))
        } else {
            Err(GeometryError::InvalidMinkowskiOrder(p))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for MinkowskiOrder {
    fn default() -> Self {
        Self::EUCLIDEAN
    }
}

impl TryFrom<f64> for MinkowskiOrder {
    type Error = GeometryError;

    fn try_from(p: f64) -> Result<Self, Self::Error> {
        Self::new(p)
    }
}

impl From<MinkowskiOrder> for f64 {
    fn from(order: MinkowskiOrder) -> Self {
        order.0
    }
}
