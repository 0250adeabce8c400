//! Direct positions: coordinate tuples in N-dimensional Euclidean space.

use approx::AbsDiffEq;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// A coordinate tuple.
///
/// Positions are plain values without a CRS of their own; the primitives that
/// own them carry the CRS and validate that every position matches its
/// coordinate dimension. Equality is exact coordinate equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    ordinates: Vec<f64>,
}

impl Position {
    /// Creates a position from its ordinates.
    pub fn new(ordinates: Vec<f64>) -> Self {
        Self { ordinates }
    }

    /// Creates a 2-dimensional position.
    pub fn new_2d(x: f64, y: f64) -> Self {
        Self {
            ordinates: vec![x, y],
        }
    }

    /// Creates a 3-dimensional position.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            ordinates: vec![x, y, z],
        }
    }

    /// Number of ordinates.
    pub fn dimension(&self) -> usize {
        self.ordinates.len()
    }

    /// All ordinates in order.
    pub fn ordinates(&self) -> &[f64] {
        &self.ordinates
    }

    /// The ordinate at the given index, if present.
    pub fn ordinate(&self, index: usize) -> Option<f64> {
        self.ordinates.get(index).copied()
    }

    /// Replaces the ordinate at the given index.
    ///
    /// Returns `false` if the index is out of range.
    pub fn set_ordinate(&mut self, index: usize, value: f64) -> bool {
        match self.ordinates.get_mut(index) {
            Some(v) => {
                *v = value;
                true
            }
            None => false,
        }
    }

    /// First ordinate.
    ///
    /// Panics if the position has dimension 0.
    pub fn x(&self) -> f64 {
        self.ordinates[0]
    }

    /// Second ordinate.
    ///
    /// Panics if the position has dimension less than 2.
    pub fn y(&self) -> f64 {
        self.ordinates[1]
    }

    /// Squared Euclidean distance to another position.
    ///
    /// If dimensions differ, only the common ordinates are compared.
    pub fn distance_sq(&self, other: &Position) -> f64 {
        self.ordinates
            .iter()
            .zip(&other.ordinates)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Position) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Linear interpolation between `self` (at `t = 0`) and `other`
    /// (at `t = 1`).
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        Position {
            ordinates: self
                .ordinates
                .iter()
                .zip(&other.ordinates)
                .map(|(a, b)| a + (b - a) * t)
                .collect(),
        }
    }

    /// Direction vector from `self` towards `other`.
    pub fn direction_to(&self, other: &Position) -> DVector<f64> {
        DVector::from_iterator(
            self.ordinates.len().min(other.ordinates.len()),
            self.ordinates
                .iter()
                .zip(&other.ordinates)
                .map(|(a, b)| b - a),
        )
    }
}

impl AbsDiffEq for Position {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .ordinates
                .iter()
                .zip(&other.ordinates)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl From<Vec<f64>> for Position {
    fn from(ordinates: Vec<f64>) -> Self {
        Self { ordinates }
    }
}

impl From<[f64; 2]> for Position {
    fn from(value: [f64; 2]) -> Self {
        Self {
            ordinates: value.to_vec(),
        }
    }
}

impl From<[f64; 3]> for Position {
    fn from(value: [f64; 3]) -> Self {
        Self {
            ordinates: value.to_vec(),
        }
    }
}
