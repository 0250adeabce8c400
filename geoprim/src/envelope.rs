//! Axis-aligned bounding envelopes.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Axis-aligned bounding box in N-dimensional space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl Envelope {
    /// Degenerate envelope spanning a single position.
    pub fn from_position(position: &Position) -> Self {
        Self {
            mins: position.ordinates().to_vec(),
            maxs: position.ordinates().to_vec(),
        }
    }

    /// Envelope spanning all given positions, or `None` if the iterator is
    /// empty.
    pub fn from_positions<'a>(mut positions: impl Iterator<Item = &'a Position>) -> Option<Self> {
        let mut envelope = Self::from_position(positions.next()?);
        for p in positions {
            envelope.expand(p);
        }

        Some(envelope)
    }

    /// Number of ordinates per corner.
    pub fn dimension(&self) -> usize {
        self.mins.len()
    }

    /// Lower bound for the given ordinate index.
    pub fn min(&self, index: usize) -> Option<f64> {
        self.mins.get(index).copied()
    }

    /// Upper bound for the given ordinate index.
    pub fn max(&self, index: usize) -> Option<f64> {
        self.maxs.get(index).copied()
    }

    /// All lower bounds.
    pub fn mins(&self) -> &[f64] {
        &self.mins
    }

    /// All upper bounds.
    pub fn maxs(&self) -> &[f64] {
        &self.maxs
    }

    /// Extent along the first axis.
    pub fn width(&self) -> f64 {
        self.extent(0)
    }

    /// Extent along the second axis.
    pub fn height(&self) -> f64 {
        self.extent(1)
    }

    fn extent(&self, index: usize) -> f64 {
        match (self.min(index), self.max(index)) {
            (Some(min), Some(max)) => max - min,
            _ => 0.0,
        }
    }

    /// Grows the envelope to contain the given position.
    pub fn expand(&mut self, position: &Position) {
        for (i, v) in position.ordinates().iter().enumerate() {
            if let Some(min) = self.mins.get_mut(i) {
                if *v < *min {
                    *min = *v;
                }
            }
            if let Some(max) = self.maxs.get_mut(i) {
                if *v > *max {
                    *max = *v;
                }
            }
        }
    }

    /// Smallest envelope containing both `self` and `other`.
    pub fn merge(&self, other: &Envelope) -> Envelope {
        debug_assert_eq!(self.dimension(), other.dimension());
        Envelope {
            mins: self
                .mins
                .iter()
                .zip(&other.mins)
                .map(|(a, b)| a.min(*b))
                .collect(),
            maxs: self
                .maxs
                .iter()
                .zip(&other.maxs)
                .map(|(a, b)| a.max(*b))
                .collect(),
        }
    }

    /// Returns true if the position lies inside or on the border of the
    /// envelope.
    pub fn contains(&self, position: &Position) -> bool {
        position
            .ordinates()
            .iter()
            .enumerate()
            .all(|(i, v)| match (self.min(i), self.max(i)) {
                (Some(min), Some(max)) => min <= *v && *v <= max,
                _ => false,
            })
    }

    /// Center of the envelope.
    pub fn center(&self) -> Position {
        Position::new(
            self.mins
                .iter()
                .zip(&self.maxs)
                .map(|(min, max)| (min + max) / 2.0)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_positions() {
        let positions = [
            Position::new_2d(1.0, 5.0),
            Position::new_2d(-2.0, 3.0),
            Position::new_2d(0.0, 7.0),
        ];
        let envelope =
            Envelope::from_positions(positions.iter()).expect("non-empty input");
        assert_eq!(envelope.mins(), &[-2.0, 3.0]);
        assert_eq!(envelope.maxs(), &[1.0, 7.0]);

        assert!(Envelope::from_positions(std::iter::empty()).is_none());
    }

    #[test]
    fn merge() {
        let a = Envelope::from_position(&Position::new_2d(0.0, 0.0));
        let b = Envelope::from_position(&Position::new_2d(2.0, -1.0));
        let merged = a.merge(&b);
        assert_eq!(merged.mins(), &[0.0, -1.0]);
        assert_eq!(merged.maxs(), &[2.0, 0.0]);
        assert_eq!(merged.width(), 2.0);
        assert_eq!(merged.height(), 1.0);
    }

    #[test]
    fn contains() {
        let positions = [Position::new_2d(0.0, 0.0), Position::new_2d(1.0, 1.0)];
        let envelope =
            Envelope::from_positions(positions.iter()).expect("non-empty input");
        assert!(envelope.contains(&Position::new_2d(0.5, 0.5)));
        assert!(envelope.contains(&Position::new_2d(1.0, 0.0)));
        assert!(!envelope.contains(&Position::new_2d(1.1, 0.5)));
        assert_eq!(envelope.center(), Position::new_2d(0.5, 0.5));
    }
}
