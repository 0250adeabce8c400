//! Planar orientation of point triplets.

use crate::position::Position;

/// Turn direction of a triplet of positions, projected to the first two
/// ordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Turn {
    /// Determines the turn direction of a triplet of positions.
    pub fn triplet(p: &Position, q: &Position, r: &Position) -> Self {
        let v = (q.y() - p.y()) * (r.x() - q.x()) - (q.x() - p.x()) * (r.y() - q.y());
        if v == 0.0 {
            Self::Collinear
        } else if v > 0.0 {
            Self::Clockwise
        } else {
            Self::Counterclockwise
        }
    }
}
