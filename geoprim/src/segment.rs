//! Straight line segments between borrowed positions.

use crate::orient::Turn;
use crate::position::Position;

/// A straight line segment between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a>(pub &'a Position, pub &'a Position);

impl Segment<'_> {
    /// Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        self.0.distance(self.1)
    }

    /// Position on the segment at fraction `t` of its length, `t = 0` being
    /// the start.
    pub fn position_at(&self, t: f64) -> Position {
        self.0.lerp(self.1, t)
    }

    /// Shortest Euclidean distance (squared) between a position and the
    /// segment:
    ///
    /// * if the normal from the position to the segment line ends inside the
    ///   segment, the returned value is the squared length of the normal
    /// * otherwise it is the smaller of the squared distances to the segment
    ///   endpoints
    pub fn distance_to_position_sq(&self, position: &Position) -> f64 {
        if self.0 == self.1 {
            return self.0.distance_sq(position);
        }

        let ds = self.0.direction_to(self.1);
        let dp = self.0.direction_to(position);
        let ds_len = ds.dot(&ds);

        let r = dp.dot(&ds) / ds_len;
        if r <= 0.0 {
            self.0.distance_sq(position)
        } else if r >= 1.0 {
            self.1.distance_sq(position)
        } else {
            dp.dot(&dp) - r * r * ds_len
        }
    }

    /// Returns true if the position lies on the segment, comparing the first
    /// two ordinates.
    pub fn contains_position(&self, position: &Position) -> bool {
        if Turn::triplet(self.0, position, self.1) != Turn::Collinear {
            return false;
        }

        let x_min = self.0.x().min(self.1.x());
        let x_max = self.0.x().max(self.1.x());
        let y_min = self.0.y().min(self.1.y());
        let y_max = self.0.y().max(self.1.y());

        position.x() >= x_min
            && position.x() <= x_max
            && position.y() >= y_min
            && position.y() <= y_max
    }

    /// Returns true if the segment has at least one common point with the
    /// `other` segment, comparing the first two ordinates.
    pub fn intersects(&self, other: &Segment) -> bool {
        let o1 = Turn::triplet(self.0, other.0, self.1);
        let o2 = Turn::triplet(self.0, other.1, self.1);
        let o3 = Turn::triplet(other.0, self.0, other.1);
        let o4 = Turn::triplet(other.0, self.1, other.1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        if o1 == Turn::Collinear && self.contains_position(other.0) {
            return true;
        }
        if o2 == Turn::Collinear && self.contains_position(other.1) {
            return true;
        }
        if o3 == Turn::Collinear && other.contains_position(self.0) {
            return true;
        }
        if o4 == Turn::Collinear && other.contains_position(self.1) {
            return true;
        }

        false
    }
}

/// Self-intersection test over an ordered chain of edges.
///
/// Non-adjacent edges must not touch at all. Adjacent edges (including the
/// wrap-around pair when `closed`) share exactly one endpoint and must not
/// fold back onto each other.
pub(crate) fn is_simple_chain(edges: &[Segment<'_>], closed: bool) -> bool {
    let n = edges.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (closed && i == 0 && j == n - 1);
            if adjacent {
                // `b` follows `a` around the chain.
                let (a, b) = if j == i + 1 {
                    (&edges[i], &edges[j])
                } else {
                    (&edges[j], &edges[i])
                };
                if a.contains_position(b.1) || b.contains_position(a.0) {
                    return false;
                }
            } else if edges[i].intersects(&edges[j]) {
                return false;
            }
        }
    }

    true
}
