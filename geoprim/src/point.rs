//! 0-dimensional primitives.

use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::position::Position;
use crate::transform::MathTransform;

/// A 0-dimensional primitive: a single direct position tied to a CRS.
///
/// Points have no boundary. Equality is coordinate plus CRS equality.
///
/// A point's coordinates may be changed in place through
/// [`Point::position_mut`]; this is the only post-construction mutation the
/// kernel allows. Containers never share point storage (they copy positions
/// into their own structures), and the point's envelope is computed on
/// demand, so in-place edits cannot leave stale derived state behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    crs: Crs,
    position: Position,
}

impl Point {
    /// Creates a point, validating the position against the CRS dimension.
    pub fn new(crs: Crs, position: Position) -> Result<Point, GeometryError> {
        if position.dimension() != crs.dimension() {
            return Err(GeometryError::MismatchedDimension {
                expected: crs.dimension(),
                actual: position.dimension(),
            });
        }

        Ok(Point { crs, position })
    }

    /// The position of the point.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Mutable access to the position for in-place coordinate edits.
    ///
    /// The dimension of the position must not be changed.
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// Coordinate reference system of the point.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Degenerate envelope spanning the point's position.
    pub fn envelope(&self) -> Envelope {
        Envelope::from_position(&self.position)
    }

    /// Maps the point into another coordinate space.
    pub fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<Point, GeometryError> {
        let position = transform.transform_position(&self.position)?;
        Point::new(new_crs, position)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::transform::AffineTransform;

    #[test]
    fn dimension_is_checked() {
        assert_matches!(
            Point::new(Crs::EPSG4326, Position::new_3d(1.0, 2.0, 3.0)),
            Err(GeometryError::MismatchedDimension {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn in_place_mutation_is_visible_in_envelope() {
        let mut point =
            Point::new(Crs::local(2), Position::new_2d(1.0, 1.0)).expect("dimensions match");
        point.position_mut().set_ordinate(0, 5.0);
        assert_eq!(point.envelope().maxs(), &[5.0, 1.0]);
    }

    #[test]
    fn transform() {
        let point =
            Point::new(Crs::local(2), Position::new_2d(1.0, 2.0)).expect("dimensions match");
        let transformed = point
            .transform(Crs::local(2), &AffineTransform::scaling(2, 3.0))
            .expect("transform succeeds");
        assert_eq!(transformed.position(), &Position::new_2d(3.0, 6.0));
    }
}
