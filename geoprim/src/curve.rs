//! 1-dimensional primitives: curves over continuous segment chains.

use nalgebra::DVector;

use crate::crs::Crs;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::line_string::LineString;
use crate::point::Point;
use crate::position::Position;
use crate::segment::{is_simple_chain, Segment};
use crate::transform::MathTransform;

/// Boundary of a curve.
///
/// A closed curve (start position equals end position) has an empty boundary.
/// This is modelled explicitly instead of an absent value so that callers can
/// tell "no boundary because the curve is a cycle" apart from a boundary that
/// was never computed.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveBoundary {
    /// The curve is a cycle; its boundary is empty.
    Closed,
    /// Start and end points of an open curve.
    Ends(CurveEnds),
}

impl CurveBoundary {
    /// Returns true if the boundary is empty (the curve is a cycle).
    pub fn is_empty(&self) -> bool {
        matches!(self, CurveBoundary::Closed)
    }

    /// The two endpoint representatives, if the curve is open.
    pub fn ends(&self) -> Option<&CurveEnds> {
        match self {
            CurveBoundary::Closed => None,
            CurveBoundary::Ends(ends) => Some(ends),
        }
    }
}

/// The two distinct endpoints bounding an open curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveEnds {
    start: Point,
    end: Point,
}

impl CurveEnds {
    /// Creates a curve boundary from its two endpoints.
    ///
    /// The points must differ and share a CRS; a cycle has no `CurveEnds`.
    pub fn new(start: Point, end: Point) -> Result<CurveEnds, GeometryError> {
        if start.crs() != end.crs() {
            return Err(GeometryError::MismatchedCrs);
        }
        if start.position() == end.position() {
            return Err(GeometryError::invalid(
                "start and end point of a curve boundary must differ",
            ));
        }

        Ok(CurveEnds { start, end })
    }

    /// Start point of the curve.
    pub fn start(&self) -> &Point {
        &self.start
    }

    /// End point of the curve.
    pub fn end(&self) -> &Point {
        &self.end
    }

    /// The same boundary with start and end swapped.
    pub fn swapped(&self) -> CurveEnds {
        CurveEnds {
            start: self.end.clone(),
            end: self.start.clone(),
        }
    }
}

/// A 1-dimensional primitive: an ordered, continuous chain of curve segments.
///
/// Curves are parameterized by arc length. The first segment starts at
/// parameter 0 and every segment's parameter interval accumulates the
/// Euclidean segment lengths in the order given at construction; the order is
/// never normalized or changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    crs: Crs,
    segments: Vec<LineString>,
    envelope: Envelope,
    boundary: CurveBoundary,
}

impl Curve {
    /// Creates a curve from a non-empty chain of segments.
    ///
    /// Fails if the chain is empty, if any segment does not match the CRS
    /// dimension, or if the chain is discontinuous (a segment's end position
    /// differs from the next segment's start position).
    pub fn new(crs: Crs, mut segments: Vec<LineString>) -> Result<Curve, GeometryError> {
        if segments.is_empty() {
            return Err(GeometryError::invalid(
                "a curve requires at least one segment",
            ));
        }

        for segment in &segments {
            if segment.dimension() != crs.dimension() {
                return Err(GeometryError::MismatchedDimension {
                    expected: crs.dimension(),
                    actual: segment.dimension(),
                });
            }
        }

        for pair in segments.windows(2) {
            if pair[0].end_position() != pair[1].start_position() {
                return Err(GeometryError::invalid(
                    "curve segments are not continuous",
                ));
            }
        }

        let mut start = 0.0;
        for segment in &mut segments {
            segment.set_start_param(start);
            start = segment.end_param();
        }

        let mut envelope = segments[0].envelope();
        for segment in &segments[1..] {
            envelope = envelope.merge(&segment.envelope());
        }

        let start_position = segments[0].start_position().clone();
        let end_position = segments[segments.len() - 1].end_position().clone();
        let boundary = if start_position == end_position {
            CurveBoundary::Closed
        } else {
            CurveBoundary::Ends(CurveEnds::new(
                Point::new(crs.clone(), start_position)?,
                Point::new(crs.clone(), end_position)?,
            )?)
        };

        Ok(Curve {
            crs,
            segments,
            envelope,
            boundary,
        })
    }

    /// Creates a single-segment curve directly from control positions.
    pub fn from_positions(
        crs: Crs,
        positions: Vec<Position>,
    ) -> Result<Curve, GeometryError> {
        Curve::new(crs, vec![LineString::new(positions)?])
    }

    /// Coordinate reference system of the curve.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// The segments tracing the curve, in traversal order.
    pub fn segments(&self) -> &[LineString] {
        &self.segments
    }

    /// Bounding envelope over all segments.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Boundary of the curve, derived at construction.
    pub fn boundary(&self) -> &CurveBoundary {
        &self.boundary
    }

    /// First position of the curve.
    pub fn start_position(&self) -> &Position {
        self.segments[0].start_position()
    }

    /// Last position of the curve.
    pub fn end_position(&self) -> &Position {
        self.segments[self.segments.len() - 1].end_position()
    }

    /// Returns true if start and end position coincide.
    pub fn is_closed(&self) -> bool {
        self.boundary.is_empty()
    }

    /// Arc-length parameter of the curve start; always 0.
    pub fn start_param(&self) -> f64 {
        0.0
    }

    /// Arc-length parameter of the curve end: the total curve length.
    pub fn end_param(&self) -> f64 {
        self.segments[self.segments.len() - 1].end_param()
    }

    /// Total length of the curve.
    pub fn length(&self) -> f64 {
        (self.end_param() - self.start_param()).abs()
    }

    /// Length of the curve piece between two arc-length parameters.
    pub fn length_between(&self, param1: f64, param2: f64) -> Result<f64, GeometryError> {
        if param1 < 0.0 {
            return Err(GeometryError::ParamOutOfRange {
                param: param1,
                start: self.start_param(),
                end: self.end_param(),
            });
        }
        if param2 > self.length() {
            return Err(GeometryError::ParamOutOfRange {
                param: param2,
                start: self.start_param(),
                end: self.end_param(),
            });
        }

        Ok(param2 - param1)
    }

    fn segment_at(&self, param: f64) -> Result<&LineString, GeometryError> {
        if param < self.start_param() || param > self.end_param() {
            return Err(GeometryError::ParamOutOfRange {
                param,
                start: self.start_param(),
                end: self.end_param(),
            });
        }

        let mut index = 0;
        while index + 1 < self.segments.len() && param > self.segments[index].end_param() {
            index += 1;
        }

        Ok(&self.segments[index])
    }

    /// Position on the curve at the given arc-length distance from the start.
    pub fn position_at(&self, distance: f64) -> Result<Position, GeometryError> {
        self.segment_at(distance)?.position_at(distance)
    }

    /// Unit tangent direction at the given arc-length distance from the
    /// start.
    pub fn tangent_at(&self, distance: f64) -> Result<DVector<f64>, GeometryError> {
        self.segment_at(distance)?.tangent_at(distance)
    }

    /// Control positions of the curve, first to last, without duplicating the
    /// joints between segments.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter().enumerate().flat_map(|(i, segment)| {
            segment.positions().iter().skip(usize::from(i > 0))
        })
    }

    /// Flattens all segments into an ordered sequence of straight edges.
    ///
    /// The sequence is recomputed on each call, not cached.
    pub fn line_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.segments.iter().flat_map(|segment| segment.segments())
    }

    /// Constructs a new curve by concatenating this curve with another one.
    ///
    /// Neither input is modified; all segments are copied and the
    /// parametrization of the result is recomputed. Fails if the curves do
    /// not share a CRS or if `other` does not start where `self` ends.
    pub fn merge(&self, other: &Curve) -> Result<Curve, GeometryError> {
        if self.crs != other.crs {
            return Err(GeometryError::MismatchedCrs);
        }
        if self.end_position() != other.start_position() {
            return Err(GeometryError::invalid(
                "curves to merge are not continuous",
            ));
        }

        let segments = self
            .segments
            .iter()
            .chain(&other.segments)
            .cloned()
            .collect();
        Curve::new(self.crs.clone(), segments)
    }

    /// Splits the curve at an interior arc-length distance into two curves.
    pub fn split(&self, distance: f64) -> Result<(Curve, Curve), GeometryError> {
        if distance <= 0.0 || distance >= self.length() {
            return Err(GeometryError::ParamOutOfRange {
                param: distance,
                start: self.start_param(),
                end: self.end_param(),
            });
        }

        let positions: Vec<&Position> = self.positions().collect();
        let mut first: Vec<Position> = vec![positions[0].clone()];
        let mut second: Vec<Position> = Vec::new();
        let mut accumulated = 0.0;

        for pair in positions.windows(2) {
            let length = pair[0].distance(pair[1]);
            if second.is_empty() {
                if accumulated + length >= distance && length > 0.0 {
                    let t = (distance - accumulated) / length;
                    let split_position = pair[0].lerp(pair[1], t);
                    if first.last() != Some(&split_position) {
                        first.push(split_position.clone());
                    }
                    second.push(split_position);
                    if *pair[1] != second[second.len() - 1] {
                        second.push(pair[1].clone());
                    }
                } else {
                    first.push(pair[1].clone());
                }
                accumulated += length;
            } else if second.last() != Some(pair[1]) {
                second.push(pair[1].clone());
            }
        }

        Ok((
            Curve::from_positions(self.crs.clone(), first)?,
            Curve::from_positions(self.crs.clone(), second)?,
        ))
    }

    /// Tests the curve for self-intersection over the flattened edges.
    ///
    /// For a closed curve the coincidence of start and end is allowed.
    pub fn is_simple(&self) -> bool {
        let edges: Vec<Segment> = self.line_segments().collect();
        is_simple_chain(&edges, self.is_closed())
    }

    /// Maps every control position of the curve through the given transform
    /// and rebuilds the curve in the new coordinate space.
    ///
    /// The result is always backed by a single segment regardless of how many
    /// segments the source curve had. Transform failures propagate unchanged.
    pub fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<Curve, GeometryError> {
        let positions = self
            .positions()
            .map(|p| transform.transform_position(p))
            .collect::<Result<Vec<Position>, _>>()?;
        Curve::from_positions(new_crs, positions)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::transform::IdentityTransform;

    fn crs() -> Crs {
        Crs::local(2)
    }

    fn two_segment_curve() -> Curve {
        let first = LineString::new(vec![
            Position::new_2d(0.0, 0.0),
            Position::new_2d(1.0, 0.0),
        ])
        .expect("valid segment");
        let second = LineString::new(vec![
            Position::new_2d(1.0, 0.0),
            Position::new_2d(1.0, 2.0),
        ])
        .expect("valid segment");
        Curve::new(crs(), vec![first, second]).expect("continuous segments")
    }

    fn square_curve() -> Curve {
        Curve::from_positions(
            crs(),
            vec![
                Position::new_2d(0.0, 0.0),
                Position::new_2d(1.0, 0.0),
                Position::new_2d(1.0, 1.0),
                Position::new_2d(0.0, 1.0),
                Position::new_2d(0.0, 0.0),
            ],
        )
        .expect("valid closed curve")
    }

    #[test]
    fn rejects_empty_and_discontinuous_chains() {
        assert_matches!(
            Curve::new(crs(), vec![]),
            Err(GeometryError::InvalidArgument(_))
        );

        let first = LineString::new(vec![
            Position::new_2d(0.0, 0.0),
            Position::new_2d(1.0, 0.0),
        ])
        .expect("valid segment");
        let disjoint = LineString::new(vec![
            Position::new_2d(2.0, 0.0),
            Position::new_2d(3.0, 0.0),
        ])
        .expect("valid segment");
        assert_matches!(
            Curve::new(crs(), vec![first, disjoint]),
            Err(GeometryError::InvalidArgument(_))
        );
    }

    #[test]
    fn parametrization_accumulates_segment_lengths() {
        let curve = two_segment_curve();
        assert_abs_diff_eq!(curve.start_param(), 0.0);
        assert_abs_diff_eq!(curve.end_param(), 3.0);
        assert_abs_diff_eq!(curve.length(), 3.0);
        assert_abs_diff_eq!(curve.segments()[0].start_param(), 0.0);
        assert_abs_diff_eq!(curve.segments()[0].end_param(), 1.0);
        assert_abs_diff_eq!(curve.segments()[1].start_param(), 1.0);
        assert_abs_diff_eq!(curve.segments()[1].end_param(), 3.0);
    }

    #[test]
    fn boundary_duality() {
        let curve = two_segment_curve();
        let ends = curve.boundary().ends().expect("open curve");
        assert_eq!(ends.start().position(), curve.start_position());
        assert_eq!(ends.end().position(), curve.end_position());
    }

    #[test]
    fn closed_curve_has_empty_boundary() {
        let curve = square_curve();
        assert!(curve.is_closed());
        assert_eq!(curve.boundary(), &CurveBoundary::Closed);
        assert!(curve.boundary().ends().is_none());
    }

    #[test]
    fn equal_boundary_points_are_rejected() {
        let p = Point::new(crs(), Position::new_2d(1.0, 1.0)).expect("dimensions match");
        assert_matches!(
            CurveEnds::new(p.clone(), p),
            Err(GeometryError::InvalidArgument(_))
        );
    }

    #[test]
    fn position_at_crosses_segments() {
        let curve = two_segment_curve();
        assert_eq!(
            curve.position_at(0.5).expect("in range"),
            Position::new_2d(0.5, 0.0)
        );
        assert_eq!(
            curve.position_at(2.0).expect("in range"),
            Position::new_2d(1.0, 1.0)
        );
        assert_matches!(
            curve.position_at(3.5),
            Err(GeometryError::ParamOutOfRange { .. })
        );
        assert_matches!(
            curve.position_at(-0.5),
            Err(GeometryError::ParamOutOfRange { .. })
        );
    }

    #[test]
    fn length_between() {
        let curve = two_segment_curve();
        assert_abs_diff_eq!(
            curve.length_between(0.5, 2.5).expect("in range"),
            2.0
        );
        assert_matches!(
            curve.length_between(-0.1, 1.0),
            Err(GeometryError::ParamOutOfRange { .. })
        );
        assert_matches!(
            curve.length_between(0.0, 3.5),
            Err(GeometryError::ParamOutOfRange { .. })
        );
    }

    #[test]
    fn merge_is_length_additive() {
        let left = Curve::from_positions(
            crs(),
            vec![Position::new_2d(0.0, 0.0), Position::new_2d(1.0, 0.0)],
        )
        .expect("valid curve");
        let right = Curve::from_positions(
            crs(),
            vec![Position::new_2d(1.0, 0.0), Position::new_2d(1.0, 1.0)],
        )
        .expect("valid curve");

        let merged = left.merge(&right).expect("continuous curves");
        assert_abs_diff_eq!(merged.length(), left.length() + right.length());
        assert_eq!(merged.start_position(), left.start_position());
        assert_eq!(merged.end_position(), right.end_position());

        // inputs are untouched by the merge
        assert_abs_diff_eq!(left.end_param(), 1.0);
        assert_abs_diff_eq!(right.segments()[0].start_param(), 0.0);

        assert_matches!(
            right.merge(&left),
            Err(GeometryError::InvalidArgument(_))
        );
    }

    #[test]
    fn split() {
        let curve = two_segment_curve();
        let (first, second) = curve.split(2.0).expect("interior distance");
        assert_abs_diff_eq!(first.length(), 2.0);
        assert_abs_diff_eq!(second.length(), 1.0);
        assert_eq!(first.end_position(), second.start_position());
        assert_eq!(first.end_position(), &Position::new_2d(1.0, 1.0));

        assert_matches!(
            curve.split(0.0),
            Err(GeometryError::ParamOutOfRange { .. })
        );
        assert_matches!(
            curve.split(3.0),
            Err(GeometryError::ParamOutOfRange { .. })
        );
    }

    #[test]
    fn simplicity() {
        assert!(two_segment_curve().is_simple());
        assert!(square_curve().is_simple());

        let crossing = Curve::from_positions(
            crs(),
            vec![
                Position::new_2d(0.0, 0.0),
                Position::new_2d(2.0, 2.0),
                Position::new_2d(2.0, 0.0),
                Position::new_2d(0.0, 2.0),
            ],
        )
        .expect("valid but self-crossing curve");
        assert!(!crossing.is_simple());
    }

    #[test]
    fn transform_identity_preserves_coordinates() {
        let curve = two_segment_curve();
        let transformed = curve
            .transform(crs(), &IdentityTransform)
            .expect("identity cannot fail");

        assert_eq!(
            transformed.positions().cloned().collect::<Vec<_>>(),
            curve.positions().cloned().collect::<Vec<_>>()
        );
        // the rebuilt curve is always single-segment
        assert_eq!(transformed.segments().len(), 1);
        assert_abs_diff_eq!(transformed.length(), curve.length());
    }
}
