//! Polyline curve segments.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::position::Position;
use crate::segment::Segment;

/// A curve segment interpolated linearly between its control positions.
///
/// This is the only curve interpolation the kernel supports. A line string is
/// parameterized by arc length; its `[start_param, end_param]` interval is
/// assigned by the curve that owns it, so that the parametrization of the
/// whole curve is continuous across segments. A free-standing line string
/// starts at parameter 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    positions: Vec<Position>,
    start_param: f64,
    end_param: f64,
}

impl LineString {
    /// Creates a line string from its control positions.
    ///
    /// Fails if fewer than two positions are given, if the positions do not
    /// all have the same dimension, or if the total length is zero.
    pub fn new(positions: Vec<Position>) -> Result<LineString, GeometryError> {
        if positions.len() < 2 {
            return Err(GeometryError::invalid(
                "a line string requires at least two positions",
            ));
        }

        let dimension = positions[0].dimension();
        for p in &positions {
            if p.dimension() != dimension {
                return Err(GeometryError::MismatchedDimension {
                    expected: dimension,
                    actual: p.dimension(),
                });
            }
        }

        let mut line_string = LineString {
            positions,
            start_param: 0.0,
            end_param: 0.0,
        };
        line_string.end_param = line_string.length();

        if line_string.end_param == 0.0 {
            return Err(GeometryError::invalid(
                "a line string must have a non-zero length",
            ));
        }

        Ok(line_string)
    }

    /// Control positions in traversal order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// First control position.
    pub fn start_position(&self) -> &Position {
        &self.positions[0]
    }

    /// Last control position.
    pub fn end_position(&self) -> &Position {
        &self.positions[self.positions.len() - 1]
    }

    /// Coordinate dimension of the control positions.
    pub fn dimension(&self) -> usize {
        self.positions[0].dimension()
    }

    /// Arc-length parameter at which this segment starts within its owning
    /// curve.
    pub fn start_param(&self) -> f64 {
        self.start_param
    }

    /// Arc-length parameter at which this segment ends within its owning
    /// curve.
    pub fn end_param(&self) -> f64 {
        self.end_param
    }

    /// Assigns the parameter interval. Called by the owning curve while the
    /// curve parametrization is accumulated.
    pub(crate) fn set_start_param(&mut self, start: f64) {
        let length = self.length();
        self.start_param = start;
        self.end_param = start + length;
    }

    /// Sum of the Euclidean lengths of the straight edges.
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Bounding envelope of the control positions.
    pub fn envelope(&self) -> Envelope {
        let mut envelope = Envelope::from_position(&self.positions[0]);
        for p in &self.positions[1..] {
            envelope.expand(p);
        }

        envelope
    }

    /// Iterates over the straight edges of the line string.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.positions.windows(2).map(|w| Segment(&w[0], &w[1]))
    }

    /// Position at the given arc-length parameter.
    ///
    /// The parameter is interpreted in the owning curve's parametrization,
    /// i.e. it must lie within `[start_param, end_param]`.
    pub fn position_at(&self, param: f64) -> Result<Position, GeometryError> {
        if param < self.start_param || param > self.end_param {
            return Err(GeometryError::ParamOutOfRange {
                param,
                start: self.start_param,
                end: self.end_param,
            });
        }

        let mut remaining = param - self.start_param;
        for segment in self.segments() {
            let length = segment.length();
            if remaining <= length && length > 0.0 {
                return Ok(segment.position_at(remaining / length));
            }
            remaining -= length;
        }

        // Accumulated float error can leave a tiny remainder behind the last
        // edge.
        Ok(self.end_position().clone())
    }

    /// Unit tangent direction at the given arc-length parameter.
    pub fn tangent_at(&self, param: f64) -> Result<DVector<f64>, GeometryError> {
        if param < self.start_param || param > self.end_param {
            return Err(GeometryError::ParamOutOfRange {
                param,
                start: self.start_param,
                end: self.end_param,
            });
        }

        let mut remaining = param - self.start_param;
        let mut last = None;
        for segment in self.segments() {
            let length = segment.length();
            if length > 0.0 {
                if remaining <= length {
                    return Ok(segment.0.direction_to(segment.1) / length);
                }
                last = Some(segment);
            }
            remaining -= length;
        }

        match last {
            Some(segment) => Ok(segment.0.direction_to(segment.1) / segment.length()),
            None => Err(GeometryError::invalid(
                "tangent of a degenerate line string is undefined",
            )),
        }
    }

    /// The same line string traversed in the opposite direction, starting at
    /// parameter 0.
    pub fn reversed(&self) -> LineString {
        let mut positions = self.positions.clone();
        positions.reverse();
        let length = self.end_param - self.start_param;
        LineString {
            positions,
            start_param: 0.0,
            end_param: length,
        }
    }
}
