//! Rings: closed, simple composites of oriented curves.

use std::sync::Arc;

use crate::crs::Crs;
use crate::curve::{Curve, CurveBoundary};
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::oriented::OrientedCurve;
use crate::position::Position;
use crate::segment::{is_simple_chain, Segment};
use crate::transform::MathTransform;

/// A closed composite of oriented curves forming a simple cycle.
///
/// Rings bound surfaces. By definition a ring has an empty boundary, is
/// simple, and is a cycle; [`Ring::new`] enforces this at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    crs: Crs,
    generators: Vec<OrientedCurve>,
    envelope: Envelope,
}

impl Ring {
    /// Creates a ring from its generator curves, validating the ring
    /// invariants: the generators must share the CRS, form a closed and
    /// continuous cycle, and the merged cycle must not self-intersect.
    pub fn new(crs: Crs, generators: Vec<OrientedCurve>) -> Result<Ring, GeometryError> {
        if generators.is_empty() {
            return Err(GeometryError::invalid("a ring requires at least one curve"));
        }

        for generator in &generators {
            if generator.curve().crs() != &crs {
                return Err(GeometryError::MismatchedCrs);
            }
        }

        let last = &generators[generators.len() - 1];
        if generators[0].start_position() != last.end_position() {
            return Err(GeometryError::invalid("ring is not closed"));
        }

        for pair in generators.windows(2) {
            if pair[0].end_position() != pair[1].start_position() {
                return Err(GeometryError::invalid("ring curves are not continuous"));
            }
        }

        let ring = Ring::new_unchecked(crs, generators);
        if !ring.cycle_is_simple() {
            return Err(GeometryError::invalid("ring is not simple"));
        }

        Ok(ring)
    }

    /// Creates a ring without validating the ring invariants.
    ///
    /// The caller guarantees that the generators form a closed, continuous,
    /// simple cycle (e.g. inside a factory pipeline that has already
    /// validated them). The generator list must not be empty.
    pub fn new_unchecked(crs: Crs, generators: Vec<OrientedCurve>) -> Ring {
        debug_assert!(!generators.is_empty());

        let mut envelope = generators[0].envelope().clone();
        for generator in &generators[1..] {
            envelope = envelope.merge(generator.envelope());
        }

        Ring {
            crs,
            generators,
            envelope,
        }
    }

    /// Wraps a single closed curve into a validated ring.
    pub fn from_curve(curve: Curve) -> Result<Ring, GeometryError> {
        let crs = curve.crs().clone();
        Ring::new(crs, vec![OrientedCurve::forward(Arc::new(curve))])
    }

    /// Coordinate reference system of the ring.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// The oriented curves generating the ring, in traversal order.
    pub fn generators(&self) -> &[OrientedCurve] {
        &self.generators
    }

    /// Bounding envelope over all generators.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Boundary of the ring. A ring is a cycle, so its boundary is always
    /// empty.
    pub fn boundary(&self) -> CurveBoundary {
        CurveBoundary::Closed
    }

    /// Always true by the ring contract.
    pub fn is_simple(&self) -> bool {
        true
    }

    /// Always true by the ring contract.
    pub fn is_cycle(&self) -> bool {
        true
    }

    /// Control positions around the ring, first to last, without duplicating
    /// the closing position.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for (i, generator) in self.generators.iter().enumerate() {
            let mut generator_positions = generator.positions();
            positions.extend(generator_positions.drain(usize::from(i > 0)..));
        }

        if positions.len() > 1 && positions.first() == positions.last() {
            positions.pop();
        }

        positions
    }

    /// Signed area of the ring projected to the first two ordinates,
    /// positive for counterclockwise winding.
    pub fn area_signed(&self) -> f64 {
        let positions = self.positions();
        let mut aggregate = 0.0;
        for (i, p) in positions.iter().enumerate() {
            let next = &positions[(i + 1) % positions.len()];
            aggregate += p.x() * next.y() - next.x() * p.y();
        }

        aggregate / 2.0
    }

    /// Tests the merged cycle for self-intersection. Used by [`Ring::new`];
    /// rings built through it are simple by construction.
    pub(crate) fn cycle_is_simple(&self) -> bool {
        let positions = self.positions();
        if positions.len() < 3 {
            return false;
        }

        let mut edges: Vec<Segment> = positions.windows(2).map(|w| Segment(&w[0], &w[1])).collect();
        edges.push(Segment(&positions[positions.len() - 1], &positions[0]));
        is_simple_chain(&edges, true)
    }

    /// Maps every control position of the ring through the given transform
    /// and rebuilds the ring in the new coordinate space.
    ///
    /// The result is always generated by a single merged curve, regardless of
    /// how many generators the source ring had.
    pub fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<Ring, GeometryError> {
        let mut positions = self
            .positions()
            .iter()
            .map(|p| transform.transform_position(p))
            .collect::<Result<Vec<Position>, _>>()?;
        if let Some(first) = positions.first().cloned() {
            positions.push(first);
        }

        // the source ring is valid and the transform maps positions
        // one-to-one, so the rebuilt cycle is not re-validated
        let curve = Curve::from_positions(new_crs.clone(), positions)?;
        Ok(Ring::new_unchecked(
            new_crs,
            vec![OrientedCurve::forward(Arc::new(curve))],
        ))
    }
}
