//! Primitive construction with CRS and validation policy applied
//! consistently.

use std::sync::Arc;

use crate::crs::Crs;
use crate::curve::Curve;
use crate::error::GeometryError;
use crate::line_string::LineString;
use crate::oriented::OrientedCurve;
use crate::point::Point;
use crate::position::Position;
use crate::ring::Ring;
use crate::solid::{Solid, SolidBoundary};
use crate::surface::{Surface, SurfaceBoundary, SurfacePatch};

/// Options recognized by [`PrimitiveFactory`].
///
/// An explicit configuration value; the kernel keeps no process-wide factory
/// state.
#[derive(Debug, Clone)]
pub struct FactoryOptions {
    /// Coordinate reference system assigned to every created primitive.
    pub crs: Crs,
    /// Whether consistency checks (ring closure, continuity, simplicity) run
    /// at construction. Defaults to `true`; switch off only when the inputs
    /// are known valid, e.g. inside a pipeline that has already checked them.
    pub validate: bool,
}

impl FactoryOptions {
    /// Options with validation enabled.
    pub fn new(crs: Crs) -> FactoryOptions {
        FactoryOptions {
            crs,
            validate: true,
        }
    }
}

/// Builds primitives from raw positions and parts, enforcing CRS and
/// dimension consistency.
#[derive(Debug, Clone)]
pub struct PrimitiveFactory {
    options: FactoryOptions,
}

impl PrimitiveFactory {
    /// Creates a factory with the given options.
    pub fn new(options: FactoryOptions) -> PrimitiveFactory {
        PrimitiveFactory { options }
    }

    /// Creates a validating factory for the given CRS.
    pub fn with_crs(crs: Crs) -> PrimitiveFactory {
        PrimitiveFactory::new(FactoryOptions::new(crs))
    }

    /// The CRS assigned to created primitives.
    pub fn crs(&self) -> &Crs {
        &self.options.crs
    }

    fn check_position(&self, position: &Position) -> Result<(), GeometryError> {
        if position.dimension() != self.options.crs.dimension() {
            return Err(GeometryError::MismatchedDimension {
                expected: self.options.crs.dimension(),
                actual: position.dimension(),
            });
        }

        Ok(())
    }

    /// Creates a point from raw ordinates.
    pub fn create_point(&self, ordinates: &[f64]) -> Result<Point, GeometryError> {
        Point::new(self.options.crs.clone(), Position::new(ordinates.to_vec()))
    }

    /// Creates a polyline curve segment from positions.
    pub fn create_line_string(
        &self,
        positions: Vec<Position>,
    ) -> Result<LineString, GeometryError> {
        for position in &positions {
            self.check_position(position)?;
        }

        LineString::new(positions)
    }

    /// Creates a curve from a continuous chain of segments.
    pub fn create_curve(&self, segments: Vec<LineString>) -> Result<Curve, GeometryError> {
        Curve::new(self.options.crs.clone(), segments)
    }

    /// Creates a single-segment curve directly from control positions.
    pub fn create_curve_from_positions(
        &self,
        positions: Vec<Position>,
    ) -> Result<Curve, GeometryError> {
        Curve::from_positions(self.options.crs.clone(), positions)
    }

    /// Creates a ring from curves taken in forward orientation.
    ///
    /// With [`FactoryOptions::validate`] unset the ring invariants are
    /// trusted, not checked.
    pub fn create_ring(&self, curves: Vec<Curve>) -> Result<Ring, GeometryError> {
        let generators: Vec<OrientedCurve> = curves
            .into_iter()
            .map(|curve| OrientedCurve::forward(Arc::new(curve)))
            .collect();
        self.create_ring_from_oriented(generators)
    }

    /// Creates a ring from already-oriented curves.
    pub fn create_ring_from_oriented(
        &self,
        generators: Vec<OrientedCurve>,
    ) -> Result<Ring, GeometryError> {
        if self.options.validate {
            Ring::new(self.options.crs.clone(), generators)
        } else {
            for generator in &generators {
                if generator.curve().crs() != &self.options.crs {
                    return Err(GeometryError::MismatchedCrs);
                }
            }
            Ok(Ring::new_unchecked(self.options.crs.clone(), generators))
        }
    }

    /// Creates a surface boundary from rings created by this factory.
    pub fn create_surface_boundary(
        &self,
        exterior: Ring,
        interiors: Vec<Ring>,
    ) -> Result<SurfaceBoundary, GeometryError> {
        for ring in std::iter::once(&exterior).chain(&interiors) {
            if ring.crs() != &self.options.crs {
                return Err(GeometryError::MismatchedCrs);
            }
        }

        Ok(SurfaceBoundary::new(Some(exterior), interiors))
    }

    /// Creates a surface from patches, deriving its boundary.
    pub fn create_surface(&self, patches: Vec<SurfacePatch>) -> Result<Surface, GeometryError> {
        Surface::from_patches(self.options.crs.clone(), patches)
    }

    /// Creates a surface from a boundary, synthesizing a single patch.
    pub fn create_surface_from_boundary(
        &self,
        boundary: SurfaceBoundary,
    ) -> Result<Surface, GeometryError> {
        Surface::from_boundary(self.options.crs.clone(), boundary)
    }

    /// Creates a solid from its boundary shells.
    pub fn create_solid(&self, boundary: SolidBoundary) -> Result<Solid, GeometryError> {
        Solid::new(self.options.crs.clone(), boundary)
    }
}
