//! The sum of all primitive kinds handled by the kernel.

use crate::crs::Crs;
use crate::curve::Curve;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::point::Point;
use crate::ring::Ring;
use crate::solid::Solid;
use crate::surface::Surface;
use crate::transform::MathTransform;

/// A geometric primitive of any dimension.
///
/// This is the dispatch point for code that handles primitives generically;
/// the variants own the concrete primitive values.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// 0-dimensional primitive.
    Point(Point),
    /// 1-dimensional primitive.
    Curve(Curve),
    /// Closed 1-dimensional composite.
    Ring(Ring),
    /// 2-dimensional primitive.
    Surface(Surface),
    /// 3-dimensional primitive.
    Solid(Solid),
}

impl Primitive {
    /// Topological dimension of the primitive.
    pub fn dimension(&self) -> usize {
        match self {
            Primitive::Point(_) => 0,
            Primitive::Curve(_) | Primitive::Ring(_) => 1,
            Primitive::Surface(_) => 2,
            Primitive::Solid(_) => 3,
        }
    }

    /// Coordinate reference system of the primitive.
    pub fn crs(&self) -> &Crs {
        match self {
            Primitive::Point(v) => v.crs(),
            Primitive::Curve(v) => v.crs(),
            Primitive::Ring(v) => v.crs(),
            Primitive::Surface(v) => v.crs(),
            Primitive::Solid(v) => v.crs(),
        }
    }

    /// Bounding envelope of the primitive.
    pub fn envelope(&self) -> Envelope {
        match self {
            Primitive::Point(v) => v.envelope(),
            Primitive::Curve(v) => v.envelope().clone(),
            Primitive::Ring(v) => v.envelope().clone(),
            Primitive::Surface(v) => v.envelope().clone(),
            Primitive::Solid(v) => v.envelope().clone(),
        }
    }

    /// Returns true if the primitive does not intersect itself.
    pub fn is_simple(&self) -> bool {
        match self {
            Primitive::Point(_) => true,
            Primitive::Curve(v) => v.is_simple(),
            Primitive::Ring(v) => v.is_simple(),
            Primitive::Surface(v) => v.is_simple(),
            // shell closure is validated at construction
            Primitive::Solid(_) => true,
        }
    }

    /// Rebuilds the primitive in another coordinate space.
    pub fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<Primitive, GeometryError> {
        Ok(match self {
            Primitive::Point(v) => Primitive::Point(v.transform(new_crs, transform)?),
            Primitive::Curve(v) => Primitive::Curve(v.transform(new_crs, transform)?),
            Primitive::Ring(v) => Primitive::Ring(v.transform(new_crs, transform)?),
            Primitive::Surface(v) => Primitive::Surface(v.transform(new_crs, transform)?),
            Primitive::Solid(v) => Primitive::Solid(v.transform(new_crs, transform)?),
        })
    }
}

impl From<Point> for Primitive {
    fn from(value: Point) -> Self {
        Primitive::Point(value)
    }
}

impl From<Curve> for Primitive {
    fn from(value: Curve) -> Self {
        Primitive::Curve(value)
    }
}

impl From<Ring> for Primitive {
    fn from(value: Ring) -> Self {
        Primitive::Ring(value)
    }
}

impl From<Surface> for Primitive {
    fn from(value: Surface) -> Self {
        Primitive::Surface(value)
    }
}

impl From<Solid> for Primitive {
    fn from(value: Solid) -> Self {
        Primitive::Solid(value)
    }
}
