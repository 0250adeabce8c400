//! 2-dimensional primitives: surfaces, their boundaries and patches.

use geo::{BooleanOps, Coord, LineString as GeoLineString, Polygon as GeoPolygon};

use crate::crs::Crs;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::position::Position;
use crate::ring::Ring;
use crate::segment::Segment;
use crate::transform::MathTransform;

/// Boundary of a surface: one optional exterior ring plus zero or more
/// interior rings (holes).
///
/// Whether the interior rings stay inside the exterior and avoid each other
/// is a documented invariant of the caller, not validated at construction.
/// [`Surface::is_simple`] checks it on demand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceBoundary {
    exterior: Option<Ring>,
    interiors: Vec<Ring>,
}

impl SurfaceBoundary {
    /// Creates a surface boundary from its rings.
    pub fn new(exterior: Option<Ring>, interiors: Vec<Ring>) -> SurfaceBoundary {
        SurfaceBoundary {
            exterior,
            interiors,
        }
    }

    /// The exterior ring, if any.
    pub fn exterior(&self) -> Option<&Ring> {
        self.exterior.as_ref()
    }

    /// The interior rings in stored order.
    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }

    /// All rings of the boundary: the exterior first, then the interiors in
    /// stored order.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.exterior.iter().chain(self.interiors.iter())
    }

    /// Rebuilds the boundary in another coordinate space, transforming the
    /// exterior ring first, then each interior ring.
    pub fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<SurfaceBoundary, GeometryError> {
        let exterior = self
            .exterior
            .as_ref()
            .map(|ring| ring.transform(new_crs.clone(), transform))
            .transpose()?;
        let interiors = self
            .interiors
            .iter()
            .map(|ring| ring.transform(new_crs.clone(), transform))
            .collect::<Result<Vec<Ring>, _>>()?;

        Ok(SurfaceBoundary::new(exterior, interiors))
    }
}

/// A planar polygonal piece of a surface, described by its own boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePatch {
    boundary: SurfaceBoundary,
}

impl SurfacePatch {
    /// Creates a patch from a boundary. The boundary must have an exterior
    /// ring.
    pub fn new(boundary: SurfaceBoundary) -> Result<SurfacePatch, GeometryError> {
        if boundary.exterior().is_none() {
            return Err(GeometryError::invalid(
                "a surface patch requires an exterior ring",
            ));
        }

        Ok(SurfacePatch { boundary })
    }

    /// Creates a patch bounded by a single exterior ring.
    pub fn from_exterior(exterior: Ring) -> Result<SurfacePatch, GeometryError> {
        SurfacePatch::new(SurfaceBoundary::new(Some(exterior), Vec::new()))
    }

    /// Boundary of the patch.
    pub fn boundary(&self) -> &SurfaceBoundary {
        &self.boundary
    }

    fn exterior(&self) -> &Ring {
        // a patch cannot be built without an exterior
        match self.boundary.exterior() {
            Some(ring) => ring,
            None => unreachable!(),
        }
    }

    /// Bounding envelope of the patch: the envelope of its exterior ring.
    pub fn envelope(&self) -> &Envelope {
        self.exterior().envelope()
    }

    fn to_geo_polygon(&self) -> GeoPolygon<f64> {
        let interiors = self
            .boundary
            .interiors()
            .iter()
            .map(ring_to_geo)
            .collect();
        GeoPolygon::new(ring_to_geo(self.exterior()), interiors)
    }
}

fn ring_to_geo(ring: &Ring) -> GeoLineString<f64> {
    GeoLineString::new(
        ring.positions()
            .iter()
            .map(|p| Coord { x: p.x(), y: p.y() })
            .collect(),
    )
}

fn ring_from_geo(crs: &Crs, line: &GeoLineString<f64>) -> Result<Ring, GeometryError> {
    let mut positions: Vec<Position> = line
        .coords()
        .map(|c| Position::new_2d(c.x, c.y))
        .collect();
    match (positions.first().cloned(), positions.last()) {
        (Some(first), Some(last)) if first != *last => positions.push(first),
        _ => {}
    }

    let curve = crate::curve::Curve::from_positions(crs.clone(), positions)?;
    // union output is topologically valid; skip the O(n^2) simplicity check
    Ok(Ring::new_unchecked(
        crs.clone(),
        vec![crate::oriented::OrientedCurve::forward(std::sync::Arc::new(
            curve,
        ))],
    ))
}

/// A 2-dimensional primitive bounded by a [`SurfaceBoundary`] and decomposed
/// into one or more [`SurfacePatch`]es.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    crs: Crs,
    boundary: SurfaceBoundary,
    patches: Vec<SurfacePatch>,
    envelope: Envelope,
}

impl Surface {
    /// Creates a surface from its patches, deriving the boundary.
    ///
    /// A single patch contributes its boundary directly. Multiple patches are
    /// merged by iterative set-theoretic union; the construction fails if any
    /// intermediate union is not a single connected surface. Unioning more
    /// than one patch is a planar operation and requires a 2-dimensional CRS.
    pub fn from_patches(crs: Crs, patches: Vec<SurfacePatch>) -> Result<Surface, GeometryError> {
        if patches.is_empty() {
            return Err(GeometryError::invalid(
                "a surface requires at least one patch",
            ));
        }

        for patch in &patches {
            if patch.exterior().crs() != &crs {
                return Err(GeometryError::MismatchedCrs);
            }
        }

        let boundary = if patches.len() == 1 {
            patches[0].boundary().clone()
        } else {
            if crs.dimension() != 2 {
                return Err(GeometryError::MismatchedDimension {
                    expected: 2,
                    actual: crs.dimension(),
                });
            }

            let mut merged = patches[0].to_geo_polygon();
            for patch in &patches[1..] {
                let mut union = merged.union(&patch.to_geo_polygon());
                if union.0.len() != 1 {
                    return Err(GeometryError::invalid(
                        "surface patches are not continuous",
                    ));
                }
                merged = union.0.remove(0);
            }

            let exterior = ring_from_geo(&crs, merged.exterior())?;
            let interiors = merged
                .interiors()
                .iter()
                .map(|line| ring_from_geo(&crs, line))
                .collect::<Result<Vec<Ring>, _>>()?;
            SurfaceBoundary::new(Some(exterior), interiors)
        };

        let mut envelope = patches[0].envelope().clone();
        for patch in &patches[1..] {
            envelope = envelope.merge(patch.envelope());
        }

        Ok(Surface {
            crs,
            boundary,
            patches,
            envelope,
        })
    }

    /// Creates a surface from a given boundary, synthesizing exactly one
    /// patch from the boundary's rings. The boundary must have an exterior
    /// ring.
    pub fn from_boundary(crs: Crs, boundary: SurfaceBoundary) -> Result<Surface, GeometryError> {
        let exterior = boundary
            .exterior()
            .ok_or_else(|| GeometryError::invalid("surface boundary has no exterior ring"))?;
        if exterior.crs() != &crs {
            return Err(GeometryError::MismatchedCrs);
        }
        for interior in boundary.interiors() {
            if interior.crs() != &crs {
                return Err(GeometryError::MismatchedCrs);
            }
        }

        let envelope = exterior.envelope().clone();
        let patches = vec![SurfacePatch::new(boundary.clone())?];

        Ok(Surface {
            crs,
            boundary,
            patches,
            envelope,
        })
    }

    /// Coordinate reference system of the surface.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Boundary of the surface.
    pub fn boundary(&self) -> &SurfaceBoundary {
        &self.boundary
    }

    /// The patches the surface is decomposed into.
    pub fn patches(&self) -> &[SurfacePatch] {
        &self.patches
    }

    /// Bounding envelope: the union of the patch envelopes, or the exterior
    /// ring envelope when constructed from a boundary.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// All boundary rings: the exterior first, then the interiors in stored
    /// order.
    pub fn boundary_rings(&self) -> impl Iterator<Item = &Ring> {
        self.boundary.rings()
    }

    /// Returns true if the exterior ring does not self-intersect and no two
    /// boundary rings touch or cross each other.
    pub fn is_simple(&self) -> bool {
        let rings: Vec<&Ring> = self.boundary_rings().collect();

        for ring in &rings {
            if !ring.cycle_is_simple() {
                return false;
            }
        }

        let loops: Vec<Vec<Position>> = rings.iter().map(|r| r.positions()).collect();
        for i in 0..loops.len() {
            for j in (i + 1)..loops.len() {
                if loops_intersect(&loops[i], &loops[j]) {
                    return false;
                }
            }
        }

        true
    }

    /// Area enclosed by the boundary, projected to the first two ordinates:
    /// the exterior area minus the area of the holes.
    pub fn area(&self) -> f64 {
        let exterior = match self.boundary.exterior() {
            Some(ring) => ring.area_signed().abs(),
            None => return 0.0,
        };
        let holes: f64 = self
            .boundary
            .interiors()
            .iter()
            .map(|ring| ring.area_signed().abs())
            .sum();

        exterior - holes
    }

    /// Rebuilds the surface in another coordinate space by transforming each
    /// boundary ring, exterior first.
    pub fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<Surface, GeometryError> {
        let boundary = self.boundary.transform(new_crs.clone(), transform)?;
        Surface::from_boundary(new_crs, boundary)
    }
}

fn loops_intersect(a: &[Position], b: &[Position]) -> bool {
    let edges = |positions: &[Position]| {
        (0..positions.len())
            .map(|i| (i, (i + 1) % positions.len()))
            .collect::<Vec<_>>()
    };

    for (a0, a1) in edges(a) {
        for (b0, b1) in edges(b) {
            if Segment(&a[a0], &a[a1]).intersects(&Segment(&b[b0], &b[b1])) {
                return true;
            }
        }
    }

    false
}
