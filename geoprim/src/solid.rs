//! 3-dimensional primitives: shells, solid boundaries and solids.

use std::collections::HashMap;

use crate::crs::Crs;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::oriented::OrientedSurface;
use crate::position::Position;
use crate::transform::MathTransform;

/// A closed composite of oriented surfaces, the 2-dimensional analogue of a
/// [`Ring`](crate::ring::Ring).
///
/// Closure is validated at construction: every boundary edge of the member
/// surfaces must be shared by exactly two surface boundaries, so that the
/// composite has no free edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Shell {
    surfaces: Vec<OrientedSurface>,
    envelope: Envelope,
}

impl Shell {
    /// Creates a shell from its member surfaces, validating closure.
    pub fn new(surfaces: Vec<OrientedSurface>) -> Result<Shell, GeometryError> {
        if surfaces.is_empty() {
            return Err(GeometryError::invalid(
                "a shell requires at least one surface",
            ));
        }
        if !edges_pair_up(&surfaces) {
            return Err(GeometryError::invalid("shell is not closed"));
        }

        Ok(Shell::new_unchecked(surfaces))
    }

    /// Creates a shell without validating closure.
    ///
    /// The caller guarantees that the surfaces form a closed composite. The
    /// surface list must not be empty.
    pub fn new_unchecked(surfaces: Vec<OrientedSurface>) -> Shell {
        debug_assert!(!surfaces.is_empty());

        let mut envelope = surfaces[0].envelope().clone();
        for surface in &surfaces[1..] {
            envelope = envelope.merge(surface.envelope());
        }

        Shell { surfaces, envelope }
    }

    /// The member surfaces of the shell.
    pub fn surfaces(&self) -> &[OrientedSurface] {
        &self.surfaces
    }

    /// Bounding envelope over all member surfaces.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Always true by the shell contract.
    pub fn is_cycle(&self) -> bool {
        true
    }

    fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<Shell, GeometryError> {
        let surfaces = self
            .surfaces
            .iter()
            .map(|view| {
                let surface = view.surface().transform(new_crs.clone(), transform)?;
                Ok(OrientedSurface::new(
                    std::sync::Arc::new(surface),
                    view.orientation(),
                ))
            })
            .collect::<Result<Vec<OrientedSurface>, GeometryError>>()?;

        // shared edges transform to identical coordinates, so closure holds
        Ok(Shell::new_unchecked(surfaces))
    }
}

type EdgeKey = (Vec<u64>, Vec<u64>);

fn position_key(position: &Position) -> Vec<u64> {
    position.ordinates().iter().map(|v| v.to_bits()).collect()
}

fn edge_key(a: &Position, b: &Position) -> EdgeKey {
    let ka = position_key(a);
    let kb = position_key(b);
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

/// Counts the undirected boundary edges of the member surfaces; the composite
/// is closed when every edge occurs exactly twice.
fn edges_pair_up(surfaces: &[OrientedSurface]) -> bool {
    let mut counts: HashMap<EdgeKey, usize> = HashMap::new();
    for view in surfaces {
        for ring in view.surface().boundary_rings() {
            let positions = ring.positions();
            for i in 0..positions.len() {
                let next = (i + 1) % positions.len();
                *counts
                    .entry(edge_key(&positions[i], &positions[next]))
                    .or_default() += 1;
            }
        }
    }

    counts.values().all(|count| *count == 2)
}

/// Boundary of a solid: one exterior shell plus zero or more interior shells
/// (cavities).
#[derive(Debug, Clone, PartialEq)]
pub struct SolidBoundary {
    exterior: Shell,
    interiors: Vec<Shell>,
}

impl SolidBoundary {
    /// Creates a solid boundary from its shells.
    pub fn new(exterior: Shell, interiors: Vec<Shell>) -> SolidBoundary {
        SolidBoundary {
            exterior,
            interiors,
        }
    }

    /// The exterior shell.
    pub fn exterior(&self) -> &Shell {
        &self.exterior
    }

    /// The interior shells in stored order.
    pub fn interiors(&self) -> &[Shell] {
        &self.interiors
    }

    /// All shells: the exterior first, then the interiors in stored order.
    pub fn shells(&self) -> impl Iterator<Item = &Shell> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

/// A 3-dimensional primitive bounded by shells of surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    crs: Crs,
    boundary: SolidBoundary,
    envelope: Envelope,
}

impl Solid {
    /// Creates a solid from its boundary.
    ///
    /// The CRS must have at least three dimensions and every member surface
    /// must share it.
    pub fn new(crs: Crs, boundary: SolidBoundary) -> Result<Solid, GeometryError> {
        if crs.dimension() < 3 {
            return Err(GeometryError::MismatchedDimension {
                expected: 3,
                actual: crs.dimension(),
            });
        }

        for shell in boundary.shells() {
            for view in shell.surfaces() {
                if view.surface().crs() != &crs {
                    return Err(GeometryError::MismatchedCrs);
                }
            }
        }

        let mut envelope = boundary.exterior().envelope().clone();
        for shell in boundary.interiors() {
            envelope = envelope.merge(shell.envelope());
        }

        Ok(Solid {
            crs,
            boundary,
            envelope,
        })
    }

    /// Coordinate reference system of the solid.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Boundary of the solid.
    pub fn boundary(&self) -> &SolidBoundary {
        &self.boundary
    }

    /// Bounding envelope over all boundary shells.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Rebuilds the solid in another coordinate space by transforming every
    /// boundary surface.
    pub fn transform(
        &self,
        new_crs: Crs,
        transform: &dyn MathTransform,
    ) -> Result<Solid, GeometryError> {
        let exterior = self.boundary.exterior.transform(new_crs.clone(), transform)?;
        let interiors = self
            .boundary
            .interiors
            .iter()
            .map(|shell| shell.transform(new_crs.clone(), transform))
            .collect::<Result<Vec<Shell>, _>>()?;

        Solid::new(new_crs, SolidBoundary::new(exterior, interiors))
    }
}
