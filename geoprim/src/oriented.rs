//! Oriented views of curves and surfaces.
//!
//! Every 1- and 2-dimensional primitive has exactly two oriented views. The
//! forward view delegates to the canonical primitive unchanged; the reverse
//! view shares the same primitive and inverts every direction-dependent
//! query: start and end swap, evaluation parameters mirror, tangents flip,
//! traversal order reverses. Views are plain values over an `Arc`, so
//! obtaining or reversing a view never copies the geometry.

use std::sync::Arc;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::curve::{Curve, CurveBoundary};
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::position::Position;
use crate::surface::Surface;

/// Direction in which an orientable primitive is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// The primitive's own direction.
    Forward,
    /// The opposite direction.
    Reverse,
}

impl Orientation {
    /// The opposite orientation.
    pub fn reversed(self) -> Orientation {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }

    /// Returns true for [`Orientation::Forward`].
    pub fn is_forward(self) -> bool {
        self == Orientation::Forward
    }
}

/// One of the two oriented views of a curve.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedCurve {
    curve: Arc<Curve>,
    orientation: Orientation,
}

impl OrientedCurve {
    /// Wraps a curve in a view with the given orientation.
    pub fn new(curve: Arc<Curve>, orientation: Orientation) -> OrientedCurve {
        OrientedCurve { curve, orientation }
    }

    /// The forward view of a curve.
    pub fn forward(curve: Arc<Curve>) -> OrientedCurve {
        OrientedCurve::new(curve, Orientation::Forward)
    }

    /// The reverse view of a curve.
    pub fn reverse(curve: Arc<Curve>) -> OrientedCurve {
        OrientedCurve::new(curve, Orientation::Reverse)
    }

    /// The fixed pair of views of a curve: forward first, reverse second.
    pub fn views(curve: Arc<Curve>) -> [OrientedCurve; 2] {
        [
            OrientedCurve::forward(curve.clone()),
            OrientedCurve::reverse(curve),
        ]
    }

    /// The canonical (forward) primitive this view refers to.
    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    /// Orientation of this view.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The same curve traversed in the opposite direction. Reversing twice
    /// yields a view equal to the original.
    pub fn reversed(&self) -> OrientedCurve {
        OrientedCurve {
            curve: self.curve.clone(),
            orientation: self.orientation.reversed(),
        }
    }

    /// First position in traversal order.
    pub fn start_position(&self) -> &Position {
        match self.orientation {
            Orientation::Forward => self.curve.start_position(),
            Orientation::Reverse => self.curve.end_position(),
        }
    }

    /// Last position in traversal order.
    pub fn end_position(&self) -> &Position {
        match self.orientation {
            Orientation::Forward => self.curve.end_position(),
            Orientation::Reverse => self.curve.start_position(),
        }
    }

    /// Arc-length parameter of the traversal start.
    ///
    /// For the reverse view this is the delegate's end parameter; the
    /// parameters of the reverse view run backwards.
    pub fn start_param(&self) -> f64 {
        match self.orientation {
            Orientation::Forward => self.curve.start_param(),
            Orientation::Reverse => self.curve.end_param(),
        }
    }

    /// Arc-length parameter of the traversal end.
    pub fn end_param(&self) -> f64 {
        match self.orientation {
            Orientation::Forward => self.curve.end_param(),
            Orientation::Reverse => self.curve.start_param(),
        }
    }

    /// Total length; the same for both views.
    pub fn length(&self) -> f64 {
        self.curve.length()
    }

    /// Position at the given arc-length distance from the traversal start.
    pub fn position_at(&self, distance: f64) -> Result<Position, GeometryError> {
        match self.orientation {
            Orientation::Forward => self.curve.position_at(distance),
            Orientation::Reverse => self.curve.position_at(self.curve.end_param() - distance),
        }
    }

    /// Unit tangent in the traversal direction at the given arc-length
    /// distance from the traversal start.
    ///
    /// The reverse view negates the delegate tangent at the mirrored
    /// parameter: the reversed parameterization `s(t) = c(end - t)` has
    /// derivative `-c'(end - t)`.
    pub fn tangent_at(&self, distance: f64) -> Result<DVector<f64>, GeometryError> {
        match self.orientation {
            Orientation::Forward => self.curve.tangent_at(distance),
            Orientation::Reverse => Ok(-self
                .curve
                .tangent_at(self.curve.end_param() - distance)?),
        }
    }

    /// Control positions in traversal order.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.curve.positions().cloned().collect();
        if self.orientation == Orientation::Reverse {
            positions.reverse();
        }

        positions
    }

    /// Boundary with endpoints in traversal order.
    pub fn boundary(&self) -> CurveBoundary {
        match (self.orientation, self.curve.boundary()) {
            (_, CurveBoundary::Closed) => CurveBoundary::Closed,
            (Orientation::Forward, boundary) => boundary.clone(),
            (Orientation::Reverse, CurveBoundary::Ends(ends)) => {
                CurveBoundary::Ends(ends.swapped())
            }
        }
    }

    /// Bounding envelope; orientation-independent.
    pub fn envelope(&self) -> &Envelope {
        self.curve.envelope()
    }

    /// Simplicity of the underlying curve; orientation-independent.
    pub fn is_simple(&self) -> bool {
        self.curve.is_simple()
    }
}

/// One of the two oriented views of a surface.
///
/// The reverse view flips the conceptual surface normal (ring winding); all
/// set-theoretic queries delegate unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedSurface {
    surface: Arc<Surface>,
    orientation: Orientation,
}

impl OrientedSurface {
    /// Wraps a surface in a view with the given orientation.
    pub fn new(surface: Arc<Surface>, orientation: Orientation) -> OrientedSurface {
        OrientedSurface {
            surface,
            orientation,
        }
    }

    /// The forward view of a surface.
    pub fn forward(surface: Arc<Surface>) -> OrientedSurface {
        OrientedSurface::new(surface, Orientation::Forward)
    }

    /// The reverse view of a surface.
    pub fn reverse(surface: Arc<Surface>) -> OrientedSurface {
        OrientedSurface::new(surface, Orientation::Reverse)
    }

    /// The fixed pair of views of a surface: forward first, reverse second.
    pub fn views(surface: Arc<Surface>) -> [OrientedSurface; 2] {
        [
            OrientedSurface::forward(surface.clone()),
            OrientedSurface::reverse(surface),
        ]
    }

    /// The canonical (forward) primitive this view refers to.
    pub fn surface(&self) -> &Arc<Surface> {
        &self.surface
    }

    /// Orientation of this view.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The same surface with the opposite normal.
    pub fn reversed(&self) -> OrientedSurface {
        OrientedSurface {
            surface: self.surface.clone(),
            orientation: self.orientation.reversed(),
        }
    }

    /// Bounding envelope; orientation-independent.
    pub fn envelope(&self) -> &Envelope {
        self.surface.envelope()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::crs::Crs;

    fn curve() -> Arc<Curve> {
        Arc::new(
            Curve::from_positions(
                Crs::local(2),
                vec![
                    Position::new_2d(0.0, 0.0),
                    Position::new_2d(2.0, 0.0),
                    Position::new_2d(2.0, 1.0),
                ],
            )
            .expect("valid curve"),
        )
    }

    #[test]
    fn reverse_swaps_ends_and_params() {
        let [forward, reverse] = OrientedCurve::views(curve());

        assert_eq!(forward.start_position(), reverse.end_position());
        assert_eq!(forward.end_position(), reverse.start_position());
        assert_abs_diff_eq!(reverse.start_param(), forward.end_param());
        assert_abs_diff_eq!(reverse.end_param(), forward.start_param());
        assert_abs_diff_eq!(reverse.length(), forward.length());
    }

    #[test]
    fn double_reversal_returns_original() {
        let [forward, reverse] = OrientedCurve::views(curve());
        assert_eq!(reverse.reversed(), forward);
        assert_eq!(reverse.reversed().reversed(), reverse);
    }

    #[test]
    fn reverse_evaluation_is_mirrored() {
        let [forward, reverse] = OrientedCurve::views(curve());
        let length = forward.length();

        for distance in [0.0, 0.5, 1.5, length] {
            assert_eq!(
                reverse.position_at(distance).expect("in range"),
                forward.position_at(length - distance).expect("in range")
            );
        }

        let forward_tangent = forward.tangent_at(0.5).expect("in range");
        let reverse_tangent = reverse.tangent_at(length - 0.5).expect("in range");
        assert_abs_diff_eq!(forward_tangent[0], -reverse_tangent[0]);
        assert_abs_diff_eq!(forward_tangent[1], -reverse_tangent[1]);
    }

    #[test]
    fn reverse_positions_and_boundary() {
        let [forward, reverse] = OrientedCurve::views(curve());

        let mut positions = forward.positions();
        positions.reverse();
        assert_eq!(positions, reverse.positions());

        let forward_ends = forward.boundary();
        let reverse_ends = reverse.boundary();
        let forward_ends = forward_ends.ends().expect("open curve");
        let reverse_ends = reverse_ends.ends().expect("open curve");
        assert_eq!(forward_ends.start(), reverse_ends.end());
        assert_eq!(forward_ends.end(), reverse_ends.start());
    }
}
