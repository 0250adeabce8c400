//! Coordinate transform service boundary.
//!
//! The kernel consumes transforms, it does not implement projection math. Any
//! failure reported by a transform propagates out of the geometry `transform`
//! methods unchanged.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::position::Position;

/// Error reported by a coordinate transform.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input position has a dimension the transform cannot handle.
    #[error("transform expects {expected}-dimensional input, got {actual}")]
    DimensionMismatch {
        /// Input dimension the transform was built for.
        expected: usize,
        /// Dimension of the position passed in.
        actual: usize,
    },
    /// Any other failure of the external transform service.
    #[error("coordinate transform failed: {0}")]
    Failure(String),
}

/// A function mapping positions from one coordinate space into another.
pub trait MathTransform {
    /// Maps a single position into the target coordinate space.
    fn transform_position(&self, input: &Position) -> Result<Position, TransformError>;
}

/// Transform that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl MathTransform for IdentityTransform {
    fn transform_position(&self, input: &Position) -> Result<Position, TransformError> {
        Ok(input.clone())
    }
}

/// Affine coordinate transform: `x' = M * x + b`.
#[derive(Debug, Clone)]
pub struct AffineTransform {
    matrix: DMatrix<f64>,
    offset: DVector<f64>,
}

impl AffineTransform {
    /// Creates a transform from a square matrix and an offset vector of the
    /// same dimension.
    pub fn new(matrix: DMatrix<f64>, offset: DVector<f64>) -> Self {
        debug_assert_eq!(matrix.nrows(), matrix.ncols());
        debug_assert_eq!(matrix.nrows(), offset.len());
        Self { matrix, offset }
    }

    /// Uniform scaling in the given dimension.
    pub fn scaling(dimension: usize, factor: f64) -> Self {
        Self {
            matrix: DMatrix::identity(dimension, dimension) * factor,
            offset: DVector::zeros(dimension),
        }
    }

    /// Translation by the given offset.
    pub fn translation(offset: Vec<f64>) -> Self {
        let offset = DVector::from_vec(offset);
        Self {
            matrix: DMatrix::identity(offset.len(), offset.len()),
            offset,
        }
    }
}

impl MathTransform for AffineTransform {
    fn transform_position(&self, input: &Position) -> Result<Position, TransformError> {
        if input.dimension() != self.matrix.ncols() {
            return Err(TransformError::DimensionMismatch {
                expected: self.matrix.ncols(),
                actual: input.dimension(),
            });
        }

        let v = DVector::from_column_slice(input.ordinates());
        let out = &self.matrix * v + &self.offset;
        Ok(Position::new(out.iter().copied().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_input() {
        let p = Position::new_2d(3.0, -1.5);
        let out = IdentityTransform
            .transform_position(&p)
            .expect("identity cannot fail");
        assert_eq!(out, p);
    }

    #[test]
    fn affine_scale_and_translate() {
        let t = AffineTransform::scaling(2, 2.0);
        let out = t
            .transform_position(&Position::new_2d(1.0, 2.0))
            .expect("dimensions match");
        assert_eq!(out, Position::new_2d(2.0, 4.0));

        let t = AffineTransform::translation(vec![10.0, 0.0]);
        let out = t
            .transform_position(&Position::new_2d(1.0, 2.0))
            .expect("dimensions match");
        assert_eq!(out, Position::new_2d(11.0, 2.0));
    }

    #[test]
    fn affine_rejects_wrong_dimension() {
        let t = AffineTransform::scaling(2, 2.0);
        let err = t
            .transform_position(&Position::new_3d(1.0, 2.0, 3.0))
            .expect_err("dimension mismatch");
        assert!(matches!(
            err,
            TransformError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}
