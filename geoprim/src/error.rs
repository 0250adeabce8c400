//! Error types used by the crate.

use thiserror::Error;

use crate::transform::TransformError;

/// Errors raised by geometry construction and evaluation.
///
/// All of these are synchronous, construction- or call-time failures. A failed
/// constructor never leaks a partially built primitive.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The input does not describe a valid geometry.
    #[error("invalid geometry: {0}")]
    InvalidArgument(String),

    /// A coordinate tuple has a different dimension than the coordinate
    /// system requires.
    #[error("mismatched coordinate dimension: expected {expected}, got {actual}")]
    MismatchedDimension {
        /// Dimension required by the coordinate reference system.
        expected: usize,
        /// Dimension of the offending coordinate tuple.
        actual: usize,
    },

    /// Two geometries that must share a coordinate reference system do not.
    #[error("mismatched coordinate reference systems")]
    MismatchedCrs,

    /// A curve parameter lies outside of the parametrization range.
    #[error("parameter {param} is outside of parametrization range {start}..{end}")]
    ParamOutOfRange {
        /// The offending parameter value.
        param: f64,
        /// Start of the valid range.
        start: f64,
        /// End of the valid range.
        end: f64,
    },

    /// A coordinate transform failed. The error from the transform service is
    /// propagated unchanged.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl GeometryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GeometryError::InvalidArgument(message.into())
    }
}
