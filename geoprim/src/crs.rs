//! Handles to externally defined coordinate reference systems.
//!
//! The kernel never performs CRS lookup or projection math itself; a [`Crs`]
//! only carries the identity and the coordinate dimension of a reference
//! system, which is all the primitives need for consistency checks. Actual
//! coordinate conversion goes through the [`MathTransform`](crate::transform::MathTransform)
//! service.

use serde::{Deserialize, Serialize};

/// Opaque handle to a coordinate reference system.
///
/// Equality compares the authority code and dimension only, ignoring any
/// descriptive metadata the external CRS service may attach to the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs {
    code: CrsCode,
    dimension: usize,
}

/// Authority identifier of a reference system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// A system from the EPSG registry.
    Epsg(u32),
    /// An engineering (local) coordinate system without a registry entry.
    Local,
}

impl Crs {
    /// WGS84 geographic coordinates.
    pub const EPSG4326: Crs = Crs {
        code: CrsCode::Epsg(4326),
        dimension: 2,
    };

    /// Web Mercator.
    pub const EPSG3857: Crs = Crs {
        code: CrsCode::Epsg(3857),
        dimension: 2,
    };

    /// Creates a handle to the EPSG system with the given code and coordinate
    /// dimension.
    pub fn epsg(code: u32, dimension: usize) -> Self {
        Self {
            code: CrsCode::Epsg(code),
            dimension,
        }
    }

    /// Creates a local engineering system of the given coordinate dimension.
    pub fn local(dimension: usize) -> Self {
        Self {
            code: CrsCode::Local,
            dimension,
        }
    }

    /// Authority code of the system.
    pub fn code(&self) -> &CrsCode {
        &self.code
    }

    /// Number of ordinates in a coordinate tuple of this system.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
