//! Geometric primitive kernel in the style of ISO 19107.
//!
//! The crate provides coordinate positions, curves, rings, surfaces and
//! solids, each tagged with a coordinate reference system, together with
//! orientation views, boundary types and a configurable [`PrimitiveFactory`].

pub mod crs;
pub use crs::*;

pub mod position;
pub use position::*;

pub mod envelope;
pub use envelope::*;

pub mod transform;
pub use transform::*;

pub mod error;
pub use error::*;

pub mod line_string;
pub use line_string::*;

pub mod point;
pub use point::*;

pub mod curve;
pub use curve::*;

pub mod oriented;
pub use oriented::*;

pub mod ring;
pub use ring::*;

pub mod surface;
pub use surface::*;

pub mod solid;
pub use solid::*;

pub mod primitive;
pub use primitive::*;

pub mod factory;
pub use factory::*;

pub mod orient;
pub mod segment;
