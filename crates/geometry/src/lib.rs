//! Geometry - Plane geometry helpers for polygon shapes
//!
//! This crate holds the pure functions the shape engine is built on:
//! coordinate normalization, centroids, angular vertex ordering,
//! tolerance-based equality, side lengths and elliptic arc sampling.

mod error;
mod point;
mod coords;
mod polygon;
mod arc;

pub use error::*;
pub use point::*;
pub use coords::*;
pub use polygon::*;
pub use arc::*;
