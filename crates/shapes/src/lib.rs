//! Shapes - Polygon shapes over a retained-mode drawing surface
//!
//! Every shape is a single polygon primitive on a `DrawingSurface`,
//! addressed by a unique identity tag. Constructors validate their
//! parameters, generate the outline and attach it; transforms read the
//! vertices back, compute new ones and write them in one call.
//!
//! Provided shapes:
//! - Quadrilateral and its classified subtypes (kite, trapezoid,
//!   parallelogram, rhombus, rectangle, square)
//! - Triangle
//! - Ellipse and circle, sampled from an elliptic arc
//! - ConcaveCircularHypotenuse, a right-angled corner with a concave arc
//! - Group, a tag-based collection transformed as one

mod error;
mod ids;
mod settings;
mod context;
mod shape;
mod quadrilateral;
mod triangle;
mod ellipse;
mod custom;
mod group;

pub use error::*;
pub use ids::*;
pub use settings::*;
pub use context::*;
pub use shape::*;
pub use quadrilateral::*;
pub use triangle::*;
pub use ellipse::*;
pub use custom::*;
pub use group::*;
