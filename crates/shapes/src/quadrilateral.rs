//! Quadrilaterals and their classified subtypes
//!
//! Each subtype checks its defining property once, on the vertices given
//! to the constructor, before anything is drawn. Later transforms are not
//! re-checked: a rectangle scaled unevenly stays a `Rectangle`.

use crate::{Result, Shape, ShapeContext, ShapeCore, ShapeError, ShapeKind};
use canvas::ItemOptions;
use geometry::{all_equal, centroid, segments_parallel, side_lengths, sort_for_plotting, to_points, Coordinates, Point};

/// Check the input has exactly eight values, then normalize it
fn four_vertices(kind: ShapeKind, coords: Coordinates) -> Result<Vec<Point>> {
    check_arity(kind, &coords, 4)?;
    to_points(coords).map_err(ShapeError::from)
}

/// Arity is checked on the flattened length so that odd-length flat input
/// is reported as a wrong vertex count
pub(crate) fn check_arity(kind: ShapeKind, coords: &Coordinates, expected: usize) -> Result<()> {
    let scalars = coords.scalar_len();
    if scalars != expected * 2 {
        return Err(ShapeError::InvalidShape {
            kind: kind.to_string(),
            expected,
            found: scalars / 2,
        });
    }
    Ok(())
}

/// Vertices in plotting order, or `None` if there are not exactly four
fn sorted_quad(vertices: &[Point]) -> Option<Vec<Point>> {
    (vertices.len() == 4).then(|| sort_for_plotting(vertices))
}

/// Two pairs of adjacent sides are equal
pub fn is_kite(vertices: &[Point], tol: f64) -> bool {
    if vertices.len() != 4 {
        return false;
    }
    let s = side_lengths(vertices);
    (all_equal(&[s[0], s[1]], tol) && all_equal(&[s[2], s[3]], tol))
        || (all_equal(&[s[1], s[2]], tol) && all_equal(&[s[3], s[0]], tol))
}

/// At least one pair of opposite sides is parallel
pub fn is_trapezoid(vertices: &[Point], tol: f64) -> bool {
    let Some(p) = sorted_quad(vertices) else {
        return false;
    };
    segments_parallel(p[0], p[1], p[2], p[3], tol) || segments_parallel(p[1], p[2], p[3], p[0], tol)
}

/// A pair of opposite sides is both parallel and equal in length
pub fn is_parallelogram(vertices: &[Point], tol: f64) -> bool {
    let Some(p) = sorted_quad(vertices) else {
        return false;
    };
    let s = side_lengths(vertices);
    (segments_parallel(p[0], p[1], p[2], p[3], tol) && all_equal(&[s[0], s[2]], tol))
        || (segments_parallel(p[1], p[2], p[3], p[0], tol) && all_equal(&[s[1], s[3]], tol))
}

/// All four sides are equal
pub fn is_rhombus(vertices: &[Point], tol: f64) -> bool {
    vertices.len() == 4 && all_equal(&side_lengths(vertices), tol)
}

/// All vertices lie at the same distance from their centroid
pub fn is_rectangle(vertices: &[Point], tol: f64) -> bool {
    if vertices.len() != 4 {
        return false;
    }
    let c = centroid(vertices);
    let distances: Vec<f64> = vertices.iter().map(|v| v.distance(c)).collect();
    all_equal(&distances, tol)
}

/// A rectangle with all sides equal
pub fn is_square(vertices: &[Point], tol: f64) -> bool {
    is_rectangle(vertices, tol) && is_rhombus(vertices, tol)
}

/// Corners of an axis-aligned rectangle with its top-left corner at `(left, top)`
fn axis_aligned(a: f64, b: f64, left: f64, top: f64) -> Result<[Point; 4]> {
    if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
        return Err(ShapeError::InvalidGeometry(format!(
            "side lengths must be positive, got {} and {}",
            a, b
        )));
    }
    Ok([
        Point::new(left, top),
        Point::new(left + a, top),
        Point::new(left + a, top + b),
        Point::new(left, top + b),
    ])
}

/// A general four-sided polygon
#[derive(Debug)]
pub struct Quadrilateral {
    core: ShapeCore,
}

impl Quadrilateral {
    pub fn new(ctx: &ShapeContext, coords: impl Into<Coordinates>, options: ItemOptions) -> Result<Self> {
        let vertices = four_vertices(ShapeKind::Quadrilateral, coords.into())?;
        let core = ShapeCore::attach(ctx, ShapeKind::Quadrilateral, &sort_for_plotting(&vertices), options)?;
        Ok(Self { core })
    }
}

impl Shape for Quadrilateral {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Quadrilateral
    }

    fn instance_factory(&self) -> Result<Self> {
        Self::new(self.core.context(), self.vertices()?, ItemOptions::default())
    }

    fn clone_boxed(&self) -> Result<Box<dyn Shape>> {
        Ok(Box::new(self.clone_shape()?))
    }
}

/// Declares a quadrilateral subtype guarded by a classification predicate
macro_rules! classified_quadrilateral {
    ($(#[$meta:meta])* $name:ident, $predicate:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            core: ShapeCore,
        }

        impl $name {
            /// Fails with the subtype's classification error if the
            /// vertices do not qualify; nothing is drawn in that case.
            pub fn new(ctx: &ShapeContext, coords: impl Into<Coordinates>, options: ItemOptions) -> Result<Self> {
                let vertices = four_vertices(ShapeKind::$name, coords.into())?;
                if !$predicate(&vertices, ctx.settings().relative_tolerance) {
                    tracing::debug!(
                        target: "shapes::shape",
                        kind = ShapeKind::$name.name(),
                        ?vertices,
                        "classification rejected"
                    );
                    return Err(ShapeError::$error);
                }
                let core = ShapeCore::attach(ctx, ShapeKind::$name, &sort_for_plotting(&vertices), options)?;
                Ok(Self { core })
            }
        }

        impl Shape for $name {
            fn core(&self) -> &ShapeCore {
                &self.core
            }

            fn kind(&self) -> ShapeKind {
                ShapeKind::$name
            }

            fn instance_factory(&self) -> Result<Self> {
                Self::new(self.core.context(), self.vertices()?, ItemOptions::default())
            }

            fn clone_boxed(&self) -> Result<Box<dyn Shape>> {
                Ok(Box::new(self.clone_shape()?))
            }
        }
    };
}

classified_quadrilateral!(
    /// Quadrilateral with two pairs of equal adjacent sides
    Kite, is_kite, NotAKite
);
classified_quadrilateral!(
    /// Quadrilateral with at least one pair of parallel sides
    Trapezoid, is_trapezoid, NotATrapezoid
);
classified_quadrilateral!(
    /// Quadrilateral with a pair of opposite sides parallel and equal
    Parallelogram, is_parallelogram, NotAParallelogram
);
classified_quadrilateral!(
    /// Quadrilateral with four equal sides
    Rhombus, is_rhombus, NotARhombus
);
classified_quadrilateral!(
    /// Quadrilateral whose vertices are equidistant from their centroid
    Rectangle, is_rectangle, NotARectangle
);
classified_quadrilateral!(
    /// Rectangle with four equal sides
    Square, is_square, NotASquare
);

impl Rectangle {
    /// Axis-aligned rectangle: side `a` along x, side `b` along y, top-left
    /// corner at `(left, top)`
    pub fn from_sides(
        ctx: &ShapeContext,
        a: f64,
        b: f64,
        left: f64,
        top: f64,
        options: ItemOptions,
    ) -> Result<Self> {
        Self::new(ctx, axis_aligned(a, b, left, top)?, options)
    }
}

impl Square {
    /// Axis-aligned square with its top-left corner at `(left, top)`
    pub fn from_side(ctx: &ShapeContext, side: f64, left: f64, top: f64, options: ItemOptions) -> Result<Self> {
        Self::new(ctx, axis_aligned(side, side, left, top)?, options)
    }
}
