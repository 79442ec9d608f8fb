//! Polygon vertex helpers
//!
//! Centroids, angular ordering and the tolerance model used by the shape
//! classification predicates.

use crate::Point;

/// Relative tolerance used when comparing lengths and slopes
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Arithmetic mean of the x and y coordinates.
///
/// An empty slice has its centroid at the origin.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Order vertices by their angle around the centroid so that connecting
/// them in sequence draws a boundary without crossing edges.
///
/// The angle is `atan2(x - cx, y - cy)`. The sort is stable, so duplicate
/// points keep their input order.
pub fn sort_for_plotting(points: &[Point]) -> Vec<Point> {
    let c = centroid(points);
    let mut keyed: Vec<(f64, Point)> = points
        .iter()
        .map(|p| ((p.x - c.x).atan2(p.y - c.y), *p))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Edge lengths of the polygon drawn through the angularly sorted vertices,
/// including the closing edge from the last vertex back to the first.
pub fn side_lengths(points: &[Point]) -> Vec<f64> {
    let sorted = sort_for_plotting(points);
    let n = sorted.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| sorted[i].distance(sorted[(i + 1) % n]))
        .collect()
}

/// Relative closeness with no absolute floor: `|a - b| <= tol * max(|a|, |b|)`.
pub fn is_close(a: f64, b: f64, relative_tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    (a - b).abs() <= relative_tolerance * a.abs().max(b.abs())
}

/// True if every value is close to the first one.
///
/// Comparing against the first value is enough: closeness is treated as an
/// equivalence under this tolerance model.
pub fn all_equal(values: &[f64], relative_tolerance: f64) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| is_close(*first, *v, relative_tolerance)),
        None => true,
    }
}

/// True if segment `a1 -> a2` is parallel to segment `b1 -> b2`.
///
/// Uses the cross product of the direction vectors rather than a slope
/// ratio, so vertical segments compare correctly.
pub fn segments_parallel(a1: Point, a2: Point, b1: Point, b2: Point, relative_tolerance: f64) -> bool {
    let (ux, uy) = (a2.x - a1.x, a2.y - a1.y);
    let (vx, vy) = (b2.x - b1.x, b2.y - b1.y);
    let cross = ux * vy - uy * vx;
    let scale = ux.hypot(uy) * vx.hypot(vy);
    if scale == 0.0 {
        return false;
    }
    cross.abs() <= relative_tolerance * scale
}

/// Shoelace signed area of the polygon traced in the given order
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let (p, q) = (points[i], points[(i + 1) % n]);
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice / 2.0
}
