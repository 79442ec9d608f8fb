//! Coordinate input normalization
//!
//! Vertex lists reach the engine either as points or as a flat
//! `x1, y1, x2, y2, ...` sequence. Both are normalized here, once, at the
//! API boundary.

use crate::{GeometryError, Point, Result};

/// Vertex input accepted by shape constructors and transforms
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    /// Explicit points
    Points(Vec<Point>),
    /// Alternating x and y values; must have even length
    Flat(Vec<f64>),
}

impl Coordinates {
    /// Number of scalar values once flattened (odd lengths included)
    pub fn scalar_len(&self) -> usize {
        match self {
            Coordinates::Points(points) => points.len() * 2,
            Coordinates::Flat(values) => values.len(),
        }
    }
}

impl From<Vec<Point>> for Coordinates {
    fn from(points: Vec<Point>) -> Self {
        Coordinates::Points(points)
    }
}

impl From<&[Point]> for Coordinates {
    fn from(points: &[Point]) -> Self {
        Coordinates::Points(points.to_vec())
    }
}

impl<const N: usize> From<[Point; N]> for Coordinates {
    fn from(points: [Point; N]) -> Self {
        Coordinates::Points(points.to_vec())
    }
}

impl From<Point> for Coordinates {
    fn from(point: Point) -> Self {
        Coordinates::Points(vec![point])
    }
}

impl From<Vec<(f64, f64)>> for Coordinates {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Coordinates::Points(pairs.into_iter().map(Point::from).collect())
    }
}

impl From<&[(f64, f64)]> for Coordinates {
    fn from(pairs: &[(f64, f64)]) -> Self {
        Coordinates::Points(pairs.iter().copied().map(Point::from).collect())
    }
}

impl<const N: usize> From<[(f64, f64); N]> for Coordinates {
    fn from(pairs: [(f64, f64); N]) -> Self {
        Coordinates::Points(pairs.into_iter().map(Point::from).collect())
    }
}

impl From<Vec<f64>> for Coordinates {
    fn from(values: Vec<f64>) -> Self {
        Coordinates::Flat(values)
    }
}

impl From<&[f64]> for Coordinates {
    fn from(values: &[f64]) -> Self {
        Coordinates::Flat(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Coordinates {
    fn from(values: [f64; N]) -> Self {
        Coordinates::Flat(values.to_vec())
    }
}

/// Flatten coordinates into `x1, y1, x2, y2, ...`.
///
/// Fails if any value is not a finite real number or if a flat sequence
/// has an odd number of values.
pub fn flatten_coordinates(coords: impl Into<Coordinates>) -> Result<Vec<f64>> {
    let flat = match coords.into() {
        Coordinates::Points(points) => points.iter().flat_map(|p| [p.x, p.y]).collect::<Vec<_>>(),
        Coordinates::Flat(values) => {
            if values.len() % 2 != 0 {
                return Err(GeometryError::InvalidCoordinate(format!(
                    "expected x, y pairs but got {} values",
                    values.len()
                )));
            }
            values
        }
    };

    if let Some(bad) = flat.iter().find(|v| !v.is_finite()) {
        return Err(GeometryError::InvalidCoordinate(format!(
            "coordinates must be finite real numbers, got {}",
            bad
        )));
    }
    Ok(flat)
}

/// Normalize coordinates into points
pub fn to_points(coords: impl Into<Coordinates>) -> Result<Vec<Point>> {
    let flat = flatten_coordinates(coords)?;
    Ok(points_from_flat(&flat))
}

/// Pair up an already validated flat list. A trailing odd value is ignored.
pub fn points_from_flat(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1])).collect()
}
