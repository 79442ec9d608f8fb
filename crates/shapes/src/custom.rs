//! Custom shapes

use crate::{Result, Shape, ShapeContext, ShapeCore, ShapeError, ShapeKind};
use canvas::ItemOptions;
use geometry::{ellipse_arc_points_with, ArcSampling, Point};

/// Outline of the corner shape for a given leg length and arc radius.
///
/// The arc is centered on the diagonal at `(cx, cx)` and runs from the end
/// of the vertical leg to the end of the horizontal one.
fn concave_outline(sampling: &ArcSampling, side: f64, radius: f64) -> Result<Vec<Point>> {
    let cx = 0.5 * (side + (2.0 * radius * radius - side * side).sqrt());
    let delta = (cx / radius).clamp(-1.0, 1.0).acos().to_degrees();
    let arc = ellipse_arc_points_with(
        sampling,
        radius,
        radius,
        Point::new(cx, cx),
        180.0 + delta,
        270.0 - delta,
        None,
    )?;

    let mut vertices = Vec::with_capacity(arc.len() + 3);
    vertices.push(Point::ORIGIN);
    vertices.push(Point::new(0.0, side));
    vertices.extend(arc);
    vertices.push(Point::new(side, 0.0));
    Ok(vertices)
}

/// A right-angled corner at the origin with legs of length `side` along
/// both axes, closed by a circular arc bulging toward the corner.
///
/// `k` sets the arc radius to `side·√k`; `k = 1` gives a quarter circle
/// and larger values flatten the arc toward a straight hypotenuse.
#[derive(Debug)]
pub struct ConcaveCircularHypotenuse {
    core: ShapeCore,
    side: f64,
    radius: f64,
}

impl ConcaveCircularHypotenuse {
    pub fn new(ctx: &ShapeContext, side: f64, k: f64, options: ItemOptions) -> Result<Self> {
        if !(side.is_finite() && side > 0.0) {
            return Err(ShapeError::InvalidGeometry(format!(
                "side length must be positive, got {}",
                side
            )));
        }
        if !(k.is_finite() && k >= 1.0) {
            return Err(ShapeError::InvalidGeometry(format!(
                "curvature parameter k must be at least 1, got {}",
                k
            )));
        }
        let radius = side * k.sqrt();
        let vertices = concave_outline(&ctx.settings().arc_sampling, side, radius)?;
        let core = ShapeCore::attach(ctx, ShapeKind::ConcaveCircularHypotenuse, &vertices, options)?;
        Ok(Self { core, side, radius })
    }

    /// Leg length
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Arc radius, `side·√k`
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Curvature parameter recovered from the radius
    pub fn k(&self) -> f64 {
        (self.radius / self.side).powi(2)
    }
}

impl Shape for ConcaveCircularHypotenuse {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::ConcaveCircularHypotenuse
    }

    fn instance_factory(&self) -> Result<Self> {
        Self::new(self.core.context(), self.side, self.k(), ItemOptions::default())
    }

    fn clone_boxed(&self) -> Result<Box<dyn Shape>> {
        Ok(Box::new(self.clone_shape()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quarter_circle_outline() {
        let vertices = concave_outline(&ArcSampling::default(), 100.0, 100.0).unwrap();
        // Arc centered at (100, 100), starting at the end of the vertical leg
        assert_relative_eq!(vertices[2].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(vertices[2].y, 100.0, epsilon = 1e-9);
        for p in &vertices[2..vertices.len() - 1] {
            assert_relative_eq!(p.distance(Point::new(100.0, 100.0)), 100.0, epsilon = 1e-9);
        }
        assert_eq!(vertices[0], Point::ORIGIN);
        assert_eq!(*vertices.last().unwrap(), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_flatter_arc_ends_on_the_legs() {
        let side = 50.0;
        let radius = side * 3.0_f64.sqrt();
        let vertices = concave_outline(&ArcSampling::default(), side, radius).unwrap();
        let first_arc = vertices[2];
        // The arc starts on the vertical leg's end point
        assert_relative_eq!(first_arc.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(first_arc.y, side, epsilon = 1e-9);
    }
}
