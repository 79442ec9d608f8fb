//! Elliptic arc sampling
//!
//! Ellipses, circles and curved edges are drawn as polygons whose vertices
//! are sampled from the parametric form `x = a·cos θ + cx`, `y = b·sin θ + cy`.

use crate::{GeometryError, Point, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on the sample count chosen by [`ArcSampling::point_count`].
/// An explicit count passed by the caller is not capped.
pub const MAX_DEFAULT_ARC_POINTS: usize = 100_000;

/// Controls how many vertices an arc gets when the caller does not say.
///
/// A full turn of an arc with semi-major axis `a` gets
/// `points_per_unit * a + base_points` samples, scaled down linearly for
/// partial arcs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcSampling {
    pub points_per_unit: f64,
    pub base_points: f64,
}

impl Default for ArcSampling {
    fn default() -> Self {
        Self {
            points_per_unit: 800.0 / 1000.0,
            base_points: 64.0,
        }
    }
}

impl ArcSampling {
    /// Sample count for an arc of the given semi-major axis and span in
    /// degrees, at most [`MAX_DEFAULT_ARC_POINTS`]
    pub fn point_count(&self, semi_major_axis: f64, start_deg: f64, stop_deg: f64) -> usize {
        let full_turn = self.points_per_unit * semi_major_axis + self.base_points;
        let share = (stop_deg - start_deg) / 360.0;
        (full_turn * share)
            .round()
            .clamp(0.0, MAX_DEFAULT_ARC_POINTS as f64) as usize
    }
}

/// Lazily generated points of an elliptic arc.
///
/// The start angle is included, the stop angle is not, so a full 360° arc
/// yields a closed loop without repeating its first vertex.
#[derive(Debug, Clone)]
pub struct EllipseArc {
    semi_major_axis: f64,
    semi_minor_axis: f64,
    center: Point,
    start_deg: f64,
    step_deg: f64,
    index: usize,
    count: usize,
}

impl Iterator for EllipseArc {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index >= self.count {
            return None;
        }
        let theta = (self.start_deg + self.step_deg * self.index as f64).to_radians();
        self.index += 1;
        Some(Point::new(
            self.semi_major_axis * theta.cos() + self.center.x,
            self.semi_minor_axis * theta.sin() + self.center.y,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for EllipseArc {}

/// Sample an elliptic arc between two angles given in degrees.
///
/// With `number_of_points` left as `None` the count comes from
/// [`ArcSampling::default`].
pub fn ellipse_arc_points(
    semi_major_axis: f64,
    semi_minor_axis: f64,
    center: Point,
    start_deg: f64,
    stop_deg: f64,
    number_of_points: Option<usize>,
) -> Result<EllipseArc> {
    ellipse_arc_points_with(
        &ArcSampling::default(),
        semi_major_axis,
        semi_minor_axis,
        center,
        start_deg,
        stop_deg,
        number_of_points,
    )
}

/// Same as [`ellipse_arc_points`] with an explicit sampling density
pub fn ellipse_arc_points_with(
    sampling: &ArcSampling,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    center: Point,
    start_deg: f64,
    stop_deg: f64,
    number_of_points: Option<usize>,
) -> Result<EllipseArc> {
    if semi_major_axis < 0.0 || semi_minor_axis < 0.0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "semi-axes must be non-negative, got {} and {}",
            semi_major_axis, semi_minor_axis
        )));
    }
    if stop_deg < start_deg {
        return Err(GeometryError::InvalidGeometry(format!(
            "stop angle {} is smaller than start angle {}",
            stop_deg, start_deg
        )));
    }
    let count = number_of_points
        .unwrap_or_else(|| sampling.point_count(semi_major_axis, start_deg, stop_deg));
    let step_deg = if count == 0 {
        0.0
    } else {
        (stop_deg - start_deg) / count as f64
    };

    Ok(EllipseArc {
        semi_major_axis,
        semi_minor_axis,
        center,
        start_deg,
        step_deg,
        index: 0,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_point_count() {
        let sampling = ArcSampling::default();
        assert_eq!(sampling.point_count(100.0, 0.0, 360.0), 144);
        assert_eq!(sampling.point_count(0.0, 0.0, 360.0), 64);
        assert_eq!(sampling.point_count(100.0, 0.0, 180.0), 72);
    }

    #[test]
    fn test_default_point_count_is_capped() {
        let sampling = ArcSampling::default();
        assert_eq!(sampling.point_count(1e15, 0.0, 360.0), MAX_DEFAULT_ARC_POINTS);
        assert_eq!(sampling.point_count(100.0, 0.0, 1e12), MAX_DEFAULT_ARC_POINTS);

        let arc = ellipse_arc_points(1e15, 1e15, Point::ORIGIN, 0.0, 360.0, None).unwrap();
        assert_eq!(arc.len(), MAX_DEFAULT_ARC_POINTS);
    }

    #[test]
    fn test_first_point_and_length() {
        let arc: Vec<Point> = ellipse_arc_points(100.0, 50.0, Point::new(10.0, 20.0), 0.0, 360.0, None)
            .unwrap()
            .collect();
        assert_eq!(arc.len(), 144);
        assert_relative_eq!(arc[0].x, 110.0);
        assert_relative_eq!(arc[0].y, 20.0);
        // Quarter turn lands on the minor axis
        assert_relative_eq!(arc[36].x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(arc[36].y, 70.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exact_size() {
        let arc = ellipse_arc_points(10.0, 10.0, Point::ORIGIN, 90.0, 180.0, Some(7)).unwrap();
        assert_eq!(arc.len(), 7);
    }

    #[test]
    fn test_zero_points_is_empty() {
        let mut arc = ellipse_arc_points(10.0, 10.0, Point::ORIGIN, 45.0, 45.0, None).unwrap();
        assert!(arc.next().is_none());
    }

    #[test]
    fn test_negative_axis_rejected() {
        let err = ellipse_arc_points(-1.0, 5.0, Point::ORIGIN, 0.0, 360.0, None).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidGeometry(_)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(ellipse_arc_points(1.0, 1.0, Point::ORIGIN, 90.0, 10.0, None).is_err());
    }

    #[test]
    fn test_full_turn_closes_as_step_shrinks() {
        let gap = |n: usize| {
            let arc: Vec<Point> = ellipse_arc_points(100.0, 50.0, Point::ORIGIN, 0.0, 360.0, Some(n))
                .unwrap()
                .collect();
            arc[0].distance(*arc.last().unwrap())
        };
        let coarse = gap(144);
        let fine = gap(1440);
        assert!(fine < coarse);
        // The closing gap is one step of the parametric angle
        assert!(coarse < std::f64::consts::TAU * 100.0 / 144.0);
        assert!(fine < std::f64::consts::TAU * 100.0 / 1440.0);
    }

    #[test]
    fn test_arc_is_restartable_by_cloning() {
        let arc = ellipse_arc_points(5.0, 5.0, Point::ORIGIN, 0.0, 90.0, Some(4)).unwrap();
        let first: Vec<Point> = arc.clone().collect();
        let second: Vec<Point> = arc.collect();
        assert_eq!(first, second);
    }
}
