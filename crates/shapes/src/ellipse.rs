//! Ellipses and circles drawn as sampled polygons

use crate::{Result, Shape, ShapeContext, ShapeCore, ShapeError, ShapeKind};
use canvas::ItemOptions;
use geometry::{ellipse_arc_points_with, Point};

/// Sample a full turn of the ellipse with the context's arc density
fn outline(ctx: &ShapeContext, a: f64, b: f64, center: Point) -> Result<Vec<Point>> {
    if !(a.is_finite() && b.is_finite()) {
        return Err(ShapeError::InvalidGeometry(format!(
            "semi-axes must be finite, got {} and {}",
            a, b
        )));
    }
    let arc = ellipse_arc_points_with(&ctx.settings().arc_sampling, a, b, center, 0.0, 360.0, None)?;
    Ok(arc.collect())
}

/// Live center of a shape, or `fallback` if the surface cannot report one
fn live_center(shape: &dyn Shape, fallback: Point) -> Point {
    shape.bounding_box_center().unwrap_or(fallback)
}

/// An axis-aligned ellipse
#[derive(Debug)]
pub struct Ellipse {
    core: ShapeCore,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    initial_center: Point,
}

impl Ellipse {
    /// Ellipse with semi-axis `a` along x and `b` along y
    pub fn new(ctx: &ShapeContext, a: f64, b: f64, center: Point, options: ItemOptions) -> Result<Self> {
        let vertices = outline(ctx, a, b, center)?;
        let core = ShapeCore::attach(ctx, ShapeKind::Ellipse, &vertices, options)?;
        Ok(Self {
            core,
            semi_major_axis: a,
            semi_minor_axis: b,
            initial_center: center,
        })
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    /// Center of the current bounding box; follows moves
    pub fn center_point(&self) -> Point {
        live_center(self, self.initial_center)
    }
}

impl Shape for Ellipse {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn instance_factory(&self) -> Result<Self> {
        Self::new(
            self.core.context(),
            self.semi_major_axis,
            self.semi_minor_axis,
            self.center_point(),
            ItemOptions::default(),
        )
    }

    fn clone_boxed(&self) -> Result<Box<dyn Shape>> {
        Ok(Box::new(self.clone_shape()?))
    }
}

/// A circle: an ellipse with equal semi-axes and its own identity
#[derive(Debug)]
pub struct Circle {
    core: ShapeCore,
    radius: f64,
    initial_center: Point,
}

impl Circle {
    pub fn new(ctx: &ShapeContext, radius: f64, center: Point, options: ItemOptions) -> Result<Self> {
        let vertices = outline(ctx, radius, radius, center)?;
        let core = ShapeCore::attach(ctx, ShapeKind::Circle, &vertices, options)?;
        Ok(Self {
            core,
            radius,
            initial_center: center,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center_point(&self) -> Point {
        live_center(self, self.initial_center)
    }
}

impl Shape for Circle {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn instance_factory(&self) -> Result<Self> {
        Self::new(self.core.context(), self.radius, self.center_point(), ItemOptions::default())
    }

    fn clone_boxed(&self) -> Result<Box<dyn Shape>> {
        Ok(Box::new(self.clone_shape()?))
    }
}
