//! Shape base: the attached polygon and the operations every shape shares
//!
//! A concrete shape validates its parameters, generates its outline and
//! attaches it to the drawing surface through `ShapeCore::attach`. From
//! then on the surface owns the vertices; every transform reads them back,
//! computes the new outline and writes it in one call.

use crate::{Result, ShapeContext, ShapeError};
use canvas::{EventHandler, HandlerId, ItemConfig, ItemOptions, SurfaceRef};
use geometry::{flatten_coordinates, points_from_flat, to_points, Angle, BoundingBox, Coordinates, Point};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// The concrete variety of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Quadrilateral,
    Kite,
    Trapezoid,
    Parallelogram,
    Rhombus,
    Rectangle,
    Square,
    Triangle,
    Ellipse,
    Circle,
    ConcaveCircularHypotenuse,
}

impl ShapeKind {
    /// Name used as the identity tag prefix
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Quadrilateral => "Quadrilateral",
            ShapeKind::Kite => "Kite",
            ShapeKind::Trapezoid => "Trapezoid",
            ShapeKind::Parallelogram => "Parallelogram",
            ShapeKind::Rhombus => "Rhombus",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Circle => "Circle",
            ShapeKind::ConcaveCircularHypotenuse => "ConcaveCircularHypotenuse",
        }
    }

    pub fn is_quadrilateral(&self) -> bool {
        matches!(
            self,
            ShapeKind::Quadrilateral
                | ShapeKind::Kite
                | ShapeKind::Trapezoid
                | ShapeKind::Parallelogram
                | ShapeKind::Rhombus
                | ShapeKind::Rectangle
                | ShapeKind::Square
        )
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a polygon attached to a drawing surface
pub struct ShapeCore {
    ctx: ShapeContext,
    id_tag: String,
    arity: usize,
    /// Identity tags of the groups this shape currently belongs to
    memberships: RefCell<Vec<String>>,
}

impl ShapeCore {
    /// Create the polygon on the surface and apply the default style, then
    /// the caller's options. Callers validate before attaching, so a failed
    /// constructor never leaves a primitive behind.
    pub(crate) fn attach(
        ctx: &ShapeContext,
        kind: ShapeKind,
        vertices: &[Point],
        options: ItemOptions,
    ) -> Result<Self> {
        let flat = flatten_coordinates(vertices)?;
        let id_tag = ctx.next_id(kind.name());
        ctx.surface()
            .borrow_mut()
            .create_polygon(&flat, std::slice::from_ref(&id_tag))?;

        let core = Self {
            ctx: ctx.clone(),
            id_tag,
            arity: vertices.len(),
            memberships: RefCell::new(Vec::new()),
        };
        core.apply_options(ctx.settings().default_style.to_options())?;
        core.apply_options(options)?;

        tracing::debug!(
            target: "shapes::shape",
            id_tag = %core.id_tag,
            kind = kind.name(),
            vertices = core.arity,
            "shape attached"
        );
        Ok(core)
    }

    pub fn id_tag(&self) -> &str {
        &self.id_tag
    }

    pub fn context(&self) -> &ShapeContext {
        &self.ctx
    }

    pub fn surface(&self) -> &SurfaceRef {
        self.ctx.surface()
    }

    /// Number of vertices the outline always has
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Identity tags of the groups containing this shape
    pub fn memberships(&self) -> Vec<String> {
        self.memberships.borrow().clone()
    }

    pub(crate) fn join_group(&self, group_tag: &str) {
        self.surface().borrow_mut().add_tag(group_tag, &self.id_tag);
        let mut memberships = self.memberships.borrow_mut();
        if !memberships.iter().any(|t| t == group_tag) {
            memberships.push(group_tag.to_string());
        }
    }

    pub(crate) fn leave_group(&self, group_tag: &str) {
        self.surface().borrow_mut().remove_tag(&self.id_tag, group_tag);
        self.memberships.borrow_mut().retain(|t| t != group_tag);
    }

    /// Merge options into the surface configuration. A replacement tag list
    /// always keeps the identity tag and the group memberships.
    pub(crate) fn apply_options(&self, mut options: ItemOptions) -> Result<()> {
        if let Some(tags) = options.tags.as_mut() {
            for own in self.memberships.borrow().iter().chain(std::iter::once(&self.id_tag)) {
                if !tags.contains(own) {
                    tags.push(own.clone());
                }
            }
        }
        self.surface()
            .borrow_mut()
            .item_configure(&self.id_tag, &options)?;
        Ok(())
    }

    fn write_vertices(&self, vertices: impl IntoIterator<Item = Point>) -> Result<()> {
        let flat: Vec<f64> = vertices.into_iter().flat_map(|p| [p.x, p.y]).collect();
        self.surface().borrow_mut().set_coords(&self.id_tag, &flat)?;
        Ok(())
    }
}

impl fmt::Debug for ShapeCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeCore")
            .field("id_tag", &self.id_tag)
            .field("arity", &self.arity)
            .field("memberships", &self.memberships.borrow())
            .finish()
    }
}

/// Reflect `p` across the infinite line through `p1` and `p2`
fn reflect_across(p: Complex64, p1: Complex64, p2: Complex64) -> Complex64 {
    let d = p2 - p1;
    (p - p1).conj() * d / d.conj() + p1
}

/// Behavior shared by every polygon shape.
///
/// Implementors supply their core handle, their kind and an instance
/// factory; everything else is provided.
pub trait Shape: fmt::Debug {
    fn core(&self) -> &ShapeCore;

    fn kind(&self) -> ShapeKind;

    /// A fresh shape of the same type built from this one's parameters,
    /// with default configuration
    fn instance_factory(&self) -> Result<Self>
    where
        Self: Sized;

    /// `clone_shape` for trait objects
    fn clone_boxed(&self) -> Result<Box<dyn Shape>>;

    fn id_tag(&self) -> &str {
        self.core().id_tag()
    }

    /// A copy with identical configuration and vertices but its own
    /// identity. The original's identity tag and group memberships are not
    /// carried over.
    fn clone_shape(&self) -> Result<Self>
    where
        Self: Sized,
    {
        let copy = self.instance_factory()?;
        let source = self.core();

        let mut config = self.all_config()?;
        let memberships = source.memberships();
        config
            .tags
            .retain(|t| t != source.id_tag() && !memberships.contains(t));
        copy.configure(config.to_options())?;
        copy.set_coordinates(Coordinates::Flat(self.coordinates()?))?;

        tracing::debug!(
            target: "shapes::shape",
            source = %source.id_tag(),
            copy = %copy.id_tag(),
            "shape cloned"
        );
        Ok(copy)
    }

    /// Merge display options into the shape's configuration
    fn configure(&self, options: ItemOptions) -> Result<()> {
        self.core().apply_options(options)
    }

    /// Current value of one option, `None` if the surface does not know it
    fn config_value(&self, option: &str) -> Result<Option<String>> {
        Ok(self.all_config()?.get(option))
    }

    fn all_config(&self) -> Result<ItemConfig> {
        Ok(self.core().surface().borrow().item_config(self.id_tag())?)
    }

    /// Vertices as `x1, y1, x2, y2, ...`
    fn coordinates(&self) -> Result<Vec<f64>> {
        Ok(self.core().surface().borrow().coords(self.id_tag())?)
    }

    fn vertices(&self) -> Result<Vec<Point>> {
        Ok(points_from_flat(&self.coordinates()?))
    }

    /// Replace the vertices. The vertex count must stay the same.
    fn set_coordinates(&self, coords: Coordinates) -> Result<()> {
        let vertices = to_points(coords)?;
        let core = self.core();
        if vertices.len() != core.arity() {
            return Err(ShapeError::InvalidShape {
                kind: self.kind().to_string(),
                expected: core.arity(),
                found: vertices.len(),
            });
        }
        core.write_vertices(vertices)
    }

    fn tags(&self) -> Vec<String> {
        self.core().surface().borrow().tags(self.id_tag())
    }

    fn add_tag(&self, tag: &str) {
        self.core().surface().borrow_mut().add_tag(tag, self.id_tag());
    }

    /// Remove a tag. The identity tag cannot be removed.
    fn remove_tag(&self, tag: &str) {
        if tag != self.id_tag() {
            self.core().surface().borrow_mut().remove_tag(self.id_tag(), tag);
        }
    }

    fn bounding_box(&self) -> Result<BoundingBox> {
        self.core()
            .surface()
            .borrow()
            .bbox(self.id_tag())
            .ok_or_else(|| canvas::SurfaceError::UnknownTag(self.id_tag().to_string()).into())
    }

    fn bounding_box_center(&self) -> Result<Point> {
        Ok(self.bounding_box()?.center())
    }

    fn move_by(&self, dx: f64, dy: f64) {
        self.core().surface().borrow_mut().move_by(self.id_tag(), dx, dy);
    }

    /// Move so that the top-left corner of the bounding box lands on `(x, y)`
    fn move_to(&self, x: f64, y: f64) {
        self.core().surface().borrow_mut().move_to(self.id_tag(), x, y);
    }

    /// Scale every vertex's offset from `(ref_x, ref_y)` by `fx` and `fy`.
    ///
    /// Unequal factors can break a quadrilateral's classification; this is
    /// not checked.
    fn scale(&self, ref_x: f64, ref_y: f64, fx: f64, fy: f64) {
        self.core()
            .surface()
            .borrow_mut()
            .scale(self.id_tag(), ref_x, ref_y, fx, fy);
    }

    /// Rotate every vertex about `center`: `p' = c + e^{iθ}(p - c)`
    fn rotate(&self, angle: Angle, center: Point) -> Result<()> {
        let turn = Complex64::new(0.0, angle.to_radians()).exp();
        let c = center.to_complex();
        let rotated = self
            .vertices()?
            .into_iter()
            .map(|p| Point::from(turn * (p.to_complex() - c) + c));
        self.core().write_vertices(rotated)?;

        tracing::trace!(
            target: "shapes::shape",
            id_tag = %self.id_tag(),
            degrees = angle.to_degrees(),
            "rotated"
        );
        Ok(())
    }

    /// Point reflection for one point, line reflection for two
    fn reflect(&self, about: Coordinates) -> Result<()> {
        let points = to_points(about).map_err(|e| {
            ShapeError::InvalidArgument(format!("reflection needs one or two points: {}", e))
        })?;
        match points.as_slice() {
            [center] => self.reflect_point(*center),
            [p1, p2] => self.reflect_across_line(*p1, *p2),
            other => Err(ShapeError::InvalidArgument(format!(
                "reflection needs one or two points, got {}",
                other.len()
            ))),
        }
    }

    /// Reflect through a point, i.e. rotate by 180° about it
    fn reflect_point(&self, center: Point) -> Result<()> {
        self.rotate(Angle::Degrees(180.0), center)
    }

    /// Reflect across the line through `p1` and `p2`
    fn reflect_across_line(&self, p1: Point, p2: Point) -> Result<()> {
        if p1 == p2 {
            return Err(ShapeError::InvalidArgument(format!(
                "reflection axis needs two distinct points, got ({}, {}) twice",
                p1.x, p1.y
            )));
        }
        let (c1, c2) = (p1.to_complex(), p2.to_complex());
        let reflected = self
            .vertices()?
            .into_iter()
            .map(|p| Point::from(reflect_across(p.to_complex(), c1, c2)));
        self.core().write_vertices(reflected)?;

        tracing::trace!(target: "shapes::shape", id_tag = %self.id_tag(), "reflected across line");
        Ok(())
    }

    /// Bind an event handler to this shape; see `DrawingSurface::bind`
    fn bind(&self, pattern: &str, handler: EventHandler, append: bool) -> HandlerId {
        self.core()
            .surface()
            .borrow_mut()
            .bind(self.id_tag(), pattern, handler, append)
    }

    fn unbind(&self, pattern: &str, handler: Option<HandlerId>) {
        self.core()
            .surface()
            .borrow_mut()
            .unbind(self.id_tag(), pattern, handler);
    }
}
