//! Shape groups
//!
//! A group is a set of shapes sharing one extra tag on the drawing surface.
//! Translation and scaling address that tag in a single surface call, so
//! the members move as one; rotation and reflection need per-vertex math
//! and run on each member in turn.

use crate::{Result, Shape, ShapeContext, ShapeError};
use canvas::{EventHandler, HandlerId, RedrawGuard, SurfaceRef};
use geometry::{Angle, BoundingBox, Coordinates, Point};
use std::fmt;
use std::rc::Rc;

pub struct Group {
    ctx: ShapeContext,
    id_tag: String,
    members: Vec<Rc<dyn Shape>>,
}

impl Group {
    pub fn new<I>(ctx: &ShapeContext, shapes: I) -> Self
    where
        I: IntoIterator<Item = Rc<dyn Shape>>,
    {
        let mut group = Self {
            ctx: ctx.clone(),
            id_tag: ctx.next_id("Group"),
            members: Vec::new(),
        };
        group.add_graphics(shapes);
        group
    }

    pub fn id_tag(&self) -> &str {
        &self.id_tag
    }

    /// Add shapes to the group. Shapes already in it are skipped.
    pub fn add_graphics<I>(&mut self, shapes: I)
    where
        I: IntoIterator<Item = Rc<dyn Shape>>,
    {
        for shape in shapes {
            if self.contains(shape.as_ref()) {
                continue;
            }
            if let Ok(surface) = self.surface() {
                if !Rc::ptr_eq(surface, shape.core().surface()) {
                    tracing::warn!(target: "shapes::group", group = %self.id_tag, member = %shape.id_tag(), "shape is on another surface, not added");
                    continue;
                }
            }
            shape.core().join_group(&self.id_tag);
            tracing::trace!(target: "shapes::group", group = %self.id_tag, member = %shape.id_tag(), "member added");
            self.members.push(shape);
        }
    }

    /// Remove shapes from the group. Shapes not in it are ignored.
    pub fn remove_graphics<I>(&mut self, shapes: I)
    where
        I: IntoIterator<Item = Rc<dyn Shape>>,
    {
        for shape in shapes {
            let Some(pos) = self.members.iter().position(|m| m.id_tag() == shape.id_tag()) else {
                continue;
            };
            let member = self.members.remove(pos);
            member.core().leave_group(&self.id_tag);
            tracing::trace!(target: "shapes::group", group = %self.id_tag, member = %member.id_tag(), "member removed");
        }
    }

    pub fn contains(&self, shape: &dyn Shape) -> bool {
        self.members.iter().any(|m| m.id_tag() == shape.id_tag())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rc<dyn Shape>> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Rc<dyn Shape>] {
        &self.members
    }

    /// The surface the members are drawn on, taken from the first member
    fn surface(&self) -> Result<&SurfaceRef> {
        self.members
            .first()
            .map(|m| m.core().surface())
            .ok_or_else(|| ShapeError::EmptyGroup(self.id_tag.clone()))
    }

    /// Union of the members' bounding boxes
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        self.surface()?
            .borrow()
            .bbox(&self.id_tag)
            .ok_or_else(|| ShapeError::EmptyGroup(self.id_tag.clone()))
    }

    pub fn bounding_box_center(&self) -> Result<Point> {
        Ok(self.bounding_box()?.center())
    }

    pub fn move_by(&self, dx: f64, dy: f64) -> Result<()> {
        self.surface()?.borrow_mut().move_by(&self.id_tag, dx, dy);
        Ok(())
    }

    /// Move so the top-left corner of the group's bounding box lands on `(x, y)`
    pub fn move_to(&self, x: f64, y: f64) -> Result<()> {
        self.surface()?.borrow_mut().move_to(&self.id_tag, x, y);
        Ok(())
    }

    pub fn scale(&self, ref_x: f64, ref_y: f64, fx: f64, fy: f64) -> Result<()> {
        self.surface()?
            .borrow_mut()
            .scale(&self.id_tag, ref_x, ref_y, fx, fy);
        Ok(())
    }

    /// Rotate every member about a common center
    pub fn rotate(&self, angle: Angle, center: Point) -> Result<()> {
        let Ok(surface) = self.surface() else {
            return Ok(());
        };
        let _redraw = RedrawGuard::new(surface);
        for member in &self.members {
            member.rotate(angle, center)?;
        }
        tracing::trace!(target: "shapes::group", group = %self.id_tag, degrees = angle.to_degrees(), "group rotated");
        Ok(())
    }

    /// Reflect every member; see [`Shape::reflect`]
    pub fn reflect(&self, about: Coordinates) -> Result<()> {
        let Ok(surface) = self.surface() else {
            return Ok(());
        };
        let _redraw = RedrawGuard::new(surface);
        for member in &self.members {
            member.reflect(about.clone())?;
        }
        tracing::trace!(target: "shapes::group", group = %self.id_tag, "group reflected");
        Ok(())
    }

    /// Bind a handler that fires for events on any member
    pub fn bind(&self, pattern: &str, handler: EventHandler, append: bool) -> Result<HandlerId> {
        Ok(self
            .surface()?
            .borrow_mut()
            .bind(&self.id_tag, pattern, handler, append))
    }

    pub fn unbind(&self, pattern: &str, handler: Option<HandlerId>) -> Result<()> {
        self.surface()?
            .borrow_mut()
            .unbind(&self.id_tag, pattern, handler);
        Ok(())
    }

    /// A new group holding a clone of every member
    pub fn clone_group(&self) -> Result<Group> {
        let copies = self
            .members
            .iter()
            .map(|m| m.clone_boxed().map(Rc::<dyn Shape>::from))
            .collect::<Result<Vec<_>>>()?;
        let copy = Group::new(&self.ctx, copies);
        tracing::debug!(target: "shapes::group", source = %self.id_tag, copy = %copy.id_tag, members = copy.len(), "group cloned");
        Ok(copy)
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a Rc<dyn Shape>;
    type IntoIter = std::slice::Iter<'a, Rc<dyn Shape>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<&str> = self.members.iter().map(|m| m.id_tag()).collect();
        f.debug_struct("Group")
            .field("id_tag", &self.id_tag)
            .field("members", &members)
            .finish()
    }
}
