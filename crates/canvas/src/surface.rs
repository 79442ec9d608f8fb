//! Drawing surface abstraction
//!
//! This module defines the `DrawingSurface` trait: the operations a
//! retained-mode canvas must offer for the shape engine to drive it. Every
//! call is keyed by a tag; an item matches a tag when the tag is one of its
//! tags. Queries that read a single item use the first match in creation
//! order, bulk operations apply to every match and are no-ops when nothing
//! matches.

use crate::{CanvasEvent, EventHandler, HandlerId, ItemConfig, ItemId, ItemOptions, Result};
use geometry::BoundingBox;
use std::cell::RefCell;
use std::rc::Rc;

/// Operations a drawing surface provides to the shape engine
pub trait DrawingSurface {
    /// Create a polygon from a flat `x1, y1, x2, y2, ...` list
    fn create_polygon(&mut self, coords: &[f64], tags: &[String]) -> Result<ItemId>;

    /// Merge options into every item carrying `tag`
    fn item_configure(&mut self, tag: &str, options: &ItemOptions) -> Result<()>;

    /// Full configuration of the first item carrying `tag`
    fn item_config(&self, tag: &str) -> Result<ItemConfig>;

    /// Flat coordinates of the first item carrying `tag`
    fn coords(&self, tag: &str) -> Result<Vec<f64>>;

    /// Replace the coordinates of the first item carrying `tag`
    fn set_coords(&mut self, tag: &str, coords: &[f64]) -> Result<()>;

    /// Bounding box of all items carrying `tag`, `None` if there are none
    fn bbox(&self, tag: &str) -> Option<BoundingBox>;

    /// Translate all items carrying `tag`
    fn move_by(&mut self, tag: &str, dx: f64, dy: f64);

    /// Translate all items carrying `tag` so the top-left corner of their
    /// combined bounding box lands on `(x, y)`
    fn move_to(&mut self, tag: &str, x: f64, y: f64);

    /// Scale all items carrying `tag` about `(x0, y0)`
    fn scale(&mut self, tag: &str, x0: f64, y0: f64, fx: f64, fy: f64);

    /// Add `new_tag` to every item carrying `with_tag`
    fn add_tag(&mut self, new_tag: &str, with_tag: &str);

    /// Remove `tag` from every item carrying `with_tag`
    fn remove_tag(&mut self, with_tag: &str, tag: &str);

    /// Tags of the first item carrying `tag`
    fn tags(&self, tag: &str) -> Vec<String>;

    /// Bind a handler for `pattern` on `tag`.
    ///
    /// Unless `append` is set, handlers previously bound for the same tag
    /// and pattern are replaced.
    fn bind(&mut self, tag: &str, pattern: &str, handler: EventHandler, append: bool) -> HandlerId;

    /// Remove one handler, or all handlers for the tag and pattern when `handler` is `None`
    fn unbind(&mut self, tag: &str, pattern: &str, handler: Option<HandlerId>);

    /// Handlers that an event on the first item carrying `tag` would run
    fn handlers(&self, tag: &str, pattern: &str) -> Vec<EventHandler>;

    /// Hold back redraws until the matching `resume_redraw`
    fn suspend_redraw(&mut self) {}

    fn resume_redraw(&mut self) {}
}

/// Shared, single-threaded handle to a drawing surface
pub type SurfaceRef = Rc<RefCell<dyn DrawingSurface>>;

/// Suspends redraws on a surface for as long as it is alive
pub struct RedrawGuard {
    surface: SurfaceRef,
}

impl RedrawGuard {
    pub fn new(surface: &SurfaceRef) -> Self {
        surface.borrow_mut().suspend_redraw();
        Self {
            surface: Rc::clone(surface),
        }
    }
}

impl Drop for RedrawGuard {
    fn drop(&mut self) {
        if let Ok(mut surface) = self.surface.try_borrow_mut() {
            surface.resume_redraw();
        }
    }
}

/// Deliver an event to the handlers bound for the first item carrying `tag`.
///
/// Handlers run after the surface borrow is released, so they may call
/// back into the surface. Returns the number of handlers run.
pub fn dispatch(surface: &SurfaceRef, tag: &str, event: &CanvasEvent) -> usize {
    let handlers = surface.borrow().handlers(tag, &event.pattern);
    for handler in &handlers {
        handler(event);
    }
    handlers.len()
}
