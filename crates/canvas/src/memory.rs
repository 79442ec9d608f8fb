//! In-memory drawing surface.
//!
//! `MemoryCanvas` keeps every primitive in a plain vector and implements
//! `DrawingSurface` without any windowing system. It's intended for tests,
//! for headless composition of drawings, and as a reference for how a real
//! canvas backend is expected to behave.
//!
//! # Behavior
//!
//! - Items are kept in creation order; single-item queries use the first match
//! - Bounding boxes are exact, with no padding for outline width
//! - A numeric tag also addresses the item with that id
//! - Every mutation counts as one redraw unless redraws are suspended, in
//!   which case the outermost resume counts a single redraw

use crate::{
    DrawingSurface, EventHandler, HandlerId, ItemConfig, ItemId, ItemOptions, Result,
    SurfaceError,
};
use geometry::{points_from_flat, BoundingBox};
use serde::Serialize;
use std::fmt;

/// One polygon primitive
#[derive(Debug, Clone)]
struct CanvasItem {
    id: ItemId,
    coords: Vec<f64>,
    config: ItemConfig,
}

impl CanvasItem {
    fn matches(&self, tag: &str) -> bool {
        self.config.tags.iter().any(|t| t == tag) || tag.parse::<u64>().ok() == Some(self.id.0)
    }

    fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(points_from_flat(&self.coords))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for xy in self.coords.chunks_exact_mut(2) {
            xy[0] += dx;
            xy[1] += dy;
        }
    }
}

struct Binding {
    tag: String,
    pattern: String,
    id: HandlerId,
    handler: EventHandler,
}

/// Serializable view of one item, as returned by [`MemoryCanvas::snapshot`]
#[derive(Debug, Clone, Serialize)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub coords: Vec<f64>,
    pub config: ItemConfig,
}

/// Drawing surface held entirely in memory
#[derive(Default)]
pub struct MemoryCanvas {
    items: Vec<CanvasItem>,
    next_item: u64,
    bindings: Vec<Binding>,
    next_handler: u64,
    suspend_depth: u32,
    changed_while_suspended: bool,
    redraws: u64,
}

impl MemoryCanvas {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of primitives on the canvas
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Ids of every item carrying `tag`
    pub fn find_withtag(&self, tag: &str) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.matches(tag))
            .map(|item| item.id)
            .collect()
    }

    /// How many times the canvas would have been redrawn so far
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// True while at least one redraw suspension is active
    pub fn is_suspended(&self) -> bool {
        self.suspend_depth > 0
    }

    /// Every item with its coordinates and configuration
    pub fn snapshot(&self) -> Vec<ItemSnapshot> {
        self.items
            .iter()
            .map(|item| ItemSnapshot {
                id: item.id,
                coords: item.coords.clone(),
                config: item.config.clone(),
            })
            .collect()
    }

    /// The snapshot rendered as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    fn first(&self, tag: &str) -> Result<&CanvasItem> {
        self.items
            .iter()
            .find(|item| item.matches(tag))
            .ok_or_else(|| SurfaceError::UnknownTag(tag.to_string()))
    }

    fn first_mut(&mut self, tag: &str) -> Result<&mut CanvasItem> {
        self.items
            .iter_mut()
            .find(|item| item.matches(tag))
            .ok_or_else(|| SurfaceError::UnknownTag(tag.to_string()))
    }

    fn matching_mut<'a>(&'a mut self, tag: &'a str) -> impl Iterator<Item = &'a mut CanvasItem> + 'a {
        self.items.iter_mut().filter(move |item| item.matches(tag))
    }

    fn touched(&mut self) {
        if self.suspend_depth > 0 {
            self.changed_while_suspended = true;
        } else {
            self.redraws += 1;
        }
    }
}

fn check_coords(coords: &[f64]) -> Result<()> {
    if coords.len() % 2 != 0 {
        return Err(SurfaceError::InvalidCoordinates(format!(
            "expected an even number of values, got {}",
            coords.len()
        )));
    }
    if coords.iter().any(|v| !v.is_finite()) {
        return Err(SurfaceError::InvalidCoordinates(
            "coordinates must be finite".to_string(),
        ));
    }
    Ok(())
}

impl DrawingSurface for MemoryCanvas {
    fn create_polygon(&mut self, coords: &[f64], tags: &[String]) -> Result<ItemId> {
        check_coords(coords)?;
        self.next_item += 1;
        let id = ItemId(self.next_item);
        let mut config = ItemConfig::default();
        config.apply(&ItemOptions::new().with_tags(tags.iter().cloned()));
        self.items.push(CanvasItem {
            id,
            coords: coords.to_vec(),
            config,
        });
        tracing::trace!(
            target: "canvas::memory",
            item = id.0,
            vertices = coords.len() / 2,
            "polygon created"
        );
        self.touched();
        Ok(id)
    }

    fn item_configure(&mut self, tag: &str, options: &ItemOptions) -> Result<()> {
        let mut found = false;
        for item in self.matching_mut(tag) {
            item.config.apply(options);
            found = true;
        }
        if !found {
            return Err(SurfaceError::UnknownTag(tag.to_string()));
        }
        self.touched();
        Ok(())
    }

    fn item_config(&self, tag: &str) -> Result<ItemConfig> {
        Ok(self.first(tag)?.config.clone())
    }

    fn coords(&self, tag: &str) -> Result<Vec<f64>> {
        Ok(self.first(tag)?.coords.clone())
    }

    fn set_coords(&mut self, tag: &str, coords: &[f64]) -> Result<()> {
        check_coords(coords)?;
        self.first_mut(tag)?.coords = coords.to_vec();
        self.touched();
        Ok(())
    }

    fn bbox(&self, tag: &str) -> Option<BoundingBox> {
        self.items
            .iter()
            .filter(|item| item.matches(tag))
            .filter_map(CanvasItem::bbox)
            .reduce(|a, b| a.union(&b))
    }

    fn move_by(&mut self, tag: &str, dx: f64, dy: f64) {
        let mut moved = false;
        for item in self.matching_mut(tag) {
            item.translate(dx, dy);
            moved = true;
        }
        if moved {
            self.touched();
        }
    }

    fn move_to(&mut self, tag: &str, x: f64, y: f64) {
        if let Some(bbox) = self.bbox(tag) {
            self.move_by(tag, x - bbox.x1, y - bbox.y1);
        }
    }

    fn scale(&mut self, tag: &str, x0: f64, y0: f64, fx: f64, fy: f64) {
        let mut scaled = false;
        for item in self.matching_mut(tag) {
            for xy in item.coords.chunks_exact_mut(2) {
                xy[0] = x0 + (xy[0] - x0) * fx;
                xy[1] = y0 + (xy[1] - y0) * fy;
            }
            scaled = true;
        }
        if scaled {
            self.touched();
        }
    }

    fn add_tag(&mut self, new_tag: &str, with_tag: &str) {
        for item in self.matching_mut(with_tag) {
            if !item.config.tags.iter().any(|t| t == new_tag) {
                item.config.tags.push(new_tag.to_string());
            }
        }
    }

    fn remove_tag(&mut self, with_tag: &str, tag: &str) {
        // Collect first: removing `tag` may change which items match `with_tag`
        let ids = self.find_withtag(with_tag);
        for item in self.items.iter_mut().filter(|item| ids.contains(&item.id)) {
            item.config.tags.retain(|t| t != tag);
        }
    }

    fn tags(&self, tag: &str) -> Vec<String> {
        self.first(tag)
            .map(|item| item.config.tags.clone())
            .unwrap_or_default()
    }

    fn bind(&mut self, tag: &str, pattern: &str, handler: EventHandler, append: bool) -> HandlerId {
        if !append {
            self.bindings
                .retain(|b| !(b.tag == tag && b.pattern == pattern));
        }
        self.next_handler += 1;
        let id = HandlerId(self.next_handler);
        self.bindings.push(Binding {
            tag: tag.to_string(),
            pattern: pattern.to_string(),
            id,
            handler,
        });
        id
    }

    fn unbind(&mut self, tag: &str, pattern: &str, handler: Option<HandlerId>) {
        self.bindings.retain(|b| {
            let same_slot = b.tag == tag && b.pattern == pattern;
            match handler {
                Some(id) => !(same_slot && b.id == id),
                None => !same_slot,
            }
        });
    }

    fn handlers(&self, tag: &str, pattern: &str) -> Vec<EventHandler> {
        let Ok(item) = self.first(tag) else {
            return Vec::new();
        };
        item.config
            .tags
            .iter()
            .flat_map(|item_tag| {
                self.bindings
                    .iter()
                    .filter(move |b| &b.tag == item_tag && b.pattern == pattern)
            })
            .map(|b| b.handler.clone())
            .collect()
    }

    fn suspend_redraw(&mut self) {
        self.suspend_depth += 1;
    }

    fn resume_redraw(&mut self) {
        if self.suspend_depth == 0 {
            return;
        }
        self.suspend_depth -= 1;
        if self.suspend_depth == 0 && self.changed_while_suspended {
            self.changed_while_suspended = false;
            self.redraws += 1;
            tracing::trace!(target: "canvas::memory", redraws = self.redraws, "deferred redraw");
        }
    }
}

impl fmt::Debug for MemoryCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCanvas")
            .field("items", &self.items)
            .field("bindings", &self.bindings.len())
            .field("redraws", &self.redraws)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dispatch, CanvasEvent, RedrawGuard, SurfaceRef};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn unit_square(canvas: &mut MemoryCanvas, tag: &str) -> ItemId {
        canvas
            .create_polygon(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0], &tags(&[tag]))
            .unwrap()
    }

    #[test]
    fn test_create_and_query() {
        let mut canvas = MemoryCanvas::new();
        let id = unit_square(&mut canvas, "sq");
        assert_eq!(canvas.item_count(), 1);
        assert_eq!(canvas.coords("sq").unwrap().len(), 8);
        assert_eq!(canvas.coords(&id.to_string()).unwrap().len(), 8);
        assert_eq!(canvas.item_config("sq").unwrap().fill, "black");
    }

    #[test]
    fn test_odd_coordinates_rejected() {
        let mut canvas = MemoryCanvas::new();
        let err = canvas.create_polygon(&[0.0, 1.0, 2.0], &[]).unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidCoordinates(_)));
        assert_eq!(canvas.item_count(), 0);
    }

    #[test]
    fn test_unknown_tag() {
        let canvas = MemoryCanvas::new();
        assert_eq!(
            canvas.coords("missing").unwrap_err(),
            SurfaceError::UnknownTag("missing".to_string())
        );
        assert!(canvas.bbox("missing").is_none());
    }

    #[test]
    fn test_bbox_union_over_tag() {
        let mut canvas = MemoryCanvas::new();
        unit_square(&mut canvas, "a");
        canvas
            .create_polygon(&[5.0, 5.0, 6.0, 7.0, 5.0, 7.0], &tags(&["b"]))
            .unwrap();
        canvas.add_tag("both", "a");
        canvas.add_tag("both", "b");
        assert_eq!(
            canvas.bbox("both").unwrap(),
            BoundingBox::new(0.0, 0.0, 6.0, 7.0)
        );
    }

    #[test]
    fn test_move_to_uses_union_top_left() {
        let mut canvas = MemoryCanvas::new();
        unit_square(&mut canvas, "g");
        canvas
            .create_polygon(&[-2.0, 3.0, 0.0, 3.0, 0.0, 4.0], &tags(&["g"]))
            .unwrap();
        canvas.move_to("g", 10.0, 10.0);
        assert_eq!(canvas.bbox("g").unwrap(), BoundingBox::new(10.0, 10.0, 13.0, 14.0));
    }

    #[test]
    fn test_scale_about_reference() {
        let mut canvas = MemoryCanvas::new();
        unit_square(&mut canvas, "sq");
        canvas.scale("sq", 1.0, 1.0, 2.0, 3.0);
        assert_eq!(canvas.bbox("sq").unwrap(), BoundingBox::new(-1.0, -2.0, 1.0, 1.0));
    }

    #[test]
    fn test_bulk_ops_on_unknown_tag_do_not_redraw() {
        let mut canvas = MemoryCanvas::new();
        unit_square(&mut canvas, "sq");
        let redraws = canvas.redraw_count();

        canvas.move_by("missing", 1.0, 1.0);
        canvas.scale("missing", 0.0, 0.0, 2.0, 2.0);
        canvas.move_to("missing", 5.0, 5.0);
        assert_eq!(canvas.redraw_count(), redraws);

        canvas.move_by("sq", 1.0, 0.0);
        canvas.scale("sq", 0.0, 0.0, 2.0, 2.0);
        assert_eq!(canvas.redraw_count(), redraws + 2);
    }

    #[test]
    fn test_remove_tag_by_itself() {
        let mut canvas = MemoryCanvas::new();
        unit_square(&mut canvas, "sq");
        canvas.add_tag("extra", "sq");
        canvas.remove_tag("extra", "extra");
        assert_eq!(canvas.tags("sq"), tags(&["sq"]));
    }

    #[test]
    fn test_bind_replace_append_unbind() {
        let mut canvas = MemoryCanvas::new();
        unit_square(&mut canvas, "sq");
        let noop: EventHandler = Rc::new(|_: &CanvasEvent| {});
        let first = canvas.bind("sq", "<Button-1>", noop.clone(), false);
        canvas.bind("sq", "<Button-1>", noop.clone(), false);
        assert_eq!(canvas.handlers("sq", "<Button-1>").len(), 1);

        let appended = canvas.bind("sq", "<Button-1>", noop, true);
        assert_ne!(first, appended);
        assert_eq!(canvas.handlers("sq", "<Button-1>").len(), 2);

        canvas.unbind("sq", "<Button-1>", Some(appended));
        assert_eq!(canvas.handlers("sq", "<Button-1>").len(), 1);
        canvas.unbind("sq", "<Button-1>", None);
        assert!(canvas.handlers("sq", "<Button-1>").is_empty());
    }

    #[test]
    fn test_dispatch_releases_borrow() {
        let canvas = Rc::new(RefCell::new(MemoryCanvas::new()));
        let surface: SurfaceRef = canvas.clone();
        unit_square(&mut canvas.borrow_mut(), "sq");

        let inner = Rc::clone(&surface);
        let seen = Rc::new(Cell::new(0.0));
        let seen_in_handler = Rc::clone(&seen);
        surface.borrow_mut().bind(
            "sq",
            "<Button-1>",
            Rc::new(move |event: &CanvasEvent| {
                inner.borrow_mut().move_by("sq", event.x, 0.0);
                seen_in_handler.set(event.x);
            }),
            false,
        );

        let ran = dispatch(&surface, "sq", &CanvasEvent::new("<Button-1>", 4.0, 0.0));
        assert_eq!(ran, 1);
        assert_eq!(seen.get(), 4.0);
        assert_eq!(canvas.borrow().bbox("sq").unwrap().x1, 4.0);
    }

    #[test]
    fn test_redraw_suspension() {
        let canvas = Rc::new(RefCell::new(MemoryCanvas::new()));
        let surface: SurfaceRef = canvas.clone();
        unit_square(&mut canvas.borrow_mut(), "sq");
        let before = canvas.borrow().redraw_count();
        {
            let _outer = RedrawGuard::new(&surface);
            let _inner = RedrawGuard::new(&surface);
            surface.borrow_mut().move_by("sq", 1.0, 0.0);
            surface.borrow_mut().move_by("sq", 1.0, 0.0);
            assert!(canvas.borrow().is_suspended());
            assert_eq!(canvas.borrow().redraw_count(), before);
        }
        assert!(!canvas.borrow().is_suspended());
        assert_eq!(canvas.borrow().redraw_count(), before + 1);
    }

    #[test]
    fn test_snapshot_json() {
        let mut canvas = MemoryCanvas::new();
        unit_square(&mut canvas, "sq");
        let json = canvas.to_json().unwrap();
        assert!(json.contains("\"sq\""));
        assert_eq!(canvas.snapshot()[0].coords.len(), 8);
    }
}
