//! Shape construction context

use crate::{Group, IdAllocator, IdScheme, ProcessIds, Shape, ShapeSettings, UuidIds};
use canvas::SurfaceRef;
use std::fmt;
use std::rc::Rc;

/// Everything a shape constructor needs: the drawing surface to attach to,
/// the identity allocator and the engine settings.
///
/// Cloning a context is cheap and shares all three.
#[derive(Clone)]
pub struct ShapeContext {
    surface: SurfaceRef,
    ids: Rc<dyn IdAllocator>,
    settings: Rc<ShapeSettings>,
}

impl ShapeContext {
    /// Context with default settings and process-wide sequential ids
    pub fn new(surface: SurfaceRef) -> Self {
        Self::with_settings(surface, ShapeSettings::default())
    }

    /// Context with the given settings; the allocator follows `settings.id_scheme`
    pub fn with_settings(surface: SurfaceRef, settings: ShapeSettings) -> Self {
        let ids: Rc<dyn IdAllocator> = match settings.id_scheme {
            IdScheme::Sequential => Rc::new(ProcessIds),
            IdScheme::Uuid => Rc::new(UuidIds),
        };
        Self {
            surface,
            ids,
            settings: Rc::new(settings),
        }
    }

    /// Replace the identity allocator
    pub fn with_ids(mut self, ids: Rc<dyn IdAllocator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn surface(&self) -> &SurfaceRef {
        &self.surface
    }

    pub fn settings(&self) -> &ShapeSettings {
        &self.settings
    }

    pub fn ids(&self) -> &Rc<dyn IdAllocator> {
        &self.ids
    }

    pub fn next_id(&self, kind: &str) -> String {
        self.ids.next_id(kind)
    }

    /// New group holding the given shapes
    pub fn group<I>(&self, shapes: I) -> Group
    where
        I: IntoIterator<Item = Rc<dyn Shape>>,
    {
        Group::new(self, shapes)
    }
}

impl fmt::Debug for ShapeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeContext")
            .field("ids", &self.ids)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
