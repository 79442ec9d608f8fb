//! Triangles

use crate::quadrilateral::check_arity;
use crate::{Result, Shape, ShapeContext, ShapeCore, ShapeKind};
use canvas::ItemOptions;
use geometry::{sort_for_plotting, to_points, Coordinates};

/// A polygon with three vertices
#[derive(Debug)]
pub struct Triangle {
    core: ShapeCore,
}

impl Triangle {
    pub fn new(ctx: &ShapeContext, coords: impl Into<Coordinates>, options: ItemOptions) -> Result<Self> {
        let coords = coords.into();
        check_arity(ShapeKind::Triangle, &coords, 3)?;
        let vertices = to_points(coords)?;
        let core = ShapeCore::attach(ctx, ShapeKind::Triangle, &sort_for_plotting(&vertices), options)?;
        Ok(Self { core })
    }
}

impl Shape for Triangle {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn instance_factory(&self) -> Result<Self> {
        Self::new(self.core.context(), self.vertices()?, ItemOptions::default())
    }

    fn clone_boxed(&self) -> Result<Box<dyn Shape>> {
        Ok(Box::new(self.clone_shape()?))
    }
}
