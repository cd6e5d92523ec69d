//! Renderable component
//!
//! Draws a [`Sprite`] centered on its object. Geometry is refreshed from the
//! Transform at the start of every render tick, so logic that moves objects
//! never has to touch it.

use crate::ecs::component::{Component, UpdateTag};
use crate::ecs::context::ComponentContext;
use crate::ecs::object::ObjectId;
use crate::foundation::math::{Real, Vec2};
use crate::render::{DrawCommand, RenderSurface, Sprite};

/// Transform-derived placement of a sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Center
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: Real,
    /// Scaled bounding size
    pub size: Vec2,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            size: Vec2::zeros(),
        }
    }
}

/// Drawable sprite with a render order
#[derive(Debug, Clone, Default)]
pub struct Renderable {
    /// Lower values are drawn first
    pub render_order: i32,
    /// What to draw; nothing is drawn when unset
    pub sprite: Option<Sprite>,
    geometry: Geometry,
}

impl Renderable {
    /// Renderable drawing `sprite`
    pub fn new(sprite: Sprite) -> Self {
        Self { sprite: Some(sprite), ..Self::default() }
    }

    /// Set the render order
    pub fn with_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }

    /// Placement computed at the last render tick
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl Component for Renderable {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Render
    }

    fn transform_update(&mut self, ctx: &mut ComponentContext<'_>) {
        let transform = ctx.transform();
        let base = self.sprite.map_or_else(Vec2::zeros, |sprite| sprite.visual.size());
        self.geometry = Geometry {
            position: transform.position,
            rotation: transform.rotation,
            size: base.component_mul(&transform.scale.abs()),
        };
    }

    fn render_order(&self) -> i32 {
        self.render_order
    }

    fn draw(&self, object: ObjectId, surface: &mut dyn RenderSurface) {
        let Some(sprite) = self.sprite else {
            return;
        };
        surface.submit(DrawCommand {
            object,
            order: self.render_order,
            visual: sprite.visual,
            color: sprite.color,
            position: self.geometry.position,
            rotation: self.geometry.rotation,
            size: self.geometry.size,
        });
    }
}
