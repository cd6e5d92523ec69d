//! Transform component
//!
//! Every game object has exactly one, created with the object.

use serde::{Deserialize, Serialize};

use crate::ecs::component::{Component, UpdateTag};
use crate::foundation::math::{Real, Vec2};

/// Position, rotation and scale of an object in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world units
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: Real,
    /// Per-axis scale factors
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform at the origin
    pub fn new() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Identity transform at `(x, y)`
    pub fn at(x: Real, y: Real) -> Self {
        Self { position: Vec2::new(x, y), ..Self::new() }
    }

    /// Set rotation
    pub fn with_rotation(mut self, rotation: Real) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set a uniform scale
    pub fn with_uniform_scale(mut self, scale: Real) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// Move by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Rotate by `angle` radians
    pub fn rotate(&mut self, angle: Real) {
        self.rotation += angle;
    }

    /// Unit vector the object faces (rotation 0 faces +x)
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }
}

impl Component for Transform {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Transform
    }
}
