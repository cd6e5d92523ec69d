//! Draw commands and visuals

use crate::ecs::object::ObjectId;
use crate::foundation::math::{Real, Vec2};

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Unscaled primitive geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    /// Filled circle
    Circle {
        /// Radius in world units
        radius: Real,
    },
    /// Filled rectangle centered on the object
    Rect {
        /// Width in world units
        width: Real,
        /// Height in world units
        height: Real,
    },
}

impl Visual {
    /// Bounding size before scaling
    pub fn size(&self) -> Vec2 {
        match *self {
            Self::Circle { radius } => Vec2::new(radius * 2.0, radius * 2.0),
            Self::Rect { width, height } => Vec2::new(width, height),
        }
    }
}

/// What a render component draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Geometry
    pub visual: Visual,
    /// Fill color
    pub color: Color,
}

impl Sprite {
    /// Circle sprite
    pub fn circle(radius: Real, color: Color) -> Self {
        Self { visual: Visual::Circle { radius }, color }
    }

    /// Rectangle sprite
    pub fn rect(width: Real, height: Real, color: Color) -> Self {
        Self { visual: Visual::Rect { width, height }, color }
    }
}

/// One primitive submitted to a render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Object that produced the command
    pub object: ObjectId,
    /// Render order the command was sorted by
    pub order: i32,
    /// Geometry
    pub visual: Visual,
    /// Fill color
    pub color: Color,
    /// Center of the primitive
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: Real,
    /// Scaled bounding size
    pub size: Vec2,
}

impl DrawCommand {
    /// Top-left corner of the scaled bounds, for surfaces that draw from a corner
    pub fn top_left(&self) -> Vec2 {
        self.position - self.size * 0.5
    }
}
