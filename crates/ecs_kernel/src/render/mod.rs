//! Render surface contract
//!
//! The kernel never talks to a graphics backend. Each render tick it clears
//! the host's [`RenderSurface`] and submits one [`DrawCommand`] per visible
//! render component, in ascending render order.

pub mod commands;

pub use commands::{Color, DrawCommand, Sprite, Visual};

/// Host drawing collaborator
pub trait RenderSurface {
    /// Start a new frame
    fn clear(&mut self);

    /// Draw one primitive
    fn submit(&mut self, command: DrawCommand);
}

/// Surface that records what it was asked to draw
///
/// Used by headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    /// Create an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands submitted since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
