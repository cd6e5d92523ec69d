//! # ECS Kernel
//!
//! A deterministic 2D simulation kernel: game objects with typed components,
//! scenes that own them, and a scheduler driving three cadences.
//!
//! ## Features
//!
//! - **Object/component model**: at most one component per type, tagged
//!   update order, deferred start and destroy
//! - **Fixed-step physics**: gravity, drag, speed caps, semi-implicit Euler
//! - **Collisions**: circle/box overlap, trigger enter/stay/exit, elastic
//!   response between solid bodies
//! - **Scenes**: one current scene, lifecycle hooks, input carried across
//!   switches
//! - **Headless**: rendering goes through the [`render::RenderSurface`]
//!   trait, input through [`input::InputSource`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecs_kernel::prelude::*;
//!
//! #[derive(Default)]
//! struct Playground;
//!
//! impl SceneScript for Playground {
//!     fn start(&mut self, scene: &mut Scene) -> Result<(), EngineError> {
//!         let ball = scene.create_object(ObjectTag::Item)?;
//!         scene.attach_component::<PhysicsBody>(ball)?;
//!         scene.attach_component_with(ball, || Collider::circle(10.0))?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     engine.add_scene::<Playground>();
//!
//!     let clock = SystemClock::new();
//!     let mut surface = RecordingSurface::new();
//!     loop {
//!         if engine.pump(&clock)?.contains(Cadence::RENDER) {
//!             engine.render_tick(&mut surface)?;
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod core;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

mod engine;

pub use engine::{Engine, EngineError, TickStats};

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{EngineConfig, PhysicsConfig, SurfaceConfig, TimingConfig},
        ecs::{
            components::{Collider, PhysicsBody, Renderable, Transform},
            Behavior, Cadence, Component, ComponentContext, GameObject, ObjectId, ObjectScript, ObjectTag,
            UpdateTag,
        },
        foundation::{
            math::{Real, Vec2},
            time::{Clock, ManualClock, SystemClock},
        },
        input::{InputSource, InputState, KeyCode, MouseButton, ScriptedInput},
        physics::{TriggerEvent, TriggerPhase},
        render::{Color, DrawCommand, RecordingSurface, RenderSurface, Sprite, Visual},
        scene::{Scene, SceneId, SceneRegistry, SceneScript},
        Engine, EngineError, TickStats,
    };
}

#[cfg(test)]
mod tests;
