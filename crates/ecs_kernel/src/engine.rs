//! Engine facade
//!
//! Owns the configuration, the scene registry and the frame scheduler. The
//! host either drives the three ticks itself or hands the engine a clock and
//! lets the scheduler decide which ticks are due.

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::core::config::EngineConfig;
use crate::ecs::object::ObjectId;
use crate::ecs::scheduler::{Cadence, FrameScheduler};
use crate::foundation::math::Real;
use crate::foundation::time::Clock;
use crate::input::InputSource;
use crate::render::RenderSurface;
use crate::scene::{Scene, SceneId, SceneRegistry, SceneScript};

/// Tick counters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Logic ticks run
    pub logic_ticks: u64,
    /// Fixed ticks run
    pub fixed_ticks: u64,
    /// Render ticks run
    pub render_ticks: u64,
    /// Delta of the most recent logic tick
    pub last_logic_delta: Real,
}

/// Main engine struct
pub struct Engine {
    config: EngineConfig,
    scenes: SceneRegistry,
    scheduler: FrameScheduler,
    stats: TickStats,
}

impl Engine {
    /// Create an engine with no scenes
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine: logic {:.4}s, fixed {:.4}s, surface {}x{}",
            config.timing.frame_interval,
            config.timing.fixed_interval,
            config.surface.width,
            config.surface.height
        );

        Ok(Self {
            config,
            scenes: SceneRegistry::new(config),
            scheduler: FrameScheduler::new(config.timing),
            stats: TickStats::default(),
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scene registry
    pub fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    /// Mutable scene registry
    pub fn scenes_mut(&mut self) -> &mut SceneRegistry {
        &mut self.scenes
    }

    /// Add the scene driven by a default-constructed `S`
    pub fn add_scene<S: SceneScript + Default>(&mut self) -> SceneId {
        self.scenes.add_scene::<S>()
    }

    /// Add the scene driven by `script`
    pub fn add_scene_with<S: SceneScript>(&mut self, script: S) -> SceneId {
        self.scenes.add_scene_with(script)
    }

    /// Make the scene driven by `S` current
    pub fn set_active_scene<S: SceneScript>(&mut self) -> Result<(), EngineError> {
        self.scenes.set_active_scene::<S>()
    }

    /// Current scene
    pub fn current_scene(&self) -> Option<&Scene> {
        self.scenes.current()
    }

    /// Mutable current scene
    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.current_mut()
    }

    /// Run one logic tick covering `delta_time` seconds
    pub fn logic_tick(&mut self, delta_time: Real) -> Result<(), EngineError> {
        self.scenes.logic_tick(delta_time)?;
        self.stats.logic_ticks += 1;
        self.stats.last_logic_delta = delta_time;
        Ok(())
    }

    /// Run one fixed tick of the configured interval
    pub fn fixed_tick(&mut self) -> Result<(), EngineError> {
        self.scenes.fixed_tick(self.config.timing.fixed_interval)?;
        self.stats.fixed_ticks += 1;
        Ok(())
    }

    /// Draw the current scene onto `surface`
    pub fn render_tick(&mut self, surface: &mut dyn RenderSurface) -> Result<(), EngineError> {
        self.scenes.render_tick(surface)?;
        self.stats.render_ticks += 1;
        Ok(())
    }

    /// Pull pending input from `source` into the current scene
    pub fn feed_input(&mut self, source: &mut dyn InputSource) -> Result<(), EngineError> {
        let scene = self.scenes.current_mut().ok_or(EngineError::NoActiveScene)?;
        scene.input_mut().pump(source);
        Ok(())
    }

    /// Run whichever of the logic and fixed ticks are due at `now`
    ///
    /// The logic tick runs first. `RENDER` in the result tells the host a
    /// frame is due; drawing is left to it.
    pub fn advance(&mut self, now: Real) -> Result<Cadence, EngineError> {
        let plan = self.scheduler.poll(now);
        if plan.due.contains(Cadence::LOGIC) {
            self.logic_tick(plan.logic_delta)?;
        }
        if plan.due.contains(Cadence::FIXED) {
            self.fixed_tick()?;
        }
        Ok(plan.due)
    }

    /// [`Engine::advance`] to the current time of `clock`
    pub fn pump(&mut self, clock: &dyn Clock) -> Result<Cadence, EngineError> {
        self.advance(clock.now())
    }

    /// Tick counters
    pub fn stats(&self) -> TickStats {
        self.stats
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("scenes", &self.scenes)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A tick ran while no scene was current
    #[error("No active scene")]
    NoActiveScene,

    /// A scene was activated that was never added
    #[error("Scene not found: {scene}")]
    SceneNotFound {
        /// Requested scene
        scene: &'static str,
    },

    /// A second scene change was requested before the first one applied
    #[error("Scene change to {requested} requested while a change to {pending} is pending")]
    SceneTransitionPending {
        /// Scene already requested
        pending: &'static str,
        /// Scene of the rejected request
        requested: &'static str,
    },

    /// The object is not in the scene
    #[error("Object not found: {0:?}")]
    ObjectNotFound(ObjectId),

    /// An object script could not be built
    #[error("Object construction failed: {0}")]
    ObjectConstruction(String),

    /// A component could not be built
    #[error("Component construction failed for {component}: {reason}")]
    ComponentConstruction {
        /// Component type
        component: &'static str,
        /// Cause reported by the constructor
        reason: String,
    },

    /// A scene or object script failed
    #[error("Script error: {0}")]
    Script(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
