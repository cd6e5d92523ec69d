//! # Kernel Configuration
//!
//! All tunables the kernel reads at runtime: the three tick cadences, the
//! physics caps and body defaults, and the logical surface size given to
//! every scene. The host builds an [`EngineConfig`] (or loads one through the
//! [`Config`] trait) and hands it to the engine; nothing below is read from
//! globals.
//!
//! Defaults describe a 144 Hz logic loop, a 50 Hz fixed step and an 800x600
//! surface.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Real;

pub use crate::config::{Config, ConfigError};

/// Tick cadences, in seconds between fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Target interval of the logic tick
    pub frame_interval: Real,
    /// Interval of the fixed physics tick
    pub fixed_interval: Real,
    /// Advisory render interval; the host owns the render loop
    pub render_interval: Real,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_interval: 1.0 / 144.0,
            fixed_interval: 0.02,
            render_interval: 1.0 / 144.0,
        }
    }
}

impl TimingConfig {
    /// Set the logic cadence from a frame rate
    pub fn with_frame_rate(mut self, frames_per_second: Real) -> Self {
        self.frame_interval = 1.0 / frames_per_second;
        self
    }

    /// Set the fixed step
    pub fn with_fixed_interval(mut self, seconds: Real) -> Self {
        self.fixed_interval = seconds;
        self
    }
}

/// Physics caps and the defaults new bodies start with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Cap on linear speed
    pub max_speed: Real,
    /// Cap on angular speed (radians per second)
    pub max_angular_speed: Real,
    /// Cap on linear acceleration magnitude
    pub max_acceleration: Real,
    /// Cap on angular acceleration magnitude
    pub max_angular_acceleration: Real,
    /// Gravity constant a new body starts with
    pub gravity: Real,
    /// Drag coefficient a new body starts with, fraction of speed lost per second
    pub drag: Real,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_speed: 1000.0,
            max_angular_speed: 1000.0,
            max_acceleration: 100.0,
            max_angular_acceleration: 100.0,
            gravity: 1000.0,
            drag: 0.25,
        }
    }
}

/// Logical size of the drawing surface, shared by every scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width in world units
    pub width: Real,
    /// Height in world units
    pub height: Real,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

/// Top-level kernel configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tick cadences
    pub timing: TimingConfig,
    /// Physics caps and body defaults
    pub physics: PhysicsConfig,
    /// Scene surface size
    pub surface: SurfaceConfig,
}

impl EngineConfig {
    /// Replace the timing section
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the physics section
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Replace the surface section
    pub fn with_surface(mut self, width: Real, height: Real) -> Self {
        self.surface = SurfaceConfig { width, height };
        self
    }
}

fn require_positive(name: &str, value: Real) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive and finite, got {value}")))
    }
}

fn require_finite(name: &str, value: Real) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")))
    }
}

impl Config for EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_positive("timing.frame_interval", self.timing.frame_interval)?;
        require_positive("timing.fixed_interval", self.timing.fixed_interval)?;
        require_positive("timing.render_interval", self.timing.render_interval)?;
        require_positive("physics.max_speed", self.physics.max_speed)?;
        require_positive("physics.max_angular_speed", self.physics.max_angular_speed)?;
        require_positive("physics.max_acceleration", self.physics.max_acceleration)?;
        require_positive("physics.max_angular_acceleration", self.physics.max_angular_acceleration)?;
        require_finite("physics.gravity", self.physics.gravity)?;
        if !(0.0..=1.0).contains(&self.physics.drag) {
            return Err(ConfigError::Invalid(format!(
                "physics.drag must lie in [0, 1], got {}",
                self.physics.drag
            )));
        }
        require_positive("surface.width", self.surface.width)?;
        require_positive("surface.height", self.surface.height)?;
        Ok(())
    }
}
