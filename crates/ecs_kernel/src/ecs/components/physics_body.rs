//! Rigid body component
//!
//! Holds the kinematic state integrated every fixed tick by
//! [`crate::physics::integrator`]. Forces overwrite the acceleration for the
//! next step instead of accumulating; impulses change velocity directly.

use crate::core::config::PhysicsConfig;
use crate::ecs::component::{Component, UpdateTag};
use crate::ecs::context::ComponentContext;
use crate::foundation::math::{Real, Vec2};
use crate::physics::collision::BodyState;
use crate::physics::integrator::{self, DragDecay};

/// Point-mass rigid body with optional gravity and drag
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    /// Linear velocity
    pub velocity: Vec2,
    /// Linear acceleration applied each fixed step
    pub acceleration: Vec2,
    /// Angular velocity, radians per second
    pub angular_velocity: Real,
    /// Angular acceleration applied each fixed step
    pub angular_acceleration: Real,
    /// Mass, must be positive
    pub mass: Real,
    /// Immovable: never integrated, never resolved
    pub is_static: bool,
    /// Apply gravity each step
    pub use_gravity: bool,
    /// Apply drag each step
    pub use_drag: bool,
    gravity: Option<Real>,
    drag: Option<Real>,
    drag_decay: Option<DragDecay>,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBody {
    /// Body at rest with unit mass, gravity and drag off
    ///
    /// Gravity and drag constants come from the scene's [`PhysicsConfig`]
    /// when attached, unless set explicitly beforehand.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::zeros(),
            acceleration: Vec2::zeros(),
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            mass: 1.0,
            is_static: false,
            use_gravity: false,
            use_drag: false,
            gravity: None,
            drag: None,
            drag_decay: None,
        }
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Enable gravity with the given constant
    pub fn with_gravity(mut self, gravity: Real) -> Self {
        self.gravity = Some(gravity);
        self.use_gravity = true;
        self
    }

    /// Enable drag with the given coefficient
    pub fn with_drag(mut self, coefficient: Real) -> Self {
        self.drag = Some(coefficient);
        self.use_drag = true;
        self
    }

    /// Make the body immovable
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Gravity constant
    pub fn gravity(&self) -> Real {
        self.gravity.unwrap_or_else(|| PhysicsConfig::default().gravity)
    }

    /// Set the gravity constant
    pub fn set_gravity(&mut self, gravity: Real) {
        self.gravity = Some(gravity);
    }

    /// Drag coefficient, fraction of speed lost per second
    pub fn drag(&self) -> Real {
        self.drag.unwrap_or_else(|| PhysicsConfig::default().drag)
    }

    /// Set the drag coefficient
    pub fn set_drag(&mut self, coefficient: Real) {
        self.drag = Some(coefficient);
    }

    /// Set acceleration to `force / mass` for the coming steps
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration = force / self.mass;
    }

    /// Set angular acceleration to `torque / mass`
    pub fn apply_torque(&mut self, torque: Real) {
        self.angular_acceleration = torque / self.mass;
    }

    /// Add `impulse / mass` to velocity
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
    }

    /// Add `impulse / mass` to angular velocity
    pub fn apply_angular_impulse(&mut self, impulse: Real) {
        self.angular_velocity += impulse / self.mass;
    }

    /// Kinematic snapshot used by collision resolution
    pub fn state(&self) -> BodyState {
        BodyState {
            velocity: self.velocity,
            mass: self.mass,
            is_static: self.is_static,
        }
    }

    /// Velocity decay factor for one step of `dt`, recomputed only when the
    /// coefficient or the step changed
    pub(crate) fn drag_decay(&mut self, dt: Real) -> Real {
        let coefficient = self.drag();
        match self.drag_decay {
            Some(cached) if cached.matches(coefficient, dt) => cached.factor,
            _ => {
                let decay = DragDecay::new(coefficient, dt);
                self.drag_decay = Some(decay);
                decay.factor
            }
        }
    }
}

impl Component for PhysicsBody {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Physics
    }

    fn on_attached(&mut self, ctx: &mut ComponentContext<'_>) {
        let defaults = *ctx.physics();
        self.gravity.get_or_insert(defaults.gravity);
        self.drag.get_or_insert(defaults.drag);
    }

    fn fixed_update(&mut self, ctx: &mut ComponentContext<'_>) {
        let limits = *ctx.physics();
        let dt = ctx.fixed_delta_time();
        integrator::integrate(self, ctx.transform_mut(), &limits, dt);
    }
}
