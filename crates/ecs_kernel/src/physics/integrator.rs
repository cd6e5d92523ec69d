//! Fixed-step rigid body integration
//!
//! Semi-implicit Euler: velocity is updated first and the new velocity moves
//! the body. One step, in order:
//!
//! 1. gravity: `velocity.y += gravity * mass * dt`
//! 2. drag: `velocity *= (1 - drag)^dt`
//! 3. linear: clamp acceleration, integrate, clamp speed
//! 4. angular: clamp angular acceleration, integrate, clamp angular speed
//! 5. `position += velocity * dt`, `rotation += angular_velocity * dt`
//!
//! Static bodies are left untouched.

use crate::core::config::PhysicsConfig;
use crate::ecs::components::{PhysicsBody, Transform};
use crate::foundation::math::{clamp_magnitude, Real};

/// Cached per-step velocity decay for a drag coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDecay {
    coefficient: Real,
    dt: Real,
    /// Fraction of velocity removed per step, `1 - (1 - coefficient)^dt`
    pub factor: Real,
}

impl DragDecay {
    /// Compute the decay of `coefficient` over `dt`
    pub fn new(coefficient: Real, dt: Real) -> Self {
        Self {
            coefficient,
            dt,
            factor: 1.0 - (1.0 - coefficient).powf(dt),
        }
    }

    /// Whether this cache entry was computed for these inputs
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, coefficient: Real, dt: Real) -> bool {
        self.coefficient == coefficient && self.dt == dt
    }
}

/// Advance `body` and its `transform` by one fixed step of `dt` seconds
pub fn integrate(body: &mut PhysicsBody, transform: &mut Transform, limits: &PhysicsConfig, dt: Real) {
    if body.is_static {
        return;
    }

    if body.use_gravity {
        body.velocity.y += body.gravity() * body.mass * dt;
    }

    if body.use_drag {
        let decay = body.drag_decay(dt);
        body.velocity *= 1.0 - decay;
    }

    body.acceleration = clamp_magnitude(body.acceleration, limits.max_acceleration);
    body.velocity += body.acceleration * dt;
    body.velocity = clamp_magnitude(body.velocity, limits.max_speed);

    body.angular_acceleration = body
        .angular_acceleration
        .clamp(-limits.max_angular_acceleration, limits.max_angular_acceleration);
    body.angular_velocity += body.angular_acceleration * dt;
    body.angular_velocity = body
        .angular_velocity
        .clamp(-limits.max_angular_speed, limits.max_angular_speed);

    transform.position += body.velocity * dt;
    transform.rotation += body.angular_velocity * dt;
}
