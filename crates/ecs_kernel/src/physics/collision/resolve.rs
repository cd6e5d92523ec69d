//! Elastic velocity resolution
//!
//! The relative velocity of the initiating body A against B is split into
//! its part along the contact normal and the tangential remainder. Against
//! an immovable or absent partner the normal part is reflected; between two
//! dynamic bodies it is scaled by `(mA - mB) / (mA + mB)`. B's velocity is
//! added back in both cases.

use crate::foundation::math::{Real, Vec2};

/// Kinematic snapshot of a body taking part in a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Linear velocity
    pub velocity: Vec2,
    /// Mass
    pub mass: Real,
    /// Immovable body
    pub is_static: bool,
}

/// Velocity A should have after hitting B along unit `normal`
///
/// `other` is `None` when B has no body; its velocity is then taken as zero.
pub fn resolve_velocity(normal: Vec2, own: BodyState, other: Option<BodyState>) -> Vec2 {
    let other_velocity = other.map_or_else(Vec2::zeros, |body| body.velocity);
    let relative = own.velocity - other_velocity;
    let normal_part = normal * relative.dot(&normal);
    let tangential = relative - normal_part;

    match other {
        Some(body) if !body.is_static => {
            let ratio = (own.mass - body.mass) / (own.mass + body.mass);
            normal_part * ratio + tangential + other_velocity
        }
        _ => -normal_part + tangential + other_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body(vx: Real, vy: Real, mass: Real) -> BodyState {
        BodyState { velocity: Vec2::new(vx, vy), mass, is_static: false }
    }

    #[test]
    fn test_bounce_off_static_reflects_normal_component() {
        let wall = BodyState { is_static: true, ..body(0.0, 0.0, 1.0) };
        let v = resolve_velocity(Vec2::new(1.0, 0.0), body(10.0, 5.0, 1.0), Some(wall));
        assert_relative_eq!(v, Vec2::new(-10.0, 5.0));
    }

    #[test]
    fn test_missing_partner_acts_static() {
        let v = resolve_velocity(Vec2::new(0.0, -1.0), body(3.0, 4.0, 2.0), None);
        assert_relative_eq!(v, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_equal_masses_exchange_normal_velocity() {
        let v = resolve_velocity(Vec2::new(1.0, 0.0), body(10.0, 2.0, 1.0), Some(body(-4.0, 0.0, 1.0)));
        // Normal part cancelled, tangential kept, partner velocity added
        assert_relative_eq!(v, Vec2::new(-4.0, 2.0));
    }

    #[test]
    fn test_heavy_body_keeps_most_of_its_velocity() {
        let v = resolve_velocity(Vec2::new(1.0, 0.0), body(10.0, 0.0, 3.0), Some(body(0.0, 0.0, 1.0)));
        assert_relative_eq!(v, Vec2::new(5.0, 0.0));
    }
}
