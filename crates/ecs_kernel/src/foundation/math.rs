//! Math utilities and types
//!
//! Provides the 2D math types used by the simulation. All simulation math runs
//! in `f64` so that fixed-step integration stays reproducible over long runs.

pub use nalgebra::Vector2;

/// Scalar type used throughout the simulation
pub type Real = f64;

/// 2D vector type
pub type Vec2 = Vector2<Real>;

/// 2D point type
pub type Point2 = nalgebra::Point2<Real>;

/// Lengths below this are treated as zero when normalizing
pub const EPSILON: Real = 1e-12;

/// Scale `v` down so its length does not exceed `max`
///
/// Vectors already inside the limit are returned unchanged, so the direction
/// is always preserved.
pub fn clamp_magnitude(v: Vec2, max: Real) -> Vec2 {
    let length = v.norm();
    if length > max && length > EPSILON {
        v * (max / length)
    } else {
        v
    }
}

/// Unit vector in the direction of `v`, or `None` for a (near) zero vector
pub fn normalize_or_none(v: Vec2) -> Option<Vec2> {
    let length = v.norm();
    (length > EPSILON).then(|| v / length)
}

/// Largest absolute component of a scale vector
pub fn max_abs_component(v: Vec2) -> Real {
    v.x.abs().max(v.y.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_magnitude_limits_length() {
        let clamped = clamp_magnitude(Vec2::new(30.0, 40.0), 10.0);
        assert_relative_eq!(clamped.norm(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(clamped, Vec2::new(6.0, 8.0), epsilon = 1e-9);
    }

    #[test]
    fn test_clamp_magnitude_keeps_short_vectors() {
        let v = Vec2::new(1.0, -2.0);
        assert_eq!(clamp_magnitude(v, 10.0), v);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert!(normalize_or_none(Vec2::zeros()).is_none());
        let unit = normalize_or_none(Vec2::new(0.0, -3.0)).unwrap();
        assert_relative_eq!(unit, Vec2::new(0.0, -1.0));
    }
}
