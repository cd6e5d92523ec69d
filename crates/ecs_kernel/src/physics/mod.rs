//! Physics: fixed-step integration and collision
//!
//! Both run from components during the fixed tick. Bodies integrate first
//! (physics tag), colliders detect afterwards (collision tag).

pub mod integrator;
pub mod collision;

pub use collision::{BodyState, Shape, TriggerEvent, TriggerPhase, WorldShape};
pub use integrator::integrate;
