//! Collision detection and response
//!
//! Narrow-phase only: every collider tests every other collider of its scene
//! once per fixed tick. Overlaps drive a per-pair enter/stay/exit state
//! machine and, for solid pairs, an elastic velocity change applied on the
//! following fixed tick.

pub mod shape;
pub mod resolve;
pub mod events;
pub(crate) mod detector;

pub use events::{TriggerEvent, TriggerPhase};
pub use resolve::{resolve_velocity, BodyState};
pub use shape::{Aabb, Shape, WorldShape};
