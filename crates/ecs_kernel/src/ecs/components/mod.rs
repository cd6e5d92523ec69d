//! Built-in components
//!
//! - [`Transform`]: present on every object
//! - [`PhysicsBody`]: rigid body integrated each fixed tick
//! - [`Collider`]: shape collisions with trigger events
//! - [`Renderable`]: sprite drawn each render tick

pub mod transform;
pub mod physics_body;
pub mod collider;
pub mod renderable;

pub use collider::{Collider, Contact};
pub use physics_body::PhysicsBody;
pub use renderable::{Geometry, Renderable};
pub use transform::Transform;
