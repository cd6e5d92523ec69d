//! Scenes and the scene registry
//!
//! A [`Scene`] owns its objects, its component index, its deferred object
//! actions and its input state. The [`SceneRegistry`] holds every scene,
//! tracks which one is current and runs scene lifecycle hooks.

pub mod game_scene;
pub mod registry;
pub mod script;

pub use game_scene::Scene;
pub use registry::SceneRegistry;
pub use script::{SceneId, SceneScript};
