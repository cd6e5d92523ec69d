//! Object/component model
//!
//! Game objects own typed components. Components are grouped by update tag
//! in a per-scene [`ComponentIndex`], and the [`FrameScheduler`] decides when
//! the scene walks that index.

pub mod component;
pub mod components;
pub mod commands;
pub mod context;
pub mod index;
pub mod object;
pub mod object_tag;
pub mod scheduler;

pub use component::{AsAny, Behavior, Component, ComponentKey, ComponentKind, UpdateTag};
pub use commands::{CommandQueue, ObjectCommand, SceneCommand};
pub use context::ComponentContext;
pub use index::ComponentIndex;
pub use object::{GameObject, ObjectId, ObjectScript};
pub use object_tag::ObjectTag;
pub use scheduler::{Cadence, FrameScheduler, TickPlan};
