//! Scene scripts and scene identity

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ecs::component::AsAny;
use crate::engine::EngineError;
use crate::scene::Scene;

/// Game-specific logic of a scene
///
/// All hooks get the whole scene and may perform any lifecycle operation.
/// Returning an error aborts the tick and reaches the host.
pub trait SceneScript: AsAny {
    /// Runs once, on the first logic tick after the scene was added
    fn start(&mut self, _scene: &mut Scene) -> Result<(), EngineError> {
        Ok(())
    }

    /// The scene became the active one
    fn on_active(&mut self, _scene: &mut Scene) -> Result<(), EngineError> {
        Ok(())
    }

    /// The scene stopped being the active one
    fn on_sleep(&mut self, _scene: &mut Scene) -> Result<(), EngineError> {
        Ok(())
    }

    /// Per logic tick while active, between behavior update and late update
    fn interact(&mut self, _scene: &mut Scene) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Identity of a scene: the type of its script
#[derive(Clone, Copy)]
pub struct SceneId {
    id: TypeId,
    name: &'static str,
}

impl SceneId {
    /// Identity of the scene driven by `S`
    pub fn of<S: SceneScript>() -> Self {
        let full = std::any::type_name::<S>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self { id: TypeId::of::<S>(), name }
    }

    /// Short type name of the script
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for SceneId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SceneId {}

impl Hash for SceneId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SceneId({})", self.name)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
