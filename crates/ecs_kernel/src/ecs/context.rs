//! Access handle passed to component hooks
//!
//! A [`ComponentContext`] is built by the owning scene for the duration of a
//! single hook. It is how a component reaches its object, its Transform and
//! its sibling components, and it can only exist while the component is
//! attached. It deliberately exposes no immediate lifecycle mutation: hooks
//! run in the middle of a pass, so destruction is deferred to the next tick.

use crate::core::config::PhysicsConfig;
use crate::ecs::component::Component;
use crate::ecs::components::Transform;
use crate::ecs::object::{GameObject, ObjectId};
use crate::ecs::object_tag::ObjectTag;
use crate::engine::EngineError;
use crate::foundation::math::Real;
use crate::input::InputState;
use crate::scene::{Scene, SceneId, SceneScript};

/// A component's view of its object and scene during a hook
pub struct ComponentContext<'a> {
    pub(crate) scene: &'a mut Scene,
    object: ObjectId,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(scene: &'a mut Scene, object: ObjectId) -> Self {
        Self { scene, object }
    }

    /// Owning object
    pub fn object(&self) -> ObjectId {
        self.object
    }

    fn game_object(&self) -> &GameObject {
        // The scene only builds contexts for objects in its storage, and
        // nothing reachable from a context can remove one.
        &self.scene.objects[self.object]
    }

    fn game_object_mut(&mut self) -> &mut GameObject {
        &mut self.scene.objects[self.object]
    }

    /// Category of the owning object
    pub fn tag(&self) -> ObjectTag {
        self.game_object().tag()
    }

    /// Transform of the owning object
    pub fn transform(&self) -> &Transform {
        self.game_object().transform()
    }

    /// Mutable Transform of the owning object
    pub fn transform_mut(&mut self) -> &mut Transform {
        self.game_object_mut().transform_mut()
    }

    /// Sibling component of type `T`
    pub fn component<T: Component>(&self) -> Option<&T> {
        self.game_object().component::<T>()
    }

    /// Mutable sibling component of type `T`
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.game_object_mut().component_mut::<T>()
    }

    /// Another object of the same scene, read-only
    pub fn object_of(&self, object: ObjectId) -> Option<&GameObject> {
        self.scene.object(object)
    }

    /// Read-only view of the whole scene
    pub fn scene(&self) -> &Scene {
        &*self.scene
    }

    /// Seconds covered by the current logic tick
    pub fn delta_time(&self) -> Real {
        self.scene.delta_time()
    }

    /// Seconds covered by a fixed tick
    pub fn fixed_delta_time(&self) -> Real {
        self.scene.fixed_delta_time()
    }

    /// Physics caps and body defaults
    pub fn physics(&self) -> &PhysicsConfig {
        self.scene.physics()
    }

    /// The scene's input state, for consume-once reads
    pub fn input_mut(&mut self) -> &mut InputState {
        self.scene.input_mut()
    }

    /// Destroy an object at the start of the next logic tick
    pub fn destroy_object_later(&mut self, object: ObjectId) {
        self.scene.destroy_object_later(object);
    }

    /// Enable or disable the behavior `T` of the owning object on the next logic tick
    pub fn set_enabled_later<T: Component>(&mut self, enabled: bool) {
        let object = self.object;
        self.scene.set_enabled_later::<T>(object, enabled);
    }

    /// Request a switch to the scene driven by `S`
    ///
    /// A second request in the same tick fails. The failure is also recorded
    /// on the scene so the tick reports it even if the caller drops it.
    pub fn change_scene<S: SceneScript>(&mut self) -> Result<(), EngineError> {
        self.change_scene_to(SceneId::of::<S>())
    }

    /// Request a switch to the scene `target`
    pub fn change_scene_to(&mut self, target: SceneId) -> Result<(), EngineError> {
        let result = self.scene.change_scene_to(target);
        if let Err(EngineError::SceneTransitionPending { pending, requested }) = &result {
            self.scene.record_fault(EngineError::SceneTransitionPending {
                pending: *pending,
                requested: *requested,
            });
        }
        result
    }
}
