//! Game objects
//!
//! A [`GameObject`] owns exactly one [`Transform`], created with it and never
//! detachable, plus at most one instance of every other component type. The
//! object lives in its scene's storage from the moment it is spawned; it only
//! takes part in ticks once registered, at which point its scene
//! back-reference is set.

use crate::ecs::component::{AsAny, Component, ComponentKind, UpdateTag};
use crate::ecs::components::Transform;
use crate::ecs::object_tag::ObjectTag;
use crate::engine::EngineError;
use crate::scene::{Scene, SceneId};

slotmap::new_key_type! {
    /// Handle of a game object inside its scene's storage
    pub struct ObjectId;
}

/// Per-object script: construction and teardown logic
///
/// `init` runs synchronously when the object is registered and is where
/// objects usually attach their components. Unlike component hooks, object
/// scripts get the whole scene and may perform any lifecycle operation.
pub trait ObjectScript: AsAny {
    /// Category of objects built by this script
    fn tag(&self) -> ObjectTag;

    /// Called once when the object is registered to a scene
    fn init(&mut self, scene: &mut Scene, object: ObjectId) -> Result<(), EngineError>;

    /// Called when the object is about to be destroyed
    fn on_destroy(&mut self, _scene: &mut Scene, _object: ObjectId) {}
}

pub(crate) struct ComponentSlot {
    pub(crate) kind: ComponentKind,
    pub(crate) tag: UpdateTag,
    pub(crate) enabled: bool,
    /// `None` while the component is checked out to run one of its hooks
    pub(crate) component: Option<Box<dyn Component>>,
}

/// An entity with a Transform and a set of typed components
pub struct GameObject {
    tag: ObjectTag,
    transform: Transform,
    slots: Vec<ComponentSlot>,
    scene: Option<SceneId>,
    pub(crate) script: Option<Box<dyn ObjectScript>>,
}

impl GameObject {
    pub(crate) fn new(tag: ObjectTag, script: Option<Box<dyn ObjectScript>>) -> Self {
        Self {
            tag,
            transform: Transform::default(),
            slots: Vec::new(),
            scene: None,
            script,
        }
    }

    /// Object category
    pub fn tag(&self) -> ObjectTag {
        self.tag
    }

    /// The object's Transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the object's Transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Scene the object is registered to
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Whether the object is registered to a scene
    pub fn is_registered(&self) -> bool {
        self.scene.is_some()
    }

    pub(crate) fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    /// Whether a component of type `T` is attached (always true for Transform)
    pub fn has_component<T: Component>(&self) -> bool {
        ComponentKind::of::<T>().is::<Transform>() || self.slot(ComponentKind::of::<T>()).is_some()
    }

    /// Component of type `T`, or the Transform when `T` is [`Transform`]
    pub fn component<T: Component>(&self) -> Option<&T> {
        if let Some(transform) = self.transform.as_any().downcast_ref::<T>() {
            return Some(transform);
        }
        self.slot(ComponentKind::of::<T>())?
            .component
            .as_deref()?
            .downcast_ref::<T>()
    }

    /// Mutable component of type `T`, or the Transform when `T` is [`Transform`]
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        if ComponentKind::of::<T>().is::<Transform>() {
            return self.transform.as_any_mut().downcast_mut::<T>();
        }
        self.slot_mut(ComponentKind::of::<T>())?
            .component
            .as_deref_mut()?
            .downcast_mut::<T>()
    }

    /// Whether the component of type `T` is enabled; `None` if absent
    pub fn is_enabled<T: Component>(&self) -> Option<bool> {
        self.slot(ComponentKind::of::<T>()).map(|slot| slot.enabled)
    }

    /// Attached component kinds in attach order, Transform excluded
    pub fn component_kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }

    /// Number of attached components, Transform excluded
    pub fn component_count(&self) -> usize {
        self.slots.len()
    }

    /// The object's script, if it is of type `S`
    pub fn script<S: ObjectScript>(&self) -> Option<&S> {
        self.script.as_deref()?.as_any().downcast_ref::<S>()
    }

    pub(crate) fn slots(&self) -> &[ComponentSlot] {
        &self.slots
    }

    pub(crate) fn slot(&self, kind: ComponentKind) -> Option<&ComponentSlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    pub(crate) fn slot_mut(&mut self, kind: ComponentKind) -> Option<&mut ComponentSlot> {
        self.slots.iter_mut().find(|slot| slot.kind == kind)
    }

    pub(crate) fn push_slot(&mut self, slot: ComponentSlot) {
        self.slots.push(slot);
    }

    pub(crate) fn remove_slot(&mut self, kind: ComponentKind) -> Option<ComponentSlot> {
        let position = self.slots.iter().position(|slot| slot.kind == kind)?;
        Some(self.slots.remove(position))
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("tag", &self.tag)
            .field("transform", &self.transform)
            .field("components", &self.slots.iter().map(|slot| slot.kind).collect::<Vec<_>>())
            .field("scene", &self.scene)
            .finish_non_exhaustive()
    }
}
