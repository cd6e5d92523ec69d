//! # Scene
//!
//! Object storage, the component index and the per-tick passes over it.
//!
//! Objects are spawned into storage first and join the simulation when
//! registered. Registration, attach, detach and destruction are the only
//! operations that touch the [`ComponentIndex`]. They are never reachable
//! from inside a component pass: component hooks only see a
//! [`ComponentContext`], which defers destruction to the next tick.
//!
//! While a hook runs, its component is checked out of the owning object and
//! put back afterwards, so the hook can borrow its object and siblings
//! through the context without aliasing itself.

use std::fmt::Display;

use slotmap::SlotMap;

use crate::core::config::{EngineConfig, PhysicsConfig, SurfaceConfig};
use crate::ecs::commands::{CommandQueue, ObjectCommand};
use crate::ecs::component::{Behavior, Component, ComponentKey, ComponentKind, UpdateTag};
use crate::ecs::components::{Collider, Transform};
use crate::ecs::context::ComponentContext;
use crate::ecs::index::ComponentIndex;
use crate::ecs::object::{ComponentSlot, GameObject, ObjectId, ObjectScript};
use crate::ecs::object_tag::ObjectTag;
use crate::engine::EngineError;
use crate::foundation::math::Real;
use crate::input::InputState;
use crate::physics::collision::TriggerPhase;
use crate::render::RenderSurface;
use crate::scene::{SceneId, SceneScript};

/// A self-contained world of objects
pub struct Scene {
    id: SceneId,
    pub(crate) objects: SlotMap<ObjectId, GameObject>,
    registered: Vec<ObjectId>,
    index: ComponentIndex,
    actions: CommandQueue<ObjectCommand>,
    transition: Option<SceneId>,
    fault: Option<EngineError>,
    input: InputState,
    active: bool,
    surface: SurfaceConfig,
    physics: PhysicsConfig,
    delta_time: Real,
    fixed_delta_time: Real,
}

impl Scene {
    /// Create an empty scene
    pub fn new(id: SceneId, config: &EngineConfig) -> Self {
        Self {
            id,
            objects: SlotMap::with_key(),
            registered: Vec::new(),
            index: ComponentIndex::new(),
            actions: CommandQueue::new(),
            transition: None,
            fault: None,
            input: InputState::new(),
            active: false,
            surface: config.surface,
            physics: config.physics,
            delta_time: 0.0,
            fixed_delta_time: config.timing.fixed_interval,
        }
    }

    /// Identity of the scene
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Short name of the scene's script type
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Whether this is the active scene
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Surface width in world units
    pub fn width(&self) -> Real {
        self.surface.width
    }

    /// Surface height in world units
    pub fn height(&self) -> Real {
        self.surface.height
    }

    /// One hundredth of the width, a resolution-independent length unit
    pub fn unit_width(&self) -> Real {
        self.surface.width / 100.0
    }

    /// One hundredth of the height
    pub fn unit_height(&self) -> Real {
        self.surface.height / 100.0
    }

    /// Seconds covered by the current logic tick
    pub fn delta_time(&self) -> Real {
        self.delta_time
    }

    /// Seconds covered by a fixed tick
    pub fn fixed_delta_time(&self) -> Real {
        self.fixed_delta_time
    }

    /// Physics caps and body defaults
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Input state
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Mutable input state
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Component index
    pub fn index(&self) -> &ComponentIndex {
        &self.index
    }

    /// Deferred object actions awaiting the next logic tick
    pub fn pending_actions(&self) -> &CommandQueue<ObjectCommand> {
        &self.actions
    }

    // ---------------------------------------------------------------------
    // Objects
    // ---------------------------------------------------------------------

    /// Object by id, registered or not
    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Mutable object by id
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Whether `id` is in this scene's storage
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Registered objects in registration order
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.registered.iter().copied()
    }

    /// Number of registered objects
    pub fn object_count(&self) -> usize {
        self.registered.len()
    }

    /// Transform of an object
    pub fn transform(&self, id: ObjectId) -> Option<&Transform> {
        self.objects.get(id).map(GameObject::transform)
    }

    /// Mutable Transform of an object
    pub fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.objects.get_mut(id).map(GameObject::transform_mut)
    }

    /// Component of type `T` on an object
    pub fn component<T: Component>(&self, id: ObjectId) -> Option<&T> {
        self.objects.get(id)?.component::<T>()
    }

    /// Mutable component of type `T` on an object
    pub fn component_mut<T: Component>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects.get_mut(id)?.component_mut::<T>()
    }

    /// Script of type `S` of an object
    pub fn script<S: ObjectScript>(&self, id: ObjectId) -> Option<&S> {
        self.objects.get(id)?.script::<S>()
    }

    /// Create an unregistered object with only a Transform
    pub fn spawn_object(&mut self, tag: ObjectTag) -> ObjectId {
        self.objects.insert(GameObject::new(tag, None))
    }

    /// Create an unregistered object driven by `script`
    pub fn spawn_scripted<O: ObjectScript>(&mut self, script: O) -> ObjectId {
        let tag = script.tag();
        self.objects.insert(GameObject::new(tag, Some(Box::new(script))))
    }

    /// Spawn and register a script-less object
    pub fn create_object(&mut self, tag: ObjectTag) -> Result<ObjectId, EngineError> {
        let id = self.spawn_object(tag);
        self.register_object(id)?;
        Ok(id)
    }

    /// Spawn and register an object driven by a default-constructed `O`
    pub fn instantiate<O: ObjectScript + Default>(&mut self) -> Result<ObjectId, EngineError> {
        self.instantiate_with(O::default())
    }

    /// Spawn and register an object driven by `script`
    pub fn instantiate_with<O: ObjectScript>(&mut self, script: O) -> Result<ObjectId, EngineError> {
        let id = self.spawn_scripted(script);
        self.register_object(id)?;
        Ok(id)
    }

    /// Spawn and register an object whose script may fail to build
    pub fn try_instantiate_with<O, E>(
        &mut self,
        factory: impl FnOnce() -> Result<O, E>,
    ) -> Result<ObjectId, EngineError>
    where
        O: ObjectScript,
        E: Display,
    {
        let script = factory().map_err(|e| {
            EngineError::ObjectConstruction(format!("{}: {e}", std::any::type_name::<O>()))
        })?;
        self.instantiate_with(script)
    }

    /// Make a spawned object part of the simulation
    ///
    /// Appends it to the object list, sets its scene back-reference, indexes
    /// its Transform and every component attached so far (scheduling their
    /// `start` for the next tick), then runs the script's `init`.
    pub fn register_object(&mut self, id: ObjectId) -> Result<(), EngineError> {
        let scene = self.id;
        let object = self.objects.get_mut(id).ok_or(EngineError::ObjectNotFound(id))?;
        if object.is_registered() {
            log::warn!("Object {id:?} is already registered to {}", scene.name());
            return Ok(());
        }
        object.set_scene(Some(scene));
        let existing: Vec<(ComponentKind, UpdateTag, i32)> = object
            .slots()
            .iter()
            .map(|slot| {
                let order = slot.component.as_deref().map_or(0, |component| component.render_order());
                (slot.kind, slot.tag, order)
            })
            .collect();

        self.registered.push(id);
        self.index.insert(UpdateTag::Transform, ComponentKey::of::<Transform>(id), 0);
        for (kind, tag, order) in existing {
            let key = ComponentKey { object: id, kind };
            self.index.insert(tag, key, order);
            self.actions.push(ObjectCommand::Start(key));
        }
        log::debug!("Registered object {id:?} in {}", scene.name());

        let script = self.objects.get_mut(id).and_then(|object| object.script.take());
        if let Some(mut script) = script {
            let result = script.init(self, id);
            if let Some(object) = self.objects.get_mut(id) {
                object.script = Some(script);
            }
            result?;
        }
        Ok(())
    }

    /// Remove an object and everything attached to it
    ///
    /// Runs the script's `on_destroy`, drops the object's index entries,
    /// detaches every component, clears the back-reference and removes the
    /// object from the scene. Returns the emptied object.
    pub fn destroy_object(&mut self, id: ObjectId) -> Result<GameObject, EngineError> {
        let script = self
            .objects
            .get_mut(id)
            .ok_or(EngineError::ObjectNotFound(id))?
            .script
            .take();
        if let Some(mut script) = script {
            script.on_destroy(self, id);
            if let Some(object) = self.objects.get_mut(id) {
                object.script = Some(script);
            }
        }

        self.index.remove_object(id);
        let kinds: Vec<ComponentKind> = self
            .objects
            .get(id)
            .ok_or(EngineError::ObjectNotFound(id))?
            .component_kinds()
            .collect();
        for kind in kinds {
            self.detach_kind(id, kind);
        }

        self.registered.retain(|&registered| registered != id);
        let mut husk = self.objects.remove(id).ok_or(EngineError::ObjectNotFound(id))?;
        husk.set_scene(None);
        log::debug!("Destroyed object {id:?} in {}", self.name());
        Ok(husk)
    }

    /// Destroy an object at the start of the next logic tick
    pub fn destroy_object_later(&mut self, id: ObjectId) {
        self.actions.push(ObjectCommand::Destroy(id));
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    /// Attach a default-constructed `T`, or return the existing one
    pub fn attach_component<T: Component + Default>(&mut self, id: ObjectId) -> Result<&mut T, EngineError> {
        self.attach_inner(id, || Ok(T::default()))
    }

    /// Attach the component built by `build`, or return the existing one
    ///
    /// `build` only runs when no `T` is attached yet.
    pub fn attach_component_with<T: Component>(
        &mut self,
        id: ObjectId,
        build: impl FnOnce() -> T,
    ) -> Result<&mut T, EngineError> {
        self.attach_inner(id, || Ok(build()))
    }

    /// Attach a component whose construction may fail
    pub fn try_attach_component_with<T, E>(
        &mut self,
        id: ObjectId,
        build: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, EngineError>
    where
        T: Component,
        E: Display,
    {
        self.attach_inner(id, || {
            build().map_err(|e| EngineError::ComponentConstruction {
                component: std::any::type_name::<T>(),
                reason: e.to_string(),
            })
        })
    }

    fn attach_inner<T: Component>(
        &mut self,
        id: ObjectId,
        build: impl FnOnce() -> Result<T, EngineError>,
    ) -> Result<&mut T, EngineError> {
        let kind = ComponentKind::of::<T>();
        let object = self.objects.get(id).ok_or(EngineError::ObjectNotFound(id))?;
        if object.has_component::<T>() {
            return self.objects[id].component_mut::<T>().ok_or(EngineError::ComponentConstruction {
                component: kind.name(),
                reason: "component is busy in one of its own hooks".to_string(),
            });
        }
        let registered = object.is_registered();

        let component = build()?;
        let tag = component.tag();
        let key = ComponentKey { object: id, kind };
        if registered {
            self.index.insert(tag, key, component.render_order());
        }
        self.objects[id].push_slot(ComponentSlot { kind, tag, enabled: true, component: Some(Box::new(component)) });
        self.lend(key, |component, ctx| component.on_attached(ctx));
        if registered {
            self.actions.push(ObjectCommand::Start(key));
        }
        log::debug!("Attached {} to {id:?}", kind.name());

        self.objects[id].component_mut::<T>().ok_or(EngineError::ComponentConstruction {
            component: kind.name(),
            reason: "component was removed while attaching".to_string(),
        })
    }

    /// Detach the component of type `T` and hand it back
    ///
    /// No-op (`Ok(None)`) when absent or when `T` is the Transform.
    pub fn detach_component<T: Component>(&mut self, id: ObjectId) -> Result<Option<T>, EngineError> {
        if !self.objects.contains_key(id) {
            return Err(EngineError::ObjectNotFound(id));
        }
        let kind = ComponentKind::of::<T>();
        if kind.is::<Transform>() {
            return Ok(None);
        }
        Ok(self
            .detach_kind(id, kind)
            .and_then(|component| component.into_any().downcast::<T>().ok())
            .map(|component| *component))
    }

    fn detach_kind(&mut self, id: ObjectId, kind: ComponentKind) -> Option<Box<dyn Component>> {
        let key = ComponentKey { object: id, kind };
        let slot = self.objects.get(id)?.slot(kind)?;
        let tag = slot.tag;

        // Runs while still attached so the hook can reach its object
        self.lend(key, |component, ctx| component.on_detached(ctx));
        self.index.remove(tag, key);
        let slot = self.objects.get_mut(id)?.remove_slot(kind)?;
        // A re-attached instance queues its own start
        self.actions.retain(|command| *command != ObjectCommand::Start(key));
        log::debug!("Detached {} from {id:?}", kind.name());
        slot.component
    }

    /// Enable or disable the behavior `T` on an object
    ///
    /// Fires `on_enable` / `on_disable` when the flag changes. Returns
    /// whether the component is attached.
    pub fn set_enabled<T: Component>(&mut self, id: ObjectId, enabled: bool) -> Result<bool, EngineError> {
        let object = self.objects.get(id).ok_or(EngineError::ObjectNotFound(id))?;
        if !object.has_component::<T>() {
            return Ok(false);
        }
        self.set_enabled_kind(ComponentKey::of::<T>(id), enabled);
        Ok(true)
    }

    fn set_enabled_kind(&mut self, key: ComponentKey, enabled: bool) {
        let Some(slot) = self.objects.get_mut(key.object).and_then(|object| object.slot_mut(key.kind)) else {
            return;
        };
        if slot.enabled == enabled {
            return;
        }
        slot.enabled = enabled;
        self.lend(key, |component, ctx| {
            if let Some(behavior) = component.as_behavior() {
                if enabled {
                    behavior.on_enable(ctx);
                } else {
                    behavior.on_disable(ctx);
                }
            }
        });
    }

    /// Toggle a behavior at the start of the next logic tick
    pub fn set_enabled_later<T: Component>(&mut self, id: ObjectId, enabled: bool) {
        self.actions.push(ObjectCommand::SetEnabled { key: ComponentKey::of::<T>(id), enabled });
    }

    // ---------------------------------------------------------------------
    // Scene transitions
    // ---------------------------------------------------------------------

    /// Request a switch to the scene driven by `S` at the end of this tick
    pub fn change_scene<S: SceneScript>(&mut self) -> Result<(), EngineError> {
        self.change_scene_to(SceneId::of::<S>())
    }

    /// Request a switch to `target` at the end of this tick
    ///
    /// Only one request can be pending; a second one fails.
    pub fn change_scene_to(&mut self, target: SceneId) -> Result<(), EngineError> {
        if let Some(pending) = self.transition {
            return Err(EngineError::SceneTransitionPending {
                pending: pending.name(),
                requested: target.name(),
            });
        }
        log::debug!("{} requested a switch to {}", self.name(), target.name());
        self.transition = Some(target);
        Ok(())
    }

    /// Transition requested during the current tick
    pub fn pending_transition(&self) -> Option<SceneId> {
        self.transition
    }

    // ---------------------------------------------------------------------
    // Tick plumbing
    // ---------------------------------------------------------------------

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn carry_input(&mut self, input: InputState) {
        self.input = input;
    }

    pub(crate) fn take_transition(&mut self) -> Option<SceneId> {
        self.transition.take()
    }

    pub(crate) fn record_fault(&mut self, error: EngineError) {
        if self.fault.is_none() {
            self.fault = Some(error);
        }
    }

    /// Surface an error recorded by a component hook
    pub(crate) fn check_fault(&mut self) -> Result<(), EngineError> {
        self.fault.take().map_or(Ok(()), Err)
    }

    /// Check a component out, run `hook` on it with a context, put it back
    ///
    /// `None` when the object or component is gone, or already checked out.
    fn lend<R>(
        &mut self,
        key: ComponentKey,
        hook: impl FnOnce(&mut dyn Component, &mut ComponentContext<'_>) -> R,
    ) -> Option<R> {
        let mut component = self
            .objects
            .get_mut(key.object)?
            .slot_mut(key.kind)?
            .component
            .take()?;
        let result = {
            let mut ctx = ComponentContext::new(self, key.object);
            hook(&mut *component, &mut ctx)
        };
        match self.objects.get_mut(key.object).and_then(|object| object.slot_mut(key.kind)) {
            Some(slot) => slot.component = Some(component),
            None => log::warn!("{} on {:?} vanished during its own hook", key.kind.name(), key.object),
        }
        Some(result)
    }

    fn is_enabled(&self, key: ComponentKey) -> bool {
        self.objects
            .get(key.object)
            .and_then(|object| object.slot(key.kind))
            .is_some_and(|slot| slot.enabled)
    }

    fn run_tag(
        &mut self,
        tag: UpdateTag,
        enabled_only: bool,
        mut hook: impl FnMut(&mut dyn Component, &mut ComponentContext<'_>),
    ) {
        for key in self.index.snapshot(tag) {
            if enabled_only && !self.is_enabled(key) {
                continue;
            }
            self.lend(key, &mut hook);
        }
    }

    /// Deliver a callback to every enabled behavior of `object`
    pub(crate) fn notify_behaviors(
        &mut self,
        object: ObjectId,
        mut callback: impl FnMut(&mut dyn Behavior, &mut ComponentContext<'_>),
    ) {
        let keys: Vec<ComponentKey> = self
            .objects
            .get(object)
            .map(|game_object| {
                game_object
                    .slots()
                    .iter()
                    .filter(|slot| slot.tag == UpdateTag::Behavior && slot.enabled)
                    .map(|slot| ComponentKey { object, kind: slot.kind })
                    .collect()
            })
            .unwrap_or_default();
        for key in keys {
            self.lend(key, |component, ctx| {
                if let Some(behavior) = component.as_behavior() {
                    callback(behavior, ctx);
                }
            });
        }
    }

    pub(crate) fn begin_logic_tick(&mut self, delta_time: Real) {
        self.delta_time = delta_time;
    }

    /// Run deferred object actions queued before this call
    pub(crate) fn drain_actions(&mut self) -> Result<(), EngineError> {
        for command in self.actions.drain_snapshot() {
            match command {
                ObjectCommand::Start(key) => {
                    self.lend(key, |component, ctx| component.start(ctx));
                }
                ObjectCommand::Destroy(id) => {
                    if self.objects.contains_key(id) {
                        self.destroy_object(id)?;
                    }
                }
                ObjectCommand::SetEnabled { key, enabled } => self.set_enabled_kind(key, enabled),
            }
        }
        Ok(())
    }

    /// `transform_update` on every non-render component, in tag order
    pub(crate) fn transform_pass(&mut self) {
        for tag in UpdateTag::ALL {
            if tag != UpdateTag::Render {
                self.run_tag(tag, false, |component, ctx| component.transform_update(ctx));
            }
        }
    }

    /// `update` on engine components, then on enabled behaviors
    pub(crate) fn update_pass(&mut self) {
        for tag in [UpdateTag::Transform, UpdateTag::Physics, UpdateTag::Collision] {
            self.run_tag(tag, false, |component, ctx| component.update(ctx));
        }
        self.run_tag(UpdateTag::Behavior, true, |component, ctx| component.update(ctx));
    }

    /// `late_update` on enabled behaviors
    pub(crate) fn late_update_pass(&mut self) {
        self.run_tag(UpdateTag::Behavior, true, |component, ctx| {
            if let Some(behavior) = component.as_behavior() {
                behavior.late_update(ctx);
            }
        });
    }

    /// `fixed_update` on every component, in tag order
    pub(crate) fn fixed_pass(&mut self, fixed_delta_time: Real) {
        self.fixed_delta_time = fixed_delta_time;
        for tag in UpdateTag::ALL {
            let enabled_only = tag == UpdateTag::Behavior;
            for key in self.index.snapshot(tag) {
                if enabled_only && !self.is_enabled(key) {
                    continue;
                }
                self.lend(key, |component, ctx| component.fixed_update(ctx));
                if tag == UpdateTag::Collision {
                    self.deliver_trigger_events(key);
                }
            }
        }
    }

    /// Hand the collider's events of this fixed tick to its object's behaviors
    ///
    /// Runs after the collider is back on its object, so the hooks can query it.
    fn deliver_trigger_events(&mut self, key: ComponentKey) {
        if !key.kind.is::<Collider>() {
            return;
        }
        let events = match self.objects.get(key.object).and_then(GameObject::component::<Collider>) {
            Some(collider) if !collider.events.is_empty() => collider.events.clone(),
            _ => return,
        };
        for event in &events {
            self.notify_behaviors(key.object, |behavior, ctx| match event.phase {
                TriggerPhase::Enter => behavior.on_trigger_enter(ctx, event),
                TriggerPhase::Stay => behavior.on_trigger_stay(ctx, event),
                TriggerPhase::Exit => behavior.on_trigger_exit(ctx, event),
            });
        }
    }

    /// Clear the surface, refresh and sort render components, draw them
    pub(crate) fn render_pass(&mut self, surface: &mut dyn RenderSurface) {
        surface.clear();
        for key in self.index.snapshot(UpdateTag::Render) {
            let order = self.lend(key, |component, ctx| {
                component.transform_update(ctx);
                component.render_order()
            });
            if let Some(order) = order {
                self.index.update_render_order(key, order);
            }
        }
        if self.index.sort_render_if_dirty() {
            log::trace!("Re-sorted {} render components in {}", self.index.len(UpdateTag::Render), self.name());
        }
        for key in self.index.keys(UpdateTag::Render) {
            let component = self
                .objects
                .get(key.object)
                .and_then(|object| object.slot(key.kind))
                .and_then(|slot| slot.component.as_deref());
            if let Some(component) = component {
                component.draw(key.object, surface);
            }
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("objects", &self.registered.len())
            .field("indexed", &self.index.total())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
