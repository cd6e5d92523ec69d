//! Object and component lifecycle scenarios

use super::{current, sandbox, Journal, Probe};
use crate::ecs::component::{Component, ComponentKey, UpdateTag};
use crate::ecs::components::{Collider, PhysicsBody, Transform};
use crate::ecs::context::ComponentContext;
use crate::ecs::object::{ObjectId, ObjectScript};
use crate::ecs::object_tag::ObjectTag;
use crate::scene::Scene;
use crate::EngineError;
use approx::assert_relative_eq;

/// Queues its own object's destruction every update
#[derive(Debug, Default)]
struct SelfDestruct;

impl Component for SelfDestruct {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Behavior
    }

    fn update(&mut self, ctx: &mut ComponentContext<'_>) {
        let object = ctx.object();
        ctx.destroy_object_later(object);
    }
}

/// Disables the sibling [`Probe`] when it starts
#[derive(Debug, Default)]
struct Silencer;

impl Component for Silencer {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Behavior
    }

    fn start(&mut self, ctx: &mut ComponentContext<'_>) {
        ctx.set_enabled_later::<Probe>(false);
    }
}

struct Turret {
    journal: Journal,
}

impl ObjectScript for Turret {
    fn tag(&self) -> ObjectTag {
        ObjectTag::Enemy
    }

    fn init(&mut self, scene: &mut Scene, object: ObjectId) -> Result<(), EngineError> {
        scene.attach_component_with(object, || PhysicsBody::new().as_static())?;
        scene.attach_component_with(object, || Collider::circle(4.0))?;
        self.journal.record("init");
        Ok(())
    }

    fn on_destroy(&mut self, _scene: &mut Scene, _object: ObjectId) {
        self.journal.record("destroyed");
    }
}

#[test]
fn test_attach_keeps_a_single_instance_per_type() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Item).unwrap();

    scene.attach_component_with(id, || PhysicsBody::new().with_mass(2.0)).unwrap();
    let body = scene.attach_component_with(id, || PhysicsBody::new().with_mass(5.0)).unwrap();
    assert_relative_eq!(body.mass, 2.0);

    assert_eq!(scene.object(id).unwrap().component_count(), 1);
    assert_eq!(scene.index().len(UpdateTag::Physics), 1);
}

#[test]
fn test_transform_cannot_be_detached() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Item).unwrap();

    assert!(scene.detach_component::<Transform>(id).unwrap().is_none());
    assert!(scene.object(id).unwrap().has_component::<Transform>());
    assert!(scene.index().contains(UpdateTag::Transform, ComponentKey::of::<Transform>(id)));

    // The Transform is reachable through the generic accessors too
    scene.component_mut::<Transform>(id).unwrap().position.x = 3.0;
    assert_relative_eq!(scene.transform(id).unwrap().position.x, 3.0);
}

#[test]
fn test_index_follows_attach_detach_and_destroy() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Item).unwrap();
    let collider = ComponentKey::of::<Collider>(id);

    scene.attach_component_with(id, || Collider::circle(1.0)).unwrap();
    assert!(scene.index().contains(UpdateTag::Collision, collider));

    let detached = scene.detach_component::<Collider>(id).unwrap();
    assert!(detached.is_some());
    assert!(!scene.index().contains_any(collider));
    assert!(scene.detach_component::<Collider>(id).unwrap().is_none());

    scene.attach_component_with(id, || Collider::circle(1.0)).unwrap();
    scene.attach_component::<PhysicsBody>(id).unwrap();
    assert_eq!(scene.index().total(), 3);

    let husk = scene.destroy_object(id).unwrap();
    assert!(scene.index().is_empty());
    assert!(!husk.is_registered());
    assert_eq!(husk.component_count(), 0);
    assert!(!scene.contains(id));
    assert_eq!(scene.object_count(), 0);
}

#[test]
fn test_start_runs_once_on_the_next_logic_tick() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Player).unwrap();
    scene.attach_component_with(id, || Probe::new(&journal)).unwrap();
    assert_eq!(journal.count("start"), 0);

    engine.logic_tick(0.01).unwrap();
    assert_eq!(journal.entries(), ["start", "update", "late"]);

    engine.logic_tick(0.01).unwrap();
    assert_eq!(journal.count("start"), 1);
    assert_eq!(journal.count("update"), 2);
}

#[test]
fn test_unregistered_objects_stay_out_of_the_passes() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.spawn_object(ObjectTag::Item);
    scene.attach_component_with(id, || Probe::new(&journal)).unwrap();

    engine.logic_tick(0.01).unwrap();
    engine.fixed_tick().unwrap();
    assert!(journal.entries().is_empty());

    current(&mut engine).register_object(id).unwrap();
    engine.logic_tick(0.01).unwrap();
    assert_eq!(journal.count("start"), 1);
    assert_eq!(journal.count("update"), 1);
}

#[test]
fn test_destroy_requested_by_a_component_is_deferred() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Bullet).unwrap();
    scene.attach_component_with(id, || Probe::new(&journal)).unwrap();
    scene.attach_component::<SelfDestruct>(id).unwrap();

    engine.logic_tick(0.01).unwrap();
    assert!(current(&mut engine).contains(id));
    assert_eq!(current(&mut engine).pending_actions().len(), 1);

    engine.logic_tick(0.01).unwrap();
    assert!(!current(&mut engine).contains(id));
    assert_eq!(journal.count("update"), 1);
    assert_eq!(journal.count("detached"), 1);
}

#[test]
fn test_disabled_behavior_is_skipped() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Player).unwrap();
    scene.attach_component_with(id, || Probe::new(&journal)).unwrap();
    engine.logic_tick(0.01).unwrap();

    let scene = current(&mut engine);
    assert!(scene.set_enabled::<Probe>(id, false).unwrap());
    assert!(scene.set_enabled::<Probe>(id, false).unwrap());
    assert_eq!(journal.count("disable"), 1);
    assert_eq!(scene.object(id).unwrap().is_enabled::<Probe>(), Some(false));

    engine.logic_tick(0.01).unwrap();
    engine.fixed_tick().unwrap();
    assert_eq!(journal.count("update"), 1);
    assert_eq!(journal.count("late"), 1);
    assert_eq!(journal.count("fixed"), 0);

    current(&mut engine).set_enabled::<Probe>(id, true).unwrap();
    engine.logic_tick(0.01).unwrap();
    assert_eq!(journal.count("enable"), 1);
    assert_eq!(journal.count("update"), 2);

    assert!(!current(&mut engine).set_enabled::<Collider>(id, false).unwrap());
}

#[test]
fn test_component_can_disable_a_sibling_for_the_next_tick() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Player).unwrap();
    scene.attach_component_with(id, || Probe::new(&journal)).unwrap();
    scene.attach_component::<Silencer>(id).unwrap();

    engine.logic_tick(0.01).unwrap();
    assert_eq!(journal.count("update"), 1);

    engine.logic_tick(0.01).unwrap();
    assert_eq!(journal.count("disable"), 1);
    assert_eq!(journal.count("update"), 1);
}

#[test]
fn test_object_script_builds_and_tears_down() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);

    let id = scene.instantiate_with(Turret { journal: journal.clone() }).unwrap();
    let turret = scene.object(id).unwrap();
    assert_eq!(turret.tag(), ObjectTag::Enemy);
    assert_eq!(turret.component_count(), 2);
    assert!(scene.script::<Turret>(id).is_some());
    assert_eq!(journal.entries(), ["init"]);

    scene.destroy_object(id).unwrap();
    assert_eq!(journal.entries(), ["init", "destroyed"]);
}

#[test]
fn test_failed_construction_is_reported() {
    let mut engine = sandbox();
    let scene = current(&mut engine);

    let result = scene.try_instantiate_with(|| Err::<Turret, _>("no ammunition"));
    assert!(matches!(result, Err(EngineError::ObjectConstruction(reason)) if reason.contains("no ammunition")));
    assert_eq!(scene.object_count(), 0);

    let id = scene.create_object(ObjectTag::Item).unwrap();
    let result = scene.try_attach_component_with(id, || Err::<Collider, _>("negative radius"));
    assert!(matches!(
        result,
        Err(EngineError::ComponentConstruction { reason, .. }) if reason == "negative radius"
    ));
    assert_eq!(scene.object(id).unwrap().component_count(), 0);
}

#[test]
fn test_reattached_component_starts_once() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let id = scene.create_object(ObjectTag::Player).unwrap();
    scene.attach_component_with(id, || Probe::new(&journal)).unwrap();
    assert!(scene.detach_component::<Probe>(id).unwrap().is_some());
    scene.attach_component_with(id, || Probe::new(&journal)).unwrap();

    engine.logic_tick(0.01).unwrap();
    assert_eq!(journal.entries(), ["detached", "start", "update", "late"]);
}
