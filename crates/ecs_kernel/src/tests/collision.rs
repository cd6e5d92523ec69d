//! Collision detection, trigger events and elastic response

use super::{current, sandbox, Journal, Probe};
use crate::ecs::component::{Behavior, Component, UpdateTag};
use crate::ecs::components::{Collider, PhysicsBody};
use crate::ecs::context::ComponentContext;
use crate::ecs::object::ObjectId;
use crate::ecs::object_tag::ObjectTag;
use crate::foundation::math::{Real, Vec2};
use crate::physics::collision::{TriggerEvent, TriggerPhase};
use crate::scene::Scene;
use crate::Engine;
use approx::assert_relative_eq;

fn place(scene: &mut Scene, tag: ObjectTag, x: Real, y: Real, collider: Collider) -> ObjectId {
    let id = scene.create_object(tag).unwrap();
    scene.transform_mut(id).unwrap().position = Vec2::new(x, y);
    scene.attach_component_with(id, || collider).unwrap();
    id
}

/// Reads its own collider from inside the trigger hooks
struct ColliderReader {
    journal: Journal,
}

impl Component for ColliderReader {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Behavior
    }

    fn as_behavior(&mut self) -> Option<&mut dyn Behavior> {
        Some(self)
    }
}

impl Behavior for ColliderReader {
    fn on_trigger_enter(&mut self, ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {
        let collider = ctx.component::<Collider>();
        self.journal.record(format!(
            "enter triggering={:?} start={:?}",
            collider.map(Collider::is_triggering),
            collider.map(|c| c.trigger_start_point().is_some()),
        ));
    }

    fn on_trigger_exit(&mut self, ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {
        let collider = ctx.component::<Collider>();
        self.journal.record(format!(
            "exit triggering={:?} end={:?}",
            collider.map(Collider::is_triggering),
            collider.map(|c| c.trigger_end_point().is_some()),
        ));
    }
}

fn move_to(engine: &mut Engine, id: ObjectId, x: Real, y: Real) {
    current(engine).transform_mut(id).unwrap().position = Vec2::new(x, y);
}

fn collider(engine: &mut Engine, id: ObjectId) -> &Collider {
    current(engine).component::<Collider>(id).unwrap()
}

fn velocity(engine: &mut Engine, id: ObjectId) -> Vec2 {
    current(engine).component::<PhysicsBody>(id).unwrap().velocity
}

/// Whether two trigger circles of radius 10 and 5 overlap after one fixed tick
fn circles_overlap(x: Real, y: Real) -> bool {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let a = place(scene, ObjectTag::Player, 0.0, 0.0, Collider::circle(10.0).as_trigger());
    let b = place(scene, ObjectTag::Enemy, x, y, Collider::circle(5.0).as_trigger());
    engine.fixed_tick().unwrap();

    let forward = collider(&mut engine, a).is_overlapping(b);
    let backward = collider(&mut engine, b).is_overlapping(a);
    assert_eq!(forward, backward);
    forward
}

#[test]
fn test_circles_overlap_only_below_radius_sum() {
    assert!(circles_overlap(14.9, 0.0));
    assert!(!circles_overlap(15.0, 0.0));
    assert!(!circles_overlap(40.0, 0.0));
    assert!(circles_overlap(8.9, 12.0));
    assert!(!circles_overlap(9.0, 12.0));
}

#[test]
fn test_enter_and_exit_fire_once_per_episode() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let a = place(scene, ObjectTag::Player, 0.0, 0.0, Collider::circle(10.0).as_trigger());
    scene.attach_component_with(a, || Probe::new(&journal)).unwrap();
    let b = place(scene, ObjectTag::Item, 5.0, 0.0, Collider::circle(10.0).as_trigger());

    engine.fixed_tick().unwrap();
    assert_eq!(journal.count("enter"), 1);
    assert_eq!(journal.count("stay"), 1);
    let state = collider(&mut engine, a);
    assert!(state.had_event(TriggerPhase::Enter, b));
    assert!(state.is_triggering());
    assert!(state.trigger_start_point().is_some());
    assert!(state.trigger_end_point().is_none());

    engine.fixed_tick().unwrap();
    assert_eq!(journal.count("enter"), 1);
    assert_eq!(journal.count("stay"), 2);
    assert!(!collider(&mut engine, a).had_event(TriggerPhase::Enter, b));

    move_to(&mut engine, b, 100.0, 0.0);
    engine.fixed_tick().unwrap();
    assert_eq!(journal.count("exit"), 1);
    assert_eq!(journal.count("stay"), 2);
    let state = collider(&mut engine, a);
    assert!(!state.is_triggering());
    assert!(state.trigger_end_point().is_some());
    assert!(state.contact(b).unwrap().exit_point.is_some());

    engine.fixed_tick().unwrap();
    assert_eq!(journal.count("exit"), 1);

    move_to(&mut engine, b, 5.0, 0.0);
    engine.fixed_tick().unwrap();
    assert_eq!(journal.count("enter"), 2);
    assert!(collider(&mut engine, a).trigger_end_point().is_none());
}

#[test]
fn test_destroyed_partner_ends_the_episode() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let a = place(scene, ObjectTag::Player, 0.0, 0.0, Collider::circle(10.0).as_trigger());
    scene.attach_component_with(a, || Probe::new(&journal)).unwrap();
    let b = place(scene, ObjectTag::Bullet, 0.0, 5.0, Collider::circle(2.0));
    engine.fixed_tick().unwrap();

    current(&mut engine).destroy_object(b).unwrap();
    engine.fixed_tick().unwrap();

    assert_eq!(journal.count("exit"), 1);
    assert!(collider(&mut engine, a).contact(b).is_none());
    assert!(!collider(&mut engine, a).is_triggering());
}

#[test]
fn test_disabled_behavior_misses_trigger_events() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let a = place(scene, ObjectTag::Player, 0.0, 0.0, Collider::circle(10.0).as_trigger());
    scene.attach_component_with(a, || Probe::new(&journal)).unwrap();
    scene.set_enabled::<Probe>(a, false).unwrap();
    place(scene, ObjectTag::Enemy, 1.0, 0.0, Collider::circle(10.0));

    engine.fixed_tick().unwrap();
    assert_eq!(journal.count("enter"), 0);
    assert!(collider(&mut engine, a).is_triggering());
}

#[test]
fn test_same_tag_pairs_need_opt_in() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let a = place(scene, ObjectTag::Item, 0.0, 0.0, Collider::circle(10.0).as_trigger());
    let b = place(scene, ObjectTag::Item, 5.0, 0.0, Collider::circle(10.0).as_trigger());
    engine.fixed_tick().unwrap();
    assert!(!collider(&mut engine, a).is_overlapping(b));

    current(&mut engine).component_mut::<Collider>(a).unwrap().collide_same_tag = true;
    engine.fixed_tick().unwrap();
    assert!(collider(&mut engine, a).is_overlapping(b));
    // The filter is decided by the collider running the test
    assert!(!collider(&mut engine, b).is_overlapping(a));
}

#[test]
fn test_bounce_off_static_circle_lands_one_tick_later() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let ball = place(scene, ObjectTag::Item, 0.0, 0.0, Collider::circle(10.0));
    scene
        .attach_component_with(ball, || PhysicsBody::new().with_velocity(Vec2::new(100.0, 0.0)))
        .unwrap();
    let post = place(scene, ObjectTag::Wall, 15.0, 0.0, Collider::circle(10.0));
    scene.attach_component_with(post, || PhysicsBody::new().as_static()).unwrap();

    engine.fixed_tick().unwrap();
    assert_relative_eq!(velocity(&mut engine, ball), Vec2::new(100.0, 0.0));
    let pending = collider(&mut engine, ball).pending_velocity().unwrap();
    assert_relative_eq!(pending, Vec2::new(-100.0, 0.0), epsilon = 1e-9);
    assert!(collider(&mut engine, ball).collision_point().is_some());

    engine.fixed_tick().unwrap();
    assert_relative_eq!(velocity(&mut engine, ball), Vec2::new(-100.0, 0.0), epsilon = 1e-9);
    assert!(collider(&mut engine, ball).pending_velocity().is_none());
    assert_relative_eq!(velocity(&mut engine, post), Vec2::zeros());
}

#[test]
fn test_bounce_off_floor_keeps_tangential_velocity() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let ball = place(scene, ObjectTag::Item, 0.0, 0.0, Collider::circle(10.0));
    scene
        .attach_component_with(ball, || PhysicsBody::new().with_velocity(Vec2::new(30.0, 50.0)))
        .unwrap();
    let floor = place(scene, ObjectTag::Ground, 0.0, 15.0, Collider::rect(200.0, 20.0));
    scene.attach_component_with(floor, || PhysicsBody::new().as_static()).unwrap();

    engine.fixed_tick().unwrap();
    engine.fixed_tick().unwrap();
    assert_relative_eq!(velocity(&mut engine, ball), Vec2::new(30.0, -50.0), epsilon = 1e-9);
}

#[test]
fn test_triggers_never_change_velocity() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let ball = place(scene, ObjectTag::Item, 0.0, 0.0, Collider::circle(10.0));
    scene
        .attach_component_with(ball, || PhysicsBody::new().with_velocity(Vec2::new(100.0, 0.0)))
        .unwrap();
    let zone = place(scene, ObjectTag::Wall, 15.0, 0.0, Collider::circle(10.0).as_trigger());

    engine.fixed_tick().unwrap();
    engine.fixed_tick().unwrap();
    assert!(collider(&mut engine, ball).is_overlapping(zone));
    assert!(collider(&mut engine, ball).collision_point().is_none());
    assert_relative_eq!(velocity(&mut engine, ball), Vec2::new(100.0, 0.0));
}

#[test]
fn test_trigger_hooks_see_their_own_collider() {
    let journal = Journal::default();
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let a = place(scene, ObjectTag::Player, 0.0, 0.0, Collider::circle(10.0).as_trigger());
    scene.attach_component_with(a, || ColliderReader { journal: journal.clone() }).unwrap();
    let b = place(scene, ObjectTag::Enemy, 5.0, 0.0, Collider::circle(10.0).as_trigger());

    engine.fixed_tick().unwrap();
    move_to(&mut engine, b, 100.0, 0.0);
    engine.fixed_tick().unwrap();

    assert_eq!(
        journal.entries(),
        [
            "enter triggering=Some(true) start=Some(true)",
            "exit triggering=Some(false) end=Some(true)",
        ]
    );
}

#[test]
fn test_detached_collider_forgets_contact_geometry() {
    let mut engine = sandbox();
    let scene = current(&mut engine);
    let ball = place(scene, ObjectTag::Item, 0.0, 0.0, Collider::circle(10.0));
    scene
        .attach_component_with(ball, || PhysicsBody::new().with_velocity(Vec2::new(100.0, 0.0)))
        .unwrap();
    let post = place(scene, ObjectTag::Wall, 15.0, 0.0, Collider::circle(10.0));
    scene.attach_component_with(post, || PhysicsBody::new().as_static()).unwrap();
    engine.fixed_tick().unwrap();
    assert!(collider(&mut engine, ball).collision_point().is_some());

    let husk = current(&mut engine).detach_component::<Collider>(ball).unwrap().unwrap();
    assert!(!husk.is_triggering());
    assert!(husk.trigger_start_point().is_none());
    assert!(husk.trigger_end_point().is_none());
    assert!(husk.intersection_center().is_none());
    assert!(husk.collision_point().is_none());
    assert!(husk.pending_velocity().is_none());
    assert!(husk.events().is_empty());
}
