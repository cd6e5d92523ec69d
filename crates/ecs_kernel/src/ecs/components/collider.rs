//! Collider component
//!
//! Configuration (shape, trigger-only flag, same-category opt-in) plus the
//! per-partner contact state the collision pipeline maintains across fixed
//! ticks. See [`crate::physics::collision`] for the pipeline itself.

use std::collections::BTreeMap;

use crate::ecs::component::{Component, UpdateTag};
use crate::ecs::components::Transform;
use crate::ecs::context::ComponentContext;
use crate::ecs::object::ObjectId;
use crate::foundation::math::{Real, Vec2};
use crate::physics::collision::detector;
use crate::physics::collision::{Shape, TriggerEvent, TriggerPhase, WorldShape};

/// Contact history with one partner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Intersection centroid on the first tick of the current or last episode
    pub entry_point: Vec2,
    /// Most recent intersection centroid
    pub latest_point: Vec2,
    /// Centroid recorded when the last episode ended
    pub exit_point: Option<Vec2>,
    /// Whether the pair overlapped on the last fixed tick
    pub overlapping: bool,
}

/// Shape-based collider with trigger events
///
/// A collider without a shape is inert. Trigger-only colliders report
/// overlaps but never cause velocity changes, on either side of a pair.
#[derive(Debug, Clone, Default)]
pub struct Collider {
    /// Object-space shape
    pub shape: Option<Shape>,
    /// Report overlaps without physical response
    pub is_trigger: bool,
    /// Also test partners of the same object category
    pub collide_same_tag: bool,
    pub(crate) world: Option<WorldShape>,
    pub(crate) contacts: BTreeMap<ObjectId, Contact>,
    pub(crate) triggering: bool,
    pub(crate) trigger_start: Option<Vec2>,
    pub(crate) trigger_end: Option<Vec2>,
    pub(crate) intersection_center: Option<Vec2>,
    pub(crate) collision_point: Option<Vec2>,
    pub(crate) pending_velocity: Option<Vec2>,
    pub(crate) events: Vec<TriggerEvent>,
}

impl Collider {
    /// Inert collider without a shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Collider with the given shape
    pub fn with_shape(shape: Shape) -> Self {
        Self { shape: Some(shape), ..Self::default() }
    }

    /// Circle collider
    pub fn circle(radius: Real) -> Self {
        Self::with_shape(Shape::circle(radius))
    }

    /// Axis-aligned box collider
    pub fn rect(width: Real, height: Real) -> Self {
        Self::with_shape(Shape::rect(width, height))
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Opt in to collisions with objects of the same category
    pub fn colliding_same_tag(mut self) -> Self {
        self.collide_same_tag = true;
        self
    }

    /// World-space shape as of the last refresh
    pub fn world_shape(&self) -> Option<WorldShape> {
        self.world
    }

    /// Whether `point` lies inside the world-space shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.world.is_some_and(|shape| shape.contains_point(point))
    }

    /// Whether the collider overlaps at least one partner
    pub fn is_triggering(&self) -> bool {
        self.triggering
    }

    /// Centroid where the current (or last) overlap streak began
    pub fn trigger_start_point(&self) -> Option<Vec2> {
        self.trigger_start
    }

    /// Last centroid of the previous overlap streak, cleared when a new one begins
    pub fn trigger_end_point(&self) -> Option<Vec2> {
        self.trigger_end
    }

    /// Most recent intersection centroid with any partner
    pub fn intersection_center(&self) -> Option<Vec2> {
        self.intersection_center
    }

    /// Contact point with the latest solid partner, while touching
    pub fn collision_point(&self) -> Option<Vec2> {
        self.collision_point
    }

    /// Velocity scheduled for the next fixed tick by collision resolution
    pub fn pending_velocity(&self) -> Option<Vec2> {
        self.pending_velocity
    }

    /// Contact history with `other`
    pub fn contact(&self, other: ObjectId) -> Option<&Contact> {
        self.contacts.get(&other)
    }

    /// Partners currently overlapping
    pub fn overlapping(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.contacts
            .iter()
            .filter(|(_, contact)| contact.overlapping)
            .map(|(&id, _)| id)
    }

    /// Whether the collider overlaps `other`
    pub fn is_overlapping(&self, other: ObjectId) -> bool {
        self.contacts.get(&other).is_some_and(|contact| contact.overlapping)
    }

    /// Trigger events of the last fixed tick
    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }

    /// Whether an event of `phase` with `other` happened on the last fixed tick
    pub fn had_event(&self, phase: TriggerPhase, other: ObjectId) -> bool {
        self.events.iter().any(|event| event.phase == phase && event.other == other)
    }

    pub(crate) fn refresh(&mut self, transform: &Transform) {
        self.world = self.shape.map(|shape| shape.to_world(transform));
    }
}

impl Component for Collider {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Collision
    }

    fn on_attached(&mut self, ctx: &mut ComponentContext<'_>) {
        self.refresh(ctx.transform());
    }

    fn transform_update(&mut self, ctx: &mut ComponentContext<'_>) {
        self.refresh(ctx.transform());
    }

    fn fixed_update(&mut self, ctx: &mut ComponentContext<'_>) {
        detector::step_collider(self, ctx);
    }

    fn on_detached(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.contacts.clear();
        self.events.clear();
        self.triggering = false;
        self.trigger_start = None;
        self.trigger_end = None;
        self.intersection_center = None;
        self.collision_point = None;
        self.pending_velocity = None;
    }
}
