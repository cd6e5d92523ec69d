//! Trigger events
//!
//! Produced by a collider during its fixed update, one per partner and phase,
//! recorded on the collider and delivered to the enabled behaviors of the
//! collider's object.

use crate::ecs::object::ObjectId;
use crate::foundation::math::Vec2;

/// Phase of an overlap episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerPhase {
    /// First tick of the overlap
    Enter,
    /// Every tick of the overlap, including the first
    Stay,
    /// First tick without overlap
    Exit,
}

/// One trigger notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    /// Episode phase
    pub phase: TriggerPhase,
    /// The other object of the pair
    pub other: ObjectId,
    /// Intersection centroid; for exits the last one observed
    pub point: Vec2,
}
