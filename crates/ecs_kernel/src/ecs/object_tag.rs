//! Object categories used for same-category collision filtering
//!
//! Every object carries exactly one [`ObjectTag`]. Colliders skip partners
//! that share their category unless explicitly told otherwise, which keeps
//! e.g. bullets from colliding with each other by default.

/// Category of a game object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectTag {
    /// Player-controlled object
    Player,
    /// Hostile object
    Enemy,
    /// Projectile
    Bullet,
    /// Boundary wall
    Wall,
    /// Ground surface
    Ground,
    /// Platform surface
    Platform,
    /// Pickup or collectible
    Item,
    /// Application-defined category
    Custom(u16),
}

impl ObjectTag {
    /// Check if a collider on an object tagged `self` should test `other`
    ///
    /// Different categories always collide; the same category only when
    /// `allow_same_tag` is set on the initiating collider.
    pub fn should_collide(self, other: Self, allow_same_tag: bool) -> bool {
        self != other || allow_same_tag
    }
}
