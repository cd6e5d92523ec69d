//! Collision shapes and pairwise intersection
//!
//! Shapes are defined in object space and placed in the world from the
//! owning Transform. Circles scale by the largest absolute scale axis; boxes
//! are axis-aligned and ignore rotation.
//!
//! Overlap tests are strict: shapes that merely touch do not overlap. An
//! overlap reports the centre of the bounding box of the intersection
//! region, used as the contact point.

use crate::ecs::components::Transform;
use crate::foundation::math::{max_abs_component, normalize_or_none, Real, Vec2};

/// Object-space collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Circle centered on the object
    Circle {
        /// Unscaled radius
        radius: Real,
    },
    /// Axis-aligned box centered on the object
    Rect {
        /// Unscaled half width and half height
        half_extents: Vec2,
    },
}

impl Shape {
    /// Circle of the given radius
    pub fn circle(radius: Real) -> Self {
        Self::Circle { radius }
    }

    /// Box of the given full width and height
    pub fn rect(width: Real, height: Real) -> Self {
        Self::Rect { half_extents: Vec2::new(width * 0.5, height * 0.5) }
    }

    /// Place the shape in the world
    pub fn to_world(&self, transform: &Transform) -> WorldShape {
        match *self {
            Self::Circle { radius } => WorldShape::Circle {
                center: transform.position,
                radius: radius * max_abs_component(transform.scale),
            },
            Self::Rect { half_extents } => WorldShape::Rect(Aabb::from_center(
                transform.position,
                half_extents.component_mul(&transform.scale.abs()),
            )),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb {
    /// Box from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from center and half extents
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self { min: center - half_extents, max: center + half_extents }
    }

    /// Smallest box containing every point; `None` when empty
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => Self::new(p, p),
                Some(b) => Self::new(b.min.inf(&p), b.max.sup(&p)),
            })
        })
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half width and half height
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Whether `point` lies inside or on the boundary
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Strict overlap region of two boxes
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        (min.x < max.x && min.y < max.y).then(|| Self::new(min, max))
    }

    fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Collision shape placed in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// Circle
    Circle {
        /// Center
        center: Vec2,
        /// Scaled radius
        radius: Real,
    },
    /// Axis-aligned box
    Rect(Aabb),
}

impl WorldShape {
    /// Geometric center
    pub fn center(&self) -> Vec2 {
        match *self {
            Self::Circle { center, .. } => center,
            Self::Rect(aabb) => aabb.center(),
        }
    }

    /// Bounding box
    pub fn bounds(&self) -> Aabb {
        match *self {
            Self::Circle { center, radius } => Aabb::from_center(center, Vec2::new(radius, radius)),
            Self::Rect(aabb) => aabb,
        }
    }

    /// Whether `point` lies inside the shape or on its boundary
    pub fn contains_point(&self, point: Vec2) -> bool {
        match *self {
            Self::Circle { center, radius } => (point - center).norm_squared() <= radius * radius,
            Self::Rect(aabb) => aabb.contains(point),
        }
    }

    /// Outward unit normal of the surface facing `point`
    ///
    /// For a circle this is the direction from the center to `point`; for a
    /// box it is the face normal of the axis `point` is relatively furthest
    /// along. Undefined (`None`) at the center.
    pub fn normal_at(&self, point: Vec2) -> Option<Vec2> {
        match *self {
            Self::Circle { center, .. } => normalize_or_none(point - center),
            Self::Rect(aabb) => {
                let offset = point - aabb.center();
                let half = aabb.half_extents();
                if half.x <= 0.0 || half.y <= 0.0 {
                    return normalize_or_none(offset);
                }
                let (rx, ry) = (offset.x / half.x, offset.y / half.y);
                if rx == 0.0 && ry == 0.0 {
                    None
                } else if rx.abs() >= ry.abs() {
                    Some(Vec2::new(rx.signum(), 0.0))
                } else {
                    Some(Vec2::new(0.0, ry.signum()))
                }
            }
        }
    }

    /// Contact point of two overlapping shapes, `None` when they do not overlap
    pub fn intersect(&self, other: &Self) -> Option<Vec2> {
        match (*self, *other) {
            (Self::Circle { center: c1, radius: r1 }, Self::Circle { center: c2, radius: r2 }) => {
                circle_circle(c1, r1, c2, r2)
            }
            (Self::Rect(a), Self::Rect(b)) => a.intersection(&b).map(|region| region.center()),
            (Self::Circle { center, radius }, Self::Rect(aabb))
            | (Self::Rect(aabb), Self::Circle { center, radius }) => circle_rect(center, radius, &aabb),
        }
    }
}

fn in_disc(point: Vec2, center: Vec2, radius: Real) -> bool {
    (point - center).norm_squared() <= radius * radius
}

fn extremes(center: Vec2, radius: Real) -> [Vec2; 4] {
    [
        center + Vec2::new(radius, 0.0),
        center - Vec2::new(radius, 0.0),
        center + Vec2::new(0.0, radius),
        center - Vec2::new(0.0, radius),
    ]
}

/// Bounding-box centre of the lens shared by two discs
///
/// The lens boundary is two arcs; its extremes lie at the arc endpoints or at
/// axis-extreme points of one disc that fall inside the other.
fn circle_circle(c1: Vec2, r1: Real, c2: Vec2, r2: Real) -> Option<Vec2> {
    let offset = c2 - c1;
    let distance = offset.norm();
    if distance >= r1 + r2 {
        return None;
    }
    if distance + r2 <= r1 {
        return Some(c2);
    }
    if distance + r1 <= r2 {
        return Some(c1);
    }

    let axis = offset / distance;
    let along = (r1 * r1 - r2 * r2 + distance * distance) / (2.0 * distance);
    let half_chord = (r1 * r1 - along * along).max(0.0).sqrt();
    let chord_mid = c1 + axis * along;
    let perpendicular = Vec2::new(-axis.y, axis.x);

    let points = [chord_mid + perpendicular * half_chord, chord_mid - perpendicular * half_chord]
        .into_iter()
        .chain(extremes(c1, r1).into_iter().filter(|&p| in_disc(p, c2, r2)))
        .chain(extremes(c2, r2).into_iter().filter(|&p| in_disc(p, c1, r1)));
    Aabb::from_points(points).map(|bounds| bounds.center())
}

/// Bounding-box centre of a disc clipped by a box
///
/// Candidate extremes: box corners inside the disc, disc extremes inside the
/// box, and crossings of the circle with the box edges.
fn circle_rect(center: Vec2, radius: Real, aabb: &Aabb) -> Option<Vec2> {
    let closest = center.sup(&aabb.min).inf(&aabb.max);
    if (closest - center).norm_squared() >= radius * radius {
        return None;
    }

    let mut points: Vec<Vec2> = aabb.corners().into_iter().filter(|&p| in_disc(p, center, radius)).collect();
    points.extend(extremes(center, radius).into_iter().filter(|&p| aabb.contains(p)));

    for x in [aabb.min.x, aabb.max.x] {
        let dx = x - center.x;
        let reach = radius * radius - dx * dx;
        if reach >= 0.0 {
            let dy = reach.sqrt();
            for y in [center.y - dy, center.y + dy] {
                if y >= aabb.min.y && y <= aabb.max.y {
                    points.push(Vec2::new(x, y));
                }
            }
        }
    }
    for y in [aabb.min.y, aabb.max.y] {
        let dy = y - center.y;
        let reach = radius * radius - dy * dy;
        if reach >= 0.0 {
            let dx = reach.sqrt();
            for x in [center.x - dx, center.x + dx] {
                if x >= aabb.min.x && x <= aabb.max.x {
                    points.push(Vec2::new(x, y));
                }
            }
        }
    }

    // A disc strictly inside the box still contributes its extremes, so the
    // set is never empty here.
    Aabb::from_points(points).map(|bounds| bounds.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(x: Real, y: Real, radius: Real) -> WorldShape {
        WorldShape::Circle { center: Vec2::new(x, y), radius }
    }

    #[test]
    fn test_circle_overlap_is_strict() {
        assert!(circle(0.0, 0.0, 1.0).intersect(&circle(1.999, 0.0, 1.0)).is_some());
        assert!(circle(0.0, 0.0, 1.0).intersect(&circle(2.0, 0.0, 1.0)).is_none());
        assert!(circle(0.0, 0.0, 1.0).intersect(&circle(3.0, 4.0, 3.9)).is_none());
        assert!(circle(0.0, 0.0, 1.0).intersect(&circle(3.0, 4.0, 4.1)).is_some());
    }

    #[test]
    fn test_circle_lens_centroid() {
        let point = circle(0.0, 0.0, 1.0).intersect(&circle(1.5, 0.0, 1.0)).unwrap();
        assert_relative_eq!(point, Vec2::new(0.75, 0.0), epsilon = 1e-12);

        // Unequal radii along y: lens spans y in [1, 2]
        let point = circle(0.0, 0.0, 2.0).intersect(&circle(0.0, 2.0, 1.0)).unwrap();
        assert_relative_eq!(point.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(point.y, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_contained_circle_uses_inner_center() {
        let point = circle(0.0, 0.0, 5.0).intersect(&circle(1.0, 1.0, 1.0)).unwrap();
        assert_relative_eq!(point, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_rect_overlap_and_centroid() {
        let a = WorldShape::Rect(Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)));
        let b = WorldShape::Rect(Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(4.0, 3.0)));
        let touching = WorldShape::Rect(Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0)));
        assert_relative_eq!(a.intersect(&b).unwrap(), Vec2::new(1.5, 1.5));
        assert!(a.intersect(&touching).is_none());
    }

    #[test]
    fn test_circle_rect_overlap() {
        let wall = WorldShape::Rect(Aabb::new(Vec2::new(0.0, -10.0), Vec2::new(1.0, 10.0)));
        assert!(circle(-1.0, 0.0, 1.0).intersect(&wall).is_none());

        let point = circle(-0.5, 0.0, 1.0).intersect(&wall).unwrap();
        assert_relative_eq!(point.x, 0.25, epsilon = 1e-12);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-12);
        assert_eq!(wall.intersect(&circle(-0.5, 0.0, 1.0)), Some(point));
    }

    #[test]
    fn test_normals() {
        let disc = circle(0.0, 0.0, 2.0);
        assert_relative_eq!(disc.normal_at(Vec2::new(0.0, 0.5)).unwrap(), Vec2::new(0.0, 1.0));
        assert!(disc.normal_at(Vec2::zeros()).is_none());

        let wide = WorldShape::Rect(Aabb::from_center(Vec2::zeros(), Vec2::new(4.0, 1.0)));
        assert_eq!(wide.normal_at(Vec2::new(3.0, 0.5)), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(wide.normal_at(Vec2::new(1.0, -0.9)), Some(Vec2::new(0.0, -1.0)));
        assert!(wide.normal_at(Vec2::zeros()).is_none());
    }

    #[test]
    fn test_world_placement_applies_scale() {
        let transform = Transform::at(5.0, 5.0).with_uniform_scale(0.5);
        assert_eq!(
            Shape::circle(4.0).to_world(&Transform { scale: Vec2::new(2.0, -3.0), ..transform }),
            WorldShape::Circle { center: Vec2::new(5.0, 5.0), radius: 12.0 }
        );
        assert_eq!(
            Shape::rect(4.0, 2.0).to_world(&transform),
            WorldShape::Rect(Aabb::new(Vec2::new(4.0, 4.5), Vec2::new(6.0, 5.5)))
        );
    }
}
