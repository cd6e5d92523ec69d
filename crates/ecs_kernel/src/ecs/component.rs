//! Component trait, update tags and component identity
//!
//! Every component belongs to exactly one [`UpdateTag`], fixed when it is
//! constructed. The tag decides which scheduler passes see the component and
//! in what order. Behaviors are components that additionally expose the
//! [`Behavior`] capability through [`Component::as_behavior`].

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ecs::context::ComponentContext;
use crate::ecs::object::ObjectId;
use crate::physics::collision::TriggerEvent;
use crate::render::RenderSurface;

/// Upcasting support for trait objects
pub trait AsAny: Any {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert a box into `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Update-order category of a component
///
/// Passes always visit tags in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpdateTag {
    /// Object transforms
    Transform = 0,
    /// Rigid bodies
    Physics = 1,
    /// Colliders
    Collision = 2,
    /// Game logic
    Behavior = 3,
    /// Drawables, only touched by the render tick
    Render = 4,
}

impl UpdateTag {
    /// Every tag, in update order
    pub const ALL: [Self; 5] = [
        Self::Transform,
        Self::Physics,
        Self::Collision,
        Self::Behavior,
        Self::Render,
    ];

    /// Position of the tag in update order
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Runtime identity of a component type
#[derive(Clone, Copy)]
pub struct ComponentKind {
    id: TypeId,
    name: &'static str,
}

impl ComponentKind {
    /// Kind of the component type `T`
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Whether this kind is the type `T`
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Fully qualified type name, for diagnostics
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentKind {}

impl Hash for ComponentKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One attached component instance: owning object plus component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    /// Owning object
    pub object: ObjectId,
    /// Component type
    pub kind: ComponentKind,
}

impl ComponentKey {
    /// Key of component type `T` on `object`
    pub fn of<T: Any>(object: ObjectId) -> Self {
        Self { object, kind: ComponentKind::of::<T>() }
    }
}

/// Common lifecycle capability of every component
///
/// Hooks receive a [`ComponentContext`], the component's only route to its
/// owning object, its Transform and its siblings. A context exists only while
/// the component is attached. While a hook runs the component itself is
/// checked out of its object, so looking itself up through the context
/// yields `None`.
pub trait Component: AsAny {
    /// Update tag, fixed for the lifetime of the instance
    fn tag(&self) -> UpdateTag;

    /// Called synchronously when attached to an object
    fn on_attached(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Called once, on the logic tick after the component became live
    fn start(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Refresh state derived from the Transform
    fn transform_update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Per logic tick
    fn update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Per fixed tick
    fn fixed_update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Called synchronously when detached or when the object is destroyed
    fn on_detached(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Draw ordering key; lower values are drawn first
    fn render_order(&self) -> i32 {
        0
    }

    /// Emit draw commands for this component
    fn draw(&self, _object: ObjectId, _surface: &mut dyn RenderSurface) {}

    /// Enable/disable and trigger capability, if this component has it
    fn as_behavior(&mut self) -> Option<&mut dyn Behavior> {
        None
    }
}

impl dyn Component {
    /// Downcast to a concrete component type
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete component type
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Game logic capability of a component
///
/// A behavior can be enabled and disabled; disabled behaviors are skipped by
/// the update, late update and fixed passes and receive no trigger events.
pub trait Behavior {
    /// Per logic tick, after the scene's interaction hook
    fn late_update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// The behavior was enabled
    fn on_enable(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// The behavior was disabled
    fn on_disable(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// A collider on this object started overlapping another
    fn on_trigger_enter(&mut self, _ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {}

    /// A collider on this object overlaps another this fixed tick
    fn on_trigger_stay(&mut self, _ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {}

    /// A collider on this object stopped overlapping another
    fn on_trigger_exit(&mut self, _ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {}
}
