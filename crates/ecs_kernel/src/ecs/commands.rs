//! Deferred one-shot actions
//!
//! Work scheduled from inside a tick (component start calls, scene lifecycle
//! hooks, deferred destruction) runs at the start of the following logic
//! tick. Draining takes a snapshot: anything enqueued while draining waits for
//! the next tick.

use std::collections::VecDeque;

use crate::ecs::component::ComponentKey;
use crate::ecs::object::ObjectId;
use crate::scene::SceneId;

/// Single-consumer FIFO of deferred actions
#[derive(Debug)]
pub struct CommandQueue<C> {
    pending: VecDeque<C>,
}

impl<C> Default for CommandQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CommandQueue<C> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self { pending: VecDeque::new() }
    }

    /// Enqueue an action
    pub fn push(&mut self, command: C) {
        self.pending.push_back(command);
    }

    /// Take every action queued so far, leaving the queue empty
    pub fn drain_snapshot(&mut self) -> Vec<C> {
        std::mem::take(&mut self.pending).into()
    }

    /// Put unprocessed actions back ahead of everything queued since
    pub fn requeue_front(&mut self, commands: Vec<C>) {
        for command in commands.into_iter().rev() {
            self.pending.push_front(command);
        }
    }

    /// Drop queued actions for which `keep` returns false
    pub fn retain(&mut self, keep: impl FnMut(&C) -> bool) {
        self.pending.retain(keep);
    }

    /// Number of queued actions
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate queued actions in execution order
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.pending.iter()
    }
}

/// Deferred action on an object of the owning scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectCommand {
    /// Run a component's `start` hook
    Start(ComponentKey),
    /// Destroy an object
    Destroy(ObjectId),
    /// Enable or disable a behavior
    SetEnabled {
        /// Target component
        key: ComponentKey,
        /// New flag
        enabled: bool,
    },
}

/// Deferred scene lifecycle action, owned by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Run the scene's `start` hook
    Start(SceneId),
    /// Put the scene to sleep and run `on_sleep`
    Sleep(SceneId),
    /// Mark the scene active and run `on_active`
    Activate(SceneId),
}
