//! Scenario tests driving whole scenes through the engine
//!
//! Shared fixtures live here: a [`Journal`] that components and scene
//! scripts write to, and a [`Probe`] behavior that records every hook.

mod collision;
mod lifecycle;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::config::EngineConfig;
use crate::ecs::component::{Behavior, Component, UpdateTag};
use crate::ecs::context::ComponentContext;
use crate::physics::collision::TriggerEvent;
use crate::scene::{Scene, SceneScript};
use crate::{Engine, EngineError};

/// Ordered log of hook invocations, shared between fixtures and the test
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.as_str() == entry).count()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Behavior that records its hooks
#[derive(Debug, Default)]
pub(crate) struct Probe {
    journal: Journal,
}

impl Probe {
    pub(crate) fn new(journal: &Journal) -> Self {
        Self { journal: journal.clone() }
    }
}

impl Component for Probe {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Behavior
    }

    fn start(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record("start");
    }

    fn update(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record("update");
    }

    fn fixed_update(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record("fixed");
    }

    fn on_detached(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record("detached");
    }

    fn as_behavior(&mut self) -> Option<&mut dyn Behavior> {
        Some(self)
    }
}

impl Behavior for Probe {
    fn late_update(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record("late");
    }

    fn on_enable(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record("enable");
    }

    fn on_disable(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record("disable");
    }

    fn on_trigger_enter(&mut self, _ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {
        self.journal.record("enter");
    }

    fn on_trigger_stay(&mut self, _ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {
        self.journal.record("stay");
    }

    fn on_trigger_exit(&mut self, _ctx: &mut ComponentContext<'_>, _event: &TriggerEvent) {
        self.journal.record("exit");
    }
}

/// Scene without game logic
#[derive(Debug, Default)]
pub(crate) struct Sandbox;

impl SceneScript for Sandbox {}

/// Engine with a started and active [`Sandbox`] scene
pub(crate) fn sandbox() -> Engine {
    sandbox_with(EngineConfig::default())
}

pub(crate) fn sandbox_with(config: EngineConfig) -> Engine {
    let mut engine = Engine::new(config).unwrap();
    engine.add_scene::<Sandbox>();
    engine.logic_tick(0.0).unwrap();
    engine
}

/// The current scene of an engine built by [`sandbox`]
pub(crate) fn current(engine: &mut Engine) -> &mut Scene {
    engine.current_scene_mut().unwrap()
}

/// Scene script whose `start` fails
#[derive(Debug, Default)]
pub(crate) struct Broken;

impl SceneScript for Broken {
    fn start(&mut self, _scene: &mut Scene) -> Result<(), EngineError> {
        Err(EngineError::Script("level data missing".to_string()))
    }
}
