//! # Scene Registry
//!
//! Holds every scene in insertion order, keyed by script type, and tracks
//! the current one. Scene lifecycle hooks (start, sleep, activate) are queued
//! here and run at the start of the next logic tick, before the current
//! scene's own deferred actions.

use crate::core::config::EngineConfig;
use crate::ecs::commands::{CommandQueue, SceneCommand};
use crate::engine::EngineError;
use crate::foundation::math::Real;
use crate::render::RenderSurface;
use crate::scene::{Scene, SceneId, SceneScript};

struct SceneEntry {
    scene: Scene,
    /// `None` while one of the script's hooks is running
    script: Option<Box<dyn SceneScript>>,
}

/// All scenes of a game and the pointer to the current one
pub struct SceneRegistry {
    config: EngineConfig,
    entries: Vec<SceneEntry>,
    current: Option<usize>,
    actions: CommandQueue<SceneCommand>,
}

impl SceneRegistry {
    /// Create an empty registry; scenes are built with `config`
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            current: None,
            actions: CommandQueue::new(),
        }
    }

    /// Add the scene driven by a default-constructed `S`
    pub fn add_scene<S: SceneScript + Default>(&mut self) -> SceneId {
        self.add_scene_with(S::default())
    }

    /// Add the scene driven by `script`
    ///
    /// Adding a scene type twice is a no-op. The first scene added becomes
    /// current. The scene's `start` runs on the next logic tick.
    pub fn add_scene_with<S: SceneScript>(&mut self, script: S) -> SceneId {
        let id = SceneId::of::<S>();
        if self.position(id).is_some() {
            log::debug!("Scene {id} already registered");
            return id;
        }

        self.entries.push(SceneEntry {
            scene: Scene::new(id, &self.config),
            script: Some(Box::new(script)),
        });
        self.actions.push(SceneCommand::Start(id));
        if self.current.is_none() {
            self.current = Some(self.entries.len() - 1);
            self.actions.push(SceneCommand::Activate(id));
        }
        log::info!("Registered scene {id}");
        id
    }

    /// Make the scene driven by `S` current
    pub fn set_active_scene<S: SceneScript>(&mut self) -> Result<(), EngineError> {
        self.set_active(SceneId::of::<S>())
    }

    /// Make `target` current
    ///
    /// Queues `on_sleep` of the previous scene and `on_active` of `target`
    /// for the next logic tick and carries the input state across. The
    /// current pointer moves immediately.
    pub fn set_active(&mut self, target: SceneId) -> Result<(), EngineError> {
        let index = self
            .position(target)
            .ok_or(EngineError::SceneNotFound { scene: target.name() })?;

        if let Some(previous) = self.current {
            let input = self.entries[previous].scene.input().clone();
            self.actions.push(SceneCommand::Sleep(self.entries[previous].scene.id()));
            self.entries[index].scene.carry_input(input);
        }
        self.actions.push(SceneCommand::Activate(target));
        self.current = Some(index);
        log::info!("Switched current scene to {target}");
        Ok(())
    }

    /// Whether the scene driven by `S` was added
    pub fn contains<S: SceneScript>(&self) -> bool {
        self.position(SceneId::of::<S>()).is_some()
    }

    /// Identity of the current scene
    pub fn current_id(&self) -> Option<SceneId> {
        self.current.map(|index| self.entries[index].scene.id())
    }

    /// Current scene
    pub fn current(&self) -> Option<&Scene> {
        self.current.map(|index| &self.entries[index].scene)
    }

    /// Mutable current scene
    pub fn current_mut(&mut self) -> Option<&mut Scene> {
        let index = self.current?;
        Some(&mut self.entries[index].scene)
    }

    /// Scene by identity
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.position(id).map(|index| &self.entries[index].scene)
    }

    /// Mutable scene by identity
    pub fn get_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        let index = self.position(id)?;
        Some(&mut self.entries[index].scene)
    }

    /// Scene driven by `S`
    pub fn scene<S: SceneScript>(&self) -> Option<&Scene> {
        self.get(SceneId::of::<S>())
    }

    /// Mutable scene driven by `S`
    pub fn scene_mut<S: SceneScript>(&mut self) -> Option<&mut Scene> {
        self.get_mut(SceneId::of::<S>())
    }

    /// Script of the scene driven by `S`
    pub fn script<S: SceneScript>(&self) -> Option<&S> {
        let index = self.position(SceneId::of::<S>())?;
        self.entries[index].script.as_deref()?.as_any().downcast_ref::<S>()
    }

    /// Mutable script of the scene driven by `S`
    pub fn script_mut<S: SceneScript>(&mut self) -> Option<&mut S> {
        let index = self.position(SceneId::of::<S>())?;
        self.entries[index].script.as_deref_mut()?.as_any_mut().downcast_mut::<S>()
    }

    /// Scene identities in insertion order
    pub fn ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.entries.iter().map(|entry| entry.scene.id())
    }

    /// Number of scenes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no scene was added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scene lifecycle actions awaiting the next logic tick
    pub fn pending_actions(&self) -> &CommandQueue<SceneCommand> {
        &self.actions
    }

    fn position(&self, id: SceneId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.scene.id() == id)
    }

    fn current_index(&self) -> Result<usize, EngineError> {
        self.current.ok_or(EngineError::NoActiveScene)
    }

    /// Run one script hook of the scene at `index`
    fn run_script(
        &mut self,
        index: usize,
        hook: impl FnOnce(&mut dyn SceneScript, &mut Scene) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        let entry = &mut self.entries[index];
        let Some(mut script) = entry.script.take() else {
            return Ok(());
        };
        let result = hook(&mut *script, &mut entry.scene);
        entry.script = Some(script);
        result.and_then(|()| entry.scene.check_fault())
    }

    fn drain_scene_actions(&mut self) -> Result<(), EngineError> {
        let mut batch = self.actions.drain_snapshot().into_iter();
        while let Some(command) = batch.next() {
            if let Err(error) = self.run_scene_command(command) {
                // The failed action is spent; the rest of the batch runs next tick
                self.actions.requeue_front(batch.collect());
                return Err(error);
            }
        }
        Ok(())
    }

    fn run_scene_command(&mut self, command: SceneCommand) -> Result<(), EngineError> {
        let (SceneCommand::Start(id) | SceneCommand::Sleep(id) | SceneCommand::Activate(id)) = command;
        let Some(index) = self.position(id) else {
            return Ok(());
        };
        match command {
            SceneCommand::Start(_) => {
                log::debug!("Starting scene {id}");
                self.run_script(index, |script, scene| script.start(scene))
            }
            SceneCommand::Sleep(_) => {
                log::info!("Scene {id} going to sleep");
                self.entries[index].scene.set_active(false);
                self.run_script(index, |script, scene| script.on_sleep(scene))
            }
            SceneCommand::Activate(_) => {
                log::info!("Scene {id} activated");
                self.entries[index].scene.set_active(true);
                self.run_script(index, |script, scene| script.on_active(scene))
            }
        }
    }

    /// One logic tick of the current scene
    pub(crate) fn logic_tick(&mut self, delta_time: Real) -> Result<(), EngineError> {
        self.current_index()?;
        self.drain_scene_actions()?;

        let index = self.current_index()?;
        log::trace!("Logic tick of {} ({delta_time:.4}s)", self.entries[index].scene.name());
        {
            let scene = &mut self.entries[index].scene;
            scene.begin_logic_tick(delta_time);
            scene.drain_actions()?;
            scene.check_fault()?;
            scene.transform_pass();
            scene.check_fault()?;
            scene.update_pass();
            scene.check_fault()?;
        }
        self.run_script(index, |script, scene| script.interact(scene))?;
        {
            let scene = &mut self.entries[index].scene;
            scene.late_update_pass();
            scene.check_fault()?;
        }

        if let Some(target) = self.entries[index].scene.take_transition() {
            self.set_active(target)?;
        }
        Ok(())
    }

    /// One fixed tick of the current scene
    pub(crate) fn fixed_tick(&mut self, fixed_delta_time: Real) -> Result<(), EngineError> {
        let index = self.current_index()?;
        let scene = &mut self.entries[index].scene;
        scene.fixed_pass(fixed_delta_time);
        scene.check_fault()
    }

    /// One render tick of the current scene
    pub(crate) fn render_tick(&mut self, surface: &mut dyn RenderSurface) -> Result<(), EngineError> {
        let index = self.current_index()?;
        self.entries[index].scene.render_pass(surface);
        Ok(())
    }
}

impl std::fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("scenes", &self.ids().collect::<Vec<_>>())
            .field("current", &self.current_id())
            .finish_non_exhaustive()
    }
}
