//! Demo scene: a handful of bouncers

use ecs_kernel::prelude::*;

use crate::bouncer::{random_velocity, Bouncer, BouncerBehavior};

/// Number of bouncers spawned at start
const BOUNCERS: usize = 15;

/// Scene that fills the surface with bouncers
///
/// Pressing space throws every bouncer in a new random direction.
#[derive(Debug, Default)]
pub struct ExampleScene {
    bouncers: Vec<ObjectId>,
}

impl ExampleScene {
    /// Total respawns across all bouncers
    pub fn respawns(&self, scene: &Scene) -> u32 {
        self.bouncers
            .iter()
            .filter_map(|&id| scene.component::<BouncerBehavior>(id))
            .map(BouncerBehavior::respawns)
            .sum()
    }
}

impl SceneScript for ExampleScene {
    fn start(&mut self, scene: &mut Scene) -> Result<(), EngineError> {
        for _ in 0..BOUNCERS {
            self.bouncers.push(scene.instantiate::<Bouncer>()?);
        }
        log::info!("Spawned {} bouncers in {}", self.bouncers.len(), scene.name());
        Ok(())
    }

    fn interact(&mut self, scene: &mut Scene) -> Result<(), EngineError> {
        if scene.input_mut().take_key() != Some(KeyCode::Space) {
            return Ok(());
        }
        let mut rng = rand::thread_rng();
        for &id in &self.bouncers {
            if let Some(body) = scene.component_mut::<PhysicsBody>(id) {
                body.velocity = random_velocity(&mut rng);
            }
        }
        log::info!("Scattered {} bouncers", self.bouncers.len());
        Ok(())
    }
}
