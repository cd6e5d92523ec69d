//! Headless sandbox
//!
//! Runs the bouncer scene for a few seconds of wall-clock time, presses space
//! once halfway through and logs what the render surface was asked to draw.
//! An optional argument names a TOML or RON file with an engine
//! configuration.

mod bouncer;
mod scene;

use std::path::PathBuf;
use std::time::Duration;

use ecs_kernel::prelude::*;

use crate::scene::ExampleScene;

/// Wall-clock seconds to simulate
const RUN_SECONDS: Real = 5.0;

/// Render surface that logs a summary of every frame
#[derive(Debug, Default)]
struct FrameLog {
    frames: u64,
    commands: usize,
}

impl RenderSurface for FrameLog {
    fn clear(&mut self) {
        if self.frames > 0 {
            log::trace!("Frame {}: {} draw commands", self.frames, self.commands);
        }
        self.frames += 1;
        self.commands = 0;
    }

    fn submit(&mut self, command: DrawCommand) {
        log::trace!("Draw {:?} at {:?}", command.visual, command.top_left());
        self.commands += 1;
    }
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            EngineConfig::load_from_file(path)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting sandbox");
    let mut engine = Engine::new(load_config()?)?;
    engine.add_scene::<ExampleScene>();

    // Stand-in for a keyboard: scatter the bouncers halfway through
    let mut input = ScriptedInput::new();
    input.push_key(KeyCode::Space);

    let clock = SystemClock::new();
    let mut surface = FrameLog::default();
    while clock.now() < RUN_SECONDS {
        if !input.is_drained() && clock.now() > RUN_SECONDS / 2.0 {
            engine.feed_input(&mut input)?;
        }
        if engine.pump(&clock)?.contains(Cadence::RENDER) {
            engine.render_tick(&mut surface)?;
        }
        std::thread::sleep(Duration::from_micros(500));
    }

    let stats = engine.stats();
    let respawns = match (engine.scenes().script::<ExampleScene>(), engine.current_scene()) {
        (Some(script), Some(scene)) => script.respawns(scene),
        _ => 0,
    };
    log::info!(
        "Sandbox finished: {} logic, {} fixed, {} render ticks, {} respawns",
        stats.logic_ticks,
        stats.fixed_ticks,
        stats.render_ticks,
        respawns
    );
    Ok(())
}
