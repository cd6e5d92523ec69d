//! Frame scheduling
//!
//! Three cadences run independently: the logic tick, the fixed physics tick
//! and the render tick. Each is measured from its own last fire, so firing
//! one never delays or resets another. The scheduler is a pure function of
//! the timestamps it is polled with; it never reads a clock.
//!
//! There is no catch-up: a cadence fires at most once per poll and its
//! timestamp is reset to the poll time.

use bitflags::bitflags;

use crate::core::config::TimingConfig;
use crate::foundation::math::Real;

bitflags! {
    /// Set of cadences that are due
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Cadence: u8 {
        /// Per-frame logic tick
        const LOGIC = 1 << 0;
        /// Fixed-step physics tick
        const FIXED = 1 << 1;
        /// Render tick (advisory, the host draws)
        const RENDER = 1 << 2;
    }
}

/// Result of one scheduler poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPlan {
    /// Cadences due at this poll
    pub due: Cadence,
    /// Seconds since the previous logic tick, meaningful when `LOGIC` is due
    pub logic_delta: Real,
}

#[derive(Debug, Clone, Copy, Default)]
struct Timeline {
    last_fire: Option<Real>,
}

impl Timeline {
    /// Returns the elapsed time if the cadence fired
    fn poll(&mut self, now: Real, interval: Real) -> Option<Real> {
        match self.last_fire {
            None => {
                self.last_fire = Some(now);
                None
            }
            Some(last) if now - last >= interval => {
                self.last_fire = Some(now);
                Some(now - last)
            }
            Some(_) => None,
        }
    }
}

/// Decides which ticks are due at a given time
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    timing: TimingConfig,
    logic: Timeline,
    fixed: Timeline,
    render: Timeline,
}

impl FrameScheduler {
    /// Create a scheduler; the first poll anchors every cadence
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            logic: Timeline::default(),
            fixed: Timeline::default(),
            render: Timeline::default(),
        }
    }

    /// Cadence configuration
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Anchor every cadence at `now` without firing anything
    pub fn start(&mut self, now: Real) {
        self.logic.last_fire = Some(now);
        self.fixed.last_fire = Some(now);
        self.render.last_fire = Some(now);
    }

    /// Whether the scheduler has been anchored
    pub fn is_started(&self) -> bool {
        self.logic.last_fire.is_some()
    }

    /// Report which cadences are due at `now` and mark them fired
    pub fn poll(&mut self, now: Real) -> TickPlan {
        let mut due = Cadence::empty();
        let mut logic_delta = 0.0;

        if let Some(elapsed) = self.logic.poll(now, self.timing.frame_interval) {
            due |= Cadence::LOGIC;
            logic_delta = elapsed;
        }
        if self.fixed.poll(now, self.timing.fixed_interval).is_some() {
            due |= Cadence::FIXED;
        }
        if self.render.poll(now, self.timing.render_interval).is_some() {
            due |= Cadence::RENDER;
        }

        log::trace!("Scheduler poll at {now:.4}s: {due:?}");
        TickPlan { due, logic_delta }
    }
}
