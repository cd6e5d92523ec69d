//! Time management utilities
//!
//! The scheduler never reads the wall clock itself; hosts hand it timestamps
//! from a [`Clock`]. [`SystemClock`] is the real-time source, [`ManualClock`]
//! lets tests and tools step time explicitly.

use std::cell::Cell;
use std::time::Instant;

use crate::foundation::math::Real;

/// Monotonic time source, in seconds
pub trait Clock {
    /// Seconds elapsed since an arbitrary fixed origin
    fn now(&self) -> Real;
}

/// Wall clock measured from the moment of construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock starting at zero now
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Real {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<Real>,
}

impl ManualClock {
    /// Create a clock at the given time
    pub fn new(start: Real) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Move the clock forward by `dt` seconds
    pub fn advance(&self, dt: Real) {
        self.now.set(self.now.get() + dt);
    }

    /// Jump to an absolute time
    pub fn set(&self, now: Real) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Real {
        self.now.get()
    }
}
