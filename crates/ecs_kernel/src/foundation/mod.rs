//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the kernel:
//! - Math types and vector helpers
//! - Clocks for driving the frame scheduler
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
