//! Core kernel configuration types

pub mod config;

pub use config::{EngineConfig, PhysicsConfig, SurfaceConfig, TimingConfig};
