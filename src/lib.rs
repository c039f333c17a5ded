//! Stick Hero - headless simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stick, hero, platforms, particles, session)
//! - `tuning`: Data-driven gameplay constants
//! - `settings`: Presentation preferences that shape visual effects

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use sim::{GameEvent, GamePhase, GameSession, RenderSnapshot, SessionConfig};
pub use tuning::Tuning;

use thiserror::Error;

/// Fixed constants that are not part of the tunable data
pub mod consts {
    /// Angle at which the stick lies flat (degrees)
    pub const STICK_FLAT_DEGREES: f32 = 90.0;

    /// Number of platforms the level starts (and restarts) with
    pub const INITIAL_PLATFORM_COUNT: usize = 2;

    /// Default run seed when the driver supplies none
    pub const DEFAULT_SEED: u64 = 0x5EED_5717_C4E0;

    /// Events kept for the presentation layer; older ones are dropped first
    pub const MAX_QUEUED_EVENTS: usize = 64;

    /// PCG stream for level generation
    pub const LEVEL_STREAM: u64 = 1;
    /// PCG stream for cosmetic effects (particles)
    pub const EFFECTS_STREAM: u64 = 2;
}

/// Failure to load or validate configuration data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid range for {name}: min {min} > max {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// Caller contract violations on the simulation API
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    #[error("timestep must be finite and non-negative, got {0}")]
    InvalidTimestep(f32),
}

/// Convert HSV (hue in degrees, saturation/value in 0-1) to linear RGB
#[inline]
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}
