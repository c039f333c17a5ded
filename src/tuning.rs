//! Data-driven gameplay constants
//!
//! Every number the simulation depends on lives here so a front end can ship
//! a JSON override without touching code. Defaults reproduce the classic feel.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Gameplay tuning values (world units are pixels, time is seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Stick ===
    /// Stick growth rate while the press is held (px/s)
    pub growth_speed: f32,
    /// Stick fall rate (degrees/s)
    pub rotation_speed: f32,
    /// Longest stick the player can grow
    pub max_stick_length: f32,

    // === Hero ===
    /// Horizontal walk speed (px/s)
    pub walk_speed: f32,
    /// Distance from a platform's right edge where the hero stands
    pub hero_inset: f32,
    /// Hero sprite height; the hero's y sits this far above the platform top
    pub hero_height: f32,
    /// Vertical bob amplitude while walking (cosmetic)
    pub bob_amplitude: f32,
    /// Bob angular frequency (rad/s)
    pub bob_frequency: f32,
    /// Seconds per walk animation frame
    pub walk_frame_duration: f32,
    /// Number of walk animation frames
    pub walk_frames: u32,

    // === Platforms ===
    pub min_gap: f32,
    pub max_gap: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub platform_height: f32,
    /// Top edge of every platform (y grows downward)
    pub platform_top: f32,
    /// Left edge of the starting platform
    pub first_platform_x: f32,
    /// Width of the starting platform
    pub first_platform_width: f32,

    // === Particles ===
    /// Downward acceleration (px/s²)
    pub particle_gravity: f32,
    /// Per-step velocity damping factor
    pub particle_drag: f32,

    // === Timing ===
    /// Largest dt a single update may integrate
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            growth_speed: 100.0,
            rotation_speed: 180.0,
            max_stick_length: 300.0,

            walk_speed: 120.0,
            hero_inset: 30.0,
            hero_height: 40.0,
            bob_amplitude: 2.0,
            bob_frequency: 8.0,
            walk_frame_duration: 0.2,
            walk_frames: 4,

            min_gap: 50.0,
            max_gap: 200.0,
            min_width: 50.0,
            max_width: 100.0,
            platform_height: 100.0,
            // 600px world, 150px ground strip, platform sits on the ground
            platform_top: 600.0 - 150.0 - 100.0,
            first_platform_x: 50.0,
            first_platform_width: 100.0,

            particle_gravity: 150.0,
            particle_drag: 0.98,

            max_frame_dt: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("growth_speed", self.growth_speed),
            ("rotation_speed", self.rotation_speed),
            ("max_stick_length", self.max_stick_length),
            ("walk_speed", self.walk_speed),
            ("walk_frame_duration", self.walk_frame_duration),
            ("min_width", self.min_width),
            ("platform_height", self.platform_height),
            ("first_platform_width", self.first_platform_width),
            ("particle_drag", self.particle_drag),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.walk_frames == 0 {
            return Err(ConfigError::NonPositive {
                name: "walk_frames",
                value: 0.0,
            });
        }

        let ranges = [
            ("gap", self.min_gap, self.max_gap),
            ("width", self.min_width, self.max_width),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvertedRange { name, min, max });
            }
        }

        Ok(())
    }

    /// Hero y coordinate when standing on a platform
    #[inline]
    pub fn hero_standing_y(&self) -> f32 {
        self.platform_top - self.hero_height
    }
}
