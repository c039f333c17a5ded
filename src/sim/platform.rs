//! Landing platforms and procedural level generation

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::INITIAL_PLATFORM_COUNT;
use crate::tuning::Tuning;

/// A rectangular platform; its top edge is the walking surface (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether `x` lies on the platform top, edges included
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x <= self.right()
    }

    /// Whether a point lies inside the platform rectangle, edges included
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.contains_x(x) && y >= self.y && y <= self.y + self.height
    }
}

/// Ordered, append-only list of platforms.
///
/// The last entry is always the target of the next jump and the one before it
/// is where the hero stands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSequence {
    platforms: Vec<Platform>,
}

impl PlatformSequence {
    /// Starting platform plus one generated target
    pub fn initial<R: RandomSource>(tuning: &Tuning, rng: &mut R) -> Self {
        let mut seq = Self {
            platforms: Vec::with_capacity(32),
        };
        seq.reset(tuning, rng);
        seq
    }

    /// Drop everything and rebuild the two-platform opening
    pub fn reset<R: RandomSource>(&mut self, tuning: &Tuning, rng: &mut R) {
        self.platforms.clear();
        self.platforms.push(Platform::new(
            tuning.first_platform_x,
            tuning.platform_top,
            tuning.first_platform_width,
            tuning.platform_height,
        ));
        while self.platforms.len() < INITIAL_PLATFORM_COUNT {
            self.generate_next(tuning, rng);
        }
    }

    /// Draw a gap and width and append the resulting platform
    pub fn generate_next<R: RandomSource>(&mut self, tuning: &Tuning, rng: &mut R) -> Platform {
        let gap = rng.range(tuning.min_gap, tuning.max_gap);
        let width = rng.range(tuning.min_width, tuning.max_width);
        self.push_after_last(gap, width)
    }

    /// Append a platform `gap` pixels past the last one, on the same baseline
    pub fn push_after_last(&mut self, gap: f32, width: f32) -> Platform {
        let platform = match self.platforms.last() {
            Some(last) => Platform::new(last.right() + gap, last.y, width, last.height),
            None => Platform::new(0.0, 0.0, width, 0.0),
        };
        log::debug!(
            "Platform #{}: x={:.1} width={:.1} (gap {:.1})",
            self.platforms.len(),
            platform.x,
            platform.width,
            gap
        );
        self.platforms.push(platform);
        platform
    }

    /// Platform the hero is standing on (second-to-last)
    pub fn current(&self) -> Option<&Platform> {
        self.platforms.len().checked_sub(2).map(|i| &self.platforms[i])
    }

    /// Platform the hero is trying to reach (last)
    pub fn target(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    pub fn first(&self) -> Option<&Platform> {
        self.platforms.first()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn as_slice(&self) -> &[Platform] {
        &self.platforms
    }
}
