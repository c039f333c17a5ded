//! The walking character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::tuning::Tuning;

/// Hero movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroMotion {
    /// Standing on a platform
    Idle,
    /// Crossing the stick
    Walking,
    /// Reached the end of the walk (landing not yet applied or frozen on game over)
    Arrived,
}

/// Walk parameters derived from tuning and presentation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gait {
    pub speed: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub frame_duration: f32,
    pub frames: u32,
}

impl Gait {
    pub fn new(tuning: &Tuning, settings: &Settings) -> Self {
        Self {
            speed: tuning.walk_speed,
            bob_amplitude: if settings.hero_bob_enabled() {
                tuning.bob_amplitude
            } else {
                0.0
            },
            bob_frequency: tuning.bob_frequency,
            frame_duration: tuning.walk_frame_duration,
            frames: tuning.walk_frames.max(1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub position: Vec2,
    /// Where the current (or last) walk started
    pub walk_origin: Vec2,
    pub walk_target_distance: f32,
    pub walked_distance: f32,
    pub motion: HeroMotion,
    /// Seconds spent in the current walk (drives the bob)
    pub anim_time: f32,
    /// Current walk cycle frame
    pub walk_frame: u32,
    frame_timer: f32,
}

impl Hero {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            walk_origin: position,
            walk_target_distance: 0.0,
            walked_distance: 0.0,
            motion: HeroMotion::Idle,
            anim_time: 0.0,
            walk_frame: 0,
            frame_timer: 0.0,
        }
    }

    /// Step onto `from_x` (the stick base) and walk `distance` pixels right
    pub fn start_walking(&mut self, from_x: f32, distance: f32) {
        self.walk_origin = Vec2::new(from_x, self.position.y);
        self.position = self.walk_origin;
        self.walk_target_distance = distance.max(0.0);
        self.walked_distance = 0.0;
        self.anim_time = 0.0;
        self.motion = HeroMotion::Walking;
    }

    /// Advance the walk. Returns true on the step where the hero arrives.
    pub fn walk(&mut self, dt: f32, gait: &Gait) -> bool {
        if self.motion != HeroMotion::Walking {
            return false;
        }

        self.anim_time += dt;
        self.frame_timer += dt;
        if self.frame_timer >= gait.frame_duration {
            self.walk_frame = (self.walk_frame + 1) % gait.frames;
            self.frame_timer = 0.0;
        }

        self.walked_distance += gait.speed * dt;
        if self.walked_distance >= self.walk_target_distance {
            self.walked_distance = self.walk_target_distance;
            self.position = self.walk_target();
            self.motion = HeroMotion::Arrived;
            return true;
        }

        let bob = (self.anim_time * gait.bob_frequency).sin() * gait.bob_amplitude;
        self.position = Vec2::new(
            self.walk_origin.x + self.walked_distance,
            self.walk_origin.y + bob,
        );
        false
    }

    /// Where the current walk ends
    #[inline]
    pub fn walk_target(&self) -> Vec2 {
        self.walk_origin + Vec2::new(self.walk_target_distance, 0.0)
    }

    /// Fraction of the walk covered, 0-1
    pub fn walk_progress(&self) -> f32 {
        if self.walk_target_distance <= 0.0 {
            return if self.motion == HeroMotion::Walking { 0.0 } else { 1.0 };
        }
        (self.walked_distance / self.walk_target_distance).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_walking(&self) -> bool {
        self.motion == HeroMotion::Walking
    }

    #[inline]
    pub fn is_walk_complete(&self) -> bool {
        self.motion == HeroMotion::Arrived
    }

    /// Stand at `position` with no walk in progress
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.walk_origin = position;
        self.motion = HeroMotion::Idle;
    }

    /// Stand at `position` with every counter cleared
    pub fn reset(&mut self, position: Vec2) {
        *self = Self::new(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gait() -> Gait {
        Gait::new(&Tuning::default(), &Settings::default())
    }

    #[test]
    fn test_walk_reaches_target_exactly() {
        let mut hero = Hero::new(Vec2::new(120.0, 310.0));
        hero.start_walking(120.0, 60.0);
        assert!(!hero.walk(0.25, &gait()));
        assert_eq!(hero.walked_distance, 30.0);
        assert!(hero.walk(0.5, &gait()));
        assert_eq!(hero.walked_distance, 60.0);
        assert_eq!(hero.position, Vec2::new(180.0, 310.0));
        assert!(hero.is_walk_complete());
        assert_eq!(hero.walk_progress(), 1.0);
    }

    #[test]
    fn test_walk_starts_from_given_x() {
        let mut hero = Hero::new(Vec2::new(120.0, 310.0));
        hero.start_walking(150.0, 100.0);
        assert_eq!(hero.position, Vec2::new(150.0, 310.0));
        assert_eq!(hero.walk_target(), Vec2::new(250.0, 310.0));
        assert!(hero.walk(1.0, &gait()));
        assert_eq!(hero.position.x, 250.0);
    }

    #[test]
    fn test_bob_is_vertical_only() {
        let mut hero = Hero::new(Vec2::new(0.0, 310.0));
        hero.start_walking(0.0, 500.0);
        hero.walk(0.1, &gait());
        assert_eq!(hero.position.x, hero.walked_distance);
        assert!((hero.position.y - 310.0).abs() <= 2.0 + 1e-4);
        assert!(hero.position.y != 310.0);
    }

    #[test]
    fn test_reduced_motion_flattens_walk() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let gait = Gait::new(&Tuning::default(), &settings);
        let mut hero = Hero::new(Vec2::new(0.0, 310.0));
        hero.start_walking(0.0, 500.0);
        hero.walk(0.1, &gait);
        assert_eq!(hero.position.y, 310.0);
    }

    #[test]
    fn test_zero_length_walk_arrives_on_first_step() {
        let mut hero = Hero::new(Vec2::new(10.0, 0.0));
        hero.start_walking(10.0, 0.0);
        assert!(hero.walk(0.0, &gait()));
        assert_eq!(hero.position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_walk_frames_cycle() {
        let mut hero = Hero::new(Vec2::ZERO);
        hero.start_walking(0.0, 10_000.0);
        for _ in 0..5 {
            hero.walk(0.2, &gait());
        }
        // Four frames wrap back around after the fifth frame change
        assert_eq!(hero.walk_frame, 1);
    }

    #[test]
    fn test_walked_distance_monotonic() {
        let mut hero = Hero::new(Vec2::ZERO);
        hero.start_walking(0.0, 200.0);
        let mut last = 0.0;
        for dt in [0.01, 0.0, 0.3, 0.05, 0.7, 0.2] {
            hero.walk(dt, &gait());
            assert!(hero.walked_distance >= last);
            last = hero.walked_distance;
        }
    }

    #[test]
    fn test_walk_ignored_when_idle() {
        let mut hero = Hero::new(Vec2::new(5.0, 5.0));
        assert!(!hero.walk(1.0, &gait()));
        assert_eq!(hero.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut hero = Hero::new(Vec2::ZERO);
        hero.start_walking(0.0, 100.0);
        hero.walk(0.3, &gait());
        hero.reset(Vec2::new(120.0, 310.0));
        assert_eq!(hero.motion, HeroMotion::Idle);
        assert_eq!(hero.walked_distance, 0.0);
        assert_eq!(hero.walk_frame, 0);
        assert_eq!(hero.walk_origin, Vec2::new(120.0, 310.0));
    }
}
