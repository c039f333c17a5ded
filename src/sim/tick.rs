//! Per-frame simulation update
//!
//! Advances the session by one caller-supplied timestep. At most one phase
//! boundary is crossed per update, and dt is clamped so a stalled caller
//! cannot skip thresholds.

use glam::Vec2;

use super::landing::resolve_landing;
use super::particles::Burst;
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::SimError;

impl<R: RandomSource> GameSession<R> {
    /// Advance the simulation by `dt` seconds.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is negative or not finite; that is a caller bug.
    pub fn update(&mut self, dt: f32) {
        if let Err(err) = self.try_update(dt) {
            panic!("GameSession::update: {err}");
        }
    }

    /// Advance the simulation by `dt` seconds, reporting contract violations
    pub fn try_update(&mut self, dt: f32) -> Result<(), SimError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }
        let dt = if dt > self.tuning.max_frame_dt {
            log::warn!("Clamping dt {:.3}s to {:.3}s", dt, self.tuning.max_frame_dt);
            self.tuning.max_frame_dt
        } else {
            dt
        };

        // Effects keep animating in every phase, including game over
        self.particles
            .update(dt, self.tuning.particle_gravity, self.tuning.particle_drag);

        match self.phase {
            GamePhase::Ready | GamePhase::GameOver => {}
            GamePhase::GrowingStick => self.grow_stick(dt),
            GamePhase::RotatingStick => self.rotate_stick(dt),
            GamePhase::HeroWalking => self.walk_hero(dt),
        }

        Ok(())
    }

    fn grow_stick(&mut self, dt: f32) {
        if let Some(stick) = self.stick.as_mut() {
            stick.grow(dt, self.tuning.growth_speed, self.tuning.max_stick_length);
        }
    }

    fn rotate_stick(&mut self, dt: f32) {
        let Some(stick) = self.stick.as_mut() else {
            return;
        };
        if !stick.rotate(dt, self.tuning.rotation_speed) {
            return;
        }

        let tip = stick.world_tip();
        let (base_x, length) = (stick.base.x, stick.length);
        self.particles.spawn_burst(Burst::Impact, tip, &mut self.fx_rng);
        self.push_event(GameEvent::StickLanded { tip });

        self.hero.start_walking(base_x, length);
        self.phase = GamePhase::HeroWalking;
    }

    fn walk_hero(&mut self, dt: f32) {
        if self.hero.walk(dt, &self.gait) {
            self.resolve_walk();
        }
    }

    /// Walk finished: land on the next platform or fall
    fn resolve_walk(&mut self) {
        let (Some(stick), Some(target)) =
            (self.stick.as_ref(), self.platforms.target().copied())
        else {
            return;
        };
        let result = resolve_landing(self.hero.walk_origin.x, stick.length, &target);

        if result.landed {
            self.score += 1;
            let touchdown = Vec2::new(result.end_x, target.y());
            self.particles
                .spawn_burst(Burst::Success, touchdown, &mut self.fx_rng);
            self.particles.spawn_burst(Burst::Dust, touchdown, &mut self.fx_rng);

            let standing = self.standing_point(&target);
            self.hero.place(standing);
            self.platforms.generate_next(&self.tuning, &mut self.level_rng);
            self.stick = None;
            self.phase = GamePhase::Ready;

            log::info!("Landed at x={:.1}, score {}", result.end_x, self.score);
            self.push_event(GameEvent::HeroLanded {
                x: result.end_x,
                score: self.score,
            });
        } else {
            let fall_point = Vec2::new(result.end_x, self.hero.position.y);
            self.particles
                .spawn_burst(Burst::Fail, fall_point, &mut self.fx_rng);
            self.phase = GamePhase::GameOver;

            log::info!(
                "Missed at x={:.1} (target {:.1}..{:.1}), final score {}",
                result.end_x,
                target.x(),
                target.right(),
                self.score
            );
            self.push_event(GameEvent::HeroFell { x: result.end_x });
        }
    }
}
