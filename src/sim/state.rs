//! Game session state and input commands
//!
//! The session owns every model and is the only thing that mutates them.
//! Input commands are accepted only in their matching phase; anything else is
//! ignored so duplicate or out-of-order input cannot break the machine.

use std::collections::VecDeque;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hero::{Gait, Hero};
use super::particles::ParticleField;
use super::platform::{Platform, PlatformSequence};
use super::rng::{RandomSource, RngState};
use super::stick::Stick;
use crate::consts::{DEFAULT_SEED, EFFECTS_STREAM, LEVEL_STREAM, MAX_QUEUED_EVENTS};
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::ConfigError;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Hero standing, waiting for a press
    #[default]
    Ready,
    /// Press held, stick getting longer
    GrowingStick,
    /// Press released, stick falling flat
    RotatingStick,
    /// Hero crossing the stick
    HeroWalking,
    /// Hero missed; frozen until restart
    GameOver,
}

/// Notable moments, queued for sound/UI cues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StickGrowing,
    StickFalling,
    /// Stick finished rotating; `tip` is its screen-space end
    StickLanded { tip: Vec2 },
    HeroLanded { x: f32, score: u32 },
    HeroFell { x: f32 },
    Restarted,
}

/// Configuration for starting a new session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Run seed; same seed and inputs give the same game
    pub seed: u64,
    pub tuning: Tuning,
    pub settings: Settings,
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// One game instance: the state machine plus everything it drives
#[derive(Debug, Clone)]
pub struct GameSession<R: RandomSource = Pcg32> {
    pub(super) phase: GamePhase,
    pub(super) score: u32,
    pub(super) stick: Option<Stick>,
    pub(super) hero: Hero,
    pub(super) platforms: PlatformSequence,
    pub(super) particles: ParticleField,
    pub(super) tuning: Tuning,
    pub(super) settings: Settings,
    pub(super) gait: Gait,
    /// Drives platform generation only
    pub(super) level_rng: R,
    /// Drives particle bursts only, so effects never shift the level layout
    pub(super) fx_rng: R,
    /// Bounded; the oldest event is dropped once full
    pub(super) events: VecDeque<GameEvent>,
}

impl GameSession<Pcg32> {
    /// Create a session with default tuning and settings
    pub fn new(seed: u64) -> Self {
        let config = SessionConfig::with_seed(seed);
        Self::from_parts(
            config.tuning,
            config.settings,
            RngState::new(seed, LEVEL_STREAM).to_rng(),
            RngState::new(seed, EFFECTS_STREAM).to_rng(),
        )
    }

    /// Create a session from a config, rejecting invalid tuning
    pub fn with_config(config: SessionConfig) -> Result<Self, ConfigError> {
        config.tuning.validate()?;
        Ok(Self::from_parts(
            config.tuning,
            config.settings,
            RngState::new(config.seed, LEVEL_STREAM).to_rng(),
            RngState::new(config.seed, EFFECTS_STREAM).to_rng(),
        ))
    }
}

impl Default for GameSession<Pcg32> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session with explicitly injected random sources
    pub fn with_rngs(
        tuning: Tuning,
        settings: Settings,
        level_rng: R,
        fx_rng: R,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::from_parts(tuning, settings, level_rng, fx_rng))
    }

    fn from_parts(tuning: Tuning, settings: Settings, mut level_rng: R, fx_rng: R) -> Self {
        let platforms = PlatformSequence::initial(&tuning, &mut level_rng);
        let hero = Hero::new(hero_anchor(&tuning, platforms.first()));
        log::info!(
            "New session: {} platforms, hero at ({:.1}, {:.1})",
            platforms.len(),
            hero.position.x,
            hero.position.y
        );
        Self {
            phase: GamePhase::Ready,
            score: 0,
            stick: None,
            hero,
            platforms,
            particles: ParticleField::new(settings.max_particles()),
            gait: Gait::new(&tuning, &settings),
            tuning,
            settings,
            level_rng,
            fx_rng,
            events: VecDeque::with_capacity(MAX_QUEUED_EVENTS),
        }
    }

    // === Commands ===

    /// Begin growing a stick. Legal only in `Ready`.
    ///
    /// Returns whether the press was accepted.
    pub fn on_press_start(&mut self) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }
        let Some(current) = self.platforms.current() else {
            return false;
        };
        self.stick = Some(Stick::new(Vec2::new(current.right(), current.y())));
        self.phase = GamePhase::GrowingStick;
        self.push_event(GameEvent::StickGrowing);
        true
    }

    /// Release the press and let the stick fall. Legal only in `GrowingStick`.
    pub fn on_press_end(&mut self) -> bool {
        if self.phase != GamePhase::GrowingStick {
            return false;
        }
        let Some(stick) = self.stick.as_mut() else {
            return false;
        };
        stick.start_rotating();
        log::debug!("Stick released at length {:.1}", stick.length);
        self.phase = GamePhase::RotatingStick;
        self.push_event(GameEvent::StickFalling);
        true
    }

    /// Start over after a miss. Legal only in `GameOver`.
    pub fn on_restart_requested(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        log::info!("Restart after scoring {}", self.score);
        self.score = 0;
        self.platforms.reset(&self.tuning, &mut self.level_rng);
        self.hero.reset(hero_anchor(&self.tuning, self.platforms.first()));
        self.particles.clear();
        self.stick = None;
        self.phase = GamePhase::Ready;
        self.push_event(GameEvent::Restarted);
        true
    }

    /// Swap presentation settings (particle cap, bob) mid-game
    pub fn apply_settings(&mut self, settings: Settings) {
        self.gait = Gait::new(&self.tuning, &settings);
        self.particles.set_max_particles(settings.max_particles());
        self.settings = settings;
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stick(&self) -> Option<&Stick> {
        self.stick.as_ref()
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn platforms(&self) -> &[Platform] {
        self.platforms.as_slice()
    }

    /// Live particles in spawn order
    pub fn particles(&self) -> impl Iterator<Item = &super::particles::Particle> {
        self.particles.live()
    }

    pub fn particle_field(&self) -> &ParticleField {
        &self.particles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take every event queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Where the hero stands on a given platform
    pub fn standing_point(&self, platform: &Platform) -> Vec2 {
        hero_anchor(&self.tuning, Some(platform))
    }
}

/// Hero standing point on `platform`: a fixed inset from its right edge
fn hero_anchor(tuning: &Tuning, platform: Option<&Platform>) -> Vec2 {
    let right = platform
        .map(|p| p.right())
        .unwrap_or(tuning.first_platform_x + tuning.first_platform_width);
    Vec2::new(right - tuning.hero_inset, tuning.hero_standing_y())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    #[test]
    fn test_new_session_layout() {
        let session = GameSession::new(12345);
        assert_eq!(session.phase(), GamePhase::Ready);
        assert_eq!(session.score(), 0);
        assert!(session.stick().is_none());
        assert_eq!(session.platforms().len(), 2);
        assert_eq!(session.hero().position, Vec2::new(120.0, 310.0));
        assert_eq!(session.particles().count(), 0);
    }

    #[test]
    fn test_press_start_anchors_stick_on_current_platform() {
        let mut session = GameSession::new(1);
        assert!(session.on_press_start());
        assert_eq!(session.phase(), GamePhase::GrowingStick);
        let stick = session.stick().unwrap();
        assert_eq!(stick.base, Vec2::new(150.0, 350.0));
        assert_eq!(stick.length, 0.0);
        assert!(stick.is_growing());
    }

    #[test]
    fn test_out_of_phase_input_ignored() {
        let mut session = GameSession::new(1);
        assert!(!session.on_press_end());
        assert!(!session.on_restart_requested());
        assert_eq!(session.phase(), GamePhase::Ready);

        assert!(session.on_press_start());
        assert!(!session.on_press_start());
        assert!(session.on_press_end());
        assert!(!session.on_press_end());
        assert!(!session.on_press_start());
        assert_eq!(session.phase(), GamePhase::RotatingStick);
    }

    #[test]
    fn test_events_drained_in_order() {
        let mut session = GameSession::new(1);
        session.on_press_start();
        session.on_press_end();
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::StickGrowing, GameEvent::StickFalling]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut session = GameSession::new(9);
        for _ in 0..200 {
            session.on_press_start();
            session.on_press_end();
            for _ in 0..100 {
                session.update(0.1);
                if matches!(session.phase(), GamePhase::Ready | GamePhase::GameOver) {
                    break;
                }
            }
            session.on_restart_requested();
        }
        assert_eq!(session.events.len(), MAX_QUEUED_EVENTS);

        let events = session.drain_events();
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        // Newest survive: the last round ended in a restart
        assert_eq!(events.last(), Some(&GameEvent::Restarted));
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_with_config_rejects_bad_tuning() {
        let config = SessionConfig {
            tuning: Tuning {
                min_width: 120.0,
                max_width: 60.0,
                ..Default::default()
            },
            ..SessionConfig::with_seed(4)
        };
        assert!(matches!(
            GameSession::with_config(config),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_settings_cap_particles() {
        let config = SessionConfig {
            settings: Settings::from_preset(QualityPreset::Low),
            ..SessionConfig::with_seed(4)
        };
        let mut session = GameSession::with_config(config).unwrap();
        assert_eq!(session.particle_field().max_particles(), 100);

        session.apply_settings(Settings {
            particles: false,
            ..Default::default()
        });
        assert_eq!(session.particle_field().max_particles(), 0);
    }

    #[test]
    fn test_default_session_uses_default_seed() {
        let a = GameSession::default();
        let b = GameSession::new(DEFAULT_SEED);
        assert_eq!(a.platforms(), b.platforms());
    }
}
