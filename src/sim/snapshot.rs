//! Read-only view of a session for renderers
//!
//! Built on demand; nothing here assumes a frame cadence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::{Particle, ParticleKind};
use super::platform::Platform;
use super::rng::RandomSource;
use super::state::{GamePhase, GameSession};
use super::stick::Stick;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickView {
    pub base: Vec2,
    pub length: f32,
    pub rotation_degrees: f32,
    /// Screen-space tip (y down)
    pub tip: Vec2,
}

impl From<&Stick> for StickView {
    fn from(stick: &Stick) -> Self {
        Self {
            base: stick.base,
            length: stick.length,
            rotation_degrees: stick.rotation_degrees,
            tip: stick.world_tip(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroView {
    pub position: Vec2,
    pub walking: bool,
    pub walk_frame: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub size: f32,
    pub color: [f32; 4],
    pub kind: ParticleKind,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position,
            size: p.size,
            color: p.color,
            kind: p.kind,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub stick: Option<StickView>,
    pub hero: HeroView,
    pub platforms: Vec<Platform>,
    /// Live particles only
    pub particles: Vec<ParticleView>,
}

impl<R: RandomSource> GameSession<R> {
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            score: self.score,
            stick: self.stick.as_ref().map(StickView::from),
            hero: HeroView {
                position: self.hero.position,
                walking: self.hero.is_walking(),
                walk_frame: self.hero.walk_frame,
            },
            platforms: self.platforms.as_slice().to_vec(),
            particles: self.particles.live().map(ParticleView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{GamePhase, GameSession};

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = GameSession::new(31);
        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Ready);
        assert!(snap.stick.is_none());
        assert_eq!(snap.platforms.len(), 2);
        assert!(snap.particles.is_empty());

        session.on_press_start();
        session.update(0.5);
        let snap = session.snapshot();
        let stick = snap.stick.expect("stick while growing");
        assert_eq!(stick.length, 10.0);
        assert_eq!(stick.tip, stick.base - glam::Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(31);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Ready\""));
    }
}
