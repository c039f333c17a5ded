//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-driven timestep only (no clocks, no threads)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod hero;
pub mod landing;
pub mod particles;
pub mod platform;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod stick;
pub mod tick;

pub use hero::{Gait, Hero, HeroMotion};
pub use landing::{LandingResult, resolve_landing};
pub use particles::{Burst, BurstSpec, Particle, ParticleField, ParticleKind};
pub use platform::{Platform, PlatformSequence};
pub use rng::{RandomSource, RngState};
pub use snapshot::{HeroView, ParticleView, RenderSnapshot, StickView};
pub use state::{GameEvent, GamePhase, GameSession, SessionConfig};
pub use stick::{Stick, StickPhase};
