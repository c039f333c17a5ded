//! Particle field for visual effects
//!
//! Purely cosmetic: nothing here feeds back into gameplay. Particles are
//! integrated in place and pruned in a single pass at the start of each
//! update, so a particle that dies during update N is dropped by update N+1
//! and filtered out of queries in between.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::hsv_to_rgb;

/// How a particle's look evolves over its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Shrinks and fades to nothing
    Spark,
    /// Swells to 1.5x while fading
    Dust,
    /// Fades at constant size
    Debris,
    /// Ignores gravity, fades at constant size
    Float,
}

/// Gameplay moment that emits a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Burst {
    /// Hero reached the next platform
    Success,
    /// Hero walked off the stick
    Fail,
    /// Hero's feet touching down
    Dust,
    /// Stick slapping down flat
    Impact,
}

/// Color source for a burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstColor {
    /// Random hue in degrees with fixed saturation/value
    Hue { min: f32, max: f32 },
    /// Constant RGBA
    Fixed([f32; 4]),
}

/// Spawn parameters for one burst type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpec {
    pub count: usize,
    pub kind: ParticleKind,
    /// Horizontal speed drawn from [-vx, vx]
    pub vx: f32,
    /// Vertical speed drawn between these (negative is up)
    pub vy: (f32, f32),
    pub color: BurstColor,
    pub size: (f32, f32),
    pub lifetime: (f32, f32),
}

const BURST_SATURATION: f32 = 0.8;
const BURST_VALUE: f32 = 0.9;

impl Burst {
    pub fn spec(self) -> BurstSpec {
        match self {
            Burst::Success => BurstSpec {
                count: 15,
                kind: ParticleKind::Spark,
                vx: 50.0,
                vy: (-20.0, -100.0),
                // Yellow to green
                color: BurstColor::Hue { min: 60.0, max: 120.0 },
                size: (3.0, 7.0),
                lifetime: (1.0, 2.5),
            },
            Burst::Fail => BurstSpec {
                count: 20,
                kind: ParticleKind::Spark,
                vx: 60.0,
                vy: (-10.0, -70.0),
                // Red to orange
                color: BurstColor::Hue { min: 0.0, max: 30.0 },
                size: (2.0, 7.0),
                lifetime: (1.5, 3.5),
            },
            Burst::Dust => BurstSpec {
                count: 8,
                kind: ParticleKind::Dust,
                vx: 20.0,
                vy: (0.0, -30.0),
                color: BurstColor::Fixed([139.0 / 255.0, 119.0 / 255.0, 101.0 / 255.0, 0.7]),
                size: (2.0, 5.0),
                lifetime: (0.5, 1.5),
            },
            Burst::Impact => BurstSpec {
                count: 5,
                kind: ParticleKind::Debris,
                vx: 15.0,
                vy: (0.0, -20.0),
                color: BurstColor::Fixed([165.0 / 255.0, 42.0 / 255.0, 42.0 / 255.0, 1.0]),
                size: (1.0, 3.0),
                lifetime: (0.3, 0.8),
            },
        }
    }
}

/// A single effect particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Current RGBA (alpha fades with age)
    pub color: [f32; 4],
    pub size: f32,
    pub age: f32,
    pub lifetime: f32,
    pub kind: ParticleKind,
    initial_size: f32,
    initial_alpha: f32,
}

impl Particle {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        color: [f32; 4],
        size: f32,
        lifetime: f32,
        kind: ParticleKind,
    ) -> Self {
        Self {
            position,
            velocity,
            color,
            size,
            age: 0.0,
            lifetime,
            kind,
            initial_size: size,
            initial_alpha: color[3],
        }
    }

    /// Normalized life progress, 0 at spawn, 1 at expiry
    #[inline]
    pub fn age_ratio(&self) -> f32 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.age / self.lifetime).min(1.0)
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.age >= self.lifetime || self.size <= 0.0
    }

    /// Semi-implicit Euler step followed by the age-driven look
    pub fn integrate(&mut self, dt: f32, gravity: f32, drag: f32) {
        self.age += dt;

        self.position += self.velocity * dt;
        if self.kind != ParticleKind::Float {
            self.velocity.y += gravity * dt;
        }
        self.velocity *= drag;

        let ratio = self.age_ratio();
        let fade = (1.0 - ratio).clamp(0.0, 1.0);
        match self.kind {
            ParticleKind::Spark => {
                self.size = self.initial_size * (1.0 - ratio);
            }
            ParticleKind::Dust => {
                self.size = self.initial_size * (1.0 + ratio * 0.5);
            }
            ParticleKind::Debris | ParticleKind::Float => {}
        }
        self.color[3] = self.initial_alpha * fade;
    }
}

/// Owns every live effect particle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleField {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleField {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(256)),
            max_particles,
        }
    }

    /// Spawn one burst at `origin`. Particles beyond the cap are dropped.
    ///
    /// Returns the number actually spawned.
    pub fn spawn_burst<R: RandomSource>(
        &mut self,
        burst: Burst,
        origin: Vec2,
        rng: &mut R,
    ) -> usize {
        let spec = burst.spec();
        let mut spawned = 0;
        for _ in 0..spec.count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let velocity = Vec2::new(rng.spread(spec.vx), rng.range(spec.vy.0, spec.vy.1));
            let color = match spec.color {
                BurstColor::Hue { min, max } => {
                    let [r, g, b] = hsv_to_rgb(rng.range(min, max), BURST_SATURATION, BURST_VALUE);
                    [r, g, b, 1.0]
                }
                BurstColor::Fixed(rgba) => rgba,
            };
            let size = rng.range(spec.size.0, spec.size.1);
            let lifetime = rng.range(spec.lifetime.0, spec.lifetime.1);
            self.particles
                .push(Particle::new(origin, velocity, color, size, lifetime, spec.kind));
            spawned += 1;
        }
        if spawned < spec.count {
            log::debug!("{:?} burst capped: {}/{} spawned", burst, spawned, spec.count);
        }
        spawned
    }

    /// Add a single particle (respects the cap)
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.max_particles {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Prune what died last pass, then integrate the survivors
    pub fn update(&mut self, dt: f32, gravity: f32, drag: f32) {
        self.particles.retain(|p| !p.is_dead());
        for particle in &mut self.particles {
            particle.integrate(dt, gravity, drag);
        }
    }

    /// Live particles only
    pub fn live(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| !p.is_dead())
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Stored particles, including dead ones awaiting the next prune
    pub fn stored_count(&self) -> usize {
        self.particles.len()
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Change the cap; particles already over it live out their lifetime
    pub fn set_max_particles(&mut self, max_particles: usize) {
        self.max_particles = max_particles;
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
