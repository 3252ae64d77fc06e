//! Crash fire and smoke particles
//!
//! A bounded pool that bursts on impact and is then drip-fed while the
//! vehicle stays crashed. Particles drift upward under their own velocity
//! but their horizontal position is blended toward the vehicle every tick
//! (fire tracks tighter than smoke), so the plume follows the limping car
//! without being welded to it. The pool only produces numbers - opacity and
//! scale are derived from remaining life and handed to the renderer as-is.

use glam::{Vec2, Vec3};
use rand::Rng;

/// Hard ceiling on live particles; spawns evict the oldest beyond this
pub const MAX_PARTICLES: usize = 256;
/// Replenishment keeps the pool at least this full while crashed
pub const REPLENISH_FLOOR: usize = 30;
/// Fire particles per collision burst
pub const BURST_FIRE_COUNT: usize = 40;
/// Smoke particles per collision burst
pub const BURST_SMOKE_COUNT: usize = 20;

/// Life drained per tick
const LIFE_DECAY_PER_TICK: f32 = 0.05;
/// Horizontal blend toward the vehicle per tick
const FIRE_FOLLOW_FACTOR: f32 = 0.1;
const SMOKE_FOLLOW_FACTOR: f32 = 0.05;
/// Fraction of replenished particles that are fire (the rest is smoke)
const REPLENISH_FIRE_BIAS: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Fire,
    Smoke,
}

/// A single live particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Remaining life in tick-units; removed at <= 0
    pub life: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Fire mote jittered around the vehicle; `rise_span` is the vertical
    /// jitter range above the engine cover (bursts spread wider than
    /// replenished singles).
    fn fire<R: Rng>(rng: &mut R, origin: Vec2, rise_span: f32) -> Self {
        Self {
            pos: Vec3::new(
                origin.x + (rng.random::<f32>() - 0.5) * 2.0,
                0.5 + rng.random::<f32>() * rise_span,
                origin.y + (rng.random::<f32>() - 0.5) * 3.0,
            ),
            vel: Vec3::new(
                (rng.random::<f32>() - 0.5) * 0.08,
                rng.random::<f32>() * 0.15 + 0.05,
                (rng.random::<f32>() - 0.5) * 0.08,
            ),
            life: rng.random::<f32>() * 2.0 + 1.5,
            kind: ParticleKind::Fire,
        }
    }

    /// Smoke puff: wider jitter, slower rise, longer life
    fn smoke<R: Rng>(rng: &mut R, origin: Vec2, rise_span: f32) -> Self {
        Self {
            pos: Vec3::new(
                origin.x + (rng.random::<f32>() - 0.5) * 3.0,
                1.0 + rng.random::<f32>() * rise_span,
                origin.y + (rng.random::<f32>() - 0.5) * 3.0,
            ),
            vel: Vec3::new(
                (rng.random::<f32>() - 0.5) * 0.05,
                rng.random::<f32>() * 0.1 + 0.05,
                (rng.random::<f32>() - 0.5) * 0.05,
            ),
            life: rng.random::<f32>() * 3.0 + 2.0,
            kind: ParticleKind::Smoke,
        }
    }

    /// Render opacity from remaining life: fire burns out over ~3 life,
    /// smoke thins over ~5
    pub fn opacity(&self) -> f32 {
        let raw = match self.kind {
            ParticleKind::Fire => self.life / 3.0,
            ParticleKind::Smoke => self.life / 5.0,
        };
        raw.clamp(0.0, 1.0)
    }

    /// Render scale from remaining life: fire shrinks as it dies, smoke
    /// billows outward as it ages
    pub fn scale(&self) -> f32 {
        match self.kind {
            ParticleKind::Fire => self.life / 3.0 + 0.5,
            ParticleKind::Smoke => ((3.0 - self.life) * 0.5).max(0.0),
        }
    }
}

/// Per-particle values handed to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleVisual {
    pub position: Vec3,
    pub opacity: f32,
    pub scale: f32,
    pub kind: ParticleKind,
}

/// The bounded crash-effect pool
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop every live particle immediately (crash repaired / session reset)
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// One collision's worth of fire and smoke around the vehicle
    pub fn spawn_burst<R: Rng>(&mut self, rng: &mut R, origin: Vec2) {
        for _ in 0..BURST_FIRE_COUNT {
            let particle = Particle::fire(rng, origin, 1.0);
            self.push_capped(particle);
        }
        for _ in 0..BURST_SMOKE_COUNT {
            let particle = Particle::smoke(rng, origin, 1.5);
            self.push_capped(particle);
        }
    }

    /// Age the pool one tick and top it up while the vehicle is crashed
    pub fn tick<R: Rng>(&mut self, rng: &mut R, vehicle_pos: Vec2, crashed: bool) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;

            let follow = match particle.kind {
                ParticleKind::Fire => FIRE_FOLLOW_FACTOR,
                ParticleKind::Smoke => SMOKE_FOLLOW_FACTOR,
            };
            particle.pos.x += (vehicle_pos.x - particle.pos.x) * follow;
            particle.pos.z += (vehicle_pos.y - particle.pos.z) * follow;

            particle.life -= LIFE_DECAY_PER_TICK;
        }
        self.particles.retain(|p| p.life > 0.0);

        // Staggered replenishment: one particle per tick keeps the plume
        // continuous without growing the pool past the floor
        if crashed && self.particles.len() < REPLENISH_FLOOR {
            let particle = if rng.random::<f32>() < REPLENISH_FIRE_BIAS {
                Particle::fire(rng, vehicle_pos, 0.5)
            } else {
                Particle::smoke(rng, vehicle_pos, 0.5)
            };
            self.push_capped(particle);
        }
    }

    /// Derived render values for every live particle
    pub fn visuals(&self) -> Vec<ParticleVisual> {
        self.particles
            .iter()
            .map(|p| ParticleVisual {
                position: p.pos,
                opacity: p.opacity(),
                scale: p.scale(),
                kind: p.kind,
            })
            .collect()
    }

    fn push_capped(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            // Evict the oldest to make room
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }
}
