//! Session state and core simulation types
//!
//! Everything mutable lives on an explicit `Session` owned by the shell,
//! not in globals: starting a session builds a fresh one, stopping a
//! session drops it, and every pending timer and particle goes with it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particles::{ParticlePool, ParticleVisual};
use super::scheduler::Scheduler;
use super::vehicle::Vehicle;
use super::world::{self, Obstacle};
use crate::consts::STARTING_HEALTH;

/// Crash/health state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    /// Normal driving
    Healthy,
    /// Collision active: control impaired, particles sustaining
    Crashed,
    /// Health exhausted; terminal for the session
    GameOver,
}

/// One driving session's complete state
#[derive(Debug)]
pub struct Session {
    /// Seed for reproducibility
    pub seed: u64,
    /// Session RNG; feeds environment generation and particle jitter
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The player's vehicle
    pub vehicle: Vehicle,
    /// Remaining health in [0, 5]
    pub health: u8,
    /// Current crash state
    pub drive_state: DriveState,
    /// Tick of the last registered collision (cooldown basis)
    pub last_collision_tick: Option<u64>,
    /// True only on the tick a collision registered (UI flash / sound)
    pub collision_pulse: bool,
    /// Remaining ticks of the crash indicator
    pub collision_flash_ticks: u32,
    /// The static obstacle field, trees before buildings
    pub obstacles: Vec<Obstacle>,
    /// Crash fire/smoke pool
    pub particles: ParticlePool,
    /// Pending deferred actions; dies with the session
    pub timers: Scheduler,
    /// Raised by the game-over exit timer; the shell tears the session down
    pub finished: bool,
}

impl Session {
    /// Start a session: vehicle at the origin, full health, fresh obstacle
    /// field from the seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = world::build_environment(&mut rng);

        log::info!("session started (seed {seed})");

        Self {
            seed,
            rng,
            time_ticks: 0,
            vehicle: Vehicle::new(),
            health: STARTING_HEALTH,
            drive_state: DriveState::Healthy,
            last_collision_tick: None,
            collision_pulse: false,
            collision_flash_ticks: 0,
            obstacles,
            particles: ParticlePool::new(),
            timers: Scheduler::new(),
            finished: false,
        }
    }

    /// Control and speed penalties apply while this is true
    #[inline]
    pub fn crashed(&self) -> bool {
        self.drive_state == DriveState::Crashed
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.drive_state == DriveState::GameOver
    }

    /// Per-tick output for the rendering/UI collaborators
    pub fn frame(&self) -> Frame {
        Frame {
            position: self.vehicle.pos,
            heading: self.vehicle.heading,
            speed: self.vehicle.speed(),
            health: self.health,
            crashed: self.crashed(),
            game_over: self.game_over(),
            collision_pulse: self.collision_pulse,
            collision_flash: self.collision_flash_ticks > 0,
            particles: self.particles.visuals(),
        }
    }
}

/// Everything the rendering/UI layer needs from one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Ground-plane position; `.x` is world x, `.y` is world z
    pub position: Vec2,
    pub heading: f32,
    /// Speed magnitude; the HUD derives its display unit from this
    pub speed: f32,
    pub health: u8,
    pub crashed: bool,
    pub game_over: bool,
    /// One-tick pulse on the collision tick
    pub collision_pulse: bool,
    /// True while the crash indicator should be visible
    pub collision_flash: bool,
    pub particles: Vec<ParticleVisual>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::{BUILDING_COUNT, TREE_COUNT};

    #[test]
    fn test_new_session_initial_state() {
        let session = Session::new(2024);
        assert_eq!(session.vehicle.pos, Vec2::ZERO);
        assert_eq!(session.vehicle.velocity, 0.0);
        assert_eq!(session.health, STARTING_HEALTH);
        assert_eq!(session.drive_state, DriveState::Healthy);
        assert_eq!(session.obstacles.len(), TREE_COUNT + BUILDING_COUNT);
        assert!(session.particles.is_empty());
        assert!(session.timers.is_empty());
        assert!(!session.finished);
    }

    #[test]
    fn test_same_seed_reproduces_environment() {
        let a = Session::new(555);
        let b = Session::new(555);
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_frame_reflects_session() {
        let mut session = Session::new(9);
        session.vehicle.velocity = -0.25;
        session.health = 2;
        session.drive_state = DriveState::Crashed;
        session.collision_flash_ticks = 10;

        let frame = session.frame();
        assert_eq!(frame.speed, 0.25);
        assert_eq!(frame.health, 2);
        assert!(frame.crashed);
        assert!(!frame.game_over);
        assert!(frame.collision_flash);
        assert!(!frame.collision_pulse);
    }
}
