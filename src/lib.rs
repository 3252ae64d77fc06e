//! Formula Rush - an arcade obstacle-field driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle kinematics, collisions, crash state)
//! - `settings`: Persisted player preferences
//! - `audio`: Procedural Web Audio sound cues (wasm only)
//!
//! The 3D scene itself is drawn by the embedding page; this crate owns the
//! simulation and the DOM HUD wiring around it.

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use settings::{JoystickPosition, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; all tuned values below are per-tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Top speed in world units per tick
    pub const MAX_SPEED: f32 = 0.3;
    /// Throttle/brake velocity delta per tick at full intensity
    pub const ACCELERATION: f32 = 0.005;
    /// Heading change per tick while steering
    pub const TURN_SPEED: f32 = 0.03;
    /// Rolling-resistance velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.99;
    /// Extra velocity multiplier while the handbrake is held
    pub const HANDBRAKE_FRICTION: f32 = 0.95;

    /// Throttle/steering authority while crashed
    pub const CRASHED_CONTROL_FACTOR: f32 = 0.1;
    /// Top-speed fraction while crashed
    pub const CRASHED_SPEED_FACTOR: f32 = 0.2;

    /// Vehicle collision circle radius
    pub const CAR_RADIUS: f32 = 0.8;
    /// Drivable area: x and z clamped to +/- this bound
    pub const DRIVE_BOUND: f32 = 95.0;

    /// Health at session start
    pub const STARTING_HEALTH: u8 = 5;

    /// Minimum ticks between registered collisions (1 second)
    pub const COLLISION_COOLDOWN_TICKS: u64 = 60;
    /// Velocity retained (and reversed) by the crash bounce
    pub const BOUNCE_FACTOR: f32 = 0.2;
    /// Ticks until the bounce settles to a full stop (100 ms)
    pub const BOUNCE_STOP_DELAY_TICKS: u64 = 6;
    /// Separation distance applied along the obstacle->vehicle normal
    pub const PUSH_BACK_DISTANCE: f32 = 0.5;
    /// Ticks until a crash auto-repairs (5 seconds)
    pub const CRASH_RECOVERY_TICKS: u64 = 300;
    /// Ticks from game over until the session ends (5 seconds)
    pub const GAME_OVER_EXIT_TICKS: u64 = 300;
    /// Ticks the crash indicator stays visible (2 seconds)
    pub const COLLISION_FLASH_TICKS: u32 = 120;

    /// Display speed = |velocity| * this (arbitrary km/h scale for game feel)
    pub const SPEED_DISPLAY_SCALE: f32 = 100.0;
}
