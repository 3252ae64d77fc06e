//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable obstacle scan order (trees before buildings)
//! - No rendering or platform dependencies

pub mod collision;
pub mod crash;
pub mod intent;
pub mod particles;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod vehicle;
pub mod world;

pub use collision::check_collision;
pub use crash::apply_collision;
pub use intent::{ControlIntent, JoystickState, KeyboardState, TickInput, TouchState};
pub use particles::{Particle, ParticleKind, ParticlePool, ParticleVisual, MAX_PARTICLES};
pub use scheduler::{DeferredAction, Scheduler};
pub use state::{DriveState, Frame, Session};
pub use tick::tick;
pub use vehicle::Vehicle;
pub use world::{build_environment, Obstacle, ObstacleKind};
