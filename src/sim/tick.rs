//! Fixed timestep simulation tick
//!
//! One tick, in dependency order: due timers fire, intent is aggregated,
//! the motion model proposes a position, the collision detector checks it
//! against the obstacle field, a hit reverts the position and runs the
//! crash state machine, and the particle pool ages while the vehicle is
//! not healthy.

use super::collision::check_collision;
use super::crash::{apply_collision, apply_deferred};
use super::intent::TickInput;
use super::state::Session;

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput) {
    session.time_ticks += 1;
    session.collision_pulse = false;
    session.collision_flash_ticks = session.collision_flash_ticks.saturating_sub(1);

    for action in session.timers.drain_due(session.time_ticks) {
        apply_deferred(session, action);
    }

    if session.game_over() {
        // Terminal: all intent ignored, vehicle pinned in place; the fire
        // keeps burning under the wreck
        session.vehicle.velocity = 0.0;
        let pos = session.vehicle.pos;
        session.particles.tick(&mut session.rng, pos, true);
        return;
    }

    let intent = input.intent();
    let prev_pos = session.vehicle.pos;
    let crashed = session.crashed();

    session.vehicle.advance(&intent, crashed);

    if let Some(index) = check_collision(
        session.vehicle.pos,
        &session.obstacles,
        session.last_collision_tick,
        session.time_ticks,
    ) {
        // Revert to the pre-integration position so the vehicle never ends
        // up inside the obstacle, then let the state machine respond
        session.vehicle.pos = prev_pos;
        let center = session.obstacles[index].center;
        apply_collision(session, center);
    }

    if session.crashed() {
        let pos = session.vehicle.pos;
        session.particles.tick(&mut session.rng, pos, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::intent::KeyboardState;
    use crate::sim::state::DriveState;
    use crate::sim::world::{Obstacle, ObstacleKind, TREE_RADIUS};
    use glam::Vec2;

    fn tree_at(x: f32, z: f32) -> Obstacle {
        Obstacle {
            kind: ObstacleKind::Tree,
            center: Vec2::new(x, z),
            radius: TREE_RADIUS,
        }
    }

    /// Session with a hand-placed field instead of the random one
    fn session_with(obstacles: Vec<Obstacle>) -> Session {
        let mut session = Session::new(1);
        session.obstacles = obstacles;
        session
    }

    fn throttle() -> TickInput {
        TickInput {
            keyboard: KeyboardState {
                accelerate: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_drive_toward_tree_registers_collision() {
        // Tree dead ahead: combined radius 1.4, one coasting tick covers
        // ~0.1, so starting 1.45 out ends ~1.35 out - inside the overlap
        let mut session = session_with(vec![tree_at(0.0, 1.45)]);
        session.vehicle.velocity = 0.1;

        tick(&mut session, &TickInput::default());

        assert_eq!(session.health, STARTING_HEALTH - 1);
        assert_eq!(session.drive_state, DriveState::Crashed);
        assert!(session.collision_pulse);
        // Reverted to the pre-tick position, then pushed straight back
        assert_eq!(session.vehicle.pos.x, 0.0);
        assert!((session.vehicle.pos.y - (-PUSH_BACK_DISTANCE)).abs() < 1e-6);
        assert!(!session.particles.is_empty());
    }

    #[test]
    fn test_pulse_lasts_one_tick() {
        let mut session = session_with(vec![tree_at(0.0, 1.45)]);
        session.vehicle.velocity = 0.1;

        tick(&mut session, &TickInput::default());
        assert!(session.collision_pulse);

        tick(&mut session, &TickInput::default());
        assert!(!session.collision_pulse);
        // The indicator flash outlives the pulse
        assert!(session.collision_flash_ticks > 0);
    }

    #[test]
    fn test_clear_run_stays_healthy() {
        let mut session = session_with(vec![tree_at(50.0, 50.0)]);
        for _ in 0..600 {
            tick(&mut session, &throttle());
        }
        assert_eq!(session.drive_state, DriveState::Healthy);
        assert_eq!(session.health, STARTING_HEALTH);
        assert!(session.particles.is_empty());
    }

    #[test]
    fn test_crash_recovers_after_delay_and_releases_particles() {
        let mut session = session_with(vec![tree_at(0.0, 1.3)]);
        session.vehicle.velocity = 0.05;

        tick(&mut session, &TickInput::default());
        assert_eq!(session.drive_state, DriveState::Crashed);
        assert!(!session.particles.is_empty());

        // Sit still for the full recovery window with no new collision
        for _ in 0..CRASH_RECOVERY_TICKS {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.drive_state, DriveState::Healthy);
        assert!(session.particles.is_empty());
        assert_eq!(session.health, STARTING_HEALTH - 1);
    }

    #[test]
    fn test_bounce_settles_to_a_stop() {
        let mut session = session_with(vec![tree_at(0.0, 1.45)]);
        session.vehicle.velocity = 0.2;

        tick(&mut session, &TickInput::default());
        assert!(session.vehicle.velocity < 0.0);

        for _ in 0..BOUNCE_STOP_DELAY_TICKS {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.vehicle.velocity, 0.0);
    }

    #[test]
    fn test_five_hits_exhaust_health_sixth_changes_nothing() {
        let mut session = session_with(vec![tree_at(0.0, 1.3)]);
        session.vehicle.pos = Vec2::new(50.0, 50.0);

        for expected in (0..STARTING_HEALTH).rev() {
            // Step into the tree, then retreat and wait out the cooldown
            session.vehicle.pos = Vec2::ZERO;
            tick(&mut session, &TickInput::default());
            assert_eq!(session.health, expected);

            session.vehicle.pos = Vec2::new(50.0, 50.0);
            for _ in 0..COLLISION_COOLDOWN_TICKS {
                tick(&mut session, &TickInput::default());
            }
        }
        assert_eq!(session.drive_state, DriveState::GameOver);

        // A sixth attempt: terminal state ignores it entirely
        for _ in 0..COLLISION_COOLDOWN_TICKS {
            tick(&mut session, &TickInput::default());
        }
        session.vehicle.pos = Vec2::ZERO;
        tick(&mut session, &throttle());
        assert_eq!(session.health, 0);
        assert_eq!(session.drive_state, DriveState::GameOver);
    }

    #[test]
    fn test_game_over_ignores_intent_and_ends_session() {
        let mut session = session_with(vec![tree_at(0.0, 1.3)]);
        session.health = 1;
        session.vehicle.velocity = 0.05;

        tick(&mut session, &TickInput::default());
        assert_eq!(session.drive_state, DriveState::GameOver);
        let parked = session.vehicle.pos;

        let end_tick = session.time_ticks + GAME_OVER_EXIT_TICKS;
        while session.time_ticks < end_tick {
            tick(&mut session, &throttle());
            assert_eq!(session.vehicle.velocity, 0.0);
            assert_eq!(session.vehicle.pos, parked);
        }
        assert!(session.finished);
    }

    #[test]
    fn test_cooldown_blocks_immediate_rehit() {
        let mut session = session_with(vec![tree_at(0.0, 1.3)]);
        session.vehicle.velocity = 0.05;

        tick(&mut session, &TickInput::default());
        assert_eq!(session.health, STARTING_HEALTH - 1);

        // Park the vehicle inside the overlap: the cooldown keeps the same
        // contact from draining health every tick
        for _ in 0..(COLLISION_COOLDOWN_TICKS - 2) {
            session.vehicle.pos = Vec2::ZERO;
            tick(&mut session, &TickInput::default());
            assert_eq!(session.health, STARTING_HEALTH - 1);
        }
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let script = [throttle(), throttle(), TickInput::default(), throttle()];

        let mut a = Session::new(31337);
        let mut b = Session::new(31337);
        for input in script.iter().cycle().take(400) {
            tick(&mut a, input);
            tick(&mut b, input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.vehicle, b.vehicle);
        assert_eq!(a.health, b.health);
        assert_eq!(a.particles, b.particles);
    }
}
