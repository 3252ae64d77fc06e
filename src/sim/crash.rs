//! Crash/health state machine
//!
//! Healthy -> Crashed on a registered hit (re-entrant while crashed),
//! Crashed -> Healthy when the repair timer fires, and either -> GameOver
//! when health runs out. All delayed consequences (bounce settling, repair,
//! session end) go through the session's scheduler.

use glam::Vec2;

use super::scheduler::DeferredAction;
use super::state::{DriveState, Session};
use crate::consts::*;

/// Apply a registered collision against the obstacle at `obstacle_center`.
///
/// The caller has already reverted the vehicle to its pre-integration
/// position, so the push-back below starts from a non-penetrating pose.
pub fn apply_collision(session: &mut Session, obstacle_center: Vec2) {
    let now = session.time_ticks;
    session.last_collision_tick = Some(now);
    session.collision_pulse = true;
    session.collision_flash_ticks = COLLISION_FLASH_TICKS;

    session.health = session.health.saturating_sub(1);

    // Guaranteed separation: step away along the obstacle->vehicle normal
    let away = (session.vehicle.pos - obstacle_center).normalize_or_zero();
    session.vehicle.pos += away * PUSH_BACK_DISTANCE;

    if session.health == 0 {
        log::info!("game over at tick {now}");
        session.drive_state = DriveState::GameOver;
        session.vehicle.velocity = 0.0;
        session
            .timers
            .schedule(now + GAME_OVER_EXIT_TICKS, DeferredAction::EndSession);
    } else {
        log::info!("collision at tick {now}, health {}", session.health);
        session.drive_state = DriveState::Crashed;

        // Bounce: reverse at reduced magnitude, then settle to a stop
        session.vehicle.velocity = -session.vehicle.velocity * BOUNCE_FACTOR;
        session
            .timers
            .schedule(now + BOUNCE_STOP_DELAY_TICKS, DeferredAction::BounceStop);

        // A re-entrant crash restarts the full recovery window
        session.timers.cancel(DeferredAction::Repair);
        session
            .timers
            .schedule(now + CRASH_RECOVERY_TICKS, DeferredAction::Repair);
    }

    let origin = session.vehicle.pos;
    session.particles.spawn_burst(&mut session.rng, origin);
}

/// Run one due deferred action against the session
pub fn apply_deferred(session: &mut Session, action: DeferredAction) {
    match action {
        DeferredAction::BounceStop => {
            session.vehicle.velocity = 0.0;
        }
        DeferredAction::Repair => {
            if session.health > 0 && session.drive_state == DriveState::Crashed {
                log::info!("crash repaired at tick {}", session.time_ticks);
                session.drive_state = DriveState::Healthy;
                // Release live particles immediately, no natural decay
                session.particles.clear();
            }
        }
        DeferredAction::EndSession => {
            session.finished = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STARTING_HEALTH;

    fn session() -> Session {
        Session::new(77)
    }

    #[test]
    fn test_first_hit_enters_crashed() {
        let mut session = session();
        session.vehicle.velocity = 0.3;
        session.time_ticks = 100;

        apply_collision(&mut session, Vec2::new(0.0, 1.0));

        assert_eq!(session.drive_state, DriveState::Crashed);
        assert_eq!(session.health, STARTING_HEALTH - 1);
        assert_eq!(session.last_collision_tick, Some(100));
        assert!(session.collision_pulse);
        assert!(session.collision_flash_ticks > 0);
        // Reversed and scaled down
        assert!((session.vehicle.velocity - (-0.3 * BOUNCE_FACTOR)).abs() < 1e-6);
        // Pushed away from the obstacle (obstacle at +z, vehicle at origin)
        assert!((session.vehicle.pos.y - (-PUSH_BACK_DISTANCE)).abs() < 1e-6);
        assert!(!session.particles.is_empty());
        assert!(session.timers.is_scheduled(DeferredAction::Repair));
        assert!(session.timers.is_scheduled(DeferredAction::BounceStop));
    }

    #[test]
    fn test_bounce_stop_halts_the_vehicle() {
        let mut session = session();
        session.vehicle.velocity = 0.3;
        apply_collision(&mut session, Vec2::new(0.0, 1.0));

        apply_deferred(&mut session, DeferredAction::BounceStop);
        assert_eq!(session.vehicle.velocity, 0.0);
        // Still crashed; only the repair timer clears the state
        assert_eq!(session.drive_state, DriveState::Crashed);
    }

    #[test]
    fn test_repair_restores_and_releases_particles() {
        let mut session = session();
        apply_collision(&mut session, Vec2::new(1.0, 0.0));
        assert!(!session.particles.is_empty());

        apply_deferred(&mut session, DeferredAction::Repair);
        assert_eq!(session.drive_state, DriveState::Healthy);
        assert!(session.particles.is_empty());
    }

    #[test]
    fn test_recrash_restarts_recovery_window() {
        let mut session = session();
        session.time_ticks = 100;
        apply_collision(&mut session, Vec2::new(1.0, 0.0));

        session.time_ticks = 200;
        apply_collision(&mut session, Vec2::new(-1.0, 0.0));

        // The stale repair entry was cancelled; no repair fires at the
        // original deadline, only at the restarted one
        assert!(!session
            .timers
            .drain_due(100 + CRASH_RECOVERY_TICKS)
            .contains(&DeferredAction::Repair));
        assert!(session
            .timers
            .drain_due(200 + CRASH_RECOVERY_TICKS)
            .contains(&DeferredAction::Repair));
    }

    #[test]
    fn test_health_exhaustion_is_game_over() {
        let mut session = session();
        session.health = 1;
        session.vehicle.velocity = 0.2;

        apply_collision(&mut session, Vec2::new(0.0, -1.0));

        assert_eq!(session.drive_state, DriveState::GameOver);
        assert_eq!(session.health, 0);
        assert_eq!(session.vehicle.velocity, 0.0);
        assert!(session.timers.is_scheduled(DeferredAction::EndSession));
        assert!(!session.timers.is_scheduled(DeferredAction::Repair));

        apply_deferred(&mut session, DeferredAction::EndSession);
        assert!(session.finished);
    }

    #[test]
    fn test_stale_repair_never_clears_game_over() {
        let mut session = session();
        session.health = 1;
        apply_collision(&mut session, Vec2::new(0.0, -1.0));

        apply_deferred(&mut session, DeferredAction::Repair);
        assert_eq!(session.drive_state, DriveState::GameOver);
    }
}
