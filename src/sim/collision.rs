//! Collision detection against the obstacle field
//!
//! Everything is a circle on the ground plane, so the test is a planar
//! distance comparison. Two policies keep the game feel right:
//! - a global cooldown window after any registered collision, so one
//!   overlap doesn't re-trigger every tick while the vehicle escapes;
//! - first-hit scanning in stored order (trees before buildings), not
//!   nearest-hit.

use glam::Vec2;

use super::world::Obstacle;
use crate::consts::{CAR_RADIUS, COLLISION_COOLDOWN_TICKS};

/// Scan for the first obstacle overlapping the vehicle circle at `pos`.
///
/// Returns the obstacle's index, or `None` if nothing overlaps or the
/// cooldown window since the last registered collision has not elapsed.
/// The caller is responsible for reverting the vehicle to its
/// pre-integration position before acting on a hit.
pub fn check_collision(
    pos: Vec2,
    obstacles: &[Obstacle],
    last_collision_tick: Option<u64>,
    now: u64,
) -> Option<usize> {
    if let Some(last) = last_collision_tick {
        if now.saturating_sub(last) < COLLISION_COOLDOWN_TICKS {
            return None;
        }
    }

    obstacles
        .iter()
        .position(|obstacle| pos.distance(obstacle.center) < CAR_RADIUS + obstacle.radius)
}
