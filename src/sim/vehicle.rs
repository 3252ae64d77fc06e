//! Vehicle motion model
//!
//! A deliberately simplified single-body kinematic approximation tuned for
//! game feel: scalar forward velocity plus a heading, no lateral slip.

use glam::Vec2;

use super::intent::ControlIntent;
use crate::consts::*;

/// The player's vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    /// Ground-plane position; `.x` is world x, `.y` is world z
    pub pos: Vec2,
    /// Heading in radians; 0 faces +z, increasing turns left
    pub heading: f32,
    /// Signed scalar velocity, forward-positive (world units per tick)
    pub velocity: f32,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl Vehicle {
    /// Vehicle at the origin, at rest
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            heading: 0.0,
            velocity: 0.0,
        }
    }

    /// Speed magnitude for display purposes
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.abs()
    }

    /// Advance one tick from the given intent.
    ///
    /// Order matters: friction, throttle/brake, speed clamp, handbrake,
    /// steering, integration, bound clamp. While crashed both throttle and
    /// steering authority drop to [`CRASHED_CONTROL_FACTOR`] and the speed
    /// cap to [`CRASHED_SPEED_FACTOR`] of nominal.
    pub fn advance(&mut self, intent: &ControlIntent, crashed: bool) {
        self.velocity *= FRICTION;

        let control_factor = if crashed { CRASHED_CONTROL_FACTOR } else { 1.0 };

        if intent.accelerate > 0.0 {
            self.velocity += ACCELERATION * control_factor * intent.accelerate;
        } else if intent.brake > 0.0 {
            self.velocity -= ACCELERATION * control_factor * intent.brake;
        }

        let max_speed = if crashed {
            MAX_SPEED * CRASHED_SPEED_FACTOR
        } else {
            MAX_SPEED
        };
        self.velocity = self.velocity.clamp(-max_speed, max_speed);

        if intent.handbrake {
            self.velocity *= HANDBRAKE_FRICTION;
        }

        // Steering direction flips in reverse so the wheel keeps feeling
        // consistent when backing up.
        if self.velocity != 0.0 {
            let turn = TURN_SPEED * self.velocity.signum() * control_factor;
            if intent.steer_left {
                self.heading += turn;
            }
            if intent.steer_right {
                self.heading -= turn;
            }
        }

        self.pos.x += self.heading.sin() * self.velocity;
        self.pos.y += self.heading.cos() * self.velocity;

        self.pos = self
            .pos
            .clamp(Vec2::splat(-DRIVE_BOUND), Vec2::splat(DRIVE_BOUND));
    }
}
