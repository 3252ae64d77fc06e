//! Control intent aggregation
//!
//! Keyboard, touch-swipe and virtual-joystick signals all collapse into one
//! normalized `ControlIntent` per tick. The shell only writes raw source
//! state here; the merge rules live with the sim so every input path drives
//! the vehicle identically.

/// Joystick deadzone as a fraction of full deflection (10px of a 60px throw)
pub const JOYSTICK_DEADZONE: f32 = 1.0 / 6.0;

/// Raw keyboard state (WASD / arrows / space held this tick)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardState {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub handbrake: bool,
}

/// Raw touch-swipe state; intensities are optional (0 means "flag only")
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchState {
    pub accelerate: bool,
    pub accelerate_intensity: f32,
    pub brake: bool,
    pub brake_intensity: f32,
    pub steer_left: bool,
    pub steer_right: bool,
}

/// Virtual joystick deflection, normalized to the knob throw
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoystickState {
    pub active: bool,
    /// Horizontal deflection in [-1, 1], positive = right
    pub x: f32,
    /// Vertical deflection in [-1, 1], positive = down (screen convention,
    /// so pushing up accelerates)
    pub y: f32,
}

/// All input sources for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub keyboard: KeyboardState,
    pub touch: TouchState,
    pub joystick: JoystickState,
}

/// Normalized per-tick control intent, independent of input source
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlIntent {
    /// Throttle intensity in [0, 1]
    pub accelerate: f32,
    /// Brake/reverse intensity in [0, 1]
    pub brake: f32,
    pub steer_left: bool,
    pub steer_right: bool,
    pub handbrake: bool,
}

impl TickInput {
    /// Merge all sources into one intent. Precedence per axis: keyboard,
    /// then touch, then joystick.
    pub fn intent(&self) -> ControlIntent {
        let kb = &self.keyboard;
        let touch = &self.touch;
        let stick = &self.joystick;

        let (stick_accel, stick_brake) = if stick.active {
            if stick.y < -JOYSTICK_DEADZONE {
                (stick.y.abs().min(1.0), 0.0)
            } else if stick.y > JOYSTICK_DEADZONE {
                (0.0, stick.y.abs().min(1.0))
            } else {
                (0.0, 0.0)
            }
        } else {
            (0.0, 0.0)
        };

        let accelerate = if kb.accelerate {
            1.0
        } else if touch.accelerate {
            touch_intensity(touch.accelerate_intensity)
        } else {
            stick_accel
        };

        let brake = if kb.brake {
            1.0
        } else if touch.brake {
            touch_intensity(touch.brake_intensity)
        } else {
            stick_brake
        };

        let stick_left = stick.active && stick.x < -JOYSTICK_DEADZONE;
        let stick_right = stick.active && stick.x > JOYSTICK_DEADZONE;

        ControlIntent {
            accelerate,
            brake,
            steer_left: kb.steer_left || touch.steer_left || stick_left,
            steer_right: kb.steer_right || touch.steer_right || stick_right,
            handbrake: kb.handbrake,
        }
    }
}

/// A set touch flag without a measured intensity counts as full intensity
fn touch_intensity(intensity: f32) -> f32 {
    if intensity > 0.0 { intensity.min(1.0) } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_maps_to_full_intensity() {
        let input = TickInput {
            keyboard: KeyboardState {
                accelerate: true,
                steer_left: true,
                handbrake: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let intent = input.intent();
        assert_eq!(intent.accelerate, 1.0);
        assert_eq!(intent.brake, 0.0);
        assert!(intent.steer_left);
        assert!(!intent.steer_right);
        assert!(intent.handbrake);
    }

    #[test]
    fn test_touch_flag_defaults_to_full_intensity() {
        let input = TickInput {
            touch: TouchState {
                brake: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(input.intent().brake, 1.0);
    }

    #[test]
    fn test_touch_intensity_passes_through() {
        let input = TickInput {
            touch: TouchState {
                accelerate: true,
                accelerate_intensity: 0.4,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(input.intent().accelerate, 0.4);
    }

    #[test]
    fn test_keyboard_overrides_touch() {
        let input = TickInput {
            keyboard: KeyboardState {
                accelerate: true,
                ..Default::default()
            },
            touch: TouchState {
                accelerate: true,
                accelerate_intensity: 0.3,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(input.intent().accelerate, 1.0);
    }

    #[test]
    fn test_joystick_deadzone() {
        let mut input = TickInput {
            joystick: JoystickState {
                active: true,
                x: 0.1,
                y: -0.1,
            },
            ..Default::default()
        };
        let intent = input.intent();
        assert_eq!(intent.accelerate, 0.0);
        assert!(!intent.steer_right);

        input.joystick.y = -0.8;
        input.joystick.x = 0.5;
        let intent = input.intent();
        assert_eq!(intent.accelerate, 0.8);
        assert!(intent.steer_right);
        assert!(!intent.steer_left);
    }

    #[test]
    fn test_inactive_joystick_is_ignored() {
        let input = TickInput {
            joystick: JoystickState {
                active: false,
                x: 1.0,
                y: -1.0,
            },
            ..Default::default()
        };
        assert_eq!(input.intent(), ControlIntent::default());
    }
}
