//! Game settings and preferences
//!
//! Persisted in LocalStorage so they survive page reloads.

use serde::{Deserialize, Serialize};

/// Where the virtual joystick sits on mobile layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JoystickPosition {
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl JoystickPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoystickPosition::BottomLeft => "bottom-left",
            JoystickPosition::BottomCenter => "bottom-center",
            JoystickPosition::BottomRight => "bottom-right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bottom-left" => Some(JoystickPosition::BottomLeft),
            "bottom-center" => Some(JoystickPosition::BottomCenter),
            "bottom-right" => Some(JoystickPosition::BottomRight),
            _ => None,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Virtual joystick placement on touch devices
    pub joystick_position: JoystickPosition,
    /// Car paint color as a CSS hex string
    pub car_color: String,
    /// Sound effects on/off
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Reduced motion (skip the screen shake on impact)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            joystick_position: JoystickPosition::default(),
            car_color: "#ff0000".to_string(),
            sound: true,
            master_volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "formula_rush_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
