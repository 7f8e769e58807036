//! Game settings and preferences
//!
//! JSON on disk next to the high score (native) or in LocalStorage (web).
//! Missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::highscores::HIGH_SCORE_FILE;

/// How the paddle is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleControl {
    /// Paddle snaps to the pointer's vertical position
    #[default]
    Pointer,
    /// W/S or arrow keys move the paddle at a fixed speed
    Keys,
}

impl PaddleControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleControl::Pointer => "Pointer",
            PaddleControl::Keys => "Keys",
        }
    }
}

/// Frame rate bounds for the pacing throttle
const MIN_FRAME_RATE: u32 = 10;
const MAX_FRAME_RATE: u32 = 240;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Paddle control scheme
    pub control: PaddleControl,
    /// Target frames per second
    pub frame_rate: u32,
    /// High score file (native only)
    pub high_score_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control: PaddleControl::Pointer,
            frame_rate: TARGET_FPS,
            high_score_file: HIGH_SCORE_FILE.to_string(),
        }
    }
}

impl Settings {
    /// Settings file / LocalStorage key
    const STORAGE_KEY: &'static str = "solo_pong_settings";

    /// Frame rate after clamping to sane bounds
    pub fn effective_frame_rate(&self) -> u32 {
        self.frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE)
    }

    /// Minimum wall time per frame (16 ms at 60 Hz)
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.effective_frame_rate()))
    }

    /// Parse settings JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Default settings path (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> std::path::PathBuf {
        std::path::PathBuf::from(format!("{}.json", Self::STORAGE_KEY))
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings, writing the defaults out when no file exists yet
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_create(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }
        let settings = Self::default();
        if let Err(e) = settings.save_to(path) {
            log::warn!("Failed to write default settings to {}: {}", path.display(), e);
        }
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_or_create(Self::default_path())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
