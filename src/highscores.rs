//! High score store
//!
//! A single best score kept as plain decimal text: a file in the working
//! directory on native, LocalStorage on the web. Anything unreadable counts
//! as no prior high score.

/// Default high score file (native)
pub const HIGH_SCORE_FILE: &str = "highscore.txt";

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub value: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "solo_pong_highscore";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Parse stored text; `None` when it is not a single decimal integer
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<u64>().ok().map(Self::new)
    }

    /// Parse stored text, falling back to zero
    pub fn from_text(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|| {
            log::warn!("Ignoring malformed high score {:?}", text.trim());
            Self::default()
        })
    }

    /// Storage representation
    pub fn to_text(&self) -> String {
        self.value.to_string()
    }

    /// Whether `score` should replace the stored value
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.value
    }

    /// Take `score` if it beats the current value; returns true when it did
    pub fn record(&mut self, score: u64) -> bool {
        if self.beaten_by(score) {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Load from a file, treating a missing or malformed file as zero
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let score = Self::from_text(&text);
                log::info!("Loaded high score {} from {}", score.value, path.display());
                score
            }
            Err(e) => {
                log::info!("No high score at {} ({}), starting fresh", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write to a file as plain decimal text
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text())?;
        log::info!("High score {} saved to {}", self.value, path.display());
        Ok(())
    }

    /// Load high score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(text)) = storage.get_item(Self::STORAGE_KEY) {
                let score = Self::from_text(&text);
                log::info!("Loaded high score {}", score.value);
                return score;
            }
        }

        log::info!("No high score found, starting fresh");
        Self::default()
    }

    /// Save high score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match storage.set_item(Self::STORAGE_KEY, &self.to_text()) {
                Ok(()) => log::info!("High score {} saved", self.value),
                Err(e) => log::warn!("Failed to save high score: {:?}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(HighScore::parse("120"), Some(HighScore::new(120)));
        assert_eq!(HighScore::parse(" 40\n"), Some(HighScore::new(40)));
        assert_eq!(HighScore::parse(""), None);
        assert_eq!(HighScore::parse("-5"), None);
        assert_eq!(HighScore::parse("12 34"), None);
        assert_eq!(HighScore::parse("abc"), None);
    }

    #[test]
    fn test_malformed_text_is_zero() {
        assert_eq!(HighScore::from_text("not a number").value, 0);
        assert_eq!(HighScore::from_text("70").value, 70);
    }

    #[test]
    fn test_record_only_when_beaten() {
        let mut hs = HighScore::new(30);
        assert!(!hs.record(30));
        assert!(!hs.record(10));
        assert_eq!(hs.value, 30);
        assert!(hs.record(50));
        assert_eq!(hs.value, 50);
        assert_eq!(hs.to_text(), "50");
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("solo_pong_{}_{}", std::process::id(), name))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip_and_fallbacks() {
        let missing = scratch_path("missing.txt");
        let _ = std::fs::remove_file(&missing);
        assert_eq!(HighScore::load_from(&missing).value, 0);

        let path = scratch_path("highscore.txt");
        HighScore::new(90).save_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "90");
        assert_eq!(HighScore::load_from(&path).value, 90);

        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(HighScore::load_from(&path).value, 0);

        let _ = std::fs::remove_file(&path);
    }
}
