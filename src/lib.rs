//! Solo Pong - A one-player wall-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (paddle tracking, ball motion, collisions, scoring)
//! - `renderer`: Scene layout plus terminal and canvas backends
//! - `platform`: Native terminal / browser loops, input sampling, frame pacing
//! - `highscores`: Single-value high score store
//! - `settings`: Player preferences

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::{PaddleControl, Settings};

/// Game configuration constants
pub mod consts {
    /// Window size
    pub const WIN_WIDTH: f32 = 1024.0;
    pub const WIN_HEIGHT: f32 = 768.0;

    /// Thickness of the top, bottom and right walls
    pub const WALL_THICKNESS: f32 = 15.0;

    /// Paddle defaults (x is the left edge, y the vertical center)
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_START_X: f32 = 35.0;
    /// Paddle speed in keyboard mode (pixels/s)
    pub const PADDLE_KEY_SPEED: f32 = 300.0;
    /// Ball left of this x can no longer be returned by the paddle
    pub const PADDLE_MIN_ENGAGE_X: f32 = 20.0;

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 15.0;
    pub const BALL_HEIGHT: f32 = 15.0;
    pub const BALL_START_SPEED: f32 = 200.0;

    /// Largest step the simulation will take (seconds)
    pub const MAX_DT: f32 = 0.05;

    /// Frames between speed-ups (~1 s at 60 Hz, frame counted)
    pub const SPEEDUP_FRAMES: u32 = 60;
    /// Ball speed added on every speed-up
    pub const SPEEDUP_AMOUNT: f32 = 10.0;
    /// Score added on every speed-up
    pub const SPEEDUP_SCORE: u64 = 10;

    /// Default frame rate for the pacing throttle
    pub const TARGET_FPS: u32 = 60;
}
