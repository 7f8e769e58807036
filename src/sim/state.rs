//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`; the platform loop owns
//! it and hands it to `tick` once per frame.

use glam::Vec2;

use crate::consts::*;

/// Fixed geometry and base speed of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Left edge of the paddle
    pub paddle_x: f32,
    pub ball_width: f32,
    pub ball_height: f32,
    /// Ball speed at session start (pixels/s)
    pub ball_speed: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: WIN_WIDTH,
            height: WIN_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_x: PADDLE_START_X,
            ball_width: BALL_WIDTH,
            ball_height: BALL_HEIGHT,
            ball_speed: BALL_START_SPEED,
        }
    }
}

impl Arena {
    /// Lowest legal paddle center
    #[inline]
    pub fn paddle_min_y(&self) -> f32 {
        self.paddle_height * 0.5 + self.wall_thickness
    }

    /// Highest legal paddle center
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_height * 0.5 - self.wall_thickness
    }

    /// Clamp a paddle center into the playable band between the walls
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        if y < self.paddle_min_y() {
            self.paddle_min_y()
        } else if y > self.paddle_max_y() {
            self.paddle_max_y()
        } else {
            y
        }
    }

    /// Center of the window
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ball in flight
    Playing,
    /// Ball left through the open left side
    GameOver,
}

/// Wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
    Right,
}

/// Things that happened during a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball returned by the paddle
    PaddleHit,
    /// Ball reflected off a wall
    WallBounce(Wall),
    /// Periodic speed-up fired
    SpeedUp { speed: f32, score: u64 },
    /// Ball exited on the left, ending the session
    BallLost,
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    /// Left edge (fixed)
    pub x: f32,
    /// Vertical center
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(arena: &Arena) -> Self {
        Self {
            x: arena.paddle_x,
            y: arena.height * 0.5,
            width: arena.paddle_width,
            height: arena.paddle_height,
        }
    }

    /// Right edge, the face the ball hits
    #[inline]
    pub fn face_x(&self) -> f32 {
        self.x + self.width
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Travel direction, each component ±1
    pub dir: Vec2,
    /// Scalar speed (pixels/s), never decreases within a session
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Ball {
    pub fn new(arena: &Arena) -> Self {
        Self {
            pos: arena.center(),
            dir: Vec2::new(-1.0, 1.0),
            speed: arena.ball_speed,
            width: arena.ball_width,
            height: arena.ball_height,
        }
    }

    /// Velocity in pixels/s
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }

    /// Move by one step
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.velocity() * dt;
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub score: u64,
    /// Best score known to this session (loaded at start, raised at game over)
    pub high_score: u64,
    /// Frames since the last speed-up
    pub frame_counter: u32,
    /// Simulation steps taken this session
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session in the given arena
    pub fn new(arena: Arena, high_score: u64) -> Self {
        Self {
            arena,
            phase: GamePhase::Playing,
            paddle: Paddle::new(&arena),
            ball: Ball::new(&arena),
            score: 0,
            high_score,
            frame_counter: 0,
            time_ticks: 0,
        }
    }

    /// Start over, keeping the arena and the best score seen so far
    pub fn restart(&mut self) {
        *self = Self::new(self.arena, self.high_score);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
