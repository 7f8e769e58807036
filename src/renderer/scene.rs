//! Scene layout shared by every renderer
//!
//! Turns game state into the handful of rectangles and strings a frame is
//! made of. All coordinates are arena pixels, origin top-left.

use crate::sim::GameState;

/// Axis-aligned rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Arena size the rectangles are expressed in
    pub width: f32,
    pub height: f32,
    pub top_wall: Rect,
    pub bottom_wall: Rect,
    /// The left side is open; the ball leaves the arena there
    pub right_wall: Rect,
    pub paddle: Rect,
    pub ball: Rect,
    pub score_text: String,
    pub high_score_text: String,
    pub game_over: bool,
}

impl Scene {
    pub fn from_state(state: &GameState) -> Self {
        let arena = &state.arena;
        let t = arena.wall_thickness;
        let paddle = &state.paddle;
        let ball = &state.ball;

        Self {
            width: arena.width,
            height: arena.height,
            top_wall: Rect::new(0.0, 0.0, arena.width, t),
            bottom_wall: Rect::new(0.0, arena.height - t, arena.width, t),
            right_wall: Rect::new(arena.width - t, 0.0, t, arena.height),
            paddle: Rect::new(
                paddle.x,
                paddle.y - paddle.height * 0.5,
                paddle.width,
                paddle.height,
            ),
            ball: Rect::new(
                ball.pos.x - ball.width * 0.5,
                ball.pos.y - ball.height * 0.5,
                ball.width,
                ball.height,
            ),
            score_text: format!("SCORE: {}", state.score),
            high_score_text: format!("HIGHSCORE: {}", state.high_score),
            game_over: state.is_over(),
        }
    }

    /// Walls in draw order
    pub fn walls(&self) -> [Rect; 3] {
        [self.top_wall, self.bottom_wall, self.right_wall]
    }
}
