//! Collision detection for the paddle and the three closed walls
//!
//! Everything is an axis-aligned check against the ball center. Detection is
//! pure; `tick` applies the response.

use super::state::{Arena, Ball, Paddle, Wall};
use crate::consts::PADDLE_MIN_ENGAGE_X;

/// Outcome of the x-axis checks (at most one fires per step)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalContact {
    /// Ball is returned by the paddle
    Paddle,
    /// Ball crossed the open left side
    LeftExit,
    /// Ball hit the right wall
    RightWall,
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    pub horizontal: Option<HorizontalContact>,
    /// Top or bottom wall, checked independently of the x axis
    pub vertical: Option<Wall>,
}

impl CollisionResult {
    pub fn is_miss(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Check whether the paddle returns the ball
///
/// The vertical test is inclusive, so a ball level with either paddle end
/// still counts. Balls already behind `PADDLE_MIN_ENGAGE_X` are lost.
pub fn ball_paddle_contact(paddle: &Paddle, ball: &Ball) -> bool {
    let diff = (paddle.y - ball.pos.y).abs();
    diff <= paddle.height * 0.5
        && ball.pos.x <= paddle.face_x()
        && ball.pos.x >= PADDLE_MIN_ENGAGE_X
        && ball.dir.x < 0.0
}

/// Paddle, then left exit, then right wall; first match wins
pub fn horizontal_contact(arena: &Arena, paddle: &Paddle, ball: &Ball) -> Option<HorizontalContact> {
    if ball_paddle_contact(paddle, ball) {
        Some(HorizontalContact::Paddle)
    } else if ball.pos.x <= 0.0 {
        Some(HorizontalContact::LeftExit)
    } else if ball.pos.x >= arena.width - arena.wall_thickness && ball.dir.x > 0.0 {
        Some(HorizontalContact::RightWall)
    } else {
        None
    }
}

/// Top wall, else bottom wall; only when moving into the wall
pub fn vertical_contact(arena: &Arena, ball: &Ball) -> Option<Wall> {
    if ball.pos.y <= arena.wall_thickness && ball.dir.y < 0.0 {
        Some(Wall::Top)
    } else if ball.pos.y >= arena.height - arena.wall_thickness && ball.dir.y > 0.0 {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Run both axis checks for the current positions
pub fn check_collisions(arena: &Arena, paddle: &Paddle, ball: &Ball) -> CollisionResult {
    CollisionResult {
        horizontal: horizontal_contact(arena, paddle, ball),
        vertical: vertical_contact(arena, ball),
    }
}
