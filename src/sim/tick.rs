//! Per-frame simulation step
//!
//! Advances paddle, ball, collisions and the speed/score cadence by one frame.

use glam::Vec2;

use super::collision::{HorizontalContact, check_collisions};
use super::state::{GameEvent, GamePhase, GameState, Wall};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer y in arena space; the paddle snaps here when present
    pub target_y: Option<f32>,
    /// Keyboard direction (-1 up, +1 down), used when there is no pointer target
    pub paddle_dir: i8,
}

impl TickInput {
    /// Pointer-driven input
    pub fn pointer(target_y: f32) -> Self {
        Self {
            target_y: Some(target_y),
            paddle_dir: 0,
        }
    }
}

/// What a step produced
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub paddle_y: f32,
    pub ball_pos: Vec2,
    pub score: u64,
    /// Ball has left through the open side
    pub session_over: bool,
    /// Set on the ending step when the final score beats the loaded high score
    pub new_high_score: Option<u64>,
    pub events: Vec<GameEvent>,
}

impl StepResult {
    fn snapshot(state: &GameState, events: Vec<GameEvent>, new_high_score: Option<u64>) -> Self {
        Self {
            paddle_y: state.paddle.y,
            ball_pos: state.ball.pos,
            score: state.score,
            session_over: state.is_over(),
            new_high_score,
            events,
        }
    }
}

/// Limit a frame delta so a stall cannot teleport the ball
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt > MAX_DT { MAX_DT } else { dt }
}

/// Advance the game state by one frame
///
/// `dt` is the real elapsed time in seconds; anything above `MAX_DT` is
/// clamped. A finished session is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> StepResult {
    if state.phase == GamePhase::GameOver {
        return StepResult::snapshot(state, Vec::new(), None);
    }

    let dt = clamp_dt(dt);
    state.time_ticks += 1;
    let mut events = Vec::new();

    // Paddle
    let target = match input.target_y {
        Some(y) => y,
        None => state.paddle.y + f32::from(input.paddle_dir.signum()) * PADDLE_KEY_SPEED * dt,
    };
    state.paddle.y = state.arena.clamp_paddle_y(target);

    // Ball
    state.ball.integrate(dt);

    let collisions = check_collisions(&state.arena, &state.paddle, &state.ball);
    let mut new_high_score = None;

    match collisions.horizontal {
        Some(HorizontalContact::Paddle) => {
            state.ball.dir.x = -state.ball.dir.x;
            events.push(GameEvent::PaddleHit);
        }
        Some(HorizontalContact::LeftExit) => {
            state.phase = GamePhase::GameOver;
            if state.score > state.high_score {
                state.high_score = state.score;
                new_high_score = Some(state.score);
            }
            events.push(GameEvent::BallLost);
        }
        Some(HorizontalContact::RightWall) => {
            state.ball.dir.x = -state.ball.dir.x;
            events.push(GameEvent::WallBounce(Wall::Right));
        }
        None => {}
    }

    if let Some(wall) = collisions.vertical {
        state.ball.dir.y = -state.ball.dir.y;
        events.push(GameEvent::WallBounce(wall));
    }

    // The losing frame does not earn points after the high score was decided
    if state.phase == GamePhase::Playing {
        advance_progression(state, &mut events);
    }

    for event in &events {
        log::debug!("tick {}: {:?}", state.time_ticks, event);
    }

    StepResult::snapshot(state, events, new_high_score)
}

/// Frame-counted speed-up: counter increments first, fires once it passes
/// `SPEEDUP_FRAMES`, then restarts at 1.
fn advance_progression(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.frame_counter += 1;
    if state.frame_counter > SPEEDUP_FRAMES {
        state.frame_counter = 1;
        state.ball.speed += SPEEDUP_AMOUNT;
        state.score += SPEEDUP_SCORE;
        events.push(GameEvent::SpeedUp {
            speed: state.ball.speed,
            score: state.score,
        });
    }
}

impl GameState {
    /// Pointer-driven step: snap the paddle to `target_y` and advance by `dt`
    pub fn advance(&mut self, target_y: f32, dt: f32) -> StepResult {
        tick(self, &TickInput::pointer(target_y), dt)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sim::state::Arena;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn paddle_always_in_range(targets in prop::collection::vec(-2000.0f32..3000.0, 1..50)) {
            let mut state = GameState::new(Arena::default(), 0);
            for target in targets {
                let result = state.advance(target, 0.016);
                prop_assert!(result.paddle_y >= state.arena.paddle_min_y());
                prop_assert!(result.paddle_y <= state.arena.paddle_max_y());
            }
        }

        #[test]
        fn displacement_bounded_by_clamp(dt in 0.0f32..5.0) {
            let mut state = GameState::new(Arena::default(), 0);
            let speed = state.ball.speed;
            let start = state.ball.pos;
            state.advance(384.0, dt);
            let moved = state.ball.pos - start;
            prop_assert!(moved.x.abs() <= speed * MAX_DT + 1e-3);
            prop_assert!(moved.y.abs() <= speed * MAX_DT + 1e-3);
        }

        #[test]
        fn speed_never_decreases(dts in prop::collection::vec(0.0f32..0.1, 1..300)) {
            let mut state = GameState::new(Arena::default(), 0);
            let mut last_speed = state.ball.speed;
            for dt in dts {
                let target = state.ball.pos.y;
                state.advance(target, dt);
                prop_assert!(state.ball.speed >= last_speed);
                last_speed = state.ball.speed;
            }
        }
    }
}
