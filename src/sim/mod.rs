//! Simulation module
//!
//! All gameplay logic lives here:
//! - One step per frame, elapsed time clamped
//! - State owned by the caller, passed in by `&mut`
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, HorizontalContact, check_collisions};
pub use state::{Arena, Ball, GameEvent, GamePhase, GameState, Paddle, Wall};
pub use tick::{StepResult, TickInput, clamp_dt, tick};
