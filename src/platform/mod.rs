//! Platform abstraction layer
//!
//! Owns the frame loop on each target:
//! - Input sampling (pointer y, quit/escape, paddle keys)
//! - Frame pacing (sleep on native, `requestAnimationFrame` on the web)
//! - Session end handling and high score persistence

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Map a pointer position in screen pixels (or cells) to arena y
pub fn screen_to_arena_y(screen_y: f32, screen_height: f32, arena_height: f32) -> f32 {
    if screen_height <= 0.0 {
        return arena_height * 0.5;
    }
    screen_y * arena_height / screen_height
}
