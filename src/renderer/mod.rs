//! Rendering module
//!
//! `scene` lays the frame out in arena pixels; the backends rasterise it:
//! half-block terminal cells on native, a 2D canvas on the web.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use scene::{Rect, Scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
#[cfg(not(target_arch = "wasm32"))]
pub use terminal::TerminalRenderer;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS color string
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

pub const BACKGROUND: Rgb = Rgb(0, 46, 120);
pub const WALL: Rgb = Rgb(0, 11, 28);
pub const PADDLE: Rgb = Rgb(250, 250, 250);
pub const BALL: Rgb = Rgb(250, 250, 250);
pub const TEXT: Rgb = Rgb(255, 255, 255);

/// A backend that can put a `Scene` on screen
pub trait Renderer {
    type Error;

    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(BACKGROUND.css(), "rgb(0, 46, 120)");
    }
}
