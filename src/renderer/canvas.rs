//! Canvas 2D renderer (browser)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{BACKGROUND, BALL, PADDLE, Rect, Renderer, Rgb, Scene, TEXT, WALL};

/// Draws scenes onto an HTML canvas, scaled to its backing size
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    fn scale(&self, scene: &Scene) -> (f64, f64) {
        (
            f64::from(self.canvas.width()) / f64::from(scene.width),
            f64::from(self.canvas.height()) / f64::from(scene.height),
        )
    }

    fn fill(&self, rect: &Rect, scale: (f64, f64), c: Rgb) {
        self.ctx.set_fill_style_str(&c.css());
        self.ctx.fill_rect(
            f64::from(rect.x) * scale.0,
            f64::from(rect.y) * scale.1,
            f64::from(rect.w) * scale.0,
            f64::from(rect.h) * scale.1,
        );
    }
}

impl Renderer for CanvasRenderer {
    type Error = JsValue;

    fn draw(&mut self, scene: &Scene) -> Result<(), JsValue> {
        let scale = self.scale(scene);

        self.fill(&Rect::new(0.0, 0.0, scene.width, scene.height), scale, BACKGROUND);
        for wall in scene.walls() {
            self.fill(&wall, scale, WALL);
        }
        self.fill(&scene.paddle, scale, PADDLE);
        self.fill(&scene.ball, scale, BALL);

        let font_px = (20.0 * scale.1).max(10.0);
        self.ctx.set_font(&format!("{}px monospace", font_px.round()));
        self.ctx.set_fill_style_str(&TEXT.css());
        self.ctx.fill_text(&scene.score_text, 30.0 * scale.0, 45.0 * scale.1)?;
        self.ctx
            .fill_text(&scene.high_score_text, 260.0 * scale.0, 45.0 * scale.1)?;

        if scene.game_over {
            self.ctx.set_text_align("center");
            self.ctx.fill_text(
                "GAME OVER - click or press Enter",
                f64::from(scene.width) * 0.5 * scale.0,
                f64::from(scene.height) * 0.5 * scale.1,
            )?;
            self.ctx.set_text_align("start");
        }
        Ok(())
    }
}
