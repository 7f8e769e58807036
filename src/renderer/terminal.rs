//! Terminal renderer
//!
//! Each terminal cell holds two stacked pixels drawn with an upper-half-block
//! (foreground = top pixel, background = bottom pixel), or a text glyph laid
//! over them. The arena is scaled onto the pixel grid and the whole frame,
//! HUD included, goes out in a single pass.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};

use super::{BACKGROUND, BALL, PADDLE, Rect, Renderer, Rgb, Scene, TEXT, WALL};

fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    top: Rgb,
    bottom: Rgb,
    glyph: Option<char>,
}

const BLANK: Cell = Cell {
    top: BACKGROUND,
    bottom: BACKGROUND,
    glyph: None,
};

/// Terminal-sized grid of half-block cells
pub struct CellGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells.resize(cols * rows, BLANK);
    }

    /// Width in pixels (one per column)
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Height in pixels (two per row)
    pub fn height(&self) -> usize {
        self.rows * 2
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Color of pixel (x, y), ignoring any glyph on top
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let cell = &self.cells[(y / 2) * self.cols + x];
        if y % 2 == 0 { cell.top } else { cell.bottom }
    }

    /// Glyph printed at a cell, if any
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        self.cells[row * self.cols + col].glyph
    }

    /// Fill an arena rectangle, covering every pixel it touches
    pub fn fill_arena_rect(&mut self, rect: &Rect, arena_w: f32, arena_h: f32, c: Rgb) {
        let sx = self.width() as f32 / arena_w;
        let sy = self.height() as f32 / arena_h;

        let x0 = ((rect.x * sx).floor() as i64).max(0) as usize;
        let y0 = ((rect.y * sy).floor() as i64).max(0) as usize;
        let x1 = ((rect.right() * sx).ceil() as usize).max(x0 + 1).min(self.width());
        let y1 = ((rect.bottom() * sy).ceil() as usize).max(y0 + 1).min(self.height());

        for y in y0..y1 {
            let row = &mut self.cells[(y / 2) * self.cols..(y / 2 + 1) * self.cols];
            for cell in &mut row[x0.min(x1)..x1] {
                if y % 2 == 0 {
                    cell.top = c;
                } else {
                    cell.bottom = c;
                }
            }
        }
    }

    /// Lay text over the pixels from (col, row), clipped at the right edge
    pub fn put_text(&mut self, col: usize, row: usize, text: &str) {
        if row >= self.rows {
            return;
        }
        let line = &mut self.cells[row * self.cols..(row + 1) * self.cols];
        for (cell, ch) in line.iter_mut().skip(col).zip(text.chars()) {
            cell.glyph = Some(ch);
        }
    }

    /// Write the grid row by row, only switching colors when they change
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        for row in 0..self.rows {
            let mut fg: Option<Rgb> = None;
            let mut bg: Option<Rgb> = None;
            for cell in &self.cells[row * self.cols..(row + 1) * self.cols] {
                let (want_fg, want_bg, ch) = match cell.glyph {
                    Some(ch) => (Some(TEXT), BACKGROUND, ch),
                    None if cell.top == cell.bottom => (None, cell.top, ' '),
                    None => (Some(cell.top), cell.bottom, '\u{2580}'), // ▀
                };
                if let Some(want) = want_fg.filter(|&c| fg != Some(c)) {
                    queue!(out, style::SetForegroundColor(term_color(want)))?;
                    fg = Some(want);
                }
                if bg != Some(want_bg) {
                    queue!(out, style::SetBackgroundColor(term_color(want_bg)))?;
                    bg = Some(want_bg);
                }
                queue!(out, style::Print(ch))?;
            }
            queue!(out, style::ResetColor)?;
            if row + 1 < self.rows {
                queue!(out, style::Print("\r\n"))?;
            }
        }
        Ok(())
    }
}

/// Draws scenes into a terminal-sized cell grid
pub struct TerminalRenderer<W: Write> {
    out: W,
    grid: CellGrid,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            grid: CellGrid::new(cols as usize, rows as usize),
        }
    }

    /// Follow a terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.grid.resize(cols as usize, rows as usize);
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Lay the scene out on the grid without touching the terminal
    pub fn compose(&mut self, scene: &Scene) {
        let (w, h) = (scene.width, scene.height);
        self.grid.clear();
        for wall in scene.walls() {
            self.grid.fill_arena_rect(&wall, w, h, WALL);
        }
        self.grid.fill_arena_rect(&scene.paddle, w, h, PADDLE);
        self.grid.fill_arena_rect(&scene.ball, w, h, BALL);

        self.grid.put_text(2, 1, &scene.score_text);
        self.grid
            .put_text(4 + scene.score_text.len(), 1, &scene.high_score_text);
        if scene.game_over {
            let msg = "GAME OVER";
            let col = (self.grid.cols / 2).saturating_sub(msg.len() / 2);
            self.grid.put_text(col, self.grid.rows / 2, msg);
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn draw(&mut self, scene: &Scene) -> io::Result<()> {
        self.compose(scene);
        self.grid.render(&mut self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, GameState};

    fn scene() -> Scene {
        Scene::from_state(&GameState::new(Arena::default(), 0))
    }

    #[test]
    fn test_compose_scales_arena() {
        // 64x48 pixels: exactly 1/16 of the 1024x768 arena
        let mut renderer = TerminalRenderer::new(Vec::new(), 64, 24);
        renderer.compose(&scene());
        let grid = renderer.grid();

        assert_eq!(grid.pixel(10, 0), WALL);
        assert_eq!(grid.pixel(10, 47), WALL);
        assert_eq!(grid.pixel(63, 20), WALL);
        assert_eq!(grid.pixel(2, 24), PADDLE);
        assert_eq!(grid.pixel(32, 24), BALL);
        assert_eq!(grid.pixel(10, 10), BACKGROUND);
    }

    #[test]
    fn test_hud_glyphs_sit_over_pixels() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 64, 24);
        let mut state = GameState::new(Arena::default(), 0);
        state.phase = crate::sim::GamePhase::GameOver;
        renderer.compose(&Scene::from_state(&state));
        let grid = renderer.grid();

        assert_eq!(grid.glyph(2, 1), Some('S'));
        assert_eq!(grid.glyph(12, 1), Some('H'));
        assert_eq!(grid.glyph(28, 12), Some('G'));
        assert_eq!(grid.glyph(0, 0), None);
        // The pixels underneath are untouched
        assert_eq!(grid.pixel(2, 2), BACKGROUND);
    }

    #[test]
    fn test_draw_writes_hud_text() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 64, 24);
        renderer.draw(&scene()).unwrap();
        let output = String::from_utf8_lossy(&renderer.out).to_string();
        assert!(output.contains("SCORE: 0"));
        assert!(output.contains("HIGHSCORE: 0"));
        assert!(!output.contains("GAME OVER"));
    }

    #[test]
    fn test_text_clipped_to_narrow_terminal() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 8, 4);
        renderer.draw(&scene()).unwrap();
        let output = String::from_utf8_lossy(&renderer.out).to_string();
        assert!(output.contains("SCORE:"));
        assert!(!output.contains("HIGHSCORE"));
    }

    #[test]
    fn test_resize_tracks_terminal() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 10, 5);
        renderer.resize(80, 30);
        assert_eq!(renderer.grid().width(), 80);
        assert_eq!(renderer.grid().height(), 60);
    }
}
