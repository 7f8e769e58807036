//! Browser front end
//!
//! Canvas rendering, DOM input listeners and a `requestAnimationFrame` loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

use super::screen_to_arena_y;
use crate::highscores::HighScore;
use crate::renderer::{CanvasRenderer, Renderer, Scene};
use crate::settings::{PaddleControl, Settings};
use crate::sim::{Arena, GameState, TickInput, tick};

/// Game instance holding all state
struct Game {
    state: GameState,
    renderer: CanvasRenderer,
    control: PaddleControl,
    high_score: HighScore,
    pointer_y: Option<f32>,
    up_held: bool,
    down_held: bool,
    last_time: f64,
    /// Escape pressed: stop advancing and stop scheduling frames
    stopped: bool,
}

impl Game {
    fn new(renderer: CanvasRenderer, settings: &Settings, high_score: HighScore) -> Self {
        Self {
            state: GameState::new(Arena::default(), high_score.value),
            renderer,
            control: settings.control,
            high_score,
            pointer_y: None,
            up_held: false,
            down_held: false,
            last_time: 0.0,
            stopped: false,
        }
    }

    fn paddle_dir(&self) -> i8 {
        i8::from(self.down_held) - i8::from(self.up_held)
    }

    /// Run one simulation step
    fn update(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time;

        if self.state.is_over() {
            return;
        }

        let input = TickInput {
            target_y: match self.control {
                PaddleControl::Pointer => self.pointer_y,
                PaddleControl::Keys => None,
            },
            paddle_dir: self.paddle_dir(),
        };
        let result = tick(&mut self.state, &input, dt);

        if result.session_over {
            log::info!("Ball lost, final score {}", result.score);
            if let Some(value) = result.new_high_score {
                if self.high_score.record(value) {
                    self.high_score.save();
                }
            }
        }
    }

    /// Render the current frame
    fn render(&mut self) {
        if let Err(e) = self.renderer.draw(&Scene::from_state(&self.state)) {
            log::warn!("Render error: {:?}", e);
        }
    }

    /// Start a new session after game over
    fn restart(&mut self) {
        if self.state.is_over() {
            self.state.restart();
            log::info!("New session (high score {})", self.state.high_score);
        }
    }
}

fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("Solo Pong starting...");

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or("no canvas")?
        .dyn_into()?;

    let arena = Arena::default();
    canvas.set_width(arena.width as u32);
    canvas.set_height(arena.height as u32);

    let renderer = CanvasRenderer::new(canvas.clone())?;
    let settings = Settings::load();
    let high_score = HighScore::load();
    let game = Rc::new(RefCell::new(Game::new(renderer, &settings, high_score)));

    setup_input_handlers(&canvas, game.clone())?;
    request_animation_frame(game);

    log::info!("Solo Pong running!");
    Ok(())
}

fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    // Mouse move - offsetY scaled from the displayed size to arena pixels
    {
        let game = game.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            let h = canvas_clone.client_height() as f32;
            let arena_h = g.state.arena.height;
            g.pointer_y = Some(screen_to_arena_y(event.offset_y() as f32, h, arena_h));
        });
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Click - restart after game over
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().restart();
        });
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Key down
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "Escape" => {
                    g.stopped = true;
                    log::info!("Escape pressed, final score {}", g.state.score);
                }
                "Enter" => g.restart(),
                "w" | "W" | "ArrowUp" => g.up_held = true,
                "s" | "S" | "ArrowDown" => g.down_held = true,
                _ => {}
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Key up
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "w" | "W" | "ArrowUp" => g.up_held = false,
                "s" | "S" | "ArrowDown" => g.down_held = false,
                _ => {}
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame(game: Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
    {
        let mut g = game.borrow_mut();
        if g.stopped {
            return;
        }
        g.update(time);
        g.render();
    }

    request_animation_frame(game);
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = run() {
        log::error!("Solo Pong failed to start: {:?}", e);
    }
}
