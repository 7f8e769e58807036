//! Native terminal front end
//!
//! Raw-mode terminal with mouse capture standing in for the game window.

use std::io::{self, Stdout, stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};

use super::screen_to_arena_y;
use crate::highscores::HighScore;
use crate::renderer::{Renderer, Scene, TerminalRenderer};
use crate::settings::{PaddleControl, Settings};
use crate::sim::{Arena, GameState, TickInput, tick};

/// How long the final frame stays up after the ball is lost
const GAME_OVER_LINGER: Duration = Duration::from_millis(1500);

/// Without release events a direction key counts as held until this long
/// after its last press or autorepeat. Longer than the usual autorepeat delay.
pub const KEY_HOLD_TIMEOUT: Duration = Duration::from_millis(700);

/// Raw mode, alternate screen, hidden cursor and mouse capture for as long
/// as the value lives. Restored on drop, including on error paths.
pub struct TerminalSession {
    out: Stdout,
    /// Key release events were requested from the terminal
    key_releases: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // Constructed before the remaining setup so a failure below still restores raw mode
        let mut session = Self {
            out: stdout(),
            key_releases: false,
        };
        execute!(
            session.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                session.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.key_releases = true;
        }
        log::debug!("Key release events: {}", session.key_releases);
        Ok(session)
    }

    /// Whether the terminal reports key releases
    pub fn reports_key_releases(&self) -> bool {
        self.key_releases
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.key_releases {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Centre of a terminal row, in arena pixels
pub fn row_to_arena_y(row: u16, rows: u16, arena_height: f32) -> f32 {
    screen_to_arena_y(f32::from(row) + 0.5, f32::from(rows), arena_height)
}

/// Paddle direction keys currently held, with the time each was last reported
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: Option<Instant>,
    pub down: Option<Instant>,
}

/// Input gathered from terminal events
#[derive(Debug, Default)]
pub struct InputState {
    /// Last pointer position seen (persists between frames)
    pub pointer_y: Option<f32>,
    /// Held state persists between frames until a release (or the timeout)
    pub keys: HeldKeys,
    /// Expiry for held keys when the terminal sends no releases
    pub hold_timeout: Option<Duration>,
    pub quit_requested: bool,
    pub escape_pressed: bool,
}

impl InputState {
    /// Input for a terminal that does (`None`) or does not (`Some`) report releases
    pub fn new(hold_timeout: Option<Duration>) -> Self {
        Self {
            hold_timeout,
            ..Default::default()
        }
    }

    /// Drop held keys that have not been reported within the hold timeout
    pub fn begin_frame(&mut self, now: Instant) {
        let Some(timeout) = self.hold_timeout else {
            return;
        };
        for held in [&mut self.keys.up, &mut self.keys.down] {
            if held.is_some_and(|seen| now.saturating_duration_since(seen) > timeout) {
                *held = None;
            }
        }
    }

    /// -1 up, 1 down, 0 for neither or both
    pub fn paddle_dir(&self) -> i8 {
        i8::from(self.keys.down.is_some()) - i8::from(self.keys.up.is_some())
    }

    /// Fold one terminal event in. Returns the new size on a resize.
    pub fn apply(
        &mut self,
        event: &Event,
        now: Instant,
        rows: u16,
        arena_height: f32,
    ) -> Option<(u16, u16)> {
        match event {
            Event::Key(key) => {
                let pressed = key.kind != KeyEventKind::Release;
                match key.code {
                    KeyCode::Char('w') | KeyCode::Up => self.keys.up = pressed.then_some(now),
                    KeyCode::Char('s') | KeyCode::Down => self.keys.down = pressed.then_some(now),
                    _ if !pressed => {}
                    KeyCode::Esc => self.escape_pressed = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit_requested = true;
                    }
                    KeyCode::Char('q') => self.quit_requested = true,
                    _ => {}
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                    self.pointer_y = Some(row_to_arena_y(mouse.row, rows, arena_height));
                }
                _ => {}
            },
            Event::Resize(cols, rows) => return Some((*cols, *rows)),
            _ => {}
        }
        None
    }

    pub fn should_exit(&self) -> bool {
        self.quit_requested || self.escape_pressed
    }

    /// Simulation input for the configured control scheme. In pointer mode
    /// the keys still work until the mouse has been seen.
    pub fn to_tick_input(&self, control: PaddleControl) -> TickInput {
        TickInput {
            target_y: match control {
                PaddleControl::Pointer => self.pointer_y,
                PaddleControl::Keys => None,
            },
            paddle_dir: self.paddle_dir(),
        }
    }
}

/// Blocking frame throttle
pub struct FramePacer {
    budget: Duration,
    last_update: Instant,
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            last_update: Instant::now(),
        }
    }

    /// Start a frame; returns seconds since the previous one
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;
        dt
    }

    /// Sleep out whatever is left of the frame budget
    pub fn wait(&self) {
        let elapsed = self.last_update.elapsed();
        if elapsed < self.budget {
            thread::sleep(self.budget - elapsed);
        }
    }
}

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Escape, `q` or Ctrl-C
    Quit,
    /// Ball left the arena
    BallLost { score: u64, new_high_score: Option<u64> },
}

/// Play one session in the terminal, then persist the high score if beaten
pub fn run(settings: &Settings) -> io::Result<()> {
    let mut high_score = HighScore::load_from(&settings.high_score_file);
    let mut state = GameState::new(Arena::default(), high_score.value);
    log::info!(
        "Paddle control: {}, {} fps",
        settings.control.as_str(),
        settings.effective_frame_rate()
    );

    let session = TerminalSession::enter()?;
    let (cols, mut rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(stdout(), cols, rows);
    let mut input = InputState::new(if session.reports_key_releases() {
        None
    } else {
        Some(KEY_HOLD_TIMEOUT)
    });
    let mut pacer = FramePacer::new(settings.frame_duration());

    let end = loop {
        let dt = pacer.begin_frame();
        input.begin_frame(Instant::now());
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Some((c, r)) = input.apply(&event, Instant::now(), rows, state.arena.height) {
                renderer.resize(c, r);
                rows = r;
            }
        }
        if input.should_exit() {
            break SessionEnd::Quit;
        }

        let result = tick(&mut state, &input.to_tick_input(settings.control), dt);
        renderer.draw(&Scene::from_state(&state))?;

        if result.session_over {
            thread::sleep(GAME_OVER_LINGER);
            break SessionEnd::BallLost {
                score: result.score,
                new_high_score: result.new_high_score,
            };
        }
        pacer.wait();
    };
    drop(session);

    match end {
        SessionEnd::Quit => log::info!("Quit with score {}", state.score),
        SessionEnd::BallLost {
            score,
            new_high_score,
        } => {
            log::info!("Ball lost, final score {}", score);
            if let Some(value) = new_high_score {
                if high_score.record(value) {
                    high_score.save_to(&settings.high_score_file)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseButton, MouseEvent};

    fn now() -> Instant {
        Instant::now()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_row_to_arena_y() {
        assert_eq!(row_to_arena_y(0, 24, 768.0), 16.0);
        assert_eq!(row_to_arena_y(12, 24, 768.0), 400.0);
        assert_eq!(row_to_arena_y(23, 24, 768.0), 752.0);
    }

    #[test]
    fn test_exit_keys() {
        let mut input = InputState::default();
        input.apply(&key(KeyCode::Esc), now(), 24, 768.0);
        assert!(input.escape_pressed);
        assert!(input.should_exit());

        let mut input = InputState::default();
        input.apply(&key(KeyCode::Char('q')), now(), 24, 768.0);
        assert!(input.quit_requested);

        let mut input = InputState::default();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        input.apply(&ctrl_c, now(), 24, 768.0);
        assert!(input.quit_requested);

        let mut input = InputState::default();
        input.apply(&key(KeyCode::Char('c')), now(), 24, 768.0);
        assert!(!input.should_exit());
    }

    fn key_with_kind(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind_and_state(
            code,
            KeyModifiers::NONE,
            kind,
            KeyEventState::NONE,
        ))
    }

    #[test]
    fn test_key_release_ignored() {
        let mut input = InputState::default();
        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Esc,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        input.apply(&release, now(), 24, 768.0);
        assert!(!input.should_exit());
    }

    #[test]
    fn test_mouse_sets_pointer() {
        let mut input = InputState::default();
        input.apply(&mouse(MouseEventKind::Moved, 12), now(), 24, 768.0);
        assert_eq!(input.pointer_y, Some(400.0));

        input.apply(&mouse(MouseEventKind::Drag(MouseButton::Left), 0), now(), 24, 768.0);
        assert_eq!(input.pointer_y, Some(16.0));

        // Pointer survives the frame boundary
        input.begin_frame(now());
        assert_eq!(input.pointer_y, Some(16.0));
    }

    #[test]
    fn test_held_key_moves_paddle_across_frames() {
        // One press, then no further events: the autorepeat delay
        let start = Instant::now();
        let mut input = InputState::new(Some(KEY_HOLD_TIMEOUT));
        input.apply(&key(KeyCode::Char('w')), start, 24, 768.0);

        let mut state = GameState::new(Arena::default(), 0);
        let start_y = state.paddle.y;
        for frame in 1..=30u32 {
            input.begin_frame(start + Duration::from_millis(16) * frame);
            tick(&mut state, &input.to_tick_input(PaddleControl::Keys), 1.0 / 60.0);
        }
        let moved = start_y - state.paddle.y;
        assert!((moved - 150.0).abs() < 0.01, "moved {moved}");
    }

    #[test]
    fn test_release_clears_held_key() {
        let start = Instant::now();
        let mut input = InputState::new(None);
        input.apply(&key(KeyCode::Down), start, 24, 768.0);
        input.begin_frame(start + Duration::from_secs(5));
        assert_eq!(input.paddle_dir(), 1);

        input.apply(&key_with_kind(KeyCode::Down, KeyEventKind::Release), start, 24, 768.0);
        assert_eq!(input.paddle_dir(), 0);
    }

    #[test]
    fn test_hold_expires_without_repeats() {
        let start = Instant::now();
        let mut input = InputState::new(Some(KEY_HOLD_TIMEOUT));
        input.apply(&key(KeyCode::Char('s')), start, 24, 768.0);

        // An autorepeat refreshes the hold
        let repeat_at = start + Duration::from_millis(500);
        input.apply(&key_with_kind(KeyCode::Char('s'), KeyEventKind::Repeat), repeat_at, 24, 768.0);
        input.begin_frame(start + Duration::from_millis(1000));
        assert_eq!(input.paddle_dir(), 1);

        input.begin_frame(repeat_at + KEY_HOLD_TIMEOUT + Duration::from_millis(1));
        assert_eq!(input.paddle_dir(), 0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::default();
        input.apply(&key(KeyCode::Up), now(), 24, 768.0);
        input.apply(&key(KeyCode::Down), now(), 24, 768.0);
        assert_eq!(input.paddle_dir(), 0);
    }

    #[test]
    fn test_resize_reported() {
        let mut input = InputState::default();
        assert_eq!(input.apply(&Event::Resize(100, 40), now(), 24, 768.0), Some((100, 40)));
        assert_eq!(input.apply(&key(KeyCode::Up), now(), 24, 768.0), None);
        assert_eq!(input.paddle_dir(), -1);
    }

    #[test]
    fn test_tick_input_per_control() {
        let input = InputState {
            pointer_y: Some(300.0),
            keys: HeldKeys {
                up: None,
                down: Some(now()),
            },
            ..Default::default()
        };
        let pointer = input.to_tick_input(PaddleControl::Pointer);
        assert_eq!(pointer.target_y, Some(300.0));

        let keys = input.to_tick_input(PaddleControl::Keys);
        assert_eq!(keys.target_y, None);
        assert_eq!(keys.paddle_dir, 1);
    }

    #[test]
    fn test_pacer_waits_out_budget() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        pacer.begin_frame();
        pacer.wait();
        assert!(pacer.begin_frame() >= 0.005);
    }
}
