/// Terminal and gamepad input.
///
/// `KeyboardInput` reads the terminal through crossterm. It tracks which keys
/// are currently held so movement continues while a key stays down. Release
/// events are honored when the terminal reports them; otherwise a key counts
/// as released after `HOLD_TIMEOUT` without a Press/Repeat.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::GamepadConfig;
use crate::domain::entity::InputFrame;
use crate::sim::input::InputSource;
use super::gamepad::GamepadState;

/// After this duration without a Press/Repeat event, consider the key released.
/// Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

pub struct KeyboardInput {
    /// Timestamp of last Press/Repeat event for each key.
    last_active: HashMap<KeyCode, Instant>,

    /// Keys that went from "not held" to "held" during the most recent drain.
    fresh_presses: Vec<KeyCode>,

    /// Whether to honor Release events. Only true when the terminal was
    /// put into keyboard-enhancement mode.
    pub honor_release: bool,

    quit: bool,
    gamepad: GamepadState,
}

impl KeyboardInput {
    pub fn new(gamepad_cfg: &GamepadConfig) -> Self {
        let mut gamepad = GamepadState::new();
        gamepad.load_button_config(gamepad_cfg);
        if gamepad.connected {
            log::info!("gamepad connected");
        }
        KeyboardInput {
            last_active: HashMap::with_capacity(16),
            fresh_presses: Vec::with_capacity(8),
            honor_release: false,
            quit: false,
            gamepad,
        }
    }

    /// Drain all pending terminal and gamepad events.
    fn drain_events(&mut self) {
        self.fresh_presses.clear();
        self.quit = false;

        // Read all available events without blocking
        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => self.apply_key(key, Instant::now()),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("input read failed: {e}");
                    break;
                }
            }
        }
        self.gamepad.update();
        if self.gamepad.quit_pressed() {
            self.quit = true;
        }

        self.expire(Instant::now());
    }

    fn apply_key(&mut self, key: KeyEvent, now: Instant) {
        if is_quit(&key) {
            self.quit = true;
        }
        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                self.last_active.remove(&key.code);
            }
            KeyEventKind::Release => {
                // Rely on timeout-based expiry instead
            }
            _ => {
                let was_held = self.is_held_at(key.code, now);
                self.last_active.insert(key.code, now);
                if !was_held {
                    self.fresh_presses.push(key.code);
                }
            }
        }
    }

    /// Drop keys that have timed out (fallback for terminals without Release).
    fn expire(&mut self, now: Instant) {
        self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    fn is_held_at(&self, code: KeyCode, now: Instant) -> bool {
        self.last_active.get(&code)
            .map(|t| now.duration_since(*t) < HOLD_TIMEOUT)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode], now: Instant) -> bool {
        codes.iter().any(|c| self.is_held_at(*c, now) || self.fresh_presses.contains(c))
    }

    /// Direction from held keys and the gamepad. Opposing inputs cancel.
    fn direction(&self, now: Instant) -> (i32, i32) {
        let left = self.any_held(KEYS_LEFT, now) || self.gamepad.left_held();
        let right = self.any_held(KEYS_RIGHT, now) || self.gamepad.right_held();
        let up = self.any_held(KEYS_UP, now) || self.gamepad.up_held();
        let down = self.any_held(KEYS_DOWN, now) || self.gamepad.down_held();
        (axis(left, right), axis(up, down))
    }
}

impl InputSource for KeyboardInput {
    fn poll_input(&mut self) -> InputFrame {
        self.drain_events();
        let (dx, dy) = self.direction(Instant::now());
        InputFrame { dx, dy, quit: self.quit }
    }

    fn any_key_pressed(&mut self) -> bool {
        self.drain_events();
        !self.fresh_presses.is_empty() || self.gamepad.any_pressed()
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

fn axis(neg: bool, pos: bool) -> i32 {
    match (neg, pos) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL)
            && (key.code == KeyCode::Char('c') || key.code == KeyCode::Char('C')))
}
