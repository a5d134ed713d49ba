/// Gamepad input tracker using gilrs.
///
/// Feeds the same normalized signals as the keyboard:
///   D-pad / Left Stick    →  Direction
///   Any button            →  "any key"
///   Quit buttons          →  Quit (from config.toml, default Select)
///
/// Without the `gamepad` feature this is an always-idle stub.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    L2,      // LeftTrigger2
    R2,      // RightTrigger2
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2"  => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::LeftTrigger2  => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Per-button state: held (continuous) and just_pressed (edge).
#[derive(Clone, Copy, Debug, Default)]
struct BtnState {
    held: bool,
    just_pressed: bool,
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    // All tracked buttons (indexed by Btn)
    buttons: [BtnState; 10],

    // D-pad: up, down, left, right
    dpad: [BtnState; 4],

    // Stick
    stick_x: f32,
    stick_y: f32,

    quit: Vec<Btn>,

    pub connected: bool,
}

const UP: usize = 0;
const DOWN: usize = 1;
const LEFT: usize = 2;
const RIGHT: usize = 3;

fn btn_index(btn: Btn) -> usize {
    btn as usize
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = {
            match Gilrs::new() {
                Ok(g) => {
                    let has_pad = g.gamepads().next().is_some();
                    (Some(g), has_pad)
                }
                Err(e) => {
                    log::debug!("gamepad support unavailable: {e}");
                    (None, false)
                }
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            buttons: [BtnState::default(); 10],
            dpad: [BtnState::default(); 4],
            stick_x: 0.0,
            stick_y: 0.0,
            quit: vec![Btn::Select],
            connected,
        }
    }

    /// Load the quit-button mapping from config. Unknown names are skipped;
    /// an empty result keeps the default.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        let quit: Vec<Btn> = cfg.quit.iter().filter_map(|s| Btn::from_name(s)).collect();
        if !quit.is_empty() {
            self.quit = quit;
        }
    }

    pub fn update(&mut self) {
        self.clear_just_pressed();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, true);
                }
                EventType::ButtonReleased(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, false);
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                }
                EventType::Connected => {
                    log::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.connected = false;
                    self.release_all();
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, gilrs_btn: Button, held: bool) {
        let slot = match gilrs_btn {
            Button::DPadUp    => Some(&mut self.dpad[UP]),
            Button::DPadDown  => Some(&mut self.dpad[DOWN]),
            Button::DPadLeft  => Some(&mut self.dpad[LEFT]),
            Button::DPadRight => Some(&mut self.dpad[RIGHT]),
            other => Btn::from_gilrs(other).map(|b| &mut self.buttons[btn_index(b)]),
        };
        if let Some(state) = slot {
            state.held = held;
            if held {
                state.just_pressed = true;
            }
        }
    }

    // ── Queries ──

    /// Any button or D-pad direction pressed since the last update.
    pub fn any_pressed(&self) -> bool {
        self.buttons.iter().chain(self.dpad.iter()).any(|b| b.just_pressed)
    }

    pub fn quit_pressed(&self) -> bool {
        self.quit.iter().any(|&b| self.buttons[btn_index(b)].just_pressed)
    }

    pub fn up_held(&self) -> bool {
        self.dpad[UP].held || self.stick_y > STICK_DEADZONE
    }
    pub fn down_held(&self) -> bool {
        self.dpad[DOWN].held || self.stick_y < -STICK_DEADZONE
    }
    pub fn left_held(&self) -> bool {
        self.dpad[LEFT].held || self.stick_x < -STICK_DEADZONE
    }
    pub fn right_held(&self) -> bool {
        self.dpad[RIGHT].held || self.stick_x > STICK_DEADZONE
    }

    // ── Internal ──

    fn clear_just_pressed(&mut self) {
        for b in self.buttons.iter_mut().chain(self.dpad.iter_mut()) {
            b.just_pressed = false;
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        for b in self.buttons.iter_mut().chain(self.dpad.iter_mut()) {
            *b = BtnState::default();
        }
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
