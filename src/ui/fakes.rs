/// Test doubles for the display driver and the input source.

use std::collections::VecDeque;
use std::io;

use crate::domain::entity::InputFrame;
use crate::domain::palette::VgaPalette;
use super::driver::{DisplayDriver, DisplayMode};
use crate::sim::input::InputSource;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SetMode(DisplayMode),
    Palette,
    Vsync,
    Present(usize),
}

/// Records every driver call, plus a copy of each presented frame.
#[derive(Default)]
pub struct RecordingDisplay {
    pub calls: Vec<Call>,
    pub frames: Vec<Vec<u8>>,
    pub palette: Option<VgaPalette>,
}

impl DisplayDriver for RecordingDisplay {
    fn set_display_mode(&mut self, mode: DisplayMode) -> io::Result<()> {
        self.calls.push(Call::SetMode(mode));
        Ok(())
    }

    fn apply_palette(&mut self, palette: &VgaPalette) -> io::Result<()> {
        self.calls.push(Call::Palette);
        self.palette = Some(palette.clone());
        Ok(())
    }

    fn wait_for_vsync(&mut self) {
        self.calls.push(Call::Vsync);
    }

    fn present(&mut self, buffer: &[u8]) -> io::Result<()> {
        self.calls.push(Call::Present(buffer.len()));
        self.frames.push(buffer.to_vec());
        Ok(())
    }
}

/// What the input source reports on one call.
#[derive(Clone, Copy, Debug)]
pub enum Tick {
    Idle,
    Key,
    Quit,
    Play(InputFrame),
}

impl Tick {
    pub fn key() -> Tick {
        Tick::Key
    }

    pub fn quit() -> Tick {
        Tick::Quit
    }

    pub fn moving(dx: i32, dy: i32) -> Tick {
        Tick::Play(InputFrame { dx, dy, quit: false })
    }
}

/// Replays one scripted entry per call; idle once the script runs out.
pub struct ScriptedInput {
    script: VecDeque<Tick>,
    quit: bool,
}

impl ScriptedInput {
    pub fn new(script: Vec<Tick>) -> Self {
        ScriptedInput { script: script.into(), quit: false }
    }

    fn next(&mut self) -> Tick {
        let t = self.script.pop_front().unwrap_or(Tick::Idle);
        self.quit = match t {
            Tick::Quit => true,
            Tick::Play(f) => f.quit,
            _ => false,
        };
        t
    }
}

impl InputSource for ScriptedInput {
    fn poll_input(&mut self) -> InputFrame {
        match self.next() {
            Tick::Play(f) => f,
            Tick::Quit => InputFrame { quit: true, ..InputFrame::default() },
            Tick::Idle | Tick::Key => InputFrame::default(),
        }
    }

    fn any_key_pressed(&mut self) -> bool {
        match self.next() {
            Tick::Key | Tick::Quit => true,
            Tick::Play(f) => f.dx != 0 || f.dy != 0 || f.quit,
            Tick::Idle => false,
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
