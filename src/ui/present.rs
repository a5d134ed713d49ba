/// Frame presentation loop.
///
/// Owns the two canvases. Each tick draws into the active one, waits for
/// vertical sync, hands it to the driver, then flips which canvas is active;
/// the other one is left alone while the display may still be reading it.

use std::io;

use crate::domain::canvas::{Canvas, SCREEN_H, SCREEN_RES, SCREEN_W};
use crate::domain::palette::VgaPalette;
use crate::error::StartupError;
use crate::sim::event::GameEvent;
use crate::sim::input::InputSource;
use crate::sim::session::{GameSession, SpriteSet};
use crate::sim::step;
use super::driver::{DisplayDriver, DisplayMode};

pub struct FramePresenter<D: DisplayDriver> {
    driver: D,
    buffers: [Canvas; 2],
    active: usize,
    presented: u64,
}

impl<D: DisplayDriver> FramePresenter<D> {
    /// Allocate both frame buffers up front.
    pub fn new(driver: D) -> Result<Self, StartupError> {
        let alloc = || {
            Canvas::new(SCREEN_W, SCREEN_H).map_err(|_| StartupError::FrameBuffer { bytes: SCREEN_RES })
        };
        let buffers = [alloc()?, alloc()?];
        Ok(FramePresenter { driver, buffers, active: 0, presented: 0 })
    }

    /// Switch to graphics mode and upload the palette.
    pub fn start(&mut self, palette: &VgaPalette) -> io::Result<()> {
        self.driver.set_display_mode(DisplayMode::Graphics)?;
        self.driver.apply_palette(palette)
    }

    /// Run ticks until the input source asks to quit.
    pub fn run(
        &mut self,
        session: &mut GameSession,
        sprites: &SpriteSet,
        input: &mut dyn InputSource,
    ) -> io::Result<()> {
        while self.frame(session, sprites, input)? {}
        log::info!("presented {} frames", self.presented);
        Ok(())
    }

    /// One tick: clear → update/draw → vsync → present → swap.
    /// Returns `false` once quit was requested; that frame is not presented.
    pub fn frame(
        &mut self,
        session: &mut GameSession,
        sprites: &SpriteSet,
        input: &mut dyn InputSource,
    ) -> io::Result<bool> {
        let canvas = &mut self.buffers[self.active];
        canvas.clear();

        let events = step::tick(session, input, sprites, canvas);
        if log_events(&events) {
            return Ok(false);
        }

        self.driver.wait_for_vsync();
        self.driver.present(self.buffers[self.active].pixels())?;
        self.active ^= 1;
        self.presented += 1;
        Ok(true)
    }

    /// Restore text mode.
    pub fn shutdown(&mut self) -> io::Result<()> {
        self.driver.set_display_mode(DisplayMode::Text)
    }

    #[cfg(test)]
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

/// Log the tick's events. Returns true when quit was requested.
fn log_events(events: &[GameEvent]) -> bool {
    let mut quit = false;
    for event in events {
        match event {
            GameEvent::QuitRequested => {
                log::info!("quit requested");
                quit = true;
            }
            GameEvent::GameStarted => log::debug!("phase: title -> play"),
            GameEvent::LootCollected { score, multiplier, guard_speed } => log::debug!(
                "loot collected: score={score} multiplier={multiplier:.2} guard_speed={guard_speed}"
            ),
            GameEvent::HighScore { value } => log::info!("new high score {value}"),
            GameEvent::GuardCaught { score } => log::info!("caught by guard, score {score}"),
            GameEvent::ReturnedToTitle => log::debug!("phase: game over -> title"),
        }
    }
    quit
}
