/// Display driver capability.
///
/// Per frame the loop calls `wait_for_vsync` then `present`, exactly once
/// each. Mode and palette are set once at startup.

use std::io;

use crate::domain::palette::VgaPalette;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DisplayMode {
    /// 320x200, 256 indexed colors.
    Graphics,
    /// Console restored; used at shutdown and after fatal errors.
    Text,
}

pub trait DisplayDriver {
    fn set_display_mode(&mut self, mode: DisplayMode) -> io::Result<()>;
    fn apply_palette(&mut self, palette: &VgaPalette) -> io::Result<()>;
    /// Block until the display is ready for the next frame.
    fn wait_for_vsync(&mut self);
    /// Commit a finished frame. `buffer.len()` is the frame size in bytes.
    fn present(&mut self, buffer: &[u8]) -> io::Result<()>;
}
