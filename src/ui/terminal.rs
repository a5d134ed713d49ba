/// Terminal display driver: double-buffered, diff-based crossterm output.
///
/// How it works:
///   1. Sample the indexed canvas into the `front` cell grid. Each terminal
///      cell shows two canvas rows with an upper-half block: foreground is
///      the top pixel, background the bottom one.
///   2. Compare each cell with `back` (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// `pixel_step` picks every Nth canvas pixel on both axes so the 320x200
/// canvas fits ordinary terminal sizes.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::DisplayConfig;
use crate::domain::canvas::SCREEN_W;
use crate::domain::palette::{VgaPalette, PALETTE_SIZE};
use super::driver::{DisplayDriver, DisplayMode};

const HALF_BLOCK: &str = "\u{2580}";

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    top: u8,
    bottom: u8,
    /// False only for the sentinel that forces a repaint.
    valid: bool,
}

impl Cell {
    const BLANK: Cell = Cell { top: 0, bottom: 0, valid: true };
    const INVALID: Cell = Cell { top: 0, bottom: 0, valid: false };
}

// ── CellBuffer: a 2D grid of Cells ──

#[derive(Debug)]
struct CellBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellBuffer {
    fn new(w: usize, h: usize) -> Self {
        CellBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn invalidate(&mut self) {
        self.cells.fill(Cell::INVALID);
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Fill from an indexed frame `frame_w` pixels wide, taking every
    /// `step`th pixel. Rows past the frame's end read as color 0.
    fn sample(&mut self, frame: &[u8], frame_w: usize, step: usize) {
        let frame_h = frame.len() / frame_w.max(1);
        let px = |x: usize, y: usize| if x < frame_w && y < frame_h { frame[y * frame_w + x] } else { 0 };
        for row in 0..self.height {
            let top_y = row * 2 * step;
            let bottom_y = top_y + step;
            for col in 0..self.width {
                let x = col * step;
                self.cells[row * self.width + col] = Cell {
                    top: px(x, top_y),
                    bottom: px(x, bottom_y),
                    valid: true,
                };
            }
        }
    }
}

/// Terminal grid needed for a frame of `w x h` pixels at `step`.
fn grid_size(w: usize, h: usize, step: usize) -> (usize, usize) {
    let step = step.max(1);
    (w.div_ceil(step), h.div_ceil(2 * step))
}

// ── TerminalDisplay ──

pub struct TerminalDisplay {
    writer: BufWriter<io::Stdout>,
    front: CellBuffer,
    back: CellBuffer,
    colors: [Color; PALETTE_SIZE],
    pixel_step: usize,
    frame_time: Duration,
    next_frame: Instant,
    term_w: usize,
    term_h: usize,
    mode: DisplayMode,
}

impl TerminalDisplay {
    pub fn new(cfg: &DisplayConfig) -> Self {
        TerminalDisplay {
            writer: BufWriter::with_capacity(65536, io::stdout()),
            front: CellBuffer::new(0, 0),
            back: CellBuffer::new(0, 0),
            colors: [Color::Black; PALETTE_SIZE],
            pixel_step: cfg.pixel_step.max(1),
            frame_time: Duration::from_millis(cfg.frame_ms),
            next_frame: Instant::now(),
            term_w: 0,
            term_h: 0,
            mode: DisplayMode::Text,
        }
    }

    fn enter_graphics(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )?;
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        // Force full repaint on first frame.
        self.back.invalidate();
        self.next_frame = Instant::now();
        Ok(())
    }

    fn leave_graphics(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Top-left terminal cell of the picture, centered when there is room.
    fn origin(&self) -> (usize, usize) {
        (
            self.term_w.saturating_sub(self.front.width) / 2,
            self.term_h.saturating_sub(self.front.height) / 2,
        )
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let (ox, oy) = self.origin();
        let visible_w = self.front.width.min(self.term_w.saturating_sub(ox));
        let visible_h = self.front.height.min(self.term_h.saturating_sub(oy));

        let mut last_fg: Option<u8> = None;
        let mut last_bg: Option<u8> = None;
        let mut cursor_at: Option<(usize, usize)> = None;

        for y in 0..visible_h {
            for x in 0..visible_w {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }

                // Position cursor if needed
                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo((ox + x) as u16, (oy + y) as u16))?;
                }

                // Set colors only if changed
                if last_fg != Some(cell.top) {
                    queue!(self.writer, SetForegroundColor(self.colors[cell.top as usize]))?;
                    last_fg = Some(cell.top);
                }
                if last_bg != Some(cell.bottom) {
                    queue!(self.writer, SetBackgroundColor(self.colors[cell.bottom as usize]))?;
                    last_bg = Some(cell.bottom);
                }

                queue!(self.writer, Print(HALF_BLOCK))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }
}

impl DisplayDriver for TerminalDisplay {
    fn set_display_mode(&mut self, mode: DisplayMode) -> io::Result<()> {
        if mode == self.mode {
            return Ok(());
        }
        match mode {
            DisplayMode::Graphics => self.enter_graphics()?,
            DisplayMode::Text => self.leave_graphics()?,
        }
        self.mode = mode;
        log::debug!("display mode {:?}", mode);
        Ok(())
    }

    fn apply_palette(&mut self, palette: &VgaPalette) -> io::Result<()> {
        for (i, slot) in self.colors.iter_mut().enumerate() {
            let c = palette.rgb8(i as u8);
            *slot = Color::Rgb { r: c.r, g: c.g, b: c.b };
        }
        // Same indices, new colors: everything must be re-emitted.
        self.back.invalidate();
        Ok(())
    }

    fn wait_for_vsync(&mut self) {
        let now = Instant::now();
        if now < self.next_frame {
            std::thread::sleep(self.next_frame - now);
        }
        self.next_frame = self.next_frame.max(now) + self.frame_time;
    }

    fn present(&mut self, buffer: &[u8]) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.back.invalidate();
            queue!(self.writer, SetBackgroundColor(Color::Black), Clear(ClearType::All))?;
        }

        let frame_h = buffer.len() / SCREEN_W;
        let (cols, rows) = grid_size(SCREEN_W, frame_h, self.pixel_step);
        if self.front.width != cols || self.front.height != rows {
            self.front.resize(cols, rows);
            self.back.resize(cols, rows);
            self.back.invalidate();
        }

        self.front.sample(buffer, SCREEN_W, self.pixel_step);
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}
