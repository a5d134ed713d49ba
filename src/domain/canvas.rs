/// Indexed-color pixel canvas.
///
/// One byte per pixel, each byte naming a palette slot. Index 0 is the
/// background color written by `clear()`.
///
/// Every drawing operation is defined for any integer input: the parts of a
/// rectangle that fall outside `[0, width) × [0, height)` are clipped away.

use std::collections::TryReserveError;

pub const SCREEN_W: usize = 320;
pub const SCREEN_H: usize = 200;
pub const SCREEN_RES: usize = SCREEN_W * SCREEN_H;

#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a zeroed canvas. Fails only if the pixel storage can't be
    /// reserved.
    pub fn new(width: usize, height: usize) -> Result<Self, TryReserveError> {
        let len = width * height;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, 0);
        Ok(Canvas { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Solid rectangle with its top-left at (x, y). Negative extents, or a
    /// rectangle that clips to nothing, draw nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else { return };
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(color);
        }
    }

    /// Intersect a rectangle with the canvas. Returns `(x0, y0, x1, y1)` as
    /// half-open bounds, or `None` when the intersection is empty.
    pub fn clip(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(usize, usize, usize, usize)> {
        let (x, y, w, h) = (x as i64, y as i64, w as i64, h as i64);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i64);
        let y1 = (y + h).min(self.height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Canvas {
        Canvas::new(SCREEN_W, SCREEN_H).unwrap()
    }

    fn count(c: &Canvas, color: u8) -> usize {
        c.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn new_canvas_is_cleared() {
        let c = screen();
        assert_eq!(c.pixels().len(), SCREEN_RES);
        assert_eq!(count(&c, 0), SCREEN_RES);
    }

    #[test]
    fn clear_resets_every_pixel() {
        let mut c = screen();
        c.fill_rect(0, 0, 320, 200, 9);
        c.clear();
        assert_eq!(count(&c, 0), SCREEN_RES);
    }

    #[test]
    fn fill_rect_inside() {
        let mut c = screen();
        c.fill_rect(10, 20, 4, 3, 7);
        assert_eq!(count(&c, 7), 12);
        assert_eq!(c.get(10, 20), 7);
        assert_eq!(c.get(13, 22), 7);
        assert_eq!(c.get(14, 22), 0);
        assert_eq!(c.get(13, 23), 0);
    }

    #[test]
    fn fill_rect_clips_every_edge() {
        let mut c = screen();
        c.fill_rect(-5, -5, 10, 10, 3);
        assert_eq!(count(&c, 3), 25);

        c.clear();
        c.fill_rect(315, 195, 50, 50, 3);
        assert_eq!(count(&c, 3), 25);
        assert_eq!(c.get(319, 199), 3);
    }

    #[test]
    fn degenerate_rects_draw_nothing() {
        let mut c = screen();
        c.fill_rect(10, 10, 0, 5, 1);
        c.fill_rect(10, 10, 5, 0, 1);
        c.fill_rect(10, 10, -4, 5, 1);
        c.fill_rect(10, 10, 5, -4, 1);
        c.fill_rect(400, 10, 5, 5, 1);
        c.fill_rect(-20, 10, 5, 5, 1);
        c.fill_rect(10, 250, 5, 5, 1);
        assert_eq!(count(&c, 1), 0);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let mut c = screen();
        c.fill_rect(i32::MAX, i32::MAX, i32::MAX, i32::MAX, 1);
        c.fill_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, 1);
        assert_eq!(count(&c, 1), 0);
    }

    #[test]
    fn out_of_range_get_set() {
        let mut c = screen();
        c.set(320, 0, 5);
        c.set(0, 200, 5);
        assert_eq!(count(&c, 5), 0);
        assert_eq!(c.get(1000, 1000), 0);
    }
}
