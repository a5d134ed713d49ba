/// Color-keyed sprites and the compositor that draws them.
///
/// Pixel index 0 is transparent: it is never written, so whatever was drawn
/// beneath shows through.

use super::canvas::Canvas;

pub const TRANSPARENT: u8 = 0;

/// A rectangular pixel-index image. Immutable after construction.
///
/// A sprite without pixels is the "disabled" sentinel: callers fall back to
/// drawing a filled rectangle and to a default collision extent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Option<Box<[u8]>>,
}

impl Sprite {
    /// Build a sprite from row-major pixel indices.
    /// Returns `None` when `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Sprite { width, height, pixels: Some(pixels.into_boxed_slice()) })
    }

    pub fn disabled() -> Self {
        Sprite { width: 0, height: 0, pixels: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.pixels.as_ref().map_or(false, |p| !p.is_empty())
    }

    #[cfg(test)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Extent used for layout and collision: the real size when loaded,
    /// otherwise `fallback`.
    pub fn extent_or(&self, fallback: (u32, u32)) -> (u32, u32) {
        if self.is_loaded() {
            (self.width as u32, self.height as u32)
        } else {
            fallback
        }
    }
}

/// Draw `sprite` with its top-left corner at (x, y).
///
/// Only the intersection of the sprite's rectangle with the canvas is
/// visited, so partially (or fully) off-canvas placement never touches
/// memory outside either buffer.
pub fn blit(canvas: &mut Canvas, x: i32, y: i32, sprite: &Sprite) {
    let src = match &sprite.pixels {
        Some(p) if !p.is_empty() => p,
        _ => return,
    };
    let Some((x0, y0, x1, y1)) = canvas.clip(x, y, sprite.width as i32, sprite.height as i32) else {
        return;
    };

    for dy in y0..y1 {
        let sy = (dy as i64 - y as i64) as usize;
        let row = &src[sy * sprite.width..(sy + 1) * sprite.width];
        for dx in x0..x1 {
            let sx = (dx as i64 - x as i64) as usize;
            let p = row[sx];
            if p != TRANSPARENT {
                canvas.set(dx, dy, p);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::canvas::{SCREEN_H, SCREEN_W};

    fn screen() -> Canvas {
        Canvas::new(SCREEN_W, SCREEN_H).unwrap()
    }

    /// 4x4 sprite: solid border of color 5, transparent 2x2 hole in the middle.
    fn ring() -> Sprite {
        #[rustfmt::skip]
        let px = vec![
            5, 5, 5, 5,
            5, 0, 0, 5,
            5, 0, 0, 5,
            5, 5, 5, 5,
        ];
        Sprite::new(4, 4, px).unwrap()
    }

    fn painted(c: &Canvas) -> usize {
        c.pixels().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn size_mismatch_is_rejected() {
        assert!(Sprite::new(4, 4, vec![1; 15]).is_none());
        assert!(Sprite::new(2, 3, vec![1; 6]).is_some());
    }

    #[test]
    fn disabled_sprite_reports_fallback_extent() {
        let s = Sprite::disabled();
        assert!(!s.is_loaded());
        assert_eq!(s.extent_or((16, 32)), (16, 32));
        assert_eq!(ring().extent_or((16, 32)), (4, 4));
    }

    #[test]
    fn transparent_pixels_keep_background() {
        let mut c = screen();
        c.fill_rect(0, 0, 10, 10, 9);
        blit(&mut c, 2, 2, &ring());
        assert_eq!(c.get(2, 2), 5);
        assert_eq!(c.get(3, 3), 9);
        assert_eq!(c.get(4, 4), 9);
        assert_eq!(c.get(5, 5), 5);
    }

    #[test]
    fn disabled_sprite_is_noop() {
        let mut c = screen();
        blit(&mut c, 10, 10, &Sprite::disabled());
        assert_eq!(painted(&c), 0);
    }

    #[test]
    fn partial_clip_on_each_side() {
        let mut c = screen();
        blit(&mut c, -2, -2, &ring());
        // Visible quarter: rows/cols 2..4 of the sprite.
        assert_eq!(c.get(0, 0), 0);
        assert_eq!(c.get(1, 0), 5);
        assert_eq!(c.get(0, 1), 5);
        assert_eq!(painted(&c), 3);

        let mut c = screen();
        blit(&mut c, SCREEN_W as i32 - 2, SCREEN_H as i32 - 2, &ring());
        assert_eq!(c.get(SCREEN_W - 2, SCREEN_H - 2), 5);
        assert_eq!(c.get(SCREEN_W - 1, SCREEN_H - 1), 0);
        assert_eq!(painted(&c), 3);
    }

    #[test]
    fn fully_off_canvas_is_noop() {
        let mut c = screen();
        for &(x, y) in &[(-4, 0), (0, -4), (SCREEN_W as i32, 0), (0, SCREEN_H as i32), (-100, -100)] {
            blit(&mut c, x, y, &ring());
        }
        assert_eq!(painted(&c), 0);
    }

    #[test]
    fn never_writes_outside_any_position() {
        let s = Sprite::new(3, 3, vec![1; 9]).unwrap();
        for y in -4..=(SCREEN_H as i32 + 1) {
            for &x in &[-4, -2, 0, 150, SCREEN_W as i32 - 2, SCREEN_W as i32] {
                let mut c = screen();
                blit(&mut c, x, y, &s);
                let expected_w = (x.max(0)..(x + 3).min(SCREEN_W as i32)).len();
                let expected_h = (y.max(0)..(y + 3).min(SCREEN_H as i32)).len();
                assert_eq!(painted(&c), expected_w * expected_h, "at ({x}, {y})");
            }
        }
    }
}
