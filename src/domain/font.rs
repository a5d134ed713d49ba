/// Fixed 3x5 bitmap font: digits 0-9 and letters A-Z.
///
/// Each glyph is five rows of three bits; bit 2 is the leftmost column.

use super::canvas::Canvas;

pub const GLYPH_W: i32 = 3;
pub const GLYPH_H: i32 = 5;

#[rustfmt::skip]
pub const GLYPHS: [[u8; GLYPH_H as usize]; 36] = [
    [7, 5, 5, 5, 7], // 0
    [2, 6, 2, 2, 7], // 1
    [7, 1, 7, 4, 7], // 2
    [7, 1, 7, 1, 7], // 3
    [5, 5, 7, 1, 1], // 4
    [7, 4, 7, 1, 7], // 5
    [7, 4, 7, 5, 7], // 6
    [7, 1, 1, 2, 2], // 7
    [7, 5, 7, 5, 7], // 8
    [7, 5, 7, 1, 7], // 9
    [2, 5, 7, 5, 5], // A
    [6, 5, 6, 5, 6], // B
    [3, 4, 4, 4, 3], // C
    [6, 5, 5, 5, 6], // D
    [7, 4, 6, 4, 7], // E
    [7, 4, 6, 4, 4], // F
    [3, 4, 5, 5, 3], // G
    [5, 5, 7, 5, 5], // H
    [7, 2, 2, 2, 7], // I
    [1, 1, 1, 5, 2], // J
    [5, 5, 6, 5, 5], // K
    [4, 4, 4, 4, 7], // L
    [5, 7, 7, 5, 5], // M
    [6, 5, 5, 5, 5], // N
    [2, 5, 5, 5, 2], // O
    [6, 5, 6, 4, 4], // P
    [2, 5, 5, 6, 3], // Q
    [6, 5, 6, 5, 5], // R
    [3, 4, 2, 1, 6], // S
    [7, 2, 2, 2, 2], // T
    [5, 5, 5, 5, 7], // U
    [5, 5, 5, 5, 2], // V
    [5, 5, 7, 7, 5], // W
    [5, 5, 2, 5, 5], // X
    [5, 5, 2, 2, 2], // Y
    [7, 1, 2, 4, 7], // Z
];

/// Glyph for `c`, folding lowercase to uppercase. `None` for anything
/// outside 0-9 / A-Z.
pub fn glyph(c: char) -> Option<&'static [u8; GLYPH_H as usize]> {
    match c.to_ascii_uppercase() {
        d @ '0'..='9' => Some(&GLYPHS[(d as u8 - b'0') as usize]),
        l @ 'A'..='Z' => Some(&GLYPHS[10 + (l as u8 - b'A') as usize]),
        _ => None,
    }
}

/// Horizontal distance between glyph origins.
pub fn advance(scale: i32, spacing: i32) -> i32 {
    GLYPH_W * scale + spacing
}

/// Draw `text` left to right starting at (x, y). Every character advances
/// the cursor by the same step; spaces and characters without a glyph draw
/// nothing.
pub fn draw_text(canvas: &mut Canvas, x: i32, y: i32, text: &str, color: u8, scale: i32, spacing: i32) {
    let step = advance(scale, spacing);
    let mut cx = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            draw_glyph(canvas, cx, y, rows, color, scale);
        }
        cx = cx.saturating_add(step);
    }
}

/// Draw a non-negative integer in decimal: no sign, no separators, no
/// leading zeros, and "0" for zero.
pub fn draw_number(canvas: &mut Canvas, x: i32, y: i32, value: u32, color: u8, scale: i32, spacing: i32) {
    draw_text(canvas, x, y, &value.to_string(), color, scale, spacing);
}

/// Pixel width of `text` as laid out by `draw_text` (without trailing spacing).
pub fn text_width(text: &str, scale: i32, spacing: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        n * advance(scale, spacing) - spacing
    }
}

fn draw_glyph(canvas: &mut Canvas, x: i32, y: i32, rows: &[u8; GLYPH_H as usize], color: u8, scale: i32) {
    for row in 0..GLYPH_H {
        let bits = rows[row as usize];
        for col in 0..GLYPH_W {
            if bits & (0b100 >> col) != 0 {
                canvas.fill_rect(x + col * scale, y + row * scale, scale, scale, color);
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

    fn lit(c: &Canvas) -> usize {
        c.pixels().iter().filter(|&&p| p != 0).count()
    }

    fn bits_set(rows: &[u8; 5]) -> usize {
        rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    #[test]
    fn every_glyph_fits_three_columns() {
        for g in GLYPHS.iter() {
            assert!(g.iter().all(|&r| r < 8));
            assert!(bits_set(g) > 0);
        }
    }

    #[test]
    fn lowercase_folds_to_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
        assert_eq!(glyph('7'), Some(&GLYPHS[7]));
        assert!(glyph('!').is_none());
        assert!(glyph(' ').is_none());
    }

    #[test]
    fn glyph_bits_map_to_pixels() {
        let mut c = screen();
        // "7" = 111 / 001 / 001 / 010 / 010
        draw_text(&mut c, 10, 10, "7", 4, 1, 1);
        assert_eq!(c.get(10, 10), 4);
        assert_eq!(c.get(12, 10), 4);
        assert_eq!(c.get(10, 11), 0);
        assert_eq!(c.get(12, 11), 4);
        assert_eq!(c.get(11, 13), 4);
        assert_eq!(lit(&c), 7);
    }

    #[test]
    fn scale_fills_blocks() {
        let mut c = screen();
        draw_text(&mut c, 0, 0, "1", 2, 3, 0);
        assert_eq!(lit(&c), bits_set(&GLYPHS[1]) * 9);
        // Top row of "1" is 010: block at x 3..6.
        assert_eq!(c.get(3, 0), 2);
        assert_eq!(c.get(5, 2), 2);
        assert_eq!(c.get(2, 0), 0);
        assert_eq!(c.get(6, 0), 0);
    }

    #[test]
    fn space_and_symbols_advance_without_drawing() {
        let mut a = screen();
        draw_text(&mut a, 0, 0, "A B", 1, 2, 1);
        let mut b = screen();
        draw_text(&mut b, 0, 0, "A#B", 1, 2, 1);
        assert_eq!(a.pixels(), b.pixels());

        // Second glyph starts at 2 steps of (3*2 + 1).
        let mut c = screen();
        draw_text(&mut c, 14, 0, "B", 1, 2, 1);
        let mut only_a = screen();
        draw_text(&mut only_a, 0, 0, "A", 1, 2, 1);
        assert_eq!(lit(&a), lit(&c) + lit(&only_a));
    }

    #[test]
    fn numbers_render_as_plain_decimal() {
        let mut n = screen();
        draw_number(&mut n, 5, 5, 0, 1, 1, 1);
        let mut t = screen();
        draw_text(&mut t, 5, 5, "0", 1, 1, 1);
        assert_eq!(n.pixels(), t.pixels());

        let mut n = screen();
        draw_number(&mut n, 5, 5, 1024, 1, 1, 1);
        let mut t = screen();
        draw_text(&mut t, 5, 5, "1024", 1, 1, 1);
        assert_eq!(n.pixels(), t.pixels());
        assert_eq!(1024u32.to_string(), "1024");
        assert_eq!(7u32.to_string(), "7");
    }

    #[test]
    fn text_is_clipped_at_canvas_edges() {
        let mut c = screen();
        draw_text(&mut c, 315, 197, "WWW", 1, 2, 1);
        draw_text(&mut c, -10, -3, "HELLO", 1, 2, 1);
        assert!(lit(&c) > 0);
    }

    #[test]
    fn width_of_laid_out_text() {
        assert_eq!(text_width("", 2, 1), 0);
        assert_eq!(text_width("A", 2, 1), 6);
        assert_eq!(text_width("ABC", 2, 1), 20);
    }
}
