/// Scene composition: one function per phase, drawing into a cleared canvas.
///
/// All coordinates assume the fixed 320x200 layout. Colors are palette
/// slots; the shipped palette puts the HUD and panel colors at these indices.

use crate::domain::canvas::Canvas;
use crate::domain::entity::{Guard, Loot, Player};
use crate::domain::font::{draw_number, draw_text, text_width};
use crate::domain::sprite::{blit, Sprite};
use super::session::{GameSession, SpriteSet};

// ── Palette slots ──

pub const COLOR_PANEL: u8 = 1;
pub const COLOR_DANGER: u8 = 4;
pub const COLOR_BAR_BG: u8 = 8;
pub const COLOR_BORDER: u8 = 9;
pub const COLOR_BAR: u8 = 10;
pub const COLOR_PLAYER: u8 = 11;
pub const COLOR_GUARD: u8 = 12;
pub const COLOR_LOOT: u8 = 14;
pub const COLOR_TEXT: u8 = 15;

// ── Layout ──

const BORDER: i32 = 2;
const BAR_X: i32 = 10;
const BAR_Y: i32 = 4;
const BAR_W: i32 = 300;
const BAR_H: i32 = 6;
/// Fill widths beyond this wrap back to empty.
const BAR_CAP: i32 = 298;
const HUD_Y: i32 = 190;

pub const GAME_NAME: &str = "CYBER HEIST";
pub const CREDIT: &str = "A CYBERVGA PRODUCTION";
pub const CONTROLS: &str = "ARROWS MOVE  ESC QUITS";
pub const PROMPT: &str = "PRESS ANY KEY";

pub fn draw_title(canvas: &mut Canvas, s: &GameSession) {
    canvas.fill_rect(40, 30, 240, 140, COLOR_PANEL);
    canvas.fill_rect(40, 30, 240, 2, COLOR_BORDER);
    canvas.fill_rect(40, 168, 240, 2, COLOR_BORDER);

    draw_centered(canvas, 50, GAME_NAME, COLOR_LOOT, 3, 2);
    draw_centered(canvas, 80, CREDIT, COLOR_TEXT, 1, 1);
    draw_centered(canvas, 110, CONTROLS, COLOR_TEXT, 1, 1);
    draw_centered(canvas, 125, PROMPT, COLOR_BAR, 1, 1);

    if s.hiscore > 0 {
        let label = "HI SCORE ";
        let value = s.hiscore.to_string();
        let w = text_width(label, 2, 1) + 1 + text_width(&value, 2, 1);
        let x = (s.width - w) / 2;
        draw_text(canvas, x, 145, label, COLOR_TEXT, 2, 1);
        draw_number(canvas, x + text_width(label, 2, 1) + 1, 145, s.hiscore, COLOR_LOOT, 2, 1);
    }
}

/// Entities back to front, then the frame and HUD on top.
pub fn draw_play(canvas: &mut Canvas, s: &GameSession, sprites: &SpriteSet) {
    draw_entity(canvas, s.loot.x, s.loot.y, &sprites.loot, Loot::FALLBACK_SIZE, COLOR_LOOT);
    draw_entity(canvas, s.guard.x, s.guard.y, &sprites.guard, Guard::FALLBACK_SIZE, COLOR_GUARD);
    draw_entity(canvas, s.player.x, s.player.y, &sprites.player, Player::FALLBACK_SIZE, COLOR_PLAYER);

    draw_border(canvas, s.width, s.height);
    draw_hud(canvas, s);
}

pub fn draw_game_over(canvas: &mut Canvas, s: &GameSession) {
    canvas.fill_rect(60, 60, 200, 80, COLOR_PANEL);
    canvas.fill_rect(60, 60, 200, 2, COLOR_DANGER);
    canvas.fill_rect(60, 138, 200, 2, COLOR_DANGER);

    draw_centered(canvas, 75, "GAME OVER", COLOR_DANGER, 3, 2);

    let label = "SCORE ";
    let value = s.score.to_string();
    let w = text_width(label, 1, 1) + 1 + text_width(&value, 1, 1);
    let x = (s.width - w) / 2;
    draw_text(canvas, x, 102, label, COLOR_TEXT, 1, 1);
    draw_number(canvas, x + text_width(label, 1, 1) + 1, 102, s.score, COLOR_LOOT, 1, 1);

    draw_centered(canvas, 120, PROMPT, COLOR_BAR, 1, 1);
}

fn draw_entity(canvas: &mut Canvas, x: i32, y: i32, sprite: &Sprite, fallback: (u32, u32), color: u8) {
    if sprite.is_loaded() {
        blit(canvas, x, y, sprite);
    } else {
        canvas.fill_rect(x, y, fallback.0 as i32, fallback.1 as i32, color);
    }
}

fn draw_border(canvas: &mut Canvas, w: i32, h: i32) {
    canvas.fill_rect(0, 0, w, BORDER, COLOR_BORDER);
    canvas.fill_rect(0, h - BORDER, w, BORDER, COLOR_BORDER);
    canvas.fill_rect(0, 0, BORDER, h, COLOR_BORDER);
    canvas.fill_rect(w - BORDER, 0, BORDER, h, COLOR_BORDER);
}

/// Width of the filled part of the score bar.
pub fn score_bar_width(score: u32) -> i32 {
    let bar = score.min(i32::MAX as u32) as i32;
    if bar > BAR_CAP { 0 } else { bar }
}

fn draw_hud(canvas: &mut Canvas, s: &GameSession) {
    canvas.fill_rect(BAR_X, BAR_Y, BAR_W, BAR_H, COLOR_BAR_BG);
    canvas.fill_rect(BAR_X + 1, BAR_Y + 1, score_bar_width(s.score), BAR_H - 2, COLOR_BAR);

    draw_text(canvas, 10, HUD_Y, "SCORE", COLOR_TEXT, 1, 1);
    draw_number(canvas, 34, HUD_Y, s.score, COLOR_LOOT, 1, 1);

    draw_text(canvas, 180, HUD_Y, "MULTIPLIER", COLOR_TEXT, 1, 1);
    draw_number(canvas, 224, HUD_Y, s.multiplier as u32, COLOR_LOOT, 1, 1);
}

fn draw_centered(canvas: &mut Canvas, y: i32, text: &str, color: u8, scale: i32, spacing: i32) {
    let x = (canvas.width() as i32 - text_width(text, scale, spacing)) / 2;
    draw_text(canvas, x, y, text, color, scale, spacing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::canvas::{SCREEN_H, SCREEN_W};

    fn screen() -> Canvas {
        Canvas::new(SCREEN_W, SCREEN_H).unwrap()
    }

    fn count(c: &Canvas, color: u8) -> usize {
        c.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn score_bar_wraps_past_cap() {
        assert_eq!(score_bar_width(0), 0);
        assert_eq!(score_bar_width(120), 120);
        assert_eq!(score_bar_width(298), 298);
        assert_eq!(score_bar_width(299), 0);
        assert_eq!(score_bar_width(u32::MAX), 0);
    }

    #[test]
    fn play_draws_fallback_rects_and_frame() {
        let mut c = screen();
        let mut s = GameSession::new();
        s.score = 50;
        draw_play(&mut c, &s, &SpriteSet::disabled());

        assert_eq!(c.get(s.player.x as usize + 1, s.player.y as usize + 1), COLOR_PLAYER);
        assert_eq!(c.get(s.guard.x as usize + 1, s.guard.y as usize + 20), COLOR_GUARD);
        assert_eq!(c.get(s.loot.x as usize + 8, s.loot.y as usize + 8), COLOR_LOOT);
        for &(x, y) in &[(0, 0), (319, 0), (0, 199), (319, 199), (1, 100), (318, 100)] {
            assert_eq!(c.get(x, y), COLOR_BORDER);
        }
        // Bar fill is exactly `score` pixels wide.
        assert_eq!(count(&c, COLOR_BAR), 50 * 4);
    }

    #[test]
    fn later_entities_occlude_earlier_ones() {
        let mut c = screen();
        let mut s = GameSession::new();
        s.loot.x = 100;
        s.loot.y = 100;
        s.guard.x = 100;
        s.guard.y = 100;
        s.player.x = 100;
        s.player.y = 100;
        draw_play(&mut c, &s, &SpriteSet::disabled());
        assert_eq!(c.get(105, 105), COLOR_PLAYER);
        assert_eq!(count(&c, COLOR_GUARD), 0);
    }

    #[test]
    fn play_blits_loaded_sprites() {
        let mut c = screen();
        let s = GameSession::new();
        let mut sprites = SpriteSet::disabled();
        sprites.player = Sprite::new(2, 2, vec![33, 0, 0, 33]).unwrap();
        draw_play(&mut c, &s, &sprites);
        let (px, py) = (s.player.x as usize, s.player.y as usize);
        assert_eq!(c.get(px, py), 33);
        assert_eq!(c.get(px + 1, py), 0);
        assert_eq!(count(&c, COLOR_PLAYER), 0);
    }

    #[test]
    fn title_shows_hiscore_only_when_set() {
        let mut s = GameSession::new();
        let mut without = screen();
        draw_title(&mut without, &s);

        s.hiscore = 42;
        let mut with = screen();
        draw_title(&mut with, &s);

        assert!(count(&with, COLOR_LOOT) > count(&without, COLOR_LOOT));
        assert!(count(&without, COLOR_PANEL) > 0);
    }

    #[test]
    fn game_over_panel() {
        let mut c = screen();
        draw_game_over(&mut c, &GameSession::new());
        assert!(count(&c, COLOR_DANGER) > 0);
        assert!(count(&c, COLOR_PANEL) > 0);
    }
}
