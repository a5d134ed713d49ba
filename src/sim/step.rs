/// The tick function: advances the session by one frame and draws it.
///
/// Play processing order:
///   1. Input (direction + quit)
///   2. Player movement and clamp
///   3. Guard patrol
///   4. Entities drawn: loot → guard → player
///   5. Border and HUD
///   6. Loot pickup
///   7. Guard contact → GameOver
///
/// Pickups and guard contact are resolved after drawing, so their effect
/// shows from the next frame on.

use crate::domain::canvas::Canvas;
use super::event::GameEvent;
use super::input::InputSource;
use super::scene;
use super::session::{GameSession, Phase, SpriteSet};

/// Distance divisor for the pickup multiplier.
const MULTIPLIER_DIVISOR: f64 = 20.0;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

/// Run one tick for the active phase, drawing into `canvas`.
///
/// Returns early with `QuitRequested` when the input source reports quit;
/// in that case the frame is incomplete and must not be presented.
pub fn tick(
    session: &mut GameSession,
    input: &mut dyn InputSource,
    sprites: &SpriteSet,
    canvas: &mut Canvas,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match session.phase {
        Phase::Title => tick_title(session, input, canvas, &mut events),
        Phase::Play => tick_play(session, input, sprites, canvas, &mut events),
        Phase::GameOver => tick_game_over(session, input, canvas, &mut events),
    }

    if events.contains(&GameEvent::QuitRequested) {
        return events;
    }

    session.frame = session.frame.wrapping_add(1);
    events
}

// ══════════════════════════════════════════════════════════════
// Title
// ══════════════════════════════════════════════════════════════

fn tick_title(
    session: &mut GameSession,
    input: &mut dyn InputSource,
    canvas: &mut Canvas,
    events: &mut Vec<GameEvent>,
) {
    // Re-applied every tick, not only on entry.
    session.reset();
    scene::draw_title(canvas, session);

    let pressed = input.any_key_pressed();
    if input.quit_requested() {
        events.push(GameEvent::QuitRequested);
        return;
    }
    if pressed {
        session.reset();
        session.phase = Phase::Play;
        events.push(GameEvent::GameStarted);
    }
}

// ══════════════════════════════════════════════════════════════
// Play
// ══════════════════════════════════════════════════════════════

fn tick_play(
    session: &mut GameSession,
    input: &mut dyn InputSource,
    sprites: &SpriteSet,
    canvas: &mut Canvas,
    events: &mut Vec<GameEvent>,
) {
    let frame_input = input.poll_input();
    if frame_input.quit {
        events.push(GameEvent::QuitRequested);
        return;
    }

    let (w, h) = (session.width, session.height);
    session.player.advance(frame_input.dx, frame_input.dy, w, h);
    session.guard.patrol(w, h);

    scene::draw_play(canvas, session, sprites);

    resolve_loot_pickup(session, sprites, events);
    resolve_guard_contact(session, sprites, events);
}

/// Player touching the loot: respawn it, score a distance bonus, speed the
/// guard up.
pub fn resolve_loot_pickup(session: &mut GameSession, sprites: &SpriteSet, events: &mut Vec<GameEvent>) {
    if !session.player_box(sprites).overlaps(&session.loot_box(sprites)) {
        return;
    }

    session.loot.relocate(session.frame);

    let dx = (session.guard.x - session.player.x).abs() as f64;
    let dy = (session.guard.y - session.player.y).abs() as f64;
    session.multiplier = (dx * dx + dy * dy).sqrt() / MULTIPLIER_DIVISOR;

    // Fractional part is dropped on accumulation.
    session.score = session.score.saturating_add((session.multiplier + 1.0) as u32);
    session.guard.speed += 1;

    events.push(GameEvent::LootCollected {
        score: session.score,
        multiplier: session.multiplier,
        guard_speed: session.guard.speed,
    });
}

/// Player touching the guard ends the session.
pub fn resolve_guard_contact(session: &mut GameSession, sprites: &SpriteSet, events: &mut Vec<GameEvent>) {
    if !session.player_box(sprites).overlaps(&session.guard_box(sprites)) {
        return;
    }

    session.game_over = true;
    if session.score > session.hiscore {
        session.hiscore = session.score;
        events.push(GameEvent::HighScore { value: session.hiscore });
    }
    session.phase = Phase::GameOver;
    events.push(GameEvent::GuardCaught { score: session.score });
}

// ══════════════════════════════════════════════════════════════
// Game Over
// ══════════════════════════════════════════════════════════════

fn tick_game_over(
    session: &mut GameSession,
    input: &mut dyn InputSource,
    canvas: &mut Canvas,
    events: &mut Vec<GameEvent>,
) {
    scene::draw_game_over(canvas, session);

    let pressed = input.any_key_pressed();
    if input.quit_requested() {
        events.push(GameEvent::QuitRequested);
        return;
    }
    if pressed {
        session.phase = Phase::Title;
        events.push(GameEvent::ReturnedToTitle);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
