/// GameSession: the complete state of a running game.
///
/// Owned by the game loop and passed by reference into `step::tick` and the
/// scene composers; nothing here is global.
///
/// ## Phases
///
///   - `Title`: reset to defaults every tick; any key starts Play.
///   - `Play`: movement, guard patrol, pickups, guard contact.
///   - `GameOver`: any key returns to Title.
///
/// The high score survives every transition; everything else is reset when
/// Title runs.

use crate::domain::canvas::{SCREEN_H, SCREEN_W};
use crate::domain::collision::Aabb;
use crate::domain::entity::{Guard, Loot, Player};
use crate::domain::sprite::Sprite;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Play,
    GameOver,
}

/// Decoded sprites, one per entity. Any of them may be disabled.
#[derive(Clone, Debug)]
pub struct SpriteSet {
    pub player: Sprite,
    pub guard: Sprite,
    pub loot: Sprite,
}

impl SpriteSet {
    #[cfg(test)]
    pub fn disabled() -> Self {
        SpriteSet {
            player: Sprite::disabled(),
            guard: Sprite::disabled(),
            loot: Sprite::disabled(),
        }
    }
}

// ── Title defaults ──

pub const PLAYER_START: (i32, i32) = (150, 150);
pub const GUARD_START: (i32, i32) = (16, 16);
pub const LOOT_START: (i32, i32) = (250, 60);

#[derive(Clone, Debug)]
pub struct GameSession {
    // ── Playfield ──
    pub width: i32,
    pub height: i32,

    // ── Entities ──
    pub player: Player,
    pub guard: Guard,
    pub loot: Loot,

    // ── Scoring ──
    pub score: u32,
    /// Bonus from the most recent pickup. Not cleared by the title reset.
    pub multiplier: f64,
    pub hiscore: u32,

    // ── Meta ──
    pub phase: Phase,
    pub game_over: bool,
    pub frame: u32,
}

impl GameSession {
    pub fn new() -> Self {
        GameSession {
            width: SCREEN_W as i32,
            height: SCREEN_H as i32,
            player: Player::new(PLAYER_START.0, PLAYER_START.1),
            guard: Guard::new(GUARD_START.0, GUARD_START.1),
            loot: Loot::new(LOOT_START.0, LOOT_START.1),
            score: 0,
            multiplier: 0.0,
            hiscore: 0,
            phase: Phase::Title,
            game_over: false,
            frame: 0,
        }
    }

    /// Put entities, guard direction/speed, score and the game-over flag
    /// back to their title defaults. Idempotent.
    pub fn reset(&mut self) {
        self.player = Player::new(PLAYER_START.0, PLAYER_START.1);
        self.guard = Guard::new(GUARD_START.0, GUARD_START.1);
        self.loot = Loot::new(LOOT_START.0, LOOT_START.1);
        self.score = 0;
        self.game_over = false;
    }

    // ── Collision boxes (fresh each tick) ──

    pub fn player_box(&self, sprites: &SpriteSet) -> Aabb {
        self.player.bounds(sprites.player.extent_or(Player::FALLBACK_SIZE))
    }

    pub fn guard_box(&self, sprites: &SpriteSet) -> Aabb {
        self.guard.bounds(sprites.guard.extent_or(Guard::FALLBACK_SIZE))
    }

    pub fn loot_box(&self, sprites: &SpriteSet) -> Aabb {
        self.loot.bounds(sprites.loot.extent_or(Loot::FALLBACK_SIZE))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
