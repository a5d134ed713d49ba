/// Entities: Player, Guard, Loot, plus the per-tick input they react to.
///
/// Positions are signed pixel coordinates of the top-left corner. There is
/// no velocity field; the guard's motion is `dir * speed` on both axes.

use super::collision::Aabb;

/// Normalized input for one Play tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct InputFrame {
    pub dx: i32, // -1, 0, 1
    pub dy: i32, // -1, 0, 1
    pub quit: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub const STEP: i32 = 2;
    /// Clamp margin, independent of the sprite's real size.
    pub const MARGIN: i32 = 16;
    pub const FALLBACK_SIZE: (u32, u32) = (16, 32);

    pub fn new(x: i32, y: i32) -> Self {
        Player { x, y }
    }

    /// Move by `STEP` pixels per unit of input, then clamp into
    /// `[0, width - 16] x [0, height - 16]`.
    pub fn advance(&mut self, dx: i32, dy: i32, width: i32, height: i32) {
        self.x += dx * Self::STEP;
        self.y += dy * Self::STEP;
        self.x = self.x.clamp(0, width - Self::MARGIN);
        self.y = self.y.clamp(0, height - Self::MARGIN);
    }

    pub fn bounds(&self, size: (u32, u32)) -> Aabb {
        Aabb::new(self.x, self.y, size)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Guard {
    pub x: i32,
    pub y: i32,
    /// +1 moving down-right, -1 moving up-left.
    pub dir: i32,
    /// Pixels per tick on each axis. Grows by one per loot pickup, no cap.
    pub speed: i32,
}

impl Guard {
    pub const EDGE: i32 = 16;
    pub const FALLBACK_SIZE: (u32, u32) = (16, 32);

    pub fn new(x: i32, y: i32) -> Self {
        Guard { x, y, dir: 1, speed: 1 }
    }

    /// Patrol one tick along the diagonal.
    ///
    /// X bounces: past `width - 32` the direction flips to -1 (and x is held
    /// at that edge), below 16 it flips to +1. Y never bounces; it is
    /// clamped into `[16, height - 32]`.
    pub fn patrol(&mut self, width: i32, height: i32) {
        let step = self.dir * self.speed;
        self.x += step;
        self.y += step;

        let right = width - 2 * Self::EDGE;
        if self.x > right {
            self.x = right;
            self.dir = -1;
        } else if self.x < Self::EDGE {
            self.x = Self::EDGE;
            self.dir = 1;
        }
        self.y = self.y.clamp(Self::EDGE, height - 2 * Self::EDGE);
    }

    pub fn bounds(&self, size: (u32, u32)) -> Aabb {
        Aabb::new(self.x, self.y, size)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Loot {
    pub x: i32,
    pub y: i32,
}

impl Loot {
    pub const FALLBACK_SIZE: (u32, u32) = (16, 16);

    pub fn new(x: i32, y: i32) -> Self {
        Loot { x, y }
    }

    /// Deterministic respawn spot derived from the frame counter.
    pub fn relocate(&mut self, frame: u32) {
        self.x = 30 + ((frame as u64 * 7) % 260) as i32;
        self.y = 40 + ((frame as u64 * 5) % 130) as i32;
    }

    pub fn bounds(&self, size: (u32, u32)) -> Aabb {
        Aabb::new(self.x, self.y, size)
    }
}
