/// Axis-aligned bounding boxes.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Aabb {
    /// Top-left corner; may lie off-canvas.
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Aabb {
    pub fn new(x: i32, y: i32, (w, h): (u32, u32)) -> Self {
        Aabb { x, y, w, h }
    }

    /// Strict overlap test: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlaps(self, other)
    }
}

pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    let (ax, ay, aw, ah) = (a.x as i64, a.y as i64, a.w as i64, a.h as i64);
    let (bx, by, bw, bh) = (b.x as i64, b.y as i64, b.w as i64, b.h as i64);
    !(ax >= bx + bw || bx >= ax + aw || ay >= by + bh || by >= ay + ah)
}
