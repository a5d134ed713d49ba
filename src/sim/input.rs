/// What the game core reads from the player.
///
/// A normalized direction + quit signal for Play, and an "any key" flag for
/// Title / Game Over. Each call drains everything pending, so no backlog
/// carries into the next tick.

use crate::domain::entity::InputFrame;

pub trait InputSource {
    /// Direction and quit for one Play tick.
    fn poll_input(&mut self) -> InputFrame;

    /// Was any key pressed since the last call?
    fn any_key_pressed(&mut self) -> bool;

    /// Did the most recent drain see the quit signal?
    fn quit_requested(&self) -> bool;
}
