/// Events emitted during a tick.
/// The presentation loop consumes these for logging and to stop on quit.

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    QuitRequested,
    GameStarted,
    LootCollected { score: u32, multiplier: f64, guard_speed: i32 },
    GuardCaught { score: u32 },
    HighScore { value: u32 },
    ReturnedToTitle,
}
