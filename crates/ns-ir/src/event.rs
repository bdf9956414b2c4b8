//! Gameplay events that the engine turns into sound.

/// A discrete gameplay occurrence.
///
/// Each variant maps to one short musical figure (1-6 notes). Callers fire
/// them at the moment the occurrence happens; nothing is returned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// The snake advanced one cell. `speed` is the current move interval in
    /// seconds (smaller = faster = louder bass).
    MoveTick { speed: f64 },
    /// The snake changed direction; `combo` counts consecutive quick turns.
    Turn { combo: u32 },
    /// Regular food eaten.
    Food,
    /// Bonus food eaten.
    SpecialFood,
    /// Head hit the arena wall.
    WallCrash,
    /// Head ran into the snake's own body.
    SelfBite,
    /// Ran out of time without eating.
    Starved,
    /// Level cleared.
    Win,
}

impl GameEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::MoveTick { .. } => "move",
            GameEvent::Turn { .. } => "turn",
            GameEvent::Food => "food",
            GameEvent::SpecialFood => "special_food",
            GameEvent::WallCrash => "wall_crash",
            GameEvent::SelfBite => "self_bite",
            GameEvent::Starved => "starved",
            GameEvent::Win => "win",
        }
    }
}
