//! Game action definitions and their default key bindings.

/// Everything the player can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (first match wins: up, down, left, right)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    Fire,

    // System
    Start,   // begin / restart from the title or game-over screen
    Pause,
}

impl Action {
    /// Movement actions in priority order
    pub const MOVES: [Action; 4] = [Action::MoveUp, Action::MoveDown, Action::MoveLeft, Action::MoveRight];

    /// Key names bound to this action
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Action::MoveUp => &["w", "arrowup"],
            Action::MoveDown => &["s", "arrowdown"],
            Action::MoveLeft => &["a", "arrowleft"],
            Action::MoveRight => &["d", "arrowright"],
            Action::Fire => &["space"],
            Action::Start => &["enter"],
            Action::Pause => &["p", "escape"],
        }
    }
}
