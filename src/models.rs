use crate::core::{Coord, GameState};

/// One-way view model handed to the renderer after every update. The
/// core never touches the terminal directly.
pub struct GameRenderState {
    pub game: GameState,
    pub cursor: Coord,
    pub audio_enabled: bool,
    pub last_event: Option<String>,
}
