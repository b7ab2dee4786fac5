mod consts;
mod grid;
mod model_helpers;
mod models;
mod path;
mod update;

pub use consts::*;
pub use grid::{Grid, generate_tile_value, magnitude_bucket};
pub use models::{
    Coord, EffectKind, GameChangeType, GameState, GameUpdate, PathStep, PointerPhase, UserAction,
};
pub use path::{Path, invalid_penalty, path_score};
pub use update::step;
