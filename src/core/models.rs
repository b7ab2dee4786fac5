use crate::core::consts::GRID_SIZE;
use crate::core::grid::Grid;
use crate::core::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn in_bounds(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Manhattan distance 1: up, down, left or right, never diagonal.
    pub fn is_orthogonal_neighbor(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// A tile included in the current path, with its value captured at the
/// moment of inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub at: Coord,
    pub value: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    TilesClearing,
    Mistake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// A device-agnostic pointer event. `at` is `None` when the pointer
    /// is outside every tile; the input layer does the pixel mapping.
    Pointer {
        at: Option<Coord>,
        phase: PointerPhase,
    },
    TogglePause,
    ToggleFlipMode,
    Reset,
    /// Wall-clock milliseconds elapsed since the previous `Advance`.
    Advance { ms: u64 },
    /// The renderer reports a feedback effect has finished.
    EffectComplete(EffectKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChangeType {
    PathChanged,
    PathScored { points: i64, new_high_score: bool },
    PathRejected { penalty: i64 },
    TileFlipped(Coord),
    ModeChanged,
    GridReset,
    TimeAdvanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameUpdate {
    Changed(GameChangeType),
    NoChange,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub path: Path,
    pub score: i64,
    pub high_score: i64,
    pub elapsed_secs: u64,
    pub paused: bool,
    pub flip_mode: bool,
    /// A pointer-down started a path and no pointer-up has arrived yet.
    pub dragging: bool,
    /// Tiles-clearing latch: remaining ms until the fallback timeout.
    pub clearing_effect: Option<u64>,
    /// Mistake latch: remaining ms of the feedback window.
    pub mistake_effect: Option<u64>,
    pub(crate) ms_into_second: u64,
    pub(crate) since_last_flip_ms: u64,
}
