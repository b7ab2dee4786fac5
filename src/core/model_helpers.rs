use crate::core::consts::LEVEL_INTERVAL_SECS;
use crate::core::models::{Coord, GameState};

impl GameState {
    /// Level is derived from elapsed time and has no gameplay effect.
    pub fn level(&self) -> u64 {
        self.elapsed_secs / LEVEL_INTERVAL_SECS + 1
    }

    pub fn formatted_time(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }

    pub fn is_selected(&self, at: Coord) -> bool {
        self.path.contains(at)
    }
}
