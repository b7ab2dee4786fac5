use rand::Rng;

use crate::core::consts::{CLEAR_EFFECT_TIMEOUT_MS, FLIP_DEBOUNCE_MS, MISTAKE_EFFECT_MS};
use crate::core::grid::Grid;
use crate::core::models::GameChangeType::{
    GridReset, ModeChanged, PathChanged, PathRejected, PathScored, TileFlipped, TimeAdvanced,
};
use crate::core::models::GameUpdate::{Changed, NoChange};
use crate::core::models::{
    Coord, EffectKind, GameState, GameUpdate, PointerPhase, UserAction,
};
use crate::core::path::Path;

impl GameState {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_grid(Grid::generate(rng))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            path: Path::default(),
            score: 0,
            high_score: 0,
            elapsed_secs: 0,
            paused: false,
            flip_mode: false,
            dragging: false,
            clearing_effect: None,
            mistake_effect: None,
            ms_into_second: 0,
            // The first flip after a reset is never debounced away.
            since_last_flip_ms: FLIP_DEBOUNCE_MS,
        }
    }

    /// Pointer input is ignored while paused or during the mistake
    /// feedback window.
    pub fn input_blocked(&self) -> bool {
        self.paused || self.mistake_effect.is_some()
    }

    fn start_path(&mut self, at: Coord) -> GameUpdate {
        let Some(value) = self.grid.get(at) else {
            return NoChange;
        };
        self.path.clear();
        self.path.append(at, value);
        self.dragging = true;
        Changed(PathChanged)
    }

    fn extend_path(&mut self, at: Coord) -> GameUpdate {
        if !self.dragging {
            return NoChange;
        }
        let Some(value) = self.grid.get(at) else {
            return NoChange;
        };
        if !self.path.can_append(at) {
            return NoChange;
        }
        self.path.append(at, value);
        Changed(PathChanged)
    }

    fn finalize_path(&mut self, rng: &mut impl Rng) -> GameUpdate {
        self.dragging = false;
        if self.path.is_empty() {
            return NoChange;
        }

        if self.path.is_valid() {
            // At-most-once-in-flight: while the previous valid path is
            // still being presented, discard the selection unscored.
            if self.clearing_effect.is_some() {
                self.path.clear();
                return Changed(PathChanged);
            }

            let points = self.path.score();
            self.score += points;
            let new_high_score = self.score > self.high_score;
            if new_high_score {
                self.high_score = self.score;
            }

            let vacated = self.path.coords();
            for &at in &vacated {
                self.grid.set(at, None);
            }
            self.grid.refill(&vacated, rng);

            self.path.clear();
            self.clearing_effect = Some(CLEAR_EFFECT_TIMEOUT_MS);
            Changed(PathScored {
                points,
                new_high_score,
            })
        } else {
            let penalty = self.path.penalty();
            self.score -= penalty;
            self.path.clear();
            self.mistake_effect = Some(MISTAKE_EFFECT_MS);
            Changed(PathRejected { penalty })
        }
    }

    fn flip_tile(&mut self, at: Coord) -> GameUpdate {
        // Debounce: a double-trigger from one logical tap must not flip
        // the tile back.
        if self.since_last_flip_ms < FLIP_DEBOUNCE_MS {
            return NoChange;
        }
        match self.grid.flip(at) {
            Some(_) => {
                self.since_last_flip_ms = 0;
                Changed(TileFlipped(at))
            }
            None => NoChange,
        }
    }

    fn toggle_pause(&mut self) -> GameUpdate {
        self.paused = !self.paused;
        Changed(ModeChanged)
    }

    fn toggle_flip_mode(&mut self) -> GameUpdate {
        self.flip_mode = !self.flip_mode;
        if self.flip_mode {
            self.path.clear();
            self.dragging = false;
        }
        Changed(ModeChanged)
    }

    pub fn reset(&mut self, rng: &mut impl Rng) -> GameUpdate {
        let high_score = self.high_score;
        *self = Self::new(rng);
        self.high_score = high_score;
        Changed(GridReset)
    }

    /// Advances the core clock. Unpaused play accumulates whole seconds;
    /// latch countdowns and the flip debounce always run.
    fn advance(&mut self, ms: u64) -> GameUpdate {
        let mut changed = false;

        self.since_last_flip_ms = self.since_last_flip_ms.saturating_add(ms);
        if let Some(left) = self.clearing_effect {
            self.clearing_effect = left.checked_sub(ms).filter(|&l| l > 0);
            changed |= self.clearing_effect.is_none();
        }
        if let Some(left) = self.mistake_effect {
            self.mistake_effect = left.checked_sub(ms).filter(|&l| l > 0);
            changed |= self.mistake_effect.is_none();
        }

        if !self.paused {
            self.ms_into_second += ms;
            while self.ms_into_second >= 1000 {
                self.ms_into_second -= 1000;
                self.elapsed_secs += 1;
                changed = true;
            }
        }

        if changed { Changed(TimeAdvanced) } else { NoChange }
    }

    fn effect_complete(&mut self, effect: EffectKind) -> GameUpdate {
        let latch = match effect {
            EffectKind::TilesClearing => &mut self.clearing_effect,
            EffectKind::Mistake => &mut self.mistake_effect,
        };
        if latch.take().is_some() {
            Changed(TimeAdvanced)
        } else {
            NoChange
        }
    }
}

/// Applies one external event to the game state. Every rejected or
/// impossible transition is a no-op, never an error.
pub fn step(state: &mut GameState, action: UserAction, rng: &mut impl Rng) -> GameUpdate {
    match action {
        UserAction::Pointer { .. } if state.input_blocked() => NoChange,
        UserAction::Pointer { at, phase } => match phase {
            PointerPhase::Down => match at {
                Some(at) if state.flip_mode => state.flip_tile(at),
                Some(at) => state.start_path(at),
                None => NoChange,
            },
            PointerPhase::Move => match at {
                Some(at) if !state.flip_mode => state.extend_path(at),
                _ => NoChange,
            },
            PointerPhase::Up => {
                if state.flip_mode {
                    NoChange
                } else {
                    state.finalize_path(rng)
                }
            }
        },
        UserAction::TogglePause => state.toggle_pause(),
        UserAction::ToggleFlipMode => state.toggle_flip_mode(),
        UserAction::Reset => state.reset(rng),
        UserAction::Advance { ms } => state.advance(ms),
        UserAction::EffectComplete(effect) => state.effect_complete(effect),
    }
}
