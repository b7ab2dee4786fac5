use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::consts::{GRID_SIZE, TILE_MAX, TILE_MIN};
use crate::core::models::Coord;

/// A single uniformly random tile value in [-9, 9], never zero.
pub fn generate_tile_value(rng: &mut impl Rng) -> i8 {
    loop {
        let value = rng.gen_range(TILE_MIN..=TILE_MAX);
        if value != 0 {
            return value;
        }
    }
}

/// Magnitude bucket 1-10, used by renderers to pick a tile color.
pub fn magnitude_bucket(value: i8) -> u8 {
    value.unsigned_abs().clamp(1, 10)
}

/// The 6x6 board. `None` cells are empty, vacated by a scored path and
/// refilled in the same update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<i8>; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = Some(generate_tile_value(rng));
            }
        }
        Self { cells }
    }

    pub fn from_cells(cells: [[Option<i8>; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    pub fn get(&self, at: Coord) -> Option<i8> {
        if at.in_bounds() {
            self.cells[at.row][at.col]
        } else {
            None
        }
    }

    pub fn set(&mut self, at: Coord, value: Option<i8>) {
        if at.in_bounds() {
            self.cells[at.row][at.col] = value;
        }
    }

    /// Negates the tile in place. Returns the new value, or `None` when
    /// the cell is empty or out of bounds.
    pub fn flip(&mut self, at: Coord) -> Option<i8> {
        if !at.in_bounds() {
            return None;
        }
        let flipped = self.cells[at.row][at.col].map(|v| -v);
        self.cells[at.row][at.col] = flipped;
        flipped
    }

    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut empties = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_none() {
                    empties.push(Coord { row, col });
                }
            }
        }
        empties
    }

    pub fn tile_count(&self) -> usize {
        GRID_SIZE * GRID_SIZE - self.empty_cells().len()
    }

    /// Refills 2 or 3 empty cells (uniformly chosen) with fresh tiles.
    /// Cells vacated by the just-scored path are filled before any other
    /// empty cells; within each group the order is uniformly random.
    /// Returns the number of tiles placed.
    pub fn refill(&mut self, vacated: &[Coord], rng: &mut impl Rng) -> usize {
        let mut preferred: Vec<Coord> = vacated
            .iter()
            .copied()
            .filter(|&at| at.in_bounds() && self.get(at).is_none())
            .collect();
        let mut rest: Vec<Coord> = self
            .empty_cells()
            .into_iter()
            .filter(|at| !preferred.contains(at))
            .collect();
        preferred.shuffle(rng);
        rest.shuffle(rng);

        let target = rng.gen_range(2..=3usize);
        let mut placed = 0;
        for at in preferred.into_iter().chain(rest) {
            if placed == target {
                break;
            }
            self.set(at, Some(generate_tile_value(rng)));
            placed += 1;
        }
        placed
    }
}
