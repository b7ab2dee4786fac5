use crate::core::models::{Coord, PathStep};

/// The in-progress selection: an ordered, non-repeating, orthogonally
/// connected sequence of tiles. Built strictly by appending; starting a
/// new path discards the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<PathStep>,
    sum: i64,
}

impl Path {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn coords(&self) -> Vec<Coord> {
        self.steps.iter().map(|step| step.at).collect()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.steps.iter().any(|step| step.at == at)
    }

    /// True iff `at` is not already in the path and is orthogonally
    /// adjacent to the last step (any cell is fine for an empty path).
    /// Pure predicate, no side effects.
    pub fn can_append(&self, at: Coord) -> bool {
        if self.contains(at) {
            return false;
        }
        match self.steps.last() {
            None => true,
            Some(last) => last.at.is_orthogonal_neighbor(at),
        }
    }

    pub fn append(&mut self, at: Coord, value: i8) {
        self.steps.push(PathStep { at, value });
        self.sum += i64::from(value);
    }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.sum = 0;
    }

    /// Length >= 2 and sum a multiple of five. A sum of exactly zero is
    /// valid.
    pub fn is_valid(&self) -> bool {
        self.steps.len() >= 2 && self.sum % 5 == 0
    }

    /// Points awarded when this path scores. Always integral for a valid
    /// path, since |sum| is then a multiple of five.
    pub fn score(&self) -> i64 {
        path_score(self.sum, self.steps.len()) as i64
    }

    /// Points subtracted when this path is rejected.
    pub fn penalty(&self) -> i64 {
        invalid_penalty(self.sum, self.steps.len())
    }
}

/// The scoring formula: base 1 for a zero sum, |sum|/5 + 1 otherwise,
/// multiplied by path length. Computed in f64 because the penalty applies
/// the same formula to sums that are not multiples of five.
pub fn path_score(sum: i64, len: usize) -> f64 {
    let base = if sum == 0 {
        1.0
    } else {
        sum.unsigned_abs() as f64 / 5.0 + 1.0
    };
    base * len as f64
}

/// Half the as-if-valid score, rounded up.
pub fn invalid_penalty(sum: i64, len: usize) -> i64 {
    (path_score(sum, len) / 2.0).ceil() as i64
}
