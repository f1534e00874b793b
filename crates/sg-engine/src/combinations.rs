//! Winning combination rules

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid};

/// What makes a combination fire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum WinTrigger {
    /// Symbol occurs at least `count` times anywhere in the matrix
    SameSymbols { count: u32 },
    /// Symbol fully occupies at least one of the covered lines
    LinearSymbols { covered_areas: Vec<Vec<Cell>> },
}

/// A winning combination definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinCombination {
    /// Multiplier applied to the symbol's reward when this combination fires
    pub reward_multiplier: f64,
    /// Exclusivity group: at most one combination per group applies to a symbol
    pub group: String,
    /// Trigger condition
    pub trigger: WinTrigger,
}

impl WinCombination {
    /// Combination that fires on `count` or more occurrences
    pub fn same_symbols(count: u32, reward_multiplier: f64, group: impl Into<String>) -> Self {
        Self {
            reward_multiplier,
            group: group.into(),
            trigger: WinTrigger::SameSymbols { count },
        }
    }

    /// Combination that fires when any of `covered_areas` is fully occupied
    pub fn linear_symbols(
        covered_areas: Vec<Vec<Cell>>,
        reward_multiplier: f64,
        group: impl Into<String>,
    ) -> Self {
        Self {
            reward_multiplier,
            group: group.into(),
            trigger: WinTrigger::LinearSymbols { covered_areas },
        }
    }

    /// Threshold of a same-symbols combination
    pub fn required_count(&self) -> Option<u32> {
        match self.trigger {
            WinTrigger::SameSymbols { count } => Some(count),
            WinTrigger::LinearSymbols { .. } => None,
        }
    }

    /// Check whether `symbol` occupies one whole covered line of `grid`
    ///
    /// Always false for same-symbols combinations.
    pub fn covers(&self, grid: &Grid, symbol: &str) -> bool {
        match &self.trigger {
            WinTrigger::SameSymbols { .. } => false,
            WinTrigger::LinearSymbols { covered_areas } => covered_areas
                .iter()
                .any(|line| grid.line_filled_with(line, symbol)),
        }
    }
}

/// Every row of a `rows × columns` matrix as a line
pub fn horizontal_lines(rows: usize, columns: usize) -> Vec<Vec<Cell>> {
    (0..rows)
        .map(|row| {
            (0..columns).map(|column| Cell::new(row, column)).collect()
        })
        .collect()
}

/// Every column of a `rows × columns` matrix as a line
pub fn vertical_lines(rows: usize, columns: usize) -> Vec<Vec<Cell>> {
    (0..columns)
        .map(|column| {
            (0..rows).map(|row| Cell::new(row, column)).collect()
        })
        .collect()
}

/// Main diagonal of a square matrix, top-left to bottom-right
pub fn diagonal_left_to_right(size: usize) -> Vec<Cell> {
    (0..size).map(|i| Cell::new(i, i)).collect()
}

/// Anti-diagonal of a square matrix, top-right to bottom-left
pub fn diagonal_right_to_left(size: usize) -> Vec<Cell> {
    (0..size).map(|i| Cell::new(i, size - 1 - i)).collect()
}
