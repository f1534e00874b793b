//! Probability tables and weighted symbol sampling

use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Cell;

/// Symbol returned when weighted sampling finds no range containing the roll
pub const MISS_SYMBOL: &str = "MISS";

/// Symbol → weight, iterated in configuration order
pub type WeightMap = IndexMap<String, u32>;

/// Standard symbol weights for one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellProbability {
    pub cell: Cell,
    pub symbols: WeightMap,
}

/// Standard (per-cell) and bonus (global) weight tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityTable {
    pub standard_symbols: Vec<CellProbability>,
    pub bonus_symbols: WeightMap,
}

impl ProbabilityTable {
    /// Weights for `cell`, falling back to the first entry when no entry matches
    ///
    /// Returns `None` only when the table has no standard entries at all.
    pub fn weights_for(&self, cell: Cell) -> Option<&WeightMap> {
        self.standard_symbols
            .iter()
            .find(|entry| entry.cell == cell)
            .or_else(|| self.standard_symbols.first())
            .map(|entry| &entry.symbols)
    }
}

/// Sum of all weights in a map
pub fn total_weight(weights: &WeightMap) -> u64 {
    weights.values().map(|&w| u64::from(w)).sum()
}

/// Pick a symbol with probability proportional to its weight
///
/// Rolls `x` in `[1, total]` and returns the first symbol whose cumulative
/// weight reaches `x`.
///
/// # Panics
///
/// Panics when the weights sum to zero. `GameConfig::validate` rejects such tables.
pub fn pick_weighted<'a, R: Rng + ?Sized>(weights: &'a WeightMap, rng: &mut R) -> &'a str {
    let total = total_weight(weights);
    let roll = rng.random_range(1..=total);
    select_by_roll(weights, roll)
}

/// Symbol whose cumulative weight range contains `roll`
pub fn select_by_roll(weights: &WeightMap, roll: u64) -> &str {
    let mut cumulative = 0u64;
    for (symbol, &weight) in weights {
        cumulative += u64::from(weight);
        if roll <= cumulative {
            return symbol;
        }
    }
    MISS_SYMBOL
}
