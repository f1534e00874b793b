//! Matrix generation from weighted probability tables

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::config::GameConfig;
use crate::grid::{Cell, Grid};
use crate::probability::{MISS_SYMBOL, pick_weighted};

/// Chance, in percent, that a cell holds a bonus symbol instead of a standard one
pub const BONUS_CELL_PERCENT: u32 = 15;

/// Fills matrices with randomly drawn symbols
///
/// Each generator owns its RNG, so independent rounds never share a random source.
pub struct MatrixGenerator {
    rng: ChaCha8Rng,
}

impl MatrixGenerator {
    /// Create a generator, seeded deterministically when `seed` is given
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng }
    }

    /// Generate a `rows × columns` matrix
    ///
    /// Every cell independently becomes a bonus cell with `BONUS_CELL_PERCENT`
    /// probability and draws from the bonus weights; otherwise it draws from the
    /// standard weights of its coordinate, or of the first configured cell when
    /// the coordinate has no entry.
    pub fn generate(&mut self, config: &GameConfig, rows: usize, columns: usize) -> Grid {
        let table = &config.probabilities;
        let mut matrix = Vec::with_capacity(rows);

        for row in 0..rows {
            let mut symbols = Vec::with_capacity(columns);
            for column in 0..columns {
                let cell = Cell::new(row, column);
                let is_bonus = self.rng.random_range(0..100) < BONUS_CELL_PERCENT;

                let symbol = if is_bonus {
                    pick_weighted(&table.bonus_symbols, &mut self.rng)
                } else {
                    match table.weights_for(cell) {
                        Some(weights) => pick_weighted(weights, &mut self.rng),
                        None => MISS_SYMBOL,
                    }
                };

                log::trace!("cell {cell}: {symbol} (bonus roll: {is_bonus})");
                symbols.push(symbol.to_string());
            }
            matrix.push(symbols);
        }

        Grid::from_rows(matrix)
    }
}

impl Default for MatrixGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolDefinition;

    fn test_config() -> GameConfig {
        GameConfig::new(3, 3)
            .with_symbol("A", SymbolDefinition::standard(5.0))
            .with_symbol("B", SymbolDefinition::standard(3.0))
            .with_symbol("C", SymbolDefinition::standard(2.5))
            .with_symbol("5x", SymbolDefinition::multiplier(5.0))
            .with_symbol("+500", SymbolDefinition::extra_bonus(500))
            .with_symbol("MISS", SymbolDefinition::miss())
            .with_cell_weights(Cell::new(0, 0), [("A", 50), ("B", 30), ("C", 20)])
            .with_bonus_weights([("5x", 10), ("+500", 5), ("MISS", 85)])
    }

    #[test]
    fn test_matrix_size() {
        let config = test_config();
        let mut generator = MatrixGenerator::new(Some(1));

        for (rows, columns) in [(3, 3), (1, 5), (4, 2)] {
            let grid = generator.generate(&config, rows, columns);
            assert_eq!(grid.rows(), rows);
            assert!(grid.as_rows().iter().all(|row| row.len() == columns));
            assert!(grid.iter().all(|(_, symbol)| !symbol.is_empty()));
        }
    }

    #[test]
    fn test_symbols_come_from_tables() {
        let config = test_config();
        let mut generator = MatrixGenerator::new(Some(2));
        let known = ["A", "B", "C", "5x", "+500", "MISS"];

        for _ in 0..200 {
            let grid = generator.generate(&config, 3, 3);
            assert!(grid.iter().all(|(_, symbol)| known.contains(&symbol)));
        }
    }

    #[test]
    fn test_bonus_cell_rate() {
        let config = test_config();
        let mut generator = MatrixGenerator::new(Some(3));
        let mut bonus = 0usize;
        let mut total = 0usize;

        for _ in 0..2_000 {
            let grid = generator.generate(&config, 3, 3);
            for (_, symbol) in grid.iter() {
                total += 1;
                if config.symbol(symbol).is_some_and(|s| !s.is_standard()) {
                    bonus += 1;
                }
            }
        }

        let rate = bonus as f64 / total as f64;
        assert!((rate - 0.15).abs() < 0.01, "bonus rate {rate}");
    }

    #[test]
    fn test_cell_specific_weights() {
        let config = GameConfig::new(1, 2)
            .with_symbol("A", SymbolDefinition::standard(1.0))
            .with_symbol("B", SymbolDefinition::standard(1.0))
            .with_symbol("MISS", SymbolDefinition::miss())
            .with_cell_weights(Cell::new(0, 0), [("A", 1)])
            .with_cell_weights(Cell::new(0, 1), [("B", 1)])
            .with_bonus_weights([("MISS", 1)]);
        let mut generator = MatrixGenerator::new(Some(4));

        for _ in 0..100 {
            let grid = generator.generate(&config, 1, 2);
            assert!(matches!(grid.get(Cell::new(0, 0)), Some("A" | "MISS")));
            assert!(matches!(grid.get(Cell::new(0, 1)), Some("B" | "MISS")));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = test_config();
        let a = MatrixGenerator::new(Some(42)).generate(&config, 3, 3);
        let b = MatrixGenerator::new(Some(42)).generate(&config, 3, 3);
        assert_eq!(a, b);

        let mut generator = MatrixGenerator::new(Some(42));
        assert_eq!(generator.generate(&config, 3, 3), a);
    }
}
