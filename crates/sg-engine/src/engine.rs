//! Round engine: generate a matrix, then evaluate it

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::ConfigResult;
use crate::evaluator::{CalculationResult, RewardEvaluator};
use crate::generator::MatrixGenerator;
use crate::grid::Grid;

/// One played round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Generated matrix
    pub grid: Grid,
    /// Wager the round was played with
    pub bet: u64,
    /// Evaluation of `grid`
    pub result: CalculationResult,
}

/// Scratch game engine
///
/// Holds a validated configuration and its own generator. Engines built from
/// the same `Arc<GameConfig>` share the configuration but never the RNG.
pub struct ScratchEngine {
    config: Arc<GameConfig>,
    generator: MatrixGenerator,
}

impl ScratchEngine {
    /// Entropy-seeded engine; fails when the configuration does not validate
    pub fn new(config: impl Into<Arc<GameConfig>>) -> ConfigResult<Self> {
        Self::build(config.into(), MatrixGenerator::new(None))
    }

    /// Deterministic engine for reproducible rounds
    pub fn seeded(config: impl Into<Arc<GameConfig>>, seed: u64) -> ConfigResult<Self> {
        Self::build(config.into(), MatrixGenerator::new(Some(seed)))
    }

    fn build(config: Arc<GameConfig>, generator: MatrixGenerator) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config, generator })
    }

    /// `(rows, columns)` of generated matrices
    pub fn grid_size(&self) -> (usize, usize) {
        self.config.grid_size()
    }

    /// Play one round with the given wager
    pub fn play(&mut self, bet: u64) -> RoundOutcome {
        let (rows, columns) = self.grid_size();
        let grid = self.generator.generate(&self.config, rows, columns);
        let result = self.evaluate(&grid, bet);

        log::debug!(
            "Played {rows}x{columns} round: bet {bet}, reward {}",
            result.final_reward
        );

        RoundOutcome { grid, bet, result }
    }

    /// Evaluate an externally supplied matrix
    pub fn evaluate(&self, grid: &Grid, bet: u64) -> CalculationResult {
        RewardEvaluator::new(&self.config).evaluate(grid, bet)
    }
}
