//! Reward evaluation: win combinations, payout and bonus application

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combinations::WinCombination;
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::symbols::{BonusImpact, SymbolDefinition, SymbolKind};

/// Sole breakdown line of a result computed from unusable input
pub const INVALID_INPUT_MESSAGE: &str = "Invalid configuration or empty matrix provided.";

/// What the applied bonus symbol did to the total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum BonusEffect {
    /// Total multiplied by `factor`
    Multiplied { factor: f64 },
    /// `amount` added to the total
    Extra { amount: u64 },
    /// Bonus symbol present but without effect
    Miss,
}

/// Outcome of evaluating one matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Total payout, rounded half-up
    pub final_reward: u64,
    /// Symbol → combinations that fired for it, in discovery order
    pub applied_combinations: IndexMap<String, Vec<String>>,
    /// Bonus symbol that was applied, if any
    pub applied_bonus_symbol: Option<String>,
    /// Effect of the applied bonus symbol
    pub bonus_effect: Option<BonusEffect>,
    /// Human-readable calculation steps
    pub breakdown: Vec<String>,
}

impl CalculationResult {
    /// Zero result for an empty matrix or a configuration without symbols
    pub fn invalid_input() -> Self {
        Self {
            breakdown: vec![INVALID_INPUT_MESSAGE.to_string()],
            ..Default::default()
        }
    }

    /// At least one combination fired
    pub fn is_win(&self) -> bool {
        !self.applied_combinations.is_empty()
    }
}

/// Combination multiplier accumulated by one symbol
struct SymbolWin {
    multiplier: f64,
    combinations: Vec<String>,
}

/// Evaluates matrices against a game configuration
pub struct RewardEvaluator<'a> {
    config: &'a GameConfig,
}

impl<'a> RewardEvaluator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Compute the payout of `grid` for a wager of `bet`
    ///
    /// 1. count standard symbols, in first-encounter order
    /// 2. per symbol: best same-symbols combination, then the first matching
    ///    linear combination of every group not yet used by that symbol
    /// 3. if the total is positive, apply the first bonus symbol in row-major order
    /// 4. round half-up
    pub fn evaluate(&self, grid: &Grid, bet: u64) -> CalculationResult {
        if grid.is_empty() || self.config.symbols.is_empty() {
            log::debug!("Skipping evaluation: empty matrix or no symbol definitions");
            return CalculationResult::invalid_input();
        }

        let mut total = 0.0;
        let mut applied_combinations = IndexMap::new();
        let mut breakdown = Vec::new();

        for (symbol, count) in self.count_standard_symbols(grid) {
            let Some(definition) = self.config.symbol(symbol) else {
                continue;
            };
            let Some(win) = self.symbol_win(grid, symbol, count) else {
                continue;
            };

            let partial = bet as f64 * definition.reward_multiplier * win.multiplier;
            total += partial;
            breakdown.push(format!(
                "Symbol '{}': bet({}) x symbol_multiplier({:.2}) x combo_multiplier({:.2}) = {:.0}",
                symbol,
                bet,
                definition.reward_multiplier,
                win.multiplier,
                round_half_up(partial)
            ));
            applied_combinations.insert(symbol.to_string(), win.combinations);
        }

        breakdown.push(format!(
            "Total winnings before bonus: {:.0}",
            round_half_up(total)
        ));

        let mut applied_bonus_symbol = None;
        let mut bonus_effect = None;
        if total > 0.0 {
            if let Some((symbol, definition, impact)) = self.first_bonus(grid) {
                let before = total;
                let effect = match impact {
                    BonusImpact::MultiplyReward => {
                        total *= definition.reward_multiplier;
                        breakdown.push(format!(
                            "Bonus '{}' applied: ({:.0}) x {} = {:.0}",
                            symbol,
                            round_half_up(before),
                            definition.reward_multiplier,
                            round_half_up(total)
                        ));
                        BonusEffect::Multiplied {
                            factor: definition.reward_multiplier,
                        }
                    }
                    BonusImpact::ExtraBonus { extra } => {
                        total += extra as f64;
                        breakdown.push(format!(
                            "Bonus '{}' applied: ({:.0}) + {} = {:.0}",
                            symbol,
                            round_half_up(before),
                            extra,
                            round_half_up(total)
                        ));
                        BonusEffect::Extra { amount: extra }
                    }
                    BonusImpact::Miss => {
                        breakdown.push(format!("Bonus '{symbol}' (no effect)."));
                        BonusEffect::Miss
                    }
                };
                applied_bonus_symbol = Some(symbol.to_string());
                bonus_effect = Some(effect);
            }
        }

        let final_reward = round_half_up(total) as u64;
        log::debug!(
            "Evaluated {}x{} matrix, bet {}: reward {}, {} winning symbols, bonus {:?}",
            grid.rows(),
            grid.columns(),
            bet,
            final_reward,
            applied_combinations.len(),
            applied_bonus_symbol
        );

        CalculationResult {
            final_reward,
            applied_combinations,
            applied_bonus_symbol,
            bonus_effect,
            breakdown,
        }
    }

    /// Occurrences of each standard symbol, keyed in first-encounter order
    fn count_standard_symbols<'g>(&self, grid: &'g Grid) -> IndexMap<&'g str, u32> {
        let mut counts = IndexMap::new();
        for (_, symbol) in grid.iter() {
            let standard = self.config.symbol(symbol).is_some_and(|s| s.is_standard());
            if standard {
                *counts.entry(symbol).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Combinations that fire for `symbol`, `None` when nothing fires
    fn symbol_win(&self, grid: &Grid, symbol: &str, count: u32) -> Option<SymbolWin> {
        let mut multiplier = 1.0;
        let mut combinations = Vec::new();
        let mut used_groups: HashSet<&str> = HashSet::new();

        if let Some((id, combination)) = self.best_same_symbols(count) {
            log::trace!("'{symbol}' x{count} matches {id}");
            multiplier *= combination.reward_multiplier;
            combinations.push(id.clone());
            used_groups.insert(&combination.group);
        }

        for (id, combination) in &self.config.win_combinations {
            if combination.required_count().is_some()
                || used_groups.contains(combination.group.as_str())
            {
                continue;
            }
            if combination.covers(grid, symbol) {
                log::trace!("'{symbol}' covers {id}");
                multiplier *= combination.reward_multiplier;
                combinations.push(id.clone());
                used_groups.insert(&combination.group);
            }
        }

        if combinations.is_empty() {
            None
        } else {
            Some(SymbolWin {
                multiplier,
                combinations,
            })
        }
    }

    /// Same-symbols combination with the highest threshold not above `count`
    ///
    /// On equal thresholds the first in configuration order wins.
    fn best_same_symbols(&self, count: u32) -> Option<(&'a String, &'a WinCombination)> {
        let config = self.config;
        let mut best: Option<(&'a String, &'a WinCombination, u32)> = None;
        for (id, combination) in &config.win_combinations {
            let Some(required) = combination.required_count() else {
                continue;
            };
            if count < required {
                continue;
            }
            match best {
                Some((_, _, best_required)) if best_required >= required => {}
                _ => best = Some((id, combination, required)),
            }
        }
        best.map(|(id, combination, _)| (id, combination))
    }

    /// First bonus symbol in row-major order
    fn first_bonus<'g>(
        &self,
        grid: &'g Grid,
    ) -> Option<(&'g str, &'a SymbolDefinition, BonusImpact)> {
        let config = self.config;
        grid.iter().find_map(|(_, symbol)| {
            let definition = config.symbol(symbol)?;
            match definition.kind {
                SymbolKind::Bonus(impact) => Some((symbol, definition, impact)),
                SymbolKind::Standard => None,
            }
        })
    }
}

/// Round to the nearest integer, halves away from zero for the non-negative totals used here
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinations::{
        diagonal_left_to_right, diagonal_right_to_left, horizontal_lines, vertical_lines,
    };
    use crate::grid::Cell;
    use approx::assert_relative_eq;

    fn top_row() -> Vec<Vec<Cell>> {
        vec![vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]]
    }

    fn test_config() -> GameConfig {
        GameConfig::new(3, 3)
            .with_symbol("A", SymbolDefinition::standard(5.0))
            .with_symbol("B", SymbolDefinition::standard(3.0))
            .with_symbol("C", SymbolDefinition::standard(2.5))
            .with_symbol("D", SymbolDefinition::standard(2.0))
            .with_symbol("E", SymbolDefinition::standard(1.2))
            .with_symbol("F", SymbolDefinition::standard(1.0))
            .with_symbol("5x", SymbolDefinition::multiplier(5.0))
            .with_symbol("+500", SymbolDefinition::extra_bonus(500))
            .with_symbol("MISS", SymbolDefinition::miss())
            .with_combination(
                "same_symbol_3_times",
                WinCombination::same_symbols(3, 1.0, "same_symbols"),
            )
            .with_combination(
                "same_symbol_4_times",
                WinCombination::same_symbols(4, 1.5, "same_symbols"),
            )
            .with_combination(
                "same_symbols_horizontally",
                WinCombination::linear_symbols(top_row(), 2.0, "linear"),
            )
    }

    fn evaluate(grid: &Grid, bet: u64, config: &GameConfig) -> CalculationResult {
        RewardEvaluator::new(config).evaluate(grid, bet)
    }

    #[test]
    fn test_horizontal_line_with_same_symbols() {
        let grid = Grid::from_rows([["C", "C", "C"], ["A", "B", "?"], ["F", "D", "X"]]);
        let result = evaluate(&grid, 100, &test_config());

        assert_eq!(result.final_reward, 500);
        assert_eq!(
            result.applied_combinations["C"],
            vec!["same_symbol_3_times", "same_symbols_horizontally"]
        );
        assert_eq!(result.applied_combinations.len(), 1);
        assert_eq!(result.applied_bonus_symbol, None);
        assert_eq!(
            result.breakdown,
            vec![
                "Symbol 'C': bet(100) x symbol_multiplier(2.50) x combo_multiplier(2.00) = 500",
                "Total winnings before bonus: 500",
            ]
        );
    }

    #[test]
    fn test_four_same_symbols_with_multiplier_bonus() {
        let grid = Grid::from_rows([["F", "F", "A"], ["B", "F", "B"], ["F", "C", "5x"]]);
        let result = evaluate(&grid, 200, &test_config());

        assert_eq!(result.final_reward, 1500);
        assert_eq!(
            result.applied_combinations["F"],
            vec!["same_symbol_4_times"]
        );
        assert_eq!(result.applied_bonus_symbol.as_deref(), Some("5x"));
        assert_eq!(
            result.bonus_effect,
            Some(BonusEffect::Multiplied { factor: 5.0 })
        );
        assert_eq!(
            result.breakdown.last().map(String::as_str),
            Some("Bonus '5x' applied: (300) x 5 = 1500")
        );
    }

    #[test]
    fn test_no_winning_combo_ignores_bonus() {
        let grid = Grid::from_rows([["5x", "A", "C"], ["B", "D", "E"], ["F", "A", "D"]]);
        let result = evaluate(&grid, 100, &test_config());

        assert_eq!(result.final_reward, 0);
        assert!(result.applied_combinations.is_empty());
        assert_eq!(result.applied_bonus_symbol, None);
        assert_eq!(result.bonus_effect, None);
        assert!(!result.is_win());
    }

    #[test]
    fn test_extra_bonus_adds_flat_amount() {
        let grid = Grid::from_rows([["A", "A", "A"], ["+500", "B", "5x"], ["C", "D", "E"]]);
        let result = evaluate(&grid, 10, &test_config());

        // 10 × 5 × (1.0 × 2.0) = 100, then +500 (first bonus in row-major order)
        assert_eq!(result.final_reward, 600);
        assert_eq!(result.applied_bonus_symbol.as_deref(), Some("+500"));
        assert_eq!(
            result.bonus_effect,
            Some(BonusEffect::Extra { amount: 500 })
        );
        assert_eq!(
            result.breakdown.last().map(String::as_str),
            Some("Bonus '+500' applied: (100) + 500 = 600")
        );
    }

    #[test]
    fn test_miss_bonus_is_recorded_without_effect() {
        let grid = Grid::from_rows([["C", "C", "C"], ["A", "B", "E"], ["F", "D", "MISS"]]);
        let result = evaluate(&grid, 100, &test_config());

        assert_eq!(result.final_reward, 500);
        assert_eq!(result.applied_bonus_symbol.as_deref(), Some("MISS"));
        assert_eq!(result.bonus_effect, Some(BonusEffect::Miss));
        assert_eq!(
            result.breakdown.last().map(String::as_str),
            Some("Bonus 'MISS' (no effect).")
        );
    }

    #[test]
    fn test_highest_threshold_wins_over_highest_multiplier() {
        let config = GameConfig::new(1, 5)
            .with_symbol("A", SymbolDefinition::standard(1.0))
            .with_combination(
                "three",
                WinCombination::same_symbols(3, 10.0, "same_symbols"),
            )
            .with_combination("five", WinCombination::same_symbols(5, 1.2, "same_symbols"))
            .with_combination("four", WinCombination::same_symbols(4, 3.0, "same_symbols"));
        let grid = Grid::from_rows([["A", "A", "A", "A", "A"]]);

        let result = evaluate(&grid, 100, &config);
        assert_eq!(result.applied_combinations["A"], vec!["five"]);
        assert_eq!(result.final_reward, 120);
    }

    #[test]
    fn test_one_linear_combination_per_group() {
        let config = GameConfig::new(3, 3)
            .with_symbol("A", SymbolDefinition::standard(1.0))
            .with_combination(
                "top_row",
                WinCombination::linear_symbols(top_row(), 2.0, "horizontal"),
            )
            .with_combination(
                "any_row",
                WinCombination::linear_symbols(horizontal_lines(3, 3), 3.0, "horizontal"),
            )
            .with_combination(
                "any_column",
                WinCombination::linear_symbols(vertical_lines(3, 3), 5.0, "vertical"),
            );
        let grid = Grid::from_rows([["A", "A", "A"], ["A", "B", "B"], ["A", "B", "B"]]);

        let result = evaluate(&grid, 10, &config);
        assert_eq!(
            result.applied_combinations["A"],
            vec!["top_row", "any_column"]
        );
        assert_eq!(result.final_reward, 100);
    }

    #[test]
    fn test_linear_rule_sharing_same_symbols_group_is_skipped() {
        let config = GameConfig::new(3, 3)
            .with_symbol("A", SymbolDefinition::standard(1.0))
            .with_combination("three", WinCombination::same_symbols(3, 1.0, "shared"))
            .with_combination(
                "top_row",
                WinCombination::linear_symbols(top_row(), 2.0, "shared"),
            );
        let grid = Grid::from_rows([["A", "A", "A"], ["B", "B", "C"], ["C", "B", "C"]]);

        let result = evaluate(&grid, 10, &config);
        assert_eq!(result.applied_combinations["A"], vec!["three"]);
        assert_eq!(result.final_reward, 10);
    }

    #[test]
    fn test_linear_only_win_without_count_rule() {
        let config = GameConfig::new(3, 3)
            .with_symbol("A", SymbolDefinition::standard(2.0))
            .with_combination(
                "same_symbols_diagonally_left_to_right",
                WinCombination::linear_symbols(
                    vec![diagonal_left_to_right(3)],
                    5.0,
                    "ltr_diagonally_linear_symbols",
                ),
            )
            .with_combination(
                "same_symbols_diagonally_right_to_left",
                WinCombination::linear_symbols(
                    vec![diagonal_right_to_left(3)],
                    5.0,
                    "rtl_diagonally_linear_symbols",
                ),
            );
        let grid = Grid::from_rows([["A", "B", "A"], ["C", "A", "D"], ["A", "E", "A"]]);

        let result = evaluate(&grid, 1, &config);
        assert_eq!(
            result.applied_combinations["A"],
            vec![
                "same_symbols_diagonally_left_to_right",
                "same_symbols_diagonally_right_to_left",
            ]
        );
        assert_eq!(result.final_reward, 50);
    }

    #[test]
    fn test_combination_order_follows_first_encounter() {
        let grid = Grid::from_rows([["B", "A", "B"], ["A", "B", "A"], ["D", "A", "E"]]);
        let result = evaluate(&grid, 1, &test_config());

        let symbols: Vec<&str> = result
            .applied_combinations
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(symbols, vec!["B", "A"]);
        // B: 1 × 3 × 1.0, A: 1 × 5 × 1.5
        assert_eq!(result.final_reward, 11);
    }

    #[test]
    fn test_below_threshold_symbol_is_dropped() {
        let grid = Grid::from_rows([["A", "A", "B"], ["C", "D", "E"], ["F", "B", "C"]]);
        let result = evaluate(&grid, 100, &test_config());

        assert_eq!(result.final_reward, 0);
        assert!(result.applied_combinations.is_empty());
        assert_eq!(result.breakdown, vec!["Total winnings before bonus: 0"]);
    }

    #[test]
    fn test_empty_matrix() {
        let result = evaluate(&Grid::empty(), 100, &test_config());

        assert_eq!(result.final_reward, 0);
        assert!(result.applied_combinations.is_empty());
        assert_eq!(result.applied_bonus_symbol, None);
        assert_eq!(result.breakdown, vec![INVALID_INPUT_MESSAGE]);
    }

    #[test]
    fn test_config_without_symbols() {
        let grid = Grid::from_rows([["A", "A", "A"]]);
        let result = evaluate(&grid, 100, &GameConfig::default());

        assert_eq!(result, CalculationResult::invalid_input());
    }

    #[test]
    fn test_unknown_symbols() {
        let grid = Grid::from_rows([["X", "Y", "Z"], ["X", "Y", "Z"], ["X", "Y", "Z"]]);
        let result = evaluate(&grid, 100, &test_config());

        assert_eq!(result.final_reward, 0);
        assert!(result.applied_combinations.is_empty());
        assert_eq!(result.applied_bonus_symbol, None);
    }

    #[test]
    fn test_fractional_reward_rounds_half_up() {
        let config = GameConfig::new(1, 3)
            .with_symbol("E", SymbolDefinition::standard(1.25))
            .with_combination(
                "three",
                WinCombination::same_symbols(3, 1.0, "same_symbols"),
            );
        let grid = Grid::from_rows([["E", "E", "E"]]);

        // 10 × 1.25 = 12.5 → 13
        assert_eq!(evaluate(&grid, 10, &config).final_reward, 13);
        assert_relative_eq!(round_half_up(2.4999), 2.0);
        assert_relative_eq!(round_half_up(0.5), 1.0);
    }

    #[test]
    fn test_out_of_bounds_line_never_fires() {
        let config = GameConfig::new(1, 3)
            .with_symbol("A", SymbolDefinition::standard(1.0))
            .with_combination(
                "long_row",
                WinCombination::linear_symbols(horizontal_lines(1, 4), 2.0, "horizontal"),
            );
        let grid = Grid::from_rows([["A", "A", "A"]]);

        assert!(!evaluate(&grid, 10, &config).is_win());
    }
}
