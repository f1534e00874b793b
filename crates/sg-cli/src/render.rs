//! Round output: JSON report and plain-text rendering

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use sg_engine::{BonusEffect, Grid, RoundOutcome};

/// JSON document printed for a one-shot round
#[derive(Debug, Serialize)]
pub struct RoundReport<'a> {
    pub matrix: &'a Grid,
    pub reward: u64,
    pub applied_winning_combinations: &'a IndexMap<String, Vec<String>>,
    pub applied_bonus_symbol: Option<&'a str>,
}

impl<'a> From<&'a RoundOutcome> for RoundReport<'a> {
    fn from(outcome: &'a RoundOutcome) -> Self {
        Self {
            matrix: &outcome.grid,
            reward: outcome.result.final_reward,
            applied_winning_combinations: &outcome.result.applied_combinations,
            applied_bonus_symbol: outcome.result.applied_bonus_symbol.as_deref(),
        }
    }
}

/// Display name of a win combination id
///
/// Ids outside the bundled naming scheme are returned unchanged.
pub fn readable_combination(id: &str) -> String {
    let count = id
        .strip_prefix("same_symbol_")
        .and_then(|rest| rest.strip_suffix("_times"))
        .filter(|count| is_number(count));
    if let Some(count) = count {
        return format!("{count} identical symbols");
    }

    match id {
        "same_symbols_horizontally" => "horizontal line",
        "same_symbols_vertically" => "vertical line",
        "same_symbols_diagonally_left_to_right" => "diagonal (left-to-right)",
        "same_symbols_diagonally_right_to_left" => "diagonal (right-to-left)",
        other => other,
    }
    .to_string()
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Terminal rendering of one round
pub struct TextReport<'a>(pub &'a RoundOutcome);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        let result = &outcome.result;

        writeln!(f, "\nGenerated matrix:")?;
        for row in outcome.grid.as_rows() {
            for cell in row {
                write!(f, "{cell:<6} ")?;
            }
            writeln!(f)?;
        }

        if result.is_win() {
            writeln!(f, "\nWinning combinations:")?;
            for (symbol, combinations) in &result.applied_combinations {
                for id in combinations {
                    let name = readable_combination(id);
                    writeln!(f, "  Symbol '{symbol}': {name}")?;
                }
            }
        } else {
            writeln!(f, "\nNo winning combinations (you lost).")?;
        }

        writeln!(f, "\nDetailed breakdown:")?;
        if result.breakdown.is_empty() {
            writeln!(f, "  No details (no winnings?).")?;
        }
        for line in &result.breakdown {
            writeln!(f, "  {line}")?;
        }

        match (&result.applied_bonus_symbol, result.bonus_effect) {
            (None, _) => writeln!(f, "\nNo bonus applied.")?,
            (Some(symbol), Some(BonusEffect::Miss)) => {
                writeln!(f, "\nBonus: {symbol} (no effect).")?
            }
            (Some(symbol), _) => writeln!(f, "\nBonus applied: {symbol}")?,
        }

        writeln!(f, "\nFinal reward: {}", result.final_reward)
    }
}
