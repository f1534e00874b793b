//! Symbol definitions

use serde::{Deserialize, Serialize};

/// Effect a bonus symbol has on the pre-bonus total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "impact", rename_all = "snake_case")]
pub enum BonusImpact {
    /// Multiply the total by the symbol's reward multiplier
    MultiplyReward,
    /// Add a flat amount to the total
    ExtraBonus { extra: u64 },
    /// Recorded as applied, no numeric effect
    Miss,
}

/// Symbol classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    /// Paying symbol, counted towards win combinations
    Standard,
    /// Bonus symbol, applied once to a winning total
    Bonus(BonusImpact),
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDefinition {
    /// Base multiplier (standard) or bonus factor (`MultiplyReward`)
    pub reward_multiplier: f64,
    /// Symbol kind
    pub kind: SymbolKind,
}

impl SymbolDefinition {
    /// Create a standard symbol
    pub fn standard(reward_multiplier: f64) -> Self {
        Self {
            reward_multiplier,
            kind: SymbolKind::Standard,
        }
    }

    /// Create a bonus symbol that multiplies the reward
    pub fn multiplier(factor: f64) -> Self {
        Self {
            reward_multiplier: factor,
            kind: SymbolKind::Bonus(BonusImpact::MultiplyReward),
        }
    }

    /// Create a bonus symbol that adds a flat amount
    pub fn extra_bonus(extra: u64) -> Self {
        Self {
            reward_multiplier: 0.0,
            kind: SymbolKind::Bonus(BonusImpact::ExtraBonus { extra }),
        }
    }

    /// Create a bonus symbol without effect
    pub fn miss() -> Self {
        Self {
            reward_multiplier: 0.0,
            kind: SymbolKind::Bonus(BonusImpact::Miss),
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self.kind, SymbolKind::Standard)
    }

    /// Bonus impact, `None` for standard symbols
    pub fn bonus_impact(&self) -> Option<BonusImpact> {
        match self.kind {
            SymbolKind::Standard => None,
            SymbolKind::Bonus(impact) => Some(impact),
        }
    }
}
