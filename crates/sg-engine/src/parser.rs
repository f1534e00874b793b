//! Config parser: JSON and YAML documents into `GameConfig`
//!
//! The document types mirror the on-disk schema field for field and accept
//! unknown fields. Conversion into the typed model resolves symbol kinds,
//! combination triggers and `"row:column"` cell references.
//!
//! ```rust,ignore
//! let parser = ConfigParser::new();
//! let config = parser.parse_json(json_string)?;
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combinations::{WinCombination, WinTrigger};
use crate::config::{DEFAULT_GRID_SIZE, GameConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::grid::Cell;
use crate::probability::{CellProbability, ProbabilityTable, WeightMap};
use crate::symbols::{BonusImpact, SymbolDefinition, SymbolKind};

/// Config document parser
pub struct ConfigParser {
    /// Size limits
    pub limits: ConfigLimits,
}

/// Upper bounds applied while parsing
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_rows: usize,
    pub max_columns: usize,
    pub max_symbols: usize,
    pub max_win_combinations: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_rows: 100,
            max_columns: 100,
            max_symbols: 256,
            max_win_combinations: 256,
        }
    }
}

impl ConfigParser {
    /// Create a parser with default limits
    pub fn new() -> Self {
        Self {
            limits: ConfigLimits::default(),
        }
    }

    /// Create a parser with custom limits
    pub fn with_limits(limits: ConfigLimits) -> Self {
        Self { limits }
    }

    /// Parse a JSON document
    pub fn parse_json(&self, json: &str) -> ConfigResult<GameConfig> {
        let doc: ConfigDocument = serde_json::from_str(json)?;
        self.to_game_config(doc)
    }

    /// Parse a YAML document
    pub fn parse_yaml(&self, yaml: &str) -> ConfigResult<GameConfig> {
        let doc: ConfigDocument = serde_yml::from_str(yaml)?;
        self.to_game_config(doc)
    }

    /// Check a document against the parser limits
    pub fn check_limits(&self, doc: &ConfigDocument) -> ConfigResult<()> {
        let rows = doc.rows.unwrap_or(DEFAULT_GRID_SIZE);
        if rows > self.limits.max_rows {
            return Err(ConfigError::Validation(format!(
                "Too many rows: {} > {}",
                rows, self.limits.max_rows
            )));
        }

        let columns = doc.columns.unwrap_or(DEFAULT_GRID_SIZE);
        if columns > self.limits.max_columns {
            return Err(ConfigError::Validation(format!(
                "Too many columns: {} > {}",
                columns, self.limits.max_columns
            )));
        }

        if doc.symbols.len() > self.limits.max_symbols {
            return Err(ConfigError::Validation(format!(
                "Too many symbols: {} > {}",
                doc.symbols.len(),
                self.limits.max_symbols
            )));
        }

        if doc.win_combinations.len() > self.limits.max_win_combinations {
            return Err(ConfigError::Validation(format!(
                "Too many win combinations: {} > {}",
                doc.win_combinations.len(),
                self.limits.max_win_combinations
            )));
        }

        Ok(())
    }

    /// Convert a document into the typed model
    pub fn to_game_config(&self, doc: ConfigDocument) -> ConfigResult<GameConfig> {
        self.check_limits(&doc)?;

        let symbols = doc
            .symbols
            .into_iter()
            .map(|(id, raw)| {
                let symbol = raw.into_definition(&id)?;
                Ok((id, symbol))
            })
            .collect::<ConfigResult<IndexMap<_, _>>>()?;

        let win_combinations = doc
            .win_combinations
            .into_iter()
            .map(|(id, raw)| {
                let combination = raw.into_combination(&id)?;
                Ok((id, combination))
            })
            .collect::<ConfigResult<IndexMap<_, _>>>()?;

        let probabilities = ProbabilityTable {
            standard_symbols: doc
                .probabilities
                .standard_symbols
                .into_iter()
                .map(|entry| CellProbability {
                    cell: Cell::new(entry.row, entry.column),
                    symbols: entry.symbols,
                })
                .collect(),
            bonus_symbols: doc.probabilities.bonus_symbols.symbols,
        };

        Ok(GameConfig {
            rows: doc.rows.unwrap_or(DEFAULT_GRID_SIZE),
            columns: doc.columns.unwrap_or(DEFAULT_GRID_SIZE),
            symbols,
            probabilities,
            win_combinations,
        })
    }
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Config document structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub columns: Option<usize>,
    #[serde(default)]
    pub symbols: IndexMap<String, SymbolDocument>,
    #[serde(default)]
    pub probabilities: ProbabilitiesDocument,
    #[serde(default)]
    pub win_combinations: IndexMap<String, WinCombinationDocument>,
}

/// Symbol entry as written in the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolDocument {
    #[serde(default)]
    pub reward_multiplier: f64,
    #[serde(rename = "type")]
    pub symbol_type: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub extra: Option<u64>,
}

impl SymbolDocument {
    fn into_definition(self, id: &str) -> ConfigResult<SymbolDefinition> {
        let invalid = |reason: String| ConfigError::InvalidSymbol {
            symbol: id.to_string(),
            reason,
        };

        let kind = match self.symbol_type.as_str() {
            "standard" => SymbolKind::Standard,
            "bonus" => {
                let impact = match self.impact.as_deref() {
                    Some("multiply_reward") => BonusImpact::MultiplyReward,
                    Some("extra_bonus") => BonusImpact::ExtraBonus {
                        extra: self
                            .extra
                            .ok_or_else(|| invalid("extra_bonus requires 'extra'".into()))?,
                    },
                    Some("miss") => BonusImpact::Miss,
                    Some(other) => return Err(invalid(format!("unknown impact '{other}'"))),
                    None => return Err(invalid("bonus symbol requires 'impact'".into())),
                };
                SymbolKind::Bonus(impact)
            }
            other => return Err(invalid(format!("unknown type '{other}'"))),
        };

        if self.reward_multiplier < 0.0 {
            return Err(invalid(format!(
                "negative reward_multiplier {}",
                self.reward_multiplier
            )));
        }

        Ok(SymbolDefinition {
            reward_multiplier: self.reward_multiplier,
            kind,
        })
    }
}

/// `probabilities` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbabilitiesDocument {
    #[serde(default)]
    pub standard_symbols: Vec<CellProbabilityDocument>,
    #[serde(default)]
    pub bonus_symbols: BonusProbabilityDocument,
}

/// One `standard_symbols` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellProbabilityDocument {
    #[serde(default)]
    pub column: usize,
    #[serde(default)]
    pub row: usize,
    #[serde(default)]
    pub symbols: WeightMap,
}

/// `bonus_symbols` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BonusProbabilityDocument {
    #[serde(default)]
    pub symbols: WeightMap,
}

/// Win combination entry as written in the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinCombinationDocument {
    #[serde(default)]
    pub reward_multiplier: f64,
    pub when: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub covered_areas: Vec<Vec<String>>,
}

impl WinCombinationDocument {
    fn into_combination(self, id: &str) -> ConfigResult<WinCombination> {
        let invalid = |reason: String| ConfigError::InvalidCombination {
            combination: id.to_string(),
            reason,
        };

        let trigger = match self.when.as_str() {
            "same_symbols" => WinTrigger::SameSymbols {
                count: self
                    .count
                    .ok_or_else(|| invalid("same_symbols requires 'count'".into()))?,
            },
            "linear_symbols" => {
                if self.covered_areas.is_empty() {
                    log::warn!(
                        "Win combination '{id}' has no covered_areas and can never fire"
                    );
                }
                let covered_areas = self
                    .covered_areas
                    .iter()
                    .map(|line| {
                        line.iter()
                            .map(|cell| cell.parse::<Cell>())
                            .collect::<ConfigResult<Vec<_>>>()
                    })
                    .collect::<ConfigResult<Vec<Vec<Cell>>>>()?;
                WinTrigger::LinearSymbols { covered_areas }
            }
            other => return Err(invalid(format!("unknown trigger '{other}'"))),
        };

        Ok(WinCombination {
            reward_multiplier: self.reward_multiplier,
            group: self.group,
            trigger,
        })
    }
}
