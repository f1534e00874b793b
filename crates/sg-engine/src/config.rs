//! Game configuration

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::combinations::WinCombination;
use crate::error::{ConfigError, ConfigResult};
use crate::grid::Cell;
use crate::parser::ConfigParser;
use crate::probability::{CellProbability, ProbabilityTable, WeightMap, total_weight};
use crate::symbols::SymbolDefinition;

/// Rows and columns used when the configuration omits them
pub const DEFAULT_GRID_SIZE: usize = 3;

/// Complete, read-only game configuration
///
/// Loaded once and shared by every round; nothing in the engine mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameConfig {
    /// Matrix rows
    pub rows: usize,
    /// Matrix columns
    pub columns: usize,
    /// Symbol definitions, in configuration order
    pub symbols: IndexMap<String, SymbolDefinition>,
    /// Standard and bonus placement weights
    pub probabilities: ProbabilityTable,
    /// Winning combinations, in configuration order
    pub win_combinations: IndexMap<String, WinCombination>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

impl GameConfig {
    /// Empty configuration for a `rows × columns` matrix
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            symbols: IndexMap::new(),
            probabilities: ProbabilityTable::default(),
            win_combinations: IndexMap::new(),
        }
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        ConfigParser::new().parse_json(json)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        ConfigParser::new().parse_yaml(yaml)
    }

    /// Load and validate a configuration file
    ///
    /// `.yaml` / `.yml` files are read as YAML, everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
            });

        let config = if is_yaml {
            Self::from_yaml_str(&contents)?
        } else {
            Self::from_json_str(&contents)?
        };
        config.validate()?;

        log::info!(
            "Loaded config {:?}: {}x{} grid, {} symbols, {} win combinations",
            path,
            config.rows,
            config.columns,
            config.symbols.len(),
            config.win_combinations.len()
        );
        Ok(config)
    }

    /// Add a symbol definition
    pub fn with_symbol(mut self, id: impl Into<String>, symbol: SymbolDefinition) -> Self {
        self.symbols.insert(id.into(), symbol);
        self
    }

    /// Add a winning combination
    pub fn with_combination(mut self, id: impl Into<String>, combination: WinCombination) -> Self {
        self.win_combinations.insert(id.into(), combination);
        self
    }

    /// Add standard symbol weights for a cell
    pub fn with_cell_weights<S: Into<String>>(
        mut self,
        cell: Cell,
        weights: impl IntoIterator<Item = (S, u32)>,
    ) -> Self {
        self.probabilities.standard_symbols.push(CellProbability {
            cell,
            symbols: collect_weights(weights),
        });
        self
    }

    /// Set the bonus symbol weights
    pub fn with_bonus_weights<S: Into<String>>(
        mut self,
        weights: impl IntoIterator<Item = (S, u32)>,
    ) -> Self {
        self.probabilities.bonus_symbols = collect_weights(weights);
        self
    }

    /// Symbol definition by identifier
    pub fn symbol(&self, id: &str) -> Option<&SymbolDefinition> {
        self.symbols.get(id)
    }

    /// `(rows, columns)` of generated matrices
    pub fn grid_size(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Check that matrices can be generated from this configuration
    ///
    /// Errors on zero dimensions and unusable weight tables. Entries that can
    /// never take effect are logged as warnings.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::Validation(format!(
                "Grid must have at least one row and column, got {}x{}",
                self.rows, self.columns
            )));
        }

        if self.probabilities.standard_symbols.is_empty() {
            return Err(ConfigError::Validation(
                "probabilities.standard_symbols must not be empty".into(),
            ));
        }

        for entry in &self.probabilities.standard_symbols {
            if total_weight(&entry.symbols) == 0 {
                return Err(ConfigError::Validation(format!(
                    "Standard symbol weights for cell {} must sum to more than zero",
                    entry.cell
                )));
            }
            if entry.cell.row >= self.rows || entry.cell.column >= self.columns {
                log::warn!(
                    "Probability entry for cell {} lies outside the {}x{} grid",
                    entry.cell,
                    self.rows,
                    self.columns
                );
            }
            self.warn_undefined(&entry.symbols);
        }

        if total_weight(&self.probabilities.bonus_symbols) == 0 {
            return Err(ConfigError::Validation(
                "bonus_symbols weights must sum to more than zero".into(),
            ));
        }
        self.warn_undefined(&self.probabilities.bonus_symbols);

        let cells = self.rows.saturating_mul(self.columns);
        for (id, combination) in &self.win_combinations {
            if let Some(count) = combination.required_count() {
                if count as usize > cells {
                    log::warn!("Win combination '{id}' needs {count} of {cells} cells");
                }
            }
        }

        Ok(())
    }

    fn warn_undefined(&self, weights: &WeightMap) {
        for symbol in weights.keys() {
            if !self.symbols.contains_key(symbol) {
                log::warn!("Symbol '{symbol}' has placement weights but no definition");
            }
        }
    }
}

fn collect_weights<S: Into<String>>(weights: impl IntoIterator<Item = (S, u32)>) -> WeightMap {
    weights.into_iter().map(|(s, w)| (s.into(), w)).collect()
}
