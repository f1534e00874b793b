//! Symbol matrix and cell coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A (row, column) coordinate inside the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Parses the `"row:column"` notation used by `covered_areas`
impl FromStr for Cell {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidCell(s.to_string());
        let (row, column) = s.split_once(':').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        let column = column.trim().parse().map_err(|_| invalid())?;
        Ok(Self { row, column })
    }
}

/// Generated symbol matrix, stored row-major (`cells[row][column]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from nested rows of symbol identifiers
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Grid with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (width of the first row)
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// True when there is no row or the first row has no cells
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.columns() == 0
    }

    /// Symbol at a cell, `None` when out of bounds
    pub fn get(&self, cell: Cell) -> Option<&str> {
        self.cells
            .get(cell.row)
            .and_then(|row| row.get(cell.column))
            .map(String::as_str)
    }

    /// Iterate cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &str)> {
        self.cells.iter().enumerate().flat_map(|(row, symbols)| {
            symbols.iter().enumerate().map(move |(column, symbol)| {
                (Cell::new(row, column), symbol.as_str())
            })
        })
    }

    /// Borrow the rows
    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Check that every coordinate of `line` holds `symbol`
    pub fn line_filled_with(&self, line: &[Cell], symbol: &str) -> bool {
        line.iter().all(|&cell| self.get(cell) == Some(symbol))
    }
}
