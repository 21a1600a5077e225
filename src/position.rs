//! Subplot position codes.
//!
//! A position code like `221` means "a grid of 2 rows and 2 columns, slot 1".
//! Slots are numbered from 1, left to right and then top to bottom.

use std::fmt;

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Where a subplot lives in its figure's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "PositionSpec")]
pub struct GridPosition {
    rows: usize,
    cols: usize,
    index: usize,
}

impl GridPosition {
    /// Create a position in a `rows` x `cols` grid. `index` is 1-based.
    pub fn new(rows: usize, cols: usize, index: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(anyhow!(
                "subplot grid must have at least one row and column, got {}x{}",
                rows,
                cols
            ));
        }
        let slots = rows.checked_mul(cols).ok_or_else(|| {
            anyhow!("subplot grid {}x{} is too large", rows, cols)
        })?;
        if index == 0 || index > slots {
            return Err(anyhow!(
                "subplot index {} is out of range for a {}x{} grid",
                index,
                rows,
                cols
            ));
        }
        Ok(Self { rows, cols, index })
    }

    /// Parse a 3-digit position code like `221`.
    pub fn from_code(code: u16) -> Result<Self> {
        if !(100..=999).contains(&code) {
            return Err(anyhow!(
                "subplot position {} must be a 3-digit code like 111",
                code
            ));
        }
        let code = code as usize;
        Self::new(code / 100, (code / 10) % 10, code % 10)
            .map_err(|e| anyhow!("invalid subplot position {}: {}", code, e))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The zero-based `(row, col)` of our slot.
    pub fn cell(&self) -> (usize, usize) {
        let i = self.index - 1;
        (i / self.cols, i % self.cols)
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            index: 1,
        }
    }
}

impl TryFrom<u16> for GridPosition {
    type Error = anyhow::Error;

    fn try_from(code: u16) -> Result<Self> {
        GridPosition::from_code(code)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows < 10 && self.cols < 10 && self.index < 10 {
            write!(f, "{}{}{}", self.rows, self.cols, self.index)
        } else {
            write!(f, "({}, {}, {})", self.rows, self.cols, self.index)
        }
    }
}

/// The forms a position may take in a layout file.
#[derive(Deserialize)]
#[serde(untagged)]
enum PositionSpec {
    Code(u16),
    Grid {
        rows: usize,
        cols: usize,
        index: usize,
    },
}

impl TryFrom<PositionSpec> for GridPosition {
    type Error = anyhow::Error;

    fn try_from(spec: PositionSpec) -> Result<Self> {
        match spec {
            PositionSpec::Code(code) => GridPosition::from_code(code),
            PositionSpec::Grid { rows, cols, index } => {
                GridPosition::new(rows, cols, index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_digit_codes() {
        let p = GridPosition::from_code(221).unwrap();
        assert_eq!((p.rows(), p.cols(), p.index()), (2, 2, 1));
        assert_eq!(p.cell(), (0, 0));

        let p = GridPosition::from_code(234).unwrap();
        assert_eq!(p.cell(), (1, 0));
        assert_eq!(p.to_string(), "234");
    }

    #[test]
    fn default_is_single_full_figure_slot() {
        let full = GridPosition::from_code(111).unwrap();
        assert_eq!(GridPosition::default(), full);
    }

    #[test]
    fn rejects_bad_codes() {
        assert!(GridPosition::from_code(11).is_err());
        assert!(GridPosition::from_code(1111).is_err());
        assert!(GridPosition::from_code(105).is_err());
        assert!(GridPosition::from_code(225).is_err());
        assert!(GridPosition::from_code(220).is_err());
    }

    #[test]
    fn large_grids_need_explicit_constructor() {
        let p = GridPosition::new(4, 3, 12).unwrap();
        assert_eq!(p.cell(), (3, 2));
        assert_eq!(p.to_string(), "(4, 3, 12)");
        assert!(GridPosition::new(4, 3, 13).is_err());
    }

    #[test]
    fn deserializes_code_or_grid() {
        let p: GridPosition = serde_json::from_str("212").unwrap();
        assert_eq!(p, GridPosition::new(2, 1, 2).unwrap());

        let grid = r#"{"rows": 3, "cols": 4, "index": 10}"#;
        let p: GridPosition = serde_json::from_str(grid).unwrap();
        assert_eq!(p.cell(), (2, 1));

        assert!(serde_json::from_str::<GridPosition>("229").is_err());
        assert!(serde_json::from_str::<GridPosition>(
            r#"{"rows": 18446744073709551615, "cols": 2, "index": 1}"#
        )
        .is_err());
    }
}
