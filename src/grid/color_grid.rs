use std::collections::HashSet;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{BubbleError, BubbleResult};

/// Row-major grid of block colors plus the block size they were sampled at.
///
/// Invariant: every row has the same length.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorGrid {
    block_size: u32,
    rows: Vec<Vec<Rgb8>>,
}

impl ColorGrid {
    /// Build a grid from explicit rows. Ragged rows are rejected; zero rows is allowed.
    pub fn from_rows(rows: Vec<Vec<Rgb8>>, block_size: u32) -> BubbleResult<Self> {
        if block_size == 0 {
            return Err(BubbleError::validation("grid block_size must be >= 1"));
        }
        if let Some(first) = rows.first() {
            let cols = first.len();
            if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
                return Err(BubbleError::validation(format!(
                    "grid row {y} has {} cells, expected {cols}",
                    row.len()
                )));
            }
        }
        Ok(Self { block_size, rows })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn rows(&self) -> &[Vec<Rgb8>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells per row (0 for a grid without rows).
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell_count(&self) -> usize {
        self.row_count() * self.cols()
    }

    /// `true` when there is nothing to draw: no rows, or an empty first row.
    pub fn is_empty(&self) -> bool {
        self.cols() == 0
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb8> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Cells in build order as `(x, y, color)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Rgb8)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &c)| (x, y, c)))
    }

    /// Number of distinct RGB triples in the grid.
    pub fn distinct_colors(&self) -> usize {
        self.rows.iter().flatten().collect::<HashSet<_>>().len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/color_grid.rs"]
mod tests;
