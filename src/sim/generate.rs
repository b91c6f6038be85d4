//! Level generation
//!
//! Interior rows are split into three bands, top to bottom:
//! - dense: every cell holds a block
//! - gradient: fill probability falls linearly from ~1 to ~0
//! - clear: empty, leaving room above the paddle
//!
//! Randomness only decides which gradient cells are filled and which palette
//! color each block gets; band shapes and the border are fixed.

use std::ops::Range;

use glam::IVec2;
use rand::Rng;

use super::grid::Grid;
use crate::config::Config;

/// Row ranges for the three generation bands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandLayout {
    pub dense: Range<i32>,
    pub gradient: Range<i32>,
    pub clear: Range<i32>,
}

impl BandLayout {
    /// Top third dense, gradient down to a quarter above the bottom
    pub fn for_rows(rows: i32) -> Self {
        let dense_end = rows / 3;
        let gradient_end = (rows - rows / 4).max(dense_end);
        Self {
            dense: 0..dense_end,
            gradient: dense_end..gradient_end,
            clear: gradient_end..rows,
        }
    }

    /// Chance that a cell in `row` is filled
    pub fn fill_probability(&self, row: i32) -> f64 {
        if self.dense.contains(&row) {
            1.0
        } else if self.gradient.contains(&row) {
            let len = self.gradient.len() as f64;
            let step = (row - self.gradient.start + 1) as f64;
            1.0 - step / (len + 1.0)
        } else {
            0.0
        }
    }
}

/// Build a fresh grid for `config`
pub fn generate(config: &Config, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(config.columns, config.rows);
    let layout = BandLayout::for_rows(config.rows);
    let colors = config.palette.blocks.len();

    for y in layout.dense.start..layout.gradient.end {
        let p = layout.fill_probability(y);
        for x in 0..config.columns {
            // Dense rows skip the draw so they are filled regardless of RNG
            if p >= 1.0 || rng.random_bool(p) {
                let color = rng.random_range(0..colors) as u8;
                grid.set_block(IVec2::new(x, y), color);
            }
        }
    }

    log::debug!(
        "Generated {}x{} grid: {} blocks (dense {:?}, gradient {:?}, clear {:?})",
        config.columns,
        config.rows,
        grid.block_count(),
        layout.dense,
        layout.gradient,
        layout.clear
    );

    grid
}
