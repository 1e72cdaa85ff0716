//! # Cell Placement
//!
//! Maps matrix cells to plate coordinates. For an N×N matrix centered at
//! `(0, patternCenterY)`:
//!
//! ```text
//! x = -N/2 + 0.5 + col
//! y = patternCenterY - N/2 + 0.5 + (N - 1 - row)
//! ```
//!
//! Row 0 is the top row of the symbol and lands at the highest y.

use glam::DVec2;

use crate::layout::ResolvedLayout;
use crate::matrix::ModuleMatrix;

/// Affine map from `(row, col)` to the center of that cell on the plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTransform {
    size: usize,
    /// Center of the bottom-left cell (row N-1, col 0)
    origin: DVec2,
}

impl CellTransform {
    /// Transform for an `size`×`size` grid centered at `center`.
    pub fn new(size: usize, center: DVec2) -> Self {
        let half = size as f64 / 2.0;
        Self {
            size,
            origin: center - DVec2::splat(half) + DVec2::splat(0.5),
        }
    }

    /// Transform for the pattern area of a resolved layout.
    pub fn for_layout(layout: &ResolvedLayout) -> Self {
        Self::new(layout.matrix_size, DVec2::new(0.0, layout.pattern_center_y))
    }

    /// Center of the cell at `row`, `col`.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> DVec2 {
        let flipped = (self.size - 1 - row) as f64;
        self.origin + DVec2::new(col as f64, flipped)
    }
}

/// Centers of all set cells, in row-major order.
pub fn feature_placements(matrix: &ModuleMatrix, layout: &ResolvedLayout) -> Vec<DVec2> {
    let transform = CellTransform::for_layout(layout);
    matrix
        .set_cells()
        .map(|(row, col)| transform.cell_center(row, col))
        .collect()
}
