//! # Module Matrix
//!
//! The square boolean grid produced by a symbol encoder.

use std::fmt;
use std::str::FromStr;

use config::constants::MAX_MATRIX_SIZE;

use crate::error::GeometryError;

/// Square grid of QR modules, row-major with the origin at the top-left.
///
/// A set cell is a dark module. The grid is validated on construction and
/// immutable afterwards.
///
/// # Example
///
/// ```rust
/// use qr_plate::ModuleMatrix;
///
/// let matrix: ModuleMatrix = "#.\n.#".parse().unwrap();
/// assert_eq!(matrix.size(), 2);
/// assert!(matrix.is_set(0, 0));
/// assert!(!matrix.is_set(0, 1));
/// assert_eq!(matrix.set_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl ModuleMatrix {
    /// Validates and wraps a grid of rows.
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, GeometryError> {
        let size = rows.len();
        if size == 0 {
            return Err(GeometryError::invalid_matrix("matrix has no rows"));
        }
        if size > MAX_MATRIX_SIZE {
            return Err(GeometryError::invalid_matrix(format!(
                "matrix has {size} rows, at most {MAX_MATRIX_SIZE} are supported"
            )));
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(GeometryError::invalid_matrix(format!(
                "row {index} has {} cells, expected {size} for a square matrix",
                row.len()
            )));
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parses a text grid: `#` or `1` is dark, `.`, `0` or space is light.
    ///
    /// Lines holding only whitespace are skipped, so an all-light row must
    /// be written with `.` or `0`.
    pub fn from_text(text: &str) -> Result<Self, GeometryError> {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .map(|ch| match ch {
                        '#' | '1' => Ok(true),
                        '.' | '0' | ' ' => Ok(false),
                        other => Err(GeometryError::invalid_matrix(format!(
                            "unexpected character {other:?} in row {row}"
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rows)
    }

    /// Side length N of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if the module at `row`, `col` is dark.
    ///
    /// Out-of-range coordinates read as light.
    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col]
    }

    /// Number of dark modules.
    pub fn set_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Iterates `(row, col)` of dark modules in row-major order.
    pub fn set_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell)
            .map(move |(i, _)| (i / self.size, i % self.size))
    }
}

impl FromStr for ModuleMatrix {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl fmt::Display for ModuleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|&cell| if cell { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix_rejected() {
        let err = ModuleMatrix::new(vec![]).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidMatrix { .. }));
    }

    #[test]
    fn test_non_square_rejected() {
        let err = ModuleMatrix::new(vec![vec![true, false, true], vec![false, true, false]]).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidMatrix { .. }));
    }

    #[test]
    fn test_ragged_rejected() {
        let err = ModuleMatrix::new(vec![vec![true, false], vec![true]]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_oversized_rejected() {
        let n = MAX_MATRIX_SIZE + 1;
        assert!(ModuleMatrix::new(vec![vec![false; n]; n]).is_err());
    }

    #[test]
    fn test_single_cell() {
        let matrix = ModuleMatrix::new(vec![vec![true]]).unwrap();
        assert_eq!(matrix.size(), 1);
        assert_eq!(matrix.set_count(), 1);
        assert!(!matrix.is_set(1, 0));
    }

    #[test]
    fn test_from_text_variants() {
        let err = ModuleMatrix::from_text("1 0\n. #.\n\n0#1\n").unwrap_err();
        assert!(matches!(err, GeometryError::InvalidMatrix { .. }));

        let matrix = ModuleMatrix::from_text("1 0\n.#.\n0#1\n").unwrap();
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.set_cells().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_from_text_bad_character() {
        let err = ModuleMatrix::from_text("#x\n..").unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_display_round_trips_text() {
        let text = "##.\n.#.\n..#\n";
        let matrix: ModuleMatrix = text.parse().unwrap();
        assert_eq!(matrix.to_string(), text);
    }
}
