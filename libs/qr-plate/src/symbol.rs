//! # Symbol Sources
//!
//! Anything that can turn content into a [`ModuleMatrix`]. Encoding a QR
//! symbol is left to the caller; the builder only ever sees the grid.

use crate::error::GeometryError;
use crate::matrix::ModuleMatrix;

/// Produces the module grid for a piece of content.
pub trait SymbolSource {
    fn module_matrix(&self, content: &str) -> Result<ModuleMatrix, GeometryError>;
}

/// Treats the content itself as a text grid (see [`ModuleMatrix::from_text`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextGridSource;

impl SymbolSource for TextGridSource {
    fn module_matrix(&self, content: &str) -> Result<ModuleMatrix, GeometryError> {
        ModuleMatrix::from_text(content)
    }
}

impl<F> SymbolSource for F
where
    F: Fn(&str) -> Result<ModuleMatrix, GeometryError>,
{
    fn module_matrix(&self, content: &str) -> Result<ModuleMatrix, GeometryError> {
        self(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_grid_source() {
        let matrix = TextGridSource.module_matrix("#.\n.#").unwrap();
        assert_eq!(matrix.set_count(), 2);
    }

    #[test]
    fn test_closure_source() {
        let solid_block = |content: &str| {
            let n = content.len();
            ModuleMatrix::new(vec![vec![true; n]; n])
        };
        assert_eq!(solid_block.module_matrix("abc").unwrap().set_count(), 9);
        assert!(solid_block.module_matrix("").is_err());
    }
}
