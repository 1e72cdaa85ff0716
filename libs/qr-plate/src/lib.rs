//! # QR Plate
//!
//! Builds a 3D printable plate from a QR module matrix: a rectangular base
//! carrying the pattern as raised pillars (relief) or recessed pockets
//! (inlay), with an optional mounting hole and optional back-text engraving.
//!
//! ## Architecture
//!
//! ```text
//! ModuleMatrix + LayoutParameters
//!     → layout::resolve   (ResolvedLayout, all validation)
//!     → base::build_base  (plate, back text)
//!     → pattern::apply_pattern
//!     → hole::cut_hole
//!     → Solid → Exporter
//! ```
//!
//! Each stage takes the previous [`Solid`] by value and returns the next.
//!
//! ## Example
//!
//! ```rust
//! use qr_plate::{build, LayoutParameters, ModuleMatrix};
//!
//! let matrix: ModuleMatrix = "#.#\n.#.\n#.#".parse().unwrap();
//! let solid = build(&matrix, &LayoutParameters::default()).unwrap();
//!
//! assert_eq!(solid.feature_count(), 5);
//! assert_eq!(solid.dimensions().z, 4.0);
//! ```

pub mod base;
pub mod error;
pub mod export;
pub mod glyphs;
pub mod hole;
pub mod layout;
pub mod matrix;
pub mod params;
pub mod pattern;
pub mod placement;
pub mod solid;
pub mod symbol;

pub use error::GeometryError;
pub use export::{Exporter, StlExporter};
pub use layout::ResolvedLayout;
pub use matrix::ModuleMatrix;
pub use params::{FeatureMode, LayoutParameters};
pub use plate_mesh::StlFormat;
pub use solid::Solid;
pub use symbol::{SymbolSource, TextGridSource};

use tracing::{info, instrument};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Builds the plate solid for `matrix`.
///
/// All parameter and layout checks run before any geometry is created.
///
/// # Errors
///
/// [`GeometryError::InvalidParameter`] or [`GeometryError::LayoutConflict`]
/// for inputs that cannot produce a sound plate, and
/// [`GeometryError::GeometryFailure`] if the mesh kernel fails.
#[instrument(skip_all, fields(n = matrix.size(), mode = %params.feature_mode))]
pub fn build(matrix: &ModuleMatrix, params: &LayoutParameters) -> Result<Solid, GeometryError> {
    let layout = layout::resolve(matrix.size(), params)?;

    let base = base::build_base(&layout)?;
    let patterned = pattern::apply_pattern(base, matrix, &layout)?;
    let solid = hole::cut_hole(patterned, &layout)?;

    let dims = solid.dimensions();
    info!(
        cells = matrix.set_count(),
        features = solid.feature_count(),
        triangles = solid.triangle_count(),
        width = dims.x,
        height = dims.y,
        depth = dims.z,
        "built plate"
    );

    Ok(solid)
}

/// Encodes `content` with `source` and builds the plate for it.
pub fn build_from_content(
    source: &impl SymbolSource,
    content: &str,
    params: &LayoutParameters,
) -> Result<Solid, GeometryError> {
    let matrix = source.module_matrix(content)?;
    build(&matrix, params)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rejects_before_geometry() {
        let matrix = ModuleMatrix::new(vec![vec![true]]).unwrap();
        let params = LayoutParameters {
            plate_thickness: -3.0,
            ..Default::default()
        };
        let err = build(&matrix, &params).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidParameter { parameter: "plate_thickness", .. }));
    }

    #[test]
    fn test_build_from_text_grid() {
        let solid = build_from_content(&TextGridSource, "#", &LayoutParameters::default()).unwrap();
        assert_eq!(solid.feature_count(), 1);
        assert_eq!(solid.dimensions(), glam::DVec3::new(7.0, 7.0, 4.0));
    }
}
