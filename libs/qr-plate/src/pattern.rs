//! # Pattern Applier
//!
//! Turns every set module into a pillar (relief) or a pocket (inlay) on the
//! top face, in one boolean pass.
//!
//! Relief pillars are 1.0 wide, so neighbours share faces and the union
//! fuses them into one connected surface. Inlay pockets are 0.95 wide and
//! never touch, which leaves a 0.05 wall between adjacent pockets.

use config::constants::{INLAY_CELL_SIZE, RELIEF_CELL_SIZE, TOOL_OVERLAP};
use glam::{DVec2, DVec3};
use plate_mesh::{create_cuboid, difference, union, union_all, Mesh};
use tracing::debug;

use crate::error::GeometryError;
use crate::layout::ResolvedLayout;
use crate::matrix::ModuleMatrix;
use crate::params::FeatureMode;
use crate::placement::feature_placements;
use crate::solid::Solid;

/// Adds or cuts one feature per set module of `matrix`.
pub fn apply_pattern(
    solid: Solid,
    matrix: &ModuleMatrix,
    layout: &ResolvedLayout,
) -> Result<Solid, GeometryError> {
    let placements = feature_placements(matrix, layout);
    if placements.is_empty() {
        return Ok(solid);
    }

    let tools = feature_tools(&placements, layout)?;
    let count = tools.len();

    let mesh = match layout.feature_mode {
        FeatureMode::Relief => {
            let pillars = union_all(&tools)?;
            union(solid.mesh(), &pillars)?
        }
        FeatureMode::Inlay => {
            // Pockets are pairwise disjoint, so plain concatenation is a
            // valid cutter
            let mut pockets = Mesh::with_capacity(count * 8, count * 12);
            for tool in &tools {
                pockets.merge(tool);
            }
            difference(solid.mesh(), &pockets)?
        }
    };

    debug!(mode = %layout.feature_mode, features = count, "applied pattern");

    Ok(Solid::with_features(mesh, count))
}

/// One cuboid per placement: a pillar standing on the top face, or a
/// pocket cutter reaching down from it.
///
/// Each tool overlaps the top face by a small margin so no tool face is
/// coplanar with the plate surface.
pub fn feature_tools(placements: &[DVec2], layout: &ResolvedLayout) -> Result<Vec<Mesh>, GeometryError> {
    let top = layout.plate_top();
    let (side, z_min, z_max) = match layout.feature_mode {
        FeatureMode::Relief => (RELIEF_CELL_SIZE, top - TOOL_OVERLAP, top + layout.feature_height),
        FeatureMode::Inlay => (INLAY_CELL_SIZE, top - layout.feature_height, top + TOOL_OVERLAP),
    };
    let half = side / 2.0;

    placements
        .iter()
        .map(|center| {
            create_cuboid(
                DVec3::new(center.x - half, center.y - half, z_min),
                DVec3::new(center.x + half, center.y + half, z_max),
            )
            .map_err(GeometryError::from)
        })
        .collect()
}
