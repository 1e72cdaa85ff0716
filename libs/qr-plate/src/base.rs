//! # Base Builder
//!
//! The rectangular plate, centered at the origin, with optional back-text
//! engraving on its bottom face.

use config::constants::TOOL_OVERLAP;
use glam::DVec3;
use plate_mesh::{create_cuboid, create_cuboid_centered, difference, union_all, Mesh};
use tracing::debug;

use crate::error::GeometryError;
use crate::glyphs::line_runs;
use crate::layout::{EngravingLayout, ResolvedLayout};
use crate::solid::Solid;

/// Builds the plate and engraves the back text, if any.
pub fn build_base(layout: &ResolvedLayout) -> Result<Solid, GeometryError> {
    let size = DVec3::new(layout.base_width, layout.base_height, layout.plate_thickness);
    let plate = create_cuboid_centered(DVec3::ZERO, size)?;

    let mesh = match &layout.engraving {
        Some(engraving) => engrave(plate, engraving, layout.plate_bottom())?,
        None => plate,
    };

    debug!(
        width = layout.base_width,
        height = layout.base_height,
        thickness = layout.plate_thickness,
        engraved = layout.engraving.is_some(),
        "built base plate"
    );

    Ok(Solid::new(mesh))
}

/// Cutters for each dot run, mirrored in X so the text reads correctly
/// when the plate is turned over.
pub fn engraving_cutters(engraving: &EngravingLayout, bottom_z: f64) -> Result<Vec<Mesh>, GeometryError> {
    let pitch = engraving.pitch;
    let half_width = engraving.width() / 2.0;
    let half_height = engraving.height() / 2.0;
    let z_min = bottom_z - TOOL_OVERLAP;
    let z_max = bottom_z + engraving.depth;

    // Dot edges from one formula, so runs in neighbouring rows share
    // bit-identical faces
    let column_edge = |column: usize| half_width - column as f64 * pitch;
    let row_edge = |row: usize| half_height - row as f64 * pitch;

    line_runs(&engraving.text)
        .into_iter()
        .map(|run| {
            let (x_min, x_max) = (column_edge(run.start + run.len), column_edge(run.start));
            let (y_min, y_max) = (row_edge(run.row + 1), row_edge(run.row));

            create_cuboid(DVec3::new(x_min, y_min, z_min), DVec3::new(x_max, y_max, z_max))
                .map_err(GeometryError::from)
        })
        .collect()
}

fn engrave(plate: Mesh, engraving: &EngravingLayout, bottom_z: f64) -> Result<Mesh, GeometryError> {
    let cutters = engraving_cutters(engraving, bottom_z)?;
    if cutters.is_empty() {
        return Ok(plate);
    }

    let tool = union_all(&cutters)?;
    debug!(text = %engraving.text, runs = cutters.len(), pitch = engraving.pitch, "engraving back text");
    Ok(difference(&plate, &tool)?)
}
