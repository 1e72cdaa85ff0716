//! # Hole Cutter
//!
//! Drills the mounting hole through the strip reserved above the pattern.

use config::constants::{HOLE_CUTTER_CLEARANCE_TOP, HOLE_CUTTER_OVERRUN, HOLE_SEGMENTS};
use plate_mesh::{create_cylinder, difference, Mesh};
use tracing::debug;

use crate::error::GeometryError;
use crate::layout::{HolePlacement, ResolvedLayout};
use crate::solid::Solid;

/// Cylinder that removes the hole.
///
/// It starts above the highest surface and runs far below the plate, so it
/// pierces the plate in either feature mode.
pub fn hole_cutter(hole: &HolePlacement, layout: &ResolvedLayout) -> Result<Mesh, GeometryError> {
    let z_top = layout.top_surface() + HOLE_CUTTER_CLEARANCE_TOP;
    let z_bottom = z_top - (layout.plate_thickness + layout.feature_height + HOLE_CUTTER_OVERRUN);

    Ok(create_cylinder(hole.center, hole.radius, z_bottom, z_top, HOLE_SEGMENTS)?)
}

/// Subtracts the hole when the layout has one.
pub fn cut_hole(solid: Solid, layout: &ResolvedLayout) -> Result<Solid, GeometryError> {
    let Some(hole) = &layout.hole else {
        return Ok(solid);
    };

    let cutter = hole_cutter(hole, layout)?;
    let mesh = difference(solid.mesh(), &cutter)?;

    debug!(center_y = hole.center.y, radius = hole.radius, "cut mounting hole");
    Ok(solid.map_mesh(mesh))
}
