//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine; result.invert()
//!
//! Operands whose bounding boxes are separated skip the trees entirely. The
//! combined polygons are stitched into a closed mesh by `stitch`.
//!
//! ## Example
//!
//! ```rust
//! use plate_mesh::ops::boolean::difference;
//! use plate_mesh::primitives::create_cuboid;
//! use glam::DVec3;
//!
//! let plate = create_cuboid(DVec3::ZERO, DVec3::new(10.0, 10.0, 2.0)).unwrap();
//! let pocket = create_cuboid(DVec3::new(4.0, 4.0, 1.0), DVec3::new(6.0, 6.0, 3.0)).unwrap();
//! let result = difference(&plate, &pocket).unwrap();
//! assert!((result.volume() - (200.0 - 4.0)).abs() < 1e-6);
//! ```

mod bsp;
mod plane;
mod polygon;
mod stitch;


use crate::error::MeshError;
use crate::Mesh;
use bsp::BspTree;
use config::constants::BSP_EPSILON;
use glam::DVec3;
use polygon::Polygon;
use stitch::polygons_to_mesh;
use tracing::trace;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two meshes.
///
/// Returns a mesh containing all geometry from both inputs.
pub fn union(a: &Mesh, b: &Mesh) -> Result<Mesh, MeshError> {
    check_operands("union", a, b)?;

    if a.is_empty() {
        return Ok(b.clone());
    }
    if b.is_empty() || separated(a, b) {
        let mut merged = a.clone();
        merged.merge(b);
        return Ok(merged);
    }

    let mut bsp_a = BspTree::new(mesh_to_polygons(a));
    let mut bsp_b = BspTree::new(mesh_to_polygons(b));

    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.into_polygons();
    result.extend(bsp_b.into_polygons());

    finish("union", result)
}

/// Compute difference of two meshes (A - B).
///
/// Returns a mesh containing geometry from A that is not in B.
pub fn difference(a: &Mesh, b: &Mesh) -> Result<Mesh, MeshError> {
    check_operands("difference", a, b)?;

    if a.is_empty() {
        return Ok(Mesh::new());
    }
    if b.is_empty() || separated(a, b) {
        return Ok(a.clone());
    }

    let mut bsp_a = BspTree::new(mesh_to_polygons(a));
    let mut bsp_b = BspTree::new(mesh_to_polygons(b));

    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.into_polygons();
    result.extend(bsp_b.into_polygons());
    for poly in &mut result {
        poly.flip();
    }

    finish("difference", result)
}

/// Union of many meshes in one pass.
///
/// Operands are merged pairwise in a balanced tree, so spatially ordered
/// inputs (grid cells in row order) mostly meet neighbours they touch and
/// the separated halves take the bounding-box shortcut. Touching operands
/// lose their shared faces.
pub fn union_all(meshes: &[Mesh]) -> Result<Mesh, MeshError> {
    match meshes {
        [] => Ok(Mesh::new()),
        [single] => Ok(single.clone()),
        _ => {
            let (left, right) = meshes.split_at(meshes.len() / 2);
            union(&union_all(left)?, &union_all(right)?)
        }
    }
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

fn check_operands(operation: &'static str, a: &Mesh, b: &Mesh) -> Result<(), MeshError> {
    if !a.validate() || !b.validate() {
        return Err(MeshError::degenerate(format!(
            "{operation} operand has invalid indices or non-finite vertices"
        )));
    }

    trace!(
        operation,
        lhs_triangles = a.triangle_count(),
        rhs_triangles = b.triangle_count(),
        "boolean operation"
    );
    Ok(())
}

/// True when the bounding boxes cannot touch.
fn separated(a: &Mesh, b: &Mesh) -> bool {
    let (a_min, a_max) = a.bounding_box();
    let (b_min, b_max) = b.bounding_box();
    let gap = DVec3::splat(BSP_EPSILON);

    (a_max + gap).cmplt(b_min).any() || (b_max + gap).cmplt(a_min).any()
}

/// Convert mesh to list of polygons.
fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    mesh.triangle_iter()
        .filter_map(|corners| Polygon::from_vertices(corners.to_vec()))
        .collect()
}

fn finish(operation: &'static str, polygons: Vec<Polygon>) -> Result<Mesh, MeshError> {
    let mesh = polygons_to_mesh(&polygons);
    if !mesh.is_finite() {
        return Err(MeshError::boolean_failed(
            operation,
            "result contains non-finite vertices",
        ));
    }
    Ok(mesh)
}
