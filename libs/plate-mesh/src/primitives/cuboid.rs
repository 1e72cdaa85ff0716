//! # Cuboid Primitive
//!
//! Generates meshes for axis-aligned rectangular boxes: the plate itself,
//! pattern pillars and pockets, and engraving cutters.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates an axis-aligned box spanning `min` to `max`.
///
/// # Returns
///
/// A mesh with 8 vertices and 12 triangles (2 per face).
///
/// # Example
///
/// ```rust
/// use plate_mesh::primitives::create_cuboid;
/// use glam::DVec3;
///
/// let mesh = create_cuboid(DVec3::ZERO, DVec3::splat(10.0)).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_cuboid(min: DVec3, max: DVec3) -> Result<Mesh, MeshError> {
    let size = max - min;
    if !min.is_finite() || !max.is_finite() || size.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Cuboid extent must be positive and finite: min={min:?}, max={max:?}"
        )));
    }

    let mut mesh = Mesh::with_capacity(8, 12);

    // Bottom face (z = min.z)
    let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
    let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
    let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
    let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));

    // Top face (z = max.z)
    let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
    let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
    let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
    let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

    // Bottom, top
    mesh.add_triangle(v0, v2, v1);
    mesh.add_triangle(v0, v3, v2);
    mesh.add_triangle(v4, v5, v6);
    mesh.add_triangle(v4, v6, v7);

    // Front (y = min.y), back (y = max.y)
    mesh.add_triangle(v0, v1, v5);
    mesh.add_triangle(v0, v5, v4);
    mesh.add_triangle(v2, v3, v7);
    mesh.add_triangle(v2, v7, v6);

    // Left (x = min.x), right (x = max.x)
    mesh.add_triangle(v3, v0, v4);
    mesh.add_triangle(v3, v4, v7);
    mesh.add_triangle(v1, v2, v6);
    mesh.add_triangle(v1, v6, v5);

    Ok(mesh)
}

/// Creates a box of the given size centered at `center`.
///
/// # Example
///
/// ```rust
/// use plate_mesh::primitives::create_cuboid_centered;
/// use glam::DVec3;
///
/// let plate = create_cuboid_centered(DVec3::ZERO, DVec3::new(27.0, 27.0, 3.0)).unwrap();
/// let (min, max) = plate.bounding_box();
/// assert_eq!(min, DVec3::new(-13.5, -13.5, -1.5));
/// assert_eq!(max, DVec3::new(13.5, 13.5, 1.5));
/// ```
pub fn create_cuboid_centered(center: DVec3, size: DVec3) -> Result<Mesh, MeshError> {
    let half = size / 2.0;
    create_cuboid(center - half, center + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cuboid_counts() {
        let mesh = create_cuboid(DVec3::ZERO, DVec3::splat(10.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cuboid_bounds() {
        let mesh = create_cuboid(DVec3::new(1.0, 2.0, 3.0), DVec3::new(4.0, 6.0, 8.0)).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(max, DVec3::new(4.0, 6.0, 8.0));
    }

    #[test]
    fn test_cuboid_outward_winding() {
        let mesh = create_cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
        let center = DVec3::splat(0.5);
        for i in 0..mesh.triangle_count() {
            let [a, _, _] = mesh.triangle_positions(i);
            assert!(mesh.face_normal(i).dot(a - center) > 0.0, "triangle {i} faces inward");
        }
        assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cuboid_centered() {
        let mesh = create_cuboid_centered(DVec3::new(0.5, -0.5, 2.0), DVec3::splat(1.0)).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(0.0, -1.0, 1.5));
        assert_eq!(max, DVec3::new(1.0, 0.0, 2.5));
    }

    #[test]
    fn test_cuboid_zero_extent() {
        assert!(create_cuboid(DVec3::ZERO, DVec3::new(0.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_cuboid_inverted_extent() {
        assert!(create_cuboid(DVec3::ONE, DVec3::ZERO).is_err());
    }

    #[test]
    fn test_cuboid_non_finite() {
        assert!(create_cuboid(DVec3::ZERO, DVec3::new(f64::INFINITY, 1.0, 1.0)).is_err());
    }
}
