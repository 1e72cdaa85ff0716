//! # Cylinder Primitive
//!
//! Generates meshes for Z-axis prisms with a regular polygon section, used
//! as the mounting hole cutter.

use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use glam::{DVec2, DVec3};
use std::f64::consts::PI;

/// Creates a cylinder parallel to the Z axis.
///
/// # Arguments
///
/// * `center` - XY position of the axis
/// * `radius` - Circumradius of the polygonal section
/// * `z_bottom`, `z_top` - Axial extent
/// * `segments` - Number of segments around circumference
///
/// # Example
///
/// ```rust
/// use plate_mesh::primitives::create_cylinder;
/// use glam::DVec2;
///
/// let mesh = create_cylinder(DVec2::new(0.0, 13.5), 2.5, -10.0, 5.0, 32).unwrap();
/// let (min, max) = mesh.bounding_box();
/// assert_eq!(min.z, -10.0);
/// assert_eq!(max.z, 5.0);
/// ```
pub fn create_cylinder(
    center: DVec2,
    radius: f64,
    z_bottom: f64,
    z_top: f64,
    segments: u32,
) -> Result<Mesh, MeshError> {
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(MeshError::degenerate(format!(
            "Cylinder radius must be positive: {radius}"
        )));
    }

    if !(z_top > z_bottom) || !z_top.is_finite() || !z_bottom.is_finite() {
        return Err(MeshError::degenerate(format!(
            "Cylinder height must be positive: bottom={z_bottom}, top={z_top}"
        )));
    }

    if segments < MIN_SEGMENTS {
        return Err(MeshError::degenerate(format!(
            "Cylinder segments must be at least {MIN_SEGMENTS}: {segments}"
        )));
    }

    let n = segments as usize;
    let mut mesh = Mesh::with_capacity(2 * n, 4 * n - 4);

    let ring = |mesh: &mut Mesh, z: f64| -> Vec<u32> {
        (0..segments)
            .map(|j| {
                let theta = 2.0 * PI * j as f64 / segments as f64;
                let p = center + DVec2::new(theta.cos(), theta.sin()) * radius;
                mesh.add_vertex(DVec3::new(p.x, p.y, z))
            })
            .collect()
    };

    let bottom = ring(&mut mesh, z_bottom);
    let top = ring(&mut mesh, z_top);

    // Side quads
    for j in 0..n {
        let k = (j + 1) % n;
        mesh.add_triangle(bottom[j], bottom[k], top[k]);
        mesh.add_triangle(bottom[j], top[k], top[j]);
    }

    // Caps (fan)
    for j in 1..n - 1 {
        mesh.add_triangle(bottom[0], bottom[j + 1], bottom[j]);
        mesh.add_triangle(top[0], top[j], top[j + 1]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use config::constants::inscribed_polygon_area;

    #[test]
    fn test_cylinder_counts() {
        let mesh = create_cylinder(DVec2::ZERO, 5.0, 0.0, 10.0, 32).unwrap();
        assert_eq!(mesh.vertex_count(), 64);
        assert_eq!(mesh.triangle_count(), 2 * 32 + 2 * 30);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_volume_matches_polygon_area() {
        let mesh = create_cylinder(DVec2::new(3.0, -2.0), 2.5, -1.0, 3.0, 48).unwrap();
        let expected = inscribed_polygon_area(2.5, 48) * 4.0;
        assert_relative_eq!(mesh.volume(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_cylinder_bounds_follow_center() {
        let mesh = create_cylinder(DVec2::new(0.0, 13.5), 2.5, -10.0, 5.0, 32).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(max.y, 16.0, epsilon = 1e-12);
        assert_relative_eq!(max.x, 2.5, epsilon = 1e-12);
        assert!(min.y >= 11.0 - 1e-12);
    }

    #[test]
    fn test_cylinder_invalid_height() {
        assert!(create_cylinder(DVec2::ZERO, 5.0, 1.0, 1.0, 32).is_err());
    }

    #[test]
    fn test_cylinder_invalid_radius() {
        assert!(create_cylinder(DVec2::ZERO, 0.0, 0.0, 1.0, 32).is_err());
        assert!(create_cylinder(DVec2::ZERO, f64::NAN, 0.0, 1.0, 32).is_err());
    }

    #[test]
    fn test_cylinder_too_few_segments() {
        assert!(create_cylinder(DVec2::ZERO, 5.0, 0.0, 10.0, 2).is_err());
    }
}
