//! # Solid
//!
//! The model handed from stage to stage and finally to an exporter.

use glam::DVec3;
use plate_mesh::Mesh;

/// A closed triangle mesh plus the number of pattern features cut or added.
///
/// Each build stage takes the solid by value and returns the next one.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    mesh: Mesh,
    feature_count: usize,
}

impl Solid {
    /// Wraps a mesh that carries no pattern features yet.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            feature_count: 0,
        }
    }

    pub(crate) fn with_features(mesh: Mesh, feature_count: usize) -> Self {
        Self {
            mesh,
            feature_count,
        }
    }

    /// Replaces the geometry, keeping the feature count.
    pub(crate) fn map_mesh(self, mesh: Mesh) -> Self {
        Self { mesh, ..self }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    /// Axis-aligned `(min, max)` corners.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.mesh.bounding_box()
    }

    /// Extent along each axis.
    pub fn dimensions(&self) -> DVec3 {
        let (min, max) = self.bounding_box();
        max - min
    }

    /// Enclosed volume in cubic millimetres.
    pub fn volume(&self) -> f64 {
        self.mesh.volume()
    }

    /// Number of pillars or pockets, one per set module.
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plate_mesh::create_cuboid;

    #[test]
    fn test_metrics() {
        let mesh = create_cuboid(DVec3::new(-2.0, -1.0, 0.0), DVec3::new(2.0, 1.0, 3.0)).unwrap();
        let solid = Solid::with_features(mesh, 4);

        assert_eq!(solid.dimensions(), DVec3::new(4.0, 2.0, 3.0));
        assert_relative_eq!(solid.volume(), 24.0, epsilon = 1e-9);
        assert_eq!(solid.feature_count(), 4);
        assert_eq!(solid.triangle_count(), 12);
    }

    #[test]
    fn test_map_mesh_keeps_features() {
        let solid = Solid::with_features(Mesh::new(), 7);
        let cube = create_cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
        let solid = solid.map_mesh(cube);

        assert_eq!(solid.feature_count(), 7);
        assert_eq!(solid.into_mesh().triangle_count(), 12);
    }
}
