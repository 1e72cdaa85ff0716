//! # Exporters
//!
//! Hand-off point for a finished [`Solid`]. The exporter takes ownership;
//! the builder keeps nothing after export.

use std::path::Path;

use plate_mesh::{write_stl_file, StlFormat};
use tracing::info;

use crate::error::GeometryError;
use crate::solid::Solid;

/// Serializes a solid to a file.
pub trait Exporter {
    fn export(&self, solid: Solid, path: &Path) -> Result<(), GeometryError>;
}

/// Writes STL through the mesh kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlExporter {
    pub format: StlFormat,
}

impl StlExporter {
    pub fn new(format: StlFormat) -> Self {
        Self { format }
    }
}

impl Exporter for StlExporter {
    fn export(&self, solid: Solid, path: &Path) -> Result<(), GeometryError> {
        let triangles = solid.triangle_count();
        write_stl_file(solid.mesh(), path, self.format).map_err(|source| GeometryError::Export {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), triangles, format = ?self.format, "exported solid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use plate_mesh::create_cuboid;

    #[test]
    fn test_stl_export_writes_file() {
        let path = std::env::temp_dir().join(format!("qr-plate-export-{}.stl", std::process::id()));
        let solid = Solid::new(create_cuboid(DVec3::ZERO, DVec3::ONE).unwrap());

        StlExporter::default().export(solid, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(bytes.len(), 84 + 12 * 50);
    }

    #[test]
    fn test_export_error_names_path() {
        let path = Path::new("/nonexistent-dir/plate.stl");
        let err = StlExporter::new(StlFormat::Ascii)
            .export(Solid::default(), path)
            .unwrap_err();

        assert!(matches!(err, GeometryError::Export { .. }));
        assert!(err.to_string().contains("/nonexistent-dir/plate.stl"));
    }
}
