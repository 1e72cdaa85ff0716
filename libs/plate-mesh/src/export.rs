//! # STL Export
//!
//! Serializes a [`Mesh`] as binary or ASCII STL.
//!
//! Binary STL layout:
//! - 80 bytes: header
//! - 4 bytes: u32 LE triangle count
//! - Per triangle (50 bytes each):
//!   - 12 bytes: normal vector (3 × f32 LE)
//!   - 36 bytes: 3 vertices (3 × 3 × f32 LE)
//!   - 2 bytes: attribute byte count (0u16)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use config::constants::{STL_HEADER, STL_SOLID_NAME};
use glam::DVec3;
use tracing::debug;

use crate::error::MeshError;
use crate::Mesh;

/// Size of the binary STL header in bytes.
const HEADER_LEN: usize = 80;

/// Encoding of an STL file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StlFormat {
    /// Little-endian binary STL
    #[default]
    Binary,
    /// Human-readable `solid ... endsolid` text
    Ascii,
}

/// Writes `mesh` to `writer` in the given format.
pub fn write_stl<W: Write>(mesh: &Mesh, writer: &mut W, format: StlFormat) -> Result<(), MeshError> {
    match format {
        StlFormat::Binary => write_binary(mesh, writer),
        StlFormat::Ascii => write_ascii(mesh, writer),
    }
}

/// Writes `mesh` to a file at `path`, replacing any existing file.
pub fn write_stl_file(mesh: &Mesh, path: &Path, format: StlFormat) -> Result<(), MeshError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_stl(mesh, &mut writer, format)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        ?format,
        "wrote STL"
    );
    Ok(())
}

/// Encodes `mesh` as binary STL bytes.
pub fn to_binary_stl(mesh: &Mesh) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + mesh.triangle_count() * 50);
    // Writing into a Vec cannot fail
    let _ = write_binary(mesh, &mut buf);
    buf
}

fn write_binary<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<(), MeshError> {
    let mut header = [0u8; HEADER_LEN];
    let text = STL_HEADER.as_bytes();
    let len = text.len().min(HEADER_LEN);
    header[..len].copy_from_slice(&text[..len]);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.triangle_count())
        .map_err(|_| MeshError::degenerate("too many triangles for binary STL"))?;
    writer.write_all(&count.to_le_bytes())?;

    for i in 0..mesh.triangle_count() {
        write_vec3_f32(writer, mesh.face_normal(i))?;
        for corner in mesh.triangle_positions(i) {
            write_vec3_f32(writer, corner)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn write_vec3_f32<W: Write>(writer: &mut W, v: DVec3) -> Result<(), MeshError> {
    for c in v.as_vec3().to_array() {
        writer.write_all(&c.to_le_bytes())?;
    }
    Ok(())
}

fn write_ascii<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<(), MeshError> {
    writeln!(writer, "solid {STL_SOLID_NAME}")?;

    for i in 0..mesh.triangle_count() {
        let n = mesh.face_normal(i);
        writeln!(writer, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in mesh.triangle_positions(i) {
            writeln!(writer, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {STL_SOLID_NAME}")?;
    Ok(())
}
