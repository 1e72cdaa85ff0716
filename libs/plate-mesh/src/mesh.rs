//! # Mesh Data Structure
//!
//! Indexed triangle mesh used for every solid in the pipeline.

use std::collections::HashMap;

use glam::DVec3;

/// A triangle mesh with vertices and indices.
///
/// Triangles are wound counter-clockwise when seen from outside the solid,
/// so face normals point outward and [`Mesh::volume`] is positive for a
/// closed surface.
///
/// # Example
///
/// ```rust
/// use plate_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the three corner positions of a triangle.
    #[inline]
    pub fn triangle_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Iterates over the corner positions of every triangle.
    pub fn triangle_iter(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        (0..self.triangles.len()).map(move |i| self.triangle_positions(i))
    }

    /// Unit normal of a triangle, or zero for a degenerate one.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [v0, v1, v2] = self.triangle_positions(index);
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box, or two zero vectors
    /// for an empty mesh. Only vertices referenced by triangles count.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut corners = self.triangles.iter().flatten().map(|&i| self.vertices[i as usize]);

        let Some(first) = corners.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        corners.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Each triangle contributes the signed volume of the tetrahedron it
    /// forms with the origin. Coincident faces of opposite orientation
    /// cancel, so the result is exact for any closed, outward-wound surface.
    pub fn volume(&self) -> f64 {
        self.triangle_iter()
            .map(|[a, b, c]| a.dot(b.cross(c)))
            .sum::<f64>()
            / 6.0
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.triangle_iter()
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum()
    }

    /// Appends another mesh without any boolean processing.
    ///
    /// The result is only a valid solid when the two meshes do not touch.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
    }

    /// Returns true if every vertex coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(|v| v.is_finite())
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats a vertex index
    /// - All coordinates are finite
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        self.is_finite()
            && self.triangles.iter().all(|tri| {
                tri.iter().all(|&i| i < vertex_count)
                    && tri[0] != tri[1]
                    && tri[1] != tri[2]
                    && tri[0] != tri[2]
            })
    }

    /// Number of directed edges whose reverse is not used by another triangle.
    ///
    /// Each edge `(a, b)` of one triangle must be matched by `(b, a)` in a
    /// neighbour. Edges are matched one to one, so a split edge on one side
    /// facing a single long edge on the other counts as open.
    pub fn open_edge_count(&self) -> usize {
        let mut balance: HashMap<(u32, u32), isize> = HashMap::new();
        for &[a, b, c] in &self.triangles {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                let (key, step) = if from < to { ((from, to), 1) } else { ((to, from), -1) };
                *balance.entry(key).or_default() += step;
            }
        }
        balance.values().map(|n| n.unsigned_abs()).sum()
    }

    /// True when every edge is shared by exactly one oppositely wound
    /// neighbour, i.e. the surface is watertight.
    pub fn is_closed(&self) -> bool {
        self.open_edge_count() == 0
    }
}
