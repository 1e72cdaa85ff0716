//! # Stitching
//!
//! Converts BSP output polygons into a closed indexed mesh.
//!
//! Splitting a polygon adds a vertex to the split edge of that polygon only.
//! The polygon on the other side of the edge keeps the long edge, leaving a
//! T-junction: the surface looks closed but its edges do not pair up.
//!
//! ## Steps
//!
//! 1. Weld vertices closer than `WELD_TOLERANCE` (spatial hash)
//! 2. Insert every vertex that lies inside an unmatched edge into that edge
//! 3. Triangulate each polygon without zero-area triangles

use std::collections::HashMap;

use config::constants::{BSP_EPSILON, WELD_TOLERANCE};
use glam::DVec3;

use super::polygon::Polygon;
use crate::Mesh;

/// A single pass fixes every junction on a boolean seam; later passes pick
/// up vertices that were themselves on an unmatched edge.
const MAX_REPAIR_PASSES: usize = 4;

/// Twice the area below which a fan triangle counts as collapsed.
const COLLAPSED_CROSS_SQ: f64 = BSP_EPSILON * BSP_EPSILON;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Welds, stitches and triangulates convex polygons.
pub fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let mut welder = VertexWelder::default();
    let mut rings: Vec<Vec<u32>> = polygons
        .iter()
        .filter_map(|poly| {
            let ids = poly.vertices().iter().map(|&v| welder.add(v)).collect();
            collapse_repeats(ids)
        })
        .collect();

    let positions = welder.positions;
    for _ in 0..MAX_REPAIR_PASSES {
        if insert_junction_vertices(&positions, &mut rings) == 0 {
            break;
        }
    }

    let triangle_estimate = rings.iter().map(|ring| ring.len()).sum();
    let mut mesh = Mesh::with_capacity(positions.len(), triangle_estimate);
    for &p in &positions {
        mesh.add_vertex(p);
    }
    for ring in &rings {
        triangulate(&mut mesh, ring);
    }

    mesh
}

// =============================================================================
// VERTEX WELDING
// =============================================================================

/// Spatial hash over `WELD_TOLERANCE` cells.
///
/// A point is compared with the 27 cells around its own, so two copies of a
/// vertex straddling a cell boundary still weld.
#[derive(Default)]
struct VertexWelder {
    cells: HashMap<[i64; 3], Vec<u32>>,
    positions: Vec<DVec3>,
}

impl VertexWelder {
    fn cell(p: DVec3) -> [i64; 3] {
        let q = (p / WELD_TOLERANCE).floor();
        [q.x as i64, q.y as i64, q.z as i64]
    }

    fn add(&mut self, p: DVec3) -> u32 {
        let [x, y, z] = Self::cell(p);
        let tolerance_sq = WELD_TOLERANCE * WELD_TOLERANCE;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = self.cells.get(&[x + dx, y + dy, z + dz]) else {
                        continue;
                    };
                    if let Some(&id) = ids
                        .iter()
                        .find(|&&id| self.positions[id as usize].distance_squared(p) <= tolerance_sq)
                    {
                        return id;
                    }
                }
            }
        }

        let id = self.positions.len() as u32;
        self.positions.push(p);
        self.cells.entry([x, y, z]).or_default().push(id);
        id
    }
}

/// Drops repeated neighbours left by welding; `None` once fewer than three remain.
fn collapse_repeats(mut ids: Vec<u32>) -> Option<Vec<u32>> {
    ids.dedup();
    while ids.len() > 1 && ids.first() == ids.last() {
        ids.pop();
    }
    (ids.len() >= 3).then_some(ids)
}

// =============================================================================
// T-JUNCTION REPAIR
// =============================================================================

/// Directed edge of a ring with no reverse twin anywhere in the mesh.
struct OpenEdge {
    ring: usize,
    /// Edge runs from `ring[slot]` to the next vertex
    slot: usize,
    from: u32,
    to: u32,
}

fn ring_edges(ring: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    ring.iter().copied().zip(ring.iter().copied().cycle().skip(1))
}

fn open_edges(rings: &[Vec<u32>]) -> Vec<OpenEdge> {
    let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
    for ring in rings {
        for edge in ring_edges(ring) {
            *directed.entry(edge).or_default() += 1;
        }
    }

    let directed = &directed;
    rings
        .iter()
        .enumerate()
        .flat_map(|(r, ring)| {
            ring_edges(ring)
                .enumerate()
                .filter(move |&(_, (a, b))| !directed.contains_key(&(b, a)))
                .map(move |(slot, (from, to))| OpenEdge { ring: r, slot, from, to })
        })
        .collect()
}

/// Endpoints of open edges, sorted by x for range queries.
struct Candidates {
    ids: Vec<u32>,
}

impl Candidates {
    fn new(positions: &[DVec3], open: &[OpenEdge]) -> Self {
        let mut ids: Vec<u32> = open.iter().flat_map(|e| [e.from, e.to]).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.sort_by(|&a, &b| positions[a as usize].x.total_cmp(&positions[b as usize].x));
        Self { ids }
    }

    /// Vertices strictly inside segment `from → to`, ordered from `from`.
    fn inside(&self, positions: &[DVec3], from: u32, to: u32) -> Vec<u32> {
        let (pa, pb) = (positions[from as usize], positions[to as usize]);
        let d = pb - pa;
        let len_sq = d.length_squared();
        if len_sq <= WELD_TOLERANCE * WELD_TOLERANCE {
            return Vec::new();
        }

        let lo = pa.min(pb) - DVec3::splat(BSP_EPSILON);
        let hi = pa.max(pb) + DVec3::splat(BSP_EPSILON);
        let start = self.ids.partition_point(|&id| positions[id as usize].x < lo.x);

        let mut hits: Vec<(f64, u32)> = self.ids[start..]
            .iter()
            .copied()
            .take_while(|&id| positions[id as usize].x <= hi.x)
            .filter(|&id| id != from && id != to)
            .filter_map(|id| {
                let p = positions[id as usize];
                if p.cmplt(lo).any() || p.cmpgt(hi).any() {
                    return None;
                }
                let t = (p - pa).dot(d) / len_sq;
                if t <= 0.0 || t >= 1.0 {
                    return None;
                }
                let off_line = (p - (pa + d * t)).length_squared();
                (off_line <= BSP_EPSILON * BSP_EPSILON).then_some((t, id))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, id)| id).collect()
    }
}

/// Splices junction vertices into the open edges that pass through them.
///
/// Returns the number of vertices inserted.
fn insert_junction_vertices(positions: &[DVec3], rings: &mut [Vec<u32>]) -> usize {
    let open = open_edges(rings);
    if open.is_empty() {
        return 0;
    }

    let candidates = Candidates::new(positions, &open);
    let mut insertions: Vec<(usize, usize, Vec<u32>)> = open
        .iter()
        .filter_map(|edge| {
            let inner = candidates.inside(positions, edge.from, edge.to);
            (!inner.is_empty()).then_some((edge.ring, edge.slot, inner))
        })
        .collect();

    // Highest slot first so earlier slots keep their positions
    insertions.sort_unstable_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

    let mut inserted = 0;
    for (ring, slot, inner) in insertions {
        inserted += inner.len();
        let at = slot + 1;
        rings[ring].splice(at..at, inner);
    }
    inserted
}

// =============================================================================
// TRIANGULATION
// =============================================================================

/// First vertex whose fan has no collapsed triangle.
///
/// Inserted junction vertices are collinear with their neighbours, so a fan
/// from a vertex on the same side of the polygon would produce a zero-area
/// triangle.
fn fan_apex(points: &[DVec3]) -> Option<usize> {
    let n = points.len();
    (0..n).find(|&apex| {
        (1..n - 1).all(|k| {
            let b = points[(apex + k) % n] - points[apex];
            let c = points[(apex + k + 1) % n] - points[apex];
            b.cross(c).length_squared() > COLLAPSED_CROSS_SQ
        })
    })
}

fn triangulate(mesh: &mut Mesh, ring: &[u32]) {
    if let &[a, b, c] = ring {
        mesh.add_triangle(a, b, c);
        return;
    }

    let points: Vec<DVec3> = ring.iter().map(|&id| mesh.vertices()[id as usize]).collect();
    let n = ring.len();

    match fan_apex(&points) {
        Some(apex) => {
            for k in 1..n - 1 {
                mesh.add_triangle(ring[apex], ring[(apex + k) % n], ring[(apex + k + 1) % n]);
            }
        }
        None => {
            // Every side carries junction vertices; fan from an interior point
            let centroid = points.iter().fold(DVec3::ZERO, |sum, &p| sum + p) / n as f64;
            let center = mesh.add_vertex(centroid);
            for (a, b) in ring_edges(ring) {
                mesh.add_triangle(center, a, b);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(corners: [[f64; 3]; 4]) -> Polygon {
        Polygon::from_vertices(corners.iter().map(|&c| DVec3::from_array(c)).collect()).unwrap()
    }

    #[test]
    fn test_welder_merges_near_copies() {
        let mut welder = VertexWelder::default();
        let a = welder.add(DVec3::new(1.0, 2.0, 3.0));
        let b = welder.add(DVec3::new(1.0 + 1e-12, 2.0, 3.0 - 1e-12));
        let c = welder.add(DVec3::new(1.0 + 1e-3, 2.0, 3.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(welder.positions.len(), 2);
    }

    #[test]
    fn test_collapse_repeats() {
        assert_eq!(collapse_repeats(vec![0, 1, 1, 2, 0]), Some(vec![0, 1, 2]));
        assert_eq!(collapse_repeats(vec![4, 4, 5, 4]), None);
    }

    #[test]
    fn test_t_junction_is_split() {
        // One long face on the left against two short faces on the right,
        // sharing the segment x = 1 from y = 0 to y = 2.
        let long = quad([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 2.0, 0.0], [0.0, 2.0, 0.0]]);
        let lower = quad([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
        let upper = quad([[1.0, 1.0, 0.0], [2.0, 1.0, 0.0], [2.0, 2.0, 0.0], [1.0, 2.0, 0.0]]);

        let mesh = polygons_to_mesh(&[long, lower, upper]);

        // The junction at (1, 1) now appears on the long face's edge: every
        // interior edge has its twin and only the seven outer edges stay open.
        let mid = mesh
            .vertices()
            .iter()
            .position(|&v| v == DVec3::new(1.0, 1.0, 0.0))
            .unwrap() as u32;
        let uses = mesh.triangles().iter().filter(|t| t.contains(&mid)).count();
        assert!(uses >= 3);
        assert_eq!(mesh.open_edge_count(), 7);
    }

    #[test]
    fn test_fan_avoids_collinear_apex() {
        // Triangle with two extra vertices on its bottom side
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(1.5, 2.0, 0.0),
        ];
        assert_eq!(fan_apex(&points), Some(4));
    }

    #[test]
    fn test_centroid_fan_when_every_side_is_split() {
        // 3x3 square, two junction vertices on every side
        let ring: Vec<DVec3> = [
            [2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [3.0, 2.0],
            [3.0, 3.0], [2.0, 3.0], [1.0, 3.0], [0.0, 3.0],
            [0.0, 2.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0],
        ]
        .iter()
        .map(|&[x, y]| DVec3::new(x, y, 0.0))
        .collect();
        assert_eq!(fan_apex(&ring), None);

        let mesh = polygons_to_mesh(&[Polygon::from_vertices(ring).unwrap()]);
        assert_eq!(mesh.vertex_count(), 13);
        assert_eq!(mesh.triangle_count(), 12);
        assert!((mesh.surface_area() - 9.0).abs() < 1e-12);
        assert!((0..mesh.triangle_count()).all(|i| mesh.face_normal(i) == DVec3::Z));
    }
}
