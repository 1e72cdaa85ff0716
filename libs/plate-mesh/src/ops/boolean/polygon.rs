//! # Polygon for BSP Operations
//!
//! Convex polygon with plane and splitting support.

use super::plane::{Classification, Plane};
use glam::DVec3;

// =============================================================================
// SPLIT OUTPUT
// =============================================================================

/// Destination lists for [`Polygon::split`].
///
/// When building a tree both coplanar lists are the node's own polygon list;
/// when clipping they are the front and back lists.
pub struct SplitTargets<'a> {
    pub coplanar_front: &'a mut Vec<Polygon>,
    pub coplanar_back: &'a mut Vec<Polygon>,
    pub front: &'a mut Vec<Polygon>,
    pub back: &'a mut Vec<Polygon>,
}

// =============================================================================
// POLYGON
// =============================================================================

/// A convex polygon with associated plane.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices in counter-clockwise order.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
}

impl Polygon {
    /// Create polygon from vertices.
    ///
    /// Returns `None` if the first three vertices are collinear.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    /// Get polygon vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Get polygon plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Flip the polygon (reverse winding order and plane).
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Classify this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = false;
        let mut back = false;

        for &v in &self.vertices {
            match plane.classify_point(v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }

        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Split polygon by a plane into the given targets.
    ///
    /// Pieces of a spanning polygon keep the parent's plane, so slivers
    /// produced near a vertex never get a recomputed, unstable normal.
    pub fn split(self, plane: &Plane, targets: &mut SplitTargets<'_>) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal.dot(plane.normal) > 0.0 {
                    targets.coplanar_front.push(self);
                } else {
                    targets.coplanar_back.push(self);
                }
            }
            Classification::Front => targets.front.push(self),
            Classification::Back => targets.back.push(self),
            Classification::Spanning => {
                let count = self.vertices.len();
                let mut front_verts = Vec::with_capacity(count + 1);
                let mut back_verts = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % count];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let intersection = vi.lerp(vj, di / (di - dj));
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                if front_verts.len() >= 3 {
                    targets.front.push(Polygon {
                        vertices: front_verts,
                        plane: self.plane,
                    });
                }
                if back_verts.len() >= 3 {
                    targets.back.push(Polygon {
                        vertices: back_verts,
                        plane: self.plane,
                    });
                }
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

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.5, 1.0, z),
        ])
        .unwrap()
    }

    fn split_into(poly: Polygon, plane: &Plane) -> [Vec<Polygon>; 4] {
        let mut out: [Vec<Polygon>; 4] = Default::default();
        let [cf, cb, f, b] = &mut out;
        poly.split(
            plane,
            &mut SplitTargets {
                coplanar_front: cf,
                coplanar_back: cb,
                front: f,
                back: b,
            },
        );
        out
    }

    #[test]
    fn test_polygon_from_vertices() {
        let poly = triangle_at(0.0);
        assert_eq!(poly.vertices().len(), 3);
        assert_eq!(poly.plane().normal, DVec3::Z);
    }

    #[test]
    fn test_polygon_flip() {
        let mut poly = triangle_at(0.0);
        let first = poly.vertices()[0];
        poly.flip();
        assert_eq!(poly.vertices()[2], first);
        assert_eq!(poly.plane().normal, -DVec3::Z);
    }

    #[test]
    fn test_polygon_classify() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(triangle_at(1.0).classify(&plane), Classification::Front);
        assert_eq!(triangle_at(-1.0).classify(&plane), Classification::Back);
        assert_eq!(triangle_at(0.0).classify(&plane), Classification::Coplanar);
    }

    #[test]
    fn test_polygon_split_coplanar_orientation() {
        let plane = Plane::new(DVec3::Z, 0.0);
        let [cf, cb, _, _] = split_into(triangle_at(0.0), &plane);
        assert_eq!((cf.len(), cb.len()), (1, 0));

        let mut flipped = triangle_at(0.0);
        flipped.flip();
        let [cf, cb, _, _] = split_into(flipped, &plane);
        assert_eq!((cf.len(), cb.len()), (0, 1));
    }

    #[test]
    fn test_polygon_split_spanning() {
        let poly = Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(0.5, 0.0, 1.0),
        ])
        .unwrap();
        let normal = poly.plane().normal;

        let [_, _, f, b] = split_into(poly, &Plane::new(DVec3::Z, 0.0));

        assert_eq!(f.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(f[0].plane().normal, normal);
        assert!(f[0].vertices().iter().all(|v| v.z >= 0.0));
        assert!(b[0].vertices().iter().all(|v| v.z <= 0.0));
    }
}
