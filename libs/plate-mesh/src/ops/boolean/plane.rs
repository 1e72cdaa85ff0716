//! # Plane for BSP Operations
//!
//! Oriented plane with point classification.

use config::constants::BSP_EPSILON;
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Point is in front of plane (positive side).
    Front,
    /// Point is behind plane (negative side).
    Back,
    /// Point is on the plane.
    Coplanar,
    /// Polygon spans the plane (has vertices on both sides).
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by unit normal and distance from origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (unit length).
    pub normal: DVec3,
    /// Distance from origin along normal.
    pub w: f64,
}

impl Plane {
    /// Create plane from normal and distance.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Create plane from three counter-clockwise points.
    ///
    /// Returns `None` for a degenerate (collinear) triple.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        let length = normal.length();
        if !(length > BSP_EPSILON * BSP_EPSILON) {
            return None;
        }

        let normal = normal / length;
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Flip the plane (reverse normal).
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classify a point relative to this plane.
    #[inline]
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > BSP_EPSILON {
            Classification::Front
        } else if dist < -BSP_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        assert_eq!(plane.normal, DVec3::Z);
        assert_eq!(plane.w, 0.0);
    }

    #[test]
    fn test_plane_from_collinear_points() {
        assert!(Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).is_none());
    }

    #[test]
    fn test_plane_classify_point() {
        let plane = Plane::new(DVec3::Z, 1.5);

        assert_eq!(plane.classify_point(DVec3::new(0.0, 0.0, 2.0)), Classification::Front);
        assert_eq!(plane.classify_point(DVec3::new(0.0, 0.0, 1.0)), Classification::Back);
        assert_eq!(plane.classify_point(DVec3::new(9.0, -4.0, 1.5)), Classification::Coplanar);
    }

    #[test]
    fn test_plane_flip() {
        let mut plane = Plane::new(DVec3::Z, 5.0);
        plane.flip();
        assert_eq!(plane.normal, -DVec3::Z);
        assert_eq!(plane.w, -5.0);
        assert_eq!(plane.classify_point(DVec3::new(0.0, 0.0, 4.0)), Classification::Front);
    }
}
