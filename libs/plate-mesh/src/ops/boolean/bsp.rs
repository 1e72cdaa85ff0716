//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Operations
//!
//! - `clip_to`: Remove polygons from this tree that are inside another tree
//! - `invert`: Flip all polygons and swap front/back subtrees
//! - `into_polygons`: Consume the tree and return its polygons
//!
//! ## Storage
//!
//! Nodes live in a flat arena and refer to their children by index. Every
//! traversal uses an explicit work stack, so deep trees built from large
//! pattern grids never recurse, and a node keeps its plane after
//! `clip_to` has removed all of its polygons.

use super::polygon::{Polygon, SplitTargets};
use super::plane::Plane;

/// A node in the BSP arena.
#[derive(Debug, Clone)]
struct BspNode {
    /// Splitting plane, taken from the first polygon inserted here
    plane: Plane,
    /// Polygons coplanar with `plane`
    polygons: Vec<Polygon>,
    /// Front subtree
    front: Option<usize>,
    /// Back subtree
    back: Option<usize>,
}

/// A BSP tree representing a solid.
///
/// An empty tree has no nodes; it represents empty space and clips nothing.
///
/// # Example
///
/// ```rust,ignore
/// let tree = BspTree::new(mesh_to_polygons(&mesh));
/// let outside = tree.clip_polygons(other_polygons);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// Creates a new BSP tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut tree = Self::default();
        tree.build(polygons);
        tree
    }

    /// Inserts polygons into the tree, creating nodes as needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }

        let root = if self.nodes.is_empty() {
            match self.push_node(&polygons) {
                Some(index) => index,
                None => return,
            }
        } else {
            0
        };

        let mut stack = vec![(root, polygons)];

        while let Some((index, polys)) = stack.pop() {
            let plane = self.nodes[index].plane;

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();

            {
                let mut targets = SplitTargets {
                    coplanar_front: &mut coplanar_front,
                    coplanar_back: &mut coplanar_back,
                    front: &mut front,
                    back: &mut back,
                };
                for poly in polys {
                    poly.split(&plane, &mut targets);
                }
            }

            let node = &mut self.nodes[index];
            node.polygons.append(&mut coplanar_front);
            node.polygons.append(&mut coplanar_back);

            if !front.is_empty() {
                let child = match self.nodes[index].front {
                    Some(child) => Some(child),
                    None => self.push_node(&front),
                };
                if let Some(child) = child {
                    self.nodes[index].front = Some(child);
                    stack.push((child, front));
                }
            }

            if !back.is_empty() {
                let child = match self.nodes[index].back {
                    Some(child) => Some(child),
                    None => self.push_node(&back),
                };
                if let Some(child) = child {
                    self.nodes[index].back = Some(child);
                    stack.push((child, back));
                }
            }
        }
    }

    /// Appends an empty node whose plane comes from the first polygon.
    fn push_node(&mut self, polygons: &[Polygon]) -> Option<usize> {
        let plane = *polygons.first()?.plane();
        self.nodes.push(BspNode {
            plane,
            polygons: Vec::new(),
            front: None,
            back: None,
        });
        Some(self.nodes.len() - 1)
    }

    /// Converts solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for poly in &mut node.polygons {
                poly.flip();
            }
            node.plane.flip();
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Removes the parts of `polygons` that are inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        if self.nodes.is_empty() {
            return polygons;
        }

        let mut result = Vec::new();
        let mut stack = vec![(0usize, polygons)];

        while let Some((index, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let node = &self.nodes[index];
            let mut front = Vec::new();
            let mut back = Vec::new();
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();

            {
                let mut targets = SplitTargets {
                    coplanar_front: &mut coplanar_front,
                    coplanar_back: &mut coplanar_back,
                    front: &mut front,
                    back: &mut back,
                };
                for poly in polys {
                    poly.split(&node.plane, &mut targets);
                }
            }
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);

            match node.front {
                Some(child) => stack.push((child, front)),
                None => result.append(&mut front),
            }

            // Without a back subtree the back side is solid
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }

        result
    }

    /// Removes the parts of this tree's polygons that are inside `other`.
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in &mut self.nodes {
            node.polygons = other.clip_polygons(std::mem::take(&mut node.polygons));
        }
    }

    /// Collects all polygons from the tree.
    #[cfg(test)]
    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|node| node.polygons.iter().cloned())
            .collect()
    }

    /// Consumes the tree and returns its polygons.
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.nodes
            .into_iter()
            .flat_map(|node| node.polygons)
            .collect()
    }

    /// Returns the number of polygons in this tree.
    #[cfg(test)]
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(|node| node.polygons.len()).sum()
    }

    /// Returns the depth of this tree.
    #[cfg(test)]
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack = vec![(0usize, 1usize)];

        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.front.map(|child| (child, depth + 1)));
            stack.extend(node.back.map(|child| (child, depth + 1)));
        }

        max_depth
    }
}
