//! # Primitives
//!
//! Mesh generation for the solids the plate is built from.

pub mod cuboid;
pub mod cylinder;

pub use cuboid::{create_cuboid, create_cuboid_centered};
pub use cylinder::create_cylinder;
