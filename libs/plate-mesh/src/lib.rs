//! # Plate Mesh
//!
//! Triangle mesh kernel for the QR plate builder: primitives, boolean
//! operations and STL export.
//!
//! ## Architecture
//!
//! ```text
//! primitives (cuboid, cylinder) → ops::boolean (BSP CSG) → export (STL)
//! ```
//!
//! ## Algorithms
//!
//! Pure Rust, no native dependencies:
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Primitives**: Custom mesh generation
//! - **Metrics**: Divergence-theorem volume, bounding boxes
//!
//! ## Usage
//!
//! ```rust
//! use plate_mesh::{create_cuboid, union};
//! use glam::DVec3;
//!
//! let plate = create_cuboid(DVec3::new(-5.0, -5.0, -1.5), DVec3::new(5.0, 5.0, 1.5)).unwrap();
//! let pillar = create_cuboid(DVec3::new(0.0, 0.0, 1.49), DVec3::new(1.0, 1.0, 2.5)).unwrap();
//! let solid = union(&plate, &pillar).unwrap();
//! assert_eq!(solid.bounding_box().1.z, 2.5);
//! ```

pub mod error;
pub mod export;
pub mod mesh;
pub mod ops;
pub mod primitives;

pub use error::MeshError;
pub use export::{to_binary_stl, write_stl, write_stl_file, StlFormat};
pub use mesh::Mesh;
pub use ops::boolean::{difference, union, union_all};
pub use primitives::{create_cuboid, create_cuboid_centered, create_cylinder};
