//! # Config Crate
//!
//! Centralized configuration constants for the QR plate pipeline.
//! All magic numbers and tunable parameters are defined here so the layout
//! resolver, the geometry stages and the mesh kernel agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_PADDING, DEFAULT_HOLE_MARGIN};
//!
//! let qr_size = 21.0;
//! let base_width = qr_size + DEFAULT_PADDING;
//! let extra_top = 2.5 * 2.0 + DEFAULT_HOLE_MARGIN;
//! assert_eq!(base_width + extra_top, 37.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain `const` items and tiny helpers only
//! - **Documented**: Every constant states its unit and role

pub mod constants;
