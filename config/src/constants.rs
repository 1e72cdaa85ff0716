//! # Configuration Constants
//!
//! Centralized constants for the QR plate pipeline. Every fixed dimension of
//! the plate layout, the engraving font metrics, tessellation parameters and
//! the precision values used by the mesh kernel are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Boolean kernel tolerances and tool overlap
//! - **Layout**: Plate margins and hole placement (millimetres / modules)
//! - **Features**: Pillar and pocket footprints
//! - **Engraving**: Back-text glyph metrics
//! - **Resolution**: Tessellation of round cutters
//! - **Export**: STL output details

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Plane thickness used by the BSP boolean kernel to classify points.
///
/// Points closer than this to a splitting plane count as lying on it.
/// Plate coordinates are millimetres, so this is far below print
/// resolution while still absorbing accumulated rounding from splits.
///
/// # Example
///
/// ```rust
/// use config::constants::{BSP_EPSILON, TOOL_OVERLAP};
///
/// assert!(BSP_EPSILON < TOOL_OVERLAP);
/// ```
pub const BSP_EPSILON: f64 = 1e-5;

/// Distance below which two boolean output vertices are the same point.
///
/// Both sides of a split edge compute the intersection point separately, so
/// the copies can differ in the last bits. Welding merges them before the
/// mesh is stitched.
///
/// # Example
///
/// ```rust
/// use config::constants::{BSP_EPSILON, WELD_TOLERANCE};
///
/// assert!(WELD_TOLERANCE < BSP_EPSILON);
/// ```
pub const WELD_TOLERANCE: f64 = 1e-7;

/// Overlap applied to cutters and pillars so that no tool face is coplanar
/// with the surface it attaches to or cuts from.
///
/// A relief pillar starts this far below the plate top; an inlay pocket
/// cutter and a back-text cutter start this far outside the face they cut.
/// The overlap never changes the resulting volume.
///
/// # Example
///
/// ```rust
/// use config::constants::TOOL_OVERLAP;
///
/// let plate_top = 1.5;
/// let pillar_bottom = plate_top - TOOL_OVERLAP;
/// assert!(pillar_bottom < plate_top);
/// ```
pub const TOOL_OVERLAP: f64 = 0.01;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Margin around the module grid, in modules, added to the plate width.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_PADDING;
///
/// let qr_size = 21.0;
/// assert_eq!(qr_size + DEFAULT_PADDING, 27.0);
/// ```
pub const DEFAULT_PADDING: f64 = 6.0;

/// Clearance added to the hole diameter when reserving the hole strip at the
/// top of the plate (mm).
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_HOLE_MARGIN;
///
/// let radius = 2.5;
/// let extra_top = radius * 2.0 + DEFAULT_HOLE_MARGIN;
/// assert_eq!(extra_top, 10.0);
/// ```
pub const DEFAULT_HOLE_MARGIN: f64 = 5.0;

/// Distance between the top plate edge and the nearest point of the hole (mm).
///
/// The hole center sits `radius + HOLE_EDGE_INSET` below the top edge. The
/// hole margin must be at least this large, otherwise the hole would leave
/// its reserved strip.
pub const HOLE_EDGE_INSET: f64 = 2.5;

/// Default plate thickness (mm).
pub const DEFAULT_PLATE_THICKNESS: f64 = 3.0;

/// Default pillar height / pocket depth (mm).
pub const DEFAULT_FEATURE_HEIGHT: f64 = 1.0;

/// Default mounting hole radius (mm).
pub const DEFAULT_HOLE_RADIUS: f64 = 2.5;

// =============================================================================
// FEATURE CONSTANTS
// =============================================================================

/// Side length of a relief pillar footprint (one full module).
///
/// Neighbouring pillars touch and fuse into continuous dark regions.
pub const RELIEF_CELL_SIZE: f64 = 1.0;

/// Side length of an inlay pocket footprint.
///
/// Pockets are shrunk so neighbouring pockets keep a wall between them
/// instead of meeting along a zero-thickness edge.
///
/// # Example
///
/// ```rust
/// use config::constants::{INLAY_CELL_SIZE, RELIEF_CELL_SIZE};
///
/// let wall = RELIEF_CELL_SIZE - INLAY_CELL_SIZE;
/// assert!(wall > 0.0);
/// ```
pub const INLAY_CELL_SIZE: f64 = 0.95;

// =============================================================================
// HOLE CUTTER CONSTANTS
// =============================================================================

/// How far the hole cutter starts above the highest plate surface (mm).
pub const HOLE_CUTTER_CLEARANCE_TOP: f64 = 1.0;

/// Extra cutter length below the plate (mm).
///
/// The cutter length is `thickness + feature_height + HOLE_CUTTER_OVERRUN`,
/// measured down from its top.
pub const HOLE_CUTTER_OVERRUN: f64 = 10.0;

// =============================================================================
// ENGRAVING CONSTANTS
// =============================================================================

/// Height of an engraved glyph on the back face (mm).
pub const TEXT_HEIGHT: f64 = 5.0;

/// Depth of the back-text engraving (mm).
pub const ENGRAVE_DEPTH: f64 = 0.4;

/// Minimum distance between engraved text and the left/right plate edge (mm).
pub const TEXT_SIDE_MARGIN: f64 = 1.0;

/// Dot rows of a glyph in the built-in font.
pub const GLYPH_ROWS: usize = 7;

/// Dot columns of a glyph in the built-in font.
pub const GLYPH_COLUMNS: usize = 5;

/// Horizontal advance per character, in dots (glyph plus one blank column).
///
/// # Example
///
/// ```rust
/// use config::constants::{GLYPH_ADVANCE, GLYPH_COLUMNS};
///
/// assert_eq!(GLYPH_ADVANCE, GLYPH_COLUMNS + 1);
/// ```
pub const GLYPH_ADVANCE: usize = 6;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Number of segments used to tessellate the mounting hole cutter.
///
/// # Example
///
/// ```rust
/// use config::constants::{HOLE_SEGMENTS, MIN_SEGMENTS};
///
/// assert!(HOLE_SEGMENTS >= MIN_SEGMENTS);
/// ```
pub const HOLE_SEGMENTS: u32 = 48;

/// Minimum segment count accepted for any round primitive.
pub const MIN_SEGMENTS: u32 = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Largest module grid accepted by the builder.
///
/// QR version 40 is 177 modules wide; anything larger is not a QR symbol.
pub const MAX_MATRIX_SIZE: usize = 177;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Header text written at the start of binary STL files (padded to 80 bytes).
pub const STL_HEADER: &str = "qr-plate binary STL";

/// Solid name used in ASCII STL output.
pub const STL_SOLID_NAME: &str = "qr_plate";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Area of a regular polygon with `segments` sides inscribed in a circle.
///
/// Round cutters are tessellated, so the material they remove is this area
/// times their depth rather than `PI * r * r`.
///
/// # Example
///
/// ```rust
/// use config::constants::inscribed_polygon_area;
///
/// let square = inscribed_polygon_area(1.0, 4);
/// assert!((square - 2.0).abs() < 1e-12);
/// ```
pub fn inscribed_polygon_area(radius: f64, segments: u32) -> f64 {
    let n = segments as f64;
    0.5 * n * radius * radius * (2.0 * std::f64::consts::PI / n).sin()
}
