//! # Layout Resolver
//!
//! Derives plate dimensions and feature offsets from the matrix size and
//! the layout parameters. This is the only stage that rejects inputs: once a
//! [`ResolvedLayout`] exists, every later stage is expected to succeed.
//!
//! ## Plate zones
//!
//! ```text
//!  +-----------------------+  y = baseHeight/2
//!  |         (o)           |  hole strip, height extraTop
//!  +-----------------------+
//!  |   +---------------+   |
//!  |   |    pattern    |   |  usable area, centered at patternCenterY
//!  |   +---------------+   |
//!  +-----------------------+  y = -baseHeight/2
//! ```

use config::constants::{
    ENGRAVE_DEPTH, GLYPH_ADVANCE, GLYPH_COLUMNS, GLYPH_ROWS, HOLE_EDGE_INSET, TEXT_HEIGHT,
    TEXT_SIDE_MARGIN,
};
use glam::DVec2;
use tracing::debug;

use crate::error::GeometryError;
use crate::params::{FeatureMode, LayoutParameters};

/// Where the mounting hole goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolePlacement {
    /// Axis position in plate coordinates
    pub center: DVec2,
    pub radius: f64,
}

/// Size and placement of the back-text engraving.
#[derive(Debug, Clone, PartialEq)]
pub struct EngravingLayout {
    /// Trimmed text to engrave
    pub text: String,
    /// Edge length of one glyph dot
    pub pitch: f64,
    /// Cut depth into the bottom face
    pub depth: f64,
}

impl EngravingLayout {
    /// Width of the text line in dot columns, without trailing spacing.
    pub fn dot_columns(&self) -> usize {
        dot_columns(self.text.chars().count())
    }

    /// Width of the text line on the plate.
    pub fn width(&self) -> f64 {
        self.dot_columns() as f64 * self.pitch
    }

    /// Height of the text line on the plate.
    pub fn height(&self) -> f64 {
        GLYPH_ROWS as f64 * self.pitch
    }
}

/// Plate geometry derived from the matrix size and [`LayoutParameters`].
///
/// The plate is centered on the origin with its top face at
/// `plate_thickness / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayout {
    /// Side length N of the module matrix
    pub matrix_size: usize,
    /// Plate extent along X: `N + padding`
    pub base_width: f64,
    /// Plate extent along Y: `base_width + extra_top`
    pub base_height: f64,
    /// Height of the strip reserved for the hole, zero without a hole
    pub extra_top: f64,
    /// Vertical center of the pattern area
    pub pattern_center_y: f64,
    pub plate_thickness: f64,
    pub feature_height: f64,
    pub feature_mode: FeatureMode,
    pub hole: Option<HolePlacement>,
    pub engraving: Option<EngravingLayout>,
}

impl ResolvedLayout {
    /// Z of the plate's top face.
    pub fn plate_top(&self) -> f64 {
        self.plate_thickness / 2.0
    }

    /// Z of the plate's bottom face.
    pub fn plate_bottom(&self) -> f64 {
        -self.plate_thickness / 2.0
    }

    /// Z of the highest surface, including relief pillars.
    pub fn top_surface(&self) -> f64 {
        match self.feature_mode {
            FeatureMode::Relief => self.plate_top() + self.feature_height,
            FeatureMode::Inlay => self.plate_top(),
        }
    }

    /// Vertical extent `(bottom, top)` of the pattern area.
    pub fn pattern_y_range(&self) -> (f64, f64) {
        let half = self.matrix_size as f64 / 2.0;
        (self.pattern_center_y - half, self.pattern_center_y + half)
    }

    /// Lower edge of the strip reserved for the hole.
    pub fn hole_strip_bottom(&self) -> f64 {
        self.base_height / 2.0 - self.extra_top
    }
}

/// Resolves the plate layout for an `n`×`n` matrix.
///
/// # Errors
///
/// - [`GeometryError::InvalidMatrix`] if `n` is zero
/// - [`GeometryError::InvalidParameter`] for out-of-range parameters
/// - [`GeometryError::LayoutConflict`] if the hole, the pockets or the
///   engraving do not fit the plate
///
/// # Example
///
/// ```rust
/// use qr_plate::{layout, LayoutParameters};
///
/// let params = LayoutParameters { hole_enabled: true, ..Default::default() };
/// let resolved = layout::resolve(21, &params).unwrap();
/// assert_eq!(resolved.base_width, 27.0);
/// assert_eq!(resolved.base_height, 37.0);
/// assert_eq!(resolved.hole.unwrap().center.y, 13.5);
/// ```
pub fn resolve(n: usize, params: &LayoutParameters) -> Result<ResolvedLayout, GeometryError> {
    if n == 0 {
        return Err(GeometryError::invalid_matrix("matrix size must be at least 1"));
    }
    params.validate()?;

    if params.feature_mode == FeatureMode::Inlay && params.feature_height >= params.plate_thickness {
        return Err(GeometryError::layout_conflict(
            "feature_height",
            params.feature_height,
            format!(
                "inlay pockets must be shallower than the plate thickness {}",
                params.plate_thickness
            ),
        ));
    }

    let base_width = n as f64 + params.padding;

    let (extra_top, hole_radius) = if params.hole_enabled {
        let extra_top = params.hole_radius * 2.0 + params.hole_margin;
        if extra_top >= base_width {
            return Err(GeometryError::layout_conflict(
                "hole_radius",
                params.hole_radius,
                format!(
                    "hole diameter plus margin ({extra_top}) must be less than the plate width {base_width}"
                ),
            ));
        }
        if params.hole_margin < HOLE_EDGE_INSET {
            return Err(GeometryError::layout_conflict(
                "hole_margin",
                params.hole_margin,
                format!("hole margin must be at least the edge inset {HOLE_EDGE_INSET}"),
            ));
        }
        (extra_top, Some(params.hole_radius))
    } else {
        (0.0, None)
    };

    let base_height = base_width + extra_top;
    let pattern_center_y = -extra_top / 2.0;

    let hole = hole_radius.map(|radius| HolePlacement {
        center: DVec2::new(0.0, base_height / 2.0 - (radius + HOLE_EDGE_INSET)),
        radius,
    });

    let engraving = match params.engraving_text() {
        Some(text) => Some(resolve_engraving(text, base_width, base_height, params)?),
        None => None,
    };

    let layout = ResolvedLayout {
        matrix_size: n,
        base_width,
        base_height,
        extra_top,
        pattern_center_y,
        plate_thickness: params.plate_thickness,
        feature_height: params.feature_height,
        feature_mode: params.feature_mode,
        hole,
        engraving,
    };

    debug!(
        n,
        base_width,
        base_height,
        extra_top,
        pattern_center_y,
        hole_center_y = layout.hole.map(|h| h.center.y),
        "resolved layout"
    );

    Ok(layout)
}

fn resolve_engraving(
    text: &str,
    base_width: f64,
    base_height: f64,
    params: &LayoutParameters,
) -> Result<EngravingLayout, GeometryError> {
    let remaining = match params.feature_mode {
        FeatureMode::Relief => params.plate_thickness,
        FeatureMode::Inlay => params.plate_thickness - params.feature_height,
    };
    if ENGRAVE_DEPTH >= remaining {
        return Err(GeometryError::layout_conflict(
            "back_text",
            ENGRAVE_DEPTH,
            format!("engraving depth leaves no material under the top surface ({remaining} available)"),
        ));
    }

    let columns = dot_columns(text.chars().count()) as f64;
    let available_width = base_width - 2.0 * TEXT_SIDE_MARGIN;
    let available_height = base_height - 2.0 * TEXT_SIDE_MARGIN;
    if available_width <= 0.0 || available_height <= 0.0 {
        return Err(GeometryError::layout_conflict(
            "back_text",
            base_width,
            "plate is too small to hold any engraved text",
        ));
    }

    let pitch = (TEXT_HEIGHT / GLYPH_ROWS as f64)
        .min(available_width / columns)
        .min(available_height / GLYPH_ROWS as f64);

    Ok(EngravingLayout {
        text: text.to_owned(),
        pitch,
        depth: ENGRAVE_DEPTH,
    })
}

/// Dot columns spanned by `chars` glyphs set side by side.
fn dot_columns(chars: usize) -> usize {
    match chars {
        0 => 0,
        n => (n - 1) * GLYPH_ADVANCE + GLYPH_COLUMNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn with_hole() -> LayoutParameters {
        LayoutParameters {
            hole_enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_without_hole() {
        let layout = resolve(21, &LayoutParameters::default()).unwrap();
        assert_eq!(layout.base_width, 27.0);
        assert_eq!(layout.base_height, 27.0);
        assert_eq!(layout.extra_top, 0.0);
        assert_eq!(layout.pattern_center_y, 0.0);
        assert!(layout.hole.is_none());
        assert!(layout.engraving.is_none());
        assert_eq!(layout.top_surface(), 2.5);
    }

    #[test]
    fn test_resolve_with_hole() {
        let layout = resolve(21, &with_hole()).unwrap();
        assert_eq!(layout.extra_top, 10.0);
        assert_eq!(layout.base_height, 37.0);
        assert_eq!(layout.pattern_center_y, -5.0);

        let hole = layout.hole.unwrap();
        assert_eq!(hole.center, DVec2::new(0.0, 13.5));
        assert_eq!(hole.radius, 2.5);
    }

    #[test]
    fn test_hole_stays_in_its_strip() {
        let layout = resolve(21, &with_hole()).unwrap();
        let hole = layout.hole.unwrap();
        let (_, pattern_top) = layout.pattern_y_range();

        assert!(hole.center.y + hole.radius < layout.base_height / 2.0);
        assert!(hole.center.y - hole.radius >= layout.hole_strip_bottom());
        assert!(layout.hole_strip_bottom() >= pattern_top);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = resolve(0, &LayoutParameters::default()).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidMatrix { .. }));
    }

    #[test]
    fn test_inlay_too_deep() {
        let params = LayoutParameters {
            feature_mode: FeatureMode::Inlay,
            feature_height: 3.0,
            ..Default::default()
        };
        let err = resolve(21, &params).unwrap_err();
        assert!(matches!(err, GeometryError::LayoutConflict { parameter: "feature_height", .. }));
    }

    #[test]
    fn test_relief_taller_than_plate_allowed() {
        let params = LayoutParameters {
            feature_height: 5.0,
            ..Default::default()
        };
        assert_eq!(resolve(21, &params).unwrap().top_surface(), 6.5);
    }

    #[test]
    fn test_hole_too_large() {
        let params = LayoutParameters {
            hole_radius: 11.0,
            ..with_hole()
        };
        let err = resolve(21, &params).unwrap_err();
        assert!(matches!(err, GeometryError::LayoutConflict { parameter: "hole_radius", .. }));
    }

    #[test]
    fn test_hole_margin_below_inset() {
        let params = LayoutParameters {
            hole_margin: 1.0,
            ..with_hole()
        };
        let err = resolve(21, &params).unwrap_err();
        assert!(matches!(err, GeometryError::LayoutConflict { parameter: "hole_margin", .. }));
    }

    #[test]
    fn test_engraving_default_pitch() {
        let params = LayoutParameters {
            back_text: Some("HI".into()),
            ..Default::default()
        };
        let engraving = resolve(21, &params).unwrap().engraving.unwrap();

        assert_eq!(engraving.dot_columns(), 11);
        assert_relative_eq!(engraving.pitch, 5.0 / 7.0);
        assert_relative_eq!(engraving.height(), 5.0);
        assert_eq!(engraving.depth, 0.4);
    }

    #[test]
    fn test_engraving_shrinks_to_fit() {
        let params = LayoutParameters {
            back_text: Some("A LONG LINE OF TEXT".into()),
            ..Default::default()
        };
        let layout = resolve(21, &params).unwrap();
        let engraving = layout.engraving.unwrap();

        assert!(engraving.pitch < 5.0 / 7.0);
        assert_relative_eq!(engraving.width(), layout.base_width - 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_engraving_depth_conflict() {
        let params = LayoutParameters {
            feature_mode: FeatureMode::Inlay,
            plate_thickness: 1.2,
            feature_height: 1.0,
            back_text: Some("X".into()),
            ..Default::default()
        };
        let err = resolve(21, &params).unwrap_err();
        assert!(matches!(err, GeometryError::LayoutConflict { parameter: "back_text", .. }));

        // The same plate without text is fine
        let params = LayoutParameters {
            back_text: Some("  ".into()),
            ..params
        };
        assert!(resolve(21, &params).is_ok());
    }
}
