//! # Layout Parameters
//!
//! User-facing knobs for a plate build. Every field has a default, so a
//! partial TOML table deserializes into a complete parameter set.

use std::fmt;
use std::str::FromStr;

use config::constants::{
    DEFAULT_FEATURE_HEIGHT, DEFAULT_HOLE_MARGIN, DEFAULT_HOLE_RADIUS, DEFAULT_PADDING,
    DEFAULT_PLATE_THICKNESS,
};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// How set modules are rendered on the top face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureMode {
    /// Raised pillars added on top of the plate
    #[default]
    Relief,
    /// Pockets cut down into the plate
    Inlay,
}

impl fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relief => f.write_str("relief"),
            Self::Inlay => f.write_str("inlay"),
        }
    }
}

impl FromStr for FeatureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relief" => Ok(Self::Relief),
            "inlay" => Ok(Self::Inlay),
            other => Err(format!("unknown feature mode '{other}', expected relief or inlay")),
        }
    }
}

/// Parameters for one plate build. Lengths are millimetres, one module is
/// one millimetre.
///
/// # Example
///
/// ```rust
/// use qr_plate::{FeatureMode, LayoutParameters};
///
/// let params: LayoutParameters = toml::from_str("feature_mode = \"inlay\"").unwrap();
/// assert_eq!(params.feature_mode, FeatureMode::Inlay);
/// assert_eq!(params.plate_thickness, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    /// Margin around the matrix, in modules, split evenly on both sides
    pub padding: f64,
    /// Plate thickness
    pub plate_thickness: f64,
    /// Pillar height or pocket depth
    pub feature_height: f64,
    pub feature_mode: FeatureMode,
    /// Reserve a strip above the pattern and drill a mounting hole in it
    pub hole_enabled: bool,
    pub hole_radius: f64,
    /// Clearance added to the hole diameter when sizing the hole strip
    pub hole_margin: f64,
    /// Text engraved on the bottom face
    pub back_text: Option<String>,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            plate_thickness: DEFAULT_PLATE_THICKNESS,
            feature_height: DEFAULT_FEATURE_HEIGHT,
            feature_mode: FeatureMode::default(),
            hole_enabled: false,
            hole_radius: DEFAULT_HOLE_RADIUS,
            hole_margin: DEFAULT_HOLE_MARGIN,
            back_text: None,
        }
    }
}

impl LayoutParameters {
    /// Back text with surrounding whitespace removed, or `None` when nothing
    /// would be engraved.
    pub fn engraving_text(&self) -> Option<&str> {
        self.back_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Checks each parameter on its own.
    ///
    /// Combinations that do not fit together are reported by the layout
    /// resolver as [`GeometryError::LayoutConflict`].
    pub fn validate(&self) -> Result<(), GeometryError> {
        positive("plate_thickness", self.plate_thickness)?;
        positive("feature_height", self.feature_height)?;
        non_negative("padding", self.padding)?;

        if self.hole_enabled {
            positive("hole_radius", self.hole_radius)?;
            non_negative("hole_margin", self.hole_margin)?;
        }

        Ok(())
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            parameter,
            value,
            "must be a positive finite number",
        ))
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(
            parameter,
            value,
            "must be zero or a positive finite number",
        ))
    }
}
