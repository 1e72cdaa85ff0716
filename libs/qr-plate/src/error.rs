//! # Build Errors
//!
//! Error types for plate layout and geometry construction.

use plate_mesh::MeshError;
use thiserror::Error;

/// Errors that can abort a plate build.
///
/// Every variant except [`GeometryError::GeometryFailure`] and
/// [`GeometryError::Export`] is raised before any geometry is constructed.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The module matrix is empty, ragged or not square.
    #[error("Invalid matrix: {reason}")]
    InvalidMatrix { reason: String },

    /// A single parameter is out of its valid range.
    #[error("Invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: String,
    },

    /// Parameters are individually valid but the features do not fit together.
    #[error("Layout conflict on {parameter} = {value}: {reason}")]
    LayoutConflict {
        parameter: &'static str,
        value: f64,
        reason: String,
    },

    /// The mesh kernel rejected an operand or a boolean operation failed.
    #[error("Geometry failure: {0}")]
    GeometryFailure(#[from] MeshError),

    /// Writing the finished solid failed.
    #[error("Export to {path} failed: {source}")]
    Export {
        path: String,
        #[source]
        source: MeshError,
    },
}

impl GeometryError {
    /// Creates an invalid matrix error.
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        Self::InvalidMatrix {
            reason: reason.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(parameter: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    /// Creates a layout conflict error.
    pub fn layout_conflict(parameter: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::LayoutConflict {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter, if the error concerns one.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { parameter, .. } | Self::LayoutConflict { parameter, .. } => {
                Some(parameter)
            }
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
