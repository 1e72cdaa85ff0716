//! # Mesh Errors
//!
//! Error types for mesh generation, boolean operations and export.

use thiserror::Error;

/// Errors that can occur in the mesh kernel.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A primitive or operand cannot form a valid solid
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Boolean operation failed
    #[error("Boolean operation '{operation}' failed: {message}")]
    BooleanFailed {
        operation: &'static str,
        message: String,
    },

    /// Writing an exported mesh failed
    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            operation,
            message: message.into(),
        }
    }
}
