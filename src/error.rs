//! Error types for simulation construction and state loading.

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, WaveError>;

/// Errors that can occur while building or seeding a simulation.
///
/// Stepping never fails; a diverging field is a valid outcome of unstable parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveError {
    /// Grid width or height is zero and the dimension policy rejects it.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// A physical parameter is not usable (non-finite, or a zero divisor).
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The source cell lies outside the grid.
    #[error("source position ({x}, {y}) is outside the {width}x{height} grid")]
    SourceOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A direct cell write targets a cell outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A field or mask does not have `width * height` elements.
    #[error("expected {expected} cells, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl WaveError {
    /// Create an invalid parameter error.
    pub fn parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }

    /// Create a shape mismatch error.
    pub fn shape(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }
}
