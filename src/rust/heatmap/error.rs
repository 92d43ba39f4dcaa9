use std::io;

/// Represents the different types of errors that can occur while rendering a confusion matrix.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The colormap identifier is not one of the known gradients
    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),
    /// The mask does not have the same shape as the matrix
    #[error("Mask shape {actual:?} does not match matrix shape {expected:?}")]
    MaskShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Explicit category labels do not cover the axis
    #[error("Expected {expected} tick labels for the {axis} axis, got {actual}")]
    TickLabels {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Annotations could not be laid out in the matrix shape
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// The plotting backend failed while drawing
    #[error("Drawing error: {0}")]
    Drawing(String),
    /// Writing the figure to disk failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
