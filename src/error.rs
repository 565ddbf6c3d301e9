use thiserror::Error;

use crate::tensor::ElementType;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the mirror padding engine.
///
/// Every variant is terminal for the call that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("source holds {actual} elements but the shape describes {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error(
        "not enough values for mirror pad in dimension {dimension}: required {required}, available {available}"
    )]
    InsufficientData {
        dimension: usize,
        required: usize,
        available: usize,
    },

    #[error("unsupported element type {0}")]
    UnsupportedElementType(ElementType),

    #[error("leaf node {node} is not bound to a source element")]
    UnboundLeaf { node: usize },

    #[error("rank {0} is not supported, expected 1 to 4 dimensions")]
    InvalidRank(usize),

    #[error("padding has {actual} rows but the input has rank {expected}")]
    PaddingRankMismatch { expected: usize, actual: usize },

    #[error("padding matrix must have shape [rank, 2], got {shape:?}")]
    InvalidPaddingMatrix { shape: Vec<usize> },

    #[error("padding in dimension {dimension} must be a non-negative size, got {value}")]
    NegativePadding { dimension: usize, value: i64 },

    #[error("output buffer holds {actual} elements, padded array needs {expected}")]
    OutputSizeMismatch { expected: usize, actual: usize },

    #[error("padded size overflows in dimension {dimension}")]
    PaddedSizeOverflow { dimension: usize },

    #[error("unknown mirror pad mode `{0}`")]
    UnknownMode(String),

    #[error(transparent)]
    Layout(#[from] ndarray::ShapeError),
}
