use crate::PathElementType;

use thiserror::Error;

/// Errors raised while building or converting paths.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("Expected a move-to command before {0:?}.")]
    MissingMoveTo(PathElementType),
    #[error("Unsupported path element {0:?}, the input must be flattened.")]
    UnsupportedElementType(PathElementType),
    #[error("Index {index} is out of bounds (length {len}).")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Invalid argument: {0}.")]
    InvalidArgument(&'static str),
}
