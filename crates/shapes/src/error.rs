use crate::path::PathError;

use thiserror::Error;

/// Errors raised by shape constructors and distance queries.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum ShapeError {
    #[error("Invalid argument: {0}.")]
    InvalidArgument(&'static str),
    #[error("The shape has no geometry.")]
    EmptyShape,
    #[error(transparent)]
    Path(#[from] PathError),
}
