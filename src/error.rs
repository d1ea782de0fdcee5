//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, NIfTI, array-shape and JSON errors, and provides
//! semantic variants for unsupported inputs and argument validation.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::NiftiError),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported NIfTI datatype code: {datatype}")]
    UnsupportedPixelType { datatype: i16 },

    #[error("Expected a 3D volume, found dimensions {dims:?}")]
    Dimensionality { dims: Vec<usize> },

    #[error("Image geometry is degenerate (index-to-physical matrix is not invertible)")]
    DegenerateGeometry,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },
}
