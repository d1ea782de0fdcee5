//! Image processing operations: the resample filter and the pixel-type cast
//! applied to its output.
pub mod cast;
pub mod resample;

pub use resample::{ResampleSpec, resample};
