//! Core building blocks: image model and geometry, interpolators, the
//! resample filter, and run parameters. These are internal primitives
//! consumed by the high-level `api` module.
pub mod geometry;
pub mod image;
pub mod interpolation;
pub mod params;
pub mod processing;
