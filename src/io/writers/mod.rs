//! Auxiliary outputs written next to resampled images.
pub mod sidecar;
