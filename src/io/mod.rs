//! I/O layer: NIfTI image reading/writing and the JSON provenance sidecar.
pub mod nifti_io;
pub use nifti_io::{read_image, write_image};

pub mod writers;
