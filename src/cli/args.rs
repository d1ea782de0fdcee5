use clap::Parser;
use std::path::PathBuf;

use niresample::{ImageKind, ResampleParams};

#[derive(Parser, Debug)]
#[command(
    name = "niresample",
    version,
    about = "Resample a 3D NIfTI image to a new voxel spacing and grid size"
)]
pub struct CliArgs {
    /// Path to the input image
    pub image_path: PathBuf,

    /// Path to save the resampled image
    pub output_path: PathBuf,

    /// Treat the image as a label map (nearest-neighbour, fill 0)
    #[arg(long = "is_label", default_value_t = false)]
    pub is_label: bool,

    /// Spacing x
    #[arg(long = "spacing_x", allow_negative_numbers = true)]
    pub spacing_x: f64,

    /// Spacing y
    #[arg(long = "spacing_y", allow_negative_numbers = true)]
    pub spacing_y: f64,

    /// Spacing z
    #[arg(long = "spacing_z", allow_negative_numbers = true)]
    pub spacing_z: f64,

    /// Dimension x
    #[arg(long = "size_x")]
    pub size_x: usize,

    /// Dimension y
    #[arg(long = "size_y")]
    pub size_y: usize,

    /// Dimension z
    #[arg(long = "size_z")]
    pub size_z: usize,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Also write a JSON provenance sidecar next to the output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,
}

impl CliArgs {
    pub fn params(&self) -> ResampleParams {
        ResampleParams::new(
            ImageKind::from_label_flag(self.is_label),
            [self.spacing_x, self.spacing_y, self.spacing_z],
            [self.size_x, self.size_y, self.size_z],
        )
    }
}
