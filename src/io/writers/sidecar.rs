use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::image::Image;
use crate::core::processing::ResampleSpec;
use crate::error::Result;
use crate::types::{ImageKind, InterpolatorKind, PixelType};

/// Provenance record describing one resampling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleSidecar {
    pub tool: String,
    pub version: String,
    pub created: DateTime<Utc>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: ImageKind,
    pub interpolator: InterpolatorKind,
    pub default_pixel_value: f64,
    pub pixel_type: PixelType,
    pub input_size: [usize; 3],
    pub input_spacing: [f64; 3],
    pub output_size: [usize; 3],
    pub output_spacing: [f64; 3],
    pub origin: [f64; 3],
    pub direction: [[f64; 3]; 3],
}

impl ResampleSidecar {
    pub fn new(
        input_path: &Path,
        output_path: &Path,
        kind: ImageKind,
        source: &Image,
        spec: &ResampleSpec,
    ) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            created: Utc::now(),
            input: input_path.to_path_buf(),
            output: output_path.to_path_buf(),
            kind,
            interpolator: spec.interpolator(),
            default_pixel_value: spec.default_pixel_value(),
            pixel_type: source.pixel_type(),
            input_size: source.size(),
            input_spacing: source.geometry().spacing,
            output_size: spec.size,
            output_spacing: spec.spacing,
            origin: spec.origin,
            direction: spec.direction,
        }
    }
}

/// `scan.nii.gz` -> `scan.json`, `scan.nii` -> `scan.json`
pub fn sidecar_path(output_path: &Path) -> PathBuf {
    let name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    for suffix in [".nii.gz", ".nii"] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return output_path.with_file_name(format!("{stem}.json"));
        }
    }
    output_path.with_extension("json")
}

/// Write the sidecar next to `output_path` and return where it went.
pub fn write_sidecar(output_path: &Path, sidecar: &ResampleSidecar) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(sidecar)?;
    std::fs::write(&path, json_string)?;
    info!("Created metadata sidecar: {:?}", path);
    Ok(path)
}
