//! High-level, ergonomic library API: resample a NIfTI file to another file or
//! an in-memory image to a new grid. Prefer these entrypoints over the
//! low-level `core` modules when integrating niresample.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::image::Image;
use crate::core::params::{OutputOptions, ResampleParams};
use crate::core::processing::{ResampleSpec, resample};
use crate::error::Result;
use crate::io::writers::sidecar::{ResampleSidecar, write_sidecar};
use crate::io::{read_image, write_image};
use crate::types::ImageKind;

/// Summary of a file-to-file run
#[derive(Debug, Clone)]
pub struct ResampleReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: ImageKind,
    pub input_size: [usize; 3],
    pub input_spacing: [f64; 3],
    pub output_size: [usize; 3],
    pub output_spacing: [f64; 3],
    pub sidecar: Option<PathBuf>,
    pub elapsed: Duration,
}

impl ResampleReport {
    /// Human-readable confirmation naming the source file and destination.
    pub fn confirmation(&self) -> String {
        confirmation_message(&self.input, &self.output)
    }
}

pub fn confirmation_message(input: &Path, output: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    format!("{} resampled and saved to {}", name, output.display())
}

/// Resample an in-memory image. Origin and direction are kept; the grid,
/// interpolator and fill value come from `params`.
pub fn resample_image(image: &Image, params: &ResampleParams) -> Result<Image> {
    let spec = ResampleSpec::from_reference(image, params.size, params.spacing, params.kind);
    resample(image, &spec)
}

/// Read `input`, resample it and write the result to `output`, creating any
/// missing parent directories.
pub fn resample_file(input: &Path, output: &Path, params: &ResampleParams) -> Result<ResampleReport> {
    resample_file_with_options(input, output, params, &OutputOptions::default())
}

pub fn resample_file_with_options(
    input: &Path,
    output: &Path,
    params: &ResampleParams,
    options: &OutputOptions,
) -> Result<ResampleReport> {
    let start = Instant::now();
    let kind = params.kind;
    info!(
        "Image kind {}: {} interpolation, default pixel value {}",
        kind,
        kind.interpolator(),
        kind.default_pixel_value()
    );

    let image = read_image(input)?;
    let spec = ResampleSpec::from_reference(&image, params.size, params.spacing, kind);
    let resampled = resample(&image, &spec)?;

    ensure_parent_dir(output)?;
    write_image(&resampled, output)?;

    let sidecar = if options.sidecar {
        let record = ResampleSidecar::new(input, output, kind, &image, &spec);
        Some(write_sidecar(output, &record)?)
    } else {
        None
    };

    let report = ResampleReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        kind,
        input_size: image.size(),
        input_spacing: image.geometry().spacing,
        output_size: resampled.size(),
        output_spacing: resampled.geometry().spacing,
        sidecar,
        elapsed: start.elapsed(),
    };
    debug!("{:?}", report);
    Ok(report)
}

/// Create every missing ancestor directory of `path`. No-op for bare file names.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_uses_input_basename() {
        let msg = confirmation_message(Path::new("/data/in/ct_001.nii.gz"), Path::new("out/ct.nii.gz"));
        assert_eq!(msg, "ct_001.nii.gz resampled and saved to out/ct.nii.gz");
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        assert!(ensure_parent_dir(Path::new("just_a_file.nii.gz")).is_ok());
    }
}
