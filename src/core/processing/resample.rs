//! Resample filter.
//!
//! Maps every voxel of a new grid to the physical point it occupies, looks
//! that point up in the source image and interpolates. Source and output
//! share physical space (identity transform); only the grid changes.

use std::time::Instant;

use ndarray::{Array3, Zip};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::geometry::Geometry;
use crate::core::image::Image;
use crate::core::interpolation::{build_interpolator, is_inside_buffer};
use crate::core::processing::cast::cast_with_bounds;
use crate::error::{Error, Result};
use crate::types::{ImageKind, InterpolatorKind};

/// Everything needed to place and fill the output grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleSpec {
    pub size: [usize; 3],
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
    pub direction: [[f64; 3]; 3],
    /// Selects the interpolator and the value for voxels outside the source.
    pub kind: ImageKind,
}

impl ResampleSpec {
    /// Output grid with `reference`'s origin and direction, the given size and
    /// spacing, and the interpolator and fill value fixed by `kind`.
    pub fn from_reference(
        reference: &Image,
        size: [usize; 3],
        spacing: [f64; 3],
        kind: ImageKind,
    ) -> Self {
        let geometry = reference.geometry();
        Self {
            size,
            spacing,
            origin: geometry.origin,
            direction: geometry.direction,
            kind,
        }
    }

    pub fn interpolator(&self) -> InterpolatorKind {
        self.kind.interpolator()
    }

    /// Value for output voxels that map outside the source buffer.
    pub fn default_pixel_value(&self) -> f64 {
        self.kind.default_pixel_value()
    }

    pub fn output_geometry(&self) -> Geometry {
        Geometry::new(self.origin, self.spacing, self.direction)
    }
}

/// Largest extent a NIfTI-1 `dim` entry can hold.
pub const MAX_EXTENT: usize = i16::MAX as usize;

/// Reject grids whose extent along any axis cannot be stored in a NIfTI-1 header.
pub fn check_grid_size(size: [usize; 3]) -> Result<()> {
    match size.iter().find(|&&n| n > MAX_EXTENT) {
        Some(n) => Err(Error::InvalidArgument {
            arg: "size",
            value: format!("{n} exceeds the NIfTI-1 limit of {MAX_EXTENT}"),
        }),
        None => Ok(()),
    }
}

/// Resample `input` onto the grid described by `spec`.
///
/// The output keeps the input's pixel type; values are clamped (and rounded
/// for integer types) to fit it, the default pixel value included.
pub fn resample(input: &Image, spec: &ResampleSpec) -> Result<Image> {
    check_grid_size(spec.size)?;
    let start = Instant::now();
    let output_geometry = spec.output_geometry();
    let mapping = input.geometry().index_mapping_from(&output_geometry)?;
    let input_size = input.size();
    let pixel_type = input.pixel_type();

    info!(
        "Resampling {:?} -> {:?} with {} interpolation (spacing {:?} -> {:?})",
        input_size,
        spec.size,
        spec.interpolator(),
        input.geometry().spacing,
        spec.spacing
    );

    let interpolator = build_interpolator(spec.interpolator(), input.data());
    let fill = cast_with_bounds(spec.default_pixel_value(), pixel_type);
    debug!(
        "Default pixel value {} stored as {} ({})",
        spec.default_pixel_value(), fill, pixel_type
    );

    let mut data = Array3::<f64>::zeros(spec.size);
    Zip::indexed(&mut data).par_for_each(|(i, j, k), voxel| {
        let index = mapping.map([i, j, k]);
        *voxel = if is_inside_buffer(input_size, index) {
            cast_with_bounds(interpolator.evaluate(index), pixel_type)
        } else {
            fill
        };
    });

    debug!("Resampled {} voxels in {:?}", data.len(), start.elapsed());

    let mut output = Image::new(data, output_geometry, pixel_type);
    if let Some(header) = input.header() {
        output = output.with_header(header.clone());
    }
    Ok(output)
}
