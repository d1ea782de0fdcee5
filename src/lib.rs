#![doc = r#"
niresample — resample 3D NIfTI volumes onto a new voxel grid.

This crate reads a `.nii` / `.nii.gz` volume, resamples it onto a requested
voxel spacing and grid size while keeping its physical origin and orientation,
and writes the result back to disk. It powers the `niresample` CLI and can be
embedded in your own Rust applications.

The interpolation policy is fixed by the kind of image:

| Kind        | Interpolator        | Fill value |
|-------------|---------------------|------------|
| `Label`     | nearest neighbour   | `0`        |
| `Intensity` | cubic B-spline      | `-1024`    |

Quick start: resample a file
----------------------------
```rust,no_run
use std::path::Path;
use niresample::{resample_file, ImageKind, ResampleParams};

fn main() -> niresample::Result<()> {
    let params = ResampleParams::new(ImageKind::Intensity, [1.4, 1.4, 1.0], [256, 256, 300]);
    let report = resample_file(
        Path::new("/data/ct_001.nii.gz"),
        Path::new("/out/resampled/ct_001.nii.gz"),
        &params,
    )?;
    println!("{}", report.confirmation());
    Ok(())
}
```

In-memory resampling
--------------------
```rust
use ndarray::Array3;
use niresample::{resample_image, Geometry, Image, ImageKind, PixelType, ResampleParams};

fn main() -> niresample::Result<()> {
    let data = Array3::from_shape_fn((8, 8, 4), |(x, y, _)| if x + y > 7 { 1.0 } else { 0.0 });
    let image = Image::new(data, Geometry::with_spacing([0.5, 0.5, 1.0]), PixelType::U8);

    let params = ResampleParams::new(ImageKind::Label, [1.0, 1.0, 1.0], [4, 4, 4]);
    let resampled = resample_image(&image, &params)?;

    assert_eq!(resampled.size(), [4, 4, 4]);
    assert_eq!(resampled.geometry().origin, image.geometry().origin);
    Ok(())
}
```

Error handling
--------------
All public functions return `niresample::Result<T>`; match on `niresample::Error`
to handle specific cases, e.g. codec or geometry errors.

```rust,no_run
use std::path::Path;
use niresample::{resample_file, Error, ImageKind, ResampleParams};

fn main() {
    let params = ResampleParams::new(ImageKind::Label, [1.0, 1.0, 1.0], [128, 128, 128]);
    match resample_file(Path::new("/bad/path.nii.gz"), Path::new("/out.nii.gz"), &params) {
        Ok(report) => println!("{}", report.confirmation()),
        Err(Error::Nifti(e)) => eprintln!("NIfTI error: {e}"),
        Err(Error::DegenerateGeometry) => eprintln!("input geometry is not invertible"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — image model, geometry, interpolators and the resample filter.
- [`io`] — NIfTI reader/writer and the JSON provenance sidecar.
- [`types`] — enums such as `ImageKind`, `InterpolatorKind`, `PixelType`.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::geometry::Geometry;
pub use crate::core::image::Image;
pub use crate::core::params::{OutputOptions, ResampleParams};
pub use crate::core::processing::{ResampleSpec, resample};
pub use error::{Error, Result};
pub use types::{ImageKind, InterpolatorKind, PixelType};

// Readers and writers
pub use io::writers::sidecar::{ResampleSidecar, sidecar_path};
pub use io::{read_image, write_image};

// High-level API re-exports
pub use api::{
    ResampleReport, confirmation_message, resample_file, resample_file_with_options,
    resample_image,
};
