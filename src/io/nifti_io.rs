//! NIfTI-1 reading and writing.
//!
//! Geometry is taken from the sform when present, otherwise from the qform,
//! otherwise from `pixdim` alone. Gzip compression follows the file
//! extension: `.nii.gz` is compressed, `.nii` is not.

use std::path::Path;

use ndarray::{Array3, ArrayD, Axis, Ix3};
use nifti::writer::WriterOptions;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, NiftiType, ReaderOptions};
use tracing::{debug, info, warn};

use crate::core::geometry::Geometry;
use crate::core::image::Image;
use crate::core::processing::resample::check_grid_size;
use crate::error::{Error, Result};
use crate::types::PixelType;

const DT_UINT8: i16 = NiftiType::Uint8 as i16;
const DT_INT8: i16 = NiftiType::Int8 as i16;
const DT_UINT16: i16 = NiftiType::Uint16 as i16;
const DT_INT16: i16 = NiftiType::Int16 as i16;
const DT_UINT32: i16 = NiftiType::Uint32 as i16;
const DT_INT32: i16 = NiftiType::Int32 as i16;
const DT_UINT64: i16 = NiftiType::Uint64 as i16;
const DT_INT64: i16 = NiftiType::Int64 as i16;
const DT_FLOAT32: i16 = NiftiType::Float32 as i16;
const DT_FLOAT64: i16 = NiftiType::Float64 as i16;

/// NIFTI_XFORM_SCANNER_ANAT
const XFORM_SCANNER_ANAT: i16 = 1;

pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path = path.as_ref();
    info!("Reading NIfTI image: {:?}", path);

    let obj = ReaderOptions::new().read_file(path)?;
    let header = obj.header().clone();
    let pixel_type = pixel_type_from_header(&header)?;
    let geometry = geometry_from_header(&header);

    let volume: ArrayD<f64> = obj.into_volume().into_ndarray::<f64>()?;
    let data = squeeze_to_3d(volume)?;

    info!(
        "Loaded {:?} volume ({}), spacing {:?}, origin {:?}",
        data.dim(),
        pixel_type,
        geometry.spacing,
        geometry.origin
    );
    debug!("Direction: {:?}", geometry.direction);

    Ok(Image::new(data, geometry, pixel_type).with_header(header))
}

/// Write `image` to `path`, using its source header (if any) as the template.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P) -> Result<()> {
    let path = path.as_ref();
    let header = output_header(image)?;
    let data = image.data();

    macro_rules! write_as {
        ($t:ty) => {
            WriterOptions::new(path)
                .reference_header(&header)
                .write_nifti(&data.mapv(|v| v as $t))?
        };
    }

    match image.pixel_type() {
        PixelType::U8 => write_as!(u8),
        PixelType::I8 => write_as!(i8),
        PixelType::U16 => write_as!(u16),
        PixelType::I16 => write_as!(i16),
        PixelType::U32 => write_as!(u32),
        PixelType::I32 => write_as!(i32),
        PixelType::U64 => write_as!(u64),
        PixelType::I64 => write_as!(i64),
        PixelType::F32 => write_as!(f32),
        PixelType::F64 => write_as!(f64),
    }

    info!(
        "Wrote {:?} volume ({}) to {:?}",
        image.size(),
        image.pixel_type(),
        path
    );
    Ok(())
}

fn has_intensity_scaling(header: &NiftiHeader) -> bool {
    header.scl_slope != 0.0 && (header.scl_slope != 1.0 || header.scl_inter != 0.0)
}

/// Pixel type to write back. Scaled data is stored as float32 since the
/// scaling is applied on read.
pub fn pixel_type_from_header(header: &NiftiHeader) -> Result<PixelType> {
    let stored = match header.datatype {
        DT_UINT8 => PixelType::U8,
        DT_INT8 => PixelType::I8,
        DT_UINT16 => PixelType::U16,
        DT_INT16 => PixelType::I16,
        DT_UINT32 => PixelType::U32,
        DT_INT32 => PixelType::I32,
        DT_UINT64 => PixelType::U64,
        DT_INT64 => PixelType::I64,
        DT_FLOAT32 => PixelType::F32,
        DT_FLOAT64 => PixelType::F64,
        other => return Err(Error::UnsupportedPixelType { datatype: other }),
    };

    if has_intensity_scaling(header) && stored != PixelType::F64 {
        warn!(
            "Header carries intensity scaling (slope {}, intercept {}); writing float32",
            header.scl_slope, header.scl_inter
        );
        return Ok(PixelType::F32);
    }
    Ok(stored)
}

fn positive_spacing(value: f32) -> f64 {
    if value == 0.0 { 1.0 } else { value.abs() as f64 }
}

pub fn geometry_from_header(header: &NiftiHeader) -> Geometry {
    if header.sform_code > 0 {
        let row = |r: [f32; 4]| r.map(|v| v as f64);
        return Geometry::from_affine([row(header.srow_x), row(header.srow_y), row(header.srow_z)]);
    }

    let dx = positive_spacing(header.pixdim[1]);
    let dy = positive_spacing(header.pixdim[2]);
    let dz = positive_spacing(header.pixdim[3]);

    if header.qform_code > 0 {
        let b = header.quatern_b as f64;
        let c = header.quatern_c as f64;
        let d = header.quatern_d as f64;
        let a = (1.0 - (b * b + c * c + d * d)).max(0.0).sqrt();
        let qfac = if header.pixdim[0] < 0.0 { -1.0 } else { 1.0 };

        let direction = [
            [a * a + b * b - c * c - d * d, 2.0 * (b * c - a * d), qfac * 2.0 * (b * d + a * c)],
            [2.0 * (b * c + a * d), a * a + c * c - b * b - d * d, qfac * 2.0 * (c * d - a * b)],
            [2.0 * (b * d - a * c), 2.0 * (c * d + a * b), qfac * (a * a + d * d - b * b - c * c)],
        ];
        let origin = [
            header.quatern_x as f64,
            header.quatern_y as f64,
            header.quatern_z as f64,
        ];
        return Geometry::new(origin, [dx, dy, dz], direction);
    }

    Geometry::with_spacing([dx, dy, dz])
}

/// Header for writing `image`: the source header with the new grid spacing,
/// a recomputed sform and identity intensity scaling. `dim`, `datatype` and
/// `bitpix` are filled in by the writer from the array.
pub fn output_header(image: &Image) -> Result<NiftiHeader> {
    check_grid_size(image.size())?;
    let geometry = image.geometry();
    let mut header = image.header().cloned().unwrap_or_else(|| NiftiHeader {
        sform_code: XFORM_SCANNER_ANAT,
        ..NiftiHeader::default()
    });

    for axis in 0..3 {
        header.pixdim[axis + 1] = geometry.spacing[axis] as f32;
    }
    header.scl_slope = 1.0;
    header.scl_inter = 0.0;

    let affine = geometry.to_affine();
    let row = |r: [f64; 4]| r.map(|v| v as f32);
    header.srow_x = row(affine[0]);
    header.srow_y = row(affine[1]);
    header.srow_z = row(affine[2]);

    Ok(header)
}

/// Drop trailing singleton dimensions (e.g. a 4D file with one frame).
fn squeeze_to_3d(mut volume: ArrayD<f64>) -> Result<Array3<f64>> {
    let dims = volume.shape().to_vec();
    if dims.len() < 3 || dims[3..].iter().any(|&n| n != 1) {
        return Err(Error::Dimensionality { dims });
    }
    while volume.ndim() > 3 {
        let last = volume.ndim() - 1;
        volume = volume.index_axis_move(Axis(last), 0);
    }
    Ok(volume.into_dimensionality::<Ix3>()?)
}
