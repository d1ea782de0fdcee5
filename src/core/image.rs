//! In-memory volumetric image.

use ndarray::Array3;
use nifti::NiftiHeader;

use crate::core::geometry::Geometry;
use crate::types::PixelType;

/// A 3D voxel grid indexed `[x, y, z]` together with its physical geometry.
///
/// Voxel values are held as `f64` regardless of the on-disk type;
/// `pixel_type` records the type to write back.
#[derive(Debug, Clone)]
pub struct Image {
    data: Array3<f64>,
    geometry: Geometry,
    pixel_type: PixelType,
    /// Header of the file the image was read from, used as the template on write.
    header: Option<NiftiHeader>,
}

impl Image {
    pub fn new(data: Array3<f64>, geometry: Geometry, pixel_type: PixelType) -> Self {
        Self {
            data,
            geometry,
            pixel_type,
            header: None,
        }
    }

    pub fn with_header(mut self, header: NiftiHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn header(&self) -> Option<&NiftiHeader> {
        self.header.as_ref()
    }

    /// Grid dimensions `[nx, ny, nz]`.
    pub fn size(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.data.dim();
        [nx, ny, nz]
    }
}
