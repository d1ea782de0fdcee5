//! Shared types and enums used across niresample.
//! Includes `ImageKind` (label vs. intensity policy), `InterpolatorKind`,
//! and `PixelType` (the on-disk voxel representation).
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum InterpolatorKind {
    NearestNeighbor,
    BSpline,
}

impl std::fmt::Display for InterpolatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InterpolatorKind::NearestNeighbor => "NearestNeighbor",
            InterpolatorKind::BSpline => "BSpline",
        };
        write!(f, "{}", s)
    }
}

/// What the voxel values of an image mean. Each kind fixes the interpolator
/// and the fill value used for voxels that fall outside the source grid.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub enum ImageKind {
    /// Discrete class identifiers (segmentation masks).
    Label,
    /// Continuous intensities (CT, MR).
    #[default]
    Intensity,
}

impl ImageKind {
    /// Hounsfield value of air, used as background for intensity images.
    pub const INTENSITY_FILL: f64 = -1024.0;
    pub const LABEL_FILL: f64 = 0.0;

    pub fn from_label_flag(is_label: bool) -> Self {
        if is_label {
            ImageKind::Label
        } else {
            ImageKind::Intensity
        }
    }

    pub fn interpolator(self) -> InterpolatorKind {
        match self {
            ImageKind::Label => InterpolatorKind::NearestNeighbor,
            ImageKind::Intensity => InterpolatorKind::BSpline,
        }
    }

    pub fn default_pixel_value(self) -> f64 {
        match self {
            ImageKind::Label => Self::LABEL_FILL,
            ImageKind::Intensity => Self::INTENSITY_FILL,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Label => write!(f, "Label"),
            ImageKind::Intensity => write!(f, "Intensity"),
        }
    }
}

/// Voxel storage type of a NIfTI volume.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum PixelType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl PixelType {
    pub fn is_integer(self) -> bool {
        !matches!(self, PixelType::F32 | PixelType::F64)
    }

    /// Representable range as `f64`. 64-bit integer bounds are rounded to the
    /// nearest `f64`.
    pub fn range(self) -> (f64, f64) {
        match self {
            PixelType::U8 => (u8::MIN as f64, u8::MAX as f64),
            PixelType::I8 => (i8::MIN as f64, i8::MAX as f64),
            PixelType::U16 => (u16::MIN as f64, u16::MAX as f64),
            PixelType::I16 => (i16::MIN as f64, i16::MAX as f64),
            PixelType::U32 => (u32::MIN as f64, u32::MAX as f64),
            PixelType::I32 => (i32::MIN as f64, i32::MAX as f64),
            PixelType::U64 => (u64::MIN as f64, u64::MAX as f64),
            PixelType::I64 => (i64::MIN as f64, i64::MAX as f64),
            PixelType::F32 => (f32::MIN as f64, f32::MAX as f64),
            PixelType::F64 => (f64::MIN, f64::MAX),
        }
    }
}

impl std::fmt::Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PixelType::U8 => "uint8",
            PixelType::I8 => "int8",
            PixelType::U16 => "uint16",
            PixelType::I16 => "int16",
            PixelType::U32 => "uint32",
            PixelType::I32 => "int32",
            PixelType::U64 => "uint64",
            PixelType::I64 => "int64",
            PixelType::F32 => "float32",
            PixelType::F64 => "float64",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_flag_selects_nearest_and_zero_fill() {
        let kind = ImageKind::from_label_flag(true);
        assert_eq!(kind, ImageKind::Label);
        assert_eq!(kind.interpolator(), InterpolatorKind::NearestNeighbor);
        assert_eq!(kind.default_pixel_value(), 0.0);
    }

    #[test]
    fn intensity_uses_bspline_and_air_fill() {
        let kind = ImageKind::from_label_flag(false);
        assert_eq!(kind, ImageKind::Intensity);
        assert_eq!(kind.interpolator(), InterpolatorKind::BSpline);
        assert_eq!(kind.default_pixel_value(), -1024.0);
    }

    #[test]
    fn pixel_type_ranges() {
        assert_eq!(PixelType::U8.range(), (0.0, 255.0));
        assert_eq!(PixelType::I16.range(), (-32768.0, 32767.0));
        assert!(PixelType::I32.is_integer());
        assert!(!PixelType::F32.is_integer());
    }
}
