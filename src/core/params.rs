use serde::{Deserialize, Serialize};

use crate::types::ImageKind;

/// Resampling parameters suitable for config files and batch presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleParams {
    pub kind: ImageKind,
    /// Target voxel spacing per axis (x, y, z)
    pub spacing: [f64; 3],
    /// Target grid size per axis (x, y, z)
    pub size: [usize; 3],
}

impl ResampleParams {
    pub fn new(kind: ImageKind, spacing: [f64; 3], size: [usize; 3]) -> Self {
        Self {
            kind,
            spacing,
            size,
        }
    }
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            kind: ImageKind::Intensity,
            spacing: [1.0, 1.0, 1.0],
            size: [256, 256, 256],
        }
    }
}

/// Options for what gets written alongside the resampled image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Write a JSON provenance sidecar next to the image
    pub sidecar: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_deserialize_from_json() {
        let json = r#"{"kind":"Label","spacing":[1.4,1.4,1.0],"size":[256,256,300]}"#;
        let params: ResampleParams = serde_json::from_str(json).unwrap();
        assert_eq!(
            params,
            ResampleParams::new(ImageKind::Label, [1.4, 1.4, 1.0], [256, 256, 300])
        );
    }
}
