use super::types::WadCoord;
use math::Pnt2f;
use serde::Deserialize;

/// Maps raw map units into output units: `(raw + shift) / xy_downscale` horizontally and
/// `raw / z_downscale` vertically.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub xy_downscale: f32,
    pub z_downscale: f32,
    pub x_shift: f32,
    pub y_shift: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            xy_downscale: 10.0,
            z_downscale: 10.0,
            x_shift: -1024.0,
            y_shift: 3680.0,
        }
    }
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            xy_downscale: 1.0,
            z_downscale: 1.0,
            x_shift: 0.0,
            y_shift: 0.0,
        }
    }

    pub fn vertex(&self, x: WadCoord, y: WadCoord) -> Pnt2f {
        Pnt2f::new(
            (f32::from(x) + self.x_shift) / self.xy_downscale,
            (f32::from(y) + self.y_shift) / self.xy_downscale,
        )
    }

    pub fn height(&self, z: WadCoord) -> f32 {
        f32::from(z) / self.z_downscale
    }

    /// Horizontal texture offsets scale with the map so projected texels stay put.
    pub fn x_offset(&self, offset: WadCoord) -> f32 {
        f32::from(offset) / self.xy_downscale
    }

    pub fn y_offset(&self, offset: WadCoord) -> f32 {
        f32::from(offset) / self.z_downscale
    }
}
