use super::config::TextureConfig;
use super::solid::{Projection, Solid, Surface, SEAL_OFFSET};
use math::{perp_cw, Plane, Pnt2f};
use wad::util::is_untextured;
use wad::{Transform, WadName};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cap {
    Floor,
    Ceiling,
}

/// Twice the signed area of `triangle`; positive when its points run counter-clockwise with `y`
/// pointing up.
pub fn signed_area(triangle: &[Pnt2f; 3]) -> f32 {
    let [a, b, c] = *triangle;
    let (ab, ac) = (b - a, c - a);
    ab.x * ac.y - ab.y * ac.x
}

/// Reorders `triangle` so the clockwise perpendicular of each edge faces out of it.
pub fn outward_winding(triangle: [Pnt2f; 3]) -> [Pnt2f; 3] {
    let [a, b, c] = triangle;
    if signed_area(&triangle) < 0.0 {
        [a, c, b]
    } else {
        triangle
    }
}

pub struct FlatBuilder<'a> {
    transform: Transform,
    textures: &'a TextureConfig,
}

impl<'a> FlatBuilder<'a> {
    pub fn new(transform: Transform, textures: &'a TextureConfig) -> Self {
        Self {
            transform,
            textures,
        }
    }

    /// Builds the five-sided solid capping `triangle` at `height`: the textured face lies at
    /// `height` and faces into the sector, the solid extends `SEAL_OFFSET` away from it.
    pub fn build(&self, triangle: [Pnt2f; 3], height: f32, cap: Cap, texture: WadName) -> Solid {
        let [a, b, c] = outward_winding(triangle);
        let mut solid = Solid::new();
        for &(p, q) in &[(a, b), (b, c), (c, a)] {
            solid.bound(Plane::vertical(perp_cw(q - p), p));
        }
        let surface = self.surface(cap, texture);
        match cap {
            Cap::Floor => solid
                .bound(Plane::horizontal(false, height - SEAL_OFFSET))
                .face(Plane::horizontal(true, height), surface),
            Cap::Ceiling => solid
                .bound(Plane::horizontal(true, height + SEAL_OFFSET))
                .face(Plane::horizontal(false, height), surface),
        };
        solid
    }

    fn surface(&self, cap: Cap, texture: WadName) -> Surface {
        if is_untextured(&texture) || self.textures.flat_size <= 0.0 {
            return Surface::Default;
        }
        let flat_size = self.textures.flat_size;
        let scale = self.transform.xy_downscale / flat_size;
        // Undo the level shift so flats stay aligned to the 64-unit grid of the WAD.
        let h_offset = -self.transform.x_shift / flat_size;
        let v_offset = self.transform.y_shift / flat_size;
        let s = match cap {
            Cap::Floor => [0.0, scale, h_offset],
            Cap::Ceiling => [0.0, -scale, h_offset],
        };
        Surface::Textured {
            projection: Projection {
                s,
                t: [-scale, 0.0, v_offset],
            },
            material: format!("{}{}", self.textures.flat_prefix, texture),
        }
    }
}
