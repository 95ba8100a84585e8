use super::config::TextureConfig;
use super::solid::{Projection, Solid, Surface, SEAL_OFFSET};
use log::warn;
use math::prelude::*;
use math::{perp_cw, NormalizeOrZero, Plane, Pnt2f};
use wad::util::is_untextured;
use wad::{Sidedef, TextureMetrics, Transform, WadName};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Heights {
    pub floor: f32,
    pub ceiling: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallSection {
    OneSided,
    Lower,
    Middle,
    Upper,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pegging {
    pub lower_unpegged: bool,
    pub upper_unpegged: bool,
}

/// Height at which the top edge of a wall texture is anchored.
///
/// `this` holds the heights of the side's own sector and `other` those of the sector across the
/// line; one-sided walls only look at `this`.
pub fn draw_height(
    section: WallSection,
    pegging: Pegging,
    y_offset: f32,
    this: Heights,
    other: Heights,
) -> f32 {
    let higher_floor = f32::max(this.floor, other.floor);
    let higher_ceiling = f32::max(this.ceiling, other.ceiling);
    let lower_ceiling = f32::min(this.ceiling, other.ceiling);
    y_offset
        + match section {
            WallSection::OneSided => {
                if pegging.lower_unpegged {
                    this.floor
                } else {
                    this.ceiling
                }
            }
            WallSection::Lower => {
                if pegging.lower_unpegged {
                    this.ceiling
                } else {
                    higher_floor
                }
            }
            WallSection::Upper => {
                if pegging.upper_unpegged {
                    higher_ceiling
                } else {
                    lower_ceiling
                }
            }
            WallSection::Middle => {
                if pegging.lower_unpegged {
                    higher_floor
                } else {
                    higher_ceiling
                }
            }
        }
}

/// One wall section of one side, ready to become a solid. The textured face looks towards the
/// right-hand side of `start -> end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallSegment {
    pub start: Pnt2f,
    pub end: Pnt2f,
    pub section: WallSection,
    pub bottom: f32,
    pub top: f32,
    pub draw_height: f32,
    pub x_offset: f32,
    pub texture: WadName,
}

/// Lists the wall sections a side needs. `other` is `None` for one-sided lines.
///
/// Lower and upper sections are emitted whenever the neighbouring sector leaves a step, textured
/// or not, so the map stays sealed; a two-sided middle section only when it has a texture.
pub fn side_walls(
    (start, end): (Pnt2f, Pnt2f),
    side: &Sidedef,
    this: Heights,
    other: Option<Heights>,
    pegging: Pegging,
) -> Vec<WallSegment> {
    let mut walls = Vec::with_capacity(3);
    let mut push = |section: WallSection, bottom: f32, top: f32, texture: WadName| {
        if bottom >= top {
            return;
        }
        walls.push(WallSegment {
            start,
            end,
            section,
            bottom,
            top,
            draw_height: draw_height(
                section,
                pegging,
                side.y_offset,
                this,
                other.unwrap_or(this),
            ),
            x_offset: side.x_offset,
            texture,
        });
    };

    match other {
        None => push(
            WallSection::OneSided,
            this.floor,
            this.ceiling,
            side.middle_texture,
        ),
        Some(other) => {
            if other.floor > this.floor {
                push(
                    WallSection::Lower,
                    this.floor,
                    other.floor,
                    side.lower_texture,
                );
            }
            if !is_untextured(&side.middle_texture) {
                push(
                    WallSection::Middle,
                    f32::max(this.floor, other.floor),
                    f32::min(this.ceiling, other.ceiling),
                    side.middle_texture,
                );
            }
            if other.ceiling < this.ceiling {
                push(
                    WallSection::Upper,
                    other.ceiling,
                    this.ceiling,
                    side.upper_texture,
                );
            }
        }
    }
    walls
}

pub struct WallBuilder<'a, MetricsT: ?Sized> {
    metrics: &'a MetricsT,
    transform: Transform,
    textures: &'a TextureConfig,
}

impl<'a, MetricsT: TextureMetrics + ?Sized> WallBuilder<'a, MetricsT> {
    pub fn new(metrics: &'a MetricsT, transform: Transform, textures: &'a TextureConfig) -> Self {
        Self {
            metrics,
            transform,
            textures,
        }
    }

    /// Builds the six-sided solid for `wall`: a slab `SEAL_OFFSET` thick behind the textured face,
    /// capped at both ends and at `bottom` and `top`. Returns `None` for a zero-length wall.
    pub fn build(&self, wall: &WallSegment) -> Option<Solid> {
        let WallSegment {
            start,
            end,
            bottom,
            top,
            ..
        } = *wall;
        if start == end {
            warn!("Zero-length wall at {:?}, skipping.", start);
            return None;
        }
        let direction = (end - start).normalize_or_zero();
        let normal = perp_cw(direction);
        let offset = normal * SEAL_OFFSET;
        let (back_start, back_end) = (start - offset, end - offset);

        let mut solid = Solid::new();
        solid
            .bound(Plane::vertical(-normal, back_start))
            .bound(Plane::vertical(perp_cw(start - back_start), start))
            .bound(Plane::vertical(perp_cw(back_end - end), end))
            .bound(Plane::horizontal(true, top))
            .bound(Plane::horizontal(false, bottom))
            .face(Plane::vertical(normal, start), self.surface(wall));
        Some(solid)
    }

    fn surface(&self, wall: &WallSegment) -> Surface {
        if is_untextured(&wall.texture) {
            return Surface::Default;
        }
        let size = match self.metrics.lookup(&wall.texture) {
            Some(size) if size.width > 0 && size.height > 0 => size,
            _ => {
                warn!(
                    "No metrics for wall texture `{}`, using default projection.",
                    wall.texture
                );
                return Surface::Default;
            }
        };
        let x_scale = self.transform.xy_downscale / f32::from(size.width);
        let y_scale = self.transform.z_downscale / f32::from(size.height);
        let direction = (wall.end - wall.start).normalize_or_zero();
        let start_along = direction.dot(wall.start.to_vec());
        Surface::Textured {
            projection: Projection {
                s: [x_scale, 0.0, (wall.x_offset - start_along) * x_scale],
                t: [0.0, y_scale, wall.draw_height * y_scale],
            },
            material: format!("{}{}", self.textures.wall_prefix, wall.texture),
        }
    }
}
