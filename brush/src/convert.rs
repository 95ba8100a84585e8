use super::boundary::{reconstruct_loop, Edge, SectorBoundaries, TopologyFailure};
use super::config::TextureConfig;
use super::errors::{ErrorKind, Result};
use super::flat::{Cap, FlatBuilder};
use super::triangulate::{triangulate_loop, EarcutTriangulator, Triangulator};
use super::wall::{side_walls, Heights, Pegging, WallBuilder};
use super::writer::MapWriter;
use log::{debug, info, warn};
use math::Pnt2f;
use wad::types::WadLinedef;
use wad::{Archive, Level, Sector, Sidedef, TextureMetrics, Transform, WadName};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub walls: usize,
    pub floors: usize,
    pub ceilings: usize,
    pub skipped_lines: usize,
    pub skipped_sectors: usize,
}

impl ConvertStats {
    pub fn brushes(&self) -> usize {
        self.walls + self.floors + self.ceilings
    }
}

/// The finished map text of one level.
#[derive(Clone, Debug)]
pub struct ConvertedLevel {
    pub name: WadName,
    pub map: String,
    pub stats: ConvertStats,
}

/// Turns decoded levels into `brushDef3` maps.
///
/// Walls are written first, in linedef order, front side before back side. Then each sector's
/// floor triangles followed by its ceiling triangles, in sector order. Bad references and
/// sectors whose boundary cannot be triangulated are logged and skipped; only decoding errors
/// are fatal.
pub struct LevelConverter<'a, MetricsT: ?Sized, TriangulatorT = EarcutTriangulator> {
    metrics: &'a MetricsT,
    textures: &'a TextureConfig,
    triangulator: TriangulatorT,
}

impl<'a, MetricsT: TextureMetrics + ?Sized> LevelConverter<'a, MetricsT> {
    pub fn new(metrics: &'a MetricsT, textures: &'a TextureConfig) -> Self {
        Self {
            metrics,
            textures,
            triangulator: EarcutTriangulator,
        }
    }
}

impl<'a, MetricsT, TriangulatorT> LevelConverter<'a, MetricsT, TriangulatorT>
where
    MetricsT: TextureMetrics + ?Sized,
    TriangulatorT: Triangulator,
{
    pub fn with_triangulator<NewTriangulatorT: Triangulator>(
        self,
        triangulator: NewTriangulatorT,
    ) -> LevelConverter<'a, MetricsT, NewTriangulatorT> {
        LevelConverter {
            metrics: self.metrics,
            textures: self.textures,
            triangulator,
        }
    }

    /// Decodes level `name` from `wad` and converts it.
    pub fn convert_archive_level(
        &self,
        wad: &Archive,
        name: &str,
        transform: &Transform,
    ) -> Result<ConvertedLevel> {
        let level = Level::from_archive(wad, name, transform)
            .map_err(|error| ErrorKind::decode_level(name, &error))?;
        Ok(self.convert(&level))
    }

    pub fn convert(&self, level: &Level) -> ConvertedLevel {
        info!("Converting level '{}'...", level.name);
        let mut stats = ConvertStats::default();
        let mut writer = MapWriter::new(self.textures.default_material.as_str());
        let mut boundaries = SectorBoundaries::new(level.sectors.len());

        let walls = WallBuilder::new(self.metrics, level.transform, self.textures);
        for (index, linedef) in level.linedefs.iter().enumerate() {
            let sides = match LineSides::resolve(level, index, linedef) {
                Some(sides) => sides,
                None => {
                    stats.skipped_lines += 1;
                    continue;
                }
            };
            let LineSides {
                start,
                end,
                front,
                back,
            } = sides;
            let pegging = Pegging {
                lower_unpegged: linedef.lower_unpegged(),
                upper_unpegged: linedef.upper_unpegged(),
            };

            boundaries.add(front.0.sector, Edge::new(start, end));
            let mut segments = side_walls(
                (start, end),
                front.0,
                heights(front.1),
                back.map(|(_, sector)| heights(sector)),
                pegging,
            );
            if let Some((side, sector)) = back {
                boundaries.add(side.sector, Edge::new(end, start));
                segments.extend(side_walls(
                    (end, start),
                    side,
                    heights(sector),
                    Some(heights(front.1)),
                    pegging,
                ));
            }
            for segment in &segments {
                if let Some(solid) = walls.build(segment) {
                    writer.write_solid(&solid);
                    stats.walls += 1;
                }
            }
        }

        let flats = FlatBuilder::new(level.transform, self.textures);
        for (sector, (index, edges)) in level.sectors.iter().zip(boundaries.into_sectors()) {
            if edges.is_empty() {
                debug!("Sector {} has no boundary, skipping.", index);
                continue;
            }
            let polygon = match reconstruct_loop(&edges) {
                Ok(polygon) => polygon,
                Err(TopologyFailure { unmatched }) => {
                    warn!(
                        "{} Skipping its floor and ceiling.",
                        ErrorKind::Topology {
                            sector: index,
                            unmatched,
                        }
                    );
                    stats.skipped_sectors += 1;
                    continue;
                }
            };
            let triangles = match triangulate_loop(&self.triangulator, index, &polygon) {
                Ok(triangles) => triangles,
                Err(error) => {
                    warn!("{} Skipping its floor and ceiling.", error);
                    stats.skipped_sectors += 1;
                    continue;
                }
            };
            for &triangle in &triangles {
                let solid = flats.build(
                    triangle,
                    sector.floor_height,
                    Cap::Floor,
                    sector.floor_texture,
                );
                writer.write_solid(&solid);
                stats.floors += 1;
            }
            for &triangle in &triangles {
                let solid = flats.build(
                    triangle,
                    sector.ceiling_height,
                    Cap::Ceiling,
                    sector.ceiling_texture,
                );
                writer.write_solid(&solid);
                stats.ceilings += 1;
            }
        }

        info!("Converted level '{}':", level.name);
        info!("    {:4} walls", stats.walls);
        info!("    {:4} floors", stats.floors);
        info!("    {:4} ceilings", stats.ceilings);
        if stats.skipped_lines > 0 || stats.skipped_sectors > 0 {
            warn!(
                "    {} linedefs and {} sectors skipped",
                stats.skipped_lines, stats.skipped_sectors
            );
        }
        debug_assert_eq!(writer.num_brushes(), stats.brushes());

        ConvertedLevel {
            name: level.name,
            map: writer.finish(),
            stats,
        }
    }
}

fn heights(sector: &Sector) -> Heights {
    Heights {
        floor: sector.floor_height,
        ceiling: sector.ceiling_height,
    }
}

/// A linedef's endpoints with its sides and their sectors, all references checked.
struct LineSides<'a> {
    start: Pnt2f,
    end: Pnt2f,
    front: (&'a Sidedef, &'a Sector),
    back: Option<(&'a Sidedef, &'a Sector)>,
}

impl<'a> LineSides<'a> {
    fn resolve(level: &'a Level, index: usize, linedef: &WadLinedef) -> Option<Self> {
        let (start, end) = match level.linedef_vertices(linedef) {
            Some(vertices) => vertices,
            None => {
                warn!("Linedef {} has an invalid vertex, skipping.", index);
                return None;
            }
        };
        let front = match side_and_sector(level, level.front_sidedef(linedef)) {
            Some(front) => front,
            None => {
                warn!("Linedef {} has an invalid front side, skipping.", index);
                return None;
            }
        };
        let back = match linedef.back_sidedef_index() {
            None => None,
            Some(_) => {
                let back = side_and_sector(level, level.back_sidedef(linedef));
                if back.is_none() {
                    warn!(
                        "Linedef {} has an invalid back side, treating it as one-sided.",
                        index
                    );
                }
                back
            }
        };
        Some(LineSides {
            start,
            end,
            front,
            back,
        })
    }
}

fn side_and_sector<'a>(
    level: &'a Level,
    side: Option<&'a Sidedef>,
) -> Option<(&'a Sidedef, &'a Sector)> {
    let side = side?;
    level.sidedef_sector(side).map(|sector| (side, sector))
}
