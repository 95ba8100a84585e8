use super::archive::{Archive, LumpReader};
use super::errors::{ErrorKind, Result};
use super::transform::Transform;
use super::types::{LightLevel, SectorTag, SectorType, WadLinedef, WadName};
use super::types::{WadSector, WadSidedef, WadVertex};
use failchain::ensure;
use log::{info, warn};
use math::Pnt2f;
use std::convert::TryFrom;
use std::vec::Vec;

const THINGS_OFFSET: usize = 1;
const LINEDEFS_OFFSET: usize = 2;
const SIDEDEFS_OFFSET: usize = 3;
const VERTICES_OFFSET: usize = 4;
// Segs, subsectors and nodes (offsets 5 to 7) are not needed.
const SECTORS_OFFSET: usize = 8;

/// A sidedef with its offsets already mapped through the level's `Transform`.
#[derive(Copy, Clone, Debug)]
pub struct Sidedef {
    pub x_offset: f32,
    pub y_offset: f32,
    pub upper_texture: WadName,
    pub lower_texture: WadName,
    pub middle_texture: WadName,
    /// Index into `Level::sectors`. A negative index in the file becomes `usize::MAX`, so it never
    /// resolves to a sector.
    pub sector: usize,
}

/// A sector with its heights already mapped through the level's `Transform`.
#[derive(Copy, Clone, Debug)]
pub struct Sector {
    pub floor_height: f32,
    pub ceiling_height: f32,
    pub floor_texture: WadName,
    pub ceiling_texture: WadName,
    pub light: LightLevel,
    pub sector_type: SectorType,
    pub tag: SectorTag,
}

pub struct Level {
    pub name: WadName,
    pub transform: Transform,
    pub vertices: Vec<Pnt2f>,
    pub linedefs: Vec<WadLinedef>,
    pub sidedefs: Vec<Sidedef>,
    pub sectors: Vec<Sector>,
}

impl Level {
    pub fn from_archive(wad: &Archive, name: &str, transform: &Transform) -> Result<Level> {
        let lump = wad.level_by_name(name)?;
        let name = lump.name();
        info!("Reading level data for '{}'...", name);
        let start_index = lump.index();
        let role_lump =
            |offset: usize, role: &str| level_lump(wad, &name, start_index + offset, role);

        let things = role_lump(THINGS_OFFSET, "THINGS")?;
        if &things.name() != b"THINGS\0\0" {
            warn!("Level '{}' has lump `{}` in the THINGS slot.", name, things.name());
        }
        let vertices: Vec<WadVertex> = role_lump(VERTICES_OFFSET, "VERTEXES")?.decode_vec()?;
        let linedefs: Vec<WadLinedef> = role_lump(LINEDEFS_OFFSET, "LINEDEFS")?.decode_vec()?;
        let sidedefs: Vec<WadSidedef> = role_lump(SIDEDEFS_OFFSET, "SIDEDEFS")?.decode_vec()?;
        let sectors: Vec<WadSector> = role_lump(SECTORS_OFFSET, "SECTORS")?.decode_vec()?;

        info!("Loaded level '{}':", name);
        info!("    {:4} linedefs", linedefs.len());
        info!("    {:4} sidedefs", sidedefs.len());
        info!("    {:4} vertices", vertices.len());
        info!("    {:4} sectors", sectors.len());

        Ok(Level {
            name,
            transform: *transform,
            vertices: vertices
                .iter()
                .map(|v| transform.vertex(v.x, v.y))
                .collect(),
            linedefs,
            sidedefs: sidedefs
                .iter()
                .map(|side| Sidedef {
                    x_offset: transform.x_offset(side.x_offset),
                    y_offset: transform.y_offset(side.y_offset),
                    upper_texture: side.upper_texture,
                    lower_texture: side.lower_texture,
                    middle_texture: side.middle_texture,
                    sector: usize::try_from(side.sector).unwrap_or(usize::MAX),
                })
                .collect(),
            sectors: sectors
                .iter()
                .map(|sector| Sector {
                    floor_height: transform.height(sector.floor_height),
                    ceiling_height: transform.height(sector.ceiling_height),
                    floor_texture: sector.floor_texture,
                    ceiling_texture: sector.ceiling_texture,
                    light: sector.light,
                    sector_type: sector.sector_type,
                    tag: sector.tag,
                })
                .collect(),
        })
    }

    pub fn vertex(&self, index: usize) -> Option<Pnt2f> {
        self.vertices.get(index).cloned()
    }

    pub fn linedef_vertices(&self, linedef: &WadLinedef) -> Option<(Pnt2f, Pnt2f)> {
        if let (Some(v1), Some(v2)) = (
            self.vertex(linedef.start_vertex as usize),
            self.vertex(linedef.end_vertex as usize),
        ) {
            Some((v1, v2))
        } else {
            None
        }
    }

    pub fn front_sidedef(&self, linedef: &WadLinedef) -> Option<&Sidedef> {
        linedef
            .front_sidedef_index()
            .and_then(|index| self.sidedefs.get(index))
    }

    pub fn back_sidedef(&self, linedef: &WadLinedef) -> Option<&Sidedef> {
        linedef
            .back_sidedef_index()
            .and_then(|index| self.sidedefs.get(index))
    }

    pub fn sidedef_sector(&self, sidedef: &Sidedef) -> Option<&Sector> {
        self.sectors.get(sidedef.sector)
    }
}

fn level_lump<'a>(
    wad: &'a Archive,
    level: &WadName,
    index: usize,
    role: &str,
) -> Result<LumpReader<'a>> {
    ensure!(
        index < wad.num_lumps(),
        ErrorKind::missing_level_lump(level, role, index, wad.num_lumps())
    );
    wad.lump_by_index(index)
}

#[cfg(test)]
mod test {
    use super::{Level, SIDEDEFS_OFFSET};
    use crate::archive::Archive;
    use crate::errors::ErrorKind;
    use crate::transform::Transform;
    use byteorder::{LittleEndian, WriteBytesExt};
    use math::Pnt2f;

    fn build_wad(tag: &[u8; 4], lumps: &[(&[u8; 8], Vec<u8>)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        let data_len: usize = lumps.iter().map(|(_, data)| data.len()).sum();
        bytes.extend_from_slice(tag);
        bytes.write_i32::<LittleEndian>(lumps.len() as i32).unwrap();
        bytes.write_i32::<LittleEndian>(12 + data_len as i32).unwrap();
        let mut offsets = Vec::new();
        for (_, data) in lumps {
            offsets.push(bytes.len() as i32);
            bytes.extend_from_slice(data);
        }
        for ((name, data), offset) in lumps.iter().zip(offsets) {
            bytes.write_i32::<LittleEndian>(offset).unwrap();
            bytes.write_i32::<LittleEndian>(data.len() as i32).unwrap();
            bytes.extend_from_slice(*name);
        }
        bytes
    }

    fn level_lumps(sector_bytes: Vec<u8>) -> Vec<(&'static [u8; 8], Vec<u8>)> {
        let mut vertices = Vec::new();
        for &(x, y) in &[(0i16, 0i16), (64, 0), (64, -64)] {
            vertices.write_i16::<LittleEndian>(x).unwrap();
            vertices.write_i16::<LittleEndian>(y).unwrap();
        }
        let mut linedefs = Vec::new();
        for &value in &[0u16, 1, 0x0010, 0, 0, 0, 0xFFFF] {
            linedefs.write_u16::<LittleEndian>(value).unwrap();
        }
        let mut sidedefs = Vec::new();
        sidedefs.write_i16::<LittleEndian>(16).unwrap();
        sidedefs.write_i16::<LittleEndian>(-8).unwrap();
        sidedefs.extend_from_slice(b"-\0\0\0\0\0\0\0");
        sidedefs.extend_from_slice(b"-\0\0\0\0\0\0\0");
        sidedefs.extend_from_slice(b"STARTAN3");
        sidedefs.write_u16::<LittleEndian>(0).unwrap();

        vec![
            (b"E1M1\0\0\0\0", vec![]),
            (b"THINGS\0\0", vec![]),
            (b"LINEDEFS", linedefs),
            (b"SIDEDEFS", sidedefs),
            (b"VERTEXES", vertices),
            (b"SEGS\0\0\0\0", vec![]),
            (b"SSECTORS", vec![]),
            (b"NODES\0\0\0", vec![]),
            (b"SECTORS\0", sector_bytes),
        ]
    }

    fn sector_bytes() -> Vec<u8> {
        let mut sectors = Vec::new();
        sectors.write_i16::<LittleEndian>(-16).unwrap();
        sectors.write_i16::<LittleEndian>(128).unwrap();
        sectors.extend_from_slice(b"FLOOR4_8");
        sectors.extend_from_slice(b"CEIL3_5\0");
        sectors.write_i16::<LittleEndian>(160).unwrap();
        sectors.write_i16::<LittleEndian>(0).unwrap();
        sectors.write_i16::<LittleEndian>(0).unwrap();
        sectors
    }

    #[test]
    fn decodes_and_transforms_level() {
        let wad = Archive::from_bytes(build_wad(b"IWAD", &level_lumps(sector_bytes()))).unwrap();
        assert_eq!(wad.num_levels(), 1);

        let transform = Transform {
            xy_downscale: 2.0,
            z_downscale: 4.0,
            x_shift: 10.0,
            y_shift: -10.0,
        };
        let level = Level::from_archive(&wad, "E1M1", &transform).unwrap();
        assert_eq!(level.vertices.len(), 3);
        assert_eq!(level.vertices[1], Pnt2f::new(37.0, -5.0));

        let linedef = &level.linedefs[0];
        assert!(linedef.lower_unpegged());
        assert!(!linedef.upper_unpegged());
        assert_eq!(linedef.back_sidedef_index(), None);

        let side = level.front_sidedef(linedef).unwrap();
        assert_eq!(side.x_offset, 8.0);
        assert_eq!(side.y_offset, -2.0);
        assert_eq!(&side.middle_texture, b"STARTAN3");

        let sector = level.sidedef_sector(side).unwrap();
        assert_eq!(sector.floor_height, -4.0);
        assert_eq!(sector.ceiling_height, 32.0);
        assert_eq!(&sector.ceiling_texture, b"CEIL3_5\0");
    }

    #[test]
    fn rejects_unknown_tag() {
        let error = Archive::from_bytes(build_wad(b"ZWAD", &level_lumps(sector_bytes())))
            .unwrap_err();
        match error.kind() {
            ErrorKind::Format(_) => {}
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn level_names_are_case_sensitive() {
        let wad = Archive::from_bytes(build_wad(b"PWAD", &level_lumps(sector_bytes()))).unwrap();
        let error = Level::from_archive(&wad, "e1m1", &Transform::identity())
            .err()
            .expect("lowercase level name should not match");
        match error.kind() {
            ErrorKind::UnknownLevel(name) => assert_eq!(name, "e1m1"),
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn overlong_level_name_is_unknown_level() {
        let wad = Archive::from_bytes(build_wad(b"IWAD", &level_lumps(sector_bytes()))).unwrap();
        let error = Level::from_archive(&wad, "E1M1TOOLONG", &Transform::identity())
            .err()
            .expect("a nine byte name cannot name a level");
        match error.kind() {
            ErrorKind::UnknownLevel(name) => assert_eq!(name, "E1M1TOOLONG"),
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn negative_sidedef_sector_does_not_resolve() {
        let mut lumps = level_lumps(sector_bytes());
        let sidedefs = &mut lumps[SIDEDEFS_OFFSET].1;
        sidedefs[28] = 0xff;
        sidedefs[29] = 0xff;
        let wad = Archive::from_bytes(build_wad(b"IWAD", &lumps)).unwrap();
        let level = Level::from_archive(&wad, "E1M1", &Transform::identity()).unwrap();

        let side = level.front_sidedef(&level.linedefs[0]).unwrap();
        assert_eq!(side.sector, usize::MAX);
        assert!(level.sidedef_sector(side).is_none());
    }

    #[test]
    fn huge_lump_count_is_out_of_bounds() {
        let mut bytes = b"IWAD".to_vec();
        bytes.write_i32::<LittleEndian>(i32::max_value()).unwrap();
        bytes.write_i32::<LittleEndian>(12).unwrap();
        match Archive::from_bytes(bytes).unwrap_err().kind() {
            ErrorKind::OutOfBounds { what, .. } => assert_eq!(what, "lump directory"),
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn truncated_buffer_is_out_of_bounds() {
        let mut bytes = build_wad(b"IWAD", &level_lumps(sector_bytes()));
        bytes.truncate(bytes.len() - 4);
        match Archive::from_bytes(bytes).unwrap_err().kind() {
            ErrorKind::OutOfBounds { .. } => {}
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn lump_past_buffer_is_out_of_bounds() {
        let mut bytes = build_wad(b"IWAD", &level_lumps(sector_bytes()));
        // Directory entry 8 (SECTORS) starts at `len - 16`; grow its size field.
        let size_at = bytes.len() - 12;
        bytes[size_at] = 0xff;
        bytes[size_at + 1] = 0x7f;
        let wad = Archive::from_bytes(bytes).unwrap();
        let error = Level::from_archive(&wad, "E1M1", &Transform::identity())
            .err()
            .expect("sector lump should be out of bounds");
        match error.kind() {
            ErrorKind::OutOfBounds { .. } => {}
            kind => panic!("unexpected error {:?}", kind),
        }
    }
}
