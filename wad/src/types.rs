pub use super::name::WadName;
use serde::Deserialize;

pub type LightLevel = i16;
pub type LinedefFlags = u16;
pub type SectorId = i16;
pub type SectorTag = u16;
pub type SectorType = u16;
pub type SidedefId = u16;
pub type SpecialType = u16;
pub type VertexId = u16;
pub type WadCoord = i16;

/// Sentinel sidedef index for a linedef without a back (or, invalidly, front) side.
pub const NO_SIDEDEF: SidedefId = 0xFFFF;

pub const IWAD_HEADER: &[u8; 4] = b"IWAD";
pub const PWAD_HEADER: &[u8; 4] = b"PWAD";

#[derive(Copy, Clone, Deserialize)]
pub struct WadInfo {
    pub identifier: [u8; 4],
    pub num_lumps: i32,
    pub info_table_offset: i32,
}

#[derive(Copy, Clone, Deserialize)]
pub struct WadLump {
    pub file_pos: i32,
    pub size: i32,
    pub name: WadName,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadVertex {
    pub x: WadCoord,
    pub y: WadCoord,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadLinedef {
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
    pub flags: LinedefFlags,
    pub special_type: SpecialType,
    pub sector_tag: SectorTag,
    pub front_side: SidedefId,
    pub back_side: SidedefId,
}

impl WadLinedef {
    pub fn upper_unpegged(&self) -> bool {
        self.flags & 0x0008 != 0
    }

    pub fn lower_unpegged(&self) -> bool {
        self.flags & 0x0010 != 0
    }

    pub fn front_sidedef_index(&self) -> Option<usize> {
        match self.front_side {
            NO_SIDEDEF => None,
            index => Some(index as usize),
        }
    }

    pub fn back_sidedef_index(&self) -> Option<usize> {
        match self.back_side {
            NO_SIDEDEF => None,
            index => Some(index as usize),
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadSidedef {
    pub x_offset: WadCoord,
    pub y_offset: WadCoord,
    pub upper_texture: WadName,
    pub lower_texture: WadName,
    pub middle_texture: WadName,
    pub sector: SectorId,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct WadSector {
    pub floor_height: WadCoord,
    pub ceiling_height: WadCoord,
    pub floor_texture: WadName,
    pub ceiling_texture: WadName,
    pub light: LightLevel,
    pub sector_type: SectorType,
    pub tag: SectorTag,
}

#[derive(Copy, Clone, Deserialize)]
pub struct WadTextureHeader {
    pub name: WadName,
    pub masked: u32,
    pub width: u16,
    pub height: u16,
    pub column_directory: u32,
    pub num_patches: u16,
}

pub const WAD_INFO_SIZE: usize = 12;
pub const WAD_LUMP_SIZE: usize = 16;
pub const WAD_VERTEX_SIZE: usize = 4;
pub const WAD_LINEDEF_SIZE: usize = 14;
pub const WAD_SIDEDEF_SIZE: usize = 30;
pub const WAD_SECTOR_SIZE: usize = 26;
pub const WAD_TEXTURE_HEADER_SIZE: usize = 22;

/// Fixed on-disk size of a record type; `mem::size_of` would include padding.
pub trait WadRecord {
    const SIZE: usize;
}

impl WadRecord for WadVertex {
    const SIZE: usize = WAD_VERTEX_SIZE;
}

impl WadRecord for WadLinedef {
    const SIZE: usize = WAD_LINEDEF_SIZE;
}

impl WadRecord for WadSidedef {
    const SIZE: usize = WAD_SIDEDEF_SIZE;
}

impl WadRecord for WadSector {
    const SIZE: usize = WAD_SECTOR_SIZE;
}

impl WadRecord for WadLump {
    const SIZE: usize = WAD_LUMP_SIZE;
}

impl WadRecord for WadTextureHeader {
    const SIZE: usize = WAD_TEXTURE_HEADER_SIZE;
}
