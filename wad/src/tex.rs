use super::archive::{decode_at, Archive};
use super::errors::{ErrorKind, Result};
use super::types::{WadName, WadRecord, WadTextureHeader};
use byteorder::{LittleEndian, ReadBytesExt};
use failchain::{ensure, ResultExt};
use indexmap::IndexMap;
use log::{error, info};
use std::mem;

/// Texel dimensions of a wall texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextureSize {
    pub width: u16,
    pub height: u16,
}

/// Looks up the texel dimensions of a texture by name; a miss is not an error.
pub trait TextureMetrics {
    fn lookup(&self, name: &WadName) -> Option<TextureSize>;
}

impl TextureMetrics for IndexMap<WadName, TextureSize> {
    fn lookup(&self, name: &WadName) -> Option<TextureSize> {
        self.get(name).cloned()
    }
}

/// Texture sizes read from the `maptexture` headers in `TEXTURE1` and `TEXTURE2`. Patches are
/// never read or composited.
#[derive(Debug, Default)]
pub struct TextureDirectory {
    sizes: IndexMap<WadName, TextureSize>,
}

impl TextureDirectory {
    pub fn from_archive(wad: &Archive) -> Result<TextureDirectory> {
        info!("Reading texture directory...");
        let mut sizes = IndexMap::new();
        for &lump_name in TEXTURE_LUMP_NAMES {
            let lump = match wad.named_lump(lump_name)? {
                Some(lump) => lump,
                None => {
                    info!("     0 textures in {}", String::from_utf8_lossy(lump_name));
                    continue;
                }
            };
            let num_textures = read_texture_sizes(lump.bytes()?, &mut sizes)?;
            info!(
                "  {:4} textures in {}",
                num_textures,
                String::from_utf8_lossy(lump_name)
            );
        }
        Ok(TextureDirectory { sizes })
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl TextureMetrics for TextureDirectory {
    fn lookup(&self, name: &WadName) -> Option<TextureSize> {
        self.sizes.lookup(name)
    }
}

fn read_texture_sizes(
    lump_buffer: &[u8],
    sizes: &mut IndexMap<WadName, TextureSize>,
) -> Result<usize> {
    let mut lump = lump_buffer;
    let num_textures = lump
        .read_u32::<LittleEndian>()
        .chain_err(|| ErrorKind::out_of_bounds("texture count", 0, 4, lump_buffer.len()))?
        as usize;

    let offsets_end = num_textures
        .checked_mul(mem::size_of::<u32>())
        .unwrap_or(usize::max_value());
    ensure!(
        offsets_end <= lump.len(),
        ErrorKind::out_of_bounds("texture offsets", 4, offsets_end as i64, lump_buffer.len())
    );
    let mut offsets = &lump[..offsets_end];

    let mut num_read = 0;
    for i_texture in 0..num_textures {
        let offset = offsets
            .read_u32::<LittleEndian>()
            .chain_err(|| ErrorKind::out_of_bounds("texture offset", 4, 4, lump_buffer.len()))?
            as usize;
        let header: WadTextureHeader = match decode_at(
            lump_buffer,
            offset,
            WadTextureHeader::SIZE,
            format!("texture header {}", i_texture),
        ) {
            Ok(header) => header,
            Err(e) => {
                error!(
                    "Skipping texture {}: could not read header: {}",
                    i_texture, e
                );
                continue;
            }
        };
        sizes.insert(
            header.name,
            TextureSize {
                width: header.width,
                height: header.height,
            },
        );
        num_read += 1;
    }
    Ok(num_read)
}

const TEXTURE_LUMP_NAMES: &[&[u8; 8]] = &[b"TEXTURE1", b"TEXTURE2"];

#[cfg(test)]
mod test {
    use super::{read_texture_sizes, TextureMetrics, TextureSize};
    use crate::types::WadName;
    use byteorder::{LittleEndian, WriteBytesExt};
    use indexmap::IndexMap;

    fn texture_header(bytes: &mut Vec<u8>, name: &[u8; 8], width: u16, height: u16) {
        bytes.extend_from_slice(name);
        bytes.write_u32::<LittleEndian>(0).unwrap();
        bytes.write_u16::<LittleEndian>(width).unwrap();
        bytes.write_u16::<LittleEndian>(height).unwrap();
        bytes.write_u32::<LittleEndian>(0).unwrap();
        bytes.write_u16::<LittleEndian>(0).unwrap();
    }

    #[test]
    fn reads_texture_sizes() {
        let mut lump = Vec::new();
        lump.write_u32::<LittleEndian>(2).unwrap();
        lump.write_u32::<LittleEndian>(12).unwrap();
        lump.write_u32::<LittleEndian>(34).unwrap();
        texture_header(&mut lump, b"STARTAN3", 128, 128);
        texture_header(&mut lump, b"DOOR3\0\0\0", 64, 72);

        let mut sizes = IndexMap::new();
        assert_eq!(read_texture_sizes(&lump, &mut sizes).unwrap(), 2);
        assert_eq!(
            sizes.lookup(&WadName::from_raw(*b"DOOR3\0\0\0")),
            Some(TextureSize {
                width: 64,
                height: 72
            })
        );
        assert_eq!(sizes.lookup(&WadName::from_raw(*b"NOPE\0\0\0\0")), None);
    }

    #[test]
    fn skips_truncated_headers() {
        let mut lump = Vec::new();
        lump.write_u32::<LittleEndian>(2).unwrap();
        lump.write_u32::<LittleEndian>(12).unwrap();
        lump.write_u32::<LittleEndian>(500).unwrap();
        texture_header(&mut lump, b"STARTAN3", 128, 128);

        let mut sizes = IndexMap::new();
        assert_eq!(read_texture_sizes(&lump, &mut sizes).unwrap(), 1);
    }

    #[test]
    fn rejects_truncated_offsets() {
        let mut lump = Vec::new();
        lump.write_u32::<LittleEndian>(100).unwrap();
        let mut sizes = IndexMap::new();
        assert!(read_texture_sizes(&lump, &mut sizes).is_err());
    }
}
