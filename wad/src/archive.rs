use super::errors::{ErrorKind, Result};
use super::types::{WadInfo, WadLump, WadName, WadRecord, IWAD_HEADER, PWAD_HEADER, WAD_INFO_SIZE};
use failchain::{bail, ensure, ResultExt};
use indexmap::IndexMap;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::fs;
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;
use std::vec::Vec;

/// A decoded lump directory over a read-only, in-memory copy of a container.
#[derive(Debug)]
pub struct Archive {
    bytes: Vec<u8>,
    index_map: IndexMap<WadName, usize>,
    lumps: Vec<LumpInfo>,
    levels: Vec<usize>,
}

impl Archive {
    pub fn open<W>(wad_path: &W) -> Result<Archive>
    where
        W: AsRef<Path> + Debug,
    {
        info!("Loading wad file {:?}...", wad_path);
        let bytes = fs::read(wad_path).chain_err(ErrorKind::on_file_open)?;
        Archive::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Archive> {
        let header: WadInfo = decode_at(&bytes, 0, WAD_INFO_SIZE, "container header")?;
        ensure!(
            &header.identifier == IWAD_HEADER || &header.identifier == PWAD_HEADER,
            ErrorKind::bad_wad_header_identifier(&header.identifier)
        );
        ensure!(
            header.num_lumps >= 0 && header.info_table_offset >= 0,
            ErrorKind::out_of_bounds(
                "lump directory",
                i64::from(header.info_table_offset),
                i64::from(header.num_lumps),
                bytes.len(),
            )
        );

        // Read lump info.
        let num_lumps = header.num_lumps as usize;
        let table_offset = header.info_table_offset as usize;
        let table_end = num_lumps
            .checked_mul(WadLump::SIZE)
            .and_then(|table_len| table_len.checked_add(table_offset));
        ensure!(
            table_end.map_or(false, |end| end <= bytes.len()),
            ErrorKind::out_of_bounds(
                "lump directory",
                i64::from(header.info_table_offset),
                i64::from(header.num_lumps) * WadLump::SIZE as i64,
                bytes.len(),
            )
        );
        let mut lumps = Vec::with_capacity(num_lumps);
        let mut levels = Vec::with_capacity(64);
        let mut index_map = IndexMap::new();
        for i_lump in 0..num_lumps {
            let fileinfo: WadLump = decode_at(
                &bytes,
                table_offset + i_lump * WadLump::SIZE,
                WadLump::SIZE,
                "lump directory entry",
            )?;

            index_map.insert(fileinfo.name, lumps.len());
            lumps.push(LumpInfo {
                name: fileinfo.name,
                offset: i64::from(fileinfo.file_pos),
                size: i64::from(fileinfo.size),
            });

            // Our heuristic for level lumps is that they are preceeded by the "THINGS"
            // lump.
            if &fileinfo.name == b"THINGS\0\0" {
                if i_lump > 0 {
                    levels.push(i_lump - 1);
                } else {
                    warn!("THINGS lump at the start of the directory, ignoring.");
                }
            }
        }
        info!("  {:4} lumps", lumps.len());
        info!("  {:4} levels", levels.len());

        Ok(Archive {
            bytes,
            index_map,
            lumps,
            levels,
        })
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn num_lumps(&self) -> usize {
        self.lumps.len()
    }

    pub fn level_names(&self) -> Vec<WadName> {
        self.levels
            .iter()
            .map(|&index| self.lumps[index].name)
            .collect()
    }

    /// Finds a level header by exact, case-sensitive name. A name that could never be a lump
    /// name (too long, or not printable ASCII) is just another unknown level.
    pub fn level_by_name(&self, name: &str) -> Result<LumpReader> {
        let index = WadName::from_str(name).ok().and_then(|wad_name| {
            self.levels
                .iter()
                .cloned()
                .find(|&index| self.lumps[index].name == wad_name)
        });
        match index {
            Some(index) => self.lump_by_index(index),
            None => bail!(ErrorKind::unknown_level(&name)),
        }
    }

    pub fn named_lump<Q>(&self, name: &Q) -> Result<Option<LumpReader>>
    where
        WadName: Borrow<Q>,
        Q: Hash + Eq,
    {
        match self.index_map.get(name) {
            Some(&index) => self.lump_by_index(index).map(Some),
            None => Ok(None),
        }
    }

    pub fn lump_by_index(&self, index: usize) -> Result<LumpReader> {
        Ok(LumpReader {
            archive: self,
            info: self.lumps.get(index).ok_or_else(|| {
                ErrorKind::out_of_bounds("lump", index as i64, 1, self.lumps.len())
            })?,
            index,
        })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct LumpReader<'a> {
    archive: &'a Archive,
    info: &'a LumpInfo,
    index: usize,
}

impl<'a> LumpReader<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> WadName {
        self.info.name
    }

    /// Decodes as many whole records as fit in the lump; a trailing partial record is ignored.
    pub fn decode_vec<T: DeserializeOwned + WadRecord>(&self) -> Result<Vec<T>> {
        let LumpReader { info, index, .. } = *self;
        let bytes = self.bytes()?;
        let num_elements = bytes.len() / T::SIZE;
        if bytes.len() % T::SIZE != 0 {
            warn!(
                "Lump `{}` (index={}) has {} trailing bytes after {} records.",
                info.name,
                index,
                bytes.len() % T::SIZE,
                num_elements
            );
        }
        (0..num_elements)
            .map(|i_element| {
                decode_at(
                    bytes,
                    i_element * T::SIZE,
                    T::SIZE,
                    format!("element {} in lump `{}`", i_element, info.name),
                )
            })
            .collect()
    }

    pub fn bytes(&self) -> Result<&'a [u8]> {
        let LumpReader { info, archive, .. } = *self;
        let buffer_len = archive.bytes.len();
        ensure!(
            info.offset >= 0 && info.size >= 0 && info.offset + info.size <= buffer_len as i64,
            ErrorKind::out_of_bounds(
                format!("lump `{}`", info.name),
                info.offset,
                info.size,
                buffer_len
            )
        );
        let start = info.offset as usize;
        Ok(&archive.bytes[start..start + info.size as usize])
    }
}

#[derive(Copy, Clone, Debug)]
struct LumpInfo {
    name: WadName,
    offset: i64,
    size: i64,
}

/// Deserializes one fixed-size little-endian record at `offset`, failing if it would read past
/// the end of `bytes`.
pub(crate) fn decode_at<T, WhatT>(
    bytes: &[u8],
    offset: usize,
    size: usize,
    what: WhatT,
) -> Result<T>
where
    T: DeserializeOwned,
    WhatT: Into<String>,
{
    let what = what.into();
    let end = offset.checked_add(size).filter(|&end| end <= bytes.len());
    let end = match end {
        Some(end) => end,
        None => {
            return Err(
                ErrorKind::out_of_bounds(what, offset as i64, size as i64, bytes.len()).into(),
            )
        }
    };
    bincode::deserialize(&bytes[offset..end])
        .chain_err(|| ErrorKind::out_of_bounds(what, offset as i64, size as i64, bytes.len()))
}
