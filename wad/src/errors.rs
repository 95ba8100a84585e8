use failchain::{BoxedError, ChainErrorKind};
use failure::Fail;
use std::fmt::Display;
use std::result::Result as StdResult;

pub type Error = BoxedError<ErrorKind>;
pub type Result<T> = StdResult<T, Error>;

#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "Unrecognised container format: {}", _0)]
    Format(String),

    #[fail(
        display = "Read of {} at {} (len={}) is out of bounds (limit={}).",
        what, offset, len, limit
    )]
    OutOfBounds {
        what: String,
        offset: i64,
        len: i64,
        limit: usize,
    },

    #[fail(display = "No level named `{}` in container.", _0)]
    UnknownLevel(String),

    #[fail(display = "Invalid lump name: {}", _0)]
    InvalidName(String),

    #[fail(display = "I/O WAD error: {}", _0)]
    Io(String),
}

impl ChainErrorKind for ErrorKind {
    type Error = Error;
}

impl ErrorKind {
    pub(crate) fn invalid_byte_in_wad_name(byte: u8, bytes: &[u8]) -> Self {
        ErrorKind::InvalidName(format!(
            "Invalid character `{}` in wad name `{}`.",
            char::from(byte),
            String::from_utf8_lossy(bytes),
        ))
    }

    pub(crate) fn wad_name_too_long(bytes: &[u8]) -> Self {
        ErrorKind::InvalidName(format!(
            "Wad name too long `{}`.",
            String::from_utf8_lossy(bytes)
        ))
    }

    pub(crate) fn bad_wad_header_identifier(identifier: &[u8]) -> Self {
        ErrorKind::Format(format!(
            "Invalid header identifier `{}`, expected IWAD or PWAD.",
            String::from_utf8_lossy(identifier)
        ))
    }

    pub(crate) fn on_file_open() -> Self {
        ErrorKind::Io("Failed to read file.".to_owned())
    }

    pub(crate) fn out_of_bounds<WhatT: Into<String>>(
        what: WhatT,
        offset: i64,
        len: i64,
        limit: usize,
    ) -> Self {
        ErrorKind::OutOfBounds {
            what: what.into(),
            offset,
            len,
            limit,
        }
    }

    pub(crate) fn missing_level_lump<NameT: Display>(
        level: &NameT,
        role: &str,
        index: usize,
        num_lumps: usize,
    ) -> Self {
        ErrorKind::OutOfBounds {
            what: format!("{} lump of level `{}` in directory", role, level),
            offset: index as i64,
            len: 1,
            limit: num_lumps,
        }
    }

    pub(crate) fn unknown_level<NameT: Display>(name: &NameT) -> Self {
        ErrorKind::UnknownLevel(name.to_string())
    }
}
