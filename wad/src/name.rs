use super::errors::{ErrorKind, Result};
use failchain::{bail, ensure};
use serde::de::{Deserialize, Deserializer};
use std::borrow::Borrow;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::ops::Deref;
use std::result::Result as StdResult;
use std::str::FromStr;

/// An eight byte, NUL-padded lump or texture name.
///
/// Names are compared byte for byte, so lookups are case-sensitive. Names read from a container
/// are kept verbatim (only the bytes after the first NUL are cleared); names supplied by a user
/// must be printable ASCII.
#[derive(Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash, Default)]
pub struct WadName([u8; 8]);

impl WadName {
    pub fn from_raw(raw: [u8; 8]) -> WadName {
        let mut name = [0u8; 8];
        for (dest, &src) in name.iter_mut().zip(raw.iter()) {
            if src == 0 {
                break;
            }
            *dest = src;
        }
        WadName(name)
    }

    pub fn from_bytes(value: &[u8]) -> Result<WadName> {
        let mut name = [0u8; 8];
        let mut length = 0;
        for &src in value {
            if src == 0 {
                return Ok(WadName(name));
            }
            if !src.is_ascii_graphic() {
                bail!(ErrorKind::invalid_byte_in_wad_name(src, value));
            }
            ensure!(length < name.len(), ErrorKind::wad_name_too_long(value));
            name[length] = src;
            length += 1;
        }
        Ok(WadName(name))
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl FromStr for WadName {
    type Err = super::errors::Error;
    fn from_str(value: &str) -> Result<WadName> {
        WadName::from_bytes(value.as_bytes())
    }
}

impl Display for WadName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", String::from_utf8_lossy(self.trimmed()))
    }
}

impl Deref for WadName {
    type Target = [u8; 8];
    fn deref(&self) -> &[u8; 8] {
        &self.0
    }
}

impl Debug for WadName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "WadName({:?})",
            String::from_utf8_lossy(self.trimmed())
        )
    }
}

impl PartialEq<[u8; 8]> for WadName {
    fn eq(&self, rhs: &[u8; 8]) -> bool {
        self.deref() == rhs
    }
}

impl Borrow<[u8; 8]> for WadName {
    fn borrow(&self) -> &[u8; 8] {
        self.deref()
    }
}

impl<'de> Deserialize<'de> for WadName {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(WadName::from_raw(<[u8; 8]>::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod test {
    use super::WadName;
    use std::str::FromStr;

    #[test]
    fn test_wad_name() {
        assert_eq!(&WadName::from_str("").unwrap(), b"\0\0\0\0\0\0\0\0");
        assert_eq!(&WadName::from_str("\0").unwrap(), b"\0\0\0\0\0\0\0\0");
        assert_eq!(
            &WadName::from_str("\01234567").unwrap(),
            b"\0\0\0\0\0\0\0\0"
        );
        assert_eq!(&WadName::from_str("A").unwrap(), b"A\0\0\0\0\0\0\0");
        assert_eq!(&WadName::from_str("e1m1").unwrap(), b"e1m1\0\0\0\0");
        assert_eq!(&WadName::from_str("1234567").unwrap(), b"1234567\0");
        assert_eq!(&WadName::from_str("12345678").unwrap(), b"12345678");
        assert_eq!(&WadName::from_str("123\05678").unwrap(), b"123\0\0\0\0\0");
        assert_eq!(&WadName::from_str("-").unwrap(), b"-\0\0\0\0\0\0\0");

        assert!(WadName::from_bytes(b"123456789").is_err());
        assert!(WadName::from_bytes(b"1234\xfb").is_err());
        assert!(WadName::from_bytes(b"\xff123").is_err());
        assert!(WadName::from_bytes(b"AB CD").is_err());
        assert!(WadName::from_bytes(b"123456789\0").is_err());
    }

    #[test]
    fn raw_names_are_kept_verbatim() {
        let name = WadName::from_raw(*b"STEP1\0zz");
        assert_eq!(&name, b"STEP1\0\0\0");
        assert_eq!(name.to_string(), "STEP1");
        assert_ne!(name, WadName::from_str("step1").unwrap());
        assert!(WadName::from_raw([0; 8]).is_empty());
    }
}
