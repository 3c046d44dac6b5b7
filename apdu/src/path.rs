// Copyright (c) 2023 The ledger-tezos-rs Developers

//! BIP32 derivation paths and their frame encoding

use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use crate::Error;

/// Hardened derivation bit
pub const HARDENED: u32 = 0x8000_0000;

/// Maximum number of path segments (length is encoded in a single byte)
pub const MAX_PATH_SEGMENTS: usize = 255;

/// Default Tezos derivation path
pub const TEZOS_DEFAULT_PATH: &str = "44'/1729'/0'/0'";

/// BIP32 derivation path, segments are hardened-bit encoded
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   PATH_LEN    |          SEGMENT_0 (big-endian u32)           /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /               |                 SEGMENT_1...                  /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DevicePath(Vec<u32>);

impl DevicePath {
    /// Create a path from raw (already hardened-bit encoded) segments
    pub fn new(segments: &[u32]) -> Result<Self, Error> {
        if segments.is_empty() || segments.len() > MAX_PATH_SEGMENTS {
            return Err(Error::InvalidPath);
        }

        Ok(Self(segments.to_vec()))
    }

    /// Fetch path segments
    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Encode path as a frame payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buff = Vec::with_capacity(1 + self.0.len() * 4);

        buff.push(self.0.len() as u8);
        for s in &self.0 {
            buff.extend_from_slice(&s.to_be_bytes());
        }

        buff
    }
}

/// Parse paths of the form `m/44'/1729'/0'/0'`, where the `m/` prefix is
/// optional and hardened segments are marked with `'`, `h` or `H`
impl FromStr for DevicePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("m/").unwrap_or(s);

        let mut segments = Vec::new();
        for p in s.split('/') {
            let (v, hardened) = match p.strip_suffix(['\'', 'h', 'H']) {
                Some(v) => (v, true),
                None => (p, false),
            };

            if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidPath);
            }

            let v = u32::from_str(v).map_err(|_| Error::InvalidPath)?;
            if v & HARDENED != 0 {
                return Err(Error::InvalidPath);
            }

            segments.push(if hardened { v | HARDENED } else { v });
        }

        Self::new(&segments)
    }
}

impl fmt::Display for DevicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }

            match s & HARDENED != 0 {
                true => write!(f, "{}'", s & !HARDENED)?,
                false => write!(f, "{s}")?,
            }
        }
        Ok(())
    }
}
