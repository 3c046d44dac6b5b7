// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Bounds-checked reader over device response bytes

use crate::Error;

/// Read cursor over an immutable byte slice.
///
/// Reads past the end of the slice fail with [Error::TruncatedResponse]
/// rather than panicking.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buff: &'a [u8],
    index: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `buff`
    pub fn new(buff: &'a [u8]) -> Self {
        Self { buff, index: 0 }
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buff.len() - self.index
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let b = *self.buff.get(self.index).ok_or(Error::TruncatedResponse)?;
        self.index += 1;
        Ok(b)
    }

    /// Read `n` bytes
    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < n {
            return Err(Error::TruncatedResponse);
        }

        let d = &self.buff[self.index..][..n];
        self.index += n;
        Ok(d)
    }

    /// Skip `n` bytes
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.read_slice(n).map(|_| ())
    }

    /// Read a big-endian integer of up to 32 bytes, right-aligned into a
    /// 32-byte buffer.
    ///
    /// Leading bytes beyond 32 (DER sign-extension padding) are skipped.
    pub fn read_scalar(&mut self, len: usize) -> Result<[u8; 32], Error> {
        let mut s = [0u8; 32];

        if len > 32 {
            self.skip(len - 32)?;
        }

        let n = len.min(32);
        let d = self.read_slice(n)?;
        s[32 - n..].copy_from_slice(d);

        Ok(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_bounds() {
        let mut c = Cursor::new(&[1, 2, 3]);

        assert_eq!(c.read_u8(), Ok(1));
        assert_eq!(c.read_slice(2), Ok(&[2u8, 3][..]));
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.read_u8(), Err(Error::TruncatedResponse));
        assert_eq!(c.read_slice(1), Err(Error::TruncatedResponse));
    }

    #[test]
    fn scalar_padding() {
        // Short values are left-padded with zeros
        let mut c = Cursor::new(&[0xaa, 0xbb]);
        let s = c.read_scalar(2).unwrap();
        assert_eq!(&s[..30], &[0u8; 30]);
        assert_eq!(&s[30..], &[0xaa, 0xbb]);

        // Long values have leading bytes dropped
        let mut d = [0x11u8; 34];
        d[0] = 0x00;
        let mut c = Cursor::new(&d);
        assert_eq!(c.read_scalar(33), Ok([0x11u8; 32]));
        assert_eq!(c.remaining(), 1);
    }
}
