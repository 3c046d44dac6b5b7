// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Operation signing APDUs.
//!
//! Signing is streamed over multiple frames, the device accumulates state
//! across the sequence so frames _must_ be sent in order with no other
//! command interleaved. Only the response to the final frame carries the
//! signature, earlier responses are acknowledgements.

use alloc::vec::Vec;

use encdec::DecodeOwned;

use crate::{
    cursor::Cursor, ChunkMarker, CommandFrame, Curve, DevicePath, Error, Instruction,
    MAX_CHUNK_LEN, STATUS_WORD_LEN,
};

/// Watermark for generic Tezos operations
pub const GENERIC_OPERATION_WATERMARK: u8 = 0x03;

/// DER `SEQUENCE` frame types accepted from the device
const DER_FRAME_TYPES: [u8; 2] = [0x30, 0x31];

/// DER `INTEGER` tag
const DER_INTEGER: u8 = 0x02;

/// Prefix an operation with the generic operation watermark
pub fn watermark(operation: &[u8]) -> Vec<u8> {
    let mut d = Vec::with_capacity(1 + operation.len());
    d.push(GENERIC_OPERATION_WATERMARK);
    d.extend_from_slice(operation);
    d
}

/// Operation signing request
///
/// Produces a path frame followed by one or more data frames:
///
/// ```text
///  CLA   INS   P1    P2      PAYLOAD
/// +-----+-----+-----+-------+------------------------------------+
/// | 80  | 04  | 00  | CURVE | DERIVATION_PATH                    |
/// +-----+-----+-----+-------+------------------------------------+
/// | 80  | 04  | 01  | CURVE | CHUNK (230 bytes)                  |  (repeated)
/// +-----+-----+-----+-------+------------------------------------+
/// | 80  | 04  | 81  | CURVE | FINAL CHUNK (<= 230 bytes)         |
/// +-----+-----+-----+-------+------------------------------------+
/// ```
///
/// Data frames carry `0x03 || operation`, so an empty operation still
/// yields a single (final) data frame.
#[derive(Clone, PartialEq, Debug)]
pub struct SignReq<'a> {
    /// Derivation path
    pub path: &'a DevicePath,
    /// Raw operation bytes (without watermark)
    pub operation: &'a [u8],
    /// Signing curve
    pub curve: Curve,
}

impl<'a> SignReq<'a> {
    /// Create a new [SignReq]
    pub fn new(path: &'a DevicePath, operation: &'a [u8], curve: Curve) -> Self {
        Self {
            path,
            operation,
            curve,
        }
    }

    /// Build the ordered frame sequence for this request
    pub fn frames(&self) -> Result<Vec<CommandFrame>, Error> {
        let data = watermark(self.operation);
        let num_chunks = data.len().div_ceil(MAX_CHUNK_LEN);

        let mut frames = Vec::with_capacity(1 + num_chunks);

        // Path frame, carries no operation bytes
        frames.push(CommandFrame::new(
            Instruction::Sign,
            ChunkMarker::First as u8,
            self.curve.code(),
            self.path.to_bytes(),
        )?);

        // Data frames
        for (i, c) in data.chunks(MAX_CHUNK_LEN).enumerate() {
            let p1 = match i + 1 == num_chunks {
                true => ChunkMarker::Last,
                false => ChunkMarker::Next,
            };

            frames.push(CommandFrame::new(
                Instruction::Sign,
                p1 as u8,
                self.curve.code(),
                c.to_vec(),
            )?);
        }

        #[cfg(feature = "log")]
        log::debug!(
            "sign request: {} operation bytes in {} data frames",
            self.operation.len(),
            num_chunks
        );

        Ok(frames)
    }
}

/// Raw signature bytes as returned by the device, normalised to `r || s`
/// for ECDSA curves
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Fetch signature bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Signature> for Vec<u8> {
    fn from(s: Signature) -> Self {
        s.0
    }
}

/// Decode the response to the final signing frame for the provided curve
///
/// Ed25519 signatures are returned as-is (minus the status word), ECDSA
/// signatures are unpacked from the device DER-like frame.
pub fn decode_signature(resp: &[u8], curve: Curve) -> Result<Signature, Error> {
    match curve {
        Curve::Ed25519 => {
            if resp.len() < STATUS_WORD_LEN {
                return Err(Error::TruncatedResponse);
            }

            Ok(Signature(resp[..resp.len() - STATUS_WORD_LEN].to_vec()))
        }
        Curve::Secp256k1 | Curve::Secp256r1 => {
            let (s, _n) = EcdsaSignature::decode_owned(resp)?;
            Ok(Signature(s.to_bytes().to_vec()))
        }
    }
}

/// ECDSA signature, unpacked from the DER-like device response
///
/// ## Encoding:
/// ```text
/// +------------+-----------+------+-------+-------+------+-------+-------+-------------+
/// | 0x30/0x31  | TOTAL_LEN | 0x02 | R_LEN | R ... | 0x02 | S_LEN | S ... | STATUS_WORD |
/// +------------+-----------+------+-------+-------+------+-------+-------+-------------+
/// ```
///
/// `TOTAL_LEN + 4` must equal the full response length, and `R` / `S`
/// must consume the response exactly up to the status word.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EcdsaSignature {
    /// `r` component, right-aligned
    pub r: [u8; 32],
    /// `s` component, right-aligned
    pub s: [u8; 32],
}

impl EcdsaSignature {
    /// Encode as `r || s`
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut b = [0u8; 64];
        b[..32].copy_from_slice(&self.r);
        b[32..].copy_from_slice(&self.s);
        b
    }
}

impl DecodeOwned for EcdsaSignature {
    type Output = Self;

    type Error = Error;

    /// Decode a signature from a full device response (status word included)
    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        let total = buff.len();
        if total < STATUS_WORD_LEN {
            return Err(Error::TruncatedResponse);
        }

        let mut c = Cursor::new(&buff[..total - STATUS_WORD_LEN]);

        // Check frame type
        let frame_type = c.read_u8()?;
        if !DER_FRAME_TYPES.contains(&frame_type) {
            return Err(Error::BadSignatureFrame(frame_type));
        }

        // Check declared length against the response
        let declared = c.read_u8()? as usize + 4;
        if declared != total {
            return Err(Error::LengthMismatch {
                declared,
                actual: total,
            });
        }

        // Read r
        let tag = c.read_u8()?;
        if tag != DER_INTEGER {
            return Err(Error::BadSignatureFrame(tag));
        }
        let r_len = c.read_u8()? as usize;
        let r = c.read_scalar(r_len)?;

        // Read s
        let tag = c.read_u8()?;
        if tag != DER_INTEGER {
            return Err(Error::BadSignatureFrame(tag));
        }
        let s_len = c.read_u8()? as usize;
        let s = c.read_scalar(s_len)?;

        // Signature must end at the status word
        if c.remaining() != 0 {
            return Err(Error::TrailingBytes);
        }

        Ok((Self { r, s }, total))
    }
}
