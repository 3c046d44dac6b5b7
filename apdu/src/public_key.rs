// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Public key APDUs, for fetching account keys / addresses

use encdec::Decode;

use crate::{ChunkMarker, CommandFrame, Curve, DevicePath, Error, Instruction};

/// Public key request, fetches the uncompressed public key for a
/// derivation path and curve.
///
/// When `prompt` is set the device displays the derived address and
/// waits for user confirmation before responding.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     0x80      | 0x02 or 0x03  |     0x00      |  CURVE_CODE   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      LEN      |            DERIVATION_PATH...                 /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct PublicKeyReq<'a> {
    /// Derivation path
    pub path: &'a DevicePath,
    /// Display the address for confirmation on the device
    pub prompt: bool,
    /// Signing curve
    pub curve: Curve,
}

impl<'a> PublicKeyReq<'a> {
    /// Create a new [PublicKeyReq]
    pub fn new(path: &'a DevicePath, prompt: bool, curve: Curve) -> Self {
        Self {
            path,
            prompt,
            curve,
        }
    }

    /// Instruction for this request
    pub fn instruction(&self) -> Instruction {
        match self.prompt {
            true => Instruction::PromptPublicKey,
            false => Instruction::GetPublicKey,
        }
    }

    /// Build the command frame for this request
    pub fn frame(&self) -> Result<CommandFrame, Error> {
        CommandFrame::new(
            self.instruction(),
            ChunkMarker::First as u8,
            self.curve.code(),
            self.path.to_bytes(),
        )
    }
}

/// Public key response
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    KEY_LEN    |      PUBLIC_KEY (uncompressed, KEY_LEN)       /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                        ...              |     STATUS_WORD       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Any bytes following the public key (the status word, or an unparsed
/// chain code) are not consumed.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PublicKeyResp<'a> {
    /// Raw uncompressed public key
    pub public_key: &'a [u8],
}

impl<'a> Decode<'a> for PublicKeyResp<'a> {
    type Output = Self;
    type Error = Error;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), Error> {
        let key_len = *buff.first().ok_or(Error::TruncatedResponse)? as usize;

        if buff.len() < 1 + key_len {
            return Err(Error::TruncatedResponse);
        }

        Ok((
            Self {
                public_key: &buff[1..][..key_len],
            },
            1 + key_len,
        ))
    }
}
