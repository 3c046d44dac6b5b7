// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Command frames, a single request to the device

use alloc::vec::Vec;

use encdec::Encode;

use crate::{ApduError, ApduHeader, Error, Instruction, MAX_FRAME_PAYLOAD, TEZOS_APDU_CLA};

/// Command frame, represents exactly one request / response exchange
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  CLA (0x80)   |      INS      |      P1       |      P2       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      LEN      |                  PAYLOAD...                   /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandFrame {
    /// Instruction code
    pub ins: u8,
    /// First parameter (chunk marker for multi-frame requests)
    pub p1: u8,
    /// Second parameter (curve code where applicable)
    pub p2: u8,
    /// Frame payload
    pub payload: Vec<u8>,
}

impl CommandFrame {
    /// Create a new command frame
    pub fn new(ins: Instruction, p1: u8, p2: u8, payload: Vec<u8>) -> Result<Self, Error> {
        if payload.len() > MAX_FRAME_PAYLOAD {
            return Err(Error::PayloadTooLong(payload.len()));
        }

        Ok(Self {
            ins: ins as u8,
            p1,
            p2,
            payload,
        })
    }

    /// Instruction class, fixed for the Tezos app
    pub const fn cla(&self) -> u8 {
        TEZOS_APDU_CLA
    }

    /// Fetch the frame header
    pub fn header(&self) -> ApduHeader {
        ApduHeader {
            cla: self.cla(),
            ins: self.ins,
            p1: self.p1,
            p2: self.p2,
        }
    }

    /// Encode the frame for transmission
    pub fn to_bytes(&self) -> Result<Vec<u8>, ApduError> {
        let mut buff = alloc::vec![0u8; self.encode_len()?];
        let n = self.encode(&mut buff)?;
        buff.truncate(n);
        Ok(buff)
    }
}

impl Encode for CommandFrame {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(5 + self.payload.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.encode_len()?;

        // Check payload fits length byte and buffer
        if self.payload.len() > MAX_FRAME_PAYLOAD || buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        // Write header
        let mut index = self.header().encode(buff)?;

        buff[index] = self.payload.len() as u8;
        index += 1;

        // Write payload
        buff[index..][..self.payload.len()].copy_from_slice(&self.payload);
        index += self.payload.len();

        Ok(index)
    }
}
