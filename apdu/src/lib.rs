// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Protocol / APDU definitions for Tezos app communication
//!
//! This module provides the wire protocol spoken by the Tezos wallet
//! application on Ledger devices: command framing, chunking of operations
//! for signing, and decoding of device responses.
//!
//! Every exchange is a single [CommandFrame] (class `0x80`, instruction,
//! `P1`, `P2`, payload) answered by a raw response whose last two bytes are
//! the device status word. Decoders in this crate take the _full_ response,
//! status word included.
//!
//! Integers in request payloads (BIP32 path segments) are big-endian,
//! as the device firmware expects.
//!
//! ## Operations
//!
//! - [PublicKeyReq][public_key::PublicKeyReq] fetches the public key for a
//!   [DevicePath], decoded via [PublicKeyResp][public_key::PublicKeyResp].
//! - [SignReq][sign::SignReq] produces the ordered frame sequence for
//!   signing an operation, the final response is decoded with
//!   [decode_signature][sign::decode_signature].
//! - [AppVersionReq][app_info::AppVersionReq] fetches the application
//!   version, decoded as [AppVersion][app_info::AppVersion].

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub use ledger_proto::{ApduError, ApduHeader};

pub mod app_info;
pub mod curve;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod path;
pub mod prelude;
pub mod public_key;
pub mod sign;

pub use curve::Curve;
pub use error::Error;
pub use frame::CommandFrame;
pub use path::DevicePath;

/// Tezos APDU Class
pub const TEZOS_APDU_CLA: u8 = 0x80;

/// Maximum payload carried by a single signing data frame,
/// leaving room for the frame header within the transport MTU
pub const MAX_CHUNK_LEN: usize = 230;

/// Maximum payload length expressible in a command frame
pub const MAX_FRAME_PAYLOAD: usize = 255;

/// Length of the status word trailing every device response
pub const STATUS_WORD_LEN: usize = 2;

/// Status word reported by the device on success
pub const SW_OK: u16 = 0x9000;

/// Status word reported when the user rejects a request on the device
pub const SW_DENIED: u16 = 0x6985;

/// Tezos APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch application version
    GetVersion = 0x00,

    /// Fetch a public key without on-device confirmation
    GetPublicKey = 0x02,

    /// Fetch a public key, displaying the address for confirmation
    PromptPublicKey = 0x03,

    /// Sign an operation (streamed over multiple frames)
    Sign = 0x04,
}

/// `P1` chunk markers for multi-frame requests
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum ChunkMarker {
    /// First (or only) frame of a request
    First = 0x00,

    /// Intermediate frame, more data follows
    Next = 0x01,

    /// Final frame of a multi-frame request
    Last = 0x81,
}

/// Split the status word from the tail of a raw device response
pub fn status_word(resp: &[u8]) -> Result<u16, Error> {
    if resp.len() < STATUS_WORD_LEN {
        return Err(Error::TruncatedResponse);
    }

    let sw = &resp[resp.len() - STATUS_WORD_LEN..];
    Ok(u16::from_be_bytes([sw[0], sw[1]]))
}
