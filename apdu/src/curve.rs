// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Signing curves supported by the Tezos app, and the base58check prefixes
//! used to encode their keys, addresses and signatures.

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString};

/// Signing curve, encoded as `P2` in public key and signing frames
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Debug,
    Display,
    EnumString,
    EnumIter,
    TryFromPrimitive,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Curve {
    /// Ed25519 (`tz1` addresses)
    Ed25519 = 0x00,

    /// Secp256k1 (`tz2` addresses)
    Secp256k1 = 0x01,

    /// NIST P-256 / secp256r1 (`tz3` addresses)
    #[strum(to_string = "secp256r1", serialize = "p256")]
    Secp256r1 = 0x02,
}

impl Curve {
    /// Curve code as sent in `P2`
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Prefix for public key hash (address) encoding
    pub const fn address_prefix(&self) -> &'static [u8] {
        match self {
            Curve::Ed25519 => &[6, 161, 159],
            Curve::Secp256k1 => &[6, 161, 161],
            Curve::Secp256r1 => &[6, 161, 164],
        }
    }

    /// Prefix for public key encoding
    pub const fn public_key_prefix(&self) -> &'static [u8] {
        match self {
            Curve::Ed25519 => &[13, 15, 37, 217],
            Curve::Secp256k1 => &[3, 254, 226, 86],
            Curve::Secp256r1 => &[3, 178, 139, 127],
        }
    }

    /// Prefix for signature encoding
    pub const fn signature_prefix(&self) -> &'static [u8] {
        match self {
            Curve::Ed25519 => &[9, 245, 205, 134, 18],
            Curve::Secp256k1 => &[13, 115, 101, 19, 63],
            Curve::Secp256r1 => &[54, 240, 44, 52],
        }
    }

}

/// Ed25519 unless otherwise selected, unknown codes still fail `try_from`
impl Default for Curve {
    fn default() -> Self {
        Curve::Ed25519
    }
}
