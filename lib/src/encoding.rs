// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Tezos textual encodings for keys, addresses, signatures and operation
//! hashes.
//!
//! All encodings are base58check over `PREFIX || PAYLOAD`, where prefixes
//! are fixed per [Curve] (see [Curve::address_prefix] and friends). Operation
//! hashes are plain base58 with no checksum.

use serde::{Deserialize, Serialize};

use ledger_tezos_apdu::{sign::watermark, Curve};

use crate::Error;

/// Length of public key hashes (addresses)
pub const PUBLIC_KEY_HASH_LEN: usize = 20;

/// Length of operation hashes
pub const OPERATION_HASH_LEN: usize = 32;

/// Length of uncompressed ECDSA public keys (`0x04 || X || Y`)
pub const UNCOMPRESSED_KEY_LEN: usize = 65;

/// Encoded public key and public key hash (address) for an account
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AddressBundle {
    /// Public key (`edpk` / `sppk` / `p2pk`)
    pub public_key: String,
    /// Public key hash (`tz1` / `tz2` / `tz3`)
    pub public_key_hash: String,
}

/// Base58check encode a payload (4-byte double SHA-256 checksum appended)
pub fn base58check_encode(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Plain base58 encode a payload
pub fn base58_encode(payload: &[u8]) -> String {
    bs58::encode(payload).into_string()
}

/// Base58check encode `prefix || payload`
pub fn prefixed_base58check(prefix: &[u8], payload: &[u8]) -> String {
    let mut d = Vec::with_capacity(prefix.len() + payload.len());
    d.extend_from_slice(prefix);
    d.extend_from_slice(payload);

    base58check_encode(&d)
}

/// Blake2b digest with the provided output length
pub fn blake2b(data: &[u8], len: usize) -> Vec<u8> {
    blake2b_simd::Params::new()
        .hash_length(len)
        .hash(data)
        .as_bytes()
        .to_vec()
}

/// Compress a raw public key as returned by the device.
///
/// Ed25519 keys drop the leading format byte. ECDSA keys are converted
/// from `0x04 || X || Y` to `(0x02 | parity(Y)) || X`.
pub fn compress_public_key(raw: &[u8], curve: Curve) -> Result<Vec<u8>, Error> {
    match curve {
        Curve::Ed25519 => match raw.split_first() {
            Some((_marker, k)) => Ok(k.to_vec()),
            None => Err(ledger_tezos_apdu::Error::InvalidPublicKey.into()),
        },
        Curve::Secp256k1 | Curve::Secp256r1 => {
            if raw.len() != UNCOMPRESSED_KEY_LEN || raw[0] != 0x04 {
                return Err(ledger_tezos_apdu::Error::InvalidPublicKey.into());
            }

            let mut k = Vec::with_capacity(33);
            k.push(0x02 | (raw[64] & 0x01));
            k.extend_from_slice(&raw[1..33]);

            Ok(k)
        }
    }
}

/// Encode a raw device public key to a Tezos public key and address
pub fn encode_address_bundle(raw: &[u8], curve: Curve) -> Result<AddressBundle, Error> {
    let k = compress_public_key(raw, curve)?;

    Ok(AddressBundle {
        public_key: prefixed_base58check(curve.public_key_prefix(), &k),
        public_key_hash: prefixed_base58check(
            curve.address_prefix(),
            &blake2b(&k, PUBLIC_KEY_HASH_LEN),
        ),
    })
}

/// Encode a (normalised) signature for the provided curve
pub fn encode_signature(signature: &[u8], curve: Curve) -> String {
    prefixed_base58check(curve.signature_prefix(), signature)
}

/// Compute the hash of a generic operation (watermark `0x03`)
pub fn operation_hash(operation: &[u8]) -> String {
    base58_encode(&blake2b(&watermark(operation), OPERATION_HASH_LEN))
}

#[cfg(test)]
mod test {
    use super::*;

    const SECP256K1_G: [u8; 65] = hex_literal(
        "04\
         79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798\
         483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
    );

    const SECP256R1_G: [u8; 65] = hex_literal(
        "04\
         6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296\
         4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5",
    );

    const fn hex_literal<const N: usize>(s: &str) -> [u8; N] {
        const fn nibble(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex"),
            }
        }

        let b = s.as_bytes();
        let mut out = [0u8; N];
        let mut i = 0;
        while i < N {
            out[i] = (nibble(b[i * 2]) << 4) | nibble(b[i * 2 + 1]);
            i += 1;
        }
        out
    }

    #[test]
    fn base58check_known_value() {
        assert_eq!(base58check_encode(b"hello"), "2L5B5yqsVG8Vt");
    }

    #[test]
    fn base58check_decode_round_trip() {
        for len in [0usize, 1, 20, 32, 64] {
            let payload: Vec<u8> = (0..len).map(|_| rand::random()).collect();
            let e = base58check_encode(&payload);

            let d = bs58::decode(&e).with_check(None).into_vec().unwrap();
            assert_eq!(d, payload);
        }
    }

    #[test]
    fn base58check_corruption_detected() {
        let e = base58check_encode(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        let mut b = e.into_bytes();

        // Swap a character for a different alphabet member
        b[3] = if b[3] == b'2' { b'3' } else { b'2' };
        let corrupted = String::from_utf8(b).unwrap();

        assert!(bs58::decode(&corrupted).with_check(None).into_vec().is_err());
    }

    #[test]
    fn ed25519_address_bundle() {
        let mut raw = vec![0x02];
        raw.extend(1..=32u8);

        let b = encode_address_bundle(&raw, Curve::Ed25519).unwrap();
        assert_eq!(
            b.public_key,
            "edpktefgU5pvCgmCHMBXebvUGbbXAkSXJgMMoCGDx3rXBQ2MfGexGx"
        );
        assert_eq!(b.public_key_hash, "tz1SLUmMzdR5fYcKvcDP6BdWrutM4X7kg212");
    }

    #[test]
    fn secp256k1_address_bundle() {
        let b = encode_address_bundle(&SECP256K1_G, Curve::Secp256k1).unwrap();
        assert_eq!(
            b.public_key,
            "sppk7aEFdrScsCDxdaQ7Ev1JxpWZESrEK6UsWRhr79JfGKkPYGTsudN"
        );
        assert_eq!(b.public_key_hash, "tz2BCeQSi5ETyKJsob61pWCoQvoGtsrJBEt2");
    }

    #[test]
    fn secp256r1_address_bundle() {
        let b = encode_address_bundle(&SECP256R1_G, Curve::Secp256r1).unwrap();
        assert_eq!(
            b.public_key,
            "p2pk67L57Q7vcgLkMrKXctFRKs5JSLR6qjiw1riJaFyakWpTv9QSkRf"
        );
        assert_eq!(b.public_key_hash, "tz3bqAfFRnSA6dfPRG8XR6MBMmo6HZTTG44V");
    }

    #[test]
    fn compress_keys() {
        // Even Y
        let k = compress_public_key(&SECP256K1_G, Curve::Secp256k1).unwrap();
        assert_eq!(k[0], 0x02);
        assert_eq!(&k[1..], &SECP256K1_G[1..33]);

        // Odd Y
        let k = compress_public_key(&SECP256R1_G, Curve::Secp256r1).unwrap();
        assert_eq!(k[0], 0x03);
        assert_eq!(&k[1..], &SECP256R1_G[1..33]);

        // Ed25519 only drops the marker byte, regardless of content
        let k = compress_public_key(&SECP256R1_G, Curve::Ed25519).unwrap();
        assert_eq!(&k[..], &SECP256R1_G[1..]);
    }

    #[test]
    fn compress_ecdsa_parity_any_key() {
        for _i in 0..64 {
            let mut raw = [0u8; 65];
            for b in raw.iter_mut() {
                *b = rand::random();
            }
            raw[0] = 0x04;

            for curve in [Curve::Secp256k1, Curve::Secp256r1] {
                let k = compress_public_key(&raw, curve).unwrap();
                assert!(k[0] == 0x02 || k[0] == 0x03);
                assert_eq!(k.len(), 33);
            }
        }
    }

    #[test]
    fn compress_invalid_keys() {
        assert!(compress_public_key(&[], Curve::Ed25519).is_err());
        assert!(compress_public_key(&SECP256K1_G[..64], Curve::Secp256k1).is_err());

        let mut k = SECP256K1_G;
        k[0] = 0x03;
        assert!(compress_public_key(&k, Curve::Secp256r1).is_err());
    }

    #[test]
    fn signature_encodings() {
        let s: Vec<u8> = (0..64).collect();

        assert_eq!(
            encode_signature(&s, Curve::Ed25519),
            "edsigtXonupSLnfUbvqBFnJf7wkV3o2WixC4r1Tn7a33n72JnPfn74sgxBPgPaCJ57PZvYhSckZ7yw8S3HmzC7Rh3QhvBxtjZDT"
        );
        assert_eq!(
            encode_signature(&s, Curve::Secp256k1),
            "spsig15p17ppgz5FiFpBicRN5eMsuw2DN3cpx7M9hcVD6uaDYWuVKkYrF3TvLDyFN5KTSBsi9a1CFXeczeGf6yA2a8sPCY69Nto"
        );
        assert_eq!(
            encode_signature(&s, Curve::Secp256r1),
            "p2sigMJYdrJzcCDcLaSitzQTmxfKQb62EecfrDoEE6WEPtk7dP7HtMpxKcctpncoFMb9RmzWr7aZS1RavNdvBsoGevYRw5HBZX"
        );
    }

    #[test]
    fn operation_hashes() {
        assert_eq!(
            operation_hash(&[0x01, 0x02]),
            "2V9vuABx3PMB3MZBabTvQuhv8cvQwMhLCMxJctXiFqzK"
        );
        assert_eq!(
            operation_hash(&[]),
            "GemGCop1arCvTY447FLH8tDQF7knvzNCocNTHqKQBus9"
        );
    }
}
