// Copyright (c) 2023 The ledger-tezos-rs Developers

/// Protocol errors, raised when building frames or decoding device responses
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum Error {
    /// Derivation path is empty, malformed, or has more than 255 segments
    #[cfg_attr(feature = "thiserror", error("invalid derivation path"))]
    InvalidPath,

    /// Response is shorter than a field requires
    #[cfg_attr(feature = "thiserror", error("truncated device response"))]
    TruncatedResponse,

    /// Unexpected frame type or tag byte in a signature response
    #[cfg_attr(
        feature = "thiserror",
        error("unexpected signature frame byte 0x{0:02x}")
    )]
    BadSignatureFrame(u8),

    /// Declared signature length disagrees with the response length
    #[cfg_attr(
        feature = "thiserror",
        error("signature length mismatch (declared: {declared}, actual: {actual})")
    )]
    LengthMismatch { declared: usize, actual: usize },

    /// Signature does not consume exactly the response body
    #[cfg_attr(feature = "thiserror", error("trailing bytes after signature"))]
    TrailingBytes,

    /// Public key has an unexpected length or format marker
    #[cfg_attr(feature = "thiserror", error("invalid public key"))]
    InvalidPublicKey,

    /// Frame payload exceeds the maximum frame length
    #[cfg_attr(feature = "thiserror", error("frame payload too long ({0} bytes)"))]
    PayloadTooLong(usize),
}

impl From<encdec::Error> for Error {
    fn from(_: encdec::Error) -> Self {
        Error::TruncatedResponse
    }
}
