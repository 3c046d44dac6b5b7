// Copyright (c) 2023 The ledger-tezos-rs Developers

use ledger_proto::ApduError;

/// Ledger Tezos API Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame building or response decoding error
    #[error("Protocol error: {0}")]
    Protocol(#[from] ledger_tezos_apdu::Error),

    /// APDU encoding error
    #[error("APDU encoding error: {0:?}")]
    Apdu(ApduError),

    /// Underlying transport error
    #[error("Transport error: {0}")]
    Transport(#[from] ledger_lib::Error),

    /// Device returned a non-success status word
    #[error("Device returned status 0x{0:04x}")]
    Status(u16),

    /// User denied operation
    #[error("Operation rejected by user")]
    UserRejected,

    /// Invalid hex input
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// No devices found
    #[error("No devices found")]
    NoDevice,

    /// Device index out of range
    #[error("Invalid device index: {0} (available: {1})")]
    InvalidDeviceIndex(usize, usize),
}

impl From<ApduError> for Error {
    fn from(e: ApduError) -> Self {
        Error::Apdu(e)
    }
}
