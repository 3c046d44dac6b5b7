// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Ledger Tezos API Library (and CLI)
//!
//! Fetch addresses and sign operations using the Tezos app on a Ledger
//! device. See [DeviceHandle] for device operations and [encoding] for the
//! Tezos textual encodings of keys, signatures and operation hashes.

pub use ledger_lib::{Exchange, LedgerHandle, LedgerInfo};

/// Re-export `ledger-tezos-apdu` for consumers
pub use ledger_tezos_apdu::{self as apdu, Curve, DevicePath};

pub mod encoding;
pub use encoding::AddressBundle;

mod handle;
pub use handle::{
    AppInformation, DeviceHandle, ExchangeEvent, ExchangeObserver, SignedOperation,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_TIMEOUT,
};

mod error;
pub use error::Error;

pub mod transport;

/// Device discovery filter
#[derive(Copy, Clone, Debug, PartialEq, clap::ValueEnum, strum::Display)]
#[non_exhaustive]
pub enum Filter {
    /// List all devices available using supported transports
    Any,
    /// List only HID devices
    Hid,
    /// List only TCP devices (speculos)
    Tcp,
    /// List only BLE devices
    Ble,
}
