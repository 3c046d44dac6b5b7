// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Handle for connected ledger devices
//!
//! This provides methods for interacting with the Tezos app
//! and is generic over [ledger_lib::Exchange] transports.
//!
//! The transport is held behind a mutex for the full duration of each
//! operation, so the frames of a signing sequence are never interleaved
//! with other commands issued through a clone of the same handle.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use encdec::{Decode, DecodeOwned};
use ledger_lib::Exchange;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use ledger_tezos_apdu::{prelude::*, status_word, SW_DENIED, SW_OK};

use crate::{
    encoding::{encode_address_bundle, encode_signature, operation_hash, AddressBundle},
    Error,
};

/// Default timeout for non-interactive requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Default timeout for requests awaiting user confirmation
pub const DEFAULT_USER_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw exchange event, passed to an [ExchangeObserver]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ExchangeEvent<'a> {
    /// Encoded command about to be sent
    Command(&'a [u8]),
    /// Raw response received (status word included)
    Response(&'a [u8]),
}

/// Observer callback for raw device exchanges
pub type ExchangeObserver = Arc<dyn Fn(&ExchangeEvent<'_>) + Send + Sync>;

/// Result of a signing operation
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SignedOperation {
    /// Hex encoded raw signature (`r || s` for ECDSA curves)
    pub signature: String,
    /// Prefixed base58check signature (`edsig` / `spsig1` / `p2sig`)
    pub encoded_signature: String,
    /// Base58 operation hash
    pub operation_hash: String,
}

/// Tezos application information
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AppInformation {
    /// Application version (`major.minor.patch`)
    pub version: String,
    /// Application class (0 for the wallet app, 1 for the baking app)
    pub class: u8,
}

/// Tezos handle for a connected ledger device.
///
/// This is generic over [Exchange] types to support different
/// underlying transports / providers
pub struct DeviceHandle<T: Exchange> {
    /// Transport for communication
    t: Arc<Mutex<T>>,
    /// Timeout for APDU requests
    request_timeout: Duration,
    /// Timeout for user acknowledgements
    user_timeout: Duration,
    /// Optional observer for raw exchanges
    observer: Option<ExchangeObserver>,
}

/// Create a [DeviceHandle] wrapper from a type implementing [Exchange]
impl<T: Exchange> From<T> for DeviceHandle<T> {
    fn from(t: T) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_timeout: DEFAULT_USER_TIMEOUT,
            observer: None,
        }
    }
}

impl<T: Exchange> Clone for DeviceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            t: self.t.clone(),
            request_timeout: self.request_timeout,
            user_timeout: self.user_timeout,
            observer: self.observer.clone(),
        }
    }
}

impl<T: Exchange + Send> DeviceHandle<T> {
    /// Set the timeout for non-interactive requests
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the timeout for requests awaiting user confirmation
    pub fn with_user_timeout(mut self, timeout: Duration) -> Self {
        self.user_timeout = timeout;
        self
    }

    /// Attach an observer called with every raw command and response
    pub fn with_observer(
        mut self,
        observer: impl Fn(&ExchangeEvent<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Fetch the public key and address for a derivation path.
    ///
    /// When `display` is set the device shows the address and waits for
    /// the user to confirm it.
    pub async fn get_address(
        &self,
        path: &DevicePath,
        display: bool,
        curve: Curve,
    ) -> Result<AddressBundle, Error> {
        debug!(
            "Requesting address for path: {} (curve: {}, display: {})",
            path, curve, display
        );

        let frame = PublicKeyReq::new(path, display, curve).frame()?;
        let timeout = match display {
            true => self.user_timeout,
            false => self.request_timeout,
        };

        let mut t = self.t.lock().await;
        let resp = self.exchange_frame(&mut *t, &frame, timeout).await?;

        let (r, _n) = PublicKeyResp::decode(&resp)?;

        encode_address_bundle(r.public_key, curve)
    }

    /// Sign a hex encoded operation with the key at the provided path
    pub async fn sign_operation(
        &self,
        path: &DevicePath,
        operation_hex: &str,
        curve: Curve,
    ) -> Result<SignedOperation, Error> {
        let operation = hex::decode(operation_hex)?;

        self.sign_operation_bytes(path, &operation, curve).await
    }

    /// Sign raw operation bytes with the key at the provided path.
    ///
    /// Frames are sent strictly in order with the transport held for the
    /// whole sequence. Any failure aborts the sequence, remaining frames
    /// are not sent.
    pub async fn sign_operation_bytes(
        &self,
        path: &DevicePath,
        operation: &[u8],
        curve: Curve,
    ) -> Result<SignedOperation, Error> {
        debug!(
            "Signing {} byte operation with path: {} (curve: {})",
            operation.len(),
            path,
            curve
        );

        let frames = SignReq::new(path, operation, curve).frames()?;

        let mut t = self.t.lock().await;
        let mut last = Vec::new();

        for (i, f) in frames.iter().enumerate() {
            // Only the final frame awaits user approval
            let timeout = match i + 1 == frames.len() {
                true => self.user_timeout,
                false => self.request_timeout,
            };

            last = self.exchange_frame(&mut *t, f, timeout).await?;
        }

        drop(t);

        let signature = decode_signature(&last, curve)?;

        debug!("Signing complete");

        Ok(SignedOperation {
            signature: hex::encode(signature.as_bytes()),
            encoded_signature: encode_signature(signature.as_bytes(), curve),
            operation_hash: operation_hash(operation),
        })
    }

    /// Fetch the application version
    pub async fn app_version(&self) -> Result<AppVersion, Error> {
        debug!("Requesting app version");

        let frame = AppVersionReq::default().frame()?;

        let mut t = self.t.lock().await;
        let resp = self
            .exchange_frame(&mut *t, &frame, self.request_timeout)
            .await?;

        let (v, _n) = AppVersion::decode_owned(&resp)?;

        Ok(v)
    }

    /// Fetch application information
    pub async fn app_info(&self) -> Result<AppInformation, Error> {
        let v = self.app_version().await?;

        Ok(AppInformation {
            version: v.to_string(),
            class: v.class,
        })
    }

    /// Exchange a single frame, returning the full response on success
    async fn exchange_frame(
        &self,
        t: &mut T,
        frame: &CommandFrame,
        timeout: Duration,
    ) -> Result<Vec<u8>, Error> {
        let cmd = frame.to_bytes()?;

        debug!(
            "TX ins: 0x{:02x} p1: 0x{:02x} p2: 0x{:02x} len: {}",
            frame.ins,
            frame.p1,
            frame.p2,
            frame.payload.len()
        );
        trace!("TX: {:02x?}", cmd);
        self.observe(&ExchangeEvent::Command(&cmd));

        let resp = t.exchange(&cmd, timeout).await?;

        trace!("RX: {:02x?}", resp);
        self.observe(&ExchangeEvent::Response(&resp));

        match status_word(&resp)? {
            SW_OK => Ok(resp),
            SW_DENIED => {
                debug!("Operation rejected by user");
                Err(Error::UserRejected)
            }
            sw => {
                debug!("Request failed with status: 0x{:04x}", sw);
                Err(Error::Status(sw))
            }
        }
    }

    fn observe(&self, e: &ExchangeEvent<'_>) {
        if let Some(o) = &self.observer {
            o(e)
        }
    }
}

/// Forward raw [Exchange] calls through the shared transport
#[async_trait]
impl<T: Exchange + Send> Exchange for DeviceHandle<T> {
    async fn exchange(
        &mut self,
        command: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, ledger_lib::Error> {
        self.t.lock().await.exchange(command, timeout).await
    }
}
