//! Prelude to simplify downstream use of APDU objects
//!

pub use crate::{
    app_info::{AppVersion, AppVersionReq},
    curve::Curve,
    error::Error,
    frame::CommandFrame,
    path::{DevicePath, TEZOS_DEFAULT_PATH},
    public_key::{PublicKeyReq, PublicKeyResp},
    sign::{decode_signature, EcdsaSignature, SignReq, Signature},
};
