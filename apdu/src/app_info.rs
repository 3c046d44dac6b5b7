// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Application Information APDUs

use alloc::vec::Vec;
use core::fmt;

use encdec::DecodeOwned;

use crate::{CommandFrame, Error, Instruction};

/// Fetch application version APDU
///
/// Carries no payload, `P1` and `P2` are zero.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct AppVersionReq {}

impl AppVersionReq {
    /// Build the command frame for this request
    pub fn frame(&self) -> Result<CommandFrame, Error> {
        CommandFrame::new(Instruction::GetVersion, 0x00, 0x00, Vec::new())
    }
}

/// Application version response APDU
///
/// Version components are raw numeric bytes (not ASCII).
///
/// ## Encoding
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   APP_CLASS   |     MAJOR     |     MINOR     |     PATCH     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AppVersion {
    /// Application class (0 for the wallet app, 1 for the baking app)
    pub class: u8,
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Patch version
    pub patch: u8,
}

impl DecodeOwned for AppVersion {
    type Output = Self;

    type Error = Error;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        if buff.len() < 4 {
            return Err(Error::TruncatedResponse);
        }

        Ok((
            Self {
                class: buff[0],
                major: buff[1],
                minor: buff[2],
                patch: buff[3],
            },
            4,
        ))
    }
}

/// Display [AppVersion] as `major.minor.patch`
impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod test {
    use alloc::string::ToString;

    use super::*;
    use crate::test::encode_frame;

    #[test]
    fn app_version_req_frame() {
        let f = AppVersionReq::default().frame().unwrap();

        let (h, d) = encode_frame(&f);
        assert_eq!(h, [0x80, 0x00, 0x00, 0x00, 0x00]);
        assert!(d.is_empty());
    }

    #[test]
    fn app_version_resp_decode() {
        let (v, n) = AppVersion::decode_owned(&[0x00, 2, 2, 5]).unwrap();
        assert_eq!(n, 4);
        assert_eq!(v.to_string(), "2.2.5");

        // Numeric rather than ASCII, trailing status word ignored
        let (v, _) = AppVersion::decode_owned(&[0x01, 10, 0, 255, 0x90, 0x00]).unwrap();
        assert_eq!(v.class, 1);
        assert_eq!(v.to_string(), "10.0.255");
    }

    #[test]
    fn app_version_resp_truncated() {
        assert_eq!(
            AppVersion::decode_owned(&[0x00, 2, 2]).map(|(v, _)| v),
            Err(Error::TruncatedResponse)
        );
    }
}
