// Copyright (c) 2023 The ledger-tezos-rs Developers

use std::path::Path;

use log::debug;
use serde::Serialize;

/// Variable length hex encoded data
#[derive(Clone, PartialEq, Debug)]
pub struct HexBytes(pub Vec<u8>);

impl std::str::FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);

        hex::decode(s).map(HexBytes)
    }
}

impl AsRef<[u8]> for HexBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Helper to write output files if `--output` argument is provided
pub async fn write_output(file_name: &str, value: &impl Serialize) -> anyhow::Result<()> {
    debug!("Writing output to '{}'", file_name);

    // Determine format from file name
    let p = Path::new(file_name);
    match p.extension().and_then(|e| e.to_str()) {
        // Encode to JSON for `.json` files
        Some("json") => {
            let s = serde_json::to_string_pretty(value)?;
            tokio::fs::write(p, s).await?;
        }
        _ => return Err(anyhow::anyhow!("unsupported output file format")),
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn hex_bytes_prefix() {
        assert_eq!(HexBytes::from_str("0102").unwrap().as_ref(), &[0x01, 0x02]);
        assert_eq!(HexBytes::from_str("0x0102").unwrap().as_ref(), &[0x01, 0x02]);
        assert_eq!(HexBytes::from_str("").unwrap().as_ref(), &[] as &[u8]);

        assert!(HexBytes::from_str("0x01z2").is_err());
        assert!(HexBytes::from_str("012").is_err());
    }
}
