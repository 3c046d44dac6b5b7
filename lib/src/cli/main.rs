// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Command line utility for interacting with the Ledger Tezos app

use std::time::Duration;

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use ledger_tezos::{
    apdu::path::TEZOS_DEFAULT_PATH, encoding::operation_hash, transport, Curve, DeviceHandle,
    DevicePath, Exchange, Filter,
};

mod helpers;
use helpers::*;

/// Ledger Tezos command line utility
#[derive(Clone, PartialEq, Debug, Parser)]
struct Options {
    /// Supported transports for ledger discovery
    #[clap(long, value_enum, default_value = "any")]
    target: Filter,

    /// Device index (where more than one device is available)
    #[clap(long, default_value = "0")]
    device_index: usize,

    /// Timeout for non-interactive requests
    #[clap(long, default_value = "2")]
    request_timeout_s: u64,

    /// Timeout for requests awaiting user confirmation
    #[clap(long, default_value = "30")]
    user_timeout_s: u64,

    /// Subcommand to execute
    #[clap(subcommand)]
    cmd: Actions,

    /// Enable verbose logging
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, PartialEq, Debug, Parser)]
#[non_exhaustive]
enum Actions {
    /// List available devices
    List,

    /// Fetch application info
    AppInfo {
        /// Write application info to the provided JSON file
        #[clap(long)]
        output: Option<String>,
    },

    /// Fetch public key and address
    Address {
        /// BIP32 derivation path
        #[clap(long, default_value = TEZOS_DEFAULT_PATH)]
        path: DevicePath,

        /// Signing curve
        #[clap(long, default_value = "ed25519")]
        curve: Curve,

        /// Skip on-device address confirmation
        #[clap(long)]
        no_display: bool,

        /// Write address to the provided JSON file
        #[clap(long)]
        output: Option<String>,
    },

    /// Sign a hex encoded operation
    Sign {
        /// BIP32 derivation path
        #[clap(long, default_value = TEZOS_DEFAULT_PATH)]
        path: DevicePath,

        /// Signing curve
        #[clap(long, default_value = "ed25519")]
        curve: Curve,

        /// Hex encoded operation bytes
        operation: HexBytes,

        /// Write signature to the provided JSON file
        #[clap(long)]
        output: Option<String>,
    },

    /// Compute the hash of a hex encoded operation (offline)
    OpHash {
        /// Hex encoded operation bytes
        operation: HexBytes,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Options::parse();

    // Setup logging
    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())?;

    // Handle offline commands
    if let Actions::OpHash { operation } = &args.cmd {
        info!("operation hash: {}", operation_hash(operation.as_ref()));
        return Ok(());
    }

    debug!("Using transport: {:?}", args.target);

    // Handle list command
    if args.cmd == Actions::List {
        let devices = transport::list_devices(args.target).await?;
        if devices.is_empty() {
            return Err(anyhow::anyhow!("No devices found"));
        }

        info!("Devices:");
        for (i, d) in devices.iter().enumerate() {
            info!("  {}: {:?}", i, d);
        }

        return Ok(());
    }

    // Connect to device
    let t = match transport::connect(args.target, args.device_index).await {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to connect to device {}", args.device_index);
            return Err(e.into());
        }
    };

    let t = t
        .with_request_timeout(Duration::from_secs(args.request_timeout_s))
        .with_user_timeout(Duration::from_secs(args.user_timeout_s));

    // Execute command
    execute(t, args.cmd).await?;

    Ok(())
}

/// Execute a command with the provided transport
async fn execute<T>(t: DeviceHandle<T>, cmd: Actions) -> anyhow::Result<()>
where
    T: Exchange + Send,
{
    debug!("Executing command: {:?}", cmd);

    match cmd {
        Actions::AppInfo { output } => {
            let i = t.app_info().await?;

            info!("app version: {} (class: {})", i.version, i.class);

            if let Some(o) = output {
                write_output(&o, &i).await?;
            }
        }
        Actions::Address {
            path,
            curve,
            no_display,
            output,
        } => {
            info!("requesting address for path: {} (curve: {})", path, curve);

            if !no_display {
                info!("confirm the address on the device");
            }

            let a = t.get_address(&path, !no_display, curve).await?;

            info!("public key: {}", a.public_key);
            info!("address: {}", a.public_key_hash);

            if let Some(o) = output {
                write_output(&o, &a).await?;
            }
        }
        Actions::Sign {
            path,
            curve,
            operation,
            output,
        } => {
            info!("signing operation with path: {} (curve: {})", path, curve);
            info!("confirm the operation on the device");

            let s = t
                .sign_operation_bytes(&path, operation.as_ref(), curve)
                .await?;

            info!("signature: {}", s.signature);
            info!("encoded signature: {}", s.encoded_signature);
            info!("operation hash: {}", s.operation_hash);

            if let Some(o) = output {
                write_output(&o, &s).await?;
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}
