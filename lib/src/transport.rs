// Copyright (c) 2023 The ledger-tezos-rs Developers

//! Device discovery and connection via [LedgerProvider]

use ledger_lib::{Filters, LedgerHandle, LedgerInfo, LedgerProvider, Transport};
use log::debug;

use crate::{DeviceHandle, Error, Filter};

impl From<Filter> for Filters {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Any => Filters::Any,
            Filter::Hid => Filters::Hid,
            Filter::Tcp => Filters::Tcp,
            Filter::Ble => Filters::Ble,
        }
    }
}

/// List available ledger devices matching the provided filter
pub async fn list_devices(filter: Filter) -> Result<Vec<LedgerInfo>, Error> {
    let mut p = LedgerProvider::init().await;

    let devices = p.list(filter.into()).await?;

    debug!("Found {} devices: {:?}", devices.len(), devices);

    Ok(devices)
}

/// Connect to the device at `index` of those matching the provided filter
pub async fn connect(filter: Filter, index: usize) -> Result<DeviceHandle<LedgerHandle>, Error> {
    let mut p = LedgerProvider::init().await;

    let devices = p.list(filter.into()).await?;
    if devices.is_empty() {
        return Err(Error::NoDevice);
    }

    let info = match devices.get(index) {
        Some(d) => d.clone(),
        None => return Err(Error::InvalidDeviceIndex(index, devices.len())),
    };

    debug!("Connecting to device {}: {:?}", index, info);

    let t = p.connect(info).await?;

    Ok(DeviceHandle::from(t))
}
