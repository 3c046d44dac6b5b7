// Copyright (c) 2023 The ledger-tezos-rs Developers

// Not all helpers are used by every test binary
#![allow(dead_code)]

use std::{
    collections::VecDeque,
    str::FromStr,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use log::{debug, LevelFilter};
use simplelog::SimpleLogger;

use ledger_tezos::{DeviceHandle, Exchange};

/// Success status word
pub const SW_OK: [u8; 2] = [0x90, 0x00];

/// Frames sent to the mock transport, with the timeout for each exchange
pub type SentLog = Arc<Mutex<Vec<(Vec<u8>, Duration)>>>;

/// Scripted transport, replies to each exchange with the next queued
/// response and records every frame sent
pub struct MockTransport {
    sent: SentLog,
    responses: VecDeque<Result<Vec<u8>, ledger_lib::Error>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Vec<u8>>) -> (Self, SentLog) {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub fn with_results(responses: Vec<Result<Vec<u8>, ledger_lib::Error>>) -> (Self, SentLog) {
        let sent = SentLog::default();

        let t = Self {
            sent: sent.clone(),
            responses: responses.into(),
        };

        (t, sent)
    }
}

#[async_trait]
impl Exchange for MockTransport {
    async fn exchange(
        &mut self,
        command: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, ledger_lib::Error> {
        debug!("mock TX: {:02x?}", command);

        self.sent
            .lock()
            .unwrap()
            .push((command.to_vec(), timeout));

        // Exhausted queue behaves as a stalled device
        self.responses
            .pop_front()
            .unwrap_or(Err(ledger_lib::Error::Timeout))
    }
}

/// Setup logging and a handle over a scripted transport
pub fn setup(responses: Vec<Vec<u8>>) -> (DeviceHandle<MockTransport>, SentLog) {
    setup_with_results(responses.into_iter().map(Ok).collect())
}

/// Setup logging and a handle over a scripted transport, allowing
/// transport failures to be queued
pub fn setup_with_results(
    responses: Vec<Result<Vec<u8>, ledger_lib::Error>>,
) -> (DeviceHandle<MockTransport>, SentLog) {
    let log_level = match std::env::var("LOG_LEVEL").map(|v| LevelFilter::from_str(&v)) {
        Ok(Ok(l)) => l,
        _ => LevelFilter::Debug,
    };

    let _ = SimpleLogger::init(log_level, simplelog::Config::default());

    let (t, sent) = MockTransport::with_results(responses);

    (DeviceHandle::from(t), sent)
}

/// Append the success status word to a response body
pub fn ok(body: &[u8]) -> Vec<u8> {
    let mut r = body.to_vec();
    r.extend_from_slice(&SW_OK);
    r
}

/// Fetch the frames sent so far
pub fn sent_frames(sent: &SentLog) -> Vec<Vec<u8>> {
    sent.lock().unwrap().iter().map(|(f, _)| f.clone()).collect()
}
