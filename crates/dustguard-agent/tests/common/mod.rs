//! In-memory `ChannelClient` for driving the acceptor and the auditor.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use dustguard_agent::client::{AcceptorExchange, AcceptorResponse, ChannelClient};
use dustguard_core::error::{DustGuardError, Result};
use dustguard_core::{ChannelConstraints, OpenChannelInfo, OpenChannelRequest};

pub struct MockClient {
    channels: Mutex<Option<Result<Vec<OpenChannelInfo>>>>,
    requests: Mutex<Option<Vec<Result<OpenChannelRequest>>>>,
    responses: Option<mpsc::Sender<AcceptorResponse>>,
    acceptor_error: Mutex<Option<DustGuardError>>,
}

impl MockClient {
    pub fn with_channels(channels: Vec<OpenChannelInfo>) -> Self {
        Self {
            channels: Mutex::new(Some(Ok(channels))),
            requests: Mutex::new(None),
            responses: None,
            acceptor_error: Mutex::new(None),
        }
    }

    pub fn failing_list(err: DustGuardError) -> Self {
        Self {
            channels: Mutex::new(Some(Err(err))),
            requests: Mutex::new(None),
            responses: None,
            acceptor_error: Mutex::new(None),
        }
    }

    /// Acceptor that yields `requests` and then ends the stream.
    /// Decisions land in the returned receiver.
    pub fn with_requests(
        requests: Vec<Result<OpenChannelRequest>>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<AcceptorResponse>) {
        let (tx, rx) = mpsc::channel(capacity);
        let client = Self {
            channels: Mutex::new(None),
            requests: Mutex::new(Some(requests)),
            responses: Some(tx),
            acceptor_error: Mutex::new(None),
        };
        (client, rx)
    }

    pub fn failing_acceptor(err: DustGuardError) -> Self {
        Self {
            channels: Mutex::new(None),
            requests: Mutex::new(None),
            responses: None,
            acceptor_error: Mutex::new(Some(err)),
        }
    }
}

#[async_trait]
impl ChannelClient for MockClient {
    async fn list_channels(&self) -> Result<Vec<OpenChannelInfo>> {
        self.channels
            .lock()
            .unwrap()
            .take()
            .expect("list_channels called more than once")
    }

    async fn open_acceptor(&self) -> Result<AcceptorExchange> {
        if let Some(err) = self.acceptor_error.lock().unwrap().take() {
            return Err(err);
        }
        let requests = self
            .requests
            .lock()
            .unwrap()
            .take()
            .expect("open_acceptor called more than once");
        Ok(AcceptorExchange {
            requests: Box::pin(futures_util::stream::iter(requests)),
            responses: self.responses.clone().expect("no response channel"),
        })
    }
}

pub fn request(id: u8, dust_limit_sat: u64) -> OpenChannelRequest {
    OpenChannelRequest {
        node_pubkey: vec![0x03; 33],
        pending_chan_id: vec![id; 32],
        funding_amt_sat: 1_000_000,
        dust_limit_sat,
        max_accepted_htlcs: 483,
        ..Default::default()
    }
}

pub fn channel(
    channel_point: &str,
    local: (u64, u32),
    remote: (u64, u32),
) -> OpenChannelInfo {
    OpenChannelInfo {
        channel_point: channel_point.to_string(),
        remote_pubkey: "02".repeat(33),
        capacity_sat: 5_000_000,
        local_constraints: ChannelConstraints {
            dust_limit_sat: local.0,
            max_accepted_htlcs: local.1,
            ..Default::default()
        },
        remote_constraints: ChannelConstraints {
            dust_limit_sat: remote.0,
            max_accepted_htlcs: remote.1,
            ..Default::default()
        },
    }
}
