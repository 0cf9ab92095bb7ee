//! Channel-management client seam.
//!
//! The acceptor loop and the auditor only see [`ChannelClient`]; the lnd gRPC
//! implementation lives in [`lnd`], tests substitute their own.

pub mod lnd;
pub mod lnrpc;
pub mod tls;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use tokio::sync::mpsc;

use dustguard_core::error::Result;
use dustguard_core::{AcceptorDecision, OpenChannelInfo, OpenChannelRequest};

pub use lnd::LndClient;

/// Inbound channel proposals. An `Err` item means the exchange broke.
pub type RequestStream = Pin<Box<dyn Stream<Item = Result<OpenChannelRequest>> + Send>>;

/// A decision addressed to the proposal it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptorResponse {
    pub pending_chan_id: Vec<u8>,
    pub decision: AcceptorDecision,
}

/// Both halves of a registered channel acceptor.
pub struct AcceptorExchange {
    pub requests: RequestStream,
    pub responses: mpsc::Sender<AcceptorResponse>,
}

#[async_trait]
pub trait ChannelClient: Send + Sync {
    /// Confirmed open channels. Pending channels are never included.
    async fn list_channels(&self) -> Result<Vec<OpenChannelInfo>>;

    /// Register as the node's channel acceptor.
    async fn open_acceptor(&self) -> Result<AcceptorExchange>;
}
