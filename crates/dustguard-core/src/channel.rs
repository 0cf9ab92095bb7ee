//! Channel domain types.
//!
//! Amounts are integer satoshis unless the field name ends in `_msat`.

use serde::{Deserialize, Serialize};

/// Limits one channel party negotiated at open time. Immutable once the
/// channel is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConstraints {
    /// Outputs below this value are dropped from the commitment transaction.
    pub dust_limit_sat: u64,
    /// Cap on simultaneously pending HTLCs this party accepts.
    pub max_accepted_htlcs: u32,
    #[serde(default)]
    pub csv_delay: u32,
    #[serde(default)]
    pub chan_reserve_sat: u64,
    /// Not part of the exposure estimate (see `exposure`).
    #[serde(default)]
    pub max_pending_amt_msat: u64,
    #[serde(default)]
    pub min_htlc_msat: u64,
}

/// A channel proposed by a remote peer, pending our accept/reject decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenChannelRequest {
    /// Proposing node's identity key.
    #[serde(default)]
    pub node_pubkey: Vec<u8>,
    /// Correlates the decision with this proposal on the acceptor stream.
    #[serde(default)]
    pub pending_chan_id: Vec<u8>,
    #[serde(default)]
    pub funding_amt_sat: u64,
    #[serde(default)]
    pub push_amt_msat: u64,
    /// Dust limit the peer proposes for this channel.
    pub dust_limit_sat: u64,
    #[serde(default)]
    pub max_accepted_htlcs: u32,
    #[serde(default)]
    pub csv_delay: u32,
    #[serde(default)]
    pub channel_reserve_sat: u64,
}

/// Outcome of evaluating one [`OpenChannelRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptorDecision {
    pub accept: bool,
    /// Rejection reason forwarded to the peer. Always `None` on accept.
    #[serde(default)]
    pub reason: Option<String>,
}

impl AcceptorDecision {
    pub fn accept() -> Self {
        Self {
            accept: true,
            reason: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accept: false,
            reason: Some(reason.into()),
        }
    }
}

/// Snapshot of a confirmed, open channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenChannelInfo {
    /// Funding outpoint, `txid:index`.
    pub channel_point: String,
    #[serde(default)]
    pub remote_pubkey: String,
    #[serde(default)]
    pub capacity_sat: u64,
    pub local_constraints: ChannelConstraints,
    pub remote_constraints: ChannelConstraints,
}
