//! Channel-open acceptance policy.
//!
//! A proposal is accepted only when its dust limit falls inside an inclusive
//! range. The lower bound defaults to the dust limit of the smallest P2WSH
//! output the network relays as standard; the upper bound to three times that.

use crate::channel::{AcceptorDecision, OpenChannelRequest};
use crate::error::{DustGuardError, Result};

/// Dust limit of the smallest standard P2WSH output, in satoshis.
pub const MIN_STANDARD_DUST_LIMIT_SAT: u64 = 330;

/// Upper accepted dust limit as a multiple of the lower one.
pub const MAX_DUST_LIMIT_MULTIPLIER: u64 = 3;

/// Decides on a single channel-open proposal.
///
/// Implementations must be total and must not block: the acceptor loop calls
/// `evaluate` inline for every request on the stream.
pub trait ChannelAcceptorPolicy: Send + Sync {
    fn evaluate(&self, req: &OpenChannelRequest) -> AcceptorDecision;
}

/// Dust-limit bounds check. Construct once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DustLimitPolicy {
    min_dust_limit_sat: u64,
    max_dust_limit_sat: u64,
}

impl Default for DustLimitPolicy {
    fn default() -> Self {
        Self {
            min_dust_limit_sat: MIN_STANDARD_DUST_LIMIT_SAT,
            max_dust_limit_sat: MIN_STANDARD_DUST_LIMIT_SAT * MAX_DUST_LIMIT_MULTIPLIER,
        }
    }
}

impl DustLimitPolicy {
    pub fn new(min_dust_limit_sat: u64, max_dust_limit_sat: u64) -> Result<Self> {
        if min_dust_limit_sat > max_dust_limit_sat {
            return Err(DustGuardError::InvalidConfig(format!(
                "min dust limit ({min_dust_limit_sat} sat) exceeds max dust limit ({max_dust_limit_sat} sat)"
            )));
        }
        Ok(Self {
            min_dust_limit_sat,
            max_dust_limit_sat,
        })
    }

    pub fn min_dust_limit_sat(&self) -> u64 {
        self.min_dust_limit_sat
    }

    pub fn max_dust_limit_sat(&self) -> u64 {
        self.max_dust_limit_sat
    }

    /// Both bounds inclusive.
    pub fn is_acceptable(&self, dust_limit_sat: u64) -> bool {
        (self.min_dust_limit_sat..=self.max_dust_limit_sat).contains(&dust_limit_sat)
    }
}

impl ChannelAcceptorPolicy for DustLimitPolicy {
    fn evaluate(&self, req: &OpenChannelRequest) -> AcceptorDecision {
        if self.is_acceptable(req.dust_limit_sat) {
            return AcceptorDecision::accept();
        }
        AcceptorDecision::reject(format!(
            "dust limit {} sat outside accepted range [{}, {}]",
            req.dust_limit_sat, self.min_dust_limit_sat, self.max_dust_limit_sat
        ))
    }
}
