//! Worst-case dust exposure of an open channel.
//!
//! The estimate assumes every HTLC either party may hold in flight sits
//! exactly at the larger of the two dust limits, all at once:
//!
//! ```text
//! max(local.dust_limit, remote.dust_limit)
//!     * (local.max_accepted_htlcs + remote.max_accepted_htlcs)
//! ```
//!
//! It is an upper bound, never a measured figure. Pending HTLC amounts
//! (`max_pending_amt_msat`) are deliberately left out of it.

use crate::channel::OpenChannelInfo;

/// Default close-recommendation threshold, in satoshis.
pub const DEFAULT_DUST_EXPOSURE_THRESHOLD_SAT: u64 = 500_000;

/// Advisory output for a channel whose estimate exceeds the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRecommendation {
    pub channel_point: String,
    pub max_dust_exposure_sat: u64,
    pub threshold_sat: u64,
}

/// Compares channel exposure estimates against a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DustExposureEstimator {
    threshold_sat: u64,
}

impl Default for DustExposureEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_DUST_EXPOSURE_THRESHOLD_SAT)
    }
}

impl DustExposureEstimator {
    pub fn new(threshold_sat: u64) -> Self {
        Self { threshold_sat }
    }

    pub fn threshold_sat(&self) -> u64 {
        self.threshold_sat
    }

    /// Recommend closing iff the estimate is strictly above the threshold.
    pub fn evaluate(&self, info: &OpenChannelInfo) -> Option<CloseRecommendation> {
        let exposure = max_dust_exposure_sat(info);
        if exposure <= self.threshold_sat {
            return None;
        }
        Some(CloseRecommendation {
            channel_point: info.channel_point.clone(),
            max_dust_exposure_sat: exposure,
            threshold_sat: self.threshold_sat,
        })
    }
}

/// Saturates at `u64::MAX`, which still exceeds every threshold.
pub fn max_dust_exposure_sat(info: &OpenChannelInfo) -> u64 {
    let local = &info.local_constraints;
    let remote = &info.remote_constraints;

    let max_dust_limit = local.dust_limit_sat.max(remote.dust_limit_sat);
    let total_max_htlcs = u64::from(local.max_accepted_htlcs) + u64::from(remote.max_accepted_htlcs);

    max_dust_limit.saturating_mul(total_max_htlcs)
}
