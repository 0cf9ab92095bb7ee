//! One-shot dust exposure audit of open channels.

use std::sync::Arc;

use tracing::{info, warn};

use dustguard_core::error::Result;
use dustguard_core::{CloseRecommendation, DustExposureEstimator, OpenChannelInfo};

use crate::client::ChannelClient;
use crate::obs::AgentMetrics;

/// Outcome of one audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub evaluated: usize,
    pub recommendations: Vec<CloseRecommendation>,
}

pub struct DustAuditor {
    estimator: DustExposureEstimator,
    metrics: Arc<AgentMetrics>,
}

impl DustAuditor {
    pub fn new(estimator: DustExposureEstimator, metrics: Arc<AgentMetrics>) -> Self {
        Self { estimator, metrics }
    }

    /// Fetch confirmed channels and evaluate each of them. Only the fetch
    /// can fail.
    pub async fn run(&self, client: &dyn ChannelClient) -> Result<AuditReport> {
        let channels = client.list_channels().await?;

        info!(
            channels = channels.len(),
            threshold_sat = self.estimator.threshold_sat(),
            "Evaluating set of channels for dust exposure"
        );

        let report = self.evaluate_all(&channels);

        info!(
            evaluated = report.evaluated,
            flagged = report.recommendations.len(),
            "dust exposure audit complete"
        );
        Ok(report)
    }

    pub fn evaluate_all(&self, channels: &[OpenChannelInfo]) -> AuditReport {
        let mut report = AuditReport::default();

        for channel in channels {
            report.evaluated += 1;
            self.metrics.channels_audited.inc(&[]);

            let Some(rec) = self.estimator.evaluate(channel) else { continue; };

            warn!(
                "Consider closing chanpoint({}), dust exposure({} sat) higher than threshold({} sat)",
                rec.channel_point, rec.max_dust_exposure_sat, rec.threshold_sat
            );
            self.metrics.close_recommendations.inc(&[]);
            report.recommendations.push(rec);
        }

        report
    }
}
