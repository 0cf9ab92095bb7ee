//! Channel acceptor loop.
//!
//! Registers with the node as its channel acceptor and answers every
//! proposal with the configured [`ChannelAcceptorPolicy`]. Requests are
//! handled one at a time, in arrival order; backpressure comes from the
//! exchange itself. Decisions are only logged at debug level.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use dustguard_core::error::{DustGuardError, Result};
use dustguard_core::ChannelAcceptorPolicy;

use crate::client::{AcceptorExchange, AcceptorResponse, ChannelClient};
use crate::obs::AgentMetrics;

pub struct DustAcceptor {
    policy: Arc<dyn ChannelAcceptorPolicy>,
    timeout: Duration,
    metrics: Arc<AgentMetrics>,
}

impl DustAcceptor {
    pub fn new(
        policy: Arc<dyn ChannelAcceptorPolicy>,
        timeout: Duration,
        metrics: Arc<AgentMetrics>,
    ) -> Self {
        Self {
            policy,
            timeout,
            metrics,
        }
    }

    /// Run until the exchange terminates.
    ///
    /// Never returns `Ok`: registration failures surface as setup errors,
    /// anything after that as transport errors (`AcceptorClosed` when the
    /// node ends the stream cleanly).
    pub async fn run(&self, client: &dyn ChannelClient) -> Result<()> {
        info!("Creating dust acceptor, no output will be recorded unless it errors out.");

        let AcceptorExchange {
            mut requests,
            responses,
        } = client.open_acceptor().await?;

        while let Some(item) = requests.next().await {
            let req = item?;
            let received = Instant::now();

            let decision = self.policy.evaluate(&req);
            let outcome = if decision.accept { "accept" } else { "reject" };

            debug!(
                node = %hex::encode(&req.node_pubkey),
                pending_chan_id = %hex::encode(&req.pending_chan_id),
                dust_limit_sat = req.dust_limit_sat,
                funding_amt_sat = req.funding_amt_sat,
                outcome,
                reason = decision.reason.as_deref().unwrap_or(""),
                "channel proposal evaluated"
            );

            let resp = AcceptorResponse {
                pending_chan_id: req.pending_chan_id,
                decision,
            };

            let remaining = self.timeout.saturating_sub(received.elapsed());
            match tokio::time::timeout(remaining, responses.send(resp)).await {
                Ok(Ok(())) => {
                    self.metrics.decisions.inc(&[("outcome", outcome)]);
                    self.metrics
                        .decision_duration
                        .observe(&[("outcome", outcome)], received.elapsed());
                }
                Ok(Err(_)) => {
                    return Err(DustGuardError::AcceptorStream(
                        "decision channel closed".into(),
                    ));
                }
                Err(_) => {
                    self.metrics.send_timeouts.inc(&[]);
                    warn!(
                        timeout_ms = self.timeout.as_millis() as u64,
                        dust_limit_sat = req.dust_limit_sat,
                        "decision not delivered before the acceptor timeout; node default applies"
                    );
                }
            }
        }

        Err(DustGuardError::AcceptorClosed)
    }
}
