//! Shared application state for the dustguard agent.
//!
//! Built once from a validated [`AgentConfig`]; thresholds are compiled into
//! the policy and estimator here and never change afterwards.

use std::sync::Arc;
use std::time::Duration;

use dustguard_core::error::Result;
use dustguard_core::{ChannelAcceptorPolicy, DustExposureEstimator};

use crate::acceptor::DustAcceptor;
use crate::audit::DustAuditor;
use crate::config::AgentConfig;
use crate::obs::AgentMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<AgentMetrics>,
}

struct AppStateInner {
    cfg: AgentConfig,
    policy: Arc<dyn ChannelAcceptorPolicy>,
    estimator: DustExposureEstimator,
}

impl AppState {
    /// Returns Result so main can report a bad config instead of panicking.
    pub fn new(cfg: AgentConfig) -> Result<Self> {
        cfg.validate()?;

        let policy = cfg.acceptor.policy()?;
        let estimator = cfg.audit.estimator();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                policy: Arc::new(policy),
                estimator,
            }),
            metrics: Arc::new(AgentMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &AgentConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<AgentMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn acceptor(&self) -> DustAcceptor {
        DustAcceptor::new(
            Arc::clone(&self.inner.policy),
            Duration::from_millis(self.inner.cfg.acceptor.timeout_ms),
            self.metrics(),
        )
    }

    pub fn auditor(&self) -> DustAuditor {
        DustAuditor::new(self.inner.estimator, self.metrics())
    }
}
