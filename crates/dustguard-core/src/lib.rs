//! dustguard core: channel-open policy and dust-exposure estimation.
//!
//! This crate holds the decision logic shared by the acceptor loop and the
//! channel auditor: the domain types describing channels and channel-open
//! proposals, the dust-limit bounds check, and the worst-case dust exposure
//! estimate. It carries no transport or runtime dependencies; every function
//! here is pure and deterministic.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Evaluation is total over its input domain, so the only fallible paths are
//! threshold construction and the error surface shared with the agent.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod channel;
pub mod error;
pub mod exposure;
pub mod policy;

/// Shared result type.
pub use error::{DustGuardError, ErrorClass, Result};

pub use channel::{AcceptorDecision, ChannelConstraints, OpenChannelInfo, OpenChannelRequest};
pub use exposure::{CloseRecommendation, DustExposureEstimator};
pub use policy::{ChannelAcceptorPolicy, DustLimitPolicy};
