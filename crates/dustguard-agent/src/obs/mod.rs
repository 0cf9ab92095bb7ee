//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics and rendered once when a run ends.

pub mod metrics;

pub use metrics::AgentMetrics;
