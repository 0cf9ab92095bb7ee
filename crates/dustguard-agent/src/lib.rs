//! dustguard agent library entry.
//!
//! This crate wires the config, the lnd client, the acceptor loop, and the
//! channel auditor around the pure policy in `dustguard-core`. It is consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod acceptor;
pub mod app_state;
pub mod audit;
pub mod cli;
pub mod client;
pub mod config;
pub mod obs;
