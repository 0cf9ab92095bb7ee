//! Command line interface.
//!
//! Flags mirror the usual lnd client flags. Every value can also come from an
//! optional YAML file (`--config`); a flag given on the command line wins over
//! the file.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use dustguard_core::error::{DustGuardError, Result};

use crate::config::{self, AgentConfig, Network};

/// Rejects channel proposals with unusual dust limits, or audits open
/// channels for dust exposure.
#[derive(Parser, Debug, Clone)]
#[command(name = "dustguard", version, long_about = None)]
pub struct Args {
    /// YAML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// host of the target lnd node [default: localhost:10009]
    #[arg(long)]
    pub host: Option<String>,

    /// path to the TLS cert of the target lnd node [default: <lnd dir>/tls.cert]
    #[arg(long = "tlspath")]
    pub tls_path: Option<PathBuf>,

    /// path of admin.macaroon for the target lnd node
    #[arg(long = "macdir")]
    pub macaroon_path: Option<PathBuf>,

    /// the network the lnd node is running on [default: mainnet]
    #[arg(long, value_enum)]
    pub network: Option<Network>,

    /// check existing channels for dust exposure instead of running the acceptor
    #[arg(long = "check-chans")]
    pub check_chans: bool,

    /// dust exposure threshold in satoshis for close recommendations [default: 500000]
    #[arg(long = "dustexposure")]
    pub dust_exposure: Option<u64>,
}

/// Which flow the binary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Acceptor,
    Audit,
}

impl Args {
    /// Parse given iterator. Used by tests instead of the process arguments.
    pub fn parse_from_iter<I, T>(itr: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Args::try_parse_from(itr).map_err(|e| DustGuardError::InvalidConfig(e.to_string()))
    }

    pub fn mode(&self) -> Mode {
        if self.check_chans {
            Mode::Audit
        } else {
            Mode::Acceptor
        }
    }

    /// Load the config file (or defaults), then apply flag overrides.
    pub fn resolve(&self) -> Result<AgentConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => AgentConfig::default(),
        };
        self.apply(&mut cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply(&self, cfg: &mut AgentConfig) {
        if let Some(host) = &self.host {
            cfg.node.host = host.clone();
        }
        if let Some(path) = &self.tls_path {
            cfg.node.tls_cert_path = path.clone();
        }
        if let Some(path) = &self.macaroon_path {
            cfg.node.macaroon_path = Some(path.clone());
        }
        if let Some(network) = self.network {
            cfg.node.network = network;
        }
        if let Some(threshold) = self.dust_exposure {
            cfg.audit.dust_exposure_threshold_sat = threshold;
        }
    }
}
