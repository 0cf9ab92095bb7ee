use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;

use dustguard_core::error::{DustGuardError, Result};
use dustguard_core::exposure::DEFAULT_DUST_EXPOSURE_THRESHOLD_SAT;
use dustguard_core::policy::{MAX_DUST_LIMIT_MULTIPLIER, MIN_STANDARD_DUST_LIMIT_SAT};
use dustguard_core::{DustExposureEstimator, DustLimitPolicy};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub node: NodeSection,

    #[serde(default)]
    pub acceptor: AcceptorSection,

    #[serde(default)]
    pub audit: AuditSection,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            version: 1,
            node: NodeSection::default(),
            acceptor: AcceptorSection::default(),
            audit: AuditSection::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DustGuardError::UnsupportedVersion);
        }

        self.node.validate()?;
        self.acceptor.validate()?;

        Ok(())
    }
}

/// Bitcoin network the lnd node runs on. Selects the default macaroon path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Regtest,
    Simnet,
    Signet,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
            Network::Simnet => "simnet",
            Network::Signet => "signet",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_tls_cert_path")]
    pub tls_cert_path: PathBuf,

    /// Falls back to the admin macaroon of `network` under the lnd dir.
    #[serde(default)]
    pub macaroon_path: Option<PathBuf>,

    #[serde(default)]
    pub network: Network,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            tls_cert_path: default_tls_cert_path(),
            macaroon_path: None,
            network: Network::default(),
        }
    }
}

impl NodeSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(DustGuardError::InvalidConfig("node.host must not be empty".into()));
        }
        if self.host.contains("://") {
            return Err(DustGuardError::InvalidConfig(
                "node.host must be host:port without a scheme".into(),
            ));
        }
        Ok(())
    }

    pub fn macaroon_path(&self) -> PathBuf {
        self.macaroon_path
            .clone()
            .unwrap_or_else(|| default_macaroon_path(self.network))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcceptorSection {
    /// Upper bound for answering one channel-open request.
    #[serde(default = "default_acceptor_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_min_dust_limit_sat")]
    pub min_dust_limit_sat: u64,

    #[serde(default = "default_max_dust_limit_sat")]
    pub max_dust_limit_sat: u64,
}

impl Default for AcceptorSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_acceptor_timeout_ms(),
            min_dust_limit_sat: default_min_dust_limit_sat(),
            max_dust_limit_sat: default_max_dust_limit_sat(),
        }
    }
}

impl AcceptorSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(DustGuardError::InvalidConfig(
                "acceptor.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if self.min_dust_limit_sat > self.max_dust_limit_sat {
            return Err(DustGuardError::InvalidConfig(
                "acceptor.min_dust_limit_sat must not exceed acceptor.max_dust_limit_sat".into(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> Result<DustLimitPolicy> {
        DustLimitPolicy::new(self.min_dust_limit_sat, self.max_dust_limit_sat)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditSection {
    #[serde(default = "default_dust_exposure_threshold_sat")]
    pub dust_exposure_threshold_sat: u64,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            dust_exposure_threshold_sat: default_dust_exposure_threshold_sat(),
        }
    }
}

impl AuditSection {
    pub fn estimator(&self) -> DustExposureEstimator {
        DustExposureEstimator::new(self.dust_exposure_threshold_sat)
    }
}

fn default_host() -> String {
    "localhost:10009".into()
}
fn default_acceptor_timeout_ms() -> u64 {
    10000
}
fn default_min_dust_limit_sat() -> u64 {
    MIN_STANDARD_DUST_LIMIT_SAT
}
fn default_max_dust_limit_sat() -> u64 {
    MIN_STANDARD_DUST_LIMIT_SAT * MAX_DUST_LIMIT_MULTIPLIER
}
fn default_dust_exposure_threshold_sat() -> u64 {
    DEFAULT_DUST_EXPOSURE_THRESHOLD_SAT
}

/// lnd's application data directory for the current platform.
pub fn default_lnd_dir() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    if cfg!(target_os = "macos") {
        home.join("Library").join("Application Support").join("Lnd")
    } else if cfg!(windows) {
        std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or(home)
            .join("Lnd")
    } else {
        home.join(".lnd")
    }
}

fn default_tls_cert_path() -> PathBuf {
    default_lnd_dir().join("tls.cert")
}

fn default_macaroon_path(network: Network) -> PathBuf {
    default_lnd_dir()
        .join("data")
        .join("chain")
        .join("bitcoin")
        .join(network.as_str())
        .join("admin.macaroon")
}
