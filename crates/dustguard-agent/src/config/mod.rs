//! Agent config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use dustguard_core::error::{DustGuardError, Result};

pub use schema::{AcceptorSection, AgentConfig, AuditSection, Network, NodeSection};

pub fn load_from_file(path: &Path) -> Result<AgentConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        DustGuardError::InvalidConfig(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| DustGuardError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
