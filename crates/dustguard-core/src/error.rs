//! Shared error type across dustguard crates.

use thiserror::Error;

/// Coarse error classes (stable, used in log fields and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad configuration file, flag, or violated threshold invariant.
    Config,
    /// Client construction, acceptor registration, or channel listing.
    Setup,
    /// The acceptor exchange failed or closed mid-stream.
    Transport,
}

impl ErrorClass {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Config => "CONFIG",
            ErrorClass::Setup => "SETUP",
            ErrorClass::Transport => "TRANSPORT",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DustGuardError>;

/// Unified error type used by core and agent.
///
/// Policy and estimator evaluation have no variant here: both are total.
#[derive(Debug, Error)]
pub enum DustGuardError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("unable to create gRPC client: {0}")]
    ClientSetup(String),
    #[error("call to listchannels failed: {0}")]
    ListChannels(String),
    #[error("unable to setup ChannelAcceptor: {0}")]
    AcceptorSetup(String),
    #[error("channel acceptor stream failed: {0}")]
    AcceptorStream(String),
    #[error("channel acceptor stream closed")]
    AcceptorClosed,
}

impl DustGuardError {
    /// Map an error to its class.
    pub fn class(&self) -> ErrorClass {
        match self {
            DustGuardError::InvalidConfig(_) | DustGuardError::UnsupportedVersion => {
                ErrorClass::Config
            }
            DustGuardError::ClientSetup(_)
            | DustGuardError::ListChannels(_)
            | DustGuardError::AcceptorSetup(_) => ErrorClass::Setup,
            DustGuardError::AcceptorStream(_) | DustGuardError::AcceptorClosed => {
                ErrorClass::Transport
            }
        }
    }
}
