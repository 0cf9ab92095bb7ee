//! dustguard
//!
//! Default mode: register as the lnd channel acceptor and reject proposals
//! whose dust limit is outside the accepted range.
//! `--check-chans`: list open channels once and log close recommendations for
//! those whose worst-case dust exposure exceeds the threshold.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use dustguard_agent::app_state::AppState;
use dustguard_agent::cli::{Args, Mode};
use dustguard_agent::client::LndClient;
use dustguard_core::Result;

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(class = e.class().as_str(), "{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = args.resolve()?;
    let state = AppState::new(cfg)?;
    let client = LndClient::connect(&state.cfg().node).await?;

    let res = match args.mode() {
        Mode::Audit => state.auditor().run(&client).await.map(|_| ()),
        Mode::Acceptor => {
            let acceptor = state.acceptor();
            tokio::select! {
                res = acceptor.run(&client) => res,
                _ = shutdown_signal() => Ok(()),
            }
        }
    };

    state.metrics().log_summary();
    res
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, shutting down");
}
