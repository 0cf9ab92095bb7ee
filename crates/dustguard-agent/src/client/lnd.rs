//! lnd gRPC implementation of [`ChannelClient`].
//!
//! lnd serves gRPC over TLS with a self-signed certificate; the connection is
//! pinned to the node's `tls.cert` (see [`super::tls`]). Every call carries
//! the hex-encoded macaroon in the `macaroon` metadata entry.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::transport::Endpoint;

use dustguard_core::error::{DustGuardError, Result};
use dustguard_core::{ChannelConstraints, OpenChannelInfo, OpenChannelRequest};

use super::lnrpc::{self, LightningClient};
use super::tls::{self, PinnedConnector};
use super::{AcceptorExchange, AcceptorResponse, ChannelClient};
use crate::config::NodeSection;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Decisions buffered towards lnd. The loop answers one request at a time,
/// so a small buffer is enough.
const RESPONSE_BUFFER: usize = 16;

/// Injects the node macaroon into request metadata.
#[derive(Clone)]
pub struct MacaroonInterceptor {
    macaroon: MetadataValue<Ascii>,
}

impl MacaroonInterceptor {
    pub fn new(macaroon: &[u8]) -> Result<Self> {
        let macaroon = hex::encode(macaroon)
            .parse()
            .map_err(|_| DustGuardError::ClientSetup("macaroon is not valid metadata".into()))?;
        Ok(Self { macaroon })
    }
}

impl fmt::Debug for MacaroonInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MacaroonInterceptor(..)")
    }
}

impl Interceptor for MacaroonInterceptor {
    fn call(&mut self, mut req: tonic::Request<()>) -> std::result::Result<tonic::Request<()>, tonic::Status> {
        req.metadata_mut().insert("macaroon", self.macaroon.clone());
        Ok(req)
    }
}

/// Connected lnd node.
#[derive(Clone)]
pub struct LndClient {
    lightning: LightningClient,
}

impl LndClient {
    /// Read credentials and dial the node. Every failure is a setup error.
    pub async fn connect(node: &NodeSection) -> Result<Self> {
        let cert = tokio::fs::read(&node.tls_cert_path).await.map_err(|e| {
            DustGuardError::ClientSetup(format!(
                "read tls cert {} failed: {e}",
                node.tls_cert_path.display()
            ))
        })?;

        let macaroon_path = node.macaroon_path();
        let macaroon = tokio::fs::read(&macaroon_path).await.map_err(|e| {
            DustGuardError::ClientSetup(format!(
                "read macaroon {} failed: {e}",
                macaroon_path.display()
            ))
        })?;
        let interceptor = MacaroonInterceptor::new(&macaroon)?;

        let pinned = tls::parse_pem_cert(&cert)?;
        let connector = PinnedConnector::new(&node.host, tls::client_config(pinned)?)?;

        // TLS happens inside the connector, so tonic sees a plain endpoint.
        let url = format!("http://{}", node.host);
        let channel = Endpoint::from_shared(url)
            .map_err(|e| {
                DustGuardError::ClientSetup(format!("invalid endpoint '{}': {}", node.host, error_chain(&e)))
            })?
            .connect_timeout(CONNECT_TIMEOUT)
            .connect_with_connector(connector)
            .await
            .map_err(|e| {
                DustGuardError::ClientSetup(format!("connect to {} failed: {}", node.host, error_chain(&e)))
            })?;

        tracing::debug!(host = %node.host, network = node.network.as_str(), "connected to lnd");

        Ok(Self {
            lightning: LightningClient::new(channel, interceptor),
        })
    }
}

#[async_trait]
impl ChannelClient for LndClient {
    async fn list_channels(&self) -> Result<Vec<OpenChannelInfo>> {
        let mut client = self.lightning.clone();
        let resp = client
            .list_channels(lnrpc::ListChannelsRequest::default())
            .await
            .map_err(|s| DustGuardError::ListChannels(status_message(&s)))?;

        Ok(resp.into_inner().channels.into_iter().map(channel_info).collect())
    }

    async fn open_acceptor(&self) -> Result<AcceptorExchange> {
        let (tx, rx) = mpsc::channel::<AcceptorResponse>(RESPONSE_BUFFER);
        let outbound = ReceiverStream::new(rx).map(accept_response);

        // lnd flushes response headers together with the first proposal, so
        // this resolves once a peer actually tries to open a channel.
        let mut client = self.lightning.clone();
        let inbound = client
            .channel_acceptor(outbound)
            .await
            .map_err(|s| DustGuardError::AcceptorSetup(status_message(&s)))?
            .into_inner();

        let requests = inbound.map(|item| {
            item.map(open_channel_request)
                .map_err(|s| DustGuardError::AcceptorStream(status_message(&s)))
        });

        Ok(AcceptorExchange {
            requests: Box::pin(requests),
            responses: tx,
        })
    }
}

fn status_message(s: &tonic::Status) -> String {
    format!("{:?}: {}", s.code(), s.message())
}

/// `e` followed by its source chain. tonic's transport error alone only
/// reads "transport error".
fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = cause.source();
    }
    out
}

fn constraints(c: Option<lnrpc::ChannelConstraints>) -> ChannelConstraints {
    let c = c.unwrap_or_default();
    ChannelConstraints {
        dust_limit_sat: c.dust_limit_sat,
        max_accepted_htlcs: c.max_accepted_htlcs,
        csv_delay: c.csv_delay,
        chan_reserve_sat: c.chan_reserve_sat,
        max_pending_amt_msat: c.max_pending_amt_msat,
        min_htlc_msat: c.min_htlc_msat,
    }
}

fn channel_info(ch: lnrpc::Channel) -> OpenChannelInfo {
    OpenChannelInfo {
        channel_point: ch.channel_point,
        remote_pubkey: ch.remote_pubkey,
        capacity_sat: u64::try_from(ch.capacity).unwrap_or_default(),
        local_constraints: constraints(ch.local_constraints),
        remote_constraints: constraints(ch.remote_constraints),
    }
}

fn open_channel_request(req: lnrpc::ChannelAcceptRequest) -> OpenChannelRequest {
    OpenChannelRequest {
        node_pubkey: req.node_pubkey,
        pending_chan_id: req.pending_chan_id,
        funding_amt_sat: req.funding_amt,
        push_amt_msat: req.push_amt,
        dust_limit_sat: req.dust_limit,
        max_accepted_htlcs: req.max_accepted_htlcs,
        csv_delay: req.csv_delay,
        channel_reserve_sat: req.channel_reserve,
    }
}

fn accept_response(resp: AcceptorResponse) -> lnrpc::ChannelAcceptResponse {
    let error = if resp.decision.accept {
        String::new()
    } else {
        resp.decision.reason.unwrap_or_default()
    };
    lnrpc::ChannelAcceptResponse {
        accept: resp.decision.accept,
        pending_chan_id: resp.pending_chan_id,
        error,
    }
}
