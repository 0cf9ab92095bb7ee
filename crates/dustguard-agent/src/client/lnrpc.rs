//! The slice of lnd's `lnrpc.Lightning` service used by the agent.
//!
//! Messages declare only the fields read or written here; tags match
//! `lightning.proto`, and prost skips the rest on decode.

use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::StdError;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel as GrpcChannel;

use super::lnd::MacaroonInterceptor;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListChannelsRequest {
    #[prost(bool, tag = "1")]
    pub active_only: bool,
    #[prost(bool, tag = "2")]
    pub inactive_only: bool,
    #[prost(bool, tag = "3")]
    pub public_only: bool,
    #[prost(bool, tag = "4")]
    pub private_only: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListChannelsResponse {
    #[prost(message, repeated, tag = "11")]
    pub channels: Vec<Channel>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Channel {
    #[prost(bool, tag = "1")]
    pub active: bool,
    #[prost(string, tag = "2")]
    pub remote_pubkey: String,
    #[prost(string, tag = "3")]
    pub channel_point: String,
    #[prost(uint64, tag = "4")]
    pub chan_id: u64,
    #[prost(int64, tag = "5")]
    pub capacity: i64,
    #[prost(message, optional, tag = "29")]
    pub local_constraints: Option<ChannelConstraints>,
    #[prost(message, optional, tag = "30")]
    pub remote_constraints: Option<ChannelConstraints>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelConstraints {
    #[prost(uint32, tag = "1")]
    pub csv_delay: u32,
    #[prost(uint64, tag = "2")]
    pub chan_reserve_sat: u64,
    #[prost(uint64, tag = "3")]
    pub dust_limit_sat: u64,
    #[prost(uint64, tag = "4")]
    pub max_pending_amt_msat: u64,
    #[prost(uint64, tag = "5")]
    pub min_htlc_msat: u64,
    #[prost(uint32, tag = "6")]
    pub max_accepted_htlcs: u32,
}

/// Sent by lnd for each inbound channel proposal.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelAcceptRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub node_pubkey: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub chain_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub pending_chan_id: Vec<u8>,
    #[prost(uint64, tag = "4")]
    pub funding_amt: u64,
    #[prost(uint64, tag = "5")]
    pub push_amt: u64,
    #[prost(uint64, tag = "6")]
    pub dust_limit: u64,
    #[prost(uint64, tag = "7")]
    pub max_value_in_flight: u64,
    #[prost(uint64, tag = "8")]
    pub channel_reserve: u64,
    #[prost(uint64, tag = "9")]
    pub min_htlc: u64,
    #[prost(uint64, tag = "10")]
    pub fee_per_kw: u64,
    #[prost(uint32, tag = "11")]
    pub csv_delay: u32,
    #[prost(uint32, tag = "12")]
    pub max_accepted_htlcs: u32,
    #[prost(uint32, tag = "13")]
    pub channel_flags: u32,
}

/// Our answer to one [`ChannelAcceptRequest`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelAcceptResponse {
    #[prost(bool, tag = "1")]
    pub accept: bool,
    #[prost(bytes = "vec", tag = "2")]
    pub pending_chan_id: Vec<u8>,
    /// Must be empty when `accept` is set; lnd rejects the response otherwise.
    #[prost(string, tag = "3")]
    pub error: String,
}

type LndService = InterceptedService<GrpcChannel, MacaroonInterceptor>;

/// Minimal `lnrpc.Lightning` client, shaped like tonic-build output.
#[derive(Clone)]
pub struct LightningClient {
    inner: tonic::client::Grpc<LndService>,
}

impl LightningClient {
    pub fn new(channel: GrpcChannel, interceptor: MacaroonInterceptor) -> Self {
        Self {
            inner: tonic::client::Grpc::new(InterceptedService::new(channel, interceptor)),
        }
    }

    async fn ready(&mut self) -> Result<(), tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            let e: StdError = e.into();
            tonic::Status::unknown(format!("Service was not ready: {e}"))
        })
    }

    pub async fn list_channels(
        &mut self,
        request: impl tonic::IntoRequest<ListChannelsRequest>,
    ) -> Result<tonic::Response<ListChannelsResponse>, tonic::Status> {
        self.ready().await?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static("/lnrpc.Lightning/ListChannels");
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn channel_acceptor(
        &mut self,
        request: impl tonic::IntoStreamingRequest<Message = ChannelAcceptResponse>,
    ) -> Result<tonic::Response<tonic::codec::Streaming<ChannelAcceptRequest>>, tonic::Status> {
        self.ready().await?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static("/lnrpc.Lightning/ChannelAcceptor");
        self.inner
            .streaming(request.into_streaming_request(), path, codec)
            .await
    }
}
