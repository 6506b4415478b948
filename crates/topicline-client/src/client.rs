//! Topic client.
//!
//! [`TopicClient`] turns parameter objects into wire requests, sends them
//! through a [`TopicService`] and turns the responses back into public types.
//! [`GrpcTopicService`] is the tonic-backed service; tests plug in their own.
//!
//! Each call is a single attempt. Callers that want retries can check
//! [`TopicError::is_retryable`].
//!
//! ## Example
//!
//! ```ignore
//! use topicline_client::{ClientConfig, CreateTopicParams, DescribeTopicParams, TopicClient};
//!
//! let client = TopicClient::connect(ClientConfig::from_env()?).await?;
//!
//! client
//!     .create_topic(&CreateTopicParams::builder("/local/orders").min_active_partitions(2).build()?)
//!     .await?;
//!
//! let topic = client
//!     .describe_topic(&DescribeTopicParams::new("/local/orders", true)?)
//!     .await?;
//! println!("{} partitions", topic.partitions.len());
//! ```

use crate::config::ClientConfig;
use crate::describe::DescribeTopicResult;
use crate::error::{Result, TopicError};
use crate::topic::{AlterTopicParams, CreateTopicParams, DescribeTopicParams, DropTopicParams};
use crate::wire::{duration_to_wire, ensure_alter_presence};
use async_trait::async_trait;
use topicline_proto::operation::{IssueMessage, OperationParams, StatusCode};
use topicline_proto::topic::{self as pb, topic_service_client::TopicServiceClient};
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info, warn};

/// Transport seam: one method per RPC, wire messages in and out.
#[async_trait]
pub trait TopicService: Send + Sync {
    async fn create_topic(&self, request: pb::CreateTopicRequest)
        -> Result<pb::CreateTopicResponse>;

    async fn alter_topic(&self, request: pb::AlterTopicRequest) -> Result<pb::AlterTopicResponse>;

    async fn drop_topic(&self, request: pb::DropTopicRequest) -> Result<pb::DropTopicResponse>;

    async fn describe_topic(
        &self,
        request: pb::DescribeTopicRequest,
    ) -> Result<pb::DescribeTopicResponse>;
}

/// [`TopicService`] over a tonic channel.
#[derive(Debug, Clone)]
pub struct GrpcTopicService {
    client: TopicServiceClient<Channel>,
}

impl GrpcTopicService {
    /// Open a channel to `config.endpoint`.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(config.connect_timeout)
            .connect()
            .await?;
        debug!(endpoint = %config.endpoint, "Connected to topic service");
        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self {
            client: TopicServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl TopicService for GrpcTopicService {
    async fn create_topic(
        &self,
        request: pb::CreateTopicRequest,
    ) -> Result<pb::CreateTopicResponse> {
        let mut client = self.client.clone();
        Ok(client.create_topic(request).await?.into_inner())
    }

    async fn alter_topic(&self, request: pb::AlterTopicRequest) -> Result<pb::AlterTopicResponse> {
        let mut client = self.client.clone();
        Ok(client.alter_topic(request).await?.into_inner())
    }

    async fn drop_topic(&self, request: pb::DropTopicRequest) -> Result<pb::DropTopicResponse> {
        let mut client = self.client.clone();
        Ok(client.drop_topic(request).await?.into_inner())
    }

    async fn describe_topic(
        &self,
        request: pb::DescribeTopicRequest,
    ) -> Result<pb::DescribeTopicResponse> {
        let mut client = self.client.clone();
        Ok(client.describe_topic(request).await?.into_inner())
    }
}

/// Operation status carried by every response.
trait OperationStatus {
    fn status(&self) -> i32;
    fn issues(&self) -> &[IssueMessage];
}

macro_rules! impl_operation_status {
    ($($response:ty),*) => {
        $(
            impl OperationStatus for $response {
                fn status(&self) -> i32 {
                    self.status
                }

                fn issues(&self) -> &[IssueMessage] {
                    &self.issues
                }
            }
        )*
    };
}

impl_operation_status!(
    pb::CreateTopicResponse,
    pb::AlterTopicResponse,
    pb::DropTopicResponse,
    pb::DescribeTopicResponse
);

fn check_status(operation: &'static str, path: &str, response: &impl OperationStatus) -> Result<()> {
    let raw = response.status();
    let status = StatusCode::try_from(raw).unwrap_or(StatusCode::Unspecified);
    if status == StatusCode::Success {
        return Ok(());
    }

    let mut message = response
        .issues()
        .iter()
        .map(|issue| issue.message.as_str())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    if status == StatusCode::Unspecified && raw != 0 {
        message = format!("unknown status code {raw}; {message}");
    }

    warn!(
        operation,
        path,
        status = status.as_str_name(),
        %message,
        "Topic operation rejected"
    );
    Err(TopicError::Server { status, message })
}

/// Client for topic management operations.
pub struct TopicClient<S = GrpcTopicService> {
    service: S,
    config: ClientConfig,
}

impl TopicClient<GrpcTopicService> {
    /// Connect to `config.endpoint` over gRPC.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let service = GrpcTopicService::connect(&config).await?;
        Ok(Self::new(service, config))
    }
}

impl<S: TopicService> TopicClient<S> {
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn operation_params(&self) -> OperationParams {
        OperationParams {
            operation_timeout: Some(duration_to_wire(self.config.operation_timeout)),
            cancel_after: self.config.cancel_after.map(duration_to_wire),
        }
    }

    pub async fn create_topic(&self, params: &CreateTopicParams) -> Result<()> {
        let path = params.path();
        debug!(path, "Creating topic");

        let mut request = params.to_wire();
        request.operation_params = Some(self.operation_params());

        let response = self.service.create_topic(request).await?;
        check_status("CreateTopic", path, &response)?;

        info!(path, "Topic created");
        Ok(())
    }

    /// Apply a change to an existing topic. Fields the params leave unset are
    /// not sent, so the server keeps their current values.
    pub async fn alter_topic(&self, params: &AlterTopicParams) -> Result<()> {
        let path = params.path();
        debug!(path, noop = params.is_noop(), "Altering topic");

        let mut request = params.to_wire();
        ensure_alter_presence(params, &request)?;
        request.operation_params = Some(self.operation_params());

        let response = self.service.alter_topic(request).await?;
        check_status("AlterTopic", path, &response)?;

        debug!(path, "Topic altered");
        Ok(())
    }

    pub async fn drop_topic(&self, params: &DropTopicParams) -> Result<()> {
        let path = params.path();
        debug!(path, "Dropping topic");

        let mut request = params.to_wire();
        request.operation_params = Some(self.operation_params());

        let response = self.service.drop_topic(request).await?;
        check_status("DropTopic", path, &response)?;

        info!(path, "Topic dropped");
        Ok(())
    }

    pub async fn describe_topic(&self, params: &DescribeTopicParams) -> Result<DescribeTopicResult> {
        let path = params.path();
        debug!(path, include_stats = params.include_stats(), "Describing topic");

        let mut request = params.to_wire();
        request.operation_params = Some(self.operation_params());

        let response = self.service.describe_topic(request).await?;
        check_status("DescribeTopic", path, &response)?;

        let result = response.result.ok_or_else(|| {
            TopicError::decode(format!("describe response for {path} carried no result"))
        })?;
        DescribeTopicResult::from_wire(result)
    }
}
