//! Topicline Protocol Buffer Definitions
//!
//! This crate contains the wire messages of the topic service and the gRPC
//! client used to send them. Application code normally never touches these
//! types directly; `topicline-client` renders its parameter objects into them.
//!
//! ## Packages
//!
//! - **topic**: `TopicService` (CreateTopic, AlterTopic, DropTopic, DescribeTopic)
//!   and every message those RPCs carry
//! - **scheme**: generic scheme entry embedded in describe results
//! - **operation**: per-request operation parameters and status codes
//!
//! ## Presence
//!
//! Optional scalars are proto3 `optional` fields (`Option<T>` in Rust), so an
//! explicit zero is distinguishable from "not set" on the wire. Codec lists and
//! alter attribute maps are wrapped in messages for the same reason.
//!
//! ## Code generation
//!
//! The modules below are generated by `tonic-build` from `proto/*.proto` at
//! build time (see `build.rs`).
//!
//! ## Usage
//!
//! ```ignore
//! use topicline_proto::topic::{topic_service_client::TopicServiceClient, DropTopicRequest};
//!
//! let mut client = TopicServiceClient::connect("http://localhost:2135").await?;
//! let response = client
//!     .drop_topic(DropTopicRequest {
//!         operation_params: None,
//!         path: "/local/orders".to_string(),
//!     })
//!     .await?;
//! println!("status: {}", response.into_inner().status);
//! ```

/// Per-request operation parameters and status codes.
pub mod operation {
    tonic::include_proto!("topicline.operation");
}

/// Scheme entries (name, owner, type, permissions).
pub mod scheme {
    tonic::include_proto!("topicline.scheme");
}

/// Topic service messages and client.
pub mod topic {
    tonic::include_proto!("topicline.topic");
}
