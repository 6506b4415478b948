//! Topicline Client - Topic management API
//!
//! This crate provides typed parameter and result objects for the topic
//! service (create, alter, drop and describe a topic), the mapping between
//! those objects and the wire messages in `topicline-proto`, and a thin async
//! client that sends them.
//!
//! # Optionality
//!
//! Request fields come in three states: unset, set to a zero value, and set
//! to a non-zero value. Unset is `None` and is never sent; `Some(0)` is sent.
//! For alter requests this is the difference between "leave as is" and
//! "change to zero".
//!
//! # Examples
//!
//! ## Create
//!
//! ```ignore
//! use std::time::Duration;
//! use topicline_client::{ClientConfig, Codec, Consumer, CreateTopicParams, TopicClient};
//!
//! let client = TopicClient::connect(ClientConfig::default()).await?;
//!
//! let params = CreateTopicParams::builder("/local/orders")
//!     .min_active_partitions(2)
//!     .retention_period(Duration::from_secs(24 * 3600))
//!     .supported_codecs([Codec::RAW, Codec::ZSTD])
//!     .consumer(Consumer::new("billing").important(true))
//!     .build()?;
//! client.create_topic(&params).await?;
//! ```
//!
//! ## Alter
//!
//! ```ignore
//! use topicline_client::{AlterConsumer, AlterTopicParams};
//!
//! let params = AlterTopicParams::builder("/local/orders")
//!     .set_retention_storage_mb(0)
//!     .alter_consumer(AlterConsumer::new("billing").set_important(false))
//!     .drop_consumer("legacy")
//!     .build()?;
//! client.alter_topic(&params).await?;
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod consumer;
pub mod describe;
pub mod error;
pub mod scheme;
pub mod settings;
pub mod topic;
mod wire;

pub use client::{GrpcTopicService, TopicClient, TopicService};
pub use codec::Codec;
pub use config::ClientConfig;
pub use consumer::{AlterConsumer, Consumer, ConsumerStats};
pub use describe::{
    AutoPartitioningState, DescribeTopicResult, PartitionInfo, PartitionStats, TopicStats,
};
pub use error::{Result, TopicError, ValidationError};
pub use scheme::{Permissions, SchemeEntry, SchemeEntryType};
pub use settings::{
    AlterAutoPartitioningSettings, AutoPartitioningSettings, AutoPartitioningStrategy,
    MeteringMode, MultipleWindowsStat,
};
pub use topic::{
    AlterTopicParams, AlterTopicParamsBuilder, CreateTopicParams, CreateTopicParamsBuilder,
    DescribeTopicParams, DropTopicParams,
};

/// Wire message types, re-exported for callers implementing [`TopicService`].
pub use topicline_proto as proto;
