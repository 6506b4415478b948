//! Client configuration.
//!
//! Timeouts are written as milliseconds in TOML:
//!
//! ```toml
//! endpoint = "http://ydb.internal:2135"
//! operation_timeout_ms = 30000
//! cancel_after_ms = 60000
//! connect_timeout_ms = 5000
//! ```
//!
//! ## Environment Variables
//!
//! - `TOPICLINE_ENDPOINT`
//! - `TOPICLINE_OPERATION_TIMEOUT_MS`
//! - `TOPICLINE_CANCEL_AFTER_MS`
//! - `TOPICLINE_CONNECT_TIMEOUT_MS`
//!
//! Unset variables keep their defaults.

use crate::error::{Result, TopicError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "http://localhost:2135";

/// Settings for [`TopicClient`](crate::TopicClient) and [`GrpcTopicService`](crate::GrpcTopicService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// gRPC endpoint of the topic service.
    pub endpoint: String,

    /// How long the server may spend on an operation before giving up.
    #[serde(rename = "operation_timeout_ms", with = "millis")]
    pub operation_timeout: Duration,

    /// After this long the server cancels the operation. Unset leaves it to
    /// the server.
    #[serde(rename = "cancel_after_ms", with = "opt_millis")]
    pub cancel_after: Option<Duration>,

    /// Timeout for opening the channel.
    #[serde(rename = "connect_timeout_ms", with = "millis")]
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            operation_timeout: Duration::from_secs(10),
            cancel_after: None,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn with_cancel_after(mut self, cancel_after: Duration) -> Self {
        self.cancel_after = Some(cancel_after);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Load from `TOPICLINE_*` environment variables on top of the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(s).map_err(|e| TopicError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(TopicError::config("endpoint must not be empty"));
        }
        if self.operation_timeout.is_zero() {
            return Err(TopicError::config("operation_timeout must be positive"));
        }
        if self.connect_timeout.is_zero() {
            return Err(TopicError::config("connect_timeout must be positive"));
        }
        Ok(())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("TOPICLINE_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(ms) = lookup("TOPICLINE_OPERATION_TIMEOUT_MS") {
            config.operation_timeout = parse_millis("TOPICLINE_OPERATION_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("TOPICLINE_CANCEL_AFTER_MS") {
            config.cancel_after = Some(parse_millis("TOPICLINE_CANCEL_AFTER_MS", &ms)?);
        }
        if let Some(ms) = lookup("TOPICLINE_CONNECT_TIMEOUT_MS") {
            config.connect_timeout = parse_millis("TOPICLINE_CONNECT_TIMEOUT_MS", &ms)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_millis(var: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| TopicError::config(format!("{var}={value:?}: {e}")))
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

mod opt_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(d).map(|ms| ms.map(Duration::from_millis))
    }
}
