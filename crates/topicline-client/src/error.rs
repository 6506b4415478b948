//! Error types for topic client operations.
//!
//! Errors are grouped by where they originate so callers can tell a bad
//! parameter object apart from a server rejection or a broken connection.
//!
//! ## Error Categories
//!
//! - **Construction** (`Validation`): raised by `build()` / `Codec::new()` before
//!   anything is mapped or sent
//! - **Mapping** (`MappingInvariant`): a request would carry a value the caller
//!   never set; unreachable for objects that passed validation
//! - **Decoding** (`Decode`): the server sent a value the public model cannot
//!   represent (negative duration, negative codec, timestamp out of range)
//! - **Server** (`Server`): the request reached the service and was rejected
//! - **Transport** (`Transport`, `Connect`): passed through from tonic unchanged
//! - **Configuration** (`Config`)
//!
//! ## Examples
//!
//! ```ignore
//! use topicline_client::{CreateTopicParams, TopicError};
//!
//! match client.create_topic(params).await {
//!     Ok(()) => println!("created"),
//!     Err(TopicError::Server { status, message }) => {
//!         eprintln!("rejected with {}: {}", status.as_str_name(), message);
//!     }
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```

use thiserror::Error;
use topicline_proto::operation::StatusCode;

/// Convenience alias used by every fallible API in this crate.
pub type Result<T> = std::result::Result<T, TopicError>;

/// Malformed input detected while constructing a parameter object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required string was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Codecs are non-negative integers.
    #[error("codec must be non-negative, got {0}")]
    NegativeCodec(i64),

    /// A count, size or rate was negative.
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    /// Utilization thresholds are percentages.
    #[error("{field} must be within 0..=100, got {value}")]
    PercentOutOfRange { field: &'static str, value: i32 },

    /// Consumer names identify consumers within a topic.
    #[error("consumer '{0}' is listed more than once")]
    DuplicateConsumer(String),
}

/// Error type for topic client operations.
#[derive(Debug, Error)]
pub enum TopicError {
    /// Parameter object failed validation at construction time.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A request would have carried a field the caller did not set.
    ///
    /// Indicates a bug in this crate, not in the caller's input.
    #[error("Mapping invariant violated: {0}")]
    MappingInvariant(String),

    /// A response carried a value outside the public model's range.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The service processed the request and returned a non-success status.
    #[error("Server returned {}: {message}", .status.as_str_name())]
    Server { status: StatusCode, message: String },

    /// gRPC call failed.
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::Status),

    /// Could not open a channel to the endpoint.
    #[error("Connection error: {0}")]
    Connect(#[from] tonic::transport::Error),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TopicError {
    pub(crate) fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode(message.into())
    }

    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// True if the error was raised while constructing a parameter object.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True if sending the same request again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Server { status, .. } => matches!(
                status,
                StatusCode::Unavailable
                    | StatusCode::Overloaded
                    | StatusCode::Timeout
                    | StatusCode::Aborted
            ),
            Self::Transport(status) => matches!(
                status.code(),
                tonic::Code::Unavailable
                    | tonic::Code::DeadlineExceeded
                    | tonic::Code::ResourceExhausted
            ),
            Self::Connect(_) => true,
            _ => false,
        }
    }
}
