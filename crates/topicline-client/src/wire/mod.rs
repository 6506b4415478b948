//! Mapping layer between the public model and the wire messages.
//!
//! Everything in here is a pure, synchronous transformation:
//!
//! - `to_wire` never fails. An unset source field always becomes an unset wire
//!   field (`None`, or an absent wrapper message), never a zero value.
//! - `from_wire` fills every field of the public type. It fails only on values
//!   a well-behaved server never sends: negative durations or codecs, and
//!   timestamps outside the representable range.
//!
//! ## Presence on the wire
//!
//! | public type                    | wire form                         |
//! |--------------------------------|-----------------------------------|
//! | `Option<i64>` / `Option<bool>` | proto3 `optional` scalar          |
//! | `Option<enum>`                 | proto3 `optional` enum            |
//! | `Option<Duration>`             | `google.protobuf.Duration` message |
//! | `Option<DateTime<Utc>>`        | `google.protobuf.Timestamp` message |
//! | `Option<Vec<Codec>>`           | `SupportedCodecs` wrapper message |
//! | alter `Option<HashMap>`        | `Attributes` wrapper message      |

mod consumer;
mod describe;
mod topic;

pub(crate) use topic::ensure_alter_presence;

use crate::codec::Codec;
use crate::error::{Result, TopicError};
use crate::settings::{AutoPartitioningStrategy, MeteringMode, MultipleWindowsStat};
use chrono::{DateTime, Utc};
use std::time::Duration;
use topicline_proto::topic as pb;
use tracing::warn;

/// Seconds beyond `i64::MAX` saturate.
pub(crate) fn duration_to_wire(duration: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
        nanos: duration.subsec_nanos() as i32,
    }
}

/// A missing duration reads as zero.
pub(crate) fn duration_from_wire(
    field: &'static str,
    duration: Option<prost_types::Duration>,
) -> Result<Duration> {
    let Some(duration) = duration else {
        return Ok(Duration::ZERO);
    };
    let seconds = u64::try_from(duration.seconds).map_err(|_| {
        TopicError::decode(format!("{field}: negative duration ({}s)", duration.seconds))
    })?;
    let nanos = u32::try_from(duration.nanos)
        .ok()
        .filter(|n| *n < 1_000_000_000)
        .ok_or_else(|| {
            TopicError::decode(format!("{field}: invalid nanos ({})", duration.nanos))
        })?;
    Ok(Duration::new(seconds, nanos))
}

pub(crate) fn timestamp_to_wire(instant: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: instant.timestamp(),
        nanos: instant.timestamp_subsec_nanos() as i32,
    }
}

pub(crate) fn timestamp_from_wire(
    field: &'static str,
    timestamp: prost_types::Timestamp,
) -> Result<DateTime<Utc>> {
    u32::try_from(timestamp.nanos)
        .ok()
        .and_then(|nanos| DateTime::from_timestamp(timestamp.seconds, nanos))
        .ok_or_else(|| {
            TopicError::decode(format!(
                "{field}: timestamp out of range ({}s, {}ns)",
                timestamp.seconds, timestamp.nanos
            ))
        })
}

/// A missing timestamp reads as the Unix epoch.
pub(crate) fn required_timestamp_from_wire(
    field: &'static str,
    timestamp: Option<prost_types::Timestamp>,
) -> Result<DateTime<Utc>> {
    match timestamp {
        Some(ts) => timestamp_from_wire(field, ts),
        None => Ok(DateTime::<Utc>::default()),
    }
}

/// Order and unknown values are preserved.
pub(crate) fn codecs_to_wire(codecs: &[Codec]) -> pb::SupportedCodecs {
    pb::SupportedCodecs {
        codecs: codecs.iter().map(|c| c.value()).collect(),
    }
}

/// A missing codec list reads as empty.
pub(crate) fn codecs_from_wire(codecs: Option<pb::SupportedCodecs>) -> Result<Vec<Codec>> {
    codecs
        .map(|c| c.codecs)
        .unwrap_or_default()
        .into_iter()
        .map(|value| Codec::new(value).map_err(|e| TopicError::decode(e.to_string())))
        .collect()
}

pub(crate) fn windows_stat_from_wire(stat: Option<pb::MultipleWindowsStat>) -> MultipleWindowsStat {
    let stat = stat.unwrap_or_default();
    MultipleWindowsStat {
        per_minute: stat.per_minute,
        per_hour: stat.per_hour,
        per_day: stat.per_day,
    }
}

impl From<MeteringMode> for pb::MeteringMode {
    fn from(mode: MeteringMode) -> Self {
        match mode {
            MeteringMode::Unspecified => pb::MeteringMode::Unspecified,
            MeteringMode::ReservedCapacity => pb::MeteringMode::ReservedCapacity,
            MeteringMode::RequestUnits => pb::MeteringMode::RequestUnits,
        }
    }
}

impl From<pb::MeteringMode> for MeteringMode {
    fn from(mode: pb::MeteringMode) -> Self {
        match mode {
            pb::MeteringMode::Unspecified => MeteringMode::Unspecified,
            pb::MeteringMode::ReservedCapacity => MeteringMode::ReservedCapacity,
            pb::MeteringMode::RequestUnits => MeteringMode::RequestUnits,
        }
    }
}

impl From<AutoPartitioningStrategy> for pb::AutoPartitioningStrategy {
    fn from(strategy: AutoPartitioningStrategy) -> Self {
        match strategy {
            AutoPartitioningStrategy::Unspecified => pb::AutoPartitioningStrategy::Unspecified,
            AutoPartitioningStrategy::Disabled => pb::AutoPartitioningStrategy::Disabled,
            AutoPartitioningStrategy::ScaleUp => pb::AutoPartitioningStrategy::ScaleUp,
            AutoPartitioningStrategy::ScaleUpAndDown => {
                pb::AutoPartitioningStrategy::ScaleUpAndDown
            }
            AutoPartitioningStrategy::Paused => pb::AutoPartitioningStrategy::Paused,
        }
    }
}

impl From<pb::AutoPartitioningStrategy> for AutoPartitioningStrategy {
    fn from(strategy: pb::AutoPartitioningStrategy) -> Self {
        match strategy {
            pb::AutoPartitioningStrategy::Unspecified => AutoPartitioningStrategy::Unspecified,
            pb::AutoPartitioningStrategy::Disabled => AutoPartitioningStrategy::Disabled,
            pb::AutoPartitioningStrategy::ScaleUp => AutoPartitioningStrategy::ScaleUp,
            pb::AutoPartitioningStrategy::ScaleUpAndDown => {
                AutoPartitioningStrategy::ScaleUpAndDown
            }
            pb::AutoPartitioningStrategy::Paused => AutoPartitioningStrategy::Paused,
        }
    }
}

pub(crate) fn metering_mode_to_wire(mode: MeteringMode) -> i32 {
    pb::MeteringMode::from(mode) as i32
}

pub(crate) fn strategy_to_wire(strategy: AutoPartitioningStrategy) -> i32 {
    pb::AutoPartitioningStrategy::from(strategy) as i32
}

/// Values newer than this build read as `Unspecified`.
pub(crate) fn metering_mode_from_wire(value: i32) -> MeteringMode {
    match pb::MeteringMode::try_from(value) {
        Ok(mode) => mode.into(),
        Err(_) => {
            warn!(value, "Unknown metering mode, treating as unspecified");
            MeteringMode::Unspecified
        }
    }
}

/// Values newer than this build read as `Unspecified`.
pub(crate) fn strategy_from_wire(value: i32) -> AutoPartitioningStrategy {
    match pb::AutoPartitioningStrategy::try_from(value) {
        Ok(strategy) => strategy.into(),
        Err(_) => {
            warn!(
                value,
                "Unknown auto-partitioning strategy, treating as unspecified"
            );
            AutoPartitioningStrategy::Unspecified
        }
    }
}
