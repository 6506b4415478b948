//! Describe-topic result: the full actual state of a topic.
//!
//! Unlike the request shapes, nothing here is optional except the pieces the
//! server only reports on demand (`PartitionInfo::partition_stats`, filled when
//! the request asked for stats) or per consumer (`Consumer::consumer_stats`,
//! `Consumer::read_from`).

use crate::codec::Codec;
use crate::consumer::Consumer;
use crate::scheme::SchemeEntry;
use crate::settings::{AutoPartitioningStrategy, MeteringMode, MultipleWindowsStat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Snapshot of a topic's configuration, partitions and consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeTopicResult {
    /// Scheme object description (name, owner, permissions).
    pub entry: SchemeEntry,

    /// Partition count below which auto-merge stops.
    pub min_active_partitions: i64,

    /// Partition count above which auto-split stops.
    pub max_active_partitions: i64,

    /// Limit on all partitions, active and read-only.
    pub partition_count_limit: i64,

    pub partitions: Vec<PartitionInfo>,

    /// How long data is kept in a partition.
    pub retention_period: Duration,

    /// How much data is kept in a partition. Zero means no limit.
    pub retention_storage_mb: i64,

    /// Codecs writers may use.
    pub supported_codecs: Vec<Codec>,

    pub partition_write_speed_bytes_per_second: i64,

    pub partition_write_burst_bytes: i64,

    /// User and server attributes. Server attributes start with `_`.
    pub attributes: HashMap<String, String>,

    pub consumers: Vec<Consumer>,

    pub metering_mode: MeteringMode,

    pub topic_stats: TopicStats,

    pub auto_partitioning_settings: AutoPartitioningState,
}

impl DescribeTopicResult {
    pub fn partition(&self, partition_id: i64) -> Option<&PartitionInfo> {
        self.partitions
            .iter()
            .find(|p| p.partition_id == partition_id)
    }

    pub fn consumer(&self, name: &str) -> Option<&Consumer> {
        self.consumers.iter().find(|c| c.name == name)
    }

    /// Partitions currently open for writes.
    pub fn active_partitions(&self) -> impl Iterator<Item = &PartitionInfo> {
        self.partitions.iter().filter(|p| p.active)
    }
}

/// Auto-partitioning settings in effect for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutoPartitioningState {
    pub strategy: AutoPartitioningStrategy,
    pub stabilization_window: Duration,
    pub down_utilization_percent: i32,
    pub up_utilization_percent: i32,
}

impl AutoPartitioningState {
    /// False for `Disabled`, and for `Unspecified` which the server reports
    /// when the topic never had auto-partitioning configured.
    pub fn is_enabled(&self) -> bool {
        matches!(
            self.strategy,
            AutoPartitioningStrategy::ScaleUp | AutoPartitioningStrategy::ScaleUpAndDown
        )
    }
}

/// One partition of the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInfo {
    pub partition_id: i64,

    /// Open for writes. An active partition has not been split or merged yet.
    pub active: bool,

    /// Partitions formed when this one was split or merged.
    pub child_partition_ids: Vec<i64>,

    /// Partitions this one was formed from.
    pub parent_partition_ids: Vec<i64>,

    /// Only present when the request asked for stats.
    pub partition_stats: Option<PartitionStats>,
}

/// Topic-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStats {
    /// Approximate size of the topic.
    pub store_size_bytes: i64,

    /// Oldest "last write" among all partitions.
    pub min_last_write_time: DateTime<Utc>,

    /// Largest write-time minus create-time among messages written in the last minute.
    pub max_write_time_lag: Duration,

    pub bytes_written: MultipleWindowsStat,
}

/// Per-partition statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStats {
    /// First offset stored in the partition.
    pub partition_start: i64,

    /// Offset after the last stored message (exclusive).
    pub partition_end: i64,

    /// Approximate size of the partition.
    pub store_size_bytes: i64,

    pub last_write_time: DateTime<Utc>,

    pub max_write_time_lag: Duration,

    pub bytes_written: MultipleWindowsStat,

    /// Node hosting the partition. Useful when debugging.
    pub partition_node_id: i64,
}

impl PartitionStats {
    /// Number of messages currently stored.
    pub fn message_count(&self) -> i64 {
        self.partition_end.saturating_sub(self.partition_start).max(0)
    }
}
