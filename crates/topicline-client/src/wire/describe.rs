use super::{
    codecs_from_wire, duration_from_wire, metering_mode_from_wire, required_timestamp_from_wire,
    strategy_from_wire, windows_stat_from_wire,
};
use crate::consumer::Consumer;
use crate::describe::{
    AutoPartitioningState, DescribeTopicResult, PartitionInfo, PartitionStats, TopicStats,
};
use crate::error::Result;
use crate::scheme::{Permissions, SchemeEntry, SchemeEntryType};
use topicline_proto::scheme::{self as scheme_pb, entry::Type as EntryType};
use topicline_proto::topic::{self as pb, describe_topic_result};

impl From<i32> for SchemeEntryType {
    fn from(value: i32) -> Self {
        match EntryType::try_from(value) {
            Ok(EntryType::Unspecified) => Self::Unspecified,
            Ok(EntryType::Directory) => Self::Directory,
            Ok(EntryType::Table) => Self::Table,
            Ok(EntryType::PersQueueGroup) => Self::PersQueueGroup,
            Ok(EntryType::Database) => Self::Database,
            Ok(EntryType::CoordinationNode) => Self::CoordinationNode,
            Ok(EntryType::ColumnStore) => Self::ColumnStore,
            Ok(EntryType::ColumnTable) => Self::ColumnTable,
            Ok(EntryType::Sequence) => Self::Sequence,
            Ok(EntryType::Replication) => Self::Replication,
            Ok(EntryType::Topic) => Self::Topic,
            Ok(EntryType::ExternalTable) => Self::ExternalTable,
            Ok(EntryType::ExternalDataSource) => Self::ExternalDataSource,
            Ok(EntryType::View) => Self::View,
            Err(_) => Self::Other(value),
        }
    }
}

impl From<scheme_pb::Permissions> for Permissions {
    fn from(permissions: scheme_pb::Permissions) -> Self {
        Self {
            subject: permissions.subject,
            permission_names: permissions.permission_names,
        }
    }
}

impl From<scheme_pb::Entry> for SchemeEntry {
    fn from(entry: scheme_pb::Entry) -> Self {
        Self {
            name: entry.name,
            owner: entry.owner,
            entry_type: entry.r#type.into(),
            effective_permissions: entry
                .effective_permissions
                .into_iter()
                .map(Permissions::from)
                .collect(),
            permissions: entry.permissions.into_iter().map(Permissions::from).collect(),
            size_bytes: entry.size_bytes,
        }
    }
}

impl PartitionStats {
    pub fn from_wire(stats: pb::PartitionStats) -> Result<Self> {
        let offsets = stats.partition_offsets.unwrap_or_default();
        Ok(Self {
            partition_start: offsets.start,
            partition_end: offsets.end,
            store_size_bytes: stats.store_size_bytes,
            last_write_time: required_timestamp_from_wire(
                "last_write_time",
                stats.last_write_time,
            )?,
            max_write_time_lag: duration_from_wire(
                "max_write_time_lag",
                stats.max_write_time_lag,
            )?,
            bytes_written: windows_stat_from_wire(stats.bytes_written),
            partition_node_id: i64::from(stats.partition_node_id),
        })
    }
}

impl PartitionInfo {
    pub fn from_wire(partition: describe_topic_result::PartitionInfo) -> Result<Self> {
        Ok(Self {
            partition_id: partition.partition_id,
            active: partition.active,
            child_partition_ids: partition.child_partition_ids,
            parent_partition_ids: partition.parent_partition_ids,
            partition_stats: partition
                .partition_stats
                .map(PartitionStats::from_wire)
                .transpose()?,
        })
    }
}

impl TopicStats {
    pub fn from_wire(stats: Option<describe_topic_result::TopicStats>) -> Result<Self> {
        let stats = stats.unwrap_or_default();
        Ok(Self {
            store_size_bytes: stats.store_size_bytes,
            min_last_write_time: required_timestamp_from_wire(
                "min_last_write_time",
                stats.min_last_write_time,
            )?,
            max_write_time_lag: duration_from_wire(
                "topic_stats.max_write_time_lag",
                stats.max_write_time_lag,
            )?,
            bytes_written: windows_stat_from_wire(stats.bytes_written),
        })
    }
}

fn auto_partitioning_from_wire(
    settings: Option<pb::AutoPartitioningSettings>,
) -> Result<AutoPartitioningState> {
    let settings = settings.unwrap_or_default();
    let write_speed = settings.partition_write_speed.unwrap_or_default();
    Ok(AutoPartitioningState {
        strategy: strategy_from_wire(settings.strategy.unwrap_or_default()),
        stabilization_window: duration_from_wire(
            "stabilization_window",
            write_speed.stabilization_window,
        )?,
        down_utilization_percent: write_speed.down_utilization_percent.unwrap_or_default(),
        up_utilization_percent: write_speed.up_utilization_percent.unwrap_or_default(),
    })
}

impl DescribeTopicResult {
    /// Decode a describe result.
    ///
    /// Every field is filled. Missing sub-messages read as their zero values;
    /// only per-partition stats stay `None` when the server did not send them.
    pub fn from_wire(result: pb::DescribeTopicResult) -> Result<Self> {
        let partitioning = result.partitioning_settings.unwrap_or_default();

        Ok(Self {
            entry: result.self_.map(SchemeEntry::from).unwrap_or_default(),
            min_active_partitions: partitioning.min_active_partitions.unwrap_or_default(),
            max_active_partitions: partitioning.max_active_partitions.unwrap_or_default(),
            partition_count_limit: partitioning.partition_count_limit.unwrap_or_default(),
            partitions: result
                .partitions
                .into_iter()
                .map(PartitionInfo::from_wire)
                .collect::<Result<_>>()?,
            retention_period: duration_from_wire("retention_period", result.retention_period)?,
            retention_storage_mb: result.retention_storage_mb,
            supported_codecs: codecs_from_wire(result.supported_codecs)?,
            partition_write_speed_bytes_per_second: result.partition_write_speed_bytes_per_second,
            partition_write_burst_bytes: result.partition_write_burst_bytes,
            attributes: result.attributes,
            consumers: result
                .consumers
                .into_iter()
                .map(Consumer::from_wire)
                .collect::<Result<_>>()?,
            metering_mode: metering_mode_from_wire(result.metering_mode),
            topic_stats: TopicStats::from_wire(result.topic_stats)?,
            auto_partitioning_settings: auto_partitioning_from_wire(
                partitioning.auto_partitioning_settings,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::error::TopicError;
    use crate::settings::{AutoPartitioningStrategy, MeteringMode};
    use std::time::Duration;

    fn sample_result() -> pb::DescribeTopicResult {
        pb::DescribeTopicResult {
            self_: Some(scheme_pb::Entry {
                name: "orders".to_string(),
                owner: "root@builtin".to_string(),
                r#type: EntryType::Topic as i32,
                permissions: vec![scheme_pb::Permissions {
                    subject: "reader".to_string(),
                    permission_names: vec!["read".to_string()],
                }],
                ..Default::default()
            }),
            partitioning_settings: Some(pb::PartitioningSettings {
                min_active_partitions: Some(2),
                partition_count_limit: Some(10),
                max_active_partitions: Some(4),
                auto_partitioning_settings: Some(pb::AutoPartitioningSettings {
                    strategy: Some(pb::AutoPartitioningStrategy::ScaleUpAndDown as i32),
                    partition_write_speed: Some(pb::AutoPartitioningWriteSpeedStrategy {
                        stabilization_window: Some(prost_types::Duration {
                            seconds: 300,
                            nanos: 0,
                        }),
                        up_utilization_percent: Some(80),
                        down_utilization_percent: Some(20),
                    }),
                }),
            }),
            partitions: vec![
                describe_topic_result::PartitionInfo {
                    partition_id: 0,
                    active: false,
                    child_partition_ids: vec![1, 2],
                    ..Default::default()
                },
                describe_topic_result::PartitionInfo {
                    partition_id: 1,
                    active: true,
                    parent_partition_ids: vec![0],
                    partition_stats: Some(pb::PartitionStats {
                        partition_offsets: Some(pb::OffsetsRange { start: 10, end: 25 }),
                        store_size_bytes: 4096,
                        partition_node_id: 7,
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ],
            retention_period: Some(prost_types::Duration {
                seconds: 86_400,
                nanos: 0,
            }),
            retention_storage_mb: 0,
            supported_codecs: Some(pb::SupportedCodecs {
                codecs: vec![1, 4, 10_000],
            }),
            partition_write_speed_bytes_per_second: 1 << 20,
            partition_write_burst_bytes: 1 << 20,
            attributes: [("_message_group_seqno_retention_period_ms".to_string(), "1".to_string())]
                .into_iter()
                .collect(),
            consumers: vec![pb::Consumer {
                name: "billing".to_string(),
                important: true,
                ..Default::default()
            }],
            metering_mode: pb::MeteringMode::ReservedCapacity as i32,
            topic_stats: Some(describe_topic_result::TopicStats {
                store_size_bytes: 8192,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_from_wire_full() {
        let result = DescribeTopicResult::from_wire(sample_result()).unwrap();

        assert_eq!(result.entry.name, "orders");
        assert_eq!(result.entry.entry_type, SchemeEntryType::Topic);
        assert_eq!(result.entry.permissions[0].permission_names, vec!["read"]);
        assert_eq!(result.min_active_partitions, 2);
        assert_eq!(result.max_active_partitions, 4);
        assert_eq!(result.partition_count_limit, 10);
        assert_eq!(result.retention_period, Duration::from_secs(86_400));
        assert_eq!(
            result.supported_codecs,
            vec![Codec::RAW, Codec::ZSTD, Codec::new(10_000).unwrap()]
        );
        assert_eq!(result.metering_mode, MeteringMode::ReservedCapacity);
        assert_eq!(result.topic_stats.store_size_bytes, 8192);
        assert_eq!(result.consumer("billing").map(|c| c.important), Some(true));

        assert_eq!(
            result.auto_partitioning_settings,
            AutoPartitioningState {
                strategy: AutoPartitioningStrategy::ScaleUpAndDown,
                stabilization_window: Duration::from_secs(300),
                down_utilization_percent: 20,
                up_utilization_percent: 80,
            }
        );
        assert!(result.auto_partitioning_settings.is_enabled());
    }

    #[test]
    fn test_partitions_and_stats() {
        let result = DescribeTopicResult::from_wire(sample_result()).unwrap();

        assert_eq!(result.partitions.len(), 2);
        assert!(result.partition(0).unwrap().partition_stats.is_none());
        assert_eq!(result.partition(0).unwrap().child_partition_ids, vec![1, 2]);

        let active: Vec<i64> = result.active_partitions().map(|p| p.partition_id).collect();
        assert_eq!(active, vec![1]);

        let stats = result.partition(1).unwrap().partition_stats.as_ref().unwrap();
        assert_eq!(stats.partition_start, 10);
        assert_eq!(stats.partition_end, 25);
        assert_eq!(stats.message_count(), 15);
        assert_eq!(stats.partition_node_id, 7);
        assert_eq!(stats.last_write_time.timestamp(), 0);
    }

    #[test]
    fn test_empty_result_reads_as_zero_values() {
        let result = DescribeTopicResult::from_wire(pb::DescribeTopicResult::default()).unwrap();

        assert_eq!(result.entry, SchemeEntry::default());
        assert_eq!(result.min_active_partitions, 0);
        assert!(result.partitions.is_empty());
        assert_eq!(result.retention_period, Duration::ZERO);
        assert!(result.supported_codecs.is_empty());
        assert_eq!(result.metering_mode, MeteringMode::Unspecified);
        assert_eq!(
            result.auto_partitioning_settings,
            AutoPartitioningState::default()
        );
        assert!(!result.auto_partitioning_settings.is_enabled());
    }

    #[test]
    fn test_unknown_entry_type_is_kept() {
        assert_eq!(SchemeEntryType::from(99), SchemeEntryType::Other(99));
        assert!(SchemeEntryType::from(3).is_topic());
    }

    #[test]
    fn test_unknown_metering_mode_reads_as_unspecified() {
        let mut wire = sample_result();
        wire.metering_mode = 42;
        let result = DescribeTopicResult::from_wire(wire).unwrap();
        assert_eq!(result.metering_mode, MeteringMode::Unspecified);
    }

    #[test]
    fn test_negative_retention_is_decode_error() {
        let mut wire = sample_result();
        wire.retention_period = Some(prost_types::Duration {
            seconds: -60,
            nanos: 0,
        });
        assert!(matches!(
            DescribeTopicResult::from_wire(wire),
            Err(TopicError::Decode(_))
        ));
    }
}
