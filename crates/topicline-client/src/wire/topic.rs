use super::{codecs_to_wire, duration_to_wire, metering_mode_to_wire, strategy_to_wire};
use crate::error::{Result, TopicError};
use crate::settings::{AlterAutoPartitioningSettings, AutoPartitioningSettings};
use crate::topic::{AlterTopicParams, CreateTopicParams, DescribeTopicParams, DropTopicParams};
use topicline_proto::topic as pb;

fn auto_partitioning_to_wire(settings: &AutoPartitioningSettings) -> pb::AutoPartitioningSettings {
    let write_speed_set = settings.stabilization_window.is_some()
        || settings.up_utilization_percent.is_some()
        || settings.down_utilization_percent.is_some();
    pb::AutoPartitioningSettings {
        strategy: settings.strategy.map(strategy_to_wire),
        partition_write_speed: write_speed_set.then(|| pb::AutoPartitioningWriteSpeedStrategy {
            stabilization_window: settings.stabilization_window.map(duration_to_wire),
            up_utilization_percent: settings.up_utilization_percent,
            down_utilization_percent: settings.down_utilization_percent,
        }),
    }
}

fn alter_auto_partitioning_to_wire(
    settings: &AlterAutoPartitioningSettings,
) -> pb::AlterAutoPartitioningSettings {
    let write_speed_set = settings.set_stabilization_window.is_some()
        || settings.set_up_utilization_percent.is_some()
        || settings.set_down_utilization_percent.is_some();
    pb::AlterAutoPartitioningSettings {
        set_strategy: settings.set_strategy.map(strategy_to_wire),
        set_partition_write_speed: write_speed_set.then(|| {
            pb::AlterAutoPartitioningWriteSpeedStrategy {
                set_stabilization_window: settings.set_stabilization_window.map(duration_to_wire),
                set_up_utilization_percent: settings.set_up_utilization_percent,
                set_down_utilization_percent: settings.set_down_utilization_percent,
            }
        }),
    }
}

impl CreateTopicParams {
    /// Render as a create request. Unset fields are left unset on the wire.
    pub fn to_wire(&self) -> pb::CreateTopicRequest {
        let partitioning = pb::PartitioningSettings {
            min_active_partitions: self.min_active_partitions,
            partition_count_limit: self.partition_count_limit,
            max_active_partitions: self.max_active_partitions,
            auto_partitioning_settings: self
                .auto_partitioning_settings
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(auto_partitioning_to_wire),
        };

        pb::CreateTopicRequest {
            operation_params: None,
            path: self.path.clone(),
            partitioning_settings: (partitioning != pb::PartitioningSettings::default())
                .then_some(partitioning),
            retention_period: self.retention_period.map(duration_to_wire),
            retention_storage_mb: self.retention_storage_mb,
            supported_codecs: self.supported_codecs.as_deref().map(codecs_to_wire),
            partition_write_speed_bytes_per_second: self.partition_write_speed_bytes_per_second,
            partition_write_burst_bytes: self.partition_write_burst_bytes,
            attributes: self.attributes.clone().unwrap_or_default(),
            consumers: self
                .consumers
                .iter()
                .flatten()
                .map(|c| c.to_wire())
                .collect(),
            metering_mode: self.metering_mode.map(metering_mode_to_wire),
        }
    }
}

impl AlterTopicParams {
    /// Render as an alter request. Unset fields are absent on the wire, so the
    /// server leaves them as they are.
    pub fn to_wire(&self) -> pb::AlterTopicRequest {
        let partitioning = pb::AlterPartitioningSettings {
            set_min_active_partitions: self.set_min_active_partitions,
            set_partition_count_limit: self.set_partition_count_limit,
            set_max_active_partitions: self.set_max_active_partitions,
            alter_auto_partitioning_settings: self
                .alter_auto_partitioning_settings
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(alter_auto_partitioning_to_wire),
        };

        pb::AlterTopicRequest {
            operation_params: None,
            path: self.path.clone(),
            alter_partitioning_settings: (partitioning != pb::AlterPartitioningSettings::default())
                .then_some(partitioning),
            set_retention_period: self.set_retention_period.map(duration_to_wire),
            set_retention_storage_mb: self.set_retention_storage_mb,
            set_supported_codecs: self.set_supported_codecs.as_deref().map(codecs_to_wire),
            set_partition_write_speed_bytes_per_second: self
                .set_partition_write_speed_bytes_per_second,
            set_partition_write_burst_bytes: self.set_partition_write_burst_bytes,
            alter_attributes: self.alter_attributes.as_ref().map(|values| pb::Attributes {
                values: values.clone(),
            }),
            add_consumers: self.add_consumers.iter().map(|c| c.to_wire()).collect(),
            drop_consumers: self.drop_consumers.clone(),
            alter_consumers: self.alter_consumers.iter().map(|c| c.to_wire()).collect(),
            set_metering_mode: self.set_metering_mode.map(metering_mode_to_wire),
        }
    }
}

impl DropTopicParams {
    pub fn to_wire(&self) -> pb::DropTopicRequest {
        pb::DropTopicRequest {
            operation_params: None,
            path: self.path.clone(),
        }
    }
}

impl DescribeTopicParams {
    pub fn to_wire(&self) -> pb::DescribeTopicRequest {
        pb::DescribeTopicRequest {
            operation_params: None,
            path: self.path.clone(),
            include_stats: self.include_stats,
        }
    }
}

/// Check field by field that the request sets exactly what the params set.
///
/// A mismatch here would silently change server-side settings the caller did
/// not ask to touch.
pub(crate) fn ensure_alter_presence(
    params: &AlterTopicParams,
    request: &pb::AlterTopicRequest,
) -> Result<()> {
    let partitioning = request.alter_partitioning_settings.clone().unwrap_or_default();
    let auto = partitioning
        .alter_auto_partitioning_settings
        .clone()
        .unwrap_or_default();
    let write_speed = auto.set_partition_write_speed.clone().unwrap_or_default();
    let auto_params = params
        .alter_auto_partitioning_settings
        .clone()
        .unwrap_or_default();

    let checks = [
        (
            "set_min_active_partitions",
            params.set_min_active_partitions.is_some(),
            partitioning.set_min_active_partitions.is_some(),
        ),
        (
            "set_max_active_partitions",
            params.set_max_active_partitions.is_some(),
            partitioning.set_max_active_partitions.is_some(),
        ),
        (
            "set_partition_count_limit",
            params.set_partition_count_limit.is_some(),
            partitioning.set_partition_count_limit.is_some(),
        ),
        (
            "set_strategy",
            auto_params.set_strategy.is_some(),
            auto.set_strategy.is_some(),
        ),
        (
            "set_stabilization_window",
            auto_params.set_stabilization_window.is_some(),
            write_speed.set_stabilization_window.is_some(),
        ),
        (
            "set_up_utilization_percent",
            auto_params.set_up_utilization_percent.is_some(),
            write_speed.set_up_utilization_percent.is_some(),
        ),
        (
            "set_down_utilization_percent",
            auto_params.set_down_utilization_percent.is_some(),
            write_speed.set_down_utilization_percent.is_some(),
        ),
        (
            "set_retention_period",
            params.set_retention_period.is_some(),
            request.set_retention_period.is_some(),
        ),
        (
            "set_retention_storage_mb",
            params.set_retention_storage_mb.is_some(),
            request.set_retention_storage_mb.is_some(),
        ),
        (
            "set_supported_codecs",
            params.set_supported_codecs.is_some(),
            request.set_supported_codecs.is_some(),
        ),
        (
            "set_partition_write_speed_bytes_per_second",
            params.set_partition_write_speed_bytes_per_second.is_some(),
            request.set_partition_write_speed_bytes_per_second.is_some(),
        ),
        (
            "set_partition_write_burst_bytes",
            params.set_partition_write_burst_bytes.is_some(),
            request.set_partition_write_burst_bytes.is_some(),
        ),
        (
            "alter_attributes",
            params.alter_attributes.is_some(),
            request.alter_attributes.is_some(),
        ),
        (
            "set_metering_mode",
            params.set_metering_mode.is_some(),
            request.set_metering_mode.is_some(),
        ),
    ];

    for (field, expected, actual) in checks {
        if expected != actual {
            return Err(TopicError::MappingInvariant(format!(
                "{field}: params present={expected}, request present={actual}"
            )));
        }
    }

    for (delta, wire) in params.alter_consumers.iter().zip(&request.alter_consumers) {
        let consumer_checks = [
            (
                "set_important",
                delta.set_important.is_some(),
                wire.set_important.is_some(),
            ),
            (
                "set_read_from",
                delta.set_read_from.is_some(),
                wire.set_read_from.is_some(),
            ),
            (
                "set_supported_codecs",
                delta.set_supported_codecs.is_some(),
                wire.set_supported_codecs.is_some(),
            ),
            (
                "alter_attributes",
                delta.alter_attributes.is_some(),
                wire.alter_attributes.is_some(),
            ),
        ];
        for (field, expected, actual) in consumer_checks {
            if expected != actual {
                return Err(TopicError::MappingInvariant(format!(
                    "consumer '{}' {field}: params present={expected}, request present={actual}",
                    delta.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::consumer::{AlterConsumer, Consumer};
    use crate::settings::{AutoPartitioningStrategy, MeteringMode};
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_create_full() {
        let params = CreateTopicParams::builder("/t")
            .min_active_partitions(2)
            .max_active_partitions(8)
            .partition_count_limit(16)
            .retention_period(Duration::from_secs(3600))
            .retention_storage_mb(1024)
            .supported_codecs([Codec::RAW, Codec::new(17).unwrap()])
            .partition_write_speed_bytes_per_second(1 << 20)
            .partition_write_burst_bytes(1 << 21)
            .attribute("owner", "team-a")
            .consumer(Consumer::new("c1").important(true))
            .metering_mode(MeteringMode::RequestUnits)
            .auto_partitioning_settings(AutoPartitioningSettings {
                strategy: Some(AutoPartitioningStrategy::ScaleUp),
                stabilization_window: Some(Duration::from_secs(300)),
                down_utilization_percent: None,
                up_utilization_percent: Some(90),
            })
            .build()
            .unwrap();

        let wire = params.to_wire();
        let partitioning = wire.partitioning_settings.unwrap();
        assert_eq!(partitioning.min_active_partitions, Some(2));
        assert_eq!(partitioning.max_active_partitions, Some(8));
        assert_eq!(partitioning.partition_count_limit, Some(16));

        let auto = partitioning.auto_partitioning_settings.unwrap();
        assert_eq!(
            auto.strategy,
            Some(pb::AutoPartitioningStrategy::ScaleUp as i32)
        );
        let speed = auto.partition_write_speed.unwrap();
        assert_eq!(speed.stabilization_window.unwrap().seconds, 300);
        assert_eq!(speed.up_utilization_percent, Some(90));
        assert_eq!(speed.down_utilization_percent, None);

        assert_eq!(wire.retention_period.unwrap().seconds, 3600);
        assert_eq!(wire.retention_storage_mb, Some(1024));
        assert_eq!(wire.supported_codecs.unwrap().codecs, vec![1, 17]);
        assert_eq!(wire.partition_write_speed_bytes_per_second, Some(1 << 20));
        assert_eq!(wire.partition_write_burst_bytes, Some(1 << 21));
        assert_eq!(wire.attributes.get("owner").unwrap(), "team-a");
        assert_eq!(wire.consumers.len(), 1);
        assert!(wire.consumers[0].important);
        assert_eq!(
            wire.metering_mode,
            Some(pb::MeteringMode::RequestUnits as i32)
        );
    }

    #[test]
    fn test_create_auto_partitioning_without_write_speed() {
        let params = CreateTopicParams::builder("/t")
            .auto_partitioning_settings(AutoPartitioningSettings {
                strategy: Some(AutoPartitioningStrategy::Disabled),
                ..Default::default()
            })
            .build()
            .unwrap();

        let auto = params
            .to_wire()
            .partitioning_settings
            .unwrap()
            .auto_partitioning_settings
            .unwrap();
        assert!(auto.partition_write_speed.is_none());
    }

    #[test]
    fn test_create_empty_auto_partitioning_is_dropped() {
        let params = CreateTopicParams::builder("/t")
            .auto_partitioning_settings(AutoPartitioningSettings::default())
            .build()
            .unwrap();
        assert!(params.to_wire().partitioning_settings.is_none());
    }

    #[test]
    fn test_alter_full_presence() {
        let params = AlterTopicParams::builder("/t")
            .set_min_active_partitions(0)
            .set_max_active_partitions(0)
            .set_partition_count_limit(0)
            .set_retention_period(Duration::ZERO)
            .set_retention_storage_mb(0)
            .set_supported_codecs(Vec::<Codec>::new())
            .set_partition_write_speed_bytes_per_second(0)
            .set_partition_write_burst_bytes(0)
            .alter_attributes(HashMap::new())
            .set_metering_mode(MeteringMode::Unspecified)
            .alter_auto_partitioning_settings(AlterAutoPartitioningSettings {
                set_strategy: Some(AutoPartitioningStrategy::Unspecified),
                set_stabilization_window: Some(Duration::ZERO),
                set_down_utilization_percent: Some(0),
                set_up_utilization_percent: Some(0),
            })
            .alter_consumer(AlterConsumer::new("c").set_important(false))
            .build()
            .unwrap();

        let wire = params.to_wire();
        let partitioning = wire.alter_partitioning_settings.clone().unwrap();
        assert_eq!(partitioning.set_min_active_partitions, Some(0));
        assert_eq!(partitioning.set_max_active_partitions, Some(0));
        assert_eq!(partitioning.set_partition_count_limit, Some(0));
        let auto = partitioning.alter_auto_partitioning_settings.unwrap();
        assert_eq!(auto.set_strategy, Some(0));
        let speed = auto.set_partition_write_speed.unwrap();
        assert_eq!(speed.set_stabilization_window, Some(duration_to_wire(Duration::ZERO)));
        assert_eq!(speed.set_up_utilization_percent, Some(0));
        assert_eq!(speed.set_down_utilization_percent, Some(0));
        assert_eq!(wire.set_retention_period, Some(duration_to_wire(Duration::ZERO)));
        assert_eq!(wire.set_retention_storage_mb, Some(0));
        assert_eq!(wire.set_supported_codecs, Some(pb::SupportedCodecs::default()));
        assert_eq!(wire.set_partition_write_speed_bytes_per_second, Some(0));
        assert_eq!(wire.set_partition_write_burst_bytes, Some(0));
        assert_eq!(wire.alter_attributes, Some(pb::Attributes::default()));
        assert_eq!(wire.set_metering_mode, Some(0));
        assert_eq!(wire.alter_consumers[0].set_important, Some(false));

        assert!(ensure_alter_presence(&params, &wire).is_ok());
    }

    #[test]
    fn test_alter_auto_partitioning_strategy_only() {
        let params = AlterTopicParams::builder("/t")
            .alter_auto_partitioning_settings(AlterAutoPartitioningSettings {
                set_strategy: Some(AutoPartitioningStrategy::Paused),
                ..Default::default()
            })
            .build()
            .unwrap();

        let wire = params.to_wire();
        let auto = wire
            .alter_partitioning_settings
            .clone()
            .unwrap()
            .alter_auto_partitioning_settings
            .unwrap();
        assert_eq!(auto.set_strategy, Some(4));
        assert!(auto.set_partition_write_speed.is_none());
        assert!(ensure_alter_presence(&params, &wire).is_ok());
    }

    #[test]
    fn test_alter_write_speed_zero_percent_is_sent() {
        let params = AlterTopicParams::builder("/t")
            .alter_auto_partitioning_settings(AlterAutoPartitioningSettings {
                set_up_utilization_percent: Some(0),
                ..Default::default()
            })
            .build()
            .unwrap();

        let auto = params
            .to_wire()
            .alter_partitioning_settings
            .unwrap()
            .alter_auto_partitioning_settings
            .unwrap();
        assert!(auto.set_strategy.is_none());
        let speed = auto.set_partition_write_speed.unwrap();
        assert_eq!(speed.set_up_utilization_percent, Some(0));
        assert!(speed.set_down_utilization_percent.is_none());
        assert!(speed.set_stabilization_window.is_none());
    }

    #[test]
    fn test_alter_empty_auto_partitioning_is_dropped() {
        let params = AlterTopicParams::builder("/t")
            .alter_auto_partitioning_settings(AlterAutoPartitioningSettings::default())
            .build()
            .unwrap();
        assert!(params.to_wire().alter_partitioning_settings.is_none());
    }

    #[test]
    fn test_alter_empty_delta_is_all_absent() {
        let params = AlterTopicParams::builder("/t").build().unwrap();
        let wire = params.to_wire();
        assert_eq!(
            wire,
            pb::AlterTopicRequest {
                path: "/t".to_string(),
                ..Default::default()
            }
        );
        assert!(ensure_alter_presence(&params, &wire).is_ok());
    }

    #[test]
    fn test_presence_check_catches_leak() {
        let params = AlterTopicParams::builder("/t").build().unwrap();
        let mut wire = params.to_wire();
        wire.set_retention_storage_mb = Some(0);

        let err = ensure_alter_presence(&params, &wire).unwrap_err();
        assert!(
            matches!(err, TopicError::MappingInvariant(ref m) if m.contains("set_retention_storage_mb"))
        );
    }

    #[test]
    fn test_presence_check_catches_consumer_leak() {
        let params = AlterTopicParams::builder("/t")
            .alter_consumer(AlterConsumer::new("c"))
            .build()
            .unwrap();
        let mut wire = params.to_wire();
        wire.alter_consumers[0].alter_attributes = Some(pb::Attributes::default());

        assert!(matches!(
            ensure_alter_presence(&params, &wire),
            Err(TopicError::MappingInvariant(_))
        ));
    }

    #[test]
    fn test_drop_and_describe() {
        let drop = DropTopicParams::new("/t").unwrap().to_wire();
        assert_eq!(drop.path, "/t");

        let describe = DescribeTopicParams::new("/t", true).unwrap().to_wire();
        assert_eq!(describe.path, "/t");
        assert!(describe.include_stats);
    }
}
