//! Mapping scenarios between parameter objects and wire messages.
//!
//! ## Test Scenarios
//!
//! 1. **Create with one field set**: only that field reaches the wire
//! 2. **Alter dropping a consumer**: only `path` and `drop_consumers` are populated
//! 3. **Explicit zero vs unset**: present-but-zero survives protobuf encoding
//! 4. **Attribute deltas**: absent and present-empty stay distinguishable
//! 5. **Describe without stats**: `partition_stats` stays `None`

use prost::Message;
use std::collections::HashMap;
use std::time::Duration;
use topicline_client::proto::topic as pb;
use topicline_client::{
    AlterConsumer, AlterTopicParams, Codec, Consumer, CreateTopicParams, DescribeTopicResult,
    MeteringMode,
};

#[test]
fn test_create_only_min_active_partitions() {
    let params = CreateTopicParams::builder("/my/topic")
        .min_active_partitions(2)
        .build()
        .unwrap();

    let request = params.to_wire();

    assert_eq!(
        request,
        pb::CreateTopicRequest {
            path: "/my/topic".to_string(),
            partitioning_settings: Some(pb::PartitioningSettings {
                min_active_partitions: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        }
    );
    assert!(request.retention_period.is_none());
    assert!(request.retention_storage_mb.is_none());
    assert!(request.supported_codecs.is_none());
    assert!(request.metering_mode.is_none());
    assert!(request.consumers.is_empty());
}

#[test]
fn test_alter_only_drop_consumer() {
    let params = AlterTopicParams::builder("/my/topic")
        .drop_consumer("c1")
        .build()
        .unwrap();

    let request = params.to_wire();

    assert_eq!(
        request,
        pb::AlterTopicRequest {
            path: "/my/topic".to_string(),
            drop_consumers: vec!["c1".to_string()],
            ..Default::default()
        }
    );
    assert!(request.set_metering_mode.is_none());
    assert!(request.alter_partitioning_settings.is_none());
    assert!(request.alter_attributes.is_none());
}

#[test]
fn test_alter_explicit_zero_survives_encoding() {
    let unset = AlterTopicParams::builder("/t").build().unwrap().to_wire();
    let zeroed = AlterTopicParams::builder("/t")
        .set_retention_storage_mb(0)
        .set_metering_mode(MeteringMode::Unspecified)
        .build()
        .unwrap()
        .to_wire();

    assert_ne!(unset.encode_to_vec(), zeroed.encode_to_vec());

    let decoded = pb::AlterTopicRequest::decode(zeroed.encode_to_vec().as_slice()).unwrap();
    assert_eq!(decoded.set_retention_storage_mb, Some(0));
    assert_eq!(decoded.set_metering_mode, Some(0));

    let decoded = pb::AlterTopicRequest::decode(unset.encode_to_vec().as_slice()).unwrap();
    assert_eq!(decoded.set_retention_storage_mb, None);
    assert_eq!(decoded.set_metering_mode, None);
}

#[test]
fn test_alter_values_copied_verbatim() {
    let params = AlterTopicParams::builder("/t")
        .set_partition_count_limit(12)
        .set_retention_period(Duration::from_secs(7200))
        .set_supported_codecs([Codec::GZIP, Codec::new(17).unwrap()])
        .add_consumer(Consumer::new("fresh"))
        .build()
        .unwrap();

    let request = params.to_wire();
    assert_eq!(
        request
            .alter_partitioning_settings
            .as_ref()
            .and_then(|s| s.set_partition_count_limit),
        Some(12)
    );
    assert!(request
        .alter_partitioning_settings
        .as_ref()
        .is_some_and(|s| s.set_min_active_partitions.is_none()));
    assert_eq!(request.set_retention_period.unwrap().seconds, 7200);
    assert_eq!(request.set_supported_codecs.unwrap().codecs, vec![2, 17]);
    assert_eq!(request.add_consumers[0].name, "fresh");
}

#[test]
fn test_consumer_attribute_delta_presence() {
    let absent = AlterConsumer::new("c").to_wire();

    let mut delta = AlterConsumer::new("c");
    delta.alter_attributes = Some(HashMap::new());
    let empty = delta.to_wire();

    assert!(absent.alter_attributes.is_none());
    assert!(empty.alter_attributes.is_some());

    let decoded = pb::AlterConsumer::decode(empty.encode_to_vec().as_slice()).unwrap();
    assert_eq!(decoded.alter_attributes, Some(pb::Attributes::default()));
    assert_ne!(absent.encode_to_vec(), empty.encode_to_vec());
}

#[test]
fn test_describe_without_partition_stats() {
    let wire = pb::DescribeTopicResult {
        partitions: vec![pb::describe_topic_result::PartitionInfo {
            partition_id: 0,
            active: true,
            ..Default::default()
        }],
        ..Default::default()
    };

    let result = DescribeTopicResult::from_wire(wire).unwrap();

    assert_eq!(result.partitions.len(), 1);
    assert_eq!(result.partitions[0].partition_stats, None);
}

#[test]
fn test_describe_result_serializes_to_json() {
    let wire = pb::DescribeTopicResult {
        supported_codecs: Some(pb::SupportedCodecs { codecs: vec![1, 17] }),
        metering_mode: pb::MeteringMode::RequestUnits as i32,
        ..Default::default()
    };
    let result = DescribeTopicResult::from_wire(wire).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["supported_codecs"], serde_json::json!([1, 17]));
    assert_eq!(json["metering_mode"], "request_units");

    let back: DescribeTopicResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}
