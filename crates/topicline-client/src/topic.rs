//! Topic request parameter objects.
//!
//! ## Shapes
//!
//! - [`CreateTopicParams`]: desired state of a new topic. Every field except the
//!   path is optional; a field left unset is chosen by the server.
//! - [`AlterTopicParams`]: change to an existing topic. A field left unset is
//!   not touched. Setting a field to zero is a real change and is sent as such.
//! - [`DropTopicParams`], [`DescribeTopicParams`]: path (and stats flag).
//!
//! All of them are validated when built and immutable afterwards, so the
//! mapping layer never sees malformed input.
//!
//! ## Examples
//!
//! ```ignore
//! use std::time::Duration;
//! use topicline_client::{AlterTopicParams, Codec, Consumer, CreateTopicParams};
//!
//! let create = CreateTopicParams::builder("/local/orders")
//!     .min_active_partitions(2)
//!     .retention_period(Duration::from_secs(7 * 24 * 3600))
//!     .supported_codecs([Codec::RAW, Codec::GZIP])
//!     .consumer(Consumer::new("billing").important(true))
//!     .build()?;
//!
//! let alter = AlterTopicParams::builder("/local/orders")
//!     .drop_consumer("billing")
//!     .build()?;
//! ```

use crate::codec::Codec;
use crate::consumer::{check_unique_names, AlterConsumer, Consumer};
use crate::error::{Result, ValidationError};
use crate::settings::{AlterAutoPartitioningSettings, AutoPartitioningSettings, MeteringMode};
use std::collections::HashMap;
use std::time::Duration;

fn check_path(path: &str) -> std::result::Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyField("path"));
    }
    Ok(())
}

fn check_non_negative(
    field: &'static str,
    value: Option<i64>,
) -> std::result::Result<(), ValidationError> {
    match value {
        Some(v) if v < 0 => Err(ValidationError::Negative { field, value: v }),
        _ => Ok(()),
    }
}

/// Parameters of a create-topic request.
///
/// Only obtainable through [`CreateTopicParams::builder`], so every instance
/// has passed validation:
///
/// ```compile_fail
/// let params = topicline_client::CreateTopicParams::default();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTopicParams {
    pub(crate) path: String,
    pub(crate) min_active_partitions: Option<i64>,
    pub(crate) max_active_partitions: Option<i64>,
    pub(crate) partition_count_limit: Option<i64>,
    pub(crate) retention_period: Option<Duration>,
    pub(crate) retention_storage_mb: Option<i64>,
    pub(crate) supported_codecs: Option<Vec<Codec>>,
    pub(crate) partition_write_speed_bytes_per_second: Option<i64>,
    pub(crate) partition_write_burst_bytes: Option<i64>,
    pub(crate) attributes: Option<HashMap<String, String>>,
    pub(crate) consumers: Option<Vec<Consumer>>,
    pub(crate) metering_mode: Option<MeteringMode>,
    pub(crate) auto_partitioning_settings: Option<AutoPartitioningSettings>,
}

impl CreateTopicParams {
    pub fn builder(path: impl Into<String>) -> CreateTopicParamsBuilder {
        CreateTopicParamsBuilder {
            params: CreateTopicParams {
                path: path.into(),
                min_active_partitions: None,
                max_active_partitions: None,
                partition_count_limit: None,
                retention_period: None,
                retention_storage_mb: None,
                supported_codecs: None,
                partition_write_speed_bytes_per_second: None,
                partition_write_burst_bytes: None,
                attributes: None,
                consumers: None,
                metering_mode: None,
                auto_partitioning_settings: None,
            },
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn min_active_partitions(&self) -> Option<i64> {
        self.min_active_partitions
    }

    pub fn max_active_partitions(&self) -> Option<i64> {
        self.max_active_partitions
    }

    pub fn partition_count_limit(&self) -> Option<i64> {
        self.partition_count_limit
    }

    pub fn retention_period(&self) -> Option<Duration> {
        self.retention_period
    }

    pub fn retention_storage_mb(&self) -> Option<i64> {
        self.retention_storage_mb
    }

    pub fn supported_codecs(&self) -> Option<&[Codec]> {
        self.supported_codecs.as_deref()
    }

    pub fn partition_write_speed_bytes_per_second(&self) -> Option<i64> {
        self.partition_write_speed_bytes_per_second
    }

    pub fn partition_write_burst_bytes(&self) -> Option<i64> {
        self.partition_write_burst_bytes
    }

    pub fn attributes(&self) -> Option<&HashMap<String, String>> {
        self.attributes.as_ref()
    }

    pub fn consumers(&self) -> Option<&[Consumer]> {
        self.consumers.as_deref()
    }

    pub fn metering_mode(&self) -> Option<MeteringMode> {
        self.metering_mode
    }

    pub fn auto_partitioning_settings(&self) -> Option<&AutoPartitioningSettings> {
        self.auto_partitioning_settings.as_ref()
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_path(&self.path)?;
        check_non_negative("min_active_partitions", self.min_active_partitions)?;
        check_non_negative("max_active_partitions", self.max_active_partitions)?;
        check_non_negative("partition_count_limit", self.partition_count_limit)?;
        check_non_negative("retention_storage_mb", self.retention_storage_mb)?;
        check_non_negative(
            "partition_write_speed_bytes_per_second",
            self.partition_write_speed_bytes_per_second,
        )?;
        check_non_negative(
            "partition_write_burst_bytes",
            self.partition_write_burst_bytes,
        )?;
        if let Some(consumers) = &self.consumers {
            check_unique_names(consumers.iter().map(|c| c.name.as_str()))?;
        }
        if let Some(settings) = &self.auto_partitioning_settings {
            settings.validate()?;
        }
        Ok(())
    }
}

/// Builder for [`CreateTopicParams`]. Setters not called stay unset.
#[derive(Debug, Clone)]
pub struct CreateTopicParamsBuilder {
    params: CreateTopicParams,
}

impl CreateTopicParamsBuilder {
    pub fn min_active_partitions(mut self, count: i64) -> Self {
        self.params.min_active_partitions = Some(count);
        self
    }

    pub fn max_active_partitions(mut self, count: i64) -> Self {
        self.params.max_active_partitions = Some(count);
        self
    }

    /// Limit on all partitions, including inactive (read-only) ones.
    pub fn partition_count_limit(mut self, limit: i64) -> Self {
        self.params.partition_count_limit = Some(limit);
        self
    }

    pub fn retention_period(mut self, period: Duration) -> Self {
        self.params.retention_period = Some(period);
        self
    }

    /// Zero means no size limit.
    pub fn retention_storage_mb(mut self, mb: i64) -> Self {
        self.params.retention_storage_mb = Some(mb);
        self
    }

    pub fn supported_codecs(mut self, codecs: impl IntoIterator<Item = Codec>) -> Self {
        self.params.supported_codecs = Some(codecs.into_iter().collect());
        self
    }

    pub fn partition_write_speed_bytes_per_second(mut self, speed: i64) -> Self {
        self.params.partition_write_speed_bytes_per_second = Some(speed);
        self
    }

    pub fn partition_write_burst_bytes(mut self, burst: i64) -> Self {
        self.params.partition_write_burst_bytes = Some(burst);
        self
    }

    /// Replace the whole attribute map.
    pub fn attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.params.attributes = Some(attributes);
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .attributes
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn consumer(mut self, consumer: impl Into<Consumer>) -> Self {
        self.params
            .consumers
            .get_or_insert_with(Vec::new)
            .push(consumer.into());
        self
    }

    pub fn metering_mode(mut self, mode: MeteringMode) -> Self {
        self.params.metering_mode = Some(mode);
        self
    }

    pub fn auto_partitioning_settings(mut self, settings: AutoPartitioningSettings) -> Self {
        self.params.auto_partitioning_settings = Some(settings);
        self
    }

    pub fn build(self) -> Result<CreateTopicParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Parameters of an alter-topic request.
///
/// Only obtainable through [`AlterTopicParams::builder`]:
///
/// ```compile_fail
/// let params = topicline_client::AlterTopicParams::default();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTopicParams {
    pub(crate) path: String,
    pub(crate) set_min_active_partitions: Option<i64>,
    pub(crate) set_max_active_partitions: Option<i64>,
    pub(crate) set_partition_count_limit: Option<i64>,
    pub(crate) add_consumers: Vec<Consumer>,
    pub(crate) alter_consumers: Vec<AlterConsumer>,
    pub(crate) drop_consumers: Vec<String>,
    pub(crate) alter_attributes: Option<HashMap<String, String>>,
    pub(crate) set_metering_mode: Option<MeteringMode>,
    pub(crate) set_partition_write_speed_bytes_per_second: Option<i64>,
    pub(crate) set_partition_write_burst_bytes: Option<i64>,
    pub(crate) set_retention_period: Option<Duration>,
    pub(crate) set_retention_storage_mb: Option<i64>,
    pub(crate) set_supported_codecs: Option<Vec<Codec>>,
    pub(crate) alter_auto_partitioning_settings: Option<AlterAutoPartitioningSettings>,
}

impl AlterTopicParams {
    pub fn builder(path: impl Into<String>) -> AlterTopicParamsBuilder {
        AlterTopicParamsBuilder {
            params: AlterTopicParams {
                path: path.into(),
                set_min_active_partitions: None,
                set_max_active_partitions: None,
                set_partition_count_limit: None,
                add_consumers: Vec::new(),
                alter_consumers: Vec::new(),
                drop_consumers: Vec::new(),
                alter_attributes: None,
                set_metering_mode: None,
                set_partition_write_speed_bytes_per_second: None,
                set_partition_write_burst_bytes: None,
                set_retention_period: None,
                set_retention_storage_mb: None,
                set_supported_codecs: None,
                alter_auto_partitioning_settings: None,
            },
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_min_active_partitions(&self) -> Option<i64> {
        self.set_min_active_partitions
    }

    pub fn set_max_active_partitions(&self) -> Option<i64> {
        self.set_max_active_partitions
    }

    pub fn set_partition_count_limit(&self) -> Option<i64> {
        self.set_partition_count_limit
    }

    pub fn add_consumers(&self) -> &[Consumer] {
        &self.add_consumers
    }

    pub fn alter_consumers(&self) -> &[AlterConsumer] {
        &self.alter_consumers
    }

    pub fn drop_consumers(&self) -> &[String] {
        &self.drop_consumers
    }

    pub fn alter_attributes(&self) -> Option<&HashMap<String, String>> {
        self.alter_attributes.as_ref()
    }

    pub fn set_metering_mode(&self) -> Option<MeteringMode> {
        self.set_metering_mode
    }

    pub fn set_partition_write_speed_bytes_per_second(&self) -> Option<i64> {
        self.set_partition_write_speed_bytes_per_second
    }

    pub fn set_partition_write_burst_bytes(&self) -> Option<i64> {
        self.set_partition_write_burst_bytes
    }

    pub fn set_retention_period(&self) -> Option<Duration> {
        self.set_retention_period
    }

    pub fn set_retention_storage_mb(&self) -> Option<i64> {
        self.set_retention_storage_mb
    }

    pub fn set_supported_codecs(&self) -> Option<&[Codec]> {
        self.set_supported_codecs.as_deref()
    }

    pub fn alter_auto_partitioning_settings(&self) -> Option<&AlterAutoPartitioningSettings> {
        self.alter_auto_partitioning_settings.as_ref()
    }

    /// True if sending this request would not change anything.
    pub fn is_noop(&self) -> bool {
        self == &AlterTopicParams::builder(self.path.clone()).params
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_path(&self.path)?;
        check_non_negative("set_min_active_partitions", self.set_min_active_partitions)?;
        check_non_negative("set_max_active_partitions", self.set_max_active_partitions)?;
        check_non_negative("set_partition_count_limit", self.set_partition_count_limit)?;
        check_non_negative("set_retention_storage_mb", self.set_retention_storage_mb)?;
        check_non_negative(
            "set_partition_write_speed_bytes_per_second",
            self.set_partition_write_speed_bytes_per_second,
        )?;
        check_non_negative(
            "set_partition_write_burst_bytes",
            self.set_partition_write_burst_bytes,
        )?;
        check_unique_names(self.add_consumers.iter().map(|c| c.name.as_str()))?;
        check_unique_names(self.alter_consumers.iter().map(|c| c.name.as_str()))?;
        if self.drop_consumers.iter().any(String::is_empty) {
            return Err(ValidationError::EmptyField("consumer name"));
        }
        if let Some(settings) = &self.alter_auto_partitioning_settings {
            settings.validate()?;
        }
        Ok(())
    }
}

/// Builder for [`AlterTopicParams`]. Setters not called leave the field untouched.
#[derive(Debug, Clone)]
pub struct AlterTopicParamsBuilder {
    params: AlterTopicParams,
}

impl AlterTopicParamsBuilder {
    pub fn set_min_active_partitions(mut self, count: i64) -> Self {
        self.params.set_min_active_partitions = Some(count);
        self
    }

    pub fn set_max_active_partitions(mut self, count: i64) -> Self {
        self.params.set_max_active_partitions = Some(count);
        self
    }

    pub fn set_partition_count_limit(mut self, limit: i64) -> Self {
        self.params.set_partition_count_limit = Some(limit);
        self
    }

    pub fn add_consumer(mut self, consumer: impl Into<Consumer>) -> Self {
        self.params.add_consumers.push(consumer.into());
        self
    }

    pub fn alter_consumer(mut self, delta: impl Into<AlterConsumer>) -> Self {
        self.params.alter_consumers.push(delta.into());
        self
    }

    pub fn drop_consumer(mut self, name: impl Into<String>) -> Self {
        self.params.drop_consumers.push(name.into());
        self
    }

    /// Replace the whole attribute change set. An empty map is still sent.
    pub fn alter_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.params.alter_attributes = Some(attributes);
        self
    }

    pub fn set_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .alter_attributes
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Queue removal of an attribute (sent as an empty value).
    pub fn remove_attribute(self, key: impl Into<String>) -> Self {
        self.set_attribute(key, "")
    }

    pub fn set_metering_mode(mut self, mode: MeteringMode) -> Self {
        self.params.set_metering_mode = Some(mode);
        self
    }

    pub fn set_partition_write_speed_bytes_per_second(mut self, speed: i64) -> Self {
        self.params.set_partition_write_speed_bytes_per_second = Some(speed);
        self
    }

    pub fn set_partition_write_burst_bytes(mut self, burst: i64) -> Self {
        self.params.set_partition_write_burst_bytes = Some(burst);
        self
    }

    pub fn set_retention_period(mut self, period: Duration) -> Self {
        self.params.set_retention_period = Some(period);
        self
    }

    pub fn set_retention_storage_mb(mut self, mb: i64) -> Self {
        self.params.set_retention_storage_mb = Some(mb);
        self
    }

    pub fn set_supported_codecs(mut self, codecs: impl IntoIterator<Item = Codec>) -> Self {
        self.params.set_supported_codecs = Some(codecs.into_iter().collect());
        self
    }

    pub fn alter_auto_partitioning_settings(
        mut self,
        settings: AlterAutoPartitioningSettings,
    ) -> Self {
        self.params.alter_auto_partitioning_settings = Some(settings);
        self
    }

    pub fn build(self) -> Result<AlterTopicParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Parameters of a drop-topic request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTopicParams {
    pub(crate) path: String,
}

impl DropTopicParams {
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        check_path(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Parameters of a describe-topic request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeTopicParams {
    pub(crate) path: String,
    pub(crate) include_stats: bool,
}

impl DescribeTopicParams {
    /// With `include_stats` the result carries per-partition statistics.
    pub fn new(path: impl Into<String>, include_stats: bool) -> Result<Self> {
        let path = path.into();
        check_path(&path)?;
        Ok(Self {
            path,
            include_stats,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn include_stats(&self) -> bool {
        self.include_stats
    }
}
