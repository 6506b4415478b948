use super::{
    codecs_from_wire, codecs_to_wire, duration_from_wire, required_timestamp_from_wire,
    timestamp_from_wire, timestamp_to_wire, windows_stat_from_wire,
};
use crate::consumer::{AlterConsumer, Consumer, ConsumerStats};
use crate::error::Result;
use topicline_proto::topic as pb;

impl Consumer {
    /// Full consumer description, for create requests and `add_consumers`.
    ///
    /// An empty codec list is left off the wire so the server picks its default.
    /// Statistics are read-only and never sent.
    pub fn to_wire(&self) -> pb::Consumer {
        pb::Consumer {
            name: self.name.clone(),
            important: self.important,
            read_from: self.read_from.map(timestamp_to_wire),
            supported_codecs: (!self.supported_codecs.is_empty())
                .then(|| codecs_to_wire(&self.supported_codecs)),
            attributes: self.attributes.clone(),
            consumer_stats: None,
        }
    }

    pub fn from_wire(consumer: pb::Consumer) -> Result<Self> {
        Ok(Self {
            name: consumer.name,
            important: consumer.important,
            read_from: consumer
                .read_from
                .map(|ts| timestamp_from_wire("read_from", ts))
                .transpose()?,
            supported_codecs: codecs_from_wire(consumer.supported_codecs)?,
            attributes: consumer.attributes,
            consumer_stats: consumer
                .consumer_stats
                .map(ConsumerStats::from_wire)
                .transpose()?,
        })
    }
}

impl ConsumerStats {
    pub fn from_wire(stats: pb::consumer::ConsumerStats) -> Result<Self> {
        Ok(Self {
            min_partitions_last_read_time: required_timestamp_from_wire(
                "min_partitions_last_read_time",
                stats.min_partitions_last_read_time,
            )?,
            max_read_time_lag: duration_from_wire("max_read_time_lag", stats.max_read_time_lag)?,
            max_write_time_lag: duration_from_wire(
                "max_write_time_lag",
                stats.max_write_time_lag,
            )?,
            bytes_read: windows_stat_from_wire(stats.bytes_read),
        })
    }
}

impl AlterConsumer {
    /// Partial consumer change, for `alter_consumers`. Unset fields stay unset.
    pub fn to_wire(&self) -> pb::AlterConsumer {
        pb::AlterConsumer {
            name: self.name.clone(),
            set_important: self.set_important,
            set_read_from: self.set_read_from.map(timestamp_to_wire),
            set_supported_codecs: self.set_supported_codecs.as_deref().map(codecs_to_wire),
            alter_attributes: self
                .alter_attributes
                .as_ref()
                .map(|values| pb::Attributes {
                    values: values.clone(),
                }),
        }
    }
}
