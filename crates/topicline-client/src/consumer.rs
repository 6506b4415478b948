//! Consumers: named reader groups attached to a topic.
//!
//! `Consumer` is the full description, used when creating a topic, when adding
//! consumers to an existing one, and in describe results. `AlterConsumer` is an
//! incremental change to a consumer that already exists.

use crate::codec::Codec;
use crate::error::ValidationError;
use crate::settings::MultipleWindowsStat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Full description of a consumer. The name identifies it within the topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Consumer {
    pub name: String,

    /// Messages are never expired by retention while an important consumer has
    /// not read them. A stalled important consumer will eventually fill the disk.
    pub important: bool,

    /// Messages written before this instant are skipped.
    pub read_from: Option<DateTime<Utc>>,

    /// Codecs this consumer can decode. The topic's codecs must be a subset.
    pub supported_codecs: Vec<Codec>,

    pub attributes: HashMap<String, String>,

    /// Only present in describe results.
    pub consumer_stats: Option<ConsumerStats>,
}

/// Read statistics of a consumer, reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerStats {
    pub min_partitions_last_read_time: DateTime<Utc>,
    /// Largest read-time minus write-time among messages read in the last minute.
    pub max_read_time_lag: Duration,
    /// Largest write-time minus create-time among messages written in the last minute.
    pub max_write_time_lag: Duration,
    pub bytes_read: MultipleWindowsStat,
}

impl Consumer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn read_from(mut self, instant: DateTime<Utc>) -> Self {
        self.read_from = Some(instant);
        self
    }

    pub fn supported_codecs(mut self, codecs: impl IntoIterator<Item = Codec>) -> Self {
        self.supported_codecs = codecs.into_iter().collect();
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for Consumer {
    fn from(name: &str) -> Self {
        Consumer::new(name)
    }
}

impl From<String> for Consumer {
    fn from(name: String) -> Self {
        Consumer::new(name)
    }
}

/// Change to an existing consumer. Every `None` leaves that field untouched.
///
/// `alter_attributes: None` leaves all attributes as they are, while
/// `Some(map)` upserts every entry of `map`; an entry with an empty value
/// removes that key. `Some(HashMap::new())` is sent as an explicit, empty change
/// set and is distinguishable from `None` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlterConsumer {
    pub name: String,
    pub set_important: Option<bool>,
    pub set_read_from: Option<DateTime<Utc>>,
    pub set_supported_codecs: Option<Vec<Codec>>,
    pub alter_attributes: Option<HashMap<String, String>>,
}

impl AlterConsumer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn set_important(mut self, important: bool) -> Self {
        self.set_important = Some(important);
        self
    }

    pub fn set_read_from(mut self, instant: DateTime<Utc>) -> Self {
        self.set_read_from = Some(instant);
        self
    }

    pub fn set_supported_codecs(mut self, codecs: impl IntoIterator<Item = Codec>) -> Self {
        self.set_supported_codecs = Some(codecs.into_iter().collect());
        self
    }

    pub fn set_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.alter_attributes
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Queue removal of an attribute (sent as an empty value).
    pub fn remove_attribute(self, key: impl Into<String>) -> Self {
        self.set_attribute(key, "")
    }
}

impl From<&str> for AlterConsumer {
    fn from(name: &str) -> Self {
        AlterConsumer::new(name)
    }
}

/// Reject empty names and names listed twice.
pub(crate) fn check_unique_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(ValidationError::EmptyField("consumer name"));
        }
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateConsumer(name.to_string()));
        }
    }
    Ok(())
}
