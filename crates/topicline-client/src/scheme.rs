//! Generic scheme entry embedded in describe results.

use serde::{Deserialize, Serialize};

/// Kind of a scheme object. Values unknown to this build are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeEntryType {
    #[default]
    Unspecified,
    Directory,
    Table,
    PersQueueGroup,
    Database,
    CoordinationNode,
    ColumnStore,
    ColumnTable,
    Sequence,
    Replication,
    Topic,
    ExternalTable,
    ExternalDataSource,
    View,
    Other(i32),
}

impl SchemeEntryType {
    /// Topics are reported either as `Topic` or, by older servers, as `PersQueueGroup`.
    pub fn is_topic(self) -> bool {
        matches!(self, Self::Topic | Self::PersQueueGroup)
    }
}

/// Access rights granted to one subject.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    pub subject: String,
    pub permission_names: Vec<String>,
}

/// Description of a scheme object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemeEntry {
    pub name: String,
    pub owner: String,
    pub entry_type: SchemeEntryType,
    /// Permissions in effect, including inherited ones.
    pub effective_permissions: Vec<Permissions>,
    /// Permissions granted on this object itself.
    pub permissions: Vec<Permissions>,
    pub size_bytes: u64,
}
