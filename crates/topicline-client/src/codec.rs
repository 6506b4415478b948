//! Message codec identifiers.
//!
//! A codec names the compression scheme of stored messages. The service treats
//! codecs as an open set: the values below are the well-known ones, but any
//! non-negative integer is a valid codec and must be carried through unchanged,
//! even when this build has no idea how to decompress it.
//!
//! ```
//! use topicline_client::Codec;
//!
//! assert_eq!(Codec::GZIP.value(), 2);
//! let custom = Codec::new(17).unwrap();
//! assert_eq!(custom.value(), 17);
//! assert_eq!(custom.name(), None);
//! assert!(Codec::new(-1).is_err());
//! ```

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use topicline_proto::topic as pb;

/// Compression scheme identifier. Ordered and compared by integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Codec(i32);

impl Codec {
    pub const UNSPECIFIED: Codec = Codec(0);
    pub const RAW: Codec = Codec(1);
    pub const GZIP: Codec = Codec(2);
    /// No implementation in the standard toolchain.
    pub const LZOP: Codec = Codec(3);
    pub const ZSTD: Codec = Codec(4);

    /// Wrap a codec value. Fails only for negative values.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::NegativeCodec(value.into()));
        }
        Ok(Codec(value))
    }

    /// Underlying integer, exactly as it travels on the wire.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Alias of a well-known codec, `None` for custom values.
    pub fn name(self) -> Option<&'static str> {
        match pb::Codec::try_from(self.0).ok()? {
            pb::Codec::Unspecified => Some("unspecified"),
            pb::Codec::Raw => Some("raw"),
            pb::Codec::Gzip => Some("gzip"),
            pb::Codec::Lzop => Some("lzop"),
            pb::Codec::Zstd => Some("zstd"),
        }
    }

    pub fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl TryFrom<i32> for Codec {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Codec::new(value)
    }
}

impl From<Codec> for i32 {
    fn from(codec: Codec) -> i32 {
        codec.0
    }
}

impl From<pb::Codec> for Codec {
    fn from(codec: pb::Codec) -> Self {
        Codec(codec as i32)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "codec({})", self.0),
        }
    }
}
