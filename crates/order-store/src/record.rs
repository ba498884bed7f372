use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::OrderId;

/// Version number for a stored order, used for optimistic concurrency
/// control.
///
/// Versions start at 1 when the record is first inserted and increment by
/// 1 on every successful update.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a new version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the version (0) of a record that does not exist yet.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the version (1) assigned on insert.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// A stored order record: the serialized aggregate plus the metadata the
/// store needs for concurrency control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// The order this record belongs to.
    pub order_id: OrderId,

    /// Current version of the record.
    pub version: Version,

    /// The aggregate state as JSON.
    pub payload: serde_json::Value,

    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Creates a record at the first version with the current timestamp.
    pub fn new(order_id: OrderId, payload: serde_json::Value) -> Self {
        Self {
            order_id,
            version: Version::first(),
            payload,
            updated_at: Utc::now(),
        }
    }
}
