use async_trait::async_trait;

use crate::{OrderId, OrderRecord, Result, Version};

/// Core trait for order store implementations.
///
/// The store holds one record per order id. `update` is a compare-and-swap
/// on the record version: load, mutate, and update form one atomic unit of
/// work as long as the caller re-runs the whole cycle on
/// [`VersionConflict`](crate::OrderStoreError::VersionConflict).
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new record for the given order.
    ///
    /// Fails with `AlreadyExists` if a record for this order id is already
    /// present. Returns the version assigned to the new record (always
    /// [`Version::first`]).
    async fn insert(&self, order_id: OrderId, payload: serde_json::Value) -> Result<Version>;

    /// Loads the current record for an order.
    ///
    /// Returns `None` if no record exists for this order id.
    async fn load(&self, order_id: OrderId) -> Result<Option<OrderRecord>>;

    /// Replaces the record payload, expecting the stored version to match.
    ///
    /// Fails with `VersionConflict` if another writer committed since the
    /// record was loaded, and with `NotFound` if the record never existed.
    /// Returns the new version after the update.
    async fn update(
        &self,
        order_id: OrderId,
        payload: serde_json::Value,
        expected_version: Version,
    ) -> Result<Version>;

    /// Gets the current version of an order record.
    ///
    /// Returns `None` if the record doesn't exist.
    async fn current_version(&self, order_id: OrderId) -> Result<Option<Version>>;
}
