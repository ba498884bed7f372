use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{OrderId, OrderRecord, OrderStore, OrderStoreError, Result, Version};

/// In-memory order store implementation for testing.
///
/// Mirrors the conflict semantics of the PostgreSQL implementation so the
/// saga tests exercise the same compare-and-swap behavior.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    records: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records stored.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order_id: OrderId, payload: serde_json::Value) -> Result<Version> {
        let mut records = self.records.write().await;

        if records.contains_key(&order_id) {
            return Err(OrderStoreError::AlreadyExists(order_id));
        }

        let record = OrderRecord::new(order_id, payload);
        let version = record.version;
        records.insert(order_id, record);

        Ok(version)
    }

    async fn load(&self, order_id: OrderId) -> Result<Option<OrderRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&order_id).cloned())
    }

    async fn update(
        &self,
        order_id: OrderId,
        payload: serde_json::Value,
        expected_version: Version,
    ) -> Result<Version> {
        let mut records = self.records.write().await;

        let record = records
            .get_mut(&order_id)
            .ok_or(OrderStoreError::NotFound(order_id))?;

        if record.version != expected_version {
            return Err(OrderStoreError::VersionConflict {
                order_id,
                expected: expected_version,
                actual: record.version,
            });
        }

        record.version = record.version.next();
        record.payload = payload;
        record.updated_at = Utc::now();

        Ok(record.version)
    }

    async fn current_version(&self, order_id: OrderId) -> Result<Option<Version>> {
        let records = self.records.read().await;
        Ok(records.get(&order_id).map(|r| r.version))
    }
}
