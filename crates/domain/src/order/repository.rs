//! Typed repository over the versioned order store.

use common::OrderId;
use order_store::{OrderStore, Version};

use crate::error::DomainError;

use super::BeerOrder;

/// An order loaded from the store together with the version it was loaded
/// at, which the caller must hand back on save for the compare-and-swap.
#[derive(Debug, Clone)]
pub struct StoredOrder {
    pub order: BeerOrder,
    pub version: Version,
}

/// Repository that serializes [`BeerOrder`] aggregates in and out of an
/// [`OrderStore`].
pub struct OrderRepository<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderRepository<S> {
    /// Creates a new repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Inserts a new order.
    pub async fn insert(&self, order: &BeerOrder) -> Result<Version, DomainError> {
        let payload = serde_json::to_value(order)?;
        let version = self.store.insert(order.id(), payload).await?;
        Ok(version)
    }

    /// Loads an order by id, returning `None` if it doesn't exist.
    pub async fn load(&self, order_id: OrderId) -> Result<Option<StoredOrder>, DomainError> {
        let record = self.store.load(order_id).await?;

        match record {
            Some(record) => {
                let order: BeerOrder = serde_json::from_value(record.payload)?;
                Ok(Some(StoredOrder {
                    order,
                    version: record.version,
                }))
            }
            None => Ok(None),
        }
    }

    /// Saves an order, expecting the stored version to match.
    pub async fn save(
        &self,
        order: &BeerOrder,
        expected_version: Version,
    ) -> Result<Version, DomainError> {
        let payload = serde_json::to_value(order)?;
        let version = self
            .store
            .update(order.id(), payload, expected_version)
            .await?;
        Ok(version)
    }
}
