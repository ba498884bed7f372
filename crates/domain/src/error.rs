use order_store::OrderStoreError;
use thiserror::Error;

use crate::order::OrderError;

/// Errors that can occur in the domain layer.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An order-level error (rejected transition, invalid order content).
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// An order store error.
    #[error("Order store error: {0}")]
    Store(#[from] OrderStoreError),

    /// A serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
