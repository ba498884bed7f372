//! Saga error types.

use common::OrderId;
use domain::DomainError;
use thiserror::Error;

/// Errors that can occur while driving an order through its lifecycle.
#[derive(Debug, Error)]
pub enum SagaError {
    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A transition action failed before the transition could be committed.
    #[error("Transition action failed: {0}")]
    ActionFailed(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;
