//! Beer order aggregate and related types.

mod aggregate;
mod dto;
mod events;
mod machine;
mod repository;
mod status;

pub use aggregate::{BeerOrder, NewOrderLine, OrderLine};
pub use dto::{BeerOrderSnapshot, OrderLineSnapshot};
pub use events::OrderEvent;
pub use machine::{OrderStateMachine, Transition, TransitionAction, TRANSITIONS};
pub use repository::{OrderRepository, StoredOrder};
pub use status::OrderStatus;

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The event is not defined for the order's current status. The order
    /// is not mutated; this is reported to the caller and is not fatal.
    #[error("Transition rejected: no {event} transition out of {status}")]
    TransitionRejected {
        status: OrderStatus,
        event: OrderEvent,
    },

    /// The order has no lines.
    #[error("Order has no lines")]
    NoLines,

    /// A line was created with a non-positive requested quantity.
    #[error("Invalid order quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },
}
