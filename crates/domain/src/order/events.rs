//! Beer order lifecycle events.

use serde::{Deserialize, Serialize};

/// Events that drive a beer order through its lifecycle.
///
/// Every status change goes through exactly one of these events; there is
/// no other mutation path for an order's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderEvent {
    /// Send the order to the validation service.
    ValidateOrder,

    /// The validation service accepted the order.
    ValidationPassed,

    /// The validation service rejected the order.
    ValidationFailed,

    /// The caller asked to cancel the order.
    CancelOrder,

    /// Send the order to the inventory service for allocation.
    AllocateOrder,

    /// The inventory service fully allocated the order.
    AllocationSuccess,

    /// The inventory service allocated only part of the order.
    AllocationNoInventory,

    /// The inventory service failed to allocate the order.
    AllocationFailed,

    /// The customer picked up the order.
    BeerOrderPickedUp,
}

impl OrderEvent {
    /// Returns the event name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderEvent::ValidateOrder => "ValidateOrder",
            OrderEvent::ValidationPassed => "ValidationPassed",
            OrderEvent::ValidationFailed => "ValidationFailed",
            OrderEvent::CancelOrder => "CancelOrder",
            OrderEvent::AllocateOrder => "AllocateOrder",
            OrderEvent::AllocationSuccess => "AllocationSuccess",
            OrderEvent::AllocationNoInventory => "AllocationNoInventory",
            OrderEvent::AllocationFailed => "AllocationFailed",
            OrderEvent::BeerOrderPickedUp => "BeerOrderPickedUp",
        }
    }

    /// All events, in declaration order.
    pub const ALL: [OrderEvent; 9] = [
        OrderEvent::ValidateOrder,
        OrderEvent::ValidationPassed,
        OrderEvent::ValidationFailed,
        OrderEvent::CancelOrder,
        OrderEvent::AllocateOrder,
        OrderEvent::AllocationSuccess,
        OrderEvent::AllocationNoInventory,
        OrderEvent::AllocationFailed,
        OrderEvent::BeerOrderPickedUp,
    ];
}

impl std::fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
