//! Beer order lifecycle statuses.

use serde::{Deserialize, Serialize};

/// The status of a beer order in its lifecycle.
///
/// Lifecycle (exception and cancel paths omitted):
/// ```text
/// New ──► ValidationPending ──► Validated ──► AllocationPending ──► Allocated ──► PickedUp
/// ```
///
/// `Delivered` and `DeliveryException` are declared terminal states that no
/// transition currently reaches; they are reserved for a later delivery
/// flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order was just submitted and has not been sent for validation yet.
    #[default]
    New,

    /// A validation request is in flight to the validation service.
    ValidationPending,

    /// The validation service accepted the order.
    Validated,

    /// The validation service rejected the order (terminal state).
    ValidationException,

    /// An allocation request is in flight to the inventory service.
    AllocationPending,

    /// Inventory was fully allocated to the order.
    Allocated,

    /// Inventory was only partially allocated; the order waits for stock
    /// (no outgoing transition is defined from here).
    PendingInventory,

    /// The inventory service failed to allocate (terminal state).
    AllocationException,

    /// The customer picked up the order (terminal state).
    PickedUp,

    /// The order was cancelled (terminal state).
    Cancelled,

    /// The order was delivered (reserved terminal state).
    Delivered,

    /// Delivery failed (reserved terminal state).
    DeliveryException,
}

impl OrderStatus {
    /// Returns true if this is a terminal status (no further transitions
    /// possible).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::PickedUp
                | OrderStatus::Delivered
                | OrderStatus::Cancelled
                | OrderStatus::DeliveryException
                | OrderStatus::ValidationException
                | OrderStatus::AllocationException
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::ValidationPending => "ValidationPending",
            OrderStatus::Validated => "Validated",
            OrderStatus::ValidationException => "ValidationException",
            OrderStatus::AllocationPending => "AllocationPending",
            OrderStatus::Allocated => "Allocated",
            OrderStatus::PendingInventory => "PendingInventory",
            OrderStatus::AllocationException => "AllocationException",
            OrderStatus::PickedUp => "PickedUp",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::DeliveryException => "DeliveryException",
        }
    }

    /// All statuses, in declaration order.
    pub const ALL: [OrderStatus; 12] = [
        OrderStatus::New,
        OrderStatus::ValidationPending,
        OrderStatus::Validated,
        OrderStatus::ValidationException,
        OrderStatus::AllocationPending,
        OrderStatus::Allocated,
        OrderStatus::PendingInventory,
        OrderStatus::AllocationException,
        OrderStatus::PickedUp,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
        OrderStatus::DeliveryException,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_new() {
        assert_eq!(OrderStatus::default(), OrderStatus::New);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::New.is_terminal());
        assert!(!OrderStatus::ValidationPending.is_terminal());
        assert!(!OrderStatus::Validated.is_terminal());
        assert!(!OrderStatus::AllocationPending.is_terminal());
        assert!(!OrderStatus::Allocated.is_terminal());
        assert!(!OrderStatus::PendingInventory.is_terminal());

        assert!(OrderStatus::ValidationException.is_terminal());
        assert!(OrderStatus::AllocationException.is_terminal());
        assert!(OrderStatus::PickedUp.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::DeliveryException.is_terminal());
    }

    #[test]
    fn test_all_covers_every_status() {
        assert_eq!(OrderStatus::ALL.len(), 12);
        // Declaration order sanity check on the endpoints.
        assert_eq!(OrderStatus::ALL[0], OrderStatus::New);
        assert_eq!(OrderStatus::ALL[11], OrderStatus::DeliveryException);
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::New.to_string(), "New");
        assert_eq!(
            OrderStatus::ValidationPending.to_string(),
            "ValidationPending"
        );
        assert_eq!(
            OrderStatus::PendingInventory.to_string(),
            "PendingInventory"
        );
    }

    #[test]
    fn test_serialization() {
        let status = OrderStatus::AllocationPending;
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, deserialized);
    }
}
