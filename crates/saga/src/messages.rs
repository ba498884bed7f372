//! Wire messages exchanged with the validation and allocation services.

use common::OrderId;
use domain::BeerOrderSnapshot;
use serde::{Deserialize, Serialize};

use crate::channels;

/// Asks the validation service to validate an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOrderRequest {
    pub beer_order: BeerOrderSnapshot,
}

/// The validation service's verdict on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOrderResult {
    pub order_id: OrderId,
    pub is_valid: bool,
}

/// Asks the allocation service to allocate inventory for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocateOrderRequest {
    pub beer_order: BeerOrderSnapshot,
}

/// The allocation service's outcome for an order.
///
/// The snapshot carries the quantities the service managed to allocate per
/// line. `allocation_error` takes precedence over `pending_inventory` when
/// both are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocateOrderResult {
    pub beer_order: BeerOrderSnapshot,
    pub pending_inventory: bool,
    pub allocation_error: bool,
}

/// Notifies downstream consumers that allocation failed for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationFailureEvent {
    pub order_id: OrderId,
}

/// Asks the allocation service to release previously allocated inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeallocateOrderRequest {
    pub beer_order: BeerOrderSnapshot,
}

/// A message bound for one of the outbound channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundMessage {
    ValidateOrder(ValidateOrderRequest),
    AllocateOrder(AllocateOrderRequest),
    DeallocateOrder(DeallocateOrderRequest),
    AllocationFailure(AllocationFailureEvent),
}

impl OutboundMessage {
    /// The channel this message is published on.
    pub fn channel(&self) -> &'static str {
        match self {
            OutboundMessage::ValidateOrder(_) => channels::VALIDATE_ORDER_QUEUE,
            OutboundMessage::AllocateOrder(_) => channels::ALLOCATE_ORDER_QUEUE,
            OutboundMessage::DeallocateOrder(_) => channels::DEALLOCATE_ORDER_QUEUE,
            OutboundMessage::AllocationFailure(_) => channels::ALLOCATE_FAILURE_QUEUE,
        }
    }

    /// The order this message concerns.
    pub fn order_id(&self) -> OrderId {
        match self {
            OutboundMessage::ValidateOrder(request) => request.beer_order.id,
            OutboundMessage::AllocateOrder(request) => request.beer_order.id,
            OutboundMessage::DeallocateOrder(request) => request.beer_order.id,
            OutboundMessage::AllocationFailure(event) => event.order_id,
        }
    }
}
