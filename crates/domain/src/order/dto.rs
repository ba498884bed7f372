//! Snapshot DTOs exchanged with the validation and allocation services.

use common::{BeerId, OrderId, OrderLineId, Upc};
use serde::{Deserialize, Serialize};

use super::BeerOrder;

/// Wire-facing snapshot of an order, carried in validation and allocation
/// requests and echoed back (with allocated quantities filled in) by the
/// inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeerOrderSnapshot {
    /// The order id, used as the correlation key.
    pub id: OrderId,

    /// Client-supplied routing token, passed through uninterpreted.
    pub customer_ref: Option<String>,

    /// Line data.
    pub lines: Vec<OrderLineSnapshot>,
}

/// Wire-facing snapshot of a single order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineSnapshot {
    pub id: OrderLineId,
    pub beer_id: BeerId,
    pub upc: Upc,
    pub order_quantity: u32,
    pub quantity_allocated: u32,
}

impl From<&BeerOrder> for BeerOrderSnapshot {
    fn from(order: &BeerOrder) -> Self {
        Self {
            id: order.id(),
            customer_ref: order.customer_ref().map(str::to_string),
            lines: order
                .lines()
                .iter()
                .map(|line| OrderLineSnapshot {
                    id: line.id,
                    beer_id: line.beer_id,
                    upc: line.upc.clone(),
                    order_quantity: line.order_quantity,
                    quantity_allocated: line.quantity_allocated,
                })
                .collect(),
        }
    }
}
