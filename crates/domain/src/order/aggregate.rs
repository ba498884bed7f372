//! Beer order aggregate implementation.

use common::{BeerId, CustomerId, OrderId, OrderLineId, Upc};
use serde::{Deserialize, Serialize};

use super::{
    BeerOrderSnapshot, OrderError, OrderEvent, OrderStateMachine, OrderStatus, TransitionAction,
};

/// A single line of a beer order.
///
/// Lines are owned exclusively by their parent order and matched against
/// collaborator snapshots by line id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Unique line identifier.
    pub id: OrderLineId,

    /// The beer being ordered.
    pub beer_id: BeerId,

    /// Unit-of-commerce code for the beer.
    pub upc: Upc,

    /// Requested quantity (always positive).
    pub order_quantity: u32,

    /// Quantity allocated so far (0 ..= order_quantity).
    pub quantity_allocated: u32,
}

/// Line data supplied when submitting a new order; the line id is assigned
/// on construction and allocation starts at zero.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub beer_id: BeerId,
    pub upc: Upc,
    pub order_quantity: u32,
}

impl NewOrderLine {
    /// Creates a new order line request.
    pub fn new(beer_id: BeerId, upc: impl Into<Upc>, order_quantity: u32) -> Self {
        Self {
            beer_id,
            upc: upc.into(),
            order_quantity,
        }
    }
}

/// Beer order aggregate root.
///
/// The authoritative state is the `status` field; it is private and changes
/// only through [`BeerOrder::apply_event`], which drives the lifecycle state
/// machine. There is no other mutation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeerOrder {
    /// Unique order identifier.
    id: OrderId,

    /// Customer who placed the order.
    customer_id: CustomerId,

    /// Client-supplied routing token; opaque to the core, forwarded to
    /// collaborating services which may key behavior off it.
    customer_ref: Option<String>,

    /// Current lifecycle status.
    status: OrderStatus,

    /// Lines in the order.
    lines: Vec<OrderLine>,
}

impl BeerOrder {
    /// Creates a new order at status [`OrderStatus::New`].
    ///
    /// Rejects an order with no lines or with a zero requested quantity on
    /// any line.
    pub fn new(
        customer_id: CustomerId,
        customer_ref: Option<String>,
        lines: Vec<NewOrderLine>,
    ) -> Result<Self, OrderError> {
        if lines.is_empty() {
            return Err(OrderError::NoLines);
        }

        if let Some(line) = lines.iter().find(|l| l.order_quantity == 0) {
            return Err(OrderError::InvalidQuantity {
                quantity: line.order_quantity,
            });
        }

        Ok(Self {
            id: OrderId::new(),
            customer_id,
            customer_ref,
            status: OrderStatus::New,
            lines: lines
                .into_iter()
                .map(|l| OrderLine {
                    id: OrderLineId::new(),
                    beer_id: l.beer_id,
                    upc: l.upc,
                    order_quantity: l.order_quantity,
                    quantity_allocated: 0,
                })
                .collect(),
        })
    }

    /// Returns the order id.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the customer id.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the routing token, if any.
    pub fn customer_ref(&self) -> Option<&str> {
        self.customer_ref.as_deref()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the order lines.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Applies a lifecycle event to the order.
    ///
    /// Rehydrates an ephemeral state machine at the current status, submits
    /// the event, and on acceptance commits the new status back onto the
    /// aggregate, returning the attached transition action for the caller
    /// to run. A rejected event leaves the order untouched.
    pub fn apply_event(
        &mut self,
        event: OrderEvent,
    ) -> Result<Option<TransitionAction>, OrderError> {
        let mut machine = OrderStateMachine::for_status(self.status);
        let action = machine.send_event(event)?;
        self.status = machine.status();
        Ok(action)
    }

    /// Merges per-line allocated quantities from a collaborator snapshot.
    ///
    /// Lines are matched by line id. Stored lines absent from the snapshot
    /// are left unchanged; snapshot lines that match nothing are ignored.
    pub fn update_allocated_quantities(&mut self, snapshot: &BeerOrderSnapshot) {
        for line in &mut self.lines {
            if let Some(snapshot_line) = snapshot.lines.iter().find(|l| l.id == line.id) {
                line.quantity_allocated = snapshot_line.quantity_allocated;
            }
        }
    }

    /// Builds the wire-facing snapshot of this order.
    pub fn to_snapshot(&self) -> BeerOrderSnapshot {
        BeerOrderSnapshot::from(self)
    }
}
