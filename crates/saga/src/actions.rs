//! Dispatch of transition actions onto the outbound gateway.

use domain::{BeerOrder, TransitionAction};

use crate::error::Result;
use crate::gateway::OutboundGateway;
use crate::messages::{
    AllocateOrderRequest, AllocationFailureEvent, DeallocateOrderRequest, OutboundMessage,
    ValidateOrderRequest,
};

/// Maps each [`TransitionAction`] to its single behavior. Swapping the
/// gateway swaps the whole set, which is how tests capture the traffic.
pub struct TransitionActions<G: OutboundGateway> {
    gateway: G,
}

impl<G: OutboundGateway> TransitionActions<G> {
    /// Creates the action set over the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Runs the side effect attached to an accepted transition.
    pub async fn run(&self, action: TransitionAction, order: &BeerOrder) -> Result<()> {
        match action {
            TransitionAction::SendValidateRequest => {
                self.gateway
                    .send(OutboundMessage::ValidateOrder(ValidateOrderRequest {
                        beer_order: order.to_snapshot(),
                    }))
                    .await
            }
            TransitionAction::SendAllocateRequest => {
                self.gateway
                    .send(OutboundMessage::AllocateOrder(AllocateOrderRequest {
                        beer_order: order.to_snapshot(),
                    }))
                    .await
            }
            TransitionAction::SendDeallocateRequest => {
                self.gateway
                    .send(OutboundMessage::DeallocateOrder(DeallocateOrderRequest {
                        beer_order: order.to_snapshot(),
                    }))
                    .await
            }
            TransitionAction::SendAllocationFailureEvent => {
                self.gateway
                    .send(OutboundMessage::AllocationFailure(AllocationFailureEvent {
                        order_id: order.id(),
                    }))
                    .await
            }
            TransitionAction::ValidationFailureCompensation => {
                // Local compensating step, nothing goes out on the wire.
                metrics::counter!("beer_orders_validation_failed_total").increment(1);
                tracing::error!(order_id = %order.id(), "order failed validation");
                Ok(())
            }
        }
    }
}
