//! The lifecycle state machine: a static transition table and an ephemeral
//! machine instance.
//!
//! The machine has no persisted identity. It is rebuilt from the order's
//! stored status for every incoming event and discarded afterwards, which
//! keeps the status field in storage as the single source of truth.

use super::{OrderError, OrderEvent, OrderStatus};

/// A side effect attached to a transition, executed exactly once when the
/// transition is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionAction {
    /// Emit a validation request for the order.
    SendValidateRequest,

    /// Emit an allocation request for the order.
    SendAllocateRequest,

    /// Ask the inventory service to release previously allocated stock.
    SendDeallocateRequest,

    /// Emit an allocation failure notification carrying the order id.
    SendAllocationFailureEvent,

    /// Local compensating step for a failed validation.
    ValidationFailureCompensation,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub source: OrderStatus,
    pub event: OrderEvent,
    pub target: OrderStatus,
    pub action: Option<TransitionAction>,
}

/// The complete lifecycle transition table.
///
/// Any `(status, event)` pair absent from this table is rejected without
/// mutation. Terminal statuses have no rows.
pub const TRANSITIONS: &[Transition] = &[
    Transition {
        source: OrderStatus::New,
        event: OrderEvent::ValidateOrder,
        target: OrderStatus::ValidationPending,
        action: Some(TransitionAction::SendValidateRequest),
    },
    Transition {
        source: OrderStatus::ValidationPending,
        event: OrderEvent::ValidationPassed,
        target: OrderStatus::Validated,
        action: None,
    },
    Transition {
        source: OrderStatus::ValidationPending,
        event: OrderEvent::ValidationFailed,
        target: OrderStatus::ValidationException,
        action: Some(TransitionAction::ValidationFailureCompensation),
    },
    Transition {
        source: OrderStatus::ValidationPending,
        event: OrderEvent::CancelOrder,
        target: OrderStatus::Cancelled,
        action: None,
    },
    Transition {
        source: OrderStatus::Validated,
        event: OrderEvent::AllocateOrder,
        target: OrderStatus::AllocationPending,
        action: Some(TransitionAction::SendAllocateRequest),
    },
    Transition {
        source: OrderStatus::Validated,
        event: OrderEvent::CancelOrder,
        target: OrderStatus::Cancelled,
        action: None,
    },
    Transition {
        source: OrderStatus::AllocationPending,
        event: OrderEvent::AllocationSuccess,
        target: OrderStatus::Allocated,
        action: None,
    },
    Transition {
        source: OrderStatus::AllocationPending,
        event: OrderEvent::AllocationFailed,
        target: OrderStatus::AllocationException,
        action: Some(TransitionAction::SendAllocationFailureEvent),
    },
    Transition {
        source: OrderStatus::AllocationPending,
        event: OrderEvent::AllocationNoInventory,
        target: OrderStatus::PendingInventory,
        action: None,
    },
    Transition {
        source: OrderStatus::AllocationPending,
        event: OrderEvent::CancelOrder,
        target: OrderStatus::Cancelled,
        action: None,
    },
    Transition {
        source: OrderStatus::Allocated,
        event: OrderEvent::BeerOrderPickedUp,
        target: OrderStatus::PickedUp,
        action: None,
    },
    Transition {
        source: OrderStatus::Allocated,
        event: OrderEvent::CancelOrder,
        target: OrderStatus::Cancelled,
        action: Some(TransitionAction::SendDeallocateRequest),
    },
];

/// An ephemeral state machine instance seeded from a persisted status.
#[derive(Debug, Clone, Copy)]
pub struct OrderStateMachine {
    current: OrderStatus,
}

impl OrderStateMachine {
    /// Rehydrates a machine at the given status.
    pub fn for_status(status: OrderStatus) -> Self {
        Self { current: status }
    }

    /// Returns the machine's current status.
    pub fn status(&self) -> OrderStatus {
        self.current
    }

    /// Submits an event to the machine.
    ///
    /// If the transition table defines a row for `(current, event)`, the
    /// machine advances to the target status and the attached action (if
    /// any) is returned for the caller to run. Otherwise the machine is
    /// left unchanged and `TransitionRejected` is returned.
    pub fn send_event(
        &mut self,
        event: OrderEvent,
    ) -> Result<Option<TransitionAction>, OrderError> {
        let transition = TRANSITIONS
            .iter()
            .find(|t| t.source == self.current && t.event == event)
            .ok_or(OrderError::TransitionRejected {
                status: self.current,
                event,
            })?;

        self.current = transition.target;
        Ok(transition.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(status: OrderStatus, event: OrderEvent) -> bool {
        TRANSITIONS
            .iter()
            .any(|t| t.source == status && t.event == event)
    }

    #[test]
    fn test_table_has_no_duplicate_rows() {
        for (i, a) in TRANSITIONS.iter().enumerate() {
            for b in &TRANSITIONS[i + 1..] {
                assert!(
                    !(a.source == b.source && a.event == b.event),
                    "duplicate row for ({}, {})",
                    a.source,
                    a.event
                );
            }
        }
    }

    #[test]
    fn test_terminal_statuses_have_no_outgoing_rows() {
        for transition in TRANSITIONS {
            assert!(
                !transition.source.is_terminal(),
                "transition out of terminal status {}",
                transition.source
            );
        }
    }

    #[test]
    fn test_pending_inventory_is_a_dead_end() {
        // Partially allocated orders have no defined path forward.
        assert!(!TRANSITIONS
            .iter()
            .any(|t| t.source == OrderStatus::PendingInventory));
    }

    #[test]
    fn test_delivered_statuses_are_unreachable() {
        // Reserved states: declared terminal, never targeted.
        assert!(!TRANSITIONS
            .iter()
            .any(|t| t.target == OrderStatus::Delivered
                || t.target == OrderStatus::DeliveryException));
    }

    #[test]
    fn test_accepted_transition_advances_and_returns_action() {
        let mut machine = OrderStateMachine::for_status(OrderStatus::New);
        let action = machine.send_event(OrderEvent::ValidateOrder).unwrap();

        assert_eq!(machine.status(), OrderStatus::ValidationPending);
        assert_eq!(action, Some(TransitionAction::SendValidateRequest));
    }

    #[test]
    fn test_rejected_transition_leaves_status_unchanged() {
        let mut machine = OrderStateMachine::for_status(OrderStatus::New);
        let result = machine.send_event(OrderEvent::AllocationSuccess);

        assert!(matches!(
            result,
            Err(OrderError::TransitionRejected {
                status: OrderStatus::New,
                event: OrderEvent::AllocationSuccess,
            })
        ));
        assert_eq!(machine.status(), OrderStatus::New);
    }

    #[test]
    fn test_every_undefined_pair_is_rejected() {
        for status in OrderStatus::ALL {
            for event in OrderEvent::ALL {
                if defined(status, event) {
                    continue;
                }
                let mut machine = OrderStateMachine::for_status(status);
                let result = machine.send_event(event);
                assert!(
                    matches!(result, Err(OrderError::TransitionRejected { .. })),
                    "({status}, {event}) should be rejected"
                );
                assert_eq!(machine.status(), status);
            }
        }
    }

    #[test]
    fn test_cancel_accepted_exactly_from_cancellable_statuses() {
        let cancellable = [
            OrderStatus::ValidationPending,
            OrderStatus::Validated,
            OrderStatus::AllocationPending,
            OrderStatus::Allocated,
        ];

        for status in OrderStatus::ALL {
            let mut machine = OrderStateMachine::for_status(status);
            let result = machine.send_event(OrderEvent::CancelOrder);
            if cancellable.contains(&status) {
                assert!(result.is_ok(), "cancel from {status} should be accepted");
                assert_eq!(machine.status(), OrderStatus::Cancelled);
            } else {
                assert!(result.is_err(), "cancel from {status} should be rejected");
            }
        }
    }

    #[test]
    fn test_only_cancel_from_allocated_deallocates() {
        for transition in TRANSITIONS {
            let expects_deallocate = transition.source == OrderStatus::Allocated
                && transition.event == OrderEvent::CancelOrder;
            assert_eq!(
                transition.action == Some(TransitionAction::SendDeallocateRequest),
                expects_deallocate
            );
        }
    }

    #[test]
    fn test_happy_path_walk() {
        let mut machine = OrderStateMachine::for_status(OrderStatus::New);

        machine.send_event(OrderEvent::ValidateOrder).unwrap();
        machine.send_event(OrderEvent::ValidationPassed).unwrap();
        machine.send_event(OrderEvent::AllocateOrder).unwrap();
        machine.send_event(OrderEvent::AllocationSuccess).unwrap();
        machine.send_event(OrderEvent::BeerOrderPickedUp).unwrap();

        assert_eq!(machine.status(), OrderStatus::PickedUp);
        assert!(machine.status().is_terminal());
    }
}
