//! Domain layer for the beer order service.
//!
//! This crate provides:
//! - The `BeerOrder` aggregate and its order lines
//! - The lifecycle state machine (closed status/event enums plus a static
//!   transition table)
//! - Snapshot DTOs exchanged with the validation and allocation services
//! - A typed repository over the versioned order store

pub mod error;
pub mod order;

pub use error::DomainError;
pub use order::{
    BeerOrder, BeerOrderSnapshot, NewOrderLine, OrderError, OrderEvent, OrderLine,
    OrderLineSnapshot, OrderRepository, OrderStateMachine, OrderStatus, StoredOrder, Transition,
    TransitionAction, TRANSITIONS,
};
