//! Beer order fulfillment saga.
//!
//! This crate orchestrates a beer order through validation and inventory
//! allocation. The order's stored status is the single source of truth: an
//! ephemeral state machine is rebuilt from it for every incoming event,
//! accepted transitions emit a message to the responsible collaborator
//! service, and the new status is committed back with optimistic
//! concurrency.
//!
//! The happy path:
//! 1. Create the order and request validation
//! 2. On a passing verdict, request inventory allocation
//! 3. On a full allocation, wait for customer pickup
//!
//! Failed validation or allocation parks the order in an exception status;
//! cancelling an allocated order releases its stock.

pub mod actions;
pub mod channels;
pub mod config;
pub mod error;
pub mod gateway;
pub mod manager;
pub mod messages;

pub use actions::TransitionActions;
pub use config::ManagerConfig;
pub use error::SagaError;
pub use gateway::{InMemoryGateway, OutboundGateway};
pub use manager::BeerOrderManager;
pub use messages::{
    AllocateOrderRequest, AllocateOrderResult, AllocationFailureEvent, DeallocateOrderRequest,
    OutboundMessage, ValidateOrderRequest, ValidateOrderResult,
};
