//! Shared identifier types used across the beer order service.

mod types;

pub use types::{BeerId, CustomerId, OrderId, OrderLineId, Upc};
