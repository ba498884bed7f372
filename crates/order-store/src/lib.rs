//! Durable keyed storage for order aggregates.
//!
//! Each order is stored as a single versioned record. Writers commit with
//! a compare-and-swap on the record version, so two callers racing on the
//! same order cannot silently overwrite each other: the loser gets a
//! [`OrderStoreError::VersionConflict`] and must re-run its whole
//! read-modify-write cycle.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::OrderId;
pub use error::{OrderStoreError, Result};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use record::{OrderRecord, Version};
pub use store::OrderStore;
