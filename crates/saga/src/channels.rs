//! Channel names shared with the validation and allocation services.
//!
//! Requests carry a full order snapshot so collaborators never need to read
//! order storage; responses are routed back on the matching response channel.

/// Validation requests to the order validation service.
pub const VALIDATE_ORDER_QUEUE: &str = "validate-order";

/// Validation verdicts coming back from the order validation service.
pub const VALIDATE_ORDER_RESPONSE_QUEUE: &str = "validate-order-response";

/// Allocation requests to the inventory allocation service.
pub const ALLOCATE_ORDER_QUEUE: &str = "allocate-order";

/// Allocation outcomes coming back from the inventory allocation service.
pub const ALLOCATE_ORDER_RESPONSE_QUEUE: &str = "allocate-order-response";

/// Allocation failure notifications for downstream consumers.
pub const ALLOCATE_FAILURE_QUEUE: &str = "allocation-failure";

/// Deallocation requests to the inventory allocation service.
pub const DEALLOCATE_ORDER_QUEUE: &str = "deallocate-order";
