//! Order manager driving beer orders through their lifecycle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use common::{CustomerId, OrderId};
use domain::{
    BeerOrder, BeerOrderSnapshot, DomainError, NewOrderLine, OrderEvent, OrderRepository,
    StoredOrder,
};
use order_store::{OrderStore, OrderStoreError};
use tokio::sync::Mutex;

use crate::actions::TransitionActions;
use crate::config::ManagerConfig;
use crate::error::{Result, SagaError};
use crate::gateway::OutboundGateway;
use crate::messages::{AllocateOrderResult, ValidateOrderResult};

/// Orchestrates the beer order fulfillment saga.
///
/// Each incoming event runs as a unit of work: load the order, apply the
/// event to it, run the transition's action, then commit with a
/// compare-and-swap on the stored version. A version conflict restarts the
/// whole unit of work against fresh state. Events for the same order are
/// serialized through a per-order lock; different orders proceed in
/// parallel.
pub struct BeerOrderManager<S: OrderStore, G: OutboundGateway> {
    repository: OrderRepository<S>,
    actions: TransitionActions<G>,
    config: ManagerConfig,
    locks: StdMutex<HashMap<OrderId, Arc<Mutex<()>>>>,
}

impl<S: OrderStore, G: OutboundGateway> BeerOrderManager<S, G> {
    /// Creates a new manager over the given store and gateway.
    pub fn new(store: S, gateway: G, config: ManagerConfig) -> Self {
        Self {
            repository: OrderRepository::new(store),
            actions: TransitionActions::new(gateway),
            config,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Creates a new order and kicks off validation.
    ///
    /// The order is persisted at its initial status, then the validation
    /// request goes out as part of the first transition.
    #[tracing::instrument(skip(self, lines))]
    pub async fn new_beer_order(
        &self,
        customer_id: CustomerId,
        customer_ref: Option<String>,
        lines: Vec<NewOrderLine>,
    ) -> Result<BeerOrder> {
        let order = BeerOrder::new(customer_id, customer_ref, lines)
            .map_err(DomainError::from)?;
        let order_id = order.id();

        let lock = self.lock_handle(order_id);
        let _guard = lock.lock().await;

        self.repository.insert(&order).await?;
        metrics::counter!("beer_orders_created_total").increment(1);
        tracing::info!(%order_id, "beer order created");

        self.transition(order_id, OrderEvent::ValidateOrder, None)
            .await
    }

    /// Handles a validation verdict from the validation service.
    ///
    /// A passing verdict advances the order and immediately starts
    /// allocation; the order is re-read between the two transitions so the
    /// allocation request reflects the committed state. A failing verdict
    /// moves the order to its validation exception status.
    #[tracing::instrument(skip(self, result), fields(order_id = %result.order_id))]
    pub async fn process_validation_result(&self, result: ValidateOrderResult) -> Result<()> {
        let lock = self.lock_handle(result.order_id);
        let _guard = lock.lock().await;

        if result.is_valid {
            self.transition(result.order_id, OrderEvent::ValidationPassed, None)
                .await?;
            self.transition(result.order_id, OrderEvent::AllocateOrder, None)
                .await?;
        } else {
            self.transition(result.order_id, OrderEvent::ValidationFailed, None)
                .await?;
        }

        Ok(())
    }

    /// Handles an allocation outcome from the allocation service.
    ///
    /// An error outcome takes precedence over a pending-inventory outcome.
    /// Successful and partial allocations merge the service's per-line
    /// allocated quantities into the order in the same commit as the status
    /// change.
    #[tracing::instrument(skip(self, result), fields(order_id = %result.beer_order.id))]
    pub async fn process_allocation_result(&self, result: AllocateOrderResult) -> Result<()> {
        if result.allocation_error {
            self.allocation_failed(&result.beer_order).await
        } else if result.pending_inventory {
            self.allocation_pending_inventory(&result.beer_order).await
        } else {
            self.allocation_passed(&result.beer_order).await
        }
    }

    /// Records a full allocation, merging the allocated quantities.
    pub async fn allocation_passed(&self, snapshot: &BeerOrderSnapshot) -> Result<()> {
        let lock = self.lock_handle(snapshot.id);
        let _guard = lock.lock().await;

        self.transition(snapshot.id, OrderEvent::AllocationSuccess, Some(snapshot))
            .await?;
        Ok(())
    }

    /// Records a partial allocation, merging the quantities the service
    /// managed to allocate.
    pub async fn allocation_pending_inventory(&self, snapshot: &BeerOrderSnapshot) -> Result<()> {
        let lock = self.lock_handle(snapshot.id);
        let _guard = lock.lock().await;

        self.transition(snapshot.id, OrderEvent::AllocationNoInventory, Some(snapshot))
            .await?;
        Ok(())
    }

    /// Records a failed allocation.
    pub async fn allocation_failed(&self, snapshot: &BeerOrderSnapshot) -> Result<()> {
        let lock = self.lock_handle(snapshot.id);
        let _guard = lock.lock().await;

        self.transition(snapshot.id, OrderEvent::AllocationFailed, None)
            .await?;
        Ok(())
    }

    /// Marks an allocated order as picked up by the customer.
    #[tracing::instrument(skip(self))]
    pub async fn picked_up(&self, order_id: OrderId) -> Result<()> {
        let lock = self.lock_handle(order_id);
        let _guard = lock.lock().await;

        self.transition(order_id, OrderEvent::BeerOrderPickedUp, None)
            .await?;
        Ok(())
    }

    /// Cancels an order.
    ///
    /// Cancelling an allocated order also asks the allocation service to
    /// release the stock it holds.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<()> {
        let lock = self.lock_handle(order_id);
        let _guard = lock.lock().await;

        self.transition(order_id, OrderEvent::CancelOrder, None)
            .await?;
        metrics::counter!("beer_orders_cancelled_total").increment(1);
        Ok(())
    }

    /// Loads an order by id, with the version it was read at.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<StoredOrder>> {
        let stored = self.repository.load(order_id).await?;
        Ok(stored)
    }

    /// Runs one event as a unit of work, retrying on version conflicts.
    async fn transition(
        &self,
        order_id: OrderId,
        event: OrderEvent,
        allocations: Option<&BeerOrderSnapshot>,
    ) -> Result<BeerOrder> {
        let mut attempts: u32 = 0;
        let started = std::time::Instant::now();

        loop {
            let stored = self
                .repository
                .load(order_id)
                .await?
                .ok_or(SagaError::OrderNotFound(order_id))?;

            let mut order = stored.order;
            let source_status = order.status();
            let action = match order.apply_event(event) {
                Ok(action) => action,
                Err(e) => {
                    metrics::counter!("beer_order_events_rejected_total").increment(1);
                    tracing::warn!(%order_id, %event, status = %source_status, "event rejected");
                    return Err(DomainError::from(e).into());
                }
            };

            if let Some(snapshot) = allocations {
                order.update_allocated_quantities(snapshot);
            }

            if let Some(action) = action {
                self.actions.run(action, &order).await?;
            }

            match self.repository.save(&order, stored.version).await {
                Ok(_) => {
                    // Terminal orders accept no further events, so their
                    // lock entry can go. A late event recreates it and is
                    // then rejected against the stored status.
                    if order.is_terminal() {
                        self.locks.lock().unwrap().remove(&order_id);
                    }
                    metrics::counter!("beer_order_events_total").increment(1);
                    metrics::histogram!("beer_order_event_duration_seconds")
                        .record(started.elapsed().as_secs_f64());
                    tracing::info!(
                        %order_id,
                        %event,
                        from = %source_status,
                        to = %order.status(),
                        "order transitioned"
                    );
                    return Ok(order);
                }
                Err(DomainError::Store(OrderStoreError::VersionConflict { .. }))
                    if attempts < self.config.max_commit_retries =>
                {
                    attempts += 1;
                    metrics::counter!("beer_order_commit_conflicts_total").increment(1);
                    tracing::debug!(%order_id, %event, attempts, "version conflict, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Returns the lock guarding the given order, creating it on first use.
    fn lock_handle(&self, order_id: OrderId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(order_id).or_default().clone()
    }
}
