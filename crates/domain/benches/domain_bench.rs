use common::{BeerId, CustomerId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{BeerOrder, NewOrderLine, OrderEvent, OrderRepository, OrderStateMachine, OrderStatus};
use order_store::InMemoryOrderStore;

fn make_order() -> BeerOrder {
    BeerOrder::new(
        CustomerId::new(),
        None,
        vec![
            NewOrderLine::new(BeerId::new(), "0631234200036", 6),
            NewOrderLine::new(BeerId::new(), "0631234300019", 12),
        ],
    )
    .unwrap()
}

fn bench_transition_lookup(c: &mut Criterion) {
    c.bench_function("domain/transition_lookup", |b| {
        b.iter(|| {
            let mut machine = OrderStateMachine::for_status(OrderStatus::New);
            machine.send_event(OrderEvent::ValidateOrder).unwrap();
        });
    });
}

fn bench_full_event_cycle(c: &mut Criterion) {
    c.bench_function("domain/full_event_cycle", |b| {
        b.iter(|| {
            let mut order = make_order();
            order.apply_event(OrderEvent::ValidateOrder).unwrap();
            order.apply_event(OrderEvent::ValidationPassed).unwrap();
            order.apply_event(OrderEvent::AllocateOrder).unwrap();
            order.apply_event(OrderEvent::AllocationSuccess).unwrap();
            order.apply_event(OrderEvent::BeerOrderPickedUp).unwrap();
        });
    });
}

fn bench_repository_roundtrip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/repository_roundtrip", |b| {
        b.iter(|| {
            rt.block_on(async {
                let repository = OrderRepository::new(InMemoryOrderStore::new());
                let order = make_order();
                repository.insert(&order).await.unwrap();

                let mut stored = repository.load(order.id()).await.unwrap().unwrap();
                stored.order.apply_event(OrderEvent::ValidateOrder).unwrap();
                repository
                    .save(&stored.order, stored.version)
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_transition_lookup,
    bench_full_event_cycle,
    bench_repository_roundtrip,
);
criterion_main!(benches);
