use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{DateTime, Duration, TimeZone, Utc};

use spicetrade_core::{Aggregate, Currency, EntityId, Money, Rate};
use spicetrade_dealers::DealerId;
use spicetrade_ledger::{CancelledOrders, reconcile_dealer_ledger};
use spicetrade_orders::{Order, OrderCommand, OrderId, OrderLine, PlaceOrder, ProductId};
use spicetrade_treasury::{Payment, PaymentCommand, PaymentId, PaymentMethod, RecordPayment};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
}

fn place_order(dealer_id: DealerId, total_cents: i64, placed_at: DateTime<Utc>) -> Order {
    let order_id = OrderId::new(EntityId::new());
    let mut order = Order::empty(order_id);
    let events = order
        .handle(&OrderCommand::PlaceOrder(PlaceOrder {
            order_id,
            dealer_id: Some(dealer_id),
            lines: vec![OrderLine {
                line_no: 1,
                product_id: ProductId::new(EntityId::new()),
                quantity: 1,
                unit_price: Money::from_cents(total_cents),
            }],
            discount: Rate::ZERO,
            taxes: Vec::new(),
            shipping: Money::ZERO,
            currency: Currency::Cad,
            occurred_at: placed_at,
        }))
        .unwrap();
    order.apply(&events[0]);
    order
}

fn record_payment(dealer_id: DealerId, cents: i64, received_at: DateTime<Utc>) -> Payment {
    let payment_id = PaymentId::new(EntityId::new());
    let mut payment = Payment::empty(payment_id);
    let events = payment
        .handle(&PaymentCommand::RecordPayment(RecordPayment {
            payment_id,
            dealer_id,
            amount: Money::from_cents(cents),
            method: PaymentMethod::BankTransfer,
            received_at,
            reference: None,
            occurred_at: received_at,
        }))
        .unwrap();
    payment.apply(&events[0]);
    payment
}

/// Reconciliation is recomputed on every account-page view, so the walk has
/// to stay cheap even for dealers with years of history.
fn bench_reconciliation(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_dealer_ledger");

    for size in [100usize, 1_000, 10_000] {
        let dealer_id = DealerId::new(EntityId::new());
        let orders: Vec<Order> = (0..size)
            .map(|i| place_order(dealer_id, 1_000 + (i as i64 % 500) * 10, day(i as i64 / 4)))
            .collect();
        let payments: Vec<Payment> = (0..size)
            .map(|i| record_payment(dealer_id, 950, day(i as i64 / 4 + 1)))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(reconcile_dealer_ledger(
                    black_box(&orders),
                    black_box(&payments),
                    &[],
                    CancelledOrders::Retain,
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconciliation);
criterion_main!(benches);
