//! Fixtures for the ledger test suites.
//!
//! Entities are rehydrated by applying events directly, the way snapshots
//! arrive from a store — which also lets tests fabricate malformed records
//! (e.g. a negative total) that command validation would reject.

use chrono::{DateTime, Duration, TimeZone, Utc};

use spicetrade_core::{Aggregate, Currency, EntityId, Money};
use spicetrade_dealers::DealerId;
use spicetrade_orders::{
    Order, OrderCancelled, OrderConfirmed, OrderDelivered, OrderEvent, OrderId, OrderLine,
    OrderPlaced, OrderProcessingStarted, OrderShipped, OrderStatus, PriceBreakdown, ProductId,
};
use spicetrade_treasury::{
    Check, CheckBounced, CheckCleared, CheckDeposited, CheckEvent, CheckId, CheckRegistered,
    Payment, PaymentEvent, PaymentId, PaymentMethod, PaymentRecorded,
};

/// A fixed calendar: `day(0)` is an arbitrary anchor, `day(n)` is n days on.
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::days(n)
}

pub fn dealer_id() -> DealerId {
    DealerId::new(EntityId::new())
}

/// A pending order with the given total, as a single one-unit line.
pub fn order(total_cents: i64, placed_at: DateTime<Utc>) -> Order {
    let order_id = OrderId::new(EntityId::new());
    let total = Money::from_cents(total_cents);
    let event = OrderEvent::OrderPlaced(OrderPlaced {
        order_id,
        dealer_id: Some(dealer_id()),
        lines: vec![OrderLine {
            line_no: 1,
            product_id: ProductId::new(EntityId::new()),
            quantity: 1,
            unit_price: total,
        }],
        pricing: PriceBreakdown {
            subtotal: total,
            discount: Money::ZERO,
            taxes: Vec::new(),
            shipping: Money::ZERO,
            total,
        },
        currency: Currency::Cad,
        occurred_at: placed_at,
    });

    let mut order = Order::empty(order_id);
    order.apply(&event);
    order
}

/// Advance an order to the given lifecycle status.
pub fn with_status(mut order: Order, status: OrderStatus) -> Order {
    let order_id = order.id_typed();
    let at = order.placed_at();
    let chain: &[OrderStatus] = match status {
        OrderStatus::Pending => &[],
        OrderStatus::Confirmed => &[OrderStatus::Confirmed],
        OrderStatus::Processing => &[OrderStatus::Confirmed, OrderStatus::Processing],
        OrderStatus::Shipped => &[
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ],
        OrderStatus::Delivered => &[
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ],
        OrderStatus::Cancelled => &[OrderStatus::Cancelled],
    };
    for step in chain {
        let event = match step {
            OrderStatus::Confirmed => OrderEvent::OrderConfirmed(OrderConfirmed {
                order_id,
                occurred_at: at,
            }),
            OrderStatus::Processing => {
                OrderEvent::OrderProcessingStarted(OrderProcessingStarted {
                    order_id,
                    occurred_at: at,
                })
            }
            OrderStatus::Shipped => OrderEvent::OrderShipped(OrderShipped {
                order_id,
                occurred_at: at,
            }),
            OrderStatus::Delivered => OrderEvent::OrderDelivered(OrderDelivered {
                order_id,
                occurred_at: at,
            }),
            OrderStatus::Cancelled => OrderEvent::OrderCancelled(OrderCancelled {
                order_id,
                reason: None,
                occurred_at: at,
            }),
            OrderStatus::Pending => unreachable!(),
        };
        order.apply(&event);
    }
    order
}

pub fn cancelled(order: Order) -> Order {
    with_status(order, OrderStatus::Cancelled)
}

pub fn payment(cents: i64, received_at: DateTime<Utc>) -> Payment {
    let payment_id = PaymentId::new(EntityId::new());
    let event = PaymentEvent::PaymentRecorded(PaymentRecorded {
        payment_id,
        dealer_id: dealer_id(),
        amount: Money::from_cents(cents),
        method: PaymentMethod::Cash,
        received_at,
        reference: None,
        occurred_at: received_at,
    });

    let mut payment = Payment::empty(payment_id);
    payment.apply(&event);
    payment
}

fn registered_check(cents: i64, due_on: DateTime<Utc>) -> Check {
    let check_id = CheckId::new(EntityId::new());
    let issued_on = due_on - Duration::days(15);
    let event = CheckEvent::CheckRegistered(CheckRegistered {
        check_id,
        dealer_id: dealer_id(),
        amount: Money::from_cents(cents),
        check_number: "000100".to_string(),
        bank: None,
        issued_on,
        due_on,
        notes: None,
        occurred_at: issued_on,
    });

    let mut check = Check::empty(check_id);
    check.apply(&event);
    check
}

pub fn pending_check(cents: i64, due_on: DateTime<Utc>) -> Check {
    registered_check(cents, due_on)
}

pub fn cleared_check(cents: i64, due_on: DateTime<Utc>) -> Check {
    let mut check = registered_check(cents, due_on);
    let check_id = check.id_typed();
    check.apply(&CheckEvent::CheckDeposited(CheckDeposited {
        check_id,
        occurred_at: due_on,
    }));
    check.apply(&CheckEvent::CheckCleared(CheckCleared {
        check_id,
        occurred_at: due_on,
    }));
    check
}

pub fn bounced_check(cents: i64, due_on: DateTime<Utc>) -> Check {
    let mut check = registered_check(cents, due_on);
    let check_id = check.id_typed();
    check.apply(&CheckEvent::CheckDeposited(CheckDeposited {
        check_id,
        occurred_at: due_on,
    }));
    check.apply(&CheckEvent::CheckBounced(CheckBounced {
        check_id,
        reason: None,
        occurred_at: due_on,
    }));
    check
}
