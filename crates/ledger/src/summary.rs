//! Dealer-level summary figures.
//!
//! Pure reductions over the same order/payment/check lists the allocation
//! walk consumes; nothing here depends on the walk except `unpaid_amount`,
//! which reduces its output.

use chrono::{DateTime, Duration, Utc};

use spicetrade_core::Money;
use spicetrade_orders::Order;
use spicetrade_treasury::{Check, Payment};

use crate::allocation::OrderSettlement;

/// Trailing window for the weekly sales card.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Trailing window for the monthly sales card.
pub const MONTHLY_WINDOW_DAYS: i64 = 30;

/// Sum of totals over open orders (pending, confirmed, processing).
///
/// Shipped, delivered and cancelled orders are off the debt books no matter
/// what the allocation walk did with them.
pub fn total_debt(orders: &[Order]) -> Money {
    orders
        .iter()
        .filter(|o| o.status().is_open())
        .map(|o| o.total().clamp_non_negative())
        .sum()
}

/// Sum of all payment amounts plus all cleared-check amounts.
pub fn total_received(payments: &[Payment], checks: &[Check]) -> Money {
    let from_payments: Money = payments
        .iter()
        .map(|p| p.amount().clamp_non_negative())
        .sum();
    let from_checks: Money = checks
        .iter()
        .filter(|c| c.status().is_cleared())
        .map(|c| c.amount().clamp_non_negative())
        .sum();
    from_payments + from_checks
}

/// Sum of `total - paid` over unsettled orders.
pub fn unpaid_amount(settlements: &[OrderSettlement]) -> Money {
    settlements
        .iter()
        .filter(|s| !s.settled)
        .map(|s| s.outstanding())
        .sum()
}

/// Sum of order totals placed within the trailing `window_days` from `now`.
///
/// All orders count regardless of paid status; `now` is always supplied by
/// the caller so the reduction stays deterministic.
pub fn sales_in_window(orders: &[Order], now: DateTime<Utc>, window_days: i64) -> Money {
    let start = now - Duration::days(window_days);
    orders
        .iter()
        .filter(|o| o.placed_at() > start && o.placed_at() <= now)
        .map(|o| o.total().clamp_non_negative())
        .sum()
}

/// Weekly sales card figure.
pub fn weekly_sales(orders: &[Order], now: DateTime<Utc>) -> Money {
    sales_in_window(orders, now, WEEKLY_WINDOW_DAYS)
}

/// Monthly sales card figure.
pub fn monthly_sales(orders: &[Order], now: DateTime<Utc>) -> Money {
    sales_in_window(orders, now, MONTHLY_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bounced_check, cancelled, cleared_check, day, order, payment, with_status};
    use spicetrade_orders::OrderStatus;

    #[test]
    fn total_debt_counts_only_open_orders() {
        let orders = vec![
            order(10_000, day(1)),                                      // pending
            with_status(order(5_000, day(2)), OrderStatus::Confirmed),
            with_status(order(2_500, day(3)), OrderStatus::Processing),
            with_status(order(7_000, day(4)), OrderStatus::Shipped),
            with_status(order(9_000, day(5)), OrderStatus::Delivered),
            cancelled(order(20_000, day(6))),
        ];

        assert_eq!(total_debt(&orders), Money::from_cents(17_500));
    }

    #[test]
    fn cancelled_order_contributes_nothing_to_debt() {
        let orders = vec![cancelled(order(20_000, day(1)))];
        assert_eq!(total_debt(&orders), Money::ZERO);
    }

    #[test]
    fn total_received_includes_only_cleared_checks() {
        let payments = vec![payment(3_000, day(1)), payment(2_000, day(2))];
        let checks = vec![cleared_check(10_000, day(3)), bounced_check(50_000, day(4))];

        assert_eq!(total_received(&payments, &checks), Money::from_cents(15_000));
    }

    #[test]
    fn unpaid_amount_sums_outstanding_over_unsettled_orders() {
        let orders = vec![order(10_000, day(1)), order(5_000, day(2))];
        let credits = crate::credit_timeline(&[payment(12_000, day(2))], &[]);
        let settlements =
            crate::allocate(&orders, &credits, crate::CancelledOrders::Retain);

        assert_eq!(unpaid_amount(&settlements), Money::from_cents(3_000));
    }

    #[test]
    fn sales_windows_are_trailing_from_now() {
        let now = day(40);
        let orders = vec![
            order(1_000, day(40)),  // today
            order(2_000, day(35)),  // inside weekly
            order(4_000, day(20)),  // inside monthly only
            order(8_000, day(5)),   // outside both
        ];

        assert_eq!(weekly_sales(&orders, now), Money::from_cents(3_000));
        assert_eq!(monthly_sales(&orders, now), Money::from_cents(7_000));
    }

    #[test]
    fn empty_lists_reduce_to_zero() {
        assert_eq!(total_debt(&[]), Money::ZERO);
        assert_eq!(total_received(&[], &[]), Money::ZERO);
        assert_eq!(unpaid_amount(&[]), Money::ZERO);
        assert_eq!(weekly_sales(&[], day(0)), Money::ZERO);
    }
}
