//! Dealer ledger reconciliation.
//!
//! Given one dealer's orders (debits) and payments plus cleared checks
//! (credits), derive which orders are paid, partially paid or unpaid and the
//! account-level figures the back office shows — without ever storing an
//! allocation table. Everything is recomputed from the two flat lists on
//! every read, so results stay stable as records are inserted out of order.
//!
//! Pure deterministic domain logic: no IO, no locks, no clock access.

pub mod allocation;
pub mod credit;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use spicetrade_core::Money;
use spicetrade_orders::{Order, OrderId};
use spicetrade_treasury::{Check, Payment};

pub use allocation::{CancelledOrders, OrderSettlement, allocate};
pub use credit::{CreditEvent, credit_timeline};
pub use summary::{
    MONTHLY_WINDOW_DAYS, WEEKLY_WINDOW_DAYS, monthly_sales, sales_in_window, total_debt,
    total_received, unpaid_amount, weekly_sales,
};

/// The reconciled view of one dealer's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerLedgerView {
    /// Per-order settlement, keyed by order id.
    pub settlements: HashMap<OrderId, OrderSettlement>,
    /// Sum of totals over open (pending/confirmed/processing) orders.
    pub total_debt: Money,
    /// Sum of payments and cleared checks.
    pub total_received: Money,
    /// `total_debt - total_received`; positive means the dealer owes money.
    pub balance: Money,
    /// Sum of `total - paid` over unsettled orders.
    pub unpaid_amount: Money,
}

/// Reconcile one dealer's ledger from entity snapshots.
///
/// Total function: empty inputs produce an empty, zeroed view. The caller
/// supplies lists fetched from the same store at roughly the same time;
/// transient staleness self-corrects on the next recomputation.
#[tracing::instrument(skip_all, fields(
    orders = orders.len(),
    payments = payments.len(),
    checks = checks.len(),
))]
pub fn reconcile_dealer_ledger(
    orders: &[Order],
    payments: &[Payment],
    checks: &[Check],
    policy: CancelledOrders,
) -> DealerLedgerView {
    let credits = credit_timeline(payments, checks);
    let settlements = allocate(orders, &credits, policy);

    let total_debt = summary::total_debt(orders);
    let total_received = summary::total_received(payments, checks);
    let balance = total_debt - total_received;
    let unpaid_amount = summary::unpaid_amount(&settlements);

    tracing::debug!(
        total_debt = total_debt.cents(),
        total_received = total_received.cents(),
        balance = balance.cents(),
        unpaid = unpaid_amount.cents(),
        "dealer ledger reconciled"
    );

    DealerLedgerView {
        settlements: settlements.into_iter().map(|s| (s.order_id, s)).collect(),
        total_debt,
        total_received,
        balance,
        unpaid_amount,
    }
}
