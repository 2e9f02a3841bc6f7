//! FIFO allocation: apply incoming credit to the oldest outstanding debit.

use serde::{Deserialize, Serialize};

use spicetrade_core::Money;
use spicetrade_orders::{Order, OrderId, OrderStatus};

use crate::credit::CreditEvent;

/// How cancelled orders participate in the FIFO walk.
///
/// Being part of the chronological sequence is a separate question from
/// counting as owed money: the debt aggregator excludes cancelled orders
/// regardless of this policy. The upstream system never pinned down whether
/// credit should skip over a cancelled order, so the walk takes it as
/// configuration instead of guessing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelledOrders {
    /// Keep cancelled orders in the sequence; they occupy a slot and absorb
    /// credit (historical behavior).
    #[default]
    Retain,
    /// Drop cancelled orders from the walk so credit skips over them.
    Skip,
}

/// Per-order outcome of the allocation walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSettlement {
    pub order_id: OrderId,
    pub total: Money,
    pub paid: Money,
    /// True once every order up to and including this one is fully covered
    /// by the credit received so far.
    pub settled: bool,
}

impl OrderSettlement {
    pub fn outstanding(&self) -> Money {
        self.total.saturating_sub(self.paid)
    }
}

/// Walk the dealer's orders chronologically and allocate the credit stream.
///
/// A credit can only satisfy orders placed on or before its own date — money
/// received today cannot pre-pay an order that does not exist yet — and
/// within that constraint it always fills the oldest outstanding order
/// first. Output preserves the walked (chronological) order.
///
/// Total function: any combination of order and credit lists is accepted,
/// including empty ones. Malformed order totals are clamped to zero rather
/// than propagated.
pub fn allocate(
    orders: &[Order],
    credits: &[CreditEvent],
    policy: CancelledOrders,
) -> Vec<OrderSettlement> {
    let mut sequence: Vec<&Order> = orders
        .iter()
        .filter(|o| policy == CancelledOrders::Retain || o.status() != OrderStatus::Cancelled)
        .collect();
    // Stable: orders placed at the same instant keep input order.
    sequence.sort_by_key(|o| o.placed_at());

    let totals: Vec<Money> = sequence
        .iter()
        .map(|o| o.total().clamp_non_negative())
        .collect();
    let mut paid: Vec<Money> = vec![Money::ZERO; sequence.len()];

    let mut stream = credits.to_vec();
    stream.sort_by_key(|c| c.occurred_on);

    // `cursor` is the oldest order not yet fully covered. Eligibility is
    // monotone (both streams ascend), so it never moves backwards; a
    // credit's leftover beyond the eligible orders is surplus and shows up
    // in the balance, not in any allocation.
    let mut cursor = 0usize;
    for credit in &stream {
        let mut remaining = credit.amount.clamp_non_negative();
        while cursor < sequence.len() && sequence[cursor].placed_at() <= credit.occurred_on {
            let gap = totals[cursor].saturating_sub(paid[cursor]);
            if gap <= remaining {
                paid[cursor] = totals[cursor];
                remaining -= gap;
                cursor += 1;
            } else {
                paid[cursor] += remaining;
                break;
            }
        }
    }

    let mut all_covered = true;
    sequence
        .iter()
        .zip(totals.iter().zip(paid.iter()))
        .map(|(order, (&total, &paid))| {
            all_covered = all_covered && paid == total;
            OrderSettlement {
                order_id: order.id_typed(),
                total,
                paid,
                settled: all_covered,
            }
        })
        .collect()
}
