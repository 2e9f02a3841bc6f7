//! Credit timeline: one time-ordered stream from payments and cleared checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spicetrade_core::Money;
use spicetrade_treasury::{Check, Payment};

/// A single credit on the dealer's timeline.
///
/// Derived, never persisted: payments project their received date, cleared
/// checks project their due date (the date the money is good).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditEvent {
    pub occurred_on: DateTime<Utc>,
    pub amount: Money,
}

/// Merge payments and cleared checks into one ascending credit timeline.
///
/// Ties are broken by stable input order — payments before checks at equal
/// timestamps, then original list order — so repeated reconciliations walk
/// an identical stream. Checks that are not `Cleared` are silently excluded;
/// negative amounts are clamped to zero rather than propagated (this feeds a
/// read-only summary, not a system of record).
pub fn credit_timeline(payments: &[Payment], checks: &[Check]) -> Vec<CreditEvent> {
    let mut timeline: Vec<CreditEvent> = Vec::with_capacity(payments.len() + checks.len());

    for payment in payments {
        timeline.push(CreditEvent {
            occurred_on: payment.received_at(),
            amount: payment.amount().clamp_non_negative(),
        });
    }
    for check in checks {
        if !check.status().is_cleared() {
            continue;
        }
        timeline.push(CreditEvent {
            occurred_on: check.due_on(),
            amount: check.amount().clamp_non_negative(),
        });
    }

    // Stable sort: equal dates keep push order.
    timeline.sort_by_key(|c| c.occurred_on);
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cleared_check, payment, pending_check};
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn merges_sorted_by_date() {
        let payments = vec![payment(300, day(5)), payment(100, day(1))];
        let checks = vec![cleared_check(200, day(3))];

        let timeline = credit_timeline(&payments, &checks);

        let amounts: Vec<i64> = timeline.iter().map(|c| c.amount.cents()).collect();
        assert_eq!(amounts, vec![100, 200, 300]);
        assert!(timeline.windows(2).all(|w| w[0].occurred_on <= w[1].occurred_on));
    }

    #[test]
    fn payments_come_before_checks_at_equal_timestamps() {
        let payments = vec![payment(1, day(2)), payment(2, day(2))];
        let checks = vec![cleared_check(3, day(2)), cleared_check(4, day(2))];

        let timeline = credit_timeline(&payments, &checks);

        let amounts: Vec<i64> = timeline.iter().map(|c| c.amount.cents()).collect();
        assert_eq!(amounts, vec![1, 2, 3, 4]);
    }

    #[test]
    fn uncleared_checks_are_silently_excluded() {
        let checks = vec![pending_check(500, day(1)), cleared_check(200, day(2))];

        let timeline = credit_timeline(&[], &checks);

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].amount.cents(), 200);
    }

    #[test]
    fn empty_inputs_yield_empty_timeline() {
        assert!(credit_timeline(&[], &[]).is_empty());
    }
}
