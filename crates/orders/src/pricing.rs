//! Order pricing: subtotal, percentage discount, jurisdiction taxes, total.
//!
//! Checkout and admin-created dealer sales both price through this module,
//! so the rounding policy cannot diverge between the two flows. Amounts are
//! integer cents end to end; each tax is rounded half-up once, at the cent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use spicetrade_core::{Money, Rate};

use crate::order::OrderLine;

/// Pricing input validation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A line quantity was zero or negative.
    #[error("line {line_no}: quantity must be a positive integer, got {quantity}")]
    InvalidQuantity { line_no: u32, quantity: i64 },

    /// The discount percentage was outside [0, 100].
    ///
    /// Negative tax rates are unrepresentable: `Rate` construction already
    /// rejects them.
    #[error("discount rate {rate} is outside the allowed 0-100% range")]
    InvalidPercentage { rate: Rate },

    /// Line amounts overflowed the money representation.
    #[error("order amount overflow")]
    AmountOverflow,
}

/// A named jurisdiction tax rate (e.g. a federal GST and a provincial PST).
///
/// Modeled as an ordered list rather than two hardcoded fields so storefronts
/// outside a two-tax jurisdiction price the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    pub name: String,
    pub rate: Rate,
}

/// One computed tax amount, paired with the jurisdiction name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCharge {
    pub name: String,
    pub amount: Money,
}

/// The full pricing breakdown of an order.
///
/// Invariant: `total = subtotal - discount + Σ taxes + shipping`. Computed
/// once when the order is placed and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub discount: Money,
    pub taxes: Vec<TaxCharge>,
    pub shipping: Money,
    pub total: Money,
}

impl PriceBreakdown {
    pub fn tax_total(&self) -> Money {
        self.taxes.iter().map(|t| t.amount).sum()
    }

    /// An empty, all-zero breakdown (rehydration placeholder).
    pub fn zero() -> Self {
        Self {
            subtotal: Money::ZERO,
            discount: Money::ZERO,
            taxes: Vec::new(),
            shipping: Money::ZERO,
            total: Money::ZERO,
        }
    }
}

/// Price a set of order lines.
///
/// - `subtotal = Σ unit_price × quantity` (quantities must be positive);
/// - `discount` applies to the subtotal, `discount ∈ [0%, 100%]`;
/// - each tax applies to the discounted base, rounded half-up at the cent;
/// - `total = base + Σ taxes + shipping`.
pub fn price_order(
    lines: &[OrderLine],
    discount: Rate,
    taxes: &[TaxRate],
    shipping: Money,
) -> Result<PriceBreakdown, PricingError> {
    if discount > Rate::ONE_HUNDRED_PERCENT {
        return Err(PricingError::InvalidPercentage { rate: discount });
    }

    let mut subtotal = Money::ZERO;
    for line in lines {
        if line.quantity <= 0 {
            return Err(PricingError::InvalidQuantity {
                line_no: line.line_no,
                quantity: line.quantity,
            });
        }
        let line_total = line
            .unit_price
            .checked_mul(line.quantity)
            .ok_or(PricingError::AmountOverflow)?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(PricingError::AmountOverflow)?;
    }

    let discount_amount = subtotal.apply_rate(discount);
    let taxable = subtotal - discount_amount;

    let taxes: Vec<TaxCharge> = taxes
        .iter()
        .map(|t| TaxCharge {
            name: t.name.clone(),
            amount: taxable.apply_rate(t.rate),
        })
        .collect();
    let tax_total: Money = taxes.iter().map(|t| t.amount).sum();

    let total = taxable
        .checked_add(tax_total)
        .and_then(|m| m.checked_add(shipping))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(PriceBreakdown {
        subtotal,
        discount: discount_amount,
        taxes,
        shipping,
        total,
    })
}
