//! Quotation models and totals arithmetic

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sales quotation issued to a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub id: Uuid,
    pub date: NaiveDate,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub customer_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item on a quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotedProduct {
    pub id: Uuid,
    pub quotation_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

/// VAT rate applied to quotations (15%)
pub fn vat_rate() -> Decimal {
    Decimal::new(15, 2)
}

/// Line subtotal: quantity × unit price
pub fn line_subtotal(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Computed money fields for a quotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute subtotal, VAT and total over `(quantity, unit_price)` lines
///
/// The tax amount is rounded to 2 decimal places; the total is the sum of
/// the unrounded subtotal and the rounded tax.
pub fn quotation_totals(lines: &[(i32, Decimal)]) -> QuotationTotals {
    let subtotal: Decimal = lines
        .iter()
        .map(|(quantity, unit_price)| line_subtotal(*quantity, *unit_price))
        .sum();
    let tax = (subtotal * vat_rate()).round_dp(2);
    let total = subtotal + tax;

    QuotationTotals {
        subtotal,
        tax,
        total,
    }
}
