//! Checkout arithmetic. Amounts are integer paise; two-decimal rupee strings
//! are produced only for display.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    cart::Cart,
    catalog::{self, Category},
};

/// Flat delivery charge per order (₹40).
pub const DELIVERY_CHARGE: i64 = 40_00;
/// Goods and services tax applied to the subtotal.
pub const GST_PERCENT: i64 = 18;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PricedLine {
    pub item_id: u32,
    pub name: String,
    pub unit: String,
    pub image: String,
    pub category: Category,
    pub unit_price: i64,
    pub quantity: u32,
    pub line_total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderSummary {
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub tax: i64,
    pub total: i64,
    pub display: SummaryDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SummaryDisplay {
    pub subtotal: String,
    pub delivery_fee: String,
    pub tax: String,
    pub total: String,
}

/// GST on `subtotal`, rounded half-up to the paisa.
pub fn gst(subtotal: i64) -> i64 {
    (subtotal * GST_PERCENT + 50).div_euclid(100)
}

/// Totals for `(unit_price, quantity)` pairs; `None` when there is nothing to bill.
pub fn summarize<I>(lines: I) -> Option<OrderSummary>
where
    I: IntoIterator<Item = (i64, u32)>,
{
    let mut any = false;
    let subtotal = lines
        .into_iter()
        .inspect(|_| any = true)
        .map(|(price, quantity)| price * i64::from(quantity))
        .sum::<i64>();
    if !any {
        return None;
    }

    let tax = gst(subtotal);
    let total = subtotal + DELIVERY_CHARGE + tax;
    Some(OrderSummary {
        subtotal,
        delivery_fee: DELIVERY_CHARGE,
        tax,
        total,
        display: SummaryDisplay {
            subtotal: format_inr(subtotal),
            delivery_fee: format_inr(DELIVERY_CHARGE),
            tax: format_inr(tax),
            total: format_inr(total),
        },
    })
}

/// Joins cart lines with catalog data. Lines for unknown items are skipped.
pub fn price_lines(cart: &Cart) -> Vec<PricedLine> {
    cart.lines()
        .iter()
        .filter_map(|line| {
            let product = catalog::find(line.item_id)?;
            Some(PricedLine {
                item_id: line.item_id,
                name: product.name.clone(),
                unit: product.unit.clone(),
                image: product.image.clone(),
                category: product.category,
                unit_price: product.price,
                quantity: line.quantity,
                line_total: product.price * i64::from(line.quantity),
            })
        })
        .collect()
}

pub fn summarize_cart(cart: &Cart) -> Option<OrderSummary> {
    summarize(price_lines(cart).iter().map(|l| (l.unit_price, l.quantity)))
}

/// Formats paise as rupees with two decimals, e.g. `32674` -> `₹326.74`.
pub fn format_inr(paise: i64) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let abs = paise.unsigned_abs();
    format!("{sign}₹{}.{:02}", abs / 100, abs % 100)
}
