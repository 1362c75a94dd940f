//! Sale total calculation.
//!
//! Line subtotals are summed at full precision and the payment method's
//! tax rate is applied once to the gross total. Nothing is rounded here.

use rust_decimal::Decimal;
use thiserror::Error;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("sale must contain at least one item")]
    EmptySale,

    #[error("item {index} has invalid quantity {quantity}")]
    InvalidQuantity { index: usize, quantity: i32 },

    #[error("item {index} has a negative price")]
    NegativePrice { index: usize },

    #[error("tax rate must be between 0 and 100")]
    InvalidTaxRate,

    #[error("sale total is out of range")]
    Overflow,
}

/// One requested sale line.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTotals {
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedSale {
    pub lines: Vec<PricedLine>,
    pub totals: SaleTotals,
}

pub fn validate_tax_rate(tax_rate: Decimal) -> Result<(), PricingError> {
    if tax_rate < Decimal::ZERO || tax_rate > ONE_HUNDRED {
        return Err(PricingError::InvalidTaxRate);
    }
    Ok(())
}

pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Result<Decimal, PricingError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Applies `tax_rate` (a percentage) to an already summed gross total.
pub fn apply_tax(gross: Decimal, tax_rate: Decimal) -> Result<SaleTotals, PricingError> {
    validate_tax_rate(tax_rate)?;
    let tax = gross
        .checked_mul(tax_rate)
        .and_then(|v| v.checked_div(ONE_HUNDRED))
        .ok_or(PricingError::Overflow)?;
    let net = gross.checked_sub(tax).ok_or(PricingError::Overflow)?;
    Ok(SaleTotals { gross, tax, net })
}

/// Checks the line preconditions without computing anything.
pub fn validate_lines(lines: &[SaleLine]) -> Result<(), PricingError> {
    if lines.is_empty() {
        return Err(PricingError::EmptySale);
    }
    for (index, line) in lines.iter().enumerate() {
        if line.quantity <= 0 {
            return Err(PricingError::InvalidQuantity {
                index,
                quantity: line.quantity,
            });
        }
        if line.unit_price < Decimal::ZERO {
            return Err(PricingError::NegativePrice { index });
        }
    }
    Ok(())
}

pub fn price_sale(lines: &[SaleLine], tax_rate: Decimal) -> Result<PricedSale, PricingError> {
    validate_lines(lines)?;
    validate_tax_rate(tax_rate)?;

    let mut priced = Vec::with_capacity(lines.len());
    let mut gross = Decimal::ZERO;
    for line in lines {
        let subtotal = line_subtotal(line.unit_price, line.quantity)?;
        gross = gross.checked_add(subtotal).ok_or(PricingError::Overflow)?;
        priced.push(PricedLine {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal,
        });
    }

    let totals = apply_tax(gross, tax_rate)?;
    Ok(PricedSale {
        lines: priced,
        totals,
    })
}
