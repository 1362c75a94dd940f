use std::collections::{BTreeMap, BTreeSet};

use anyhow::anyhow;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::{
    dto::sales::{CreateSaleRequest, DailySummary, PaymentMethodTotals},
    error::{AppError, AppResult},
    models::SaleDetail,
    pricing::{SaleLine, price_sale, validate_lines},
    repository::NewSale,
    state::AppState,
};

pub async fn create_sale(state: &AppState, payload: CreateSaleRequest) -> AppResult<SaleDetail> {
    let items = match payload.items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AppError::bad_request("items are required")),
    };
    let payment_method_id = payload
        .payment_method_id
        .ok_or_else(|| AppError::bad_request("payment method is required"))?;

    let lines: Vec<SaleLine> = items
        .into_iter()
        .map(|item| SaleLine {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.price,
        })
        .collect();
    validate_lines(&lines)?;

    let method = state
        .payments
        .find(payment_method_id)
        .await?
        .ok_or_else(|| AppError::not_found("payment method not found"))?;

    let wanted: BTreeSet<i32> = lines.iter().map(|l| l.product_id).collect();
    let ids: Vec<i32> = wanted.iter().copied().collect();
    let found: BTreeSet<i32> = state
        .products
        .find_many(&ids)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    if let Some(missing) = wanted.difference(&found).next() {
        return Err(AppError::not_found(format!("product {missing} not found")));
    }

    let priced = price_sale(&lines, method.tax_rate)?;
    let detail = state
        .sales
        .create(NewSale {
            payment_method_id: method.id,
            totals: priced.totals,
            lines: priced.lines,
        })
        .await?;

    tracing::info!(
        sale_id = detail.sale.id,
        payment_method = %method.name,
        gross = %detail.sale.total_gross,
        tax = %detail.sale.total_tax,
        net = %detail.sale.total_net,
        "sale recorded"
    );
    Ok(detail)
}

/// Sales of the current day in the server's local time zone.
pub async fn list_today(state: &AppState) -> AppResult<Vec<SaleDetail>> {
    list_for_day(state, &Local, Local::now().date_naive()).await
}

pub async fn list_for_day<Tz: TimeZone>(
    state: &AppState,
    tz: &Tz,
    date: NaiveDate,
) -> AppResult<Vec<SaleDetail>> {
    let (from, until) = day_window(tz, date)
        .ok_or_else(|| AppError::bad_request(format!("date {date} is out of range")))?;
    Ok(state.sales.list_between(from, until).await?)
}

pub async fn summary_today(state: &AppState) -> AppResult<DailySummary> {
    let today = Local::now().date_naive();
    let sales = list_for_day(state, &Local, today).await?;
    summarize(today, &sales)
}

/// `[midnight, next midnight)` of `date` in `tz`, as UTC instants.
pub fn day_window<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date.succ_opt()?;
    Some((start_of_day(tz, date), start_of_day(tz, next)))
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start.with_timezone(&Utc);
    }
    // Midnight skipped by a DST jump: the day starts one hour later.
    tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

fn add(total: Decimal, amount: Decimal) -> AppResult<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| AppError::Internal(anyhow!("daily totals overflowed at {total} + {amount}")))
}

/// Totals over `sales`; fails when a sum no longer fits in a `Decimal`.
pub fn summarize(date: NaiveDate, sales: &[SaleDetail]) -> AppResult<DailySummary> {
    let mut summary = DailySummary {
        date,
        sale_count: 0,
        items_sold: 0,
        total_gross: Decimal::ZERO,
        total_tax: Decimal::ZERO,
        total_net: Decimal::ZERO,
        by_payment_method: Vec::new(),
    };
    let mut per_method: BTreeMap<(String, i32), PaymentMethodTotals> = BTreeMap::new();

    for detail in sales {
        let sale = &detail.sale;
        summary.sale_count += 1;
        summary.items_sold += detail
            .items
            .iter()
            .map(|i| i64::from(i.item.quantity))
            .sum::<i64>();
        summary.total_gross = add(summary.total_gross, sale.total_gross)?;
        summary.total_tax = add(summary.total_tax, sale.total_tax)?;
        summary.total_net = add(summary.total_net, sale.total_net)?;

        let method = &detail.payment_method;
        let entry = per_method
            .entry((method.name.clone(), method.id))
            .or_insert_with(|| PaymentMethodTotals {
                payment_method_id: method.id,
                name: method.name.clone(),
                sale_count: 0,
                total_gross: Decimal::ZERO,
                total_net: Decimal::ZERO,
            });
        entry.sale_count += 1;
        entry.total_gross = add(entry.total_gross, sale.total_gross)?;
        entry.total_net = add(entry.total_net, sale.total_net)?;
    }

    summary.by_payment_method = per_method.into_values().collect();
    Ok(summary)
}
