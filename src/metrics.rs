//! Money and rate arithmetic for daily records
//!
//! Pure functions turning (ad spend, revenue, other costs) into total costs,
//! tax, profit and profit rate. Nothing is rounded here; rounding belongs to
//! the formatting helpers in [`crate::utils`].

use rust_decimal::Decimal;

use crate::db::DailyRecord;

/// Flat levy applied to total costs (policy constant, 11%)
pub const TAX_RATE: Decimal = Decimal::from_parts(11, 0, 0, false, 2);

/// Largest amount accepted into the ledger (10^18 rupiah).
///
/// Sums over billions of records at this bound still fit in a `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_808_348_672, 232_830_643, 0, false, 0);

/// True when `value` lies in `0..=MAX_AMOUNT`
pub fn is_storable_amount(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= MAX_AMOUNT
}

/// Ad spend plus other costs; missing other costs count as zero
pub fn total_costs(ad_spend: Decimal, other_costs: Option<Decimal>) -> Decimal {
    ad_spend.saturating_add(other_costs.unwrap_or(Decimal::ZERO))
}

pub fn tax(total_costs: Decimal) -> Decimal {
    total_costs.saturating_mul(TAX_RATE)
}

/// Revenue minus total costs minus tax
pub fn profit(revenue: Decimal, ad_spend: Decimal, other_costs: Option<Decimal>) -> Decimal {
    let costs = total_costs(ad_spend, other_costs);
    profit_from_totals(costs, revenue)
}

/// Profit of an already-summed costs/revenue pair
pub fn profit_from_totals(costs: Decimal, revenue: Decimal) -> Decimal {
    revenue.saturating_sub(costs).saturating_sub(tax(costs))
}

/// Profit as a percentage of (total costs + tax).
///
/// Zero when nothing was spent, whatever the revenue.
pub fn profit_rate(revenue: Decimal, ad_spend: Decimal, other_costs: Option<Decimal>) -> Decimal {
    let costs = total_costs(ad_spend, other_costs);
    rate_from_totals(costs, revenue)
}

/// Profit rate derived from an already-summed costs/revenue pair.
///
/// Used for monthly groups and dashboard totals, where the rate is
/// recomputed from the sums instead of averaged.
pub fn rate_from_totals(costs: Decimal, revenue: Decimal) -> Decimal {
    let base = costs.saturating_add(tax(costs));
    if base.is_zero() {
        return Decimal::ZERO;
    }
    let profit = profit_from_totals(costs, revenue);
    profit
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if profit.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Derived figures for one record, recomputed on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedMetrics {
    pub total_costs: Decimal,
    pub tax: Decimal,
    pub profit: Decimal,
    pub profit_rate: Decimal,
}

impl DerivedMetrics {
    pub fn compute(ad_spend: Decimal, revenue: Decimal, other_costs: Option<Decimal>) -> Self {
        let costs = total_costs(ad_spend, other_costs);
        Self {
            total_costs: costs,
            tax: tax(costs),
            profit: profit(revenue, ad_spend, other_costs),
            profit_rate: profit_rate(revenue, ad_spend, other_costs),
        }
    }

    pub fn of(record: &DailyRecord) -> Self {
        Self::compute(record.ad_spend, record.revenue, record.other_costs)
    }
}
