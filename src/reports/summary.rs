use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::DailyRecord;
use crate::metrics::{self, DerivedMetrics};

/// Totals over an arbitrary record collection.
///
/// `average_profit_rate` is the plain mean of the per-record profit rates,
/// unlike [`super::MonthlyAggregate::profit_rate`], which is recomputed from
/// the month's sums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub total_costs: Decimal,
    pub total_tax: Decimal,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub average_profit_rate: Decimal,
    pub record_count: usize,
}

impl PeriodSummary {
    /// Profit rate recomputed from the period totals (the dashboard figure)
    pub fn blended_profit_rate(&self) -> Decimal {
        metrics::rate_from_totals(self.total_costs, self.total_revenue)
    }
}

/// Fold records into running totals and the mean per-record profit rate.
///
/// Dates are never read, so this cannot fail. An empty input yields all zeros.
pub fn summarize(records: &[DailyRecord]) -> PeriodSummary {
    let mut summary = PeriodSummary::default();
    let mut rate_sum = Decimal::ZERO;

    for record in records {
        let m = DerivedMetrics::of(record);
        summary.total_costs = summary.total_costs.saturating_add(m.total_costs);
        summary.total_tax = summary.total_tax.saturating_add(m.tax);
        summary.total_revenue = summary.total_revenue.saturating_add(record.revenue);
        summary.total_profit = summary.total_profit.saturating_add(m.profit);
        rate_sum = rate_sum.saturating_add(m.profit_rate);
        summary.record_count += 1;
    }

    if summary.record_count > 0 {
        summary.average_profit_rate = rate_sum / Decimal::from(summary.record_count as u64);
    }

    summary
}
