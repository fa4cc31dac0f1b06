use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::dated_records;
use crate::db::DailyRecord;
use crate::error::InvalidRecords;
use crate::metrics;

/// Calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Localized label, e.g. "Januari 2024"
    pub fn label(&self) -> String {
        crate::utils::month_label(self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Totals for one calendar month.
///
/// `tax`, `profit` and `profit_rate` are derived from the summed `costs` and
/// `revenue`, not averaged over the month's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    pub key: MonthKey,
    pub costs: Decimal,
    pub tax: Decimal,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub profit_rate: Decimal,
    pub transactions: usize,
}

#[derive(Default)]
struct MonthBucket {
    costs: Decimal,
    revenue: Decimal,
    transactions: usize,
}

/// Group records by calendar month, most recent month first.
pub fn group_by_month(records: &[DailyRecord]) -> Result<Vec<MonthlyAggregate>, InvalidRecords> {
    let dated = dated_records(records)?;

    let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
    for entry in &dated {
        let bucket = buckets.entry(MonthKey::of(entry.date)).or_default();
        bucket.costs = bucket
            .costs
            .saturating_add(metrics::total_costs(entry.record.ad_spend, entry.record.other_costs));
        bucket.revenue = bucket.revenue.saturating_add(entry.record.revenue);
        bucket.transactions += 1;
    }

    Ok(buckets
        .into_iter()
        .rev()
        .map(|(key, bucket)| {
            let tax = metrics::tax(bucket.costs);
            MonthlyAggregate {
                key,
                costs: bucket.costs,
                tax,
                revenue: bucket.revenue,
                profit: metrics::profit_from_totals(bucket.costs, bucket.revenue),
                profit_rate: metrics::rate_from_totals(bucket.costs, bucket.revenue),
                transactions: bucket.transactions,
            }
        })
        .collect())
}
