// Reports module - period summaries and monthly aggregates over daily records

pub mod monthly;
pub mod summary;

pub use monthly::{group_by_month, MonthKey, MonthlyAggregate};
pub use summary::{summarize, PeriodSummary};

use chrono::NaiveDate;

use crate::db::DailyRecord;
use crate::error::InvalidRecords;

/// A record paired with its parsed calendar date
#[derive(Debug, Clone, Copy)]
pub struct DatedRecord<'a> {
    pub date: NaiveDate,
    pub record: &'a DailyRecord,
}

/// Parse every record date and sort ascending by date.
///
/// Records sharing a date keep their input order. All unparseable dates are
/// reported together.
pub fn dated_records(records: &[DailyRecord]) -> Result<Vec<DatedRecord<'_>>, InvalidRecords> {
    let mut dated = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for record in records {
        match record.parsed_date() {
            Ok(date) => dated.push(DatedRecord { date, record }),
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(InvalidRecords(errors));
    }

    dated.sort_by_key(|d| d.date);
    Ok(dated)
}

/// Earliest and latest date of a sorted collection, if any
pub fn date_bounds(dated: &[DatedRecord<'_>]) -> Option<(NaiveDate, NaiveDate)> {
    match (dated.first(), dated.last()) {
        (Some(first), Some(last)) => Some((first.date, last.date)),
        _ => None,
    }
}
