use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Advertising account (one ad account / campaign owner)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            created_at: Utc::now(),
        }
    }
}

/// One day's ad spend and revenue for one account.
///
/// `date` is kept as the raw ISO-8601 string the store holds; the report
/// layer parses it and reports a [`DataError`] when it cannot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyRecord {
    pub id: Option<i64>,
    pub account_id: i64,
    pub date: String,
    pub ad_spend: Decimal,
    pub revenue: Decimal,
    pub other_costs: Option<Decimal>,
    pub notes: Option<String>,
}

impl DailyRecord {
    pub fn new(
        account_id: i64,
        date: NaiveDate,
        ad_spend: Decimal,
        revenue: Decimal,
        other_costs: Option<Decimal>,
    ) -> Self {
        Self {
            id: None,
            account_id,
            date: date.format("%Y-%m-%d").to_string(),
            ad_spend,
            revenue,
            other_costs,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Other costs with the missing value treated as zero
    pub fn other_costs_or_zero(&self) -> Decimal {
        self.other_costs.unwrap_or(Decimal::ZERO)
    }

    /// Parse the calendar date of this record.
    ///
    /// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp (the
    /// day is taken in the timestamp's own offset).
    pub fn parsed_date(&self) -> Result<NaiveDate, DataError> {
        let raw = self.date.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.date_naive());
        }
        Err(DataError::new(
            self.id,
            "date",
            format!("'{}' is not an ISO-8601 date", self.date),
        ))
    }
}
