//! Record validation
//!
//! Reports every issue found in a record instead of failing on the first
//! one. Used by the legacy import and by manual record entry.

use rust_decimal::Decimal;

use crate::db::DailyRecord;
use crate::metrics::MAX_AMOUNT;

/// A validation issue found in one input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Row number in the input (1-indexed for user display)
    pub row: usize,
    /// Field name that has the issue (e.g. "date", "ad_spend")
    pub field: String,
    /// The problematic value
    pub value: String,
    pub reason: String,
}

impl ValidationIssue {
    pub fn new(
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row,
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "row {}: {} '{}': {}",
            self.row, self.field, self.value, self.reason
        )
    }
}

/// Amount checks shared by every entry path: nothing may be negative or
/// above [`MAX_AMOUNT`]
pub fn amount_issues(row: usize, record: &DailyRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut check = |field: &str, value: Decimal, reason: &str| {
        if value < Decimal::ZERO {
            issues.push(ValidationIssue::new(row, field, value.to_string(), reason));
        } else if value > MAX_AMOUNT {
            issues.push(ValidationIssue::new(
                row,
                field,
                value.to_string(),
                format!("Amount exceeds the maximum of {}", MAX_AMOUNT),
            ));
        }
    };

    check("ad_spend", record.ad_spend, "Ad spend cannot be negative");
    check("revenue", record.revenue, "Revenue cannot be negative");
    if let Some(other) = record.other_costs {
        check("other_costs", other, "Other costs cannot be negative");
    }
    issues
}

/// Full check for a record entered by hand: date present and parseable,
/// amounts non-negative
pub fn record_issues(row: usize, record: &DailyRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if record.date.trim().is_empty() {
        issues.push(ValidationIssue::new(row, "date", "", "Date is required"));
    } else if let Err(e) = record.parsed_date() {
        issues.push(ValidationIssue::new(row, "date", &record.date, e.message));
    }
    issues.extend(amount_issues(row, record));
    issues
}
