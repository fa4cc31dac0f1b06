//! Utility functions for formatting and parsing
//!
//! Centralized Indonesian-locale formatting of rupiah amounts, percentages
//! and dates, plus parsing of amounts typed in the same notation.

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "Rp " prefix (Indonesian rupiah)
    IDR,
    /// No currency symbol (for table cells, report values)
    None,
}

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Shown instead of a date range when there are no records
pub const NO_DATA: &str = "Tidak ada data";

/// Core formatting function with full control over output.
///
/// Formats a Decimal value using Indonesian locale conventions:
/// - Thousands separator: `.` (period)
/// - Decimal separator: `,` (comma)
/// - Two decimals, rounded half away from zero
///
/// # Examples
/// ```
/// use adledger::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.56), 0, CurrencySymbol::IDR),
///     "Rp 1.234,56"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 15, CurrencySymbol::None),
///     "       1.234,00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    // Round half away from zero to 2 decimal places, then format
    let rounded = abs_value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{:.2}", rounded);
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    // Add thousands separators (.) to integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec!['.', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    // A value that rounds to zero is shown unsigned
    let sign = if is_negative && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    let prefix = match symbol {
        CurrencySymbol::IDR => "Rp ",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{},{}", sign, prefix, with_separators, decimal_part);

    // Apply width padding (right-align)
    if width > 0 && result.chars().count() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format as rupiah with symbol: "Rp 1.234,56"
///
/// # Examples
/// ```
/// use adledger::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "Rp 1.234,56");
/// assert_eq!(format_currency(dec!(-500)), "-Rp 500,00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::IDR)
}

/// Format as rupiah, right-aligned to specified width.
pub fn format_currency_aligned(value: Decimal, width: usize) -> String {
    format_currency_with_width(value, width, CurrencySymbol::IDR)
}

/// Format number only (no symbol): "1.234,56"
///
/// # Examples
/// ```
/// use adledger::utils::format_number;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_number(dec!(1234.56)), "1.234,56");
/// ```
pub fn format_number(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::None)
}

/// Format a percentage value (28.71 means 28.71%): "28,71%"
pub fn format_percentage(percent: Decimal) -> String {
    format!("{}%", format_number(percent))
}

/// Long Indonesian date: "5 Januari 2024"
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// Month and year: "Januari 2024"
pub fn month_label(year: i32, month: u32) -> String {
    let name = month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?");
    format!("{} {}", name, year)
}

/// "<first> sampai <last>", or [`NO_DATA`] when there is no range
pub fn date_range_string(bounds: Option<(NaiveDate, NaiveDate)>) -> String {
    match bounds {
        Some((min, max)) => format!("{} sampai {}", format_date(min), format_date(max)),
        None => NO_DATA.to_string(),
    }
}

/// Parse an amount typed in Indonesian notation ("1.500.000,50").
///
/// Only digits and commas are kept. Dots (thousands separators), the `Rp`
/// symbol, spaces and any sign are dropped. The first comma becomes the
/// decimal point and a second comma makes the input invalid. Blank input is
/// zero, so the result is never negative.
///
/// # Examples
/// ```
/// use adledger::utils::parse_idr_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_idr_amount("Rp 1.500.000,50").unwrap(), dec!(1500000.50));
/// assert_eq!(parse_idr_amount("").unwrap(), dec!(0));
/// ```
pub fn parse_idr_amount(input: &str) -> Result<Decimal> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);

    if normalized.is_empty() || normalized == "." {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(&normalized)
        .map_err(|e| anyhow!("Invalid amount '{}': {}", input.trim(), e))
}
