// src/format.rs
//! Presentation formatting: locale-style amount grouping, fixed-precision
//! decimals and day/month/year dates. Stateless; the only failure mode is an
//! unparseable amount string.

use crate::amount::{parse_amount, round_display, AmountError};
use chrono::DateTime;
use rust_decimal::Decimal;

/// Format a decimal-string amount with thousands separators and two decimal
/// places: `"1234567.891"` becomes `"1,234,567.89"`.
pub fn format_grouped(raw: &str) -> Result<String, AmountError> {
    let rounded = round_display(parse_amount(raw)?);
    let plain = format!("{rounded:.2}");

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    Ok(format!("{sign}{grouped}.{frac_part}"))
}

/// Format a decimal-string amount to two decimal places without grouping.
pub fn format_plain(raw: &str) -> Result<String, AmountError> {
    let rounded = round_display(parse_amount(raw)?);
    Ok(format!("{rounded:.2}"))
}

/// Format a Unix timestamp as a day/month/year calendar date.
pub fn format_date(unix_secs: u64) -> Option<String> {
    let date = DateTime::from_timestamp(i64::try_from(unix_secs).ok()?, 0)?;
    Some(date.format("%d/%m/%Y").to_string())
}

/// Format a fractional-days value to two decimal places.
pub fn format_days(days: Decimal) -> String {
    format!("{:.2}", round_display(days))
}
