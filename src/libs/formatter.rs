//! Parsing and display helpers shared by the commands, views and exports.

use super::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD`, or `today` for the local date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| msg_error_anyhow!(Message::InvalidDate(date_str.to_string())))
    }
}

/// Parses an inclusive range, rejecting `start` after `end`.
pub fn parse_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate)> {
    let (start_date, end_date) = (parse_date(start)?, parse_date(end)?);
    if start_date > end_date {
        return Err(msg_error_anyhow!(Message::InvalidDateRange(start.to_string(), end.to_string())));
    }
    Ok((start_date, end_date))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

pub fn format_fees(fees: Option<f64>) -> String {
    fees.map(|f| format!("{:.2}", f)).unwrap_or_default()
}

/// Empty optional text shows as `N/A`.
pub fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_and_today() {
        assert_eq!(parse_date("2025-03-01").unwrap(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(parse_date("TODAY").unwrap(), Local::now().date_naive());
        assert!(parse_date("01/03/2025").is_err());
    }

    #[test]
    fn range_must_be_ordered() {
        assert!(parse_range("2025-01-01", "2025-01-31").is_ok());
        assert!(parse_range("2025-01-01", "2025-01-01").is_ok());
        assert!(parse_range("2025-02-01", "2025-01-31").is_err());
    }

    #[test]
    fn display_helpers() {
        assert_eq!(format_rate(66.666), "66.67%");
        assert_eq!(format_fees(Some(1500.0)), "1500.00");
        assert_eq!(format_fees(None), "");
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some("")), "N/A");
        assert_eq!(or_na(Some("Python")), "Python");
    }
}
