//! Publication date normalization.
//!
//! Catalog APIs report publication dates at varying precision. Each accepted
//! shape is widened to a full ISO 8601 date:
//!
//! | Input        | Output       |
//! |--------------|--------------|
//! | `YYYY-MM-DD` | `YYYY-MM-DD` |
//! | `YYYY-MM`    | `YYYY-MM-01` |
//! | `YYYY`       | `YYYY-01-01` |
//!
//! Shapes are tried in that order and the first match wins.

use chrono::{Datelike, NaiveDate};

/// Validate a publication date and render it as `YYYY-MM-DD`.
///
/// Month and day accept one or two digits; the year must have four. Dates
/// that do not exist on the calendar are rejected.
pub fn validate_date(value: &str) -> Option<String> {
    let trimmed = value.trim();
    try_parse_full_date(trimmed)
        .or_else(|| try_parse_year_month(trimmed))
        .or_else(|| try_parse_year(trimmed))
        .map(format_iso8601_date)
}

/// Year of an ISO 8601 date produced by [`validate_date`].
pub fn publication_year(iso_date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(iso_date, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

fn format_iso8601_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn try_parse_full_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(parse_year(year)?, parse_month(month)?, parse_day(day)?)
}

fn try_parse_year_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    NaiveDate::from_ymd_opt(parse_year(year)?, parse_month(month)?, 1)
}

fn try_parse_year(value: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_year(value)?, 1, 1)
}

fn parse_year(value: &str) -> Option<i32> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn parse_month(value: &str) -> Option<u32> {
    parse_small(value).filter(|month| (1..=12).contains(month))
}

fn parse_day(value: &str) -> Option<u32> {
    parse_small(value).filter(|day| (1..=31).contains(day))
}

fn parse_small(value: &str) -> Option<u32> {
    if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
