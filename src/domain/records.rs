use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of the purchase/reading log, with named fields.
///
/// Fields are kept close to how they are written in the sheet. Numeric
/// interpretation of `price_yen` and `order_date` happens in the
/// aggregation pass so that a malformed cell never rejects the whole row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub order_date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub read_flag: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub price_yen: String,
    #[serde(default)]
    pub category: String,
}

impl RawRecord {
    pub fn is_read(&self) -> bool {
        self.read_flag > 0
    }

    /// Rating usable in sums and counts. Anything outside `1..=MAX_RATING` means "not rated".
    pub fn effective_rating(&self) -> Option<i64> {
        self.rating.filter(|r| RATING_RANGE.contains(r))
    }

    pub fn price(&self) -> u64 {
        parse_price_yen(&self.price_yen)
    }

    pub fn parsed_order_date(&self) -> Option<NaiveDate> {
        parse_order_date(&self.order_date)
    }
}

pub const MAX_RATING: i64 = 5;
const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=MAX_RATING;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an order date as written in the sheet.
///
/// Accepts plain dates with `-`, `/`, `.` or Japanese separators, naive
/// date-times, and RFC 3339 timestamps (the calendar date as written, no
/// timezone conversion).
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Group key for a calendar month, e.g. `2024-01`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse a yen price such as `"1,234"`, `"¥2,000"` or `"980円"`.
///
/// Separators, whitespace and currency marks are stripped. Empty or
/// unparsable input is zero.
pub fn parse_price_yen(value: &str) -> u64 {
    let cleaned: String = value
        .trim()
        .trim_start_matches(['¥', '￥'])
        .trim_end_matches('円')
        .chars()
        .filter(|c| !matches!(c, ',' | '，') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return 0;
    }

    if let Ok(price) = cleaned.parse::<u64>() {
        return price;
    }

    match cleaned.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => price.trunc() as u64,
        _ => 0,
    }
}
