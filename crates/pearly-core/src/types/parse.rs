// Rust guideline compliant 2026-10-18

//! Permissive free-form date parsing.
//!
//! Accepts the inputs people actually type into date fields: keywords
//! (`now`, `today`, `yesterday`, `tomorrow`, `midnight`), `@<epoch>`,
//! relative offsets (`+3 days`, `2 weeks ago`), RFC 3339, RFC 2822 and a set
//! of common numeric and month-name layouts. Values without an offset are
//! read as UTC.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

/// Parses free-form date text into Unix epoch seconds.
///
/// `now` anchors keywords and relative offsets. Returns `None` when nothing
/// matches.
#[must_use]
pub fn parse_timestamp(input: &str, now: DateTime<Utc>) -> Option<i64> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(ts) = parse_keyword(&text.to_ascii_lowercase(), now) {
        return Some(ts);
    }

    if let Some(epoch) = text.strip_prefix('@') {
        return epoch.trim().parse::<i64>().ok();
    }

    if let Some(ts) = parse_relative(&text.to_ascii_lowercase(), now) {
        return Some(ts);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.timestamp());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.timestamp());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive).timestamp());
        }
    }

    if let Some(date) = parse_compact_date(text) {
        return midnight(date);
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return midnight(date);
        }
    }

    None
}

fn midnight(date: NaiveDate) -> Option<i64> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive).timestamp())
}

fn parse_keyword(text: &str, now: DateTime<Utc>) -> Option<i64> {
    let today = now.date_naive();
    match text {
        "now" => Some(now.timestamp()),
        "today" | "midnight" => midnight(today),
        "yesterday" => midnight(today.pred_opt()?),
        "tomorrow" => midnight(today.succ_opt()?),
        _ => None,
    }
}

/// Parses `[+-]N unit[s] [ago]`.
fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<i64> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    let ago = tokens.last() == Some(&"ago");
    if ago {
        tokens.pop();
    }

    let (amount, unit) = match tokens.as_slice() {
        [amount, unit] => ((*amount).to_string(), (*unit).to_string()),
        [single] => {
            let split = single
                .char_indices()
                .find(|(i, c)| *i > 0 && c.is_ascii_alphabetic())
                .map(|(i, _)| i)?;
            (single[..split].to_string(), single[split..].to_string())
        }
        _ => return None,
    };

    let mut amount: i64 = amount.strip_prefix('+').unwrap_or(&amount).parse().ok()?;
    if ago {
        amount = -amount;
    }

    let unit = unit.strip_suffix('s').unwrap_or(&unit);
    let shifted = match unit {
        "sec" | "second" => now.checked_add_signed(Duration::try_seconds(amount)?)?,
        "min" | "minute" => now.checked_add_signed(Duration::try_minutes(amount)?)?,
        "hour" => now.checked_add_signed(Duration::try_hours(amount)?)?,
        "day" => now.checked_add_signed(Duration::try_days(amount)?)?,
        "week" => now.checked_add_signed(Duration::try_weeks(amount)?)?,
        "month" => shift_months(now, amount)?,
        "year" => shift_months(now, amount.checked_mul(12)?)?,
        _ => return None,
    };
    Some(shifted.timestamp())
}

fn shift_months(now: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        now.checked_add_months(magnitude)
    } else {
        now.checked_sub_months(magnitude)
    }
}

/// Parses `YYYYMMDD`.
fn parse_compact_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = text[..4].parse().ok()?;
    let month = text[4..6].parse().ok()?;
    let day = text[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
