//! Timestamp normalization and locale-aware labels

use std::fmt::Write as _;

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use tui_kit_core::KitError;

use super::types::{DateRange, PickerMode, TimePoint};

/// Shown instead of a date when the input is not a usable number
pub const NAN_LABEL: &str = "Value is not a number";

const SECONDS_THRESHOLD: u64 = 100_000_000_000;

/// Accept 10-digit second timestamps as well as 13-digit milliseconds
pub fn normalize_timestamp(value: i64) -> i64 {
    if value.unsigned_abs() < SECONDS_THRESHOLD {
        value.saturating_mul(1000)
    } else {
        value
    }
}

/// Parse `en-US`, `en_us` or a bare `fr` into a chrono locale
pub fn parse_locale(tag: &str) -> Result<Locale, KitError> {
    let unknown = || KitError::UnknownLocale(tag.to_string());
    let mut parts = tag.trim().split(['-', '_']);
    let language = parts.next().filter(|s| !s.is_empty()).ok_or_else(unknown)?;
    let language = language.to_lowercase();
    let region = match parts.next() {
        Some(region) => region.to_uppercase(),
        None if language == "en" => "US".to_string(),
        None => language.to_uppercase(),
    };
    let name = format!("{language}_{region}");
    Locale::try_from(name.as_str()).map_err(|_| unknown())
}

pub fn parse_timezone(name: &str) -> Result<Tz, KitError> {
    name.parse::<Tz>()
        .map_err(|_| KitError::UnknownTimezone(name.to_string()))
}

/// UTC offset of `tz` at `at`, in milliseconds
pub fn gmt_offset_ms(tz: Tz, at: DateTime<Utc>) -> i64 {
    let offset = tz.offset_from_utc_datetime(&at.naive_utc()).fix();
    i64::from(offset.local_minus_utc()) * 1000
}

/// Format calendar fields; falls back to ISO 8601 if the pattern is invalid
pub fn format_wall(value: NaiveDateTime, pattern: &str, locale: Locale) -> String {
    let mut out = String::new();
    if write!(out, "{}", value.and_utc().format_localized(pattern, locale)).is_err() {
        tracing::warn!(pattern, "invalid date pattern, using ISO 8601");
        out.clear();
        let _ = write!(out, "{}", value.format("%Y-%m-%dT%H:%M"));
    }
    out
}

/// Label for an arbitrary numeric timestamp (seconds or milliseconds)
///
/// Non-finite or unrepresentable values render as [`NAN_LABEL`].
pub fn format_timestamp(value: f64, pattern: &str, locale: Locale) -> String {
    if !value.is_finite() {
        return NAN_LABEL.to_string();
    }
    // `as` saturates; out-of-range values fail the conversion below
    let ms = normalize_timestamp(value.trunc() as i64);
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => format_wall(dt.naive_utc(), pattern, locale),
        None => NAN_LABEL.to_string(),
    }
}

/// Trigger text for a wall-clock date
pub fn format_point(value: Option<TimePoint>, pattern: &str, locale: Locale) -> Option<String> {
    let value = value?;
    Some(match value.to_naive() {
        Some(naive) => format_wall(naive, pattern, locale),
        None => NAN_LABEL.to_string(),
    })
}

/// Trigger text for a wall-clock range; a pending range shows its start
pub fn format_range(range: DateRange, pattern: &str, locale: Locale) -> Option<String> {
    let start = format_point(range.start, pattern, locale)?;
    let end = format_point(range.end, pattern, locale).unwrap_or_default();
    Some(format!("{start} ~ {end}").trim_end().to_string())
}

pub fn format_value(
    mode: PickerMode,
    date: Option<TimePoint>,
    range: DateRange,
    pattern: &str,
    locale: Locale,
) -> Option<String> {
    match mode {
        PickerMode::DateRange => format_range(range, pattern, locale),
        _ => format_point(date, pattern, locale),
    }
}

/// "January 2025"
pub fn month_title(year: i32, month: u32, locale: Locale) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => format_wall(first.and_time(chrono::NaiveTime::MIN), "%B %Y", locale),
        None => format!("{month:02}/{year}"),
    }
}

/// Abbreviated month name
pub fn month_short(month: u32, locale: Locale) -> String {
    match NaiveDate::from_ymd_opt(2000, month, 1) {
        Some(first) => format_wall(first.and_time(chrono::NaiveTime::MIN), "%b", locale),
        None => month.to_string(),
    }
}

/// Two-letter weekday header
pub fn weekday_short(day: Weekday, locale: Locale) -> String {
    // 2024-01-01 was a Monday
    let Some(date) = NaiveDate::from_ymd_opt(2024, 1, 1 + day.num_days_from_monday()) else {
        return String::new();
    };
    format_wall(date.and_time(chrono::NaiveTime::MIN), "%a", locale)
        .chars()
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_seconds_and_millis() {
        assert_eq!(normalize_timestamp(1_736_467_200), 1_736_467_200_000);
        assert_eq!(normalize_timestamp(1_736_467_200_000), 1_736_467_200_000);
        assert_eq!(normalize_timestamp(0), 0);
        assert_eq!(normalize_timestamp(-86_400), -86_400_000);
        assert_eq!(normalize_timestamp(i64::MIN), i64::MIN);
        assert_eq!(normalize_timestamp(i64::MAX), i64::MAX);
    }

    #[test]
    fn test_extreme_values_get_nan_label() {
        for value in [-1e30, 1e30, f64::MAX, f64::MIN, i64::MIN as f64] {
            assert_eq!(format_timestamp(value, "%Y-%m-%d", Locale::en_US), NAN_LABEL);
        }
    }

    #[test]
    fn test_parse_locale_variants() {
        assert_eq!(parse_locale("en-US").unwrap(), Locale::en_US);
        assert_eq!(parse_locale("de_de").unwrap(), Locale::de_DE);
        assert_eq!(parse_locale("fr").unwrap(), Locale::fr_FR);
        assert_eq!(parse_locale("en").unwrap(), Locale::en_US);
        assert!(matches!(
            parse_locale("xx-YY"),
            Err(KitError::UnknownLocale(tag)) if tag == "xx-YY"
        ));
        assert!(parse_locale("").is_err());
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("Asia/Kolkata").is_ok());
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(KitError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn test_gmt_offset() {
        let at = DateTime::from_timestamp_millis(1_736_467_200_000).unwrap();
        assert_eq!(gmt_offset_ms(parse_timezone("UTC").unwrap(), at), 0);
        assert_eq!(
            gmt_offset_ms(parse_timezone("Asia/Kolkata").unwrap(), at),
            19_800_000
        );
    }

    #[test]
    fn test_nan_label() {
        assert_eq!(format_timestamp(f64::NAN, "%Y", Locale::en_US), NAN_LABEL);
        assert_eq!(format_timestamp(f64::INFINITY, "%Y", Locale::en_US), NAN_LABEL);
        assert_eq!(format_timestamp(1e300, "%Y", Locale::en_US), NAN_LABEL);
    }

    #[test]
    fn test_format_timestamp_accepts_seconds() {
        assert_eq!(
            format_timestamp(1_736_467_200.0, "%Y-%m-%d", Locale::en_US),
            "2025-01-10"
        );
        assert_eq!(
            format_timestamp(1_736_467_200_000.0, "%d %B", Locale::fr_FR),
            "10 janvier"
        );
    }

    #[test]
    fn test_format_range_pending_and_complete() {
        let start = Some(TimePoint(1_736_035_200_000));
        let end = Some(TimePoint(1_736_467_200_000));
        assert_eq!(
            format_range(DateRange::new(start, end), "%Y-%m-%d", Locale::en_US).as_deref(),
            Some("2025-01-05 ~ 2025-01-10")
        );
        assert_eq!(
            format_range(DateRange::new(start, None), "%Y-%m-%d", Locale::en_US).as_deref(),
            Some("2025-01-05 ~")
        );
        assert_eq!(format_range(DateRange::EMPTY, "%Y", Locale::en_US), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(month_title(2025, 1, Locale::en_US), "January 2025");
        assert_eq!(month_short(3, Locale::en_US), "Mar");
        assert_eq!(weekday_short(Weekday::Mon, Locale::en_US), "Mo");
        assert_eq!(weekday_short(Weekday::Sun, Locale::de_DE), "So");
    }
}
