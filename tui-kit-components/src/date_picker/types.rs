//! Value types shared by the picker modules

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch
///
/// Inside the picker a `TimePoint` is usually a wall-clock value: the raw
/// timestamp shifted by the picker's offsets, so its UTC calendar fields read
/// as the configured timezone's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(pub i64);

impl TimePoint {
    pub const fn from_millis(ms: i64) -> Self {
        TimePoint(ms)
    }

    pub const fn millis(self) -> i64 {
        self.0
    }

    pub fn shift(self, by: i64) -> Self {
        TimePoint(self.0.saturating_add(by))
    }

    /// Calendar fields, read as UTC
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(self.0).map(|dt| dt.naive_utc())
    }

    pub fn from_naive(value: NaiveDateTime) -> Self {
        TimePoint(value.and_utc().timestamp_millis())
    }

    pub fn date(self) -> Option<NaiveDate> {
        self.to_naive().map(|dt| dt.date())
    }

    pub fn time(self) -> Option<NaiveTime> {
        self.to_naive().map(|dt| dt.time())
    }

    /// Midnight of a calendar day
    pub fn start_of(date: NaiveDate) -> Self {
        Self::from_naive(date.and_time(NaiveTime::MIN))
    }
}

/// `[start, end]` selection; `start <= end` once both are set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<TimePoint>,
    pub end: Option<TimePoint>,
}

impl DateRange {
    pub const EMPTY: DateRange = DateRange {
        start: None,
        end: None,
    };

    pub const fn new(start: Option<TimePoint>, end: Option<TimePoint>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// First click done, second pending
    pub fn is_pending(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    pub fn shift(self, by: i64) -> Self {
        Self {
            start: self.start.map(|t| t.shift(by)),
            end: self.end.map(|t| t.shift(by)),
        }
    }

    pub fn from_millis(start: Option<i64>, end: Option<i64>) -> Self {
        Self {
            start: start.map(TimePoint),
            end: end.map(TimePoint),
        }
    }

    pub fn to_millis(self) -> (Option<i64>, Option<i64>) {
        (self.start.map(TimePoint::millis), self.end.map(TimePoint::millis))
    }
}

/// What a picker edits; fixed for the picker's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerMode {
    #[default]
    Date,
    Time,
    #[serde(alias = "datetime")]
    DateTime,
    #[serde(alias = "daterange")]
    DateRange,
}

impl PickerMode {
    /// Modes whose value carries a time of day the user can edit
    pub fn has_time(self) -> bool {
        matches!(self, PickerMode::Time | PickerMode::DateTime)
    }

    pub fn is_range(self) -> bool {
        self == PickerMode::DateRange
    }

    /// Default strftime pattern for the trigger text
    pub fn default_pattern(self) -> &'static str {
        match self {
            PickerMode::Date | PickerMode::DateRange => "%Y-%m-%d",
            PickerMode::Time => "%H:%M",
            PickerMode::DateTime => "%Y-%m-%d %H:%M",
        }
    }
}

/// Sub-view shown inside the floating panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelView {
    Days,
    Months,
    Years,
    Time,
}

/// Which time component arrow keys adjust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeField {
    #[default]
    Hour,
    Minute,
}

/// Raw (unshifted) value as seen by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerValue {
    Date(Option<i64>),
    Range(Option<i64>, Option<i64>),
}
