//! Cell models for the day, month and year grids

use chrono::{Datelike, NaiveDate, TimeDelta};

use super::range;
use super::state::PickerState;
use super::types::TimePoint;

pub const WEEKS: usize = 6;
pub const DAY_CELLS: usize = WEEKS * 7;
/// Years shown per page in the year grid
pub const YEAR_PAGE: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days of neighbouring months
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub in_range: bool,
    pub is_focused: bool,
    /// False outside `min_date` / `max_date`
    pub is_clickable: bool,
}

/// Six Monday-first weeks covering the cursor's month
pub fn day_cells(state: &PickerState) -> Vec<DayCell> {
    let cursor = state.cursor;
    let Some(first) = cursor.with_day(1) else {
        return Vec::new();
    };
    let lead = i64::from(first.weekday().num_days_from_monday());
    let Some(start) = first.checked_sub_signed(TimeDelta::days(lead)) else {
        return Vec::new();
    };
    let highlighted = state.highlighted_range();

    start
        .iter_days()
        .take(DAY_CELLS)
        .map(|date| DayCell {
            date,
            in_month: date.month() == cursor.month(),
            is_today: date == state.today,
            is_selected: state.is_selected(date),
            in_range: highlighted.is_some_and(|span| range::covers(span, TimePoint::start_of(date))),
            is_focused: date == cursor,
            is_clickable: state.is_selectable(date),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    pub month: u32,
    pub is_focused: bool,
    pub is_current: bool,
}

pub fn month_cells(state: &PickerState) -> Vec<MonthCell> {
    (1..=12)
        .map(|month| MonthCell {
            month,
            is_focused: month == state.cursor.month(),
            is_current: month == state.today.month() && state.cursor.year() == state.today.year(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCell {
    pub year: i32,
    pub is_focused: bool,
    pub is_current: bool,
}

/// First year of the page containing `year`
pub fn year_page_start(year: i32) -> i32 {
    year - year.rem_euclid(YEAR_PAGE)
}

pub fn year_cells(state: &PickerState) -> Vec<YearCell> {
    let first = year_page_start(state.cursor.year());
    (first..first + YEAR_PAGE)
        .map(|year| YearCell {
            year,
            is_focused: year == state.cursor.year(),
            is_current: year == state.today.year(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_picker::state::{reducer, PickerAction};
    use crate::date_picker::types::PickerMode;
    use chrono::Locale;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn state(mode: PickerMode) -> PickerState {
        let mut state = PickerState::new(mode, Locale::en_US, jan(15));
        reducer(&mut state, PickerAction::Open);
        state
    }

    #[test]
    fn test_grid_starts_on_monday() {
        let cells = day_cells(&state(PickerMode::Date));
        assert_eq!(cells.len(), DAY_CELLS);
        // 2025-01-01 is a Wednesday
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        assert!(!cells[0].in_month);
        assert_eq!(cells[2].date, jan(1));
        assert!(cells[2].in_month);
        assert!(cells.iter().any(|c| c.is_today && c.is_focused));
    }

    #[test]
    fn test_bounds_disable_cells() {
        let mut state = state(PickerMode::Date);
        state.min_date = Some(TimePoint::start_of(jan(10)));
        let cells = day_cells(&state);
        let ninth = cells.iter().find(|c| c.date == jan(9)).unwrap();
        let tenth = cells.iter().find(|c| c.date == jan(10)).unwrap();
        assert!(!ninth.is_clickable);
        assert!(tenth.is_clickable);
    }

    #[test]
    fn test_range_cells() {
        let mut state = state(PickerMode::DateRange);
        reducer(&mut state, PickerAction::SelectDay(jan(6)));
        reducer(&mut state, PickerAction::Hover(Some(jan(8))));
        let cells = day_cells(&state);
        let in_range: Vec<u32> = cells
            .iter()
            .filter(|c| c.in_range)
            .map(|c| c.date.day())
            .collect();
        assert_eq!(in_range, vec![6, 7, 8]);
        assert!(cells.iter().find(|c| c.date == jan(6)).unwrap().is_selected);
    }

    #[test]
    fn test_year_page() {
        assert_eq!(year_page_start(2025), 2016);
        assert_eq!(year_page_start(2016), 2016);
        assert_eq!(year_page_start(-1), -12);
        let cells = year_cells(&state(PickerMode::Date));
        assert_eq!(cells.first().map(|c| c.year), Some(2016));
        assert_eq!(cells.last().map(|c| c.year), Some(2027));
        assert!(cells.iter().any(|c| c.year == 2025 && c.is_focused));
    }

    #[test]
    fn test_month_cells() {
        let cells = month_cells(&state(PickerMode::Date));
        assert_eq!(cells.len(), 12);
        assert!(cells[0].is_focused && cells[0].is_current);
    }
}
