//! Picker state, actions and the reducer behind them
//!
//! Every date stored here is a wall-clock value: the raw UTC timestamp
//! shifted by `ms_offset + gmt_ms_offset`. Conversion back to raw happens
//! only when a commit leaves the picker (see `store`).

use chrono::{Datelike, Locale, Months, NaiveDate, NaiveTime, Timelike};
use tui_kit_core::{Action, DispatchResult};

use super::format;
use super::range;
use super::types::{DateRange, PanelView, PickerMode, TimeField, TimePoint};
use super::view::{PanelViewController, ViewNav};

/// Cursor movement inside the current grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    pub mode: PickerMode,
    pub locale: Locale,
    pub ms_offset: i64,
    pub gmt_ms_offset: i64,
    pub min_date: Option<TimePoint>,
    pub max_date: Option<TimePoint>,

    /// In-progress single value; mirrors `committed_date` while closed
    pub inner_date: Option<TimePoint>,
    /// In-progress range; a pending start survives closing the panel
    pub inner_date_range: DateRange,
    /// Last value accepted by the application
    pub committed_date: Option<TimePoint>,
    pub committed_range: DateRange,

    pub view: PanelViewController,
    pub is_open: bool,
    /// Focused cell; its month is the one displayed
    pub cursor: NaiveDate,
    pub hover: Option<NaiveDate>,
    pub time_field: TimeField,
    pub today: NaiveDate,
}

impl PickerState {
    pub fn new(mode: PickerMode, locale: Locale, today: NaiveDate) -> Self {
        Self {
            mode,
            locale,
            ms_offset: 0,
            gmt_ms_offset: 0,
            min_date: None,
            max_date: None,
            inner_date: None,
            inner_date_range: DateRange::EMPTY,
            committed_date: None,
            committed_range: DateRange::EMPTY,
            view: PanelViewController::new(mode),
            is_open: false,
            cursor: today,
            hover: None,
            time_field: TimeField::Hour,
            today,
        }
    }

    pub fn offset(&self) -> i64 {
        self.ms_offset.saturating_add(self.gmt_ms_offset)
    }

    pub fn to_wall(&self, raw: i64) -> TimePoint {
        TimePoint(raw).shift(self.offset())
    }

    pub fn to_raw(&self, wall: TimePoint) -> i64 {
        wall.shift(-self.offset()).millis()
    }

    pub fn view(&self) -> PanelView {
        self.view.view()
    }

    /// Day-level bounds check; a day is clickable unless it falls outside
    pub fn is_selectable(&self, day: NaiveDate) -> bool {
        let after_min = self
            .min_date
            .and_then(TimePoint::date)
            .is_none_or(|min| day >= min);
        let before_max = self
            .max_date
            .and_then(TimePoint::date)
            .is_none_or(|max| day <= max);
        after_min && before_max
    }

    /// Value shown on the trigger
    pub fn display(&self, pattern: &str) -> Option<String> {
        let range = if self.inner_date_range.is_pending() {
            self.inner_date_range
        } else {
            self.committed_range
        };
        format::format_value(self.mode, self.committed_date, range, pattern, self.locale)
    }

    /// Range to paint: the committed or in-progress range, or the hover preview
    pub fn highlighted_range(&self) -> Option<(TimePoint, TimePoint)> {
        let range = self.inner_date_range;
        if let (Some(start), Some(end)) = (range.start, range.end) {
            return Some((start, end));
        }
        range::preview(range, self.hover.map(TimePoint::start_of))
            .or_else(|| range.start.map(|start| (start, start)))
    }

    pub fn is_selected(&self, day: NaiveDate) -> bool {
        match self.mode {
            PickerMode::DateRange => [self.inner_date_range.start, self.inner_date_range.end]
                .into_iter()
                .flatten()
                .any(|t| t.date() == Some(day)),
            _ => self.inner_date.and_then(TimePoint::date) == Some(day),
        }
    }

    /// Time of day being edited in the time view
    pub fn edited_time(&self) -> NaiveTime {
        self.inner_date
            .and_then(TimePoint::time)
            .unwrap_or(NaiveTime::MIN)
    }

    fn focus_date(&self) -> NaiveDate {
        let value = match self.mode {
            PickerMode::DateRange => self.inner_date_range.start,
            _ => self.inner_date,
        };
        value.and_then(TimePoint::date).unwrap_or(self.today)
    }

    /// `day` at the time of day of the current value
    fn on_day(&self, day: NaiveDate) -> TimePoint {
        TimePoint::from_naive(day.and_time(self.edited_time()))
    }

    fn reshift(&mut self, by: i64) {
        let shift = |t: Option<TimePoint>| t.map(|t| t.shift(by));
        self.inner_date = shift(self.inner_date);
        self.committed_date = shift(self.committed_date);
        self.min_date = shift(self.min_date);
        self.max_date = shift(self.max_date);
        self.inner_date_range = self.inner_date_range.shift(by);
        self.committed_range = self.committed_range.shift(by);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerAction {
    Open,
    /// Close without committing
    Close,
    Navigate(Direction),
    /// Previous/next month, year or year page depending on the view
    Page(i32),
    ZoomOut,
    ToggleTime,
    SelectDay(NaiveDate),
    SelectMonth(u32),
    SelectYear(i32),
    /// Act on the focused cell (Enter)
    SelectFocused,
    Hover(Option<NaiveDate>),
    AdjustTime(i32),
    FocusTimeField(TimeField),
    /// Commit the edited date and time
    Confirm,
    Today,
    SetInnerDate(Option<TimePoint>),
    SetInnerDateRange(DateRange),
    /// Replace the committed value (controlled update or uncontrolled accept)
    SyncValue {
        date: Option<TimePoint>,
        range: DateRange,
    },
    /// Change `ms_offset` / `gmt_ms_offset`, re-deriving wall values
    SetOffsets { ms_offset: i64, gmt_ms_offset: i64 },
}

impl Action for PickerAction {
    fn name(&self) -> &'static str {
        match self {
            PickerAction::Open => "Open",
            PickerAction::Close => "Close",
            PickerAction::Navigate(_) => "Navigate",
            PickerAction::Page(_) => "Page",
            PickerAction::ZoomOut => "ZoomOut",
            PickerAction::ToggleTime => "ToggleTime",
            PickerAction::SelectDay(_) => "SelectDay",
            PickerAction::SelectMonth(_) => "SelectMonth",
            PickerAction::SelectYear(_) => "SelectYear",
            PickerAction::SelectFocused => "SelectFocused",
            PickerAction::Hover(_) => "Hover",
            PickerAction::AdjustTime(_) => "AdjustTime",
            PickerAction::FocusTimeField(_) => "FocusTimeField",
            PickerAction::Confirm => "Confirm",
            PickerAction::Today => "Today",
            PickerAction::SetInnerDate(_) => "SetInnerDate",
            PickerAction::SetInnerDateRange(_) => "SetInnerDateRange",
            PickerAction::SyncValue { .. } => "SyncValue",
            PickerAction::SetOffsets { .. } => "SetOffsets",
        }
    }

    fn category(&self) -> Option<&'static str> {
        Some(match self {
            PickerAction::Open | PickerAction::Close => "panel",
            PickerAction::Navigate(_)
            | PickerAction::Page(_)
            | PickerAction::ZoomOut
            | PickerAction::ToggleTime
            | PickerAction::Hover(_)
            | PickerAction::Today => "navigation",
            PickerAction::SelectDay(_)
            | PickerAction::SelectMonth(_)
            | PickerAction::SelectYear(_)
            | PickerAction::SelectFocused
            | PickerAction::AdjustTime(_)
            | PickerAction::FocusTimeField(_)
            | PickerAction::Confirm => "edit",
            PickerAction::SetInnerDate(_)
            | PickerAction::SetInnerDateRange(_)
            | PickerAction::SyncValue { .. }
            | PickerAction::SetOffsets { .. } => "value",
        })
    }
}

/// Commits leaving the reducer, as wall-clock values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEffect {
    CommitDate(Option<TimePoint>),
    CommitRange(DateRange),
}

pub fn reducer(state: &mut PickerState, action: PickerAction) -> DispatchResult<PickerEffect> {
    match action {
        PickerAction::Open => {
            if state.is_open {
                return DispatchResult::unchanged();
            }
            state.is_open = true;
            state.view.reset();
            state.inner_date = state.committed_date;
            if !state.inner_date_range.is_pending() {
                state.inner_date_range = state.committed_range;
            }
            state.cursor = state.focus_date();
            state.hover = None;
            state.time_field = TimeField::Hour;
            DispatchResult::changed()
        }

        PickerAction::Close => DispatchResult::changed_if(close(state)),

        PickerAction::Navigate(direction) => {
            if !state.is_open {
                return DispatchResult::unchanged();
            }
            if state.view() == PanelView::Time {
                return match direction {
                    Direction::Up => reducer(state, PickerAction::AdjustTime(1)),
                    Direction::Down => reducer(state, PickerAction::AdjustTime(-1)),
                    Direction::Left => {
                        reducer(state, PickerAction::FocusTimeField(TimeField::Hour))
                    }
                    Direction::Right => {
                        reducer(state, PickerAction::FocusTimeField(TimeField::Minute))
                    }
                };
            }
            DispatchResult::changed_if(move_cursor(state, direction))
        }

        PickerAction::Page(delta) => {
            let months = match state.view() {
                PanelView::Days => delta,
                PanelView::Months => delta * 12,
                PanelView::Years => delta * 144,
                PanelView::Time => return DispatchResult::unchanged(),
            };
            DispatchResult::changed_if(shift_months(state, months))
        }

        PickerAction::ZoomOut => DispatchResult::changed_if(state.view.apply(ViewNav::ZoomOut)),

        PickerAction::ToggleTime => {
            DispatchResult::changed_if(state.view.apply(ViewNav::ToggleTime))
        }

        PickerAction::SelectDay(day) => select_day(state, day),

        PickerAction::SelectMonth(month) => {
            if state.view() != PanelView::Months {
                return DispatchResult::unchanged();
            }
            if let Some(cursor) = with_month(state.cursor, state.cursor.year(), month) {
                state.cursor = cursor;
            }
            state.view.apply(ViewNav::MonthPicked);
            DispatchResult::changed()
        }

        PickerAction::SelectYear(year) => {
            if state.view() != PanelView::Years {
                return DispatchResult::unchanged();
            }
            if let Some(cursor) = with_month(state.cursor, year, state.cursor.month()) {
                state.cursor = cursor;
            }
            state.view.apply(ViewNav::YearPicked);
            DispatchResult::changed()
        }

        PickerAction::SelectFocused => {
            let next = match state.view() {
                PanelView::Days => PickerAction::SelectDay(state.cursor),
                PanelView::Months => PickerAction::SelectMonth(state.cursor.month()),
                PanelView::Years => PickerAction::SelectYear(state.cursor.year()),
                PanelView::Time => PickerAction::Confirm,
            };
            reducer(state, next)
        }

        PickerAction::Hover(day) => {
            let changed = state.hover != day;
            state.hover = day;
            DispatchResult::changed_if(changed)
        }

        PickerAction::AdjustTime(delta) => {
            if !state.mode.has_time() {
                return DispatchResult::unchanged();
            }
            let base = state
                .inner_date
                .unwrap_or_else(|| TimePoint::start_of(state.cursor));
            let Some(naive) = base.to_naive() else {
                return DispatchResult::unchanged();
            };
            let (hour, minute) = (naive.hour() as i32, naive.minute() as i32);
            let (hour, minute) = match state.time_field {
                TimeField::Hour => ((hour + delta).rem_euclid(24), minute),
                TimeField::Minute => (hour, (minute + delta).rem_euclid(60)),
            };
            // rem_euclid keeps both in range
            let Some(time) = NaiveTime::from_hms_opt(hour as u32, minute as u32, 0) else {
                return DispatchResult::unchanged();
            };
            state.inner_date = Some(TimePoint::from_naive(naive.date().and_time(time)));
            DispatchResult::changed()
        }

        PickerAction::FocusTimeField(field) => {
            let changed = state.time_field != field;
            state.time_field = field;
            DispatchResult::changed_if(changed)
        }

        PickerAction::Confirm => {
            if !state.mode.has_time() || !state.is_open {
                return DispatchResult::unchanged();
            }
            let value = state
                .inner_date
                .unwrap_or_else(|| TimePoint::start_of(state.cursor));
            state.inner_date = Some(value);
            close(state);
            tracing::debug!(value = value.millis(), "picker confirmed");
            DispatchResult::changed_with(PickerEffect::CommitDate(Some(value)))
        }

        PickerAction::Today => {
            let changed = state.cursor != state.today;
            state.cursor = state.today;
            let reset = matches!(state.view(), PanelView::Months | PanelView::Years);
            if reset {
                state.view.reset();
            }
            DispatchResult::changed_if(changed || reset)
        }

        PickerAction::SetInnerDate(value) => {
            let changed = state.inner_date != value;
            state.inner_date = value;
            DispatchResult::changed_if(changed)
        }

        PickerAction::SetInnerDateRange(value) => {
            let changed = state.inner_date_range != value;
            state.inner_date_range = value;
            DispatchResult::changed_if(changed)
        }

        PickerAction::SyncValue { date, range } => {
            let changed = state.committed_date != date || state.committed_range != range;
            state.committed_date = date;
            state.committed_range = range;
            state.inner_date = date;
            state.inner_date_range = range;
            DispatchResult::changed_if(changed)
        }

        PickerAction::SetOffsets {
            ms_offset,
            gmt_ms_offset,
        } => {
            let old = state.offset();
            state.ms_offset = ms_offset;
            state.gmt_ms_offset = gmt_ms_offset;
            let by = state.offset().saturating_sub(old);
            if by == 0 {
                return DispatchResult::unchanged();
            }
            state.reshift(by);
            DispatchResult::changed()
        }
    }
}

fn close(state: &mut PickerState) -> bool {
    if !state.is_open {
        return false;
    }
    state.is_open = false;
    state.view.reset();
    state.hover = None;
    true
}

fn select_day(state: &mut PickerState, day: NaiveDate) -> DispatchResult<PickerEffect> {
    if state.view() != PanelView::Days || !state.is_selectable(day) {
        return DispatchResult::unchanged();
    }
    state.cursor = day;
    match state.mode {
        PickerMode::Date => {
            let value = state.on_day(day);
            state.inner_date = Some(value);
            close(state);
            DispatchResult::changed_with(PickerEffect::CommitDate(Some(value)))
        }
        PickerMode::DateTime => {
            state.inner_date = Some(state.on_day(day));
            DispatchResult::changed()
        }
        PickerMode::DateRange => {
            let range = range::reduce(state.inner_date_range, TimePoint::start_of(day));
            state.inner_date_range = range;
            if !range.is_complete() {
                return DispatchResult::changed();
            }
            state.hover = None;
            close(state);
            DispatchResult::changed_with(PickerEffect::CommitRange(range))
        }
        PickerMode::Time => DispatchResult::unchanged(),
    }
}

fn move_cursor(state: &mut PickerState, direction: Direction) -> bool {
    let (step, row) = match state.view() {
        PanelView::Days => {
            let days = match direction {
                Direction::Left => -1,
                Direction::Right => 1,
                Direction::Up => -7,
                Direction::Down => 7,
            };
            let next = state
                .cursor
                .checked_add_signed(chrono::TimeDelta::days(days));
            return match next {
                Some(next) => {
                    state.cursor = next;
                    true
                }
                None => false,
            };
        }
        PanelView::Months => (1, 3),
        PanelView::Years => (12, 36),
        PanelView::Time => return false,
    };
    let months = match direction {
        Direction::Left => -step,
        Direction::Right => step,
        Direction::Up => -row,
        Direction::Down => row,
    };
    shift_months(state, months)
}

fn shift_months(state: &mut PickerState, months: i32) -> bool {
    let magnitude = Months::new(months.unsigned_abs());
    let next = if months < 0 {
        state.cursor.checked_sub_months(magnitude)
    } else {
        state.cursor.checked_add_months(magnitude)
    };
    match next {
        Some(next) if next != state.cursor => {
            state.cursor = next;
            true
        }
        _ => false,
    }
}

/// Same day in another month, clamped to the month's length
fn with_month(date: NaiveDate, year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    (1..=date.day()).rev().find_map(|day| first.with_day(day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn open(mode: PickerMode) -> PickerState {
        let mut state = PickerState::new(mode, Locale::en_US, jan(15));
        reducer(&mut state, PickerAction::Open);
        state
    }

    #[test]
    fn test_offset_round_trip() {
        let mut state = PickerState::new(PickerMode::Date, Locale::en_US, jan(1));
        state.ms_offset = 1_000;
        state.gmt_ms_offset = 19_800_000;
        let raw = 1_736_467_200_123;
        assert_eq!(state.to_raw(state.to_wall(raw)), raw);
        assert_eq!(state.to_wall(raw).millis(), raw + 19_801_000);
    }

    #[test]
    fn test_date_click_commits_and_closes() {
        let mut state = open(PickerMode::Date);
        let result = reducer(&mut state, PickerAction::SelectDay(jan(10)));
        assert_eq!(
            result.effects,
            vec![PickerEffect::CommitDate(Some(TimePoint::start_of(jan(10))))]
        );
        assert!(!state.is_open);
    }

    #[test]
    fn test_datetime_click_keeps_time_and_view() {
        let mut state = PickerState::new(PickerMode::DateTime, Locale::en_US, jan(15));
        let prior = TimePoint::from_naive(jan(3).and_hms_opt(14, 30, 0).unwrap());
        reducer(
            &mut state,
            PickerAction::SyncValue {
                date: Some(prior),
                range: DateRange::EMPTY,
            },
        );
        reducer(&mut state, PickerAction::Open);

        let result = reducer(&mut state, PickerAction::SelectDay(jan(20)));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(
            state.inner_date,
            Some(TimePoint::from_naive(jan(20).and_hms_opt(14, 30, 0).unwrap()))
        );
        assert_eq!(state.view(), PanelView::Days);
        assert!(state.is_open);
        // Committed value untouched until confirm
        assert_eq!(state.committed_date, Some(prior));
    }

    #[test]
    fn test_datetime_confirm_commits_edited_time() {
        let mut state = open(PickerMode::DateTime);
        reducer(&mut state, PickerAction::SelectDay(jan(20)));
        reducer(&mut state, PickerAction::ToggleTime);
        assert_eq!(state.view(), PanelView::Time);
        reducer(&mut state, PickerAction::Navigate(Direction::Up));
        reducer(&mut state, PickerAction::Navigate(Direction::Right));
        reducer(&mut state, PickerAction::Navigate(Direction::Down));

        let result = reducer(&mut state, PickerAction::SelectFocused);

        let expected = TimePoint::from_naive(jan(20).and_hms_opt(1, 59, 0).unwrap());
        assert_eq!(result.effects, vec![PickerEffect::CommitDate(Some(expected))]);
        assert!(!state.is_open);
    }

    #[test]
    fn test_range_scenario_swaps_and_commits() {
        let mut state = open(PickerMode::DateRange);
        let first = reducer(&mut state, PickerAction::SelectDay(jan(10)));
        assert!(first.effects.is_empty());
        assert!(state.is_open);

        let second = reducer(&mut state, PickerAction::SelectDay(jan(5)));
        let expected = DateRange::new(
            Some(TimePoint::start_of(jan(5))),
            Some(TimePoint::start_of(jan(10))),
        );
        assert_eq!(second.effects, vec![PickerEffect::CommitRange(expected)]);
        assert!(!state.is_open);
    }

    #[test]
    fn test_pending_range_survives_reopen() {
        let mut state = open(PickerMode::DateRange);
        reducer(&mut state, PickerAction::SelectDay(jan(10)));
        reducer(&mut state, PickerAction::Close);
        reducer(&mut state, PickerAction::Open);
        assert!(state.inner_date_range.is_pending());
        assert_eq!(state.cursor, jan(10));
    }

    #[test]
    fn test_out_of_bounds_day_is_noop() {
        let mut state = open(PickerMode::Date);
        state.min_date = Some(TimePoint::start_of(jan(5)));
        state.max_date = Some(TimePoint::from_naive(jan(20).and_hms_opt(12, 0, 0).unwrap()));
        let before = state.clone();

        let result = reducer(&mut state, PickerAction::SelectDay(jan(21)));

        assert_eq!(result, DispatchResult::unchanged());
        assert_eq!(state, before);
        assert!(state.is_selectable(jan(20)));
        assert!(!state.is_selectable(jan(4)));
    }

    #[test]
    fn test_month_year_browsing() {
        let mut state = open(PickerMode::Date);
        state.cursor = jan(31);
        reducer(&mut state, PickerAction::ZoomOut);
        reducer(&mut state, PickerAction::ZoomOut);
        assert_eq!(state.view(), PanelView::Years);

        reducer(&mut state, PickerAction::SelectYear(2028));
        assert_eq!(state.view(), PanelView::Months);
        reducer(&mut state, PickerAction::SelectMonth(2));
        assert_eq!(state.view(), PanelView::Days);
        assert_eq!(state.cursor, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_keyboard_navigation_steps() {
        let mut state = open(PickerMode::Date);
        reducer(&mut state, PickerAction::Navigate(Direction::Down));
        assert_eq!(state.cursor, jan(22));
        reducer(&mut state, PickerAction::Page(1));
        assert_eq!(state.cursor, NaiveDate::from_ymd_opt(2025, 2, 22).unwrap());
        reducer(&mut state, PickerAction::ZoomOut);
        reducer(&mut state, PickerAction::Navigate(Direction::Up));
        assert_eq!(state.cursor, NaiveDate::from_ymd_opt(2024, 11, 22).unwrap());
        reducer(&mut state, PickerAction::Today);
        assert_eq!(state.cursor, jan(15));
        assert_eq!(state.view(), PanelView::Days);
    }

    #[test]
    fn test_escape_discards_datetime_edit() {
        let mut state = open(PickerMode::DateTime);
        reducer(&mut state, PickerAction::SelectDay(jan(20)));
        reducer(&mut state, PickerAction::Close);
        reducer(&mut state, PickerAction::Open);
        assert_eq!(state.inner_date, None);
    }

    #[test]
    fn test_set_offsets_reshifts_wall_values() {
        let mut state = PickerState::new(PickerMode::Date, Locale::en_US, jan(1));
        let raw = 1_736_467_200_000;
        let wall = state.to_wall(raw);
        reducer(
            &mut state,
            PickerAction::SyncValue {
                date: Some(wall),
                range: DateRange::EMPTY,
            },
        );
        reducer(
            &mut state,
            PickerAction::SetOffsets {
                ms_offset: 0,
                gmt_ms_offset: 3_600_000,
            },
        );
        assert_eq!(state.committed_date.map(|t| state.to_raw(t)), Some(raw));
    }

    #[test]
    fn test_hover_preview() {
        let mut state = open(PickerMode::DateRange);
        reducer(&mut state, PickerAction::SelectDay(jan(10)));
        reducer(&mut state, PickerAction::Hover(Some(jan(3))));
        assert_eq!(
            state.highlighted_range(),
            Some((TimePoint::start_of(jan(3)), TimePoint::start_of(jan(10))))
        );
        // Preview never touches the range itself
        assert!(state.inner_date_range.is_pending());
    }
}
