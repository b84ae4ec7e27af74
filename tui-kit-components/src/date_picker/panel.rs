//! Floating panel drawing and hit-testing
//!
//! The panel is drawn into its own buffer with the origin at (0, 0) and then
//! copied to the frame by the floating shell, so drawing never has to care
//! about where the panel ends up or how much of it is visible. The hit map
//! uses the same panel-local coordinates.

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
};
use tui_kit_core::{border_style, contains, UIColor};

use super::format;
use super::grid::{self, DayCell};
use super::state::{PickerAction, PickerState};
use super::types::{PanelView, PickerMode, TimeField, TimePoint};

pub const PANEL_SIZE: Size = Size {
    width: 24,
    height: 11,
};

const DAY_WIDTH: u16 = 3;
const BROWSE_WIDTH: u16 = 7;
const HEADER_Y: u16 = 1;
const BODY_Y: u16 = 2;
const FOOTER_Y: u16 = 9;
const LEFT: u16 = 1;
const RIGHT: u16 = PANEL_SIZE.width - 1;
const TIME_X: u16 = 8;

/// Something clickable inside the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Prev,
    Next,
    Title,
    Day(NaiveDate),
    /// Out-of-bounds day; swallowed without effect
    DisabledDay(NaiveDate),
    Month(u32),
    Year(i32),
    TimeField(TimeField),
    TimeStep(TimeField, i32),
    Today,
    ToggleTime,
    Confirm,
}

impl PanelHit {
    /// Picker actions for a click on this target
    pub fn actions(self) -> Vec<PickerAction> {
        match self {
            PanelHit::Prev => vec![PickerAction::Page(-1)],
            PanelHit::Next => vec![PickerAction::Page(1)],
            PanelHit::Title => vec![PickerAction::ZoomOut],
            PanelHit::Day(day) => vec![PickerAction::SelectDay(day)],
            PanelHit::DisabledDay(_) => vec![],
            PanelHit::Month(month) => vec![PickerAction::SelectMonth(month)],
            PanelHit::Year(year) => vec![PickerAction::SelectYear(year)],
            PanelHit::TimeField(field) => vec![PickerAction::FocusTimeField(field)],
            PanelHit::TimeStep(field, delta) => vec![
                PickerAction::FocusTimeField(field),
                PickerAction::AdjustTime(delta),
            ],
            PanelHit::Today => vec![PickerAction::Today],
            PanelHit::ToggleTime => vec![PickerAction::ToggleTime],
            PanelHit::Confirm => vec![PickerAction::Confirm],
        }
    }

    pub fn day(self) -> Option<NaiveDate> {
        match self {
            PanelHit::Day(day) | PanelHit::DisabledDay(day) => Some(day),
            _ => None,
        }
    }
}

/// Clickable regions from the last draw, panel-local
#[derive(Debug, Clone, Default)]
pub struct PanelLayout {
    hits: Vec<(Rect, PanelHit)>,
}

impl PanelLayout {
    fn push(&mut self, area: Rect, hit: PanelHit) {
        self.hits.push((area, hit));
    }

    pub fn hit_at(&self, column: u16, row: u16) -> Option<PanelHit> {
        self.hits
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, hit)| *hit)
    }

    pub fn hits(&self) -> &[(Rect, PanelHit)] {
        &self.hits
    }
}

/// Draw the panel for the current state
pub fn draw(state: &PickerState, color: UIColor) -> (Buffer, PanelLayout) {
    let area = Rect::new(0, 0, PANEL_SIZE.width, PANEL_SIZE.height);
    let mut buf = Buffer::empty(area);
    let mut layout = PanelLayout::default();

    Block::bordered()
        .border_style(border_style(color, true))
        .render(area, &mut buf);

    draw_header(state, &mut buf, &mut layout);
    match state.view() {
        PanelView::Days => draw_days(state, color, &mut buf, &mut layout),
        PanelView::Months => draw_months(state, color, &mut buf, &mut layout),
        PanelView::Years => draw_years(state, color, &mut buf, &mut layout),
        PanelView::Time => draw_time(state, color, &mut buf, &mut layout),
    }
    draw_footer(state, color, &mut buf, &mut layout);

    (buf, layout)
}

fn title(state: &PickerState) -> String {
    let cursor = state.cursor;
    match state.view() {
        PanelView::Days => format::month_title(cursor.year(), cursor.month(), state.locale),
        PanelView::Months => cursor.year().to_string(),
        PanelView::Years => {
            let first = grid::year_page_start(cursor.year());
            format!("{} - {}", first, first + grid::YEAR_PAGE - 1)
        }
        PanelView::Time => match state.mode {
            PickerMode::Time => format::format_wall(
                state.cursor.and_time(state.edited_time()),
                "%H:%M",
                state.locale,
            ),
            _ => {
                let date = state.inner_date.and_then(TimePoint::date).unwrap_or(cursor);
                format::format_wall(date.and_time(chrono::NaiveTime::MIN), "%d %b %Y", state.locale)
            }
        },
    }
}

fn draw_header(state: &PickerState, buf: &mut Buffer, layout: &mut PanelLayout) {
    let inner = RIGHT - LEFT;
    let bold = Style::new().add_modifier(Modifier::BOLD);

    if state.view() != PanelView::Time {
        buf.set_string(LEFT, HEADER_Y, "‹", bold);
        buf.set_string(RIGHT - 1, HEADER_Y, "›", bold);
        layout.push(Rect::new(LEFT, HEADER_Y, 1, 1), PanelHit::Prev);
        layout.push(Rect::new(RIGHT - 1, HEADER_Y, 1, 1), PanelHit::Next);
    }

    let title_area = Rect::new(LEFT + 1, HEADER_Y, inner - 2, 1);
    let text = format!("{:^width$.width$}", title(state), width = title_area.width as usize);
    buf.set_string(title_area.x, title_area.y, text, bold);
    if state.view() != PanelView::Time {
        layout.push(title_area, PanelHit::Title);
    }
}

fn day_style(cell: &DayCell, color: UIColor) -> Style {
    let tokens = color.tokens();
    let mut style = Style::new();
    if !cell.in_month {
        style = style.fg(Color::DarkGray);
    }
    if cell.in_range {
        style = style.fg(tokens.accent).add_modifier(Modifier::UNDERLINED);
    }
    if cell.is_today {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.is_selected {
        style = style.fg(tokens.fg).bg(tokens.bg);
    }
    if !cell.is_clickable {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }
    if cell.is_focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn draw_days(state: &PickerState, color: UIColor, buf: &mut Buffer, layout: &mut PanelLayout) {
    let weekdays = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    let dim = Style::new().fg(Color::DarkGray);
    for (col, day) in (0u16..).zip(weekdays) {
        let name = format::weekday_short(day, state.locale);
        buf.set_stringn(LEFT + col * DAY_WIDTH, BODY_Y, name, 2, dim);
    }

    for (i, cell) in (0u16..).zip(grid::day_cells(state)) {
        let x = LEFT + (i % 7) * DAY_WIDTH;
        let y = BODY_Y + 1 + i / 7;
        buf.set_string(x, y, format!("{:>2}", cell.date.day()), day_style(&cell, color));
        let hit = if cell.is_clickable {
            PanelHit::Day(cell.date)
        } else {
            PanelHit::DisabledDay(cell.date)
        };
        layout.push(Rect::new(x, y, DAY_WIDTH, 1), hit);
    }
}

fn browse_cell_area(index: u16) -> Rect {
    Rect::new(
        LEFT + (index % 3) * BROWSE_WIDTH,
        BODY_Y + (index / 3) * 2,
        BROWSE_WIDTH,
        1,
    )
}

fn browse_style(color: UIColor, is_focused: bool, is_current: bool) -> Style {
    let tokens = color.tokens();
    let mut style = Style::new();
    if is_current {
        style = style.fg(tokens.accent).add_modifier(Modifier::BOLD);
    }
    if is_focused {
        style = style.fg(tokens.fg).bg(tokens.bg);
    }
    style
}

fn draw_months(state: &PickerState, color: UIColor, buf: &mut Buffer, layout: &mut PanelLayout) {
    for (i, cell) in (0u16..).zip(grid::month_cells(state)) {
        let area = browse_cell_area(i);
        let name = format::month_short(cell.month, state.locale);
        let text = format!("{:^7.6}", name);
        buf.set_string(area.x, area.y, text, browse_style(color, cell.is_focused, cell.is_current));
        layout.push(area, PanelHit::Month(cell.month));
    }
}

fn draw_years(state: &PickerState, color: UIColor, buf: &mut Buffer, layout: &mut PanelLayout) {
    for (i, cell) in (0u16..).zip(grid::year_cells(state)) {
        let area = browse_cell_area(i);
        let text = format!("{:^7}", cell.year);
        buf.set_string(area.x, area.y, text, browse_style(color, cell.is_focused, cell.is_current));
        layout.push(area, PanelHit::Year(cell.year));
    }
}

fn draw_time(state: &PickerState, color: UIColor, buf: &mut Buffer, layout: &mut PanelLayout) {
    let time = state.edited_time();
    let tokens = color.tokens();
    let fields = [
        (TimeField::Hour, TIME_X, time.hour()),
        (TimeField::Minute, TIME_X + 5, time.minute()),
    ];
    let arrow = Style::new().fg(tokens.accent);

    for (field, x, value) in fields {
        let style = if state.time_field == field {
            Style::new().fg(tokens.fg).bg(tokens.bg).add_modifier(Modifier::BOLD)
        } else {
            Style::new()
        };
        buf.set_string(x, BODY_Y + 2, "▲", arrow);
        buf.set_string(x, BODY_Y + 3, format!("{value:02}"), style);
        buf.set_string(x, BODY_Y + 4, "▼", arrow);
        layout.push(Rect::new(x, BODY_Y + 2, 2, 1), PanelHit::TimeStep(field, 1));
        layout.push(Rect::new(x, BODY_Y + 3, 2, 1), PanelHit::TimeField(field));
        layout.push(Rect::new(x, BODY_Y + 4, 2, 1), PanelHit::TimeStep(field, -1));
    }
    buf.set_string(TIME_X + 3, BODY_Y + 3, ":", Style::new());
}

fn draw_footer(state: &PickerState, color: UIColor, buf: &mut Buffer, layout: &mut PanelLayout) {
    let link = Style::new().fg(color.tokens().accent);
    let button = Style::new()
        .fg(color.tokens().fg)
        .bg(color.tokens().bg)
        .add_modifier(Modifier::BOLD);

    match state.mode {
        PickerMode::Date | PickerMode::DateRange => {
            buf.set_string(LEFT, FOOTER_Y, "Today", link);
            layout.push(Rect::new(LEFT, FOOTER_Y, 5, 1), PanelHit::Today);
        }
        PickerMode::DateTime => {
            let label = if state.view() == PanelView::Time {
                "Date"
            } else {
                "Time"
            };
            buf.set_string(LEFT, FOOTER_Y, label, link);
            layout.push(Rect::new(LEFT, FOOTER_Y, 4, 1), PanelHit::ToggleTime);
        }
        PickerMode::Time => {}
    }

    if state.mode.has_time() {
        buf.set_string(RIGHT - 2, FOOTER_Y, "OK", button);
        layout.push(Rect::new(RIGHT - 2, FOOTER_Y, 2, 1), PanelHit::Confirm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_picker::state::reducer;
    use chrono::Locale;
    use tui_kit_core::buffer_to_string_plain;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn open(mode: PickerMode) -> PickerState {
        let mut state = PickerState::new(mode, Locale::en_US, jan(15));
        reducer(&mut state, PickerAction::Open);
        state
    }

    #[test]
    fn test_day_view_text() {
        let (buf, _) = draw(&open(PickerMode::Date), UIColor::Primary);
        let text = buffer_to_string_plain(&buf);
        assert!(text.contains("January 2025"), "{text}");
        assert!(text.contains("Mo Tu We Th Fr Sa Su"), "{text}");
        assert!(text.contains("30 31  1  2  3  4  5"), "{text}");
        assert!(text.contains("Today"), "{text}");
        assert!(!text.contains("OK"), "{text}");
    }

    #[test]
    fn test_day_hits() {
        let (_, layout) = draw(&open(PickerMode::Date), UIColor::Primary);
        // Third column of the first week is Jan 1
        assert_eq!(
            layout.hit_at(LEFT + 2 * DAY_WIDTH, BODY_Y + 1),
            Some(PanelHit::Day(jan(1)))
        );
        assert_eq!(layout.hit_at(LEFT, HEADER_Y), Some(PanelHit::Prev));
        assert_eq!(layout.hit_at(RIGHT - 1, HEADER_Y), Some(PanelHit::Next));
        assert_eq!(layout.hit_at(10, HEADER_Y), Some(PanelHit::Title));
        assert_eq!(layout.hit_at(0, 0), None);
    }

    #[test]
    fn test_disabled_days_are_marked() {
        let mut state = open(PickerMode::Date);
        state.max_date = Some(TimePoint::start_of(jan(3)));
        let (_, layout) = draw(&state, UIColor::Primary);
        assert_eq!(
            layout.hit_at(LEFT + 4 * DAY_WIDTH, BODY_Y + 1),
            Some(PanelHit::Day(jan(3)))
        );
        assert_eq!(
            layout.hit_at(LEFT + 5 * DAY_WIDTH, BODY_Y + 1),
            Some(PanelHit::DisabledDay(jan(4)))
        );
        assert!(PanelHit::DisabledDay(jan(4)).actions().is_empty());
    }

    #[test]
    fn test_month_and_year_views() {
        let mut state = open(PickerMode::Date);
        reducer(&mut state, PickerAction::ZoomOut);
        let (buf, layout) = draw(&state, UIColor::Primary);
        let text = buffer_to_string_plain(&buf);
        assert!(text.contains("Jan") && text.contains("Dec"), "{text}");
        assert_eq!(layout.hit_at(LEFT + BROWSE_WIDTH, BODY_Y), Some(PanelHit::Month(2)));

        reducer(&mut state, PickerAction::ZoomOut);
        let (buf, layout) = draw(&state, UIColor::Primary);
        let text = buffer_to_string_plain(&buf);
        assert!(text.contains("2016 - 2027"), "{text}");
        assert_eq!(layout.hit_at(LEFT, BODY_Y + 6), Some(PanelHit::Year(2025)));
    }

    #[test]
    fn test_time_view() {
        let mut state = open(PickerMode::DateTime);
        reducer(&mut state, PickerAction::ToggleTime);
        reducer(&mut state, PickerAction::AdjustTime(9));
        let (buf, layout) = draw(&state, UIColor::Primary);
        let text = buffer_to_string_plain(&buf);
        assert!(text.contains("09 : 00"), "{text}");
        assert!(text.contains("Date"), "{text}");
        assert!(text.contains("OK"), "{text}");
        assert_eq!(
            layout.hit_at(TIME_X + 5, BODY_Y + 2),
            Some(PanelHit::TimeStep(TimeField::Minute, 1))
        );
        assert_eq!(layout.hit_at(LEFT, HEADER_Y), None);
    }

    #[test]
    fn test_german_names() {
        let mut state = open(PickerMode::Date);
        state.locale = Locale::de_DE;
        let (buf, _) = draw(&state, UIColor::Primary);
        let text = buffer_to_string_plain(&buf);
        assert!(text.contains("Januar 2025"), "{text}");
        assert!(text.contains("Mo Di Mi Do Fr Sa So"), "{text}");
    }
}
