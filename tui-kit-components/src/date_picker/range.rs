//! Two-click range selection

use super::types::{DateRange, TimePoint};

/// Apply one day click to a range
///
/// An empty or complete range starts over at `clicked`. A pending range is
/// completed; a click before the start swaps the ends so `start <= end`.
pub fn reduce(range: DateRange, clicked: TimePoint) -> DateRange {
    match (range.start, range.end) {
        (Some(start), None) if clicked < start => DateRange::new(Some(clicked), Some(start)),
        (Some(start), None) => DateRange::new(Some(start), Some(clicked)),
        _ => DateRange::new(Some(clicked), None),
    }
}

/// Span to highlight while the second click is pending
///
/// Purely visual; never written back to the range.
pub fn preview(range: DateRange, hovered: Option<TimePoint>) -> Option<(TimePoint, TimePoint)> {
    if !range.is_pending() {
        return None;
    }
    let start = range.start?;
    let hovered = hovered?;
    Some((start.min(hovered), start.max(hovered)))
}

/// Whether `day` (midnight wall value) lies inside `[start, end]` by calendar day
pub fn covers(span: (TimePoint, TimePoint), day: TimePoint) -> bool {
    let (Some(first), Some(last), Some(day)) = (span.0.date(), span.1.date(), day.date()) else {
        return false;
    };
    first <= day && day <= last
}
