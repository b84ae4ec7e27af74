//! Terminal events as seen by components

use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Event categories, used when routing events to overlays first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Key,
    Pointer,
    Scroll,
    Resize,
    Tick,
}

/// The event payload handed to [`Component::handle_event`](crate::Component::handle_event)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Left button pressed at a cell
    PointerDown { column: u16, row: u16 },
    /// Pointer moved (no button) over a cell
    PointerMove { column: u16, row: u16 },
    /// Other mouse events (release, drag, right button)
    Mouse(MouseEvent),
    /// Scroll wheel with position and delta (+1 down, -1 up)
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick
    Tick,
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Key(_) => EventType::Key,
            EventKind::PointerDown { .. } | EventKind::PointerMove { .. } | EventKind::Mouse(_) => {
                EventType::Pointer
            }
            EventKind::Scroll { .. } => EventType::Scroll,
            EventKind::Resize(_, _) => EventType::Resize,
            EventKind::Tick => EventType::Tick,
        }
    }

    /// Events that move things on screen and invalidate floating placements
    pub fn is_layout_change(&self) -> bool {
        matches!(self, EventKind::Resize(_, _) | EventKind::Scroll { .. })
    }

    /// Cell position for pointer-like events
    pub fn position(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::PointerDown { column, row }
            | EventKind::PointerMove { column, row }
            | EventKind::Scroll { column, row, .. } => Some((*column, *row)),
            EventKind::Mouse(mouse) => Some((mouse.column, mouse.row)),
            _ => None,
        }
    }

    /// Ctrl+C, the universal quit chord
    pub fn is_interrupt(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == crossterm::event::KeyCode::Char('c')
            }
            _ => false,
        }
    }
}

/// Check if a cell lies within a rectangle
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Process a raw event into an EventKind
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => EventKind::PointerDown {
                column: mouse.column,
                row: mouse.row,
            },
            MouseEventKind::Moved => EventKind::PointerMove {
                column: mouse.column,
                row: mouse.row,
            },
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_left_down_becomes_pointer_down() {
        let event = process_raw_event(RawEvent::Mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            4,
            7,
        )));
        assert_eq!(event, EventKind::PointerDown { column: 4, row: 7 });
        assert_eq!(event.position(), Some((4, 7)));
    }

    #[test]
    fn test_right_down_stays_raw() {
        let event = process_raw_event(RawEvent::Mouse(mouse(
            MouseEventKind::Down(MouseButton::Right),
            1,
            1,
        )));
        assert!(matches!(event, EventKind::Mouse(_)));
        assert_eq!(event.event_type(), EventType::Pointer);
    }

    #[test]
    fn test_scroll_and_resize_are_layout_changes() {
        let scroll = process_raw_event(RawEvent::Mouse(mouse(MouseEventKind::ScrollUp, 0, 0)));
        assert_eq!(
            scroll,
            EventKind::Scroll {
                column: 0,
                row: 0,
                delta: -1
            }
        );
        assert!(scroll.is_layout_change());
        assert!(process_raw_event(RawEvent::Resize(80, 24)).is_layout_change());
        assert!(!EventKind::Tick.is_layout_change());
    }

    #[test]
    fn test_contains_edges() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(contains(area, 2, 3));
        assert!(contains(area, 5, 4));
        assert!(!contains(area, 6, 4));
        assert!(!contains(area, 5, 5));
        assert!(!contains(Rect::default(), 0, 0));
    }

    #[test]
    fn test_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(EventKind::Key(key).is_interrupt());
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!EventKind::Key(key).is_interrupt());
    }
}
