//! Close-on-outside-click detection for floating panels

use ratatui::layout::Rect;
use tui_kit_core::{contains, EventKind};

/// Watches pointer-down events while a floating region is open
///
/// A press outside the boundary and outside the ignored element (usually
/// the trigger, which toggles on its own) fires once and detaches the guard;
/// the owner is expected to close. Nothing is observed while detached.
#[derive(Debug, Default, Clone)]
pub struct ClickAwayGuard {
    boundary: Option<Rect>,
    ignored: Option<Rect>,
    listening: bool,
}

impl ClickAwayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listening; `boundary` is `None` when the region is fully off-screen
    pub fn activate(&mut self, boundary: Option<Rect>) {
        self.boundary = boundary;
        self.listening = true;
        tracing::trace!(?boundary, "click-away listener attached");
    }

    /// Track the region after it moved or resized
    pub fn update_boundary(&mut self, boundary: Option<Rect>) {
        self.boundary = boundary;
    }

    pub fn set_ignored(&mut self, ignored: Option<Rect>) {
        self.ignored = ignored;
    }

    pub fn deactivate(&mut self) {
        if self.listening {
            tracing::trace!("click-away listener detached");
        }
        self.listening = false;
        self.boundary = None;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Returns true when the event is an outside press; the guard detaches
    pub fn handle_event(&mut self, event: &EventKind) -> bool {
        if !self.listening {
            return false;
        }
        let EventKind::PointerDown { column, row } = *event else {
            return false;
        };
        let inside = |area: Option<Rect>| area.is_some_and(|a| contains(a, column, row));
        if inside(self.boundary) || inside(self.ignored) {
            return false;
        }
        tracing::debug!(column, row, "click-away fired");
        self.deactivate();
        true
    }
}
