//! Floating panel placement below a trigger
//!
//! The resolved anchor is never flipped or clamped to the viewport: a panel
//! opened near the bottom or the left edge can extend past the screen. Only
//! the drawing is clipped, so nothing is written outside the buffer.

use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
};
use serde::{Deserialize, Serialize};
use tui_kit_core::EventKind;

/// Which trigger corner the panel hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Left edges aligned
    #[default]
    BottomStart,
    /// Right edges aligned
    BottomEnd,
}

/// Top-left corner of a floating panel in viewport cells; may be negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

/// Panel position flush against the trigger's bottom edge
pub fn resolve(trigger: Rect, panel: Size, placement: Placement) -> Anchor {
    let y = i32::from(trigger.y) + i32::from(trigger.height);
    let x = match placement {
        Placement::BottomStart => i32::from(trigger.x),
        Placement::BottomEnd => i32::from(trigger.right()) - i32::from(panel.width),
    };
    Anchor { x, y }
}

/// Part of a panel at `anchor` that falls inside `clip`
pub fn visible_rect(anchor: Anchor, panel: Size, clip: Rect) -> Option<Rect> {
    let left = anchor.x.max(i32::from(clip.x));
    let top = anchor.y.max(i32::from(clip.y));
    let right = (anchor.x + i32::from(panel.width)).min(i32::from(clip.right()));
    let bottom = (anchor.y + i32::from(panel.height)).min(i32::from(clip.bottom()));
    if left >= right || top >= bottom {
        return None;
    }
    // Bounded by clip, which is u16 already
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Placement state for one floating panel
///
/// Holds the trigger snapshot and the cached anchor. The anchor is computed
/// on `open`, and again whenever a resize or scroll arrives or the latest
/// render reports the trigger somewhere else.
#[derive(Debug, Clone)]
pub struct FloatingShell {
    placement: Placement,
    panel: Size,
    trigger: Rect,
    anchor: Option<Anchor>,
}

impl FloatingShell {
    pub fn new(placement: Placement, panel: Size) -> Self {
        Self {
            placement,
            panel,
            trigger: Rect::default(),
            anchor: None,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn panel_size(&self) -> Size {
        self.panel
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn open(&mut self, trigger: Rect) -> Anchor {
        self.trigger = trigger;
        let anchor = resolve(trigger, self.panel, self.placement);
        self.anchor = Some(anchor);
        tracing::trace!(?trigger, ?anchor, placement = ?self.placement, "floating panel opened");
        anchor
    }

    pub fn close(&mut self) {
        self.anchor = None;
    }

    fn recompute(&mut self) -> bool {
        let Some(old) = self.anchor else {
            return false;
        };
        let anchor = resolve(self.trigger, self.panel, self.placement);
        self.anchor = Some(anchor);
        old != anchor
    }

    /// Record the trigger's latest area; returns true if the anchor moved
    pub fn set_trigger(&mut self, trigger: Rect) -> bool {
        if self.trigger == trigger {
            return false;
        }
        self.trigger = trigger;
        self.recompute()
    }

    /// Panel size depends on the view (e.g. menus grow with their items)
    pub fn set_panel_size(&mut self, panel: Size) -> bool {
        if self.panel == panel {
            return false;
        }
        self.panel = panel;
        self.recompute()
    }

    /// Recompute on resize and scroll; returns true if the anchor moved
    pub fn handle_event(&mut self, event: &EventKind) -> bool {
        if event.is_layout_change() {
            return self.recompute();
        }
        false
    }

    /// On-screen part of the open panel
    pub fn visible(&self, clip: Rect) -> Option<Rect> {
        self.anchor
            .and_then(|anchor| visible_rect(anchor, self.panel, clip))
    }

    /// Translate a viewport cell into panel-local coordinates
    ///
    /// Returns `None` for cells outside the visible part of the panel.
    pub fn to_local(&self, column: u16, row: u16, clip: Rect) -> Option<(u16, u16)> {
        let anchor = self.anchor?;
        let visible = self.visible(clip)?;
        if !tui_kit_core::contains(visible, column, row) {
            return None;
        }
        Some((
            (i32::from(column) - anchor.x) as u16,
            (i32::from(row) - anchor.y) as u16,
        ))
    }

    /// Copy a panel drawn off-screen into the target buffer, clipped
    ///
    /// `panel` must have its origin at (0, 0).
    pub fn blit(&self, panel: &Buffer, target: &mut Buffer, clip: Rect) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let Some(visible) = self.visible(clip.intersection(target.area)) else {
            return;
        };
        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                let lx = (i32::from(x) - anchor.x) as u16;
                let ly = (i32::from(y) - anchor.y) as u16;
                if lx < panel.area.width && ly < panel.area.height {
                    target[(x, y)] = panel[(lx, ly)].clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PANEL: Size = Size {
        width: 24,
        height: 11,
    };

    #[test]
    fn test_bottom_start_aligns_left_edges() {
        let trigger = Rect::new(10, 4, 30, 3);
        assert_eq!(
            resolve(trigger, PANEL, Placement::BottomStart),
            Anchor { x: 10, y: 7 }
        );
    }

    #[test]
    fn test_bottom_end_aligns_right_edges() {
        let trigger = Rect::new(10, 4, 30, 3);
        // right edge 40, panel 24 wide
        assert_eq!(
            resolve(trigger, PANEL, Placement::BottomEnd),
            Anchor { x: 16, y: 7 }
        );
    }

    #[test]
    fn test_no_clamping_near_edges() {
        let trigger = Rect::new(2, 20, 10, 3);
        let anchor = resolve(trigger, PANEL, Placement::BottomEnd);
        assert_eq!(anchor, Anchor { x: -12, y: 23 });

        let viewport = Rect::new(0, 0, 80, 24);
        // Only column 0..12 of row 23 remains visible
        assert_eq!(
            visible_rect(anchor, PANEL, viewport),
            Some(Rect::new(0, 23, 12, 1))
        );
    }

    #[test]
    fn test_fully_offscreen_is_none() {
        let anchor = Anchor { x: 0, y: 30 };
        assert_eq!(visible_rect(anchor, PANEL, Rect::new(0, 0, 80, 24)), None);
    }

    #[test]
    fn test_shell_recomputes_on_trigger_move() {
        let mut shell = FloatingShell::new(Placement::BottomStart, PANEL);
        shell.open(Rect::new(0, 0, 20, 3));
        assert!(!shell.set_trigger(Rect::new(0, 0, 20, 3)));
        assert!(shell.set_trigger(Rect::new(0, 5, 20, 3)));
        assert_eq!(shell.anchor(), Some(Anchor { x: 0, y: 8 }));
    }

    #[test]
    fn test_shell_ignores_layout_when_closed() {
        let mut shell = FloatingShell::new(Placement::BottomStart, PANEL);
        assert!(!shell.handle_event(&EventKind::Resize(80, 24)));
        assert!(!shell.set_trigger(Rect::new(3, 3, 5, 1)));
        assert_eq!(shell.anchor(), None);
    }

    #[test]
    fn test_to_local() {
        let mut shell = FloatingShell::new(Placement::BottomStart, PANEL);
        shell.open(Rect::new(5, 0, 20, 3));
        let viewport = Rect::new(0, 0, 80, 24);
        assert_eq!(shell.to_local(5, 3, viewport), Some((0, 0)));
        assert_eq!(shell.to_local(8, 5, viewport), Some((3, 2)));
        assert_eq!(shell.to_local(4, 5, viewport), None);
    }

    #[test]
    fn test_blit_clips_to_viewport() {
        let mut shell = FloatingShell::new(Placement::BottomStart, Size::new(4, 2));
        shell.open(Rect::new(8, 0, 4, 1));
        let mut panel = Buffer::empty(Rect::new(0, 0, 4, 2));
        panel.set_string(0, 0, "abcd", ratatui::style::Style::default());
        let mut target = Buffer::empty(Rect::new(0, 0, 10, 2));

        let viewport = target.area;
        shell.blit(&panel, &mut target, viewport);

        assert_eq!(target[(8, 1)].symbol(), "a");
        assert_eq!(target[(9, 1)].symbol(), "b");
    }
}
