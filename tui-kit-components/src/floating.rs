//! Open/close plumbing shared by floating panels
//!
//! Ties a [`FloatingShell`] (where the panel goes), a [`ClickAwayGuard`]
//! (when to close) and an optional portal layer (how it is stacked) to one
//! trigger. Owners feed it the trigger and clip areas on every render and
//! forward events to it before their own handling.

use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
};
use tui_kit_core::{contains, EventKind, PortalHandle, PortalId};

use crate::click_away::ClickAwayGuard;
use crate::placement::{Anchor, FloatingShell, Placement};

#[derive(Debug)]
pub struct FloatingLayer {
    shell: FloatingShell,
    guard: ClickAwayGuard,
    portal: Option<PortalHandle>,
    enable_portal: bool,
    trigger: Rect,
    clip: Rect,
}

impl FloatingLayer {
    pub fn new(placement: Placement, panel: Size, enable_portal: bool) -> Self {
        Self {
            shell: FloatingShell::new(placement, panel),
            guard: ClickAwayGuard::new(),
            portal: None,
            enable_portal,
            trigger: Rect::default(),
            clip: Rect::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.shell.is_open()
    }

    /// Drawn by `render_overlay` in viewport space instead of inline
    pub fn uses_portal(&self) -> bool {
        self.enable_portal
    }

    pub fn trigger(&self) -> Rect {
        self.trigger
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.shell.anchor()
    }

    pub fn portal_id(&self) -> Option<PortalId> {
        self.portal.as_ref().map(PortalHandle::id)
    }

    pub fn is_listening(&self) -> bool {
        self.guard.is_listening()
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.shell.open(self.trigger);
        let visible = self.visible();
        self.guard.activate(visible);
        self.guard.set_ignored(Some(self.trigger));
        if self.enable_portal {
            self.portal = Some(PortalHandle::mount(visible.unwrap_or_default()));
        }
        tracing::debug!(trigger = ?self.trigger, portal = self.enable_portal, "floating panel open");
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.shell.close();
        self.guard.deactivate();
        // Dropping the handle unmounts the layer
        self.portal = None;
        tracing::debug!("floating panel closed");
    }

    /// Record where the trigger was drawn and what the panel may cover
    pub fn layout(&mut self, trigger: Rect, clip: Rect) {
        let moved = self.shell.set_trigger(trigger);
        let clipped = self.clip != clip;
        self.trigger = trigger;
        self.clip = clip;
        self.guard.set_ignored(Some(trigger));
        if moved || clipped {
            self.sync();
        }
    }

    pub fn set_panel_size(&mut self, panel: Size) {
        if self.shell.set_panel_size(panel) {
            self.sync();
        }
    }

    pub fn panel_size(&self) -> Size {
        self.shell.panel_size()
    }

    fn sync(&mut self) {
        let visible = self.visible();
        if self.guard.is_listening() {
            self.guard.update_boundary(visible);
        }
        if let Some(portal) = &self.portal {
            portal.update(visible.unwrap_or_default());
        }
    }

    /// Recompute placement on resize/scroll; true when an outside press
    /// should close the panel
    pub fn handle_event(&mut self, event: &EventKind) -> bool {
        if self.shell.handle_event(event) {
            self.sync();
        }
        self.guard.handle_event(event)
    }

    pub fn in_trigger(&self, column: u16, row: u16) -> bool {
        contains(self.trigger, column, row)
    }

    /// On-screen part of the open panel
    pub fn visible(&self) -> Option<Rect> {
        self.shell.visible(self.clip)
    }

    /// Viewport cell to panel-local cell
    pub fn to_local(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        self.shell.to_local(column, row, self.clip)
    }

    pub fn blit(&self, panel: &Buffer, target: &mut Buffer) {
        self.shell.blit(panel, target, self.clip);
    }
}
