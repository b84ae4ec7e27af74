//! Process-wide overlay registry
//!
//! Floating panels that opt into portal rendering are registered here and
//! drawn in full-frame coordinates after the regular component tree. The
//! registry answers "which overlay is on top at this cell" so pointer events
//! can be routed to overlays before the widgets underneath.
//!
//! The global root is created on first use. [`PortalHandle`] unmounts its
//! layer on drop, and both `unmount` and `teardown` are idempotent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use ratatui::layout::Rect;

use crate::event::contains;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortalId(u64);

static NEXT_PORTAL_ID: AtomicU64 = AtomicU64::new(1);

impl PortalId {
    fn next() -> Self {
        PortalId(NEXT_PORTAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One mounted overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalLayer {
    pub id: PortalId,
    pub area: Rect,
}

/// Ordered overlay layers; later layers sit on top
#[derive(Debug, Default)]
pub struct PortalRoot {
    layers: Vec<PortalLayer>,
}

static GLOBAL_ROOT: OnceLock<Mutex<PortalRoot>> = OnceLock::new();

impl PortalRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the process-wide root, creating it on first use
    pub fn global() -> MutexGuard<'static, PortalRoot> {
        GLOBAL_ROOT
            .get_or_init(|| {
                tracing::debug!("portal root created");
                Mutex::new(PortalRoot::new())
            })
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Push a new layer on top
    pub fn mount(&mut self, area: Rect) -> PortalId {
        let id = PortalId::next();
        self.layers.push(PortalLayer { id, area });
        tracing::debug!(?id, ?area, layers = self.layers.len(), "portal mounted");
        id
    }

    /// Move an existing layer; returns false if it is not mounted
    pub fn update(&mut self, id: PortalId, area: Rect) -> bool {
        match self.layers.iter_mut().find(|layer| layer.id == id) {
            Some(layer) => {
                layer.area = area;
                true
            }
            None => false,
        }
    }

    /// Remove a layer; returns false if it was already gone
    pub fn unmount(&mut self, id: PortalId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        let removed = self.layers.len() != before;
        if removed {
            tracing::debug!(?id, layers = self.layers.len(), "portal unmounted");
        }
        removed
    }

    /// Drop every layer
    pub fn teardown(&mut self) {
        if !self.layers.is_empty() {
            tracing::debug!(layers = self.layers.len(), "portal root torn down");
        }
        self.layers.clear();
    }

    pub fn is_mounted(&self, id: PortalId) -> bool {
        self.layers.iter().any(|layer| layer.id == id)
    }

    pub fn area_of(&self, id: PortalId) -> Option<Rect> {
        self.layers
            .iter()
            .find(|layer| layer.id == id)
            .map(|layer| layer.area)
    }

    /// Topmost layer covering a cell
    pub fn topmost_at(&self, column: u16, row: u16) -> Option<PortalId> {
        self.layers
            .iter()
            .rev()
            .find(|layer| contains(layer.area, column, row))
            .map(|layer| layer.id)
    }

    /// Layers bottom to top
    pub fn layers(&self) -> &[PortalLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// RAII registration in the global [`PortalRoot`]
#[derive(Debug)]
pub struct PortalHandle {
    id: PortalId,
}

impl PortalHandle {
    pub fn mount(area: Rect) -> Self {
        let id = PortalRoot::global().mount(area);
        Self { id }
    }

    pub fn id(&self) -> PortalId {
        self.id
    }

    pub fn update(&self, area: Rect) {
        PortalRoot::global().update(self.id, area);
    }

    pub fn is_mounted(&self) -> bool {
        PortalRoot::global().is_mounted(self.id)
    }
}

impl Drop for PortalHandle {
    fn drop(&mut self) {
        PortalRoot::global().unmount(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_and_topmost() {
        let mut root = PortalRoot::new();
        let below = root.mount(Rect::new(0, 0, 10, 10));
        let above = root.mount(Rect::new(5, 5, 10, 10));

        assert_eq!(root.topmost_at(6, 6), Some(above));
        assert_eq!(root.topmost_at(1, 1), Some(below));
        assert_eq!(root.topmost_at(30, 30), None);
        assert_eq!(root.layers().len(), 2);
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let mut root = PortalRoot::new();
        let id = root.mount(Rect::new(0, 0, 4, 4));

        assert!(root.unmount(id));
        assert!(!root.unmount(id));
        assert!(root.is_empty());
    }

    #[test]
    fn test_teardown_twice() {
        let mut root = PortalRoot::new();
        root.mount(Rect::new(0, 0, 4, 4));
        root.mount(Rect::new(1, 1, 4, 4));

        root.teardown();
        root.teardown();
        assert!(root.is_empty());
    }

    #[test]
    fn test_update_moves_layer() {
        let mut root = PortalRoot::new();
        let id = root.mount(Rect::new(0, 0, 4, 4));

        assert!(root.update(id, Rect::new(20, 0, 4, 4)));
        assert_eq!(root.topmost_at(1, 1), None);
        assert_eq!(root.area_of(id), Some(Rect::new(20, 0, 4, 4)));

        root.unmount(id);
        assert!(!root.update(id, Rect::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_handle_unmounts_on_drop() {
        let handle = PortalHandle::mount(Rect::new(100, 100, 3, 3));
        let id = handle.id();
        assert!(handle.is_mounted());

        drop(handle);
        assert!(!PortalRoot::global().is_mounted(id));
    }
}
