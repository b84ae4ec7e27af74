//! Core traits and types for tui-kit
//!
//! tui-kit is a set of terminal UI primitives (buttons, menus, text fields,
//! date and time pickers) that follow one contract: components render from
//! props and answer events with actions. This crate holds the shared pieces.
//!
//! # Core Concepts
//!
//! - **Action**: what a component asks the application to do
//! - **Store / EffectStore**: reducer-driven state containers
//! - **Component**: render + handle_event over a `Props` type
//! - **EventKind**: key, pointer, scroll and resize events
//! - **Keymap**: configurable command bindings
//! - **PortalRoot**: process-wide registry of floating overlays
//! - **UIColor**: closed palette mapped to style tokens
//!
//! # Basic Example
//!
//! ```ignore
//! use tui_kit_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum AppAction {
//!     DueDateSet(Option<i64>),
//! }
//!
//! fn reducer(state: &mut AppState, action: AppAction) -> bool {
//!     match action {
//!         AppAction::DueDateSet(value) => {
//!             state.due_date = value;
//!             true
//!         }
//!     }
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! for action in picker.handle_event(&event, props) {
//!     store.dispatch(action);
//! }
//! ```

pub mod action;
pub mod component;
pub mod effect;
pub mod error;
pub mod event;
pub mod keymap;
pub mod poller;
pub mod portal;
pub mod store;
pub mod testing;
pub mod theme;

pub use action::Action;
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use error::KitError;
pub use event::{contains, process_raw_event, EventKind, EventType, RawEvent};
pub use keymap::{format_key_for_display, parse_key_string, Command, Keymap};
pub use poller::spawn_event_poller;
pub use portal::{PortalHandle, PortalId, PortalLayer, PortalRoot};
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware};
pub use theme::{border_style, control_style, ButtonVariant, StyleTokens, UIColor};

pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

pub use testing::{
    buffer_rect_to_string_plain, buffer_to_string_plain, char_key, ctrl_key, key, key_event,
    mouse_down, mouse_move, scroll, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::component::Component;
    pub use crate::effect::{DispatchResult, EffectStore, EffectStoreWithMiddleware};
    pub use crate::error::KitError;
    pub use crate::event::{contains, process_raw_event, EventKind, RawEvent};
    pub use crate::keymap::{Command, Keymap};
    pub use crate::poller::spawn_event_poller;
    pub use crate::portal::{PortalHandle, PortalRoot};
    pub use crate::store::{LoggingMiddleware, Middleware, Store, StoreWithMiddleware};
    pub use crate::theme::{ButtonVariant, UIColor};

    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
