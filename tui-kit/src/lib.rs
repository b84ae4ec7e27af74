//! tui-kit: terminal UI primitives with a date and time picker
//!
//! Buttons, labels, text fields, dropdown menus and a date / time /
//! date-time / date-range picker for ratatui apps. Components render from
//! props and answer events with application actions; floating panels can be
//! drawn inline or as portal layers on top of the frame.
//!
//! # Example
//! ```ignore
//! use tui_kit::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum AppAction {
//!     DueDateSet(Option<i64>),
//!     StayRangeSet(Option<i64>, Option<i64>),
//! }
//!
//! let config = DatePickerConfig::new(PickerMode::DateRange);
//! let mut stay = DatePicker::new(
//!     &config,
//!     Controlled::range(AppAction::StayRangeSet),
//!     ExternalValue::range(state.stay.0, state.stay.1),
//! )?;
//! ```

// Re-export everything from core
pub use tui_kit_core::*;

// Re-export derive macros
pub use tui_kit_macros::Action;

// Components
pub use tui_kit_components::*;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_kit_core::{Action, Command, Component};

    // Events
    pub use tui_kit_core::{process_raw_event, spawn_event_poller, EventKind, EventType, RawEvent};

    // Keymaps
    pub use tui_kit_core::{format_key_for_display, parse_key_string, Keymap};

    // Store
    pub use tui_kit_core::{
        DispatchResult, EffectStore, EffectStoreWithMiddleware, LoggingMiddleware, Middleware,
        NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    // Errors, portals, styling
    pub use tui_kit_core::{ButtonVariant, KitError, PortalRoot, UIColor};

    // Components
    pub use tui_kit_components::prelude::*;

    // Derive macros
    pub use tui_kit_macros::Action;

    // Ratatui re-exports
    pub use tui_kit_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
