//! Date, time, date-time and date-range picker
//!
//! The picker is split the way its state flows:
//!
//! - [`PickerState`] and [`reducer`](state::reducer) hold the panel state
//!   machine, driven by [`PickerAction`]s
//! - [`PanelViewController`] decides which sub-view is shown
//! - [`range`] resolves the two-click range gesture
//! - [`PickerStore`] wraps the reducer in an effect store and hands commits
//!   to a [`ValueBinding`] ([`Controlled`] or [`Uncontrolled`])
//! - [`panel`] draws the floating panel and maps clicks back to actions
//! - [`DatePicker`] is the component tying it to a trigger field

pub mod binding;
pub mod config;
pub mod format;
pub mod grid;
pub mod keymap;
pub mod panel;
mod picker;
pub mod range;
pub mod state;
pub mod store;
pub mod types;
pub mod view;

pub use binding::{Commit, Controlled, ExternalValue, Uncontrolled, ValueBinding};
pub use config::DatePickerConfig;
pub use keymap::{default_keymap, PickerCommand};
pub use panel::{PanelHit, PanelLayout, PANEL_SIZE};
pub use picker::{ControlledPicker, DatePicker, DatePickerProps, UncontrolledPicker};
pub use state::{Direction, PickerAction, PickerEffect, PickerState};
pub use store::PickerStore;
pub use types::{DateRange, PanelView, PickerMode, PickerValue, TimeField, TimePoint};
pub use view::{PanelViewController, ViewNav};
