//! Pre-built UI components for tui-kit
//!
//! Components implement the `Component<A>` trait and emit actions via
//! callback functions passed through Props.
//!
//! # Components
//!
//! - [`Button`] - Push button in filled, outlined or text style
//! - [`Label`] / [`HelperText`] - Captions above and below a field
//! - [`TextField`] - Single-line text input with cursor
//! - [`Dropdown`] - Floating menu of [`MenuItem`]s
//! - [`DatePicker`] - Date, time, date-time and date-range picker
//!
//! Floating panels (menus, picker panels) are positioned by
//! [`placement`], closed by a [`ClickAwayGuard`] and optionally drawn as
//! portal layers with `render_overlay` after the rest of the frame.
//!
//! # Example
//!
//! ```ignore
//! use tui_kit_components::{DatePicker, DatePickerConfig, DatePickerProps, Controlled, ExternalValue, PickerMode};
//!
//! let config = DatePickerConfig::new(PickerMode::Date);
//! let mut picker = DatePicker::new(&config, Controlled::date(Action::DueDateSet), ExternalValue::date(state.due))?;
//!
//! // In your render function:
//! let props = DatePickerProps {
//!     external: Some(ExternalValue::date(state.due)),
//!     is_focused: state.focus == Focus::DueDate,
//!     ..DatePickerProps::default()
//! };
//! picker.render(frame, area, props);
//! picker.render_overlay(frame);
//! ```

mod button;
mod click_away;
pub mod date_picker;
mod dropdown;
mod floating;
mod label;
pub mod placement;
mod text_field;

pub use button::{Button, ButtonProps};
pub use click_away::ClickAwayGuard;
pub use date_picker::{
    ControlledPicker, Controlled, DatePicker, DatePickerConfig, DatePickerProps, ExternalValue,
    PickerCommand, PickerMode, PickerValue, Uncontrolled, UncontrolledPicker, ValueBinding,
};
pub use dropdown::{Dropdown, DropdownProps, Menu, MenuItem, MAX_VISIBLE_ITEMS};
pub use floating::FloatingLayer;
pub use label::{HelperText, HelperTextProps, Label, LabelProps};
pub use placement::{Anchor, FloatingShell, Placement};
pub use text_field::{TextField, TextFieldProps};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Button, ButtonProps, Controlled, DatePicker, DatePickerConfig, DatePickerProps, Dropdown,
        DropdownProps, ExternalValue, HelperText, HelperTextProps, Label, LabelProps, Menu,
        MenuItem, PickerMode, PickerValue, Placement, TextField, TextFieldProps, Uncontrolled,
    };
}
