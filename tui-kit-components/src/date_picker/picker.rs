//! The date picker component: read-only trigger plus floating panel

use chrono::{DateTime, Utc};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};
use tui_kit_core::{Component, EventKind, KitError, Keymap, UIColor};

use super::binding::{Controlled, ExternalValue, Uncontrolled, ValueBinding};
use super::config::DatePickerConfig;
use super::keymap::PickerCommand;
use super::panel::{self, PanelHit, PanelLayout, PANEL_SIZE};
use super::state::{Direction, PickerAction, PickerState};
use super::store::PickerStore;
use super::types::{PickerMode, PickerValue};
use crate::floating::FloatingLayer;
use crate::text_field::{TextField, TextFieldProps};

/// Per-render inputs owned by the application
#[derive(Debug, Clone, Copy, Default)]
pub struct DatePickerProps<'a> {
    /// Current value for controlled pickers; ignored by uncontrolled ones
    pub external: Option<ExternalValue>,
    pub is_focused: bool,
    /// Area the inline panel may draw over; ignored with a portal
    pub container: Option<Rect>,
    /// Validation message under the trigger
    pub error: Option<&'a str>,
}

/// Date, time, date-time or date-range picker
///
/// `B` decides who owns the value: [`Controlled`] pickers emit the
/// application's actions and wait for the new value to come back through
/// [`DatePickerProps::external`], [`Uncontrolled`] pickers keep it.
pub struct DatePicker<A, B> {
    store: PickerStore<A, B>,
    keymap: Keymap<PickerCommand>,
    layer: FloatingLayer,
    trigger: TextField,
    layout: PanelLayout,
    panel: Buffer,
    color: UIColor,
    placeholder: String,
    label: Option<String>,
    helper_text: Option<String>,
}

pub type ControlledPicker<A> = DatePicker<A, Controlled<A>>;
pub type UncontrolledPicker<A> = DatePicker<A, Uncontrolled>;

impl<A, B: ValueBinding<A>> DatePicker<A, B> {
    pub fn new(
        config: &DatePickerConfig,
        binding: B,
        initial: ExternalValue,
    ) -> Result<Self, KitError> {
        Self::new_at(config, binding, initial, Utc::now())
    }

    /// Build with an explicit clock reading
    pub fn new_at(
        config: &DatePickerConfig,
        binding: B,
        initial: ExternalValue,
        now: DateTime<Utc>,
    ) -> Result<Self, KitError> {
        config.validate()?;
        let store = PickerStore::new_at(config, binding, initial, now)?;
        Ok(Self {
            store,
            keymap: config.keymap(),
            layer: FloatingLayer::new(config.placement, PANEL_SIZE, config.enable_portal),
            trigger: TextField::new(),
            layout: PanelLayout::default(),
            panel: Buffer::empty(Rect::default()),
            color: config.color,
            placeholder: config
                .placeholder
                .clone()
                .unwrap_or_else(|| default_placeholder(config.mode).to_string()),
            label: config.label.clone(),
            helper_text: config.helper_text.clone(),
        })
    }

    pub fn store(&self) -> &PickerStore<A, B> {
        &self.store
    }

    /// Direct access for programmatic value and timezone changes
    pub fn store_mut(&mut self) -> &mut PickerStore<A, B> {
        &mut self.store
    }

    pub fn state(&self) -> &PickerState {
        self.store.state()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open
    }

    /// Committed value in raw milliseconds
    pub fn value(&self) -> PickerValue {
        self.store.value()
    }

    /// Text shown in the trigger
    pub fn display_text(&self) -> String {
        self.store
            .display()
            .unwrap_or_else(|| self.placeholder.clone())
    }

    /// Hit map of the last drawn panel, panel-local
    pub fn panel_layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Open panel area in viewport coordinates
    pub fn panel_area(&self) -> Option<Rect> {
        self.layer.visible()
    }

    fn dispatch(&mut self, action: PickerAction) -> Vec<A> {
        let (_, emitted) = self.store.dispatch(action);
        self.sync_layer();
        emitted
    }

    /// Follow the store's open flag
    fn sync_layer(&mut self) {
        match (self.state().is_open, self.layer.is_open()) {
            (true, false) => self.layer.open(),
            (false, true) => self.layer.close(),
            _ => {}
        }
    }

    fn command_action(command: PickerCommand) -> Option<PickerAction> {
        Some(match command {
            PickerCommand::Up => PickerAction::Navigate(Direction::Up),
            PickerCommand::Down => PickerAction::Navigate(Direction::Down),
            PickerCommand::Left => PickerAction::Navigate(Direction::Left),
            PickerCommand::Right => PickerAction::Navigate(Direction::Right),
            PickerCommand::PrevPage => PickerAction::Page(-1),
            PickerCommand::NextPage => PickerAction::Page(1),
            PickerCommand::ZoomOut => PickerAction::ZoomOut,
            PickerCommand::ToggleTime => PickerAction::ToggleTime,
            PickerCommand::Select => PickerAction::SelectFocused,
            PickerCommand::Confirm => PickerAction::Confirm,
            PickerCommand::Close => PickerAction::Close,
            PickerCommand::Today => PickerAction::Today,
            PickerCommand::Open => return None,
        })
    }

    fn hit_at(&self, column: u16, row: u16) -> Option<PanelHit> {
        let (x, y) = self.layer.to_local(column, row)?;
        self.layout.hit_at(x, y)
    }

    /// Draw the portal layer in viewport space
    ///
    /// Call after the regular component tree; a no-op when the panel is
    /// closed or drawn inline.
    pub fn render_overlay(&self, frame: &mut Frame) {
        if self.layer.is_open() && self.layer.uses_portal() {
            self.layer.blit(&self.panel, frame.buffer_mut());
        }
    }
}

fn default_placeholder(mode: PickerMode) -> &'static str {
    match mode {
        PickerMode::Date => "Select date",
        PickerMode::Time => "Select time",
        PickerMode::DateTime => "Select date and time",
        PickerMode::DateRange => "Select date range",
    }
}

impl<A, B: ValueBinding<A>> Component<A> for DatePicker<A, B> {
    type Props<'a> = DatePickerProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let mut emitted = Vec::new();
        if let Some(external) = &props.external {
            self.store.sync_external(external);
        }

        if self.layer.handle_event(event) {
            emitted.extend(self.dispatch(PickerAction::Close));
            return emitted;
        }

        if !self.is_open() {
            let open = match event {
                EventKind::Key(key) => {
                    props.is_focused && self.keymap.matches(PickerCommand::Open, key)
                }
                EventKind::PointerDown { column, row } => self.layer.in_trigger(*column, *row),
                _ => false,
            };
            if open {
                emitted.extend(self.dispatch(PickerAction::Open));
            }
            return emitted;
        }

        match *event {
            EventKind::Key(key) => {
                let action = self
                    .keymap
                    .command_for(&key)
                    .and_then(Self::command_action);
                if let Some(action) = action {
                    emitted.extend(self.dispatch(action));
                }
            }
            EventKind::PointerDown { column, row } => {
                if self.layer.in_trigger(column, row) {
                    emitted.extend(self.dispatch(PickerAction::Close));
                } else if let Some(hit) = self.hit_at(column, row) {
                    tracing::trace!(?hit, "date picker panel click");
                    for action in hit.actions() {
                        emitted.extend(self.dispatch(action));
                        if !self.is_open() {
                            break;
                        }
                    }
                }
            }
            EventKind::PointerMove { column, row } => {
                let day = self.hit_at(column, row).and_then(PanelHit::day);
                emitted.extend(self.dispatch(PickerAction::Hover(day)));
            }
            _ => {}
        }
        emitted
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if let Some(external) = &props.external {
            self.store.sync_external(external);
        }
        let text = self.store.display().unwrap_or_default();
        Component::<A>::render(
            &mut self.trigger,
            frame,
            area,
            TextFieldProps {
                label: self.label.as_deref(),
                helper_text: self.helper_text.as_deref(),
                error: props.error,
                color: self.color,
                ..TextFieldProps::read_only(&text, &self.placeholder, props.is_focused)
            },
        );
        let trigger = self.trigger.input_area();
        if trigger.width > 3 && trigger.height >= 3 {
            frame.buffer_mut().set_string(
                trigger.right() - 2,
                trigger.y + 1,
                if self.is_open() { "▴" } else { "▾" },
                Style::new(),
            );
        }

        let clip = if self.layer.uses_portal() {
            frame.area()
        } else {
            props.container.unwrap_or_else(|| frame.area())
        };
        self.layer.layout(trigger, clip);
        self.sync_layer();

        if !self.is_open() {
            return;
        }
        let (panel, layout) = panel::draw(self.store.state(), self.color);
        self.panel = panel;
        self.layout = layout;
        if !self.layer.uses_portal() {
            self.layer.blit(&self.panel, frame.buffer_mut());
        }
    }
}
