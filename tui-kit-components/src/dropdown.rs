//! Dropdown menu opened below a trigger

use std::marker::PhantomData;

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
    Frame,
};
use tui_kit_core::{border_style, Component, EventKind, KitError, UIColor};

use crate::floating::FloatingLayer;
use crate::placement::Placement;
use crate::text_field::{TextField, TextFieldProps};

/// Most rows shown before the menu scrolls
pub const MAX_VISIBLE_ITEMS: usize = 8;

/// One menu entry
///
/// Headers are not selectable and carry no value. A selectable entry must
/// have a value, which [`Menu::new`] checks.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<V> {
    pub label: String,
    pub value: Option<V>,
    pub selectable: bool,
    pub disabled: bool,
}

impl<V> MenuItem<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
            selectable: true,
            disabled: false,
        }
    }

    /// Section caption
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            selectable: false,
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu<V> {
    items: Vec<MenuItem<V>>,
}

impl<V: Clone> Menu<V> {
    pub fn new(items: Vec<MenuItem<V>>) -> Result<Self, KitError> {
        if let Some((index, item)) = items
            .iter()
            .enumerate()
            .find(|(_, item)| item.selectable && item.value.is_none())
        {
            return Err(KitError::MissingItemValue {
                index,
                label: item.label.clone(),
            });
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[MenuItem<V>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| item.selectable && !item.disabled)
    }

    /// Value behind an enabled entry
    pub fn select(&self, index: usize) -> Option<V> {
        if !self.is_enabled(index) {
            return None;
        }
        self.items.get(index).and_then(|item| item.value.clone())
    }

    /// Next enabled entry after (or before) `from`, without wrapping
    ///
    /// `from = None` starts outside the list, so forward finds the first
    /// enabled entry and backward the last.
    pub fn next_enabled(&self, from: Option<usize>, forward: bool) -> Option<usize> {
        if forward {
            let start = from.map_or(0, |i| i + 1);
            (start..self.items.len()).find(|&i| self.is_enabled(i))
        } else {
            let end = from.unwrap_or(self.items.len());
            (0..end).rev().find(|&i| self.is_enabled(i))
        }
    }

    pub fn position(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        self.items
            .iter()
            .position(|item| item.value.as_ref() == Some(value))
    }

    /// Columns needed by the longest label
    fn label_width(&self) -> u16 {
        let widest = self
            .items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0);
        u16::try_from(widest).unwrap_or(u16::MAX)
    }
}

pub struct DropdownProps<'a, V, A> {
    pub menu: &'a Menu<V>,
    pub selected: Option<&'a V>,
    pub placeholder: &'a str,
    pub label: Option<&'a str>,
    pub is_focused: bool,
    pub color: UIColor,
    /// Area the inline menu may draw over; ignored with a portal
    pub container: Option<Rect>,
    pub on_select: fn(V) -> A,
}

/// Button-like trigger with a floating list of choices
///
/// Emits `on_select(value)` and closes when an enabled entry is chosen.
/// Up/Down skip headers and disabled entries.
#[derive(Debug)]
pub struct Dropdown<V> {
    trigger: TextField,
    layer: FloatingLayer,
    highlighted: Option<usize>,
    scroll_offset: usize,
    panel: Buffer,
    _value: PhantomData<fn() -> V>,
}

impl<V: Clone + PartialEq> Default for Dropdown<V> {
    fn default() -> Self {
        Self::new(Placement::BottomStart, false)
    }
}

impl<V: Clone + PartialEq> Dropdown<V> {
    pub fn new(placement: Placement, enable_portal: bool) -> Self {
        Self {
            trigger: TextField::new(),
            layer: FloatingLayer::new(placement, Size::new(0, 0), enable_portal),
            highlighted: None,
            scroll_offset: 0,
            panel: Buffer::empty(Rect::default()),
            _value: PhantomData,
        }
    }

    pub fn is_open(&self) -> bool {
        self.layer.is_open()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn open(&mut self, menu: &Menu<V>, selected: Option<&V>) {
        self.highlighted = selected
            .and_then(|value| menu.position(value))
            .filter(|&i| menu.is_enabled(i))
            .or_else(|| menu.next_enabled(None, true));
        self.layer.open();
    }

    fn close(&mut self) {
        self.layer.close();
        self.highlighted = None;
    }

    /// Keep the highlighted row inside the scrolled window
    fn ensure_visible(&mut self, viewport_height: usize) {
        let Some(highlighted) = self.highlighted else {
            return;
        };
        if viewport_height == 0 {
            return;
        }
        if highlighted < self.scroll_offset {
            self.scroll_offset = highlighted;
        } else if highlighted >= self.scroll_offset + viewport_height {
            self.scroll_offset = highlighted.saturating_sub(viewport_height - 1);
        }
    }

    /// Menu entry under a viewport cell
    fn item_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let (x, y) = self.layer.to_local(column, row)?;
        let inner_width = self.layer.panel_size().width.saturating_sub(1);
        if x == 0 || x >= inner_width || y == 0 {
            return None;
        }
        let index = self.scroll_offset + usize::from(y - 1);
        (usize::from(y) <= len.min(MAX_VISIBLE_ITEMS)).then_some(index)
    }

    fn choose<A>(&mut self, menu: &Menu<V>, index: usize, on_select: fn(V) -> A) -> Option<A> {
        let value = menu.select(index)?;
        tracing::debug!(index, label = %menu.items()[index].label, "dropdown item selected");
        self.close();
        Some(on_select(value))
    }

    fn draw_panel(&self, menu: &Menu<V>, selected: Option<usize>, color: UIColor) -> Buffer {
        let size = self.layer.panel_size();
        let area = Rect::new(0, 0, size.width, size.height);
        let mut buffer = Buffer::empty(area);
        Block::bordered()
            .border_style(border_style(color, true))
            .render(area, &mut buffer);

        let tokens = color.tokens();
        let width = usize::from(size.width.saturating_sub(2));
        let rows = menu.len().min(MAX_VISIBLE_ITEMS);
        for (row, (index, item)) in menu
            .items()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(rows)
            .enumerate()
        {
            let style = if !item.selectable {
                Style::new().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else if item.disabled {
                Style::new().fg(Color::DarkGray)
            } else if self.highlighted == Some(index) {
                Style::new().fg(tokens.fg).bg(tokens.bg)
            } else {
                Style::new()
            };
            let marker = if selected == Some(index) { "✓" } else { " " };
            let text = if item.selectable {
                format!("{marker}{:<width$}", item.label, width = width.saturating_sub(1))
            } else {
                item.label.clone()
            };
            let y = u16::try_from(row + 1).unwrap_or(u16::MAX);
            buffer.set_stringn(1, y, text, width, style);
        }
        buffer
    }

    /// Draw the portal layer in viewport space
    ///
    /// Call after the regular component tree; a no-op when the menu is
    /// closed or drawn inline.
    pub fn render_overlay(&self, frame: &mut Frame) {
        if self.layer.is_open() && self.layer.uses_portal() {
            self.layer.blit(&self.panel, frame.buffer_mut());
        }
    }
}

impl<V, A> Component<A> for Dropdown<V>
where
    V: Clone + PartialEq + 'static,
{
    type Props<'a> = DropdownProps<'a, V, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if self.layer.handle_event(event) {
            self.close();
            return None;
        }
        let menu = props.menu;

        if !self.is_open() {
            let open = match event {
                EventKind::Key(key) => {
                    props.is_focused
                        && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down)
                }
                EventKind::PointerDown { column, row } => self.layer.in_trigger(*column, *row),
                _ => false,
            };
            if open && !menu.is_empty() {
                self.open(menu, props.selected);
            }
            return None;
        }

        match *event {
            EventKind::Key(key) => {
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        if let Some(next) = menu.next_enabled(self.highlighted, true) {
                            self.highlighted = Some(next);
                        }
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        if let Some(prev) = menu.next_enabled(self.highlighted, false) {
                            self.highlighted = Some(prev);
                        }
                    }
                    KeyCode::Home => self.highlighted = menu.next_enabled(None, true),
                    KeyCode::End => self.highlighted = menu.next_enabled(None, false),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        let highlighted = self.highlighted;
                        return highlighted.and_then(|index| self.choose(menu, index, props.on_select));
                    }
                    KeyCode::Esc => self.close(),
                    _ => {}
                }
                self.ensure_visible(MAX_VISIBLE_ITEMS);
                None
            }
            EventKind::PointerDown { column, row } => {
                if self.layer.in_trigger(column, row) {
                    self.close();
                    return None;
                }
                self.item_at(column, row, menu.len())
                    .and_then(|index| self.choose(menu, index, props.on_select))
            }
            EventKind::PointerMove { column, row } => {
                if let Some(index) = self.item_at(column, row, menu.len()) {
                    if menu.is_enabled(index) {
                        self.highlighted = Some(index);
                    }
                }
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let menu = props.menu;
        let selected = props.selected.and_then(|value| menu.position(value));
        let text = selected
            .map(|i| menu.items()[i].label.as_str())
            .unwrap_or_default();

        Component::<A>::render(
            &mut self.trigger,
            frame,
            area,
            TextFieldProps {
                label: props.label,
                color: props.color,
                ..TextFieldProps::read_only(text, props.placeholder, props.is_focused)
            },
        );
        let trigger = self.trigger.input_area();
        if trigger.width > 3 && trigger.height >= 3 {
            let arrow = if self.is_open() { "▴" } else { "▾" };
            frame
                .buffer_mut()
                .set_string(trigger.right() - 2, trigger.y + 1, arrow, Style::new());
        }

        let clip = if self.layer.uses_portal() {
            frame.area()
        } else {
            props.container.unwrap_or_else(|| frame.area())
        };
        let rows = u16::try_from(menu.len().min(MAX_VISIBLE_ITEMS)).unwrap_or(0);
        let width = trigger.width.max(menu.label_width().saturating_add(4));
        self.layer.set_panel_size(Size::new(width, rows + 2));
        self.layer.layout(trigger, clip);

        if !self.is_open() {
            return;
        }
        self.ensure_visible(MAX_VISIBLE_ITEMS);
        self.panel = self.draw_panel(menu, selected, props.color);
        if !self.layer.uses_portal() {
            self.layer.blit(&self.panel, frame.buffer_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tui_kit_core::testing::{collect, key_event, mouse_down, mouse_move, RenderHarness};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Priority {
        Low,
        Medium,
        High,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        PriorityPicked(Priority),
    }

    fn menu() -> Menu<Priority> {
        Menu::new(vec![
            MenuItem::header("Priority"),
            MenuItem::new("Low", Priority::Low),
            MenuItem::new("Medium", Priority::Medium).disabled(),
            MenuItem::new("High", Priority::High),
        ])
        .unwrap()
    }

    fn props<'a>(menu: &'a Menu<Priority>, selected: Option<&'a Priority>) -> DropdownProps<'a, Priority, TestAction> {
        DropdownProps {
            menu,
            selected,
            placeholder: "Choose",
            label: None,
            is_focused: true,
            color: UIColor::Primary,
            container: None,
            on_select: TestAction::PriorityPicked,
        }
    }

    fn rendered(dropdown: &mut Dropdown<Priority>, menu: &Menu<Priority>, render: &mut RenderHarness) -> String {
        render.render_to_string_plain(|frame| {
            dropdown.render(frame, Rect::new(0, 0, 20, 3), props(menu, None));
        })
    }

    #[test]
    fn test_selectable_item_without_value_is_rejected() {
        let items = vec![
            MenuItem::new("Low", 1),
            MenuItem {
                label: "Broken".into(),
                value: None,
                selectable: true,
                disabled: false,
            },
        ];
        match Menu::new(items) {
            Err(KitError::MissingItemValue { index, label }) => {
                assert_eq!(index, 1);
                assert_eq!(label, "Broken");
            }
            other => panic!("expected MissingItemValue, got {other:?}"),
        }
    }

    #[test]
    fn test_select_skips_headers_and_disabled() {
        let menu = menu();
        assert_eq!(menu.select(0), None);
        assert_eq!(menu.select(1), Some(Priority::Low));
        assert_eq!(menu.select(2), None);
        assert_eq!(menu.select(9), None);
        assert_eq!(menu.next_enabled(None, true), Some(1));
        assert_eq!(menu.next_enabled(Some(1), true), Some(3));
        assert_eq!(menu.next_enabled(Some(3), true), None);
        assert_eq!(menu.next_enabled(Some(3), false), Some(1));
        assert_eq!(menu.next_enabled(None, false), Some(3));
    }

    #[test]
    fn test_keyboard_open_navigate_select() {
        let menu = menu();
        let mut dropdown = Dropdown::default();
        let mut render = RenderHarness::new(30, 12);
        rendered(&mut dropdown, &menu, &mut render);

        assert!(collect(dropdown.handle_event(&key_event("enter"), props(&menu, None))).is_empty());
        assert!(dropdown.is_open());
        assert_eq!(dropdown.highlighted(), Some(1));

        // Medium is disabled, so Down lands on High
        collect(dropdown.handle_event(&key_event("down"), props(&menu, None)));
        assert_eq!(dropdown.highlighted(), Some(3));
        collect(dropdown.handle_event(&key_event("down"), props(&menu, None)));
        assert_eq!(dropdown.highlighted(), Some(3));

        assert_eq!(
            collect(dropdown.handle_event(&key_event("enter"), props(&menu, None))),
            vec![TestAction::PriorityPicked(Priority::High)]
        );
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_open_highlights_current_value() {
        let menu = menu();
        let mut dropdown = Dropdown::default();
        collect(dropdown.handle_event(&key_event("space"), props(&menu, Some(&Priority::High))));
        assert_eq!(dropdown.highlighted(), Some(3));
    }

    #[test]
    fn test_escape_closes_without_selecting() {
        let menu = menu();
        let mut dropdown = Dropdown::default();
        collect(dropdown.handle_event(&key_event("enter"), props(&menu, None)));
        assert!(collect(dropdown.handle_event(&key_event("esc"), props(&menu, None))).is_empty());
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_mouse_selects_and_ignores_disabled() {
        let menu = menu();
        let mut dropdown = Dropdown::default();
        let mut render = RenderHarness::new(30, 12);
        rendered(&mut dropdown, &menu, &mut render);

        // Click on the trigger opens
        collect(dropdown.handle_event(&mouse_down(2, 1), props(&menu, None)));
        assert!(dropdown.is_open());
        let output = rendered(&mut dropdown, &menu, &mut render);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[4].contains("Priority"));
        assert!(lines[5].contains("Low"));
        assert!(lines[7].contains("High"));

        // Disabled Medium row
        assert!(collect(dropdown.handle_event(&mouse_down(3, 6), props(&menu, None))).is_empty());
        assert!(dropdown.is_open());

        collect(dropdown.handle_event(&mouse_move(3, 7), props(&menu, None)));
        assert_eq!(dropdown.highlighted(), Some(3));
        assert_eq!(
            collect(dropdown.handle_event(&mouse_down(3, 5), props(&menu, None))),
            vec![TestAction::PriorityPicked(Priority::Low)]
        );
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_click_away_and_trigger_toggle_close() {
        let menu = menu();
        let mut dropdown = Dropdown::default();
        let mut render = RenderHarness::new(30, 12);
        rendered(&mut dropdown, &menu, &mut render);

        collect(dropdown.handle_event(&mouse_down(2, 1), props(&menu, None)));
        collect(dropdown.handle_event(&mouse_down(2, 1), props(&menu, None)));
        assert!(!dropdown.is_open());

        collect(dropdown.handle_event(&mouse_down(2, 1), props(&menu, None)));
        rendered(&mut dropdown, &menu, &mut render);
        assert!(collect(dropdown.handle_event(&mouse_down(28, 11), props(&menu, None))).is_empty());
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_closed_render_shows_placeholder() {
        let menu = menu();
        let mut dropdown = Dropdown::default();
        let mut render = RenderHarness::new(20, 3);
        let output = render.render_to_string_plain(|frame| {
            dropdown.render(frame, frame.area(), props(&menu, Some(&Priority::Low)));
        });
        assert!(output.lines().nth(1).unwrap().contains("Low"));
        let output = rendered(&mut dropdown, &menu, &mut render);
        assert!(output.lines().nth(1).unwrap().contains("Choose"));
    }

    #[test]
    fn test_long_menu_scrolls_with_highlight() {
        let items = (0..12).map(|i| MenuItem::new(format!("Item {i}"), i)).collect();
        let menu = Menu::new(items).unwrap();
        let mut dropdown = Dropdown::default();
        let props = || DropdownProps {
            menu: &menu,
            selected: None,
            placeholder: "",
            label: None,
            is_focused: true,
            color: UIColor::Neutral,
            container: None,
            on_select: |i: i32| i,
        };
        collect(dropdown.handle_event(&key_event("enter"), props()));
        for _ in 0..10 {
            collect(dropdown.handle_event(&key_event("down"), props()));
        }
        assert_eq!(dropdown.highlighted(), Some(10));
        assert_eq!(dropdown.scroll_offset, 3);
        collect(dropdown.handle_event(&key_event("home"), props()));
        assert_eq!(dropdown.scroll_offset, 0);
    }
}
