//! Single-line text field with label and helper text

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};
use tui_kit_core::{border_style, contains, Component, EventKind, UIColor};

use crate::label::{HelperText, HelperTextProps, Label, LabelProps};

pub struct TextFieldProps<'a, A> {
    pub value: &'a str,
    /// Shown dimmed while `value` is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub label: Option<&'a str>,
    pub helper_text: Option<&'a str>,
    /// Replaces the helper text and turns the border red
    pub error: Option<&'a str>,
    pub color: UIColor,
    /// `None` makes the field read-only
    pub on_change: Option<fn(String) -> A>,
    pub on_submit: Option<fn(String) -> A>,
}

impl<'a, A> TextFieldProps<'a, A> {
    /// Read-only field showing `value`
    pub fn read_only(value: &'a str, placeholder: &'a str, is_focused: bool) -> Self {
        Self {
            value,
            placeholder,
            is_focused,
            label: None,
            helper_text: None,
            error: None,
            color: UIColor::default(),
            on_change: None,
            on_submit: None,
        }
    }
}

/// Editable (or read-only) bordered input
///
/// Emits `on_change` with the full new value on every edit and `on_submit`
/// on Enter. The cursor is a byte index kept on char boundaries.
#[derive(Debug, Default)]
pub struct TextField {
    cursor: usize,
    input_area: Rect,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bordered input box from the last render
    pub fn input_area(&self) -> Rect {
        self.input_area
    }

    /// Rows needed for the given decorations
    pub fn height(has_label: bool, has_helper: bool) -> u16 {
        3 + u16::from(has_label) + u16::from(has_helper)
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let next = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }

    /// Cursor column inside the box
    fn cursor_column(&self, value: &str) -> u16 {
        let chars = value[..self.cursor].chars().count();
        u16::try_from(chars).unwrap_or(u16::MAX)
    }
}

impl<A> Component<A> for TextField {
    type Props<'a> = TextFieldProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        self.clamp_cursor(props.value);

        if let EventKind::PointerDown { column, row } = *event {
            if contains(self.input_area, column, row) {
                let offset = usize::from(column.saturating_sub(self.input_area.x + 1));
                self.cursor = props
                    .value
                    .char_indices()
                    .nth(offset)
                    .map_or(props.value.len(), |(i, _)| i);
            }
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        if !props.is_focused {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => props.on_change.map(|on_change| {
                    self.cursor = 0;
                    on_change(String::new())
                }),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Left => {
                self.move_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => props.on_submit.map(|f| f(props.value.to_string())),
            KeyCode::Char(c) => props.on_change.map(|f| f(self.insert(props.value, c))),
            KeyCode::Backspace => props
                .on_change
                .and_then(|on_change| self.backspace(props.value).map(on_change)),
            KeyCode::Delete => props
                .on_change
                .and_then(|on_change| self.delete(props.value).map(on_change)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);
        let mut rest = area;

        if let Some(text) = props.label {
            let label_area = Rect { height: 1, ..rest };
            Component::<A>::render(
                &mut Label,
                frame,
                label_area,
                LabelProps {
                    text,
                    required: false,
                    is_focused: props.is_focused,
                    color: props.color,
                },
            );
            rest.y = rest.y.saturating_add(1);
            rest.height = rest.height.saturating_sub(1);
        }

        let input_area = Rect {
            height: rest.height.min(3),
            ..rest
        };
        self.input_area = input_area;

        let border = match props.error {
            Some(_) => border_style(UIColor::Danger, true),
            None => border_style(props.color, props.is_focused),
        };
        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::new().fg(Color::DarkGray))
        } else {
            (props.value, Style::new())
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(style)
                .block(Block::bordered().border_style(border)),
            input_area,
        );

        let helper = props.error.or(props.helper_text);
        if let Some(text) = helper {
            let y = input_area.bottom();
            if y < rest.bottom() {
                Component::<A>::render(
                    &mut HelperText,
                    frame,
                    Rect { y, height: 1, ..rest },
                    HelperTextProps {
                        text,
                        error: props.error.is_some(),
                    },
                );
            }
        }

        if props.is_focused && props.on_change.is_some() {
            let x = input_area.x + 1 + self.cursor_column(props.value);
            if x < input_area.right().saturating_sub(1) {
                frame.set_cursor_position((x, input_area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_kit_core::testing::{collect, key_event, mouse_down, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
        Submit(String),
    }

    fn editable(value: &str) -> TextFieldProps<'_, TestAction> {
        TextFieldProps {
            on_change: Some(TestAction::Change),
            on_submit: Some(TestAction::Submit),
            ..TextFieldProps::read_only(value, "", true)
        }
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut field = TextField::new();
        field.cursor = 2;
        assert_eq!(
            collect(field.handle_event(&key_event("x"), editable("abcd"))),
            vec![TestAction::Change("abxcd".into())]
        );
        assert_eq!(field.cursor, 3);
    }

    #[test]
    fn test_backspace_and_delete_respect_utf8() {
        let mut field = TextField::new();
        field.cursor = "dé".len();
        assert_eq!(
            collect(field.handle_event(&key_event("backspace"), editable("déjà"))),
            vec![TestAction::Change("djà".into())]
        );
        assert_eq!(field.cursor, 1);
        assert_eq!(
            collect(field.handle_event(&key_event("delete"), editable("déjà"))),
            vec![TestAction::Change("djà".into())]
        );
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut field = TextField::new();
        field.cursor = 3;
        assert!(collect(field.handle_event(&key_event("ctrl+a"), editable("abc"))).is_empty());
        assert_eq!(field.cursor, 0);
        collect(field.handle_event(&key_event("ctrl+e"), editable("abc")));
        assert_eq!(field.cursor, 3);
        assert_eq!(
            collect(field.handle_event(&key_event("ctrl+u"), editable("abc"))),
            vec![TestAction::Change(String::new())]
        );
    }

    #[test]
    fn test_submit() {
        let mut field = TextField::new();
        assert_eq!(
            collect(field.handle_event(&key_event("enter"), editable("hello"))),
            vec![TestAction::Submit("hello".into())]
        );
    }

    #[test]
    fn test_read_only_emits_nothing() {
        let mut field = TextField::new();
        let props = || TextFieldProps::<TestAction>::read_only("2025-01-10", "", true);
        assert!(collect(field.handle_event(&key_event("x"), props())).is_empty());
        assert!(collect(field.handle_event(&key_event("backspace"), props())).is_empty());
        assert!(collect(field.handle_event(&key_event("ctrl+u"), props())).is_empty());
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut field = TextField::new();
        let props = TextFieldProps {
            is_focused: false,
            ..editable("")
        };
        assert!(collect(field.handle_event(&key_event("a"), props)).is_empty());
    }

    #[test]
    fn test_click_moves_cursor() {
        let mut field = TextField::new();
        field.input_area = Rect::new(0, 0, 20, 3);
        collect(field.handle_event(&mouse_down(3, 1), editable("hello")));
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn test_render_label_placeholder_and_error() {
        let mut render = RenderHarness::new(20, 5);
        let mut field = TextField::new();
        let output = render.render_to_string_plain(|frame| {
            let props = TextFieldProps {
                label: Some("Due"),
                helper_text: Some("pick a day"),
                error: Some("required"),
                ..TextFieldProps::<()>::read_only("", "YYYY-MM-DD", false)
            };
            field.render(frame, frame.area(), props);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Due");
        assert!(lines[2].contains("YYYY-MM-DD"));
        assert_eq!(lines[4], "required");
        assert_eq!(field.input_area(), Rect::new(0, 1, 20, 3));
    }
}
