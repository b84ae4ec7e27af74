//! Push button

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    widgets::{Block, Paragraph},
    Frame,
};
use tui_kit_core::{border_style, contains, control_style, ButtonVariant, Component, EventKind, UIColor};

pub struct ButtonProps<'a, A> {
    pub label: &'a str,
    pub color: UIColor,
    pub variant: ButtonVariant,
    pub disabled: bool,
    pub is_focused: bool,
    pub on_press: fn() -> A,
}

/// Emits `on_press` on Enter/Space while focused or a click on its area
#[derive(Debug, Default)]
pub struct Button {
    area: Rect,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A> Component<A> for Button {
    type Props<'a> = ButtonProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if props.disabled {
            return None;
        }
        let pressed = match event {
            EventKind::Key(key) => {
                props.is_focused && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            }
            EventKind::PointerDown { column, row } => contains(self.area, *column, *row),
            _ => false,
        };
        if pressed {
            tracing::debug!(label = props.label, "button pressed");
        }
        pressed.then(props.on_press)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = area;
        let mut style = control_style(props.color, props.variant, props.disabled);
        if props.is_focused && !props.disabled {
            style = style.add_modifier(match props.variant {
                ButtonVariant::Filled => Modifier::UNDERLINED,
                _ => Modifier::REVERSED,
            });
        }

        let mut paragraph = Paragraph::new(props.label)
            .style(style)
            .alignment(Alignment::Center);
        if props.variant == ButtonVariant::Outlined && area.height >= 3 {
            paragraph = paragraph.block(
                Block::bordered().border_style(border_style(props.color, !props.disabled)),
            );
        }
        frame.render_widget(paragraph, area);
    }
}
