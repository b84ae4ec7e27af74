//! Field label and helper text

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_kit_core::{Component, UIColor};

pub struct LabelProps<'a> {
    pub text: &'a str,
    /// Appends a `*` marker
    pub required: bool,
    pub is_focused: bool,
    pub color: UIColor,
}

/// Single-line caption shown above a field
#[derive(Debug, Default)]
pub struct Label;

impl<A> Component<A> for Label {
    type Props<'a> = LabelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let style = if props.is_focused {
            Style::new()
                .fg(props.color.tokens().accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![Span::styled(props.text, style)];
        if props.required {
            spans.push(Span::styled(
                " *",
                Style::new().fg(UIColor::Danger.tokens().accent),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

pub struct HelperTextProps<'a> {
    pub text: &'a str,
    /// Error text uses the danger palette
    pub error: bool,
}

/// Hint or validation message shown below a field
#[derive(Debug, Default)]
pub struct HelperText;

impl HelperText {
    pub fn style(error: bool) -> Style {
        if error {
            Style::new().fg(UIColor::Danger.tokens().accent)
        } else {
            Style::new().fg(Color::DarkGray)
        }
    }
}

impl<A> Component<A> for HelperText {
    type Props<'a> = HelperTextProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(
            Paragraph::new(props.text).style(Self::style(props.error)),
            area,
        );
    }
}
