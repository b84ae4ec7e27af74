//! Closed color palette and the style tokens derived from it
//!
//! Every component takes a [`UIColor`] instead of free-form style strings.
//! The mapping to concrete terminal colors is a single exhaustive `match`
//! evaluated in const context, so adding a palette entry is a compile error
//! until every token is defined.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UIColor {
    #[default]
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Neutral,
}

/// Concrete colors for one palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    /// Text drawn on top of `bg`
    pub fg: Color,
    pub bg: Color,
    pub border: Color,
    /// Text color when drawn on the terminal's own background
    pub accent: Color,
}

impl UIColor {
    pub const ALL: [UIColor; 6] = [
        UIColor::Primary,
        UIColor::Secondary,
        UIColor::Success,
        UIColor::Warning,
        UIColor::Danger,
        UIColor::Neutral,
    ];

    pub const fn tokens(self) -> StyleTokens {
        match self {
            UIColor::Primary => StyleTokens {
                fg: Color::Black,
                bg: Color::Cyan,
                border: Color::Cyan,
                accent: Color::Cyan,
            },
            UIColor::Secondary => StyleTokens {
                fg: Color::White,
                bg: Color::Magenta,
                border: Color::Magenta,
                accent: Color::LightMagenta,
            },
            UIColor::Success => StyleTokens {
                fg: Color::Black,
                bg: Color::Green,
                border: Color::Green,
                accent: Color::LightGreen,
            },
            UIColor::Warning => StyleTokens {
                fg: Color::Black,
                bg: Color::Yellow,
                border: Color::Yellow,
                accent: Color::Yellow,
            },
            UIColor::Danger => StyleTokens {
                fg: Color::White,
                bg: Color::Red,
                border: Color::Red,
                accent: Color::LightRed,
            },
            UIColor::Neutral => StyleTokens {
                fg: Color::Black,
                bg: Color::Gray,
                border: Color::DarkGray,
                accent: Color::Gray,
            },
        }
    }
}

/// Button fill styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    #[default]
    Filled,
    Outlined,
    Text,
}

/// Style for a control in the given palette entry and variant
pub const fn control_style(color: UIColor, variant: ButtonVariant, disabled: bool) -> Style {
    if disabled {
        return Style::new().fg(Color::DarkGray);
    }
    let tokens = color.tokens();
    match variant {
        ButtonVariant::Filled => Style::new()
            .fg(tokens.fg)
            .bg(tokens.bg)
            .add_modifier(Modifier::BOLD),
        ButtonVariant::Outlined => Style::new().fg(tokens.accent),
        ButtonVariant::Text => Style::new().fg(tokens.accent),
    }
}

/// Border style for focusable controls
pub const fn border_style(color: UIColor, is_focused: bool) -> Style {
    if is_focused {
        Style::new().fg(color.tokens().border)
    } else {
        Style::new().fg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_distinct_per_color() {
        for (i, a) in UIColor::ALL.iter().enumerate() {
            for b in &UIColor::ALL[i + 1..] {
                assert_ne!(a.tokens(), b.tokens(), "{a:?} and {b:?} share tokens");
            }
        }
    }

    #[test]
    fn test_disabled_overrides_palette() {
        let style = control_style(UIColor::Danger, ButtonVariant::Filled, true);
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert_eq!(style.bg, None);
    }

    #[test]
    fn test_filled_uses_background() {
        let style = control_style(UIColor::Success, ButtonVariant::Filled, false);
        assert_eq!(style.bg, Some(Color::Green));
        let style = control_style(UIColor::Success, ButtonVariant::Outlined, false);
        assert_eq!(style.bg, None);
    }

    #[test]
    fn test_color_deserializes_snake_case() {
        let color: UIColor = serde_json::from_str("\"danger\"").unwrap();
        assert_eq!(color, UIColor::Danger);
    }
}
