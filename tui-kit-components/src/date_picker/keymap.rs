use tui_kit_core::{Command, Keymap};

/// Commands the picker answers while focused or open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerCommand {
    Up,
    Down,
    Left,
    Right,
    PrevPage,
    NextPage,
    ZoomOut,
    ToggleTime,
    Select,
    Confirm,
    Close,
    Today,
    /// Only consulted while the panel is closed
    Open,
}

impl Command for PickerCommand {
    fn name(&self) -> &'static str {
        match self {
            PickerCommand::Up => "up",
            PickerCommand::Down => "down",
            PickerCommand::Left => "left",
            PickerCommand::Right => "right",
            PickerCommand::PrevPage => "prev_page",
            PickerCommand::NextPage => "next_page",
            PickerCommand::ZoomOut => "zoom_out",
            PickerCommand::ToggleTime => "toggle_time",
            PickerCommand::Select => "select",
            PickerCommand::Confirm => "confirm",
            PickerCommand::Close => "close",
            PickerCommand::Today => "today",
            PickerCommand::Open => "open",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.name() == name)
    }

    fn all() -> &'static [Self] {
        &[
            PickerCommand::Up,
            PickerCommand::Down,
            PickerCommand::Left,
            PickerCommand::Right,
            PickerCommand::PrevPage,
            PickerCommand::NextPage,
            PickerCommand::ZoomOut,
            PickerCommand::ToggleTime,
            PickerCommand::Select,
            PickerCommand::Confirm,
            PickerCommand::Close,
            PickerCommand::Today,
            PickerCommand::Open,
        ]
    }
}

pub fn default_keymap() -> Keymap<PickerCommand> {
    let mut keymap = Keymap::new();
    let mut bind = |command, keys: &[&str]| {
        keymap.bind(command, keys.iter().map(|k| k.to_string()).collect());
    };
    bind(PickerCommand::Up, &["up", "k"]);
    bind(PickerCommand::Down, &["down", "j"]);
    bind(PickerCommand::Left, &["left", "h"]);
    bind(PickerCommand::Right, &["right", "l"]);
    bind(PickerCommand::PrevPage, &["pageup", "["]);
    bind(PickerCommand::NextPage, &["pagedown", "]"]);
    bind(PickerCommand::ZoomOut, &["v"]);
    bind(PickerCommand::ToggleTime, &["t"]);
    bind(PickerCommand::Select, &["enter", "space"]);
    bind(PickerCommand::Confirm, &["c"]);
    bind(PickerCommand::Close, &["esc"]);
    bind(PickerCommand::Today, &["."]);
    bind(PickerCommand::Open, &["enter", "space", "down"]);
    keymap
}
