//! Showcase - one form with every tui-kit component
//!
//! - Name: text field
//! - Theme: dropdown menu with a header and a disabled entry
//! - Due: controlled date picker (mode, locale, timezone from CLI or config)
//! - Stay: controlled date-range picker
//! - Reminder: uncontrolled time picker
//! - Save: button
//!
//! Keys: Tab/Shift+Tab = move focus, Enter/Space/Down = open picker or menu,
//! Esc = close panel (or quit), Ctrl+C = quit. Mouse works everywhere.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use chrono::Locale;
use tui_kit::date_picker::format;
use tui_kit::{
    contains, process_raw_event, spawn_event_poller, Action, Button, ButtonProps, ButtonVariant,
    Component, Controlled, ControlledPicker, DatePicker, DatePickerConfig, DatePickerProps,
    Dropdown, DropdownProps, EventKind, ExternalValue, KitError, LoggingMiddleware, Menu,
    MenuItem, PickerMode, PickerValue, Placement, Rect, RawEvent, StoreWithMiddleware, TextField,
    TextFieldProps, UIColor, Uncontrolled, UncontrolledPicker,
};

#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Try out the tui-kit components")]
struct Args {
    /// JSON file with a date picker configuration for the Due field
    #[arg(long)]
    config: Option<PathBuf>,

    /// Picker mode of the Due field
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Locale tag such as en-US or fr_FR
    #[arg(long)]
    locale: Option<String>,

    /// IANA timezone such as Europe/Paris
    #[arg(long)]
    timezone: Option<String>,

    #[arg(long, value_enum)]
    placement: Option<PlacementArg>,

    /// Draw floating panels as portal layers on top of the frame
    #[arg(long)]
    portal: bool,

    /// Write tracing output here (stdout belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Also log each action before it reaches the reducer
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Date,
    Time,
    DateTime,
    DateRange,
}

impl From<ModeArg> for PickerMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Date => PickerMode::Date,
            ModeArg::Time => PickerMode::Time,
            ModeArg::DateTime => PickerMode::DateTime,
            ModeArg::DateRange => PickerMode::DateRange,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlacementArg {
    BottomStart,
    BottomEnd,
}

impl From<PlacementArg> for Placement {
    fn from(placement: PlacementArg) -> Self {
        match placement {
            PlacementArg::BottomStart => Placement::BottomStart,
            PlacementArg::BottomEnd => Placement::BottomEnd,
        }
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Theme {
    Light,
    Dark,
    Solarized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Name,
    Theme,
    Due,
    Stay,
    Reminder,
    Save,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Name,
        Focus::Theme,
        Focus::Due,
        Focus::Stay,
        Focus::Reminder,
        Focus::Save,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn step(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        Self::ORDER[(self.index() as isize + delta).rem_euclid(len) as usize]
    }
}

#[derive(Default)]
struct AppState {
    name: String,
    theme: Option<Theme>,
    due: Option<i64>,
    /// Used when the Due picker runs in date-range mode
    due_range: (Option<i64>, Option<i64>),
    stay: (Option<i64>, Option<i64>),
    focus: Focus,
    status: String,
}

// ============================================================================
// Actions
// ============================================================================

#[derive(Clone, Debug, Action)]
#[action(infer_categories)]
enum AppAction {
    NameChange(String),
    ThemeSelect(Theme),
    DueDateSet(Option<i64>),
    DueRangeSet(Option<i64>, Option<i64>),
    StayRangeSet(Option<i64>, Option<i64>),
    FocusMove(isize),
    FocusSet(usize),
    FormSubmit,
    Quit,
}

fn reducer(state: &mut AppState, action: AppAction) -> bool {
    match action {
        AppAction::NameChange(name) => {
            state.name = name;
            true
        }
        AppAction::ThemeSelect(theme) => {
            state.theme = Some(theme);
            true
        }
        AppAction::DueDateSet(due) => {
            state.due = due;
            true
        }
        AppAction::DueRangeSet(start, end) => {
            state.due_range = (start, end);
            true
        }
        AppAction::StayRangeSet(start, end) => {
            state.stay = (start, end);
            true
        }
        AppAction::FocusMove(delta) => {
            state.focus = state.focus.step(delta);
            true
        }
        AppAction::FocusSet(index) => {
            let focus = Focus::ORDER.get(index).copied().unwrap_or_default();
            let changed = state.focus != focus;
            state.focus = focus;
            changed
        }
        AppAction::FormSubmit => {
            state.status = format!(
                "saved: name={:?} theme={:?} due={:?} due_range={:?} stay={:?}",
                state.name, state.theme, state.due, state.due_range, state.stay
            );
            true
        }
        AppAction::Quit => false,
    }
}

// ============================================================================
// Components
// ============================================================================

struct Widgets {
    name: TextField,
    theme: Dropdown<Theme>,
    theme_menu: Menu<Theme>,
    due: ControlledPicker<AppAction>,
    stay: ControlledPicker<AppAction>,
    reminder: UncontrolledPicker<AppAction>,
    save: Button,
    /// Field areas from the last draw, in `Focus::ORDER`
    areas: [Rect; 6],
    locale: Locale,
}

/// Config file first, then CLI flags on top
fn load_config(args: &Args) -> io::Result<DatePickerConfig> {
    let mut due_config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            DatePickerConfig::from_json(&json).map_err(io::Error::other)?
        }
        None => DatePickerConfig::default(),
    };
    if let Some(mode) = args.mode {
        due_config.mode = mode.into();
    }
    if let Some(locale) = &args.locale {
        due_config.locale.clone_from(locale);
    }
    if args.timezone.is_some() {
        due_config.timezone.clone_from(&args.timezone);
    }
    if let Some(placement) = args.placement {
        due_config.placement = placement.into();
    }
    due_config.enable_portal |= args.portal;
    due_config.label.get_or_insert_with(|| "Due".to_string());
    due_config
        .helper_text
        .get_or_insert_with(|| "v: months/years  t: time  .: today".to_string());
    Ok(due_config)
}

impl Widgets {
    fn new(due_config: DatePickerConfig, state: &AppState) -> Result<Self, KitError> {
        let stay_config = DatePickerConfig {
            mode: PickerMode::DateRange,
            label: Some("Stay".to_string()),
            color: UIColor::Success,
            ..due_config.clone()
        };
        let reminder_config = DatePickerConfig {
            mode: PickerMode::Time,
            label: Some("Reminder".to_string()),
            color: UIColor::Warning,
            format: None,
            ..due_config.clone()
        };

        let placement = due_config.placement;
        Ok(Self {
            name: TextField::new(),
            theme: Dropdown::new(placement, due_config.enable_portal),
            theme_menu: Menu::new(vec![
                MenuItem::header("Built-in"),
                MenuItem::new("Light", Theme::Light),
                MenuItem::new("Dark", Theme::Dark),
                MenuItem::header("Community"),
                MenuItem::new("Solarized", Theme::Solarized).disabled(),
            ])?,
            due: DatePicker::new(
                &due_config,
                Controlled::new(AppAction::DueDateSet, AppAction::DueRangeSet),
                Self::due_external(state),
            )?,
            stay: DatePicker::new(
                &stay_config,
                Controlled::range(AppAction::StayRangeSet),
                ExternalValue::range(state.stay.0, state.stay.1),
            )?,
            reminder: DatePicker::new(&reminder_config, Uncontrolled, ExternalValue::default())?,
            save: Button::new(),
            areas: [Rect::default(); 6],
            locale: format::parse_locale(&due_config.locale)?,
        })
    }

    fn any_open(&self) -> bool {
        self.theme.is_open() || self.due.is_open() || self.stay.is_open() || self.reminder.is_open()
    }

    fn due_external(state: &AppState) -> ExternalValue {
        ExternalValue {
            date: state.due,
            date_range: state.due_range,
        }
    }

    fn due_props(state: &AppState, focus: Focus) -> DatePickerProps<'static> {
        DatePickerProps {
            external: Some(Self::due_external(state)),
            is_focused: focus == Focus::Due,
            ..DatePickerProps::default()
        }
    }

    fn stay_props(state: &AppState, focus: Focus) -> DatePickerProps<'static> {
        DatePickerProps {
            external: Some(ExternalValue::range(state.stay.0, state.stay.1)),
            is_focused: focus == Focus::Stay,
            ..DatePickerProps::default()
        }
    }

    /// Route one event; keys go to the focused field only
    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        let focus = state.focus;
        let is_key = matches!(event, EventKind::Key(_));
        let routed = |target: Focus| !is_key || focus == target;
        let mut actions = Vec::new();

        if let EventKind::PointerDown { column, row } = *event {
            if let Some(index) = self.areas.iter().position(|a| contains(*a, column, row)) {
                actions.push(AppAction::FocusSet(index));
            }
        }

        if routed(Focus::Name) {
            let props = TextFieldProps {
                label: Some("Name"),
                on_change: Some(AppAction::NameChange),
                ..TextFieldProps::read_only(&state.name, "Your name", focus == Focus::Name)
            };
            actions.extend(self.name.handle_event(event, props));
        }
        if routed(Focus::Theme) {
            let props = DropdownProps {
                menu: &self.theme_menu,
                selected: state.theme.as_ref(),
                placeholder: "Pick a theme",
                label: Some("Theme"),
                is_focused: focus == Focus::Theme,
                color: UIColor::Secondary,
                container: None,
                on_select: AppAction::ThemeSelect,
            };
            actions.extend(self.theme.handle_event(event, props));
        }
        if routed(Focus::Due) {
            actions.extend(self.due.handle_event(event, Self::due_props(state, focus)));
        }
        if routed(Focus::Stay) {
            actions.extend(self.stay.handle_event(event, Self::stay_props(state, focus)));
        }
        if routed(Focus::Reminder) {
            let props = DatePickerProps {
                is_focused: focus == Focus::Reminder,
                ..DatePickerProps::default()
            };
            actions.extend(self.reminder.handle_event(event, props));
        }
        if routed(Focus::Save) {
            let props = ButtonProps {
                label: "Save",
                color: UIColor::Primary,
                variant: ButtonVariant::Filled,
                disabled: state.name.is_empty(),
                is_focused: focus == Focus::Save,
                on_press: || AppAction::FormSubmit,
            };
            actions.extend(self.save.handle_event(event, props));
        }
        actions
    }

    fn render(&mut self, frame: &mut ratatui::Frame, state: &AppState) {
        let focus = state.focus;
        let [title, name, theme, due, stay, reminder, save, status, help] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(frame.area().inner(ratatui::layout::Margin::new(2, 1)));
        let column = |area: Rect| Rect {
            width: area.width.min(36),
            ..area
        };
        self.areas = [name, theme, due, stay, reminder, save].map(column);

        frame.render_widget(
            Paragraph::new("tui-kit showcase").style(Style::new().add_modifier(Modifier::BOLD)),
            title,
        );

        // Bottom-up so inline panels cover the fields below them
        self.save.render(
            frame,
            Rect {
                width: 10,
                ..self.areas[5]
            },
            ButtonProps {
                label: "Save",
                color: UIColor::Primary,
                variant: ButtonVariant::Filled,
                disabled: state.name.is_empty(),
                is_focused: focus == Focus::Save,
                on_press: || AppAction::FormSubmit,
            },
        );
        self.reminder.render(
            frame,
            self.areas[4],
            DatePickerProps {
                is_focused: focus == Focus::Reminder,
                ..DatePickerProps::default()
            },
        );
        self.stay
            .render(frame, self.areas[3], Self::stay_props(state, focus));
        self.due
            .render(frame, self.areas[2], Self::due_props(state, focus));
        self.theme.render(
            frame,
            self.areas[1],
            DropdownProps {
                menu: &self.theme_menu,
                selected: state.theme.as_ref(),
                placeholder: "Pick a theme",
                label: Some("Theme"),
                is_focused: focus == Focus::Theme,
                color: UIColor::Secondary,
                container: None,
                on_select: AppAction::ThemeSelect,
            },
        );
        self.name.render(
            frame,
            self.areas[0],
            TextFieldProps {
                label: Some("Name"),
                on_change: Some(AppAction::NameChange),
                ..TextFieldProps::read_only(&state.name, "Your name", focus == Focus::Name)
            },
        );

        frame.render_widget(
            Paragraph::new(self.summary(state)).style(Style::new().fg(Color::Gray)),
            status,
        );
        frame.render_widget(
            Paragraph::new("Tab/Shift+Tab focus  Enter open  Esc close/quit  Ctrl+C quit")
                .style(Style::new().fg(Color::DarkGray)),
            help,
        );

        // Portal layers go on top of everything
        self.theme.render_overlay(frame);
        self.due.render_overlay(frame);
        self.stay.render_overlay(frame);
        self.reminder.render_overlay(frame);
    }

    fn summary(&self, state: &AppState) -> String {
        if !state.status.is_empty() {
            return state.status.clone();
        }
        let locale = self.locale;
        let stamp = |ms: Option<i64>| {
            ms.map_or("-".to_string(), |ms| {
                format::format_timestamp(ms as f64, "%Y-%m-%d %H:%M UTC", locale)
            })
        };
        let reminder = match self.reminder.value() {
            PickerValue::Date(ms) => stamp(ms),
            PickerValue::Range(start, _) => stamp(start),
        };
        format!(
            "due {}  stay {} .. {}  reminder {}",
            stamp(state.due),
            stamp(state.stay.0),
            stamp(state.stay.1),
            reminder
        )
    }
}

// ============================================================================
// Main
// ============================================================================

fn init_tracing(path: &PathBuf) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let state = AppState::default();
    let widgets = Widgets::new(load_config(&args)?, &state).map_err(io::Error::other)?;
    tracing::info!(?args, "showcase starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let middleware = if args.verbose {
        LoggingMiddleware::verbose("showcase")
    } else {
        LoggingMiddleware::new("showcase")
    };
    let result = run_app(&mut terminal, state, widgets, middleware).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    tui_kit::PortalRoot::global().teardown();

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: AppState,
    mut widgets: Widgets,
    middleware: LoggingMiddleware,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let mut store = StoreWithMiddleware::new(state, reducer, middleware);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| widgets.render(frame, store.state()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                if let EventKind::Key(key) = &event {
                    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                    let idle = !widgets.any_open();
                    let global = match key.code {
                        KeyCode::Char('c') if ctrl => Some(AppAction::Quit),
                        KeyCode::Esc if idle => Some(AppAction::Quit),
                        KeyCode::Tab if idle => Some(AppAction::FocusMove(1)),
                        KeyCode::BackTab if idle => Some(AppAction::FocusMove(-1)),
                        _ => None,
                    };
                    if let Some(action) = global {
                        let _ = action_tx.send(action);
                        continue;
                    }
                }
                for action in widgets.handle_event(&event, store.state()) {
                    let _ = action_tx.send(action);
                }
                // Open/close and cursor moves live in the widgets
                should_render = true;
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, AppAction::Quit) {
                    break;
                }
                should_render |= store.dispatch(action);
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}
