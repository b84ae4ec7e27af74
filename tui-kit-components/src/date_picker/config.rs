use serde::{Deserialize, Serialize};
use tui_kit_core::{KitError, Keymap, UIColor};

use super::format;
use super::keymap::{default_keymap, PickerCommand};
use super::types::PickerMode;
use crate::placement::Placement;

/// Picker configuration; every field has a default
///
/// ```json
/// { "mode": "date_range", "locale": "fr-FR", "timezone": "Europe/Paris",
///   "placement": "bottom-end", "keymap": { "zoom_out": ["ctrl+z"] } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePickerConfig {
    pub mode: PickerMode,
    pub locale: String,
    /// IANA name; `None` shows UTC wall time
    pub timezone: Option<String>,
    /// Extra shift added on top of the timezone offset
    pub ms_offset: i64,
    pub min_date: Option<i64>,
    pub max_date: Option<i64>,
    pub placement: Placement,
    pub enable_portal: bool,
    /// strftime pattern; defaults per mode
    pub format: Option<String>,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub helper_text: Option<String>,
    pub color: UIColor,
    /// Overrides merged over the default bindings
    pub keymap: Keymap<PickerCommand>,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            mode: PickerMode::default(),
            locale: "en_US".to_string(),
            timezone: None,
            ms_offset: 0,
            min_date: None,
            max_date: None,
            placement: Placement::default(),
            enable_portal: false,
            format: None,
            placeholder: None,
            label: None,
            helper_text: None,
            color: UIColor::default(),
            keymap: Keymap::new(),
        }
    }
}

impl DatePickerConfig {
    pub fn new(mode: PickerMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, KitError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check locale, timezone and key bindings
    pub fn validate(&self) -> Result<(), KitError> {
        format::parse_locale(&self.locale)?;
        if let Some(tz) = &self.timezone {
            format::parse_timezone(tz)?;
        }
        self.keymap().validate()
    }

    pub fn pattern(&self) -> &str {
        self.format
            .as_deref()
            .unwrap_or_else(|| self.mode.default_pattern())
    }

    /// Default bindings with the configured overrides applied
    pub fn keymap(&self) -> Keymap<PickerCommand> {
        Keymap::merge(default_keymap(), self.keymap.clone())
    }
}
