//! Error type shared by the kit

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    /// A selectable menu entry was declared without a value to emit
    #[error("menu item {index} ({label:?}) is selectable but has no value")]
    MissingItemValue { index: usize, label: String },

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// Timestamp outside the range chrono can represent
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("invalid key binding {binding:?} for {command}")]
    InvalidKeyBinding { command: String, binding: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = KitError> = std::result::Result<T, E>;
