//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to a store
///
/// Components never mutate application state themselves. They turn events into
/// actions, and actions flow into a reducer. Actions should be:
/// - Clone: they may be logged, replayed, or sent to several handlers
/// - Debug: for logging
/// - Send + 'static: so they can cross the event poller's channel
///
/// Use `#[derive(Action)]` from `tui-kit-macros` to implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name used by logging middleware
    fn name(&self) -> &'static str;

    /// Optional grouping (e.g. `"picker"`, `"menu"`) used to filter logs and tests
    fn category(&self) -> Option<&'static str> {
        None
    }
}
