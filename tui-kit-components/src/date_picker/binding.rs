//! Controlled and uncontrolled value ownership
//!
//! A picker either mirrors a value owned by the application (controlled) or
//! owns its value outright (uncontrolled). The choice is a type parameter of
//! the picker, fixed when it is built.

use super::types::PickerValue;

/// Value supplied by the application, raw UTC milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExternalValue {
    pub date: Option<i64>,
    pub date_range: (Option<i64>, Option<i64>),
}

impl ExternalValue {
    pub fn date(date: Option<i64>) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    pub fn range(start: Option<i64>, end: Option<i64>) -> Self {
        Self {
            date_range: (start, end),
            ..Self::default()
        }
    }
}

/// What happens to a value the user just committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit<A> {
    /// Hand it to the application; the picker waits for the new external value
    Emit(A),
    /// Store it as the picker's own value
    Accept,
    /// Nobody listens for this kind of value
    Discard,
}

pub trait ValueBinding<A> {
    fn is_controlled(&self) -> bool;

    /// Record the latest external value; true if it differs from the last one
    fn observe(&mut self, external: &ExternalValue) -> bool;

    fn commit(&self, value: PickerValue) -> Commit<A>;
}

/// Application-owned value with change callbacks
#[derive(Debug, Clone)]
pub struct Controlled<A> {
    on_change: Option<fn(Option<i64>) -> A>,
    on_range_change: Option<fn(Option<i64>, Option<i64>) -> A>,
    last_seen: Option<ExternalValue>,
}

impl<A> Controlled<A> {
    pub fn new(
        on_change: fn(Option<i64>) -> A,
        on_range_change: fn(Option<i64>, Option<i64>) -> A,
    ) -> Self {
        Self {
            on_change: Some(on_change),
            on_range_change: Some(on_range_change),
            last_seen: None,
        }
    }

    /// Single-date pickers only
    pub fn date(on_change: fn(Option<i64>) -> A) -> Self {
        Self {
            on_change: Some(on_change),
            on_range_change: None,
            last_seen: None,
        }
    }

    /// Range pickers only
    pub fn range(on_range_change: fn(Option<i64>, Option<i64>) -> A) -> Self {
        Self {
            on_change: None,
            on_range_change: Some(on_range_change),
            last_seen: None,
        }
    }
}

impl<A> ValueBinding<A> for Controlled<A> {
    fn is_controlled(&self) -> bool {
        true
    }

    fn observe(&mut self, external: &ExternalValue) -> bool {
        if self.last_seen.as_ref() == Some(external) {
            return false;
        }
        self.last_seen = Some(*external);
        true
    }

    fn commit(&self, value: PickerValue) -> Commit<A> {
        let emitted = match value {
            PickerValue::Date(date) => self.on_change.map(|f| f(date)),
            PickerValue::Range(start, end) => self.on_range_change.map(|f| f(start, end)),
        };
        emitted.map_or(Commit::Discard, Commit::Emit)
    }
}

/// Picker-owned value; nothing is emitted
#[derive(Debug, Clone, Copy, Default)]
pub struct Uncontrolled;

impl<A> ValueBinding<A> for Uncontrolled {
    fn is_controlled(&self) -> bool {
        false
    }

    fn observe(&mut self, _external: &ExternalValue) -> bool {
        false
    }

    fn commit(&self, _value: PickerValue) -> Commit<A> {
        Commit::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Msg {
        Due(Option<i64>),
        Stay(Option<i64>, Option<i64>),
    }

    #[test]
    fn test_controlled_emits_through_callbacks() {
        let binding = Controlled::new(Msg::Due, Msg::Stay);
        assert!(ValueBinding::<Msg>::is_controlled(&binding));
        assert_eq!(
            binding.commit(PickerValue::Date(Some(5))),
            Commit::Emit(Msg::Due(Some(5)))
        );
        assert_eq!(
            binding.commit(PickerValue::Range(Some(1), Some(2))),
            Commit::Emit(Msg::Stay(Some(1), Some(2)))
        );
    }

    #[test]
    fn test_controlled_without_callback_discards() {
        let binding = Controlled::date(Msg::Due);
        assert_eq!(
            binding.commit(PickerValue::Range(Some(1), Some(2))),
            Commit::Discard
        );
    }

    #[test]
    fn test_observe_reports_changes_only() {
        let mut binding = Controlled::date(Msg::Due);
        let value = ExternalValue::date(Some(10));
        assert!(binding.observe(&value));
        assert!(!binding.observe(&value));
        assert!(binding.observe(&ExternalValue::date(None)));
    }

    #[test]
    fn test_uncontrolled_accepts() {
        let mut binding = Uncontrolled;
        assert!(!ValueBinding::<Msg>::is_controlled(&binding));
        assert!(!ValueBinding::<Msg>::observe(&mut binding, &ExternalValue::date(Some(1))));
        assert_eq!(
            ValueBinding::<Msg>::commit(&binding, PickerValue::Date(None)),
            Commit::Accept
        );
    }
}
