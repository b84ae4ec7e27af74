//! Picker state store bound to a controlled or uncontrolled value

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use tui_kit_core::{EffectStoreWithMiddleware, KitError, LoggingMiddleware};

use super::binding::{Commit, ExternalValue, ValueBinding};
use super::config::DatePickerConfig;
use super::format;
use super::state::{reducer, PickerAction, PickerEffect, PickerState};
use super::types::{DateRange, PickerMode, PickerValue, TimePoint};

/// Owns the picker state and converts commits into application actions
///
/// Values cross this boundary as raw UTC milliseconds; inside they are
/// wall-clock values shifted by `ms_offset + gmt_ms_offset`.
pub struct PickerStore<A, B> {
    store: EffectStoreWithMiddleware<PickerState, PickerAction, PickerEffect, LoggingMiddleware>,
    binding: B,
    timezone: Option<chrono_tz::Tz>,
    pattern: String,
    _action: PhantomData<fn() -> A>,
}

impl<A, B: ValueBinding<A>> PickerStore<A, B> {
    pub fn new(
        config: &DatePickerConfig,
        binding: B,
        initial: ExternalValue,
    ) -> Result<Self, KitError> {
        Self::new_at(config, binding, initial, Utc::now())
    }

    /// Build with an explicit clock reading (tests, replays)
    pub fn new_at(
        config: &DatePickerConfig,
        mut binding: B,
        initial: ExternalValue,
        now: DateTime<Utc>,
    ) -> Result<Self, KitError> {
        let locale = format::parse_locale(&config.locale)?;
        let timezone = config
            .timezone
            .as_deref()
            .map(format::parse_timezone)
            .transpose()?;

        let reference = initial
            .date
            .or(initial.date_range.0)
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(now);
        let gmt_ms_offset = timezone.map_or(0, |tz| format::gmt_offset_ms(tz, reference));

        let offset = config.ms_offset.saturating_add(gmt_ms_offset);
        let today = TimePoint(now.timestamp_millis())
            .shift(offset)
            .date()
            .unwrap_or_else(|| now.date_naive());

        let mut state = PickerState::new(config.mode, locale, today);
        state.ms_offset = config.ms_offset;
        state.gmt_ms_offset = gmt_ms_offset;
        state.min_date = config.min_date.map(|raw| state.to_wall(raw));
        state.max_date = config.max_date.map(|raw| state.to_wall(raw));
        let date = initial.date.map(|raw| state.to_wall(raw));
        let range = wall_range(&state, initial.date_range);
        state.committed_date = date;
        state.committed_range = range;
        state.inner_date = date;
        state.inner_date_range = range;
        binding.observe(&initial);

        tracing::debug!(
            mode = ?config.mode,
            controlled = binding.is_controlled(),
            gmt_ms_offset,
            ms_offset = config.ms_offset,
            "date picker store created"
        );

        Ok(Self {
            store: EffectStoreWithMiddleware::new(
                state,
                reducer,
                LoggingMiddleware::new("date_picker"),
            ),
            binding,
            timezone,
            pattern: config.pattern().to_string(),
            _action: PhantomData,
        })
    }

    pub fn state(&self) -> &PickerState {
        self.store.state()
    }

    pub fn is_controlled(&self) -> bool {
        self.binding.is_controlled()
    }

    pub fn mode(&self) -> PickerMode {
        self.state().mode
    }

    /// Resynchronize from the application's value (controlled pickers)
    ///
    /// Returns true if the external value changed since the last call.
    /// The zone offset is re-evaluated at the incoming value so values on
    /// either side of a DST change show their own wall clock.
    pub fn sync_external(&mut self, external: &ExternalValue) -> bool {
        if !self.binding.observe(external) {
            return false;
        }
        let mut changed = false;
        let reference = external
            .date
            .or(external.date_range.0)
            .and_then(DateTime::from_timestamp_millis);
        if let (Some(tz), Some(reference)) = (self.timezone, reference) {
            let gmt_ms_offset = format::gmt_offset_ms(tz, reference);
            let ms_offset = self.state().ms_offset;
            changed |= self
                .store
                .dispatch(PickerAction::SetOffsets {
                    ms_offset,
                    gmt_ms_offset,
                })
                .changed;
        }
        let state = self.state();
        let date = external.date.map(|raw| state.to_wall(raw));
        let range = wall_range(state, external.date_range);
        changed |= self
            .store
            .dispatch(PickerAction::SyncValue { date, range })
            .changed;
        changed
    }

    /// Dispatch a picker action; returns the change flag and emitted actions
    pub fn dispatch(&mut self, action: PickerAction) -> (bool, Vec<A>) {
        let result = self.store.dispatch(action);
        let mut changed = result.changed;
        let mut emitted = Vec::new();
        for effect in result.effects {
            let (value, sync) = match effect {
                PickerEffect::CommitDate(date) => (
                    PickerValue::Date(date.map(|t| self.state().to_raw(t))),
                    PickerAction::SyncValue {
                        date,
                        range: self.state().committed_range,
                    },
                ),
                PickerEffect::CommitRange(range) => {
                    let (start, end) = range.to_millis();
                    let raw = |v: Option<i64>| v.map(|ms| self.state().to_raw(TimePoint(ms)));
                    (
                        PickerValue::Range(raw(start), raw(end)),
                        PickerAction::SyncValue {
                            date: self.state().committed_date,
                            range,
                        },
                    )
                }
            };
            tracing::debug!(?value, controlled = self.is_controlled(), "date picker commit");
            match self.binding.commit(value) {
                Commit::Emit(action) => emitted.push(action),
                Commit::Accept => changed |= self.store.dispatch(sync).changed,
                Commit::Discard => {}
            }
        }
        (changed, emitted)
    }

    /// Committed value in raw milliseconds
    pub fn value(&self) -> PickerValue {
        let state = self.state();
        match state.mode {
            PickerMode::DateRange => {
                let (start, end) = state.committed_range.to_millis();
                let raw = |v: Option<i64>| v.map(|ms| state.to_raw(TimePoint(ms)));
                PickerValue::Range(raw(start), raw(end))
            }
            _ => PickerValue::Date(state.committed_date.map(|t| state.to_raw(t))),
        }
    }

    pub fn set_inner_date(&mut self, raw: Option<i64>) -> bool {
        let wall = raw.map(|raw| self.state().to_wall(raw));
        self.store.dispatch(PickerAction::SetInnerDate(wall)).changed
    }

    pub fn set_inner_date_range(&mut self, start: Option<i64>, end: Option<i64>) -> bool {
        let range = wall_range(self.state(), (start, end));
        self.store
            .dispatch(PickerAction::SetInnerDateRange(range))
            .changed
    }

    pub fn timezone(&self) -> Option<chrono_tz::Tz> {
        self.timezone
    }

    /// Switch timezone; the offset is re-evaluated at the committed value
    pub fn set_timezone(&mut self, timezone: Option<&str>) -> Result<bool, KitError> {
        let tz = timezone.map(format::parse_timezone).transpose()?;
        self.timezone = tz;
        let state = self.state();
        let reference = state
            .committed_date
            .or(state.committed_range.start)
            .and_then(|wall| DateTime::from_timestamp_millis(state.to_raw(wall)))
            .unwrap_or_else(Utc::now);
        let gmt_ms_offset = tz.map_or(0, |tz| format::gmt_offset_ms(tz, reference));
        let ms_offset = state.ms_offset;
        Ok(self
            .store
            .dispatch(PickerAction::SetOffsets {
                ms_offset,
                gmt_ms_offset,
            })
            .changed)
    }

    /// Trigger text, or `None` when nothing is selected
    pub fn display(&self) -> Option<String> {
        self.state().display(&self.pattern)
    }
}

fn wall_range(state: &PickerState, (start, end): (Option<i64>, Option<i64>)) -> DateRange {
    DateRange::new(
        start.map(|raw| state.to_wall(raw)),
        end.map(|raw| state.to_wall(raw)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_picker::binding::{Controlled, Uncontrolled};
    use crate::date_picker::state::Direction;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Due(Option<i64>),
        Stay(Option<i64>, Option<i64>),
    }

    // 2025-01-15 12:00 UTC
    const NOW_MS: i64 = 1_736_942_400_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(NOW_MS).unwrap()
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn config(mode: PickerMode, timezone: Option<&str>) -> DatePickerConfig {
        DatePickerConfig {
            timezone: timezone.map(str::to_string),
            ..DatePickerConfig::new(mode)
        }
    }

    #[test]
    fn test_round_trip_without_edits() {
        let raw = 1_736_500_000_123;
        let mut store = PickerStore::new_at(
            &config(PickerMode::DateTime, Some("Asia/Kolkata")),
            Controlled::date(Msg::Due),
            ExternalValue::date(Some(raw)),
            now(),
        )
        .unwrap();

        assert_eq!(store.state().gmt_ms_offset, 19_800_000);
        store.dispatch(PickerAction::Open);
        let (_, emitted) = store.dispatch(PickerAction::Confirm);

        assert_eq!(emitted, vec![Msg::Due(Some(raw))]);
        assert_eq!(store.value(), PickerValue::Date(Some(raw)));
    }

    #[test]
    fn test_controlled_waits_for_external_value() {
        let mut store = PickerStore::new_at(
            &config(PickerMode::Date, None),
            Controlled::date(Msg::Due),
            ExternalValue::default(),
            now(),
        )
        .unwrap();
        assert!(store.is_controlled());

        store.dispatch(PickerAction::Open);
        let (_, emitted) = store.dispatch(PickerAction::SelectDay(jan(10)));
        let picked = TimePoint::start_of(jan(10)).millis();
        assert_eq!(emitted, vec![Msg::Due(Some(picked))]);
        assert_eq!(store.value(), PickerValue::Date(None));

        assert!(store.sync_external(&ExternalValue::date(Some(picked))));
        assert!(!store.sync_external(&ExternalValue::date(Some(picked))));
        assert_eq!(store.value(), PickerValue::Date(Some(picked)));
        assert_eq!(store.display().as_deref(), Some("2025-01-10"));
    }

    #[test]
    fn test_uncontrolled_keeps_its_own_value() {
        let mut store = PickerStore::<Msg, _>::new_at(
            &config(PickerMode::Date, None),
            Uncontrolled,
            ExternalValue::default(),
            now(),
        )
        .unwrap();
        assert!(!store.is_controlled());

        store.dispatch(PickerAction::Open);
        let (changed, emitted) = store.dispatch(PickerAction::SelectDay(jan(3)));

        assert!(changed);
        assert!(emitted.is_empty());
        assert_eq!(
            store.value(),
            PickerValue::Date(Some(TimePoint::start_of(jan(3)).millis()))
        );
        // Ignored for uncontrolled pickers
        assert!(!store.sync_external(&ExternalValue::date(Some(0))));
    }

    #[test]
    fn test_range_scenario_emits_offset_adjusted_range() {
        let mut store = PickerStore::new_at(
            &config(PickerMode::DateRange, Some("America/New_York")),
            Controlled::range(Msg::Stay),
            ExternalValue::default(),
            now(),
        )
        .unwrap();
        let offset = store.state().gmt_ms_offset;
        assert_eq!(offset, -5 * 3_600_000);

        store.dispatch(PickerAction::Open);
        store.dispatch(PickerAction::SelectDay(jan(10)));
        let (_, emitted) = store.dispatch(PickerAction::SelectDay(jan(5)));

        // Midnight New York time, as raw UTC milliseconds
        let start = TimePoint::start_of(jan(5)).millis() - offset;
        let end = TimePoint::start_of(jan(10)).millis() - offset;
        assert_eq!(emitted, vec![Msg::Stay(Some(start), Some(end))]);
    }

    #[test]
    fn test_today_is_local_to_timezone() {
        // 2025-01-15 12:00 UTC is already the 16th in Auckland
        let store = PickerStore::<Msg, _>::new_at(
            &config(PickerMode::Date, Some("Pacific/Auckland")),
            Uncontrolled,
            ExternalValue::default(),
            now(),
        )
        .unwrap();
        assert_eq!(store.state().today, jan(16));
    }

    #[test]
    fn test_min_max_are_shifted_like_values() {
        let mut cfg = config(PickerMode::Date, None);
        cfg.min_date = Some(TimePoint::start_of(jan(5)).millis());
        cfg.max_date = Some(TimePoint::start_of(jan(20)).millis());
        let mut store =
            PickerStore::<Msg, _>::new_at(&cfg, Uncontrolled, ExternalValue::default(), now())
                .unwrap();
        store.dispatch(PickerAction::Open);

        let (changed, _) = store.dispatch(PickerAction::SelectDay(jan(21)));
        assert!(!changed);
        assert!(store.state().is_open);
        store.dispatch(PickerAction::Navigate(Direction::Left));
        assert!(store.state().is_selectable(store.state().cursor));
    }

    #[test]
    fn test_set_timezone_keeps_raw_value() {
        let raw = 1_736_500_000_000;
        let mut store = PickerStore::<Msg, _>::new_at(
            &config(PickerMode::Date, None),
            Uncontrolled,
            ExternalValue::date(Some(raw)),
            now(),
        )
        .unwrap();
        assert!(store.set_timezone(Some("Europe/Paris")).unwrap());
        assert_eq!(store.state().gmt_ms_offset, 3_600_000);
        assert_eq!(store.value(), PickerValue::Date(Some(raw)));
        assert!(store.set_timezone(Some("Mars/Base")).is_err());
    }

    #[test]
    fn test_external_value_across_dst_uses_its_own_offset() {
        // Built in January (EST, -5h)
        let mut store = PickerStore::new_at(
            &config(PickerMode::Date, Some("America/New_York")),
            Controlled::date(Msg::Due),
            ExternalValue::date(None),
            now(),
        )
        .unwrap();
        assert_eq!(store.state().gmt_ms_offset, -5 * 3_600_000);

        // 2025-07-10 00:00 EDT
        let july = 1_752_120_000_000;
        assert!(store.sync_external(&ExternalValue::date(Some(july))));
        assert_eq!(store.state().gmt_ms_offset, -4 * 3_600_000);
        assert_eq!(store.display(), Some("2025-07-10".to_string()));
        assert_eq!(store.value(), PickerValue::Date(Some(july)));

        store.dispatch(PickerAction::Open);
        let (_, emitted) = store.dispatch(PickerAction::SelectFocused);
        assert_eq!(emitted, vec![Msg::Due(Some(july))]);
    }

    #[test]
    fn test_unknown_locale_fails_construction() {
        let mut cfg = config(PickerMode::Date, None);
        cfg.locale = "zz".to_string();
        let result =
            PickerStore::<Msg, _>::new_at(&cfg, Uncontrolled, ExternalValue::default(), now());
        assert!(matches!(result, Err(KitError::UnknownLocale(_))));
    }
}
