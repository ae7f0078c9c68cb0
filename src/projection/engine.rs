//! Core projection engine for daily growth schedules

use super::compound::{date_for_day, days_to_target, expected_value};
use super::returns::return_rate;
use super::schedule::{Schedule, ScheduleRow, Statistics};
use crate::records::{ActualRecord, RecordError, RecordSet};
use crate::settings::{Settings, SettingsPatch, ValidationResult};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};

/// Longest schedule that will be materialized (100 years of daily rows)
///
/// `days_to_target` still reports the full horizon; only the rows are cut.
pub const MAX_SCHEDULE_DAYS: u32 = 36_500;

/// Build the schedule for day 1 through the horizon
///
/// Each row's baseline is chained from the previous day's recorded actual,
/// so rows must be produced in order. A day without a record leaves the next
/// day's baseline unknown; it never falls back to the projection.
pub fn build_schedule(settings: &Settings, records: &RecordSet) -> Schedule {
    let mut schedule = Schedule::default();

    let horizon = days_to_target(settings);
    if horizon == 0 {
        return schedule;
    }
    if horizon > MAX_SCHEDULE_DAYS {
        warn!(
            "Horizon of {} days exceeds {}, truncating schedule",
            horizon, MAX_SCHEDULE_DAYS
        );
    }

    for day in 1..=horizon.min(MAX_SCHEDULE_DAYS) {
        let Some(date) = date_for_day(settings, day) else {
            warn!("Calendar overflow at day {}, truncating schedule", day);
            break;
        };

        let start_value = if day == 1 {
            Some(settings.start_value)
        } else {
            records.value(day - 1)
        };
        let actual_value = records.value(day);

        let return_rate = match (actual_value, start_value) {
            (Some(actual), Some(start)) => Some(return_rate(actual, start)),
            _ => None,
        };

        schedule.rows.push(ScheduleRow {
            day,
            date,
            start_value,
            expected_value: expected_value(settings, day),
            actual_value,
            return_rate,
        });
    }

    schedule
}

/// Build the schedule and summarize recorded progress
pub fn statistics(settings: &Settings, records: &RecordSet) -> Statistics {
    build_schedule(settings, records).statistics(settings)
}

/// Owns one set of settings and its recorded actual values
///
/// Derived values are recomputed on every query; nothing is cached, so a
/// single edit always ripples through every later day. Not synchronized:
/// a multi-threaded host must wrap the engine itself.
#[derive(Debug, Clone, Default)]
pub struct GrowthEngine {
    settings: Settings,
    records: RecordSet,
}

impl GrowthEngine {
    /// Create an engine with the given settings and no recorded values
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            records: RecordSet::new(),
        }
    }

    /// Restore an engine from saved settings and records
    pub fn with_records(settings: Settings, records: Vec<ActualRecord>) -> Self {
        Self {
            settings,
            records: RecordSet::from_records(records),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings outright
    pub fn set_settings(&mut self, settings: Settings) -> ValidationResult {
        self.settings = settings;
        self.validate()
    }

    /// Merge a partial edit into the current settings
    pub fn update_settings(&mut self, patch: SettingsPatch) -> ValidationResult {
        self.settings.apply(patch);
        let result = self.validate();
        if !result.is_valid {
            debug!("Settings not yet valid: {}", result.messages().join(" "));
        }
        result
    }

    pub fn validate(&self) -> ValidationResult {
        self.settings.validate()
    }

    pub fn days_to_target(&self) -> u32 {
        days_to_target(&self.settings)
    }

    pub fn daily_increase(&self) -> f64 {
        super::compound::daily_increase(&self.settings)
    }

    pub fn expected_value(&self, day: u32) -> f64 {
        expected_value(&self.settings, day)
    }

    pub fn date_for_day(&self, day: u32) -> Option<NaiveDate> {
        date_for_day(&self.settings, day)
    }

    pub fn schedule(&self) -> Schedule {
        build_schedule(&self.settings, &self.records)
    }

    pub fn statistics(&self) -> Statistics {
        statistics(&self.settings, &self.records)
    }

    /// Record an actual value for `day`, stamped with the current time
    ///
    /// Returns false and leaves the records untouched when `day` is 0 or the
    /// value is negative or not finite.
    pub fn record_actual(&mut self, day: u32, actual_value: f64) -> bool {
        self.try_record_actual(day, actual_value).is_ok()
    }

    /// Like [`GrowthEngine::record_actual`], reporting why a value was rejected
    pub fn try_record_actual(&mut self, day: u32, actual_value: f64) -> Result<(), RecordError> {
        self.record_actual_at(day, actual_value, Utc::now())
    }

    /// Record with an explicit capture time
    pub fn record_actual_at(
        &mut self,
        day: u32,
        actual_value: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), RecordError> {
        match self.records.record(day, actual_value, timestamp) {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!("Rejected actual value for day {}: {}", day, err);
                Err(err)
            }
        }
    }

    /// Replace every record, e.g. after loading from storage
    pub fn set_records(&mut self, records: Vec<ActualRecord>) {
        self.records = RecordSet::from_records(records);
        debug!("Loaded {} actual records", self.records.len());
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Latest recorded value before `day`, or the seed when there is none
    ///
    /// Unlike the schedule's chained baseline this skips over gaps.
    pub fn latest_actual_before(&self, day: u32) -> f64 {
        if day <= 1 {
            return self.settings.start_value;
        }
        self.records
            .latest_before(day)
            .unwrap_or(self.settings.start_value)
    }

    /// Clear settings and records
    pub fn reset(&mut self) {
        self.settings = Settings::default();
        self.records.clear();
        debug!("Engine reset");
    }
}
