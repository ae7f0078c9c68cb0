//! Recorded actual values, one per day
//!
//! The set is keyed by day so it is always in ascending day order and a second
//! write to the same day replaces the first.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// An observed value for one day of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualRecord {
    /// 1-based day number
    pub day: u32,
    pub actual_value: f64,
    /// When the value was captured
    pub timestamp: DateTime<Utc>,
}

/// Why a value could not be recorded
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RecordError {
    #[error("day must be 1 or later (got {0})")]
    InvalidDay(u32),

    #[error("actual value must not be negative (got {0})")]
    NegativeValue(f64),

    #[error("actual value must be a finite number")]
    NonFiniteValue,
}

/// Ordered map from day to its recorded actual value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    by_day: BTreeMap<u32, ActualRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from loaded records
    ///
    /// Later duplicates of a day win. Records that could never have been
    /// accepted by [`RecordSet::record`] are dropped.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ActualRecord>,
    {
        let mut set = Self::new();
        for record in records {
            if let Err(err) = check(record.day, record.actual_value) {
                warn!("Dropping loaded record for day {}: {}", record.day, err);
                continue;
            }
            set.by_day.insert(record.day, record);
        }
        set
    }

    /// Insert or replace the value for `day`
    ///
    /// On error the set is left untouched.
    pub fn record(
        &mut self,
        day: u32,
        actual_value: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<&ActualRecord, RecordError> {
        check(day, actual_value)?;

        let replaced = self.by_day.contains_key(&day);
        debug!(
            "{} actual value for day {}: {}",
            if replaced { "Replacing" } else { "Recording" },
            day,
            actual_value
        );

        let entry = self
            .by_day
            .entry(day)
            .and_modify(|existing| {
                existing.actual_value = actual_value;
                existing.timestamp = timestamp;
            })
            .or_insert(ActualRecord {
                day,
                actual_value,
                timestamp,
            });
        Ok(&*entry)
    }

    pub fn get(&self, day: u32) -> Option<&ActualRecord> {
        self.by_day.get(&day)
    }

    /// Recorded value for `day`, if any
    pub fn value(&self, day: u32) -> Option<f64> {
        self.by_day.get(&day).map(|r| r.actual_value)
    }

    /// Most recent recorded value strictly before `day`
    pub fn latest_before(&self, day: u32) -> Option<f64> {
        self.by_day
            .range(..day)
            .next_back()
            .map(|(_, r)| r.actual_value)
    }

    /// Records in ascending day order
    pub fn iter(&self) -> impl Iterator<Item = &ActualRecord> {
        self.by_day.values()
    }

    pub fn to_vec(&self) -> Vec<ActualRecord> {
        self.by_day.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.by_day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_day.clear();
    }
}

fn check(day: u32, actual_value: f64) -> Result<(), RecordError> {
    if day < 1 {
        return Err(RecordError::InvalidDay(day));
    }
    if actual_value.is_nan() || actual_value.is_infinite() {
        return Err(RecordError::NonFiniteValue);
    }
    if actual_value < 0.0 {
        return Err(RecordError::NegativeValue(actual_value));
    }
    Ok(())
}
