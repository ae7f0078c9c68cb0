//! Schedule output structures

use super::returns::total_return_rate;
use crate::settings::Settings;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the projected schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub day: u32,
    pub date: NaiveDate,

    /// Chained baseline: the seed on day 1, otherwise the previous day's
    /// recorded actual. `None` when the previous day has no record.
    pub start_value: Option<f64>,

    /// Pure compound projection from the seed
    pub expected_value: f64,

    pub actual_value: Option<f64>,

    /// Realized return in percent; needs both a baseline and an actual
    pub return_rate: Option<f64>,
}

/// Complete schedule from day 1 to the horizon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, day: u32) -> Option<&ScheduleRow> {
        let index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.rows.get(index)
    }

    /// Rows that carry a recorded actual value
    pub fn observed(&self) -> impl Iterator<Item = &ScheduleRow> {
        self.rows.iter().filter(|r| r.actual_value.is_some())
    }

    /// Summarize observed progress against the settings this schedule was built from
    pub fn statistics(&self, settings: &Settings) -> Statistics {
        let observed: Vec<&ScheduleRow> = self.observed().collect();

        let current_value = match observed.last().and_then(|r| r.actual_value) {
            Some(value) => value,
            None => return Statistics::default(),
        };

        let returns: Vec<f64> = observed
            .iter()
            .filter_map(|r| r.return_rate)
            .filter(|rate| !rate.is_nan())
            .collect();
        let average_return = if returns.is_empty() {
            0.0
        } else {
            returns.iter().sum::<f64>() / returns.len() as f64
        };

        let target_progress = if settings.target_value > 0.0 {
            (current_value / settings.target_value * 100.0).min(100.0)
        } else {
            0.0
        };

        Statistics {
            total_days: self.rows.len() as u32,
            days_with_data: observed.len() as u32,
            average_return,
            total_return: total_return_rate(current_value, settings.start_value),
            current_value,
            target_progress,
        }
    }
}

/// Summary of recorded progress
///
/// All fields are zero when nothing has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Rows in the schedule
    pub total_days: u32,
    /// Rows with a recorded actual value
    pub days_with_data: u32,
    /// Mean of the available daily return rates. Rows without a chained
    /// baseline have no return rate and are left out of the mean entirely
    /// rather than counted as 0%.
    pub average_return: f64,
    /// Return of the latest actual against the seed, in percent
    pub total_return: f64,
    /// Latest recorded actual value
    pub current_value: f64,
    /// Latest actual as a percentage of the target, capped at 100
    pub target_progress: f64,
}
