//! Settings data structures matching the saved settings format

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Configuration of a growth projection
///
/// A freshly constructed (or reset) value has no start date and all numbers
/// at zero, which is deliberately invalid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Anchor for day numbering: day 1 falls on this date
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub start_date: Option<NaiveDate>,

    /// Seed principal
    #[serde(default)]
    pub start_value: f64,

    /// Daily compound growth in percentage points (3.5 = 3.5%/day)
    #[serde(default)]
    pub growth_rate: f64,

    /// Value the projection should reach
    #[serde(default)]
    pub target_value: f64,
}

impl Settings {
    pub fn new(start_date: NaiveDate, start_value: f64, growth_rate: f64, target_value: f64) -> Self {
        Self {
            start_date: Some(start_date),
            start_value,
            growth_rate,
            target_value,
        }
    }

    /// Daily growth as a decimal (3.5% -> 0.035)
    pub fn daily_rate(&self) -> f64 {
        self.growth_rate / 100.0
    }

    /// Merge a partial update; absent fields keep their current value
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(date) = patch.start_date {
            self.start_date = Some(date);
        }
        if let Some(value) = patch.start_value {
            self.start_value = value;
        }
        if let Some(rate) = patch.growth_rate {
            self.growth_rate = rate;
        }
        if let Some(target) = patch.target_value {
            self.target_value = target;
        }
    }
}

/// Partial settings update, as produced by a form that edits one field at a time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_value: Option<f64>,
    #[serde(default)]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub target_value: Option<f64>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.start_value.is_none()
            && self.growth_rate.is_none()
            && self.target_value.is_none()
    }
}

/// Saved forms leave the date as "" when the user never picked one
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
