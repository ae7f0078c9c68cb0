//! Daily compound growth: horizon, projected values and calendar dates
//!
//! Every function here is gated on valid settings and degrades to zero (or
//! `None`) instead of failing, so callers can query while the settings are
//! still being edited.

use crate::settings::Settings;
use chrono::{Days, NaiveDate};
use log::warn;

/// Smallest number of days for the seed to reach the target
///
/// t = ceil( ln(target / start) / ln(1 + rate) )
///
/// Returns 0 for invalid settings, and also when the rate is so small that
/// `1 + rate` rounds to 1 and no finite horizon exists.
pub fn days_to_target(settings: &Settings) -> u32 {
    if !settings.is_valid() {
        return 0;
    }

    let ln_ratio = (settings.target_value / settings.start_value).ln();
    let ln_growth = (1.0 + settings.daily_rate()).ln();
    let days = (ln_ratio / ln_growth).ceil();

    if !days.is_finite() || days > u32::MAX as f64 {
        warn!(
            "No representable horizon for start={} rate={}% target={}",
            settings.start_value, settings.growth_rate, settings.target_value
        );
        return 0;
    }

    days as u32
}

/// Projected value after `day` days of compounding from the seed
///
/// Day 0 is the seed itself. Recorded actuals never influence this value.
pub fn expected_value(settings: &Settings, day: u32) -> f64 {
    if !settings.is_valid() {
        return 0.0;
    }

    let exponent = i32::try_from(day).unwrap_or(i32::MAX);
    settings.start_value * (1.0 + settings.daily_rate()).powi(exponent)
}

/// Growth the seed earns on its first day
pub fn daily_increase(settings: &Settings) -> f64 {
    if !settings.is_valid() {
        return 0.0;
    }

    settings.start_value * settings.daily_rate()
}

/// Calendar date of a 1-based day (day 1 is the start date)
pub fn date_for_day(settings: &Settings, day: u32) -> Option<NaiveDate> {
    if day < 1 {
        return None;
    }

    settings
        .start_date?
        .checked_add_days(Days::new(u64::from(day - 1)))
}
