//! Settings validation
//!
//! Validation never fails loudly: it reports every problem at once so a form
//! that is mid-edit can show them together, and the engine uses the verdict
//! to decide whether derived values are computed at all.

use super::Settings;
use serde::Serialize;
use thiserror::Error;

/// A single reason the settings cannot drive a projection
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SettingsIssue {
    #[error("Start date is required.")]
    MissingStartDate,

    #[error("Start value must be greater than 0.")]
    NonPositiveStartValue,

    #[error("Growth rate must be greater than 0.")]
    NonPositiveGrowthRate,

    #[error("Target value must be greater than the start value.")]
    TargetNotAboveStart,
}

/// Outcome of validating settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Issues in check order: date, start value, growth rate, target
    pub errors: Vec<SettingsIssue>,
}

impl ValidationResult {
    /// Human readable messages, one per issue
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|issue| issue.to_string()).collect()
    }
}

impl Settings {
    /// Run all checks without short-circuiting
    ///
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.start_date.is_none() {
            errors.push(SettingsIssue::MissingStartDate);
        }

        if !(self.start_value > 0.0) {
            errors.push(SettingsIssue::NonPositiveStartValue);
        }

        if !(self.growth_rate > 0.0) || !self.growth_rate.is_finite() {
            errors.push(SettingsIssue::NonPositiveGrowthRate);
        }

        if !(self.target_value > self.start_value) || !self.target_value.is_finite() {
            errors.push(SettingsIssue::TargetNotAboveStart);
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_settings() -> Settings {
        Settings::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 100.0, 10.0, 200.0)
    }

    #[test]
    fn test_valid_settings_have_no_errors() {
        let result = valid_settings().validate();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_errors_accumulate() {
        let settings = Settings {
            start_value: 0.0,
            growth_rate: 0.0,
            ..valid_settings()
        };

        let result = settings.validate();
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![SettingsIssue::NonPositiveStartValue, SettingsIssue::NonPositiveGrowthRate]
        );
        assert_eq!(result.messages().len(), 2);
    }

    #[test]
    fn test_default_settings_fail_every_check() {
        let result = Settings::default().validate();
        assert_eq!(
            result.errors,
            vec![
                SettingsIssue::MissingStartDate,
                SettingsIssue::NonPositiveStartValue,
                SettingsIssue::NonPositiveGrowthRate,
                SettingsIssue::TargetNotAboveStart,
            ]
        );
    }

    #[test]
    fn test_target_must_exceed_start() {
        let settings = Settings {
            target_value: 100.0,
            ..valid_settings()
        };
        assert_eq!(settings.validate().errors, vec![SettingsIssue::TargetNotAboveStart]);
    }

    #[test]
    fn test_nan_is_invalid() {
        let settings = Settings {
            start_value: f64::NAN,
            ..valid_settings()
        };
        assert!(!settings.is_valid());
    }
}
