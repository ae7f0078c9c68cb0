//! Export/import bundle format

use super::{Result, StorageError};
use crate::records::ActualRecord;
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything needed to move a tracker between machines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub export_date: DateTime<Utc>,
    pub version: String,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub investment_data: Option<Vec<ActualRecord>>,
    /// Free-form payload carried through untouched
    #[serde(default)]
    pub custom_data: Value,
}

/// Check the bundle's shape before any of it is trusted
///
/// Requires a JSON object with a non-empty `exportDate` and `version`.
/// `settings` must be an object and `investmentData` an array when present.
pub fn validate_bundle(value: &Value) -> Result<()> {
    let object = value
        .as_object()
        .ok_or_else(|| StorageError::InvalidBundle("expected a JSON object".to_string()))?;

    for field in ["exportDate", "version"] {
        match object.get(field).and_then(Value::as_str) {
            Some(text) if !text.is_empty() => {}
            _ => {
                return Err(StorageError::InvalidBundle(format!(
                    "missing required field `{}`",
                    field
                )))
            }
        }
    }

    match object.get("settings") {
        None | Some(Value::Null) | Some(Value::Object(_)) => {}
        Some(_) => {
            return Err(StorageError::InvalidBundle(
                "`settings` must be an object".to_string(),
            ))
        }
    }

    match object.get("investmentData") {
        None | Some(Value::Null) | Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(StorageError::InvalidBundle(
                "`investmentData` must be an array".to_string(),
            ))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_bundle_is_valid() {
        let value = json!({"exportDate": "2024-02-01T00:00:00Z", "version": "1.0.0"});
        assert!(validate_bundle(&value).is_ok());

        let bundle: ExportBundle = serde_json::from_value(value).unwrap();
        assert!(bundle.settings.is_none());
        assert!(bundle.investment_data.is_none());
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(validate_bundle(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_rejects_missing_version() {
        let value = json!({"exportDate": "2024-02-01T00:00:00Z"});
        assert!(matches!(validate_bundle(&value), Err(StorageError::InvalidBundle(_))));
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        let base = json!({"exportDate": "2024-02-01T00:00:00Z", "version": "1.0.0"});

        let mut bad_settings = base.clone();
        bad_settings["settings"] = json!("nope");
        assert!(validate_bundle(&bad_settings).is_err());

        let mut bad_data = base;
        bad_data["investmentData"] = json!({"day": 1});
        assert!(validate_bundle(&bad_data).is_err());
    }

    #[test]
    fn test_full_bundle_deserializes() {
        let value = json!({
            "exportDate": "2024-02-01T00:00:00.000Z",
            "version": "1.0.0",
            "settings": {"startDate": "2024-01-01", "startValue": 100, "growthRate": 3.5, "targetValue": 200},
            "investmentData": [{"day": 1, "actualValue": 104, "timestamp": "2024-01-01T20:00:00.000Z"}],
            "customData": {}
        });
        assert!(validate_bundle(&value).is_ok());

        let bundle: ExportBundle = serde_json::from_value(value).unwrap();
        assert_eq!(bundle.settings.unwrap().growth_rate, 3.5);
        assert_eq!(bundle.investment_data.unwrap().len(), 1);
    }
}
