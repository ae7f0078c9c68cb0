//! Projection settings and their validation

mod data;
mod validate;

pub use data::{Settings, SettingsPatch};
pub use validate::{SettingsIssue, ValidationResult};
