//! Growth Tracker - daily compound growth projections checked against reality
//!
//! This library provides:
//! - Settings validation that reports every problem at once
//! - Horizon and projected-value calculations for daily compounding
//! - Day-by-day schedules whose baselines are chained from recorded actuals
//! - Realized return statistics
//! - JSON storage with export/import bundles

pub mod settings;
pub mod records;
pub mod projection;
pub mod storage;

// Re-export commonly used types
pub use settings::{Settings, SettingsPatch, ValidationResult};
pub use records::{ActualRecord, RecordError, RecordSet};
pub use projection::{GrowthEngine, Schedule, ScheduleRow, Statistics};
pub use storage::{ExportBundle, Store, StorageError};
