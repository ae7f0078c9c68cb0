//! Directory-backed storage for settings and recorded values
//!
//! Each document is saved as JSON inside a `{data, timestamp, version}`
//! envelope. Documents written before the envelope existed are still read.

mod bundle;

pub use bundle::{validate_bundle, ExportBundle};

use crate::projection::GrowthEngine;
use crate::records::ActualRecord;
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version tag written into every envelope and export bundle
pub const FORMAT_VERSION: &str = "1.0.0";

/// Default store directory, relative to the working directory
pub const DEFAULT_STORE_DIR: &str = ".growth_tracker";

const SETTINGS_FILE: &str = "settings.json";
const RECORDS_FILE: &str = "investment_data.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid import bundle: {0}")]
    InvalidBundle(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Serialize)]
struct Envelope<T> {
    data: T,
    timestamp: DateTime<Utc>,
    version: String,
}

/// Settings and records persisted under one directory
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save(SETTINGS_FILE, settings)
    }

    /// Saved settings, or `None` when nothing has been saved yet
    pub fn load_settings(&self) -> Result<Option<Settings>> {
        self.load(SETTINGS_FILE)
    }

    pub fn save_records(&self, records: &[ActualRecord]) -> Result<()> {
        self.save(RECORDS_FILE, &records)
    }

    /// Saved records in file order; empty when nothing has been saved yet
    pub fn load_records(&self) -> Result<Vec<ActualRecord>> {
        Ok(self.load(RECORDS_FILE)?.unwrap_or_default())
    }

    /// Persist both the engine's settings and its records
    pub fn save_engine(&self, engine: &GrowthEngine) -> Result<()> {
        self.save_settings(engine.settings())?;
        self.save_records(&engine.records().to_vec())
    }

    /// Rebuild an engine from whatever has been saved
    ///
    /// Records are only restored alongside saved settings.
    pub fn load_engine(&self) -> Result<GrowthEngine> {
        match self.load_settings()? {
            Some(settings) => Ok(GrowthEngine::with_records(settings, self.load_records()?)),
            None => Ok(GrowthEngine::default()),
        }
    }

    /// Remove both documents
    pub fn clear(&self) -> Result<()> {
        for name in [SETTINGS_FILE, RECORDS_FILE] {
            let path = self.root.join(name);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(StorageError::Io { path, source }),
            }
        }
        info!("Cleared store at {}", self.root.display());
        Ok(())
    }

    /// Snapshot of the saved documents, ready to be written out
    pub fn export_bundle(&self, custom_data: Value) -> Result<ExportBundle> {
        Ok(ExportBundle {
            export_date: Utc::now(),
            version: FORMAT_VERSION.to_string(),
            settings: self.load_settings()?,
            investment_data: Some(self.load_records()?),
            custom_data,
        })
    }

    /// Write an export bundle to `path` as pretty-printed JSON
    pub fn export_to<P: AsRef<Path>>(&self, path: P, custom_data: Value) -> Result<ExportBundle> {
        let path = path.as_ref();
        let bundle = self.export_bundle(custom_data)?;
        let json = serde_json::to_string_pretty(&bundle)?;
        write_file(path, &json)?;
        info!("Exported store to {}", path.display());
        Ok(bundle)
    }

    /// Read a bundle from `path` and save the parts it carries
    ///
    /// Nothing is written unless the whole bundle is valid.
    pub fn import_from<P: AsRef<Path>>(&self, path: P) -> Result<ExportBundle> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let value: Value = serde_json::from_str(&text)?;
        validate_bundle(&value)?;
        let bundle: ExportBundle = serde_json::from_value(value)
            .map_err(|err| StorageError::InvalidBundle(err.to_string()))?;

        if let Some(settings) = &bundle.settings {
            self.save_settings(settings)?;
        }
        if let Some(records) = &bundle.investment_data {
            self.save_records(records)?;
        }

        info!("Imported bundle from {} (version {})", path.display(), bundle.version);
        Ok(bundle)
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let envelope = Envelope {
            data,
            timestamp: Utc::now(),
            version: FORMAT_VERSION.to_string(),
        };
        let json = serde_json::to_string(&envelope)?;
        write_file(&self.root.join(name), &json)?;
        info!("Saved {}", name);
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.root.join(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        let value: Value = serde_json::from_str(&text)?;
        let payload = match value {
            Value::Object(mut map) if map.contains_key("data") && map.contains_key("timestamp") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            bare => {
                warn!("{} has no envelope, reading it as a bare document", name);
                bare
            }
        };

        if payload.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(payload)?))
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::{tempdir, TempDir};

    fn temp_store() -> (TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        (dir, store)
    }

    fn sample_settings() -> Settings {
        Settings::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1_000.0, 2.0, 1_500.0)
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load_settings().unwrap(), None);
        assert!(store.load_records().unwrap().is_empty());
        assert!(store.load_engine().unwrap().schedule().is_empty());
    }

    #[test]
    fn test_save_and_load_engine() {
        let (_dir, store) = temp_store();
        let mut engine = GrowthEngine::new(sample_settings());
        engine.record_actual(1, 1_030.0);
        engine.record_actual(2, 1_040.0);
        store.save_engine(&engine).unwrap();

        let loaded = store.load_engine().unwrap();
        assert_eq!(loaded.settings(), engine.settings());
        assert_eq!(loaded.records(), engine.records());
    }

    #[test]
    fn test_saved_document_has_envelope() {
        let (_dir, store) = temp_store();
        store.save_settings(&sample_settings()).unwrap();

        let raw = fs::read_to_string(store.root().join(SETTINGS_FILE)).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], FORMAT_VERSION);
        assert!(value["timestamp"].is_string());
        assert_eq!(value["data"]["startValue"], 1_000.0);
    }

    #[test]
    fn test_bare_legacy_document_is_read() {
        let (_dir, store) = temp_store();
        let bare = r#"{"startDate":"2024-01-01","startValue":1000,"growthRate":2,"targetValue":1500}"#;
        fs::write(store.root().join(SETTINGS_FILE), bare).unwrap();

        assert_eq!(store.load_settings().unwrap(), Some(sample_settings()));
    }

    #[test]
    fn test_clear_removes_documents() {
        let (_dir, store) = temp_store();
        store.save_settings(&sample_settings()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();

        assert_eq!(store.load_settings().unwrap(), None);
    }

    #[test]
    fn test_export_then_import_into_other_store() {
        let (_src_dir, source) = temp_store();
        let (_dst_dir, target) = temp_store();

        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        source.save_settings(&sample_settings()).unwrap();
        source
            .save_records(&[ActualRecord { day: 1, actual_value: 1_010.0, timestamp: ts }])
            .unwrap();

        let file = source.root().join("export.json");
        source.export_to(&file, Value::Null).unwrap();
        let bundle = target.import_from(&file).unwrap();

        assert_eq!(bundle.version, FORMAT_VERSION);
        assert_eq!(target.load_settings().unwrap(), Some(sample_settings()));
        assert_eq!(target.load_records().unwrap()[0].actual_value, 1_010.0);
    }

    #[test]
    fn test_invalid_import_writes_nothing() {
        let (_dir, store) = temp_store();
        let file = store.root().join("bad.json");
        fs::write(&file, r#"{"settings":{"startValue":5}}"#).unwrap();

        let err = store.import_from(&file).unwrap_err();
        assert!(matches!(err, StorageError::InvalidBundle(_)));
        assert_eq!(store.load_settings().unwrap(), None);
    }

    #[test]
    fn test_import_with_unparseable_export_date_is_invalid_bundle() {
        let (_dir, store) = temp_store();
        let file = store.root().join("date_only.json");
        fs::write(&file, r#"{"exportDate":"2024-02-01","version":"1.0.0","settings":{"startValue":5}}"#)
            .unwrap();

        let err = store.import_from(&file).unwrap_err();
        assert!(matches!(err, StorageError::InvalidBundle(_)));
        assert_eq!(store.load_settings().unwrap(), None);
    }
}
