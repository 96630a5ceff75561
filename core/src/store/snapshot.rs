//! Durable snapshot of the store under a fixed key.

use crate::prelude::{CoreError, CoreResult};
use crate::record::ClassificationRecord;
use crate::statistics::{AccuracyTrendItem, Distribution, Stats};
use crate::telemetry::LogManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage key the snapshot lives under.
pub const SNAPSHOT_KEY: &str = "wasteData";

/// Persisted subset of the store.
///
/// Decoding is field by field: a missing or malformed field loads as its
/// default without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub recent_classifications: Vec<ClassificationRecord>,
    pub stats: Stats,
    pub distribution: Distribution,
    pub accuracy_trend: Vec<AccuracyTrendItem>,
}

impl Snapshot {
    pub fn encode(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the encoded snapshot under `SNAPSHOT_KEY`.
    pub fn save_to<S: SnapshotSlot + ?Sized>(&self, slot: &mut S) -> CoreResult<()> {
        slot.write(SNAPSHOT_KEY, &self.encode()?)
    }

    /// Fails only when `raw` is not a JSON object at all.
    pub fn decode(raw: &str) -> CoreResult<Self> {
        let mut fields = match serde_json::from_str::<Value>(raw)? {
            Value::Object(fields) => fields,
            other => {
                return Err(CoreError::InvalidInput(format!(
                    "snapshot is a JSON {} rather than an object",
                    json_kind(&other)
                )))
            }
        };
        let logger = LogManager::new("snapshot");
        Ok(Self {
            recent_classifications: records(&mut fields, &logger),
            stats: field(&mut fields, "stats", &logger),
            distribution: field(&mut fields, "distribution", &logger),
            accuracy_trend: field(&mut fields, "accuracyTrend", &logger),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field<T: DeserializeOwned + Default>(
    fields: &mut Map<String, Value>,
    key: &str,
    logger: &LogManager,
) -> T {
    match fields.remove(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            logger.warn(&format!("snapshot field {key} unreadable, using default: {err}"));
            T::default()
        }),
    }
}

/// Keeps every record that parses; the rest are dropped one by one.
fn records(fields: &mut Map<String, Value>, logger: &LogManager) -> Vec<ClassificationRecord> {
    let raw = match fields.remove("recentClassifications") {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(raw)) => raw,
        Some(other) => {
            logger.warn(&format!(
                "snapshot records are a JSON {}, expected an array",
                json_kind(&other)
            ));
            return Vec::new();
        }
    };
    let total = raw.len();
    let records: Vec<ClassificationRecord> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if records.len() < total {
        logger.warn(&format!(
            "dropped {} unreadable records from snapshot",
            total - records.len()
        ));
    }
    records
}

/// Key-value slot a snapshot is written to.
pub trait SnapshotSlot {
    fn read(&self, key: &str) -> CoreResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> CoreResult<()>;
}

/// In-process slot, mostly for tests and ephemeral runs.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotSlot for MemorySlot {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> CoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotSlot for FileSlot {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> CoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }
}
