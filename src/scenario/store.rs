//! Saved scenarios: the record format and where records are kept

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::ScenarioInput;
use crate::error::{CalcError, CalcResult};

/// A named scenario and when it was saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub input: ScenarioInput,
}

impl ScenarioRecord {
    /// Record stamped with the current time
    pub fn new(name: impl Into<String>, input: ScenarioInput) -> Self {
        Self::with_timestamp(name, input, Utc::now())
    }

    pub fn with_timestamp(name: impl Into<String>, input: ScenarioInput, saved_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            saved_at,
            input,
        }
    }
}

/// Write a record as pretty-printed JSON
pub fn export_json<W: Write>(record: &ScenarioRecord, writer: W) -> CalcResult<()> {
    serde_json::to_writer_pretty(writer, record)?;
    Ok(())
}

pub fn import_json<R: Read>(reader: R) -> CalcResult<ScenarioRecord> {
    Ok(serde_json::from_reader(reader)?)
}

/// Somewhere scenarios can be saved and loaded by name
pub trait ScenarioStore {
    /// Save a record, replacing any record with the same name
    fn save(&mut self, record: ScenarioRecord) -> CalcResult<()>;

    fn load(&self, name: &str) -> CalcResult<ScenarioRecord>;

    /// Names of all saved records, sorted
    fn list(&self) -> CalcResult<Vec<String>>;
}

/// Records kept for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, ScenarioRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for MemoryStore {
    fn save(&mut self, record: ScenarioRecord) -> CalcResult<()> {
        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    fn load(&self, name: &str) -> CalcResult<ScenarioRecord> {
        self.records
            .get(name)
            .cloned()
            .ok_or_else(|| CalcError::ScenarioNotFound(name.to_string()))
    }

    fn list(&self) -> CalcResult<Vec<String>> {
        Ok(self.records.keys().cloned().collect())
    }
}

/// All records in a single JSON file, rewritten on every save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store
    fn read_all(&self) -> CalcResult<BTreeMap<String, ScenarioRecord>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(&self.path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn write_all(&self, records: &BTreeMap<String, ScenarioRecord>) -> CalcResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }
}

impl ScenarioStore for JsonFileStore {
    fn save(&mut self, record: ScenarioRecord) -> CalcResult<()> {
        let mut records = self.read_all()?;
        debug!("saving scenario '{}' to {}", record.name, self.path.display());
        records.insert(record.name.clone(), record);
        self.write_all(&records)
    }

    fn load(&self, name: &str) -> CalcResult<ScenarioRecord> {
        self.read_all()?
            .remove(name)
            .ok_or_else(|| CalcError::ScenarioNotFound(name.to_string()))
    }

    fn list(&self) -> CalcResult<Vec<String>> {
        Ok(self.read_all()?.into_keys().collect())
    }
}
