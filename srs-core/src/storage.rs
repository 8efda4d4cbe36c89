use crate::config::SchedulerConfig;
use crate::error::{Error, Result};
use crate::models::{ItemId, ProgressMap, ProgressRecord};
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Key-value persistence for progress records, one key per item.
pub trait ProgressStore: Send + Sync {
    fn get(&self, id: &ItemId) -> Result<Option<ProgressRecord>>;

    fn set(&self, id: &ItemId, record: ProgressRecord) -> Result<()>;

    /// Snapshot of every record, in the order they were first stored.
    fn entries(&self) -> Result<ProgressMap>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<ProgressMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: ProgressMap) -> Self {
        MemoryStore {
            records: Mutex::new(records),
        }
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, id: &ItemId) -> Result<Option<ProgressRecord>> {
        let records = self.records.lock().map_err(|_| Error::Lock("progress records"))?;
        Ok(records.get(id).cloned())
    }

    fn set(&self, id: &ItemId, record: ProgressRecord) -> Result<()> {
        let mut records = self.records.lock().map_err(|_| Error::Lock("progress records"))?;
        records.insert(id.clone(), record);
        Ok(())
    }

    fn entries(&self) -> Result<ProgressMap> {
        let records = self.records.lock().map_err(|_| Error::Lock("progress records"))?;
        Ok(records.clone())
    }
}

/// Keeps the whole progress map as one JSON object on disk and rewrites it on
/// every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    data_file: PathBuf,
    records: Mutex<ProgressMap>,
}

impl JsonFileStore {
    pub fn open(data_file: PathBuf, config: &SchedulerConfig) -> Result<Self> {
        let records = Self::load_records(&data_file, config)?;
        info!("Opened progress store at {} ({} records)", data_file.display(), records.len());
        Ok(JsonFileStore {
            data_file,
            records: Mutex::new(records),
        })
    }

    /// Opens `progress.json` under the platform data directory for `app_name`.
    pub fn open_in_data_dir(app_name: &str, config: &SchedulerConfig) -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no data directory for this platform",
                ))
            })?
            .join(app_name);

        std::fs::create_dir_all(&data_dir)?;
        Self::open(data_dir.join("progress.json"), config)
    }

    pub fn data_file_path(&self) -> &Path {
        &self.data_file
    }

    fn load_records(data_file: &Path, config: &SchedulerConfig) -> Result<ProgressMap> {
        if !data_file.exists() {
            return Ok(ProgressMap::new());
        }

        let file = File::open(data_file)?;
        let reader = BufReader::new(file);
        let records: ProgressMap = serde_json::from_reader(reader)?;

        for (id, record) in &records {
            if record.item != *id {
                warn!("Rejecting progress file {}: key {} holds {}", data_file.display(), id, record.item);
                return Err(Error::InvalidRecord {
                    id: id.to_string(),
                    reason: format!("stored under a different item ({})", record.item),
                });
            }
            if let Err(e) = record.validate(config) {
                warn!("Rejecting progress file {}: {}", data_file.display(), e);
                return Err(e);
            }
        }
        Ok(records)
    }

    /// Writes to a sibling temp file and renames it into place, so the data
    /// file is either the old map or the new one.
    fn save_records(&self, records: &ProgressMap) -> Result<()> {
        let dir = self
            .data_file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;

        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.data_file).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, id: &ItemId) -> Result<Option<ProgressRecord>> {
        let records = self.records.lock().map_err(|_| Error::Lock("progress records"))?;
        Ok(records.get(id).cloned())
    }

    fn set(&self, id: &ItemId, record: ProgressRecord) -> Result<()> {
        let mut records = self.records.lock().map_err(|_| Error::Lock("progress records"))?;

        // Only update the cache once the file write went through
        let mut updated = records.clone();
        updated.insert(id.clone(), record);
        self.save_records(&updated)?;
        *records = updated;
        Ok(())
    }

    fn entries(&self) -> Result<ProgressMap> {
        let records = self.records.lock().map_err(|_| Error::Lock("progress records"))?;
        Ok(records.clone())
    }
}
