use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use chrono::{DateTime, Local};

use crate::domain::weather::CitySearchResult;

/// Storage key of the packed history blob. Bump the suffix when the record
/// layout changes so older blobs are simply ignored.
pub const HISTORY_KEY: &str = "recent_searches_v1";
pub const MAX_HISTORY: usize = 5;

const FIELD_SEP: char = '|';
const RECORD_SEP: &str = "##";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub timestamp_millis: i64,
}

impl HistoryEntry {
    #[must_use]
    pub fn from_city(city: &CitySearchResult, timestamp_millis: i64) -> Self {
        Self {
            display_name: sanitize(&city.display_name()),
            latitude: city.latitude,
            longitude: city.longitude,
            country: sanitize(&city.country),
            timestamp_millis,
        }
    }

    /// Leading segment of the display name, used when re-fetching.
    #[must_use]
    pub fn city_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map_or(self.display_name.as_str(), str::trim)
    }

    /// `"Paris, Ile-de-France, France (10/19 14:05)"` in the machine's local zone.
    #[must_use]
    pub fn recent_label(&self) -> String {
        match DateTime::from_timestamp_millis(self.timestamp_millis) {
            Some(at) if self.timestamp_millis > 0 => format!(
                "{} ({})",
                self.display_name,
                at.with_timezone(&Local).format("%m/%d %H:%M")
            ),
            _ => self.display_name.clone(),
        }
    }

    fn pack(&self) -> String {
        format!(
            "{}{FIELD_SEP}{}{FIELD_SEP}{}{FIELD_SEP}{}{FIELD_SEP}{}",
            self.display_name, self.latitude, self.longitude, self.country, self.timestamp_millis
        )
    }

    fn unpack(record: &str) -> Option<Self> {
        let parts: Vec<&str> = record.split(FIELD_SEP).collect();
        if parts.len() < 4 {
            return None;
        }
        Some(Self {
            display_name: parts[0].to_string(),
            latitude: parts[1].parse().ok()?,
            longitude: parts[2].parse().ok()?,
            country: parts[3].to_string(),
            timestamp_millis: parts
                .get(4)
                .and_then(|ts| ts.parse().ok())
                .unwrap_or_default(),
        })
    }
}

fn sanitize(field: &str) -> String {
    field.replace([FIELD_SEP, '#'], "")
}

fn pack_all(entries: &[HistoryEntry]) -> String {
    entries
        .iter()
        .map(HistoryEntry::pack)
        .collect::<Vec<_>>()
        .join(RECORD_SEP)
}

fn unpack_all(blob: &str) -> Vec<HistoryEntry> {
    blob.split(RECORD_SEP)
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let entry = HistoryEntry::unpack(record);
            if entry.is_none() {
                tracing::warn!(record, "skipping unreadable history record");
            }
            entry
        })
        .collect()
}

/// Read/write of a single string value per key.
pub trait HistoryBackend: Send + Sync + Debug {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn store(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<BTreeMap<String, String>>,
}

impl HistoryBackend for MemoryBackend {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object of key → value on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).context("parsing history file failed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err).context("reading history file failed"),
        }
    }
}

impl HistoryBackend for FileBackend {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn store(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.read_all().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable history file");
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("creating history directory failed")?;
        }
        let payload =
            serde_json::to_string_pretty(&values).context("serializing history failed")?;
        fs::write(&self.path, payload).context("writing history file failed")
    }
}

/// Most-recent-first list of resolved cities, capped and deduplicated by display name.
#[derive(Debug)]
pub struct SearchHistoryStore {
    backend: Arc<dyn HistoryBackend>,
    write_lock: Mutex<()>,
}

impl SearchHistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    /// Moves `entry` to the front, replacing any record with the same display
    /// name, and drops whatever falls past [`MAX_HISTORY`].
    pub fn add(&self, entry: HistoryEntry) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "starting over from unreadable history");
            Vec::new()
        });
        entries.retain(|existing| existing.display_name != entry.display_name);
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY);
        self.backend.store(HISTORY_KEY, &pack_all(&entries))
    }

    pub fn add_city(&self, city: &CitySearchResult, timestamp_millis: i64) -> anyhow::Result<()> {
        self.add(HistoryEntry::from_city(city, timestamp_millis))
    }

    pub fn list(&self) -> anyhow::Result<Vec<HistoryEntry>> {
        self.read()
    }

    fn read(&self) -> anyhow::Result<Vec<HistoryEntry>> {
        Ok(self
            .backend
            .load(HISTORY_KEY)?
            .map(|blob| unpack_all(&blob))
            .unwrap_or_default())
    }
}
