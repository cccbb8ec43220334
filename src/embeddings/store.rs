use super::{is_finite_vector, Record};
use crate::error::{NewsError, Result};
use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File in the data directory that holds run statistics, not an item.
pub const STATS_FILE: &str = "stats.json";

/// Payload carried by every news record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsMetadata {
    pub title: String,
    pub description: String,
    pub original_data: serde_json::Value,
}

pub type NewsRecord = Record<NewsMetadata>;

/// On-disk shape of `data/<id>.json`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedNews {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub original_data: serde_json::Value,
}

impl From<EmbeddedNews> for NewsRecord {
    fn from(item: EmbeddedNews) -> Self {
        Record {
            id: item.id,
            vector: item.embedding,
            metadata: NewsMetadata {
                title: item.title,
                description: item.description,
                original_data: item.original_data,
            },
        }
    }
}

impl From<&NewsRecord> for EmbeddedNews {
    fn from(record: &NewsRecord) -> Self {
        EmbeddedNews {
            id: record.id.clone(),
            title: record.metadata.title.clone(),
            description: record.metadata.description.clone(),
            embedding: record.vector.clone(),
            original_data: record.metadata.original_data.clone(),
        }
    }
}

/// Feed ids show up both as numbers and as strings.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Load every embedded item in `data_dir`, sorted by file name.
///
/// `stats.json`, unparseable files and items without an embedding, or with
/// NaN/infinite components, are skipped with a warning. Fails if the
/// directory holds no usable item.
pub fn load_records(data_dir: &Path) -> Result<Vec<NewsRecord>> {
    if !data_dir.is_dir() {
        return Err(NewsError::NoRecords(data_dir.display().to_string()));
    }

    let mut records = Vec::new();

    for entry in walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("json")
            || entry.file_name() == STATS_FILE
        {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let parsed = std::fs::read_to_string(path)
            .map_err(NewsError::from)
            .and_then(|raw| serde_json::from_str::<EmbeddedNews>(&raw).map_err(NewsError::from));

        match parsed {
            Ok(item) if item.embedding.is_empty() => {
                eprintln!(
                    "{} file without a valid embedding: {}",
                    "Warning:".yellow(),
                    name
                );
            }
            Ok(item) if !is_finite_vector(&item.embedding) => {
                eprintln!(
                    "{} file with non-finite embedding values: {}",
                    "Warning:".yellow(),
                    name
                );
            }
            Ok(item) => records.push(item.into()),
            Err(e) => {
                eprintln!("{} could not read {}: {}", "Warning:".yellow(), name, e);
            }
        }
    }

    if records.is_empty() {
        return Err(NewsError::NoRecords(data_dir.display().to_string()));
    }

    Ok(records)
}

/// Write one `<id>.json` per record. Returns the file names written.
pub fn save_records(data_dir: &Path, records: &[NewsRecord]) -> Result<Vec<String>> {
    std::fs::create_dir_all(data_dir)?;
    let mut files = Vec::with_capacity(records.len());
    for record in records {
        let file = format!("{}.json", record.id.replace(['/', '\\'], "_"));
        let json = serde_json::to_string_pretty(&EmbeddedNews::from(record))?;
        std::fs::write(data_dir.join(&file), json)?;
        files.push(file);
    }
    Ok(files)
}

/// Summary of an embedding run, written next to the items.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedStats {
    pub timestamp: String,
    pub total_news: usize,
    pub embedding_dimension: usize,
    pub average_title_length: f64,
    pub average_description_length: f64,
    pub files: Vec<String>,
}

impl EmbedStats {
    pub fn compute(records: &[NewsRecord], files: Vec<String>) -> Self {
        let n = records.len().max(1) as f64;
        let title_chars: usize = records.iter().map(|r| r.metadata.title.chars().count()).sum();
        let desc_chars: usize = records
            .iter()
            .map(|r| r.metadata.description.chars().count())
            .sum();

        EmbedStats {
            timestamp: chrono::Utc::now().to_rfc3339(),
            total_news: records.len(),
            embedding_dimension: records.first().map(|r| r.vector.len()).unwrap_or(0),
            average_title_length: title_chars as f64 / n,
            average_description_length: desc_chars as f64 / n,
            files,
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<PathBuf> {
        let path = data_dir.join(STATS_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(data_dir.join(STATS_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Caller-owned cache of loaded data directories.
///
/// An entry for a path stays valid until `invalidate(path)` or `clear()`
/// is called; the cache never checks the directory for changes itself.
#[derive(Default)]
pub struct RecordCache {
    entries: HashMap<PathBuf, Vec<NewsRecord>>,
    loads: usize,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached records for `data_dir`, loading them on first use.
    pub fn get_or_load(&mut self, data_dir: &Path) -> Result<&[NewsRecord]> {
        if !self.entries.contains_key(data_dir) {
            let records = load_records(data_dir)?;
            self.loads += 1;
            self.entries.insert(data_dir.to_path_buf(), records);
        }
        Ok(self
            .entries
            .get(data_dir)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    pub fn invalidate(&mut self, data_dir: &Path) -> bool {
        self.entries.remove(data_dir).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of times a directory was actually read from disk.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn sample(dir: &Path) {
        write(
            dir,
            "2.json",
            r#"{"id": 2, "title": "Second", "description": "two", "embedding": [0.0, 1.0]}"#,
        );
        write(
            dir,
            "1.json",
            r#"{"id": "1", "title": "First", "description": "one", "embedding": [1.0, 0.0], "originalData": {"source": "x"}}"#,
        );
    }

    #[test]
    fn test_load_records_sorted_and_normalised() {
        let tmp = TempDir::new().unwrap();
        sample(tmp.path());

        let records = load_records(tmp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].metadata.title, "First");
        assert_eq!(records[0].metadata.original_data["source"], "x");
        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].vector, vec![0.0, 1.0]);
    }

    #[test]
    fn test_load_records_skips_stats_and_broken_files() {
        let tmp = TempDir::new().unwrap();
        sample(tmp.path());
        write(tmp.path(), STATS_FILE, r#"{"totalNews": 2}"#);
        write(tmp.path(), "broken.json", "{not json");
        write(
            tmp.path(),
            "3.json",
            r#"{"id": 3, "title": "No vector", "embedding": []}"#,
        );
        write(tmp.path(), "notes.txt", "ignored");

        let records = load_records(tmp.path()).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_load_records_skips_overflowing_embedding() {
        let tmp = TempDir::new().unwrap();
        sample(tmp.path());
        // 1e39 does not fit in f32 and parses as infinity
        write(
            tmp.path(),
            "0.json",
            r#"{"id": 0, "title": "Huge", "embedding": [1e39, 0.0]}"#,
        );

        let records = load_records(tmp.path()).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_load_records_empty_dir_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_records(tmp.path()),
            Err(NewsError::NoRecords(_))
        ));
        assert!(matches!(
            load_records(&tmp.path().join("missing")),
            Err(NewsError::NoRecords(_))
        ));
    }

    #[test]
    fn test_save_then_load_keeps_fields() {
        let tmp = TempDir::new().unwrap();
        let records = vec![Record::new(
            "abc",
            vec![0.5, 0.5],
            NewsMetadata {
                title: "T".into(),
                description: "D".into(),
                original_data: serde_json::json!({"id": "abc"}),
            },
        )];
        let files = save_records(tmp.path(), &records).unwrap();
        assert_eq!(files, vec!["abc.json"]);

        let loaded = load_records(tmp.path()).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_stats_compute() {
        let records = vec![
            Record::new(
                "a",
                vec![1.0, 0.0, 0.0],
                NewsMetadata {
                    title: "abcd".into(),
                    description: "xy".into(),
                    original_data: serde_json::Value::Null,
                },
            ),
            Record::new(
                "b",
                vec![0.0, 1.0, 0.0],
                NewsMetadata {
                    title: "ab".into(),
                    description: "xyzw".into(),
                    original_data: serde_json::Value::Null,
                },
            ),
        ];
        let stats = EmbedStats::compute(&records, vec!["a.json".into(), "b.json".into()]);
        assert_eq!(stats.total_news, 2);
        assert_eq!(stats.embedding_dimension, 3);
        assert_eq!(stats.average_title_length, 3.0);
        assert_eq!(stats.average_description_length, 3.0);

        let tmp = TempDir::new().unwrap();
        stats.save(tmp.path()).unwrap();
        let raw = std::fs::read_to_string(tmp.path().join(STATS_FILE)).unwrap();
        assert!(raw.contains("\"totalNews\": 2"));
        assert_eq!(EmbedStats::load(tmp.path()).unwrap().files.len(), 2);
    }

    #[test]
    fn test_cache_loads_once_until_invalidated() {
        let tmp = TempDir::new().unwrap();
        sample(tmp.path());
        let mut cache = RecordCache::new();

        assert_eq!(cache.get_or_load(tmp.path()).unwrap().len(), 2);
        write(
            tmp.path(),
            "9.json",
            r#"{"id": 9, "title": "Late", "embedding": [1.0, 1.0]}"#,
        );
        // Still the cached view
        assert_eq!(cache.get_or_load(tmp.path()).unwrap().len(), 2);
        assert_eq!(cache.loads(), 1);

        assert!(cache.invalidate(tmp.path()));
        assert_eq!(cache.get_or_load(tmp.path()).unwrap().len(), 3);
        assert_eq!(cache.loads(), 2);

        cache.clear();
        assert!(!cache.invalidate(tmp.path()));
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let tmp = TempDir::new().unwrap();
        let mut cache = RecordCache::new();
        assert!(cache.get_or_load(tmp.path()).is_err());
        assert_eq!(cache.loads(), 0);
        sample(tmp.path());
        assert_eq!(cache.get_or_load(tmp.path()).unwrap().len(), 2);
    }
}
