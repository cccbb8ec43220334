//! `clusters.json`: one array of story texts per cluster, seed first.

use crate::embeddings::store::NewsMetadata;
use crate::embeddings::{Cluster, Record};
use crate::error::{NewsError, Result};
use std::path::Path;

/// "title\ndescription", or just the title when there is no description.
pub fn news_text(record: &Record<NewsMetadata>) -> String {
    let title = if record.metadata.title.is_empty() {
        crate::ingest::UNTITLED
    } else {
        record.metadata.title.as_str()
    };
    if record.metadata.description.is_empty() {
        title.to_string()
    } else {
        format!("{}\n{}", title, record.metadata.description)
    }
}

pub fn clusters_as_text(clusters: &[Cluster<'_, NewsMetadata>]) -> Vec<Vec<String>> {
    clusters
        .iter()
        .map(|cluster| cluster.members().map(news_text).collect())
        .collect()
}

pub fn save_clusters(clusters: &[Cluster<'_, NewsMetadata>], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&clusters_as_text(clusters))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a clusters file back. Every cluster must be an array; non-string
/// entries are kept in their JSON form.
pub fn load_clusters(path: &Path) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&content)?;

    let clusters = parsed.as_array().ok_or_else(|| {
        NewsError::Config("The clusters file must be an array of clusters".into())
    })?;

    clusters
        .iter()
        .enumerate()
        .map(|(idx, cluster)| {
            let entries = cluster.as_array().ok_or_else(|| {
                NewsError::Config(format!("Cluster #{} is not an array", idx + 1))
            })?;
            Ok(entries
                .iter()
                .map(|entry| match entry {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::find_clusters;
    use tempfile::TempDir;

    fn news(id: &str, title: &str, description: &str, v: &[f32]) -> Record<NewsMetadata> {
        Record::new(
            id,
            v.to_vec(),
            NewsMetadata {
                title: title.into(),
                description: description.into(),
                original_data: serde_json::Value::Null,
            },
        )
    }

    #[test]
    fn test_news_text() {
        assert_eq!(news_text(&news("1", "T", "D", &[1.0])), "T\nD");
        assert_eq!(news_text(&news("1", "T", "", &[1.0])), "T");
        assert_eq!(news_text(&news("1", "", "", &[1.0])), "Untitled");
    }

    #[test]
    fn test_save_and_load_clusters() {
        let records = vec![
            news("1", "Seed", "first", &[1.0, 0.0]),
            news("2", "Near", "", &[0.99, 0.01]),
            news("3", "Other", "far", &[0.0, 1.0]),
        ];
        let clusters = find_clusters(&records, 0.05, 1).unwrap();

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("clusters.json");
        save_clusters(&clusters, &path).unwrap();

        let loaded = load_clusters(&path).unwrap();
        assert_eq!(loaded, vec![vec!["Seed\nfirst".to_string(), "Near".to_string()]]);
    }

    #[test]
    fn test_load_clusters_rejects_bad_shapes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("c.json");

        std::fs::write(&path, r#"{"a": 1}"#).unwrap();
        assert!(matches!(load_clusters(&path), Err(NewsError::Config(_))));

        std::fs::write(&path, r#"[["ok"], "bad"]"#).unwrap();
        let err = load_clusters(&path).unwrap_err();
        assert!(matches!(err, NewsError::Config(ref m) if m.contains("#2")));

        std::fs::write(&path, r#"[["text", 5]]"#).unwrap();
        assert_eq!(load_clusters(&path).unwrap(), vec![vec!["text".to_string(), "5".to_string()]]);
    }
}
