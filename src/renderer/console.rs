//! One-line descriptions of news records for terminal output.

use crate::embeddings::store::NewsMetadata;
use crate::embeddings::{Neighbor, Record};
use crate::ingest::truncate_chars;

pub fn format_score(value: f32) -> String {
    format!("{:.4}", value)
}

/// `[id] title`
pub fn news_label(record: &Record<NewsMetadata>) -> String {
    format!("[{}] {}", record.id, record.metadata.title)
}

/// `[id] title — first 100 chars of the description`
pub fn describe_news(record: &Record<NewsMetadata>) -> String {
    let snippet = if record.metadata.description.is_empty() {
        "No description available".to_string()
    } else {
        truncate_chars(&record.metadata.description, 100)
    };
    format!("{} — {}", news_label(record), snippet)
}

pub fn neighbor_line(neighbor: &Neighbor<'_, NewsMetadata>) -> String {
    format!(
        "{} — similarity: {} | distance: {}",
        news_label(neighbor.record),
        format_score(neighbor.similarity),
        format_score(neighbor.distance)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(description: &str) -> Record<NewsMetadata> {
        Record::new(
            "42",
            vec![1.0],
            NewsMetadata {
                title: "Headline".into(),
                description: description.into(),
                original_data: serde_json::Value::Null,
            },
        )
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.123456), "0.1235");
        assert_eq!(format_score(1.0), "1.0000");
    }

    #[test]
    fn test_describe_news() {
        assert_eq!(describe_news(&news("")), "[42] Headline — No description available");
        let long = "x".repeat(150);
        let line = describe_news(&news(&long));
        assert!(line.ends_with('…'));
        assert!(line.starts_with("[42] Headline — xxx"));
    }

    #[test]
    fn test_neighbor_line() {
        let record = news("d");
        let neighbor = Neighbor {
            record: &record,
            similarity: 0.75,
            distance: 0.25,
        };
        assert_eq!(
            neighbor_line(&neighbor),
            "[42] Headline — similarity: 0.7500 | distance: 0.2500"
        );
    }
}
