//! Fetch a news feed and turn its items into embedded records.

use crate::embeddings::store::{NewsMetadata, NewsRecord};
use crate::embeddings::{EmbeddingProvider, Record};
use crate::error::{NewsError, Result};
use colored::Colorize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::time::Duration;

/// Pause between embedding requests.
const REQUEST_PAUSE: Duration = Duration::from_millis(100);

const TITLE_KEYS: [&str; 3] = ["title", "titolo", "headline"];
const DESCRIPTION_KEYS: [&str; 4] = ["description", "descrizione", "content", "testo"];
const LIST_KEYS: [&str; 3] = ["news", "data", "articles"];

pub const UNTITLED: &str = "Untitled";

/// A feed entry with its text fields resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub original: Value,
}

impl FeedItem {
    /// Text sent to the embedding model
    pub fn embedding_text(&self) -> String {
        format!("{}\n{}", self.title, self.description)
    }

    pub fn into_record(self, embedding: Vec<f32>) -> NewsRecord {
        Record::new(
            self.id,
            embedding,
            NewsMetadata {
                title: self.title,
                description: self.description,
                original_data: self.original,
            },
        )
    }
}

pub async fn fetch_feed(url: &str) -> Result<Value> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(NewsError::Config(format!(
            "News feed returned {} for {}",
            status, url
        )));
    }
    Ok(response.json().await?)
}

/// The item list of a feed: either the top-level array or the first array
/// found under `news`, `data` or `articles`.
pub fn extract_items(feed: &Value) -> Result<&[Value]> {
    if let Some(items) = feed.as_array() {
        return Ok(items);
    }
    LIST_KEYS
        .iter()
        .find_map(|key| feed.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .ok_or_else(|| {
            let keys: Vec<&str> = feed
                .as_object()
                .map(|o| o.keys().map(String::as_str).collect())
                .unwrap_or_default();
            NewsError::Config(format!(
                "Unsupported feed format (top-level keys: {})",
                keys.join(", ")
            ))
        })
}

/// Resolve title, description and id of a raw feed entry. Returns `None`
/// for entries without a description.
pub fn normalize_item(raw: &Value) -> Option<FeedItem> {
    let title = first_text(raw, &TITLE_KEYS).unwrap_or_else(|| UNTITLED.to_string());
    let description = first_text(raw, &DESCRIPTION_KEYS)?;

    let id = match raw.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback_id(&title, &description),
    };

    Some(FeedItem {
        id,
        title,
        description,
        original: raw.clone(),
    })
}

/// First non-empty string under `keys`, kept as the feed wrote it.
fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Id for entries that have none: first 16 hex chars of the SHA-256 of
/// title and description.
fn fallback_id(title: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(b"\n");
    hasher.update(description.as_bytes());
    format!("{:x}", hasher.finalize())[..16].to_string()
}

/// `id` if unused so far, otherwise the first free `id-2`, `id-3`, ...
fn unique_id(id: String, seen: &mut HashSet<String>) -> String {
    if seen.insert(id.clone()) {
        return id;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", id, n);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Normalise every feed entry, warning about the ones that get skipped.
/// Repeated ids get a numeric suffix so every item keeps its own file.
pub fn collect_items(raw_items: &[Value]) -> Vec<FeedItem> {
    let mut seen = HashSet::new();
    raw_items
        .iter()
        .filter_map(|raw| {
            let item = normalize_item(raw);
            if item.is_none() {
                let title = first_text(raw, &TITLE_KEYS).unwrap_or_else(|| UNTITLED.to_string());
                eprintln!(
                    "{} item without description skipped: \"{}\"",
                    "Warning:".yellow(),
                    title
                );
            }
            item
        })
        .map(|mut item| {
            let id = unique_id(item.id.clone(), &mut seen);
            if id != item.id {
                eprintln!(
                    "{} duplicate id {} renamed to {}",
                    "Warning:".yellow(),
                    item.id,
                    id
                );
                item.id = id;
            }
            item
        })
        .collect()
}

/// Embed items one at a time. An item whose request fails is reported and
/// left out; the rest carry on.
pub async fn embed_items(
    items: Vec<FeedItem>,
    provider: &EmbeddingProvider,
    pb: &indicatif::ProgressBar,
) -> Vec<NewsRecord> {
    let mut records = Vec::with_capacity(items.len());

    for item in items {
        pb.set_message(truncate_chars(&item.title, 50));
        match provider.embed(&item.embedding_text()).await {
            Ok(embedding) => records.push(item.into_record(embedding)),
            Err(e) => pb.println(format!(
                "{} failed to embed \"{}\": {}",
                "Error:".red(),
                item.title,
                e
            )),
        }
        pb.inc(1);
        tokio::time::sleep(REQUEST_PAUSE).await;
    }

    records
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}…", cut)
    }
}
