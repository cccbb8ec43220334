use std::path::{Path, PathBuf};

use crate::error::{NewsError, Result};

pub const DEFAULT_MAX_DISTANCE: f32 = 0.4;
pub const DEFAULT_MIN_NEIGHBORS: usize = 3;
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_CLUSTERS_FILE: &str = "clusters.json";
pub const DEFAULT_SUMMARY_FILE: &str = "cluster-summary.txt";
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SUMMARY_LANGUAGE: &str = "italiano";
pub const DEFAULT_NEWS_URL: &str = "https://cdn.bazzani.info/news/topnews.json?p=1762969100840";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one JSON file per embedded item
    pub data_dir: PathBuf,
    pub max_distance: f32,
    pub min_neighbors: usize,
    pub top_k: usize,
    pub clusters_file: String,
    pub summary_file: String,
    pub summary_model: String,
    pub summary_language: String,
    pub news_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
}

impl Config {
    /// Built-in defaults rooted at `data_dir`
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            max_distance: DEFAULT_MAX_DISTANCE,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            top_k: DEFAULT_TOP_K,
            clusters_file: DEFAULT_CLUSTERS_FILE.to_string(),
            summary_file: DEFAULT_SUMMARY_FILE.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            summary_language: DEFAULT_SUMMARY_LANGUAGE.to_string(),
            news_url: DEFAULT_NEWS_URL.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    /// Defaults overridden by `.env` and environment variables, then by
    /// `data_dir_override`. Variables already set win over `.env`.
    pub fn load(data_dir_override: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        if let Some(dir) = data_dir_override {
            config.data_dir = expand_path(&dir.to_string_lossy());
        }
        Ok(config)
    }

    /// Same as `load`, reading variables through `lookup`. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match lookup("NEWSCLUSTER_DATA_DIR") {
            Some(dir) => expand_path(dir.trim()),
            None => std::env::current_dir()?.join("data"),
        };

        let mut config = Self::with_data_dir(data_dir);

        if let Some(v) = lookup("MAX_DISTANCE") {
            config.max_distance = parse_env("MAX_DISTANCE", &v)?;
        }
        if let Some(v) = lookup("MIN_NEIGHBORS") {
            config.min_neighbors = parse_env("MIN_NEIGHBORS", &v)?;
        }
        if let Some(v) = lookup("DEFAULT_TOP_K") {
            config.top_k = parse_env("DEFAULT_TOP_K", &v)?;
        }
        if let Some(v) = lookup("CLUSTERS_OUTPUT") {
            config.clusters_file = v;
        }
        if let Some(v) = lookup("CLUSTER_SUMMARY_FILE") {
            config.summary_file = v;
        }
        if let Some(v) = lookup("SUMMARY_MODEL") {
            config.summary_model = v;
        }
        if let Some(v) = lookup("SUMMARY_LANGUAGE") {
            config.summary_language = v;
        }
        if let Some(v) = lookup("NEWS_URL") {
            config.news_url = v;
        }
        if let Some(v) = lookup("OPENAI_BASE_URL") {
            config.openai_base_url = v;
        }
        config.openai_api_key = lookup("OPENAI_API_KEY");

        Ok(config)
    }

    /// Absolute paths pass through; relative ones live in the data directory.
    pub fn resolve_output(&self, requested: Option<&str>, default_name: &str) -> PathBuf {
        let target = requested.unwrap_or(default_name);
        let path = expand_path(target);
        if path.is_absolute() {
            path
        } else {
            self.data_dir.join(path)
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| NewsError::Config(format!("{} has an invalid value: '{}'", key, value)))
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
