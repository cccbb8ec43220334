use crate::config::Config;
use crate::error::{NewsError, Result};
use serde_json::{json, Value};

pub const OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const OLLAMA_EMBEDDING_MODEL: &str = "nomic-embed-text";
const OLLAMA_ENDPOINT: &str = "http://localhost:11434/api/embeddings";

pub enum EmbeddingProvider {
    OpenAI { api_key: String, base_url: String },
    OllamaLocal,
}

impl EmbeddingProvider {
    /// OpenAI when a key is configured, local Ollama otherwise
    pub fn from_config(config: &Config) -> Self {
        match config.openai_api_key {
            Some(ref key) => Self::OpenAI {
                api_key: key.clone(),
                base_url: config.openai_base_url.clone(),
            },
            None => Self::OllamaLocal,
        }
    }

    /// Resolve an explicit `--provider` name
    pub fn from_name(name: &str, config: &Config) -> Result<Self> {
        match name {
            "openai" => {
                let key = config
                    .openai_api_key
                    .clone()
                    .ok_or_else(|| NewsError::Config("OPENAI_API_KEY not set".into()))?;
                Ok(Self::OpenAI {
                    api_key: key,
                    base_url: config.openai_base_url.clone(),
                })
            }
            "ollama" => Ok(Self::OllamaLocal),
            _ => Err(NewsError::Config(format!("Unknown provider: {}", name))),
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            Self::OpenAI { .. } => OPENAI_EMBEDDING_MODEL,
            Self::OllamaLocal => OLLAMA_EMBEDDING_MODEL,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::OpenAI { .. } => "OpenAI",
            Self::OllamaLocal => "Ollama",
        }
    }

    fn endpoint(&self) -> String {
        match self {
            Self::OpenAI { base_url, .. } => {
                format!("{}/embeddings", base_url.trim_end_matches('/'))
            }
            Self::OllamaLocal => OLLAMA_ENDPOINT.to_string(),
        }
    }

    fn request_body(&self, text: &str) -> Value {
        match self {
            Self::OpenAI { .. } => json!({ "model": self.model(), "input": text }),
            Self::OllamaLocal => json!({ "model": self.model(), "prompt": text }),
        }
    }

    /// Pull the vector out of a provider response. An empty vector is an
    /// error.
    fn parse_embedding(&self, body: &Value) -> Result<Vec<f32>> {
        let pointer = match self {
            Self::OpenAI { .. } => "/data/0/embedding",
            Self::OllamaLocal => "/embedding",
        };
        let raw = body.pointer(pointer).cloned().ok_or_else(|| {
            NewsError::Config(format!("{} response has no {}", self.label(), pointer))
        })?;
        let embedding: Vec<f32> = serde_json::from_value(raw)?;
        if embedding.is_empty() {
            return Err(NewsError::Config(format!(
                "{} returned an empty embedding",
                self.label()
            )));
        }
        Ok(embedding)
    }

    /// Embed one text with a single request.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut request = reqwest::Client::new()
            .post(self.endpoint())
            .json(&self.request_body(text));
        if let Self::OpenAI { api_key, .. } = self {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::Config(format!(
                "{} embedding request failed ({}): {}",
                self.label(),
                status,
                body
            )));
        }

        let body: Value = response.json().await?;
        self.parse_embedding(&body)
    }
}
