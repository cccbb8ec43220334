use crate::config::Config;
use crate::error::{NewsError, Result};

/// Temperature used for cluster summaries
pub const SUMMARY_TEMPERATURE: f32 = 0.4;

/// OpenAI-compatible chat completion client
pub struct LlmClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Client for `model` against the configured OpenAI endpoint.
    /// Requires an API key.
    pub fn from_config(config: &Config, model: &str) -> Result<Self> {
        let key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| NewsError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(&config.openai_base_url, model, Some(key)))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat completion request and return the trimmed response text
    pub async fn chat(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        let url = format!("{}/chat/completions", self.endpoint);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": temperature,
        });

        let mut req = self.client.post(&url).json(&body);

        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(NewsError::Config(format!(
                "LLM returned {}: {}",
                status, text
            )));
        }

        let json: serde_json::Value = response.json().await?;
        extract_content(&json)
    }
}

fn extract_content(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or(NewsError::LlmEmptyResponse)
}
