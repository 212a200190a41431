use crate::backend::SummaryBackend;
use crate::sse::{SseEvents, SseStream};
use async_trait::async_trait;
use common::{CrawlerError, CrawlerResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions`, keyed with a bearer token.
pub struct OpenAiBackend {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }
}

#[async_trait]
impl SummaryBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn open_stream(&self, prompt: &str) -> CrawlerResult<SseStream> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": true
        });
        debug!(model = %self.model, "OpenAI streaming request");

        let res = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            warn!(status = %status, error = %text, "OpenAI streaming API error");
            return Err(CrawlerError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        Ok(Box::pin(SseEvents::new(res.bytes_stream())))
    }

    fn parse_delta(&self, payload: &str) -> CrawlerResult<Option<String>> {
        let chunk: StreamChunk = serde_json::from_str(payload)
            .map_err(|e| CrawlerError::Decode(format!("bad OpenAI stream chunk: {}", e)))?;
        Ok(chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content))
    }

    fn ends_with_sentinel(&self) -> bool {
        true
    }
}
