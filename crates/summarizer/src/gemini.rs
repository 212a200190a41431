use crate::backend::SummaryBackend;
use crate::sse::{SseEvents, SseStream};
use async_trait::async_trait;
use common::{CrawlerError, CrawlerResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini `streamGenerateContent` in SSE mode. The key travels in the
/// `x-goog-api-key` header; the stream ends when the connection closes.
pub struct GeminiBackend {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
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
impl SummaryBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn open_stream(&self, prompt: &str) -> CrawlerResult<SseStream> {
        let url = format!("{}/models/{}:streamGenerateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        debug!(model = %self.model, "Gemini streaming request");

        let res = self
            .http_client
            .post(&url)
            .query(&[("alt", "sse")])
            .header(CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            warn!(status = %status, error = %text, "Gemini streaming API error");
            return Err(CrawlerError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        Ok(Box::pin(SseEvents::new(res.bytes_stream())))
    }

    fn parse_delta(&self, payload: &str) -> CrawlerResult<Option<String>> {
        let chunk: GenerateChunk = serde_json::from_str(payload)
            .map_err(|e| CrawlerError::Decode(format!("bad Gemini stream chunk: {}", e)))?;

        let text: String = chunk
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        Ok(if text.is_empty() { None } else { Some(text) })
    }
}
