pub mod backend;
pub mod comment;
pub mod gemini;
pub mod openai;
pub mod prompt;
pub mod sse;

pub use backend::SummaryBackend;
pub use comment::{extract_comment, COMMENT_NOT_FOUND};
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;
pub use prompt::build_prompt;

use async_stream::stream;
use common::{CrawlerError, LlmBackendKind, LlmConfig, CrawlerResult};
use futures::stream::{Stream, StreamExt};
use sse::SseEvent;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryFragment {
    /// Text delta, in arrival order.
    Text(String),
    /// Diagnostic that ends an interrupted stream.
    Interrupted(String),
}

impl SummaryFragment {
    fn interrupted(error: &CrawlerError) -> Self {
        let reason = match error {
            CrawlerError::StreamInterrupted(reason) => reason.clone(),
            other => other.to_string(),
        };
        SummaryFragment::Interrupted(format!(
            "\n[{}]",
            CrawlerError::StreamInterrupted(reason)
        ))
    }

    pub fn as_str(&self) -> &str {
        match self {
            SummaryFragment::Text(s) | SummaryFragment::Interrupted(s) => s,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, SummaryFragment::Interrupted(_))
    }
}

impl fmt::Display for SummaryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lazy, finite, single-use sequence of summary fragments.
pub type FragmentStream = Pin<Box<dyn Stream<Item = SummaryFragment> + Send>>;

/// Concatenation of a fragment stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullSummary {
    pub text: String,
    pub interrupted: bool,
}

impl FullSummary {
    pub fn push(&mut self, fragment: &SummaryFragment) {
        self.text.push_str(fragment.as_str());
        if fragment.is_interrupted() {
            self.interrupted = true;
        }
    }

    /// The one-line comment, or the placeholder when the summary is
    /// missing it or the stream never completed.
    pub fn one_line_comment(&self) -> String {
        if self.interrupted {
            return COMMENT_NOT_FOUND.to_string();
        }
        extract_comment(&self.text)
    }
}

/// Drains `fragments` to exhaustion.
pub async fn collect_summary(fragments: impl Stream<Item = SummaryFragment>) -> FullSummary {
    let mut fragments = std::pin::pin!(fragments);
    let mut summary = FullSummary::default();
    while let Some(fragment) = fragments.next().await {
        summary.push(&fragment);
    }
    summary
}

#[derive(Clone)]
pub struct Summarizer {
    backend: Arc<dyn SummaryBackend>,
}

impl Summarizer {
    pub fn new(backend: impl SummaryBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Builds the configured backend. Fails only when the key is missing.
    pub fn from_config(config: &LlmConfig) -> CrawlerResult<Self> {
        let api_key = config.require_api_key()?;
        Ok(match config.backend {
            LlmBackendKind::OpenAi => {
                Self::new(OpenAiBackend::new(api_key, &config.model, &config.base_url))
            }
            LlmBackendKind::Gemini => {
                Self::new(GeminiBackend::new(api_key, &config.model, &config.base_url))
            }
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Streams a summary of `content`. Failures never surface as errors:
    /// the stream ends with one [`SummaryFragment::Interrupted`] instead.
    pub fn stream_summary(&self, content: &str) -> FragmentStream {
        let backend = Arc::clone(&self.backend);
        let prompt = build_prompt(content);

        Box::pin(stream! {
            info!("Requesting streamed summary from {} ({} chars)", backend.name(), prompt.len());

            let mut events = match backend.open_stream(&prompt).await {
                Ok(events) => events,
                Err(e) => {
                    warn!("Could not open summary stream: {}", e);
                    yield SummaryFragment::interrupted(&e);
                    return;
                }
            };

            let mut received = 0usize;
            let mut completed = false;
            while let Some(event) = events.next().await {
                let payload = match event {
                    Ok(SseEvent::Data(payload)) => payload,
                    Ok(SseEvent::Done) => {
                        completed = true;
                        break;
                    }
                    Err(e) => {
                        warn!("Summary stream broke after {} chars: {}", received, e);
                        yield SummaryFragment::interrupted(&e);
                        return;
                    }
                };

                match backend.parse_delta(&payload) {
                    Ok(Some(text)) if !text.is_empty() => {
                        received += text.len();
                        yield SummaryFragment::Text(text);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Unreadable summary chunk after {} chars: {}", received, e);
                        yield SummaryFragment::interrupted(&e);
                        return;
                    }
                }
            }

            if !completed && backend.ends_with_sentinel() {
                warn!("Summary stream closed after {} chars without completion marker", received);
                yield SummaryFragment::interrupted(&CrawlerError::StreamInterrupted(
                    "stream closed before completion marker".to_string(),
                ));
                return;
            }

            debug!("Summary stream finished with {} chars", received);
        })
    }
}
