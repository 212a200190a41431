use crate::sse::SseStream;
use async_trait::async_trait;
use common::CrawlerResult;

/// A remote chat model that can stream a completion for a single user prompt.
///
/// Backends differ only in how they shape the request, where they put the
/// key, and how a streamed payload maps to text.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Sends the prompt with streaming enabled and returns the SSE events.
    async fn open_stream(&self, prompt: &str) -> CrawlerResult<SseStream>;

    /// Extracts the text delta from one `data:` payload, if it has any.
    fn parse_delta(&self, payload: &str) -> CrawlerResult<Option<String>>;

    /// Whether a complete stream ends with `data: [DONE]`. When true, a
    /// stream that closes without it is treated as interrupted.
    fn ends_with_sentinel(&self) -> bool {
        false
    }
}
