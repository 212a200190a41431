//! Server-sent event framing for streamed completions.
//!
//! Turns a raw byte stream into `data:` payloads. Lines are buffered as
//! bytes so multi-byte characters split across network chunks survive.

use bytes::Bytes;
use common::{CrawlerError, CrawlerResult};
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// Payload of one `data:` line.
    Data(String),
    /// The `[DONE]` completion marker.
    Done,
}

pub type SseStream = Pin<Box<dyn Stream<Item = CrawlerResult<SseEvent>> + Send>>;

pub struct SseEvents {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    buffer: Vec<u8>,
    finished: bool,
}

impl SseEvents {
    pub fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: Vec::new(),
            finished: false,
        }
    }
}

impl Stream for SseEvents {
    type Item = CrawlerResult<SseEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        loop {
            if let Some(event) = next_event(&mut this.buffer) {
                if matches!(event, Ok(SseEvent::Done) | Err(_)) {
                    this.finished = true;
                }
                return Poll::Ready(Some(event));
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buffer.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(CrawlerError::Transport(e))));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    // Flush a trailing line that arrived without its newline.
                    if this.buffer.iter().any(|b| !b.is_ascii_whitespace()) {
                        this.buffer.push(b'\n');
                        if let Some(event) = next_event(&mut this.buffer) {
                            return Poll::Ready(Some(event));
                        }
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Pops complete lines off `buffer` until one carries a `data:` payload.
fn next_event(buffer: &mut Vec<u8>) -> Option<CrawlerResult<SseEvent>> {
    loop {
        let newline = buffer.iter().position(|b| *b == b'\n')?;
        let raw: Vec<u8> = buffer.drain(..=newline).collect();

        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                return Some(Err(CrawlerError::Decode(format!(
                    "Invalid UTF-8 in stream: {}",
                    e
                ))))
            }
        };
        let line = line.trim_end_matches(['\r', '\n']);

        // Blank separators, comments and event/id/retry fields carry no text.
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.strip_prefix(' ').unwrap_or(data);

        if data.trim() == DONE_SENTINEL {
            return Some(Ok(SseEvent::Done));
        }
        return Some(Ok(SseEvent::Data(data.to_string())));
    }
}
