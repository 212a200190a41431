use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. For the mobile post page this is the fetch-failed condition.
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Decoding failed: {0}")]
    Decode(String),

    #[error("Not a Naver blog URL: {0}")]
    InvalidUrl(String),

    #[error("Post body not found at {0}; the page structure may have changed")]
    ContentNotFound(String),

    #[error("Summary stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("HTML parsing failed: {0}")]
    HtmlParse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

pub type CrawlerResult<T> = Result<T, CrawlerError>;
