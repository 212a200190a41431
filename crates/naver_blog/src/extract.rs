use crate::api::NaverBlogAPI;
use crate::url::to_mobile_url;
use common::{CrawlerError, CrawlerResult};
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

const MAIN_CONTAINER: &str = "div.se-main-container";
const IFRAME: &str = "iframe";
const IFRAME_CONTAINER: &str = "div#postViewArea";
const APOLLO_STATE_PATTERN: &str = r"(?s)window\.__APOLLO_STATE__\s*=\s*(\{.*?\});";
// Elements whose text never renders.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

fn apollo_state_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(APOLLO_STATE_PATTERN).expect("state pattern is valid"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Visible text of the smart editor container.
    Container,
    /// `post.content` from the embedded Apollo state, verbatim.
    EmbeddedState,
    /// Outer HTML of the legacy container inside the post iframe.
    Iframe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub text: String,
    pub source: ContentSource,
}

impl ExtractedContent {
    fn new(text: String, source: ContentSource) -> Self {
        Self { text, source }
    }
}

/// Outcome of the lookups that only need the mobile page itself.
#[derive(Debug, PartialEq, Eq)]
pub enum PageScan {
    Found(ExtractedContent),
    Iframe(String),
    NotFound,
}

fn selector(css: &str) -> CrawlerResult<Selector> {
    Selector::parse(css)
        .map_err(|e| CrawlerError::HtmlParse(format!("Failed to parse selector '{}': {}", css, e)))
}

/// Visible text nodes under `element`, each trimmed, empty ones dropped,
/// one per line. Script, style and similar non-rendered text is skipped.
pub fn element_text_lines(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            (!hidden).then(|| text.trim())
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn container_text(document: &Html) -> CrawlerResult<Option<String>> {
    let container = selector(MAIN_CONTAINER)?;
    Ok(document.select(&container).next().map(element_text_lines))
}

/// Reads `post.content` out of a `window.__APOLLO_STATE__ = {...};`
/// assignment. The capture stops at the first `};`, and anything that is
/// not strict JSON is ignored.
pub fn embedded_state_content(html: &str) -> CrawlerResult<Option<String>> {
    let Some(captures) = apollo_state_regex().captures(html) else {
        return Ok(None);
    };
    let raw = captures[1].trim();

    let state: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            debug!("Embedded state is not valid JSON: {}", e);
            return Ok(None);
        }
    };

    Ok(match state.pointer("/post/content") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

pub fn iframe_src(document: &Html) -> CrawlerResult<Option<String>> {
    let iframe = selector(IFRAME)?;
    Ok(document
        .select(&iframe)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(str::to_string))
}

pub fn iframe_container_html(html: &str) -> CrawlerResult<Option<String>> {
    let document = Html::parse_document(html);
    let container = selector(IFRAME_CONTAINER)?;
    Ok(document.select(&container).next().map(|el| el.html()))
}

/// Runs the container and embedded-state lookups and, failing both,
/// reports the first iframe source so the caller can follow it.
pub fn scan_page(html: &str) -> CrawlerResult<PageScan> {
    let document = Html::parse_document(html);

    if let Some(text) = container_text(&document)? {
        return Ok(PageScan::Found(ExtractedContent::new(text, ContentSource::Container)));
    }

    if let Some(content) = embedded_state_content(html)? {
        return Ok(PageScan::Found(ExtractedContent::new(
            content,
            ContentSource::EmbeddedState,
        )));
    }

    Ok(match iframe_src(&document)? {
        Some(src) => PageScan::Iframe(src),
        None => PageScan::NotFound,
    })
}

impl NaverBlogAPI {
    /// Scrapes the body of a post. Desktop URLs are rewritten to the mobile
    /// host first; a failed page request ends the attempt immediately.
    pub async fn scrape_post(&self, url: &str) -> CrawlerResult<ExtractedContent> {
        let mobile_url = to_mobile_url(url)?;
        info!("Scraping post body from {}", mobile_url);

        let html = self.get_page(&mobile_url).await?;

        let src = match scan_page(&html)? {
            PageScan::Found(content) => {
                info!("Extracted {} chars via {:?}", content.text.len(), content.source);
                return Ok(content);
            }
            PageScan::Iframe(src) => src,
            PageScan::NotFound => return Err(CrawlerError::ContentNotFound(mobile_url)),
        };

        let iframe_url = match Url::parse(&mobile_url).and_then(|base| base.join(&src)) {
            Ok(url) => url,
            Err(e) => {
                warn!("Unusable iframe src '{}': {}", src, e);
                return Err(CrawlerError::ContentNotFound(mobile_url));
            }
        };
        info!("Following post iframe {}", iframe_url);

        let iframe_html = match self.get_page(iframe_url.as_str()).await {
            Ok(body) => body,
            Err(CrawlerError::HttpStatus { url, status }) => {
                warn!("Iframe request to {} returned {}", url, status);
                return Err(CrawlerError::ContentNotFound(mobile_url));
            }
            Err(e) => return Err(e),
        };

        match iframe_container_html(&iframe_html)? {
            Some(markup) => Ok(ExtractedContent::new(markup, ContentSource::Iframe)),
            None => Err(CrawlerError::ContentNotFound(mobile_url)),
        }
    }
}
