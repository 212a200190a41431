pub mod api;
pub mod extract;
pub mod list;
pub mod models;
pub mod normalize;
pub mod url;

pub use api::{NaverBlogAPI, PostListQuery};
pub use extract::{ContentSource, ExtractedContent};
pub use list::PostListOutcome;
pub use models::{PostIndex, PostListing};
pub use normalize::normalize_text;
pub use url::to_mobile_url;

use common::CrawlerResult;

/// Scrapes a post and runs the result through [`normalize_text`].
pub async fn fetch_post_text(api: &NaverBlogAPI, url: &str) -> CrawlerResult<String> {
    let content = api.scrape_post(url).await?;
    Ok(normalize_text(&content.text))
}
