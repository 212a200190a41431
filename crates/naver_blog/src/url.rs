use common::{CrawlerError, CrawlerResult};

pub const BLOG_DOMAIN: &str = "blog.naver.com";
pub const MOBILE_BLOG_DOMAIN: &str = "m.blog.naver.com";

/// Rewrites a desktop blog URL onto the mobile host. Mobile URLs are
/// returned as-is, so applying this twice is the same as applying it once.
pub fn to_mobile_url(url: &str) -> CrawlerResult<String> {
    if !url.contains(BLOG_DOMAIN) {
        return Err(CrawlerError::InvalidUrl(url.to_string()));
    }
    if url.contains(MOBILE_BLOG_DOMAIN) {
        return Ok(url.to_string());
    }
    Ok(url.replace(BLOG_DOMAIN, MOBILE_BLOG_DOMAIN))
}
