use crate::models::{PostIndex, PostListResponse, PostListing};
use tracing::{info, warn};

/// Result of a list fetch. `notice` is set whenever `posts` is empty.
#[derive(Debug, Clone, Default)]
pub struct PostListOutcome {
    pub posts: PostIndex,
    pub notice: Option<String>,
}

impl PostListOutcome {
    pub fn failed(notice: impl Into<String>) -> Self {
        Self {
            posts: PostIndex::new(),
            notice: Some(notice.into()),
        }
    }
}

pub fn build_post_index(response: PostListResponse, mobile_base_url: &str) -> PostListOutcome {
    if !response.is_success {
        warn!("Post list response reported isSuccess=false");
        return PostListOutcome::failed("The post list request was not successful.");
    }

    let items = response.result.unwrap_or_default().items;
    let total = items.len();

    let posts: PostIndex = items
        .into_iter()
        .filter_map(|item| PostListing::from_item(item, mobile_base_url))
        .collect();

    if posts.len() < total {
        warn!("Skipped {} post(s) without blog id or log number", total - posts.len());
    }

    if posts.is_empty() {
        return PostListOutcome::failed("There are no posts to show.");
    }

    info!("Parsed {} posts from the post list", posts.len());
    PostListOutcome {
        posts,
        notice: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PostListOutcome {
        let response: PostListResponse = serde_json::from_str(json).unwrap();
        build_post_index(response, "https://m.blog.naver.com")
    }

    #[test]
    fn test_success_builds_index() {
        let outcome = parse(
            r#"{"isSuccess": true, "result": {"items": [
                {"domainIdOrBlogId": "ranto28", "logNo": 1, "titleWithInspectMessage": "A"},
                {"domainIdOrBlogId": "ranto28", "logNo": 2, "titleWithInspectMessage": "B"}
            ]}}"#,
        );
        assert!(outcome.notice.is_none());
        assert_eq!(outcome.posts.url_for("B"), Some("https://m.blog.naver.com/ranto28/2"));
    }

    #[test]
    fn test_unsuccessful_flag() {
        let outcome = parse(r#"{"isSuccess": false, "result": {"items": []}}"#);
        assert!(outcome.posts.is_empty());
        assert!(outcome.notice.unwrap().contains("not successful"));
    }

    #[test]
    fn test_missing_items() {
        let outcome = parse(r#"{"isSuccess": true}"#);
        assert!(outcome.posts.is_empty());
        assert!(outcome.notice.unwrap().contains("no posts"));
    }
}
