use serde::Deserialize;
use std::fmt;

pub const UNTITLED: &str = "<제목 없음>";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    #[serde(default)]
    pub is_success: bool,
    #[serde(default)]
    pub result: Option<PostListResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostListResult {
    #[serde(default)]
    pub items: Vec<PostItem>,
}

/// `logNo` arrives as a number on most blogs and as a string on some.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LogNo {
    Number(u64),
    Text(String),
}

impl fmt::Display for LogNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogNo::Number(n) => write!(f, "{}", n),
            LogNo::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItem {
    pub domain_id_or_blog_id: Option<String>,
    pub log_no: Option<LogNo>,
    pub title_with_inspect_message: Option<String>,
    #[serde(default)]
    pub comment_cnt: u64,
    #[serde(default)]
    pub sympathy_cnt: u64,
    #[serde(default)]
    pub brief_contents: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListing {
    pub title: String,
    pub url: String,
    pub comment_count: u64,
    pub sympathy_count: u64,
    pub brief: String,
}

impl PostListing {
    /// Projects a list item onto its canonical mobile URL. Items without
    /// a blog id or log number cannot be addressed and yield `None`.
    pub fn from_item(item: PostItem, mobile_base_url: &str) -> Option<Self> {
        let blog_id = item.domain_id_or_blog_id.filter(|id| !id.is_empty())?;
        let log_no = item.log_no?;

        let brief = item
            .brief_contents
            .as_deref()
            .and_then(|b| b.split('。').next())
            .unwrap_or_default()
            .trim()
            .to_string();

        Some(Self {
            title: item
                .title_with_inspect_message
                .unwrap_or_else(|| UNTITLED.to_string()),
            url: canonical_post_url(mobile_base_url, &blog_id, &log_no.to_string()),
            comment_count: item.comment_cnt,
            sympathy_count: item.sympathy_cnt,
            brief,
        })
    }

    pub fn to_display_line(&self) -> String {
        format!(
            "{} (comments {}, likes {})",
            self.title, self.comment_count, self.sympathy_count
        )
    }
}

pub fn canonical_post_url(mobile_base_url: &str, blog_id: &str, log_no: &str) -> String {
    format!("{}/{}/{}", mobile_base_url.trim_end_matches('/'), blog_id, log_no)
}

/// Title-keyed listing that remembers arrival order. A repeated title
/// keeps its first position but takes the later entry's data.
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    entries: Vec<PostListing>,
}

impl PostIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, listing: PostListing) {
        match self.entries.iter_mut().find(|e| e.title == listing.title) {
            Some(existing) => *existing = listing,
            None => self.entries.push(listing),
        }
    }

    pub fn url_for(&self, title: &str) -> Option<&str> {
        self.get(title).map(|e| e.url.as_str())
    }

    pub fn get(&self, title: &str) -> Option<&PostListing> {
        self.entries.iter().find(|e| e.title == title)
    }

    /// Resolves a user choice: a 1-based position, or an exact title.
    pub fn select(&self, choice: &str) -> Option<&PostListing> {
        let choice = choice.trim();
        if let Some(listing) = self.get(choice) {
            return Some(listing);
        }
        choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.entries.get(i))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostListing> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PostListing> for PostIndex {
    fn from_iter<I: IntoIterator<Item = PostListing>>(iter: I) -> Self {
        let mut index = PostIndex::new();
        for listing in iter {
            index.insert(listing);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, url: &str) -> PostListing {
        PostListing {
            title: title.to_string(),
            url: url.to_string(),
            comment_count: 0,
            sympathy_count: 0,
            brief: String::new(),
        }
    }

    #[test]
    fn test_duplicate_title_last_wins() {
        let index: PostIndex = vec![
            listing("A", "https://m.blog.naver.com/x/1"),
            listing("B", "https://m.blog.naver.com/x/2"),
            listing("A", "https://m.blog.naver.com/x/3"),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.len(), 2);
        assert_eq!(index.url_for("A"), Some("https://m.blog.naver.com/x/3"));
        assert_eq!(index.titles().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_select_by_position_or_title() {
        let index: PostIndex = vec![
            listing("A", "https://m.blog.naver.com/x/1"),
            listing("2024", "https://m.blog.naver.com/x/2"),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.select(" 1 ").unwrap().title, "A");
        assert_eq!(index.select("A").unwrap().url, "https://m.blog.naver.com/x/1");
        // An exact title takes precedence over a position.
        assert_eq!(index.select("2024").unwrap().title, "2024");
        assert!(index.select("0").is_none());
        assert!(index.select("3").is_none());
        assert!(index.select("missing").is_none());
    }

    #[test]
    fn test_item_projection() {
        let item: PostItem = serde_json::from_str(
            r#"{
                "domainIdOrBlogId": "ranto28",
                "logNo": 223812345678,
                "titleWithInspectMessage": "금리 이야기",
                "commentCnt": 3,
                "sympathyCnt": 41,
                "briefContents": "첫 문장。둘째 문장"
            }"#,
        )
        .unwrap();

        let post = PostListing::from_item(item, "https://m.blog.naver.com").unwrap();
        assert_eq!(post.url, "https://m.blog.naver.com/ranto28/223812345678");
        assert_eq!(post.title, "금리 이야기");
        assert_eq!(post.brief, "첫 문장");
        assert_eq!(post.sympathy_count, 41);
    }

    #[test]
    fn test_item_defaults() {
        let item: PostItem =
            serde_json::from_str(r#"{"domainIdOrBlogId": "b", "logNo": "77"}"#).unwrap();
        let post = PostListing::from_item(item, "https://m.blog.naver.com/").unwrap();
        assert_eq!(post.title, UNTITLED);
        assert_eq!(post.url, "https://m.blog.naver.com/b/77");

        let orphan: PostItem = serde_json::from_str(r#"{"logNo": 1}"#).unwrap();
        assert!(PostListing::from_item(orphan, "https://m.blog.naver.com").is_none());
    }
}
