use crate::list::{build_post_index, PostListOutcome};
use crate::models::PostListResponse;
use common::{BlogConfig, CrawlerError, CrawlerResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LIST_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";
pub(crate) const PAGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/98.0.4758.102 Safari/537.36";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub category_no: u32,
    pub item_count: u32,
    pub page: u32,
    pub user_id: String,
}

impl From<&BlogConfig> for PostListQuery {
    fn from(config: &BlogConfig) -> Self {
        Self {
            category_no: config.category_no,
            item_count: config.item_count,
            page: config.page,
            user_id: config.user_id.clone(),
        }
    }
}

#[derive(Clone)]
pub struct NaverBlogAPI {
    client: Client,
    config: BlogConfig,
}

impl NaverBlogAPI {
    pub fn new(config: BlogConfig) -> CrawlerResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: BlogConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    fn list_headers(&self) -> CrawlerResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ko,en-US;q=0.9,en;q=0.8"));
        headers.insert(
            REFERER,
            HeaderValue::from_str(&self.config.referer())
                .map_err(|e| CrawlerError::InvalidUrl(format!("bad referer: {}", e)))?,
        );
        headers.insert(
            "sec-ch-ua",
            HeaderValue::from_static(
                "\"Google Chrome\";v=\"135\", \"Not-A.Brand\";v=\"8\", \"Chromium\";v=\"135\"",
            ),
        );
        headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
        headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"macOS\""));
        headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
        headers.insert("priority", HeaderValue::from_static("u=1, i"));
        headers.insert(USER_AGENT, HeaderValue::from_static(LIST_USER_AGENT));
        Ok(headers)
    }

    pub async fn get_post_list(&self, query: &PostListQuery) -> CrawlerResult<PostListResponse> {
        let url = self.config.post_list_url();
        info!("Fetching post list from {} (page {})", url, query.page);

        let resp = self
            .client
            .get(&url)
            .headers(self.list_headers()?)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlerError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CrawlerError::Decode(format!("post list is not valid JSON: {}", e)))
    }

    /// Fetches the post list and never fails: any problem becomes an empty
    /// index plus a notice for the user.
    pub async fn fetch_posts(&self, query: &PostListQuery) -> PostListOutcome {
        match self.get_post_list(query).await {
            Ok(response) => build_post_index(response, &self.config.mobile_base_url),
            Err(e) => {
                warn!("Post list request failed: {}", e);
                PostListOutcome::failed(format!("Could not fetch the post list: {}", e))
            }
        }
    }

    /// GETs an HTML page with the fixed page user-agent. Non-2xx is an error.
    pub async fn get_page(&self, url: &str) -> CrawlerResult<String> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, PAGE_USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlerError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}
